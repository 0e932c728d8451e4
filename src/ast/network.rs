//! AST node for the network rule family.

use super::common::{ModifierList, Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkRule {
    pub exception: bool,
    pub pattern: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<ModifierList>,
}
