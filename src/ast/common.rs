//! Auxiliary AST nodes shared across rule families: parameters, domains,
//! and modifiers.

use crate::location::SourceRange;
use serde::{Deserialize, Serialize};

/// A value carries its text plus, when parsed from source, the range it
/// occupied. Hand-built nodes may omit the range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Value {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loc: Option<SourceRange>,
}

impl Value {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            loc: None,
        }
    }

    pub fn with_loc(value: impl Into<String>, loc: SourceRange) -> Self {
        Self {
            value: value.into(),
            loc: Some(loc),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterList {
    pub children: Vec<Parameter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainListSeparator {
    Comma,
    Pipe,
}

impl DomainListSeparator {
    pub fn as_char(self) -> char {
        match self {
            DomainListSeparator::Comma => ',',
            DomainListSeparator::Pipe => '|',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub value: String,
    pub exception: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainList {
    pub separator: DomainListSeparator,
    pub children: Vec<Domain>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub modifier: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub exception: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierList {
    pub children: Vec<Modifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub adblock: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hint {
    pub name: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<ParameterList>,
}
