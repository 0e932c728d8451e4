//! AST nodes for the comment rule family.

use super::common::{Agent, Hint, ParameterList, Value};
use super::expression::ExpressionNode;
use crate::location::SourceRange;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRule {
    pub marker: Value,
    pub text: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataCommentRule {
    pub marker: Value,
    pub header: Value,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConfigCommentParams {
    Json5(serde_json::Value),
    List(ParameterList),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigCommentRule {
    pub marker: Value,
    pub command: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<ConfigCommentParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HintCommentRule {
    pub children: Vec<Hint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PreProcessorParams {
    Expression(ExpressionNode),
    List(ParameterList),
    Raw(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreProcessorCommentRule {
    pub name: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<PreProcessorParams>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentCommentRule {
    pub children: Vec<Agent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AnyCommentRule {
    Comment(CommentRule),
    Metadata(MetadataCommentRule),
    Config(ConfigCommentRule),
    Hint(HintCommentRule),
    PreProcessor(PreProcessorCommentRule),
    Agent(AgentCommentRule),
}

/// A location-bearing error captured as data (not thrown) for an
/// `InvalidRule`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleError {
    pub name: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loc: Option<SourceRange>,
}
