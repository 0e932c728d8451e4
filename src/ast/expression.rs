//! AST nodes for the `!#if` logical-expression grammar.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOperator {
    Not,
    And,
    Or,
}

impl LogicalOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalOperator::Not => "!",
            LogicalOperator::And => "&&",
            LogicalOperator::Or => "||",
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            LogicalOperator::Not => 3,
            LogicalOperator::And => 2,
            LogicalOperator::Or => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExpressionNode {
    Variable {
        name: String,
    },
    Operator {
        op: LogicalOperator,
        left: Box<ExpressionNode>,
        #[serde(skip_serializing_if = "Option::is_none")]
        right: Option<Box<ExpressionNode>>,
    },
    Parenthesis {
        expression: Box<ExpressionNode>,
    },
}
