//! Unified error type for all parsing phases.

use crate::location::SourceRange;
use std::fmt;

/// Errors raised while parsing a rule, a comment body, a modifier list,
/// or any other syntactic unit this crate understands.
#[derive(Debug, Clone, PartialEq)]
pub enum AgtreeError {
    /// A structural syntax error raised directly by one of our parsers.
    Syntax {
        message: String,
        loc: Option<SourceRange>,
    },
    /// An error delegated from the internal CSS-subset helper, with the
    /// offset already translated back to the rule's base location.
    Css {
        message: String,
        loc: Option<SourceRange>,
    },
    /// A malformed JSON5 object body inside a config comment.
    Json5 { message: String },
}

impl AgtreeError {
    pub fn syntax(message: impl Into<String>) -> Self {
        AgtreeError::Syntax {
            message: message.into(),
            loc: None,
        }
    }

    pub fn syntax_at(message: impl Into<String>, loc: SourceRange) -> Self {
        AgtreeError::Syntax {
            message: message.into(),
            loc: Some(loc),
        }
    }

    pub fn css(message: impl Into<String>, loc: Option<SourceRange>) -> Self {
        AgtreeError::Css {
            message: message.into(),
            loc,
        }
    }

    /// Stable name used when a tolerant-mode parse wraps this error into
    /// an `InvalidRule`.
    pub fn name(&self) -> &'static str {
        match self {
            AgtreeError::Syntax { .. } => "SyntaxError",
            AgtreeError::Css { .. } => "CssSyntaxError",
            AgtreeError::Json5 { .. } => "Json5SyntaxError",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AgtreeError::Syntax { message, .. } => message,
            AgtreeError::Css { message, .. } => message,
            AgtreeError::Json5 { message } => message,
        }
    }

    pub fn loc(&self) -> Option<SourceRange> {
        match self {
            AgtreeError::Syntax { loc, .. } => *loc,
            AgtreeError::Css { loc, .. } => *loc,
            AgtreeError::Json5 { .. } => None,
        }
    }
}

impl fmt::Display for AgtreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgtreeError::Syntax { message, .. } => write!(f, "Syntax error: {message}"),
            AgtreeError::Css { message, .. } => write!(f, "CSS error: {message}"),
            AgtreeError::Json5 { message } => write!(f, "JSON5 error: {message}"),
        }
    }
}

impl std::error::Error for AgtreeError {}

pub type Result<T> = std::result::Result<T, AgtreeError>;
