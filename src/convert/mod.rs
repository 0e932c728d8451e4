//! Cross-dialect AST conversions.

pub mod html;
