//! AST node definitions, grouped by rule family.
//!
//! Every node carries (when parsed from source) a type tag, an optional
//! `SourceRange`, and — on the rule nodes that sit directly under a
//! `FilterList` — the verbatim source slice needed for lossless
//! re-emission.

pub mod comment;
pub mod common;
pub mod cosmetic;
pub mod expression;
pub mod network;
pub mod rule;

pub use comment::*;
pub use common::*;
pub use cosmetic::*;
pub use expression::*;
pub use network::*;
pub use rule::*;
