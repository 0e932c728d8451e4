//! The top-level tagged union every parsed line produces.

use super::comment::{AnyCommentRule, RuleError};
use super::cosmetic::CosmeticRule;
use super::network::NetworkRule;
use crate::location::SourceRange;
use crate::scanner::NewlineKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Empty,
    Invalid,
    Comment,
    Cosmetic,
    Network,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Syntax {
    Common,
    AdGuard,
    UblockOrigin,
    AdblockPlus,
}

/// Raw source attachments kept for lossless re-emission.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Raws {
    pub text: Option<String>,
    pub nl: Option<NewlineKind>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmptyRule {
    pub raws: Raws,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvalidRule {
    pub raw: String,
    pub error: RuleError,
    pub raws: Raws,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaggedRule<T> {
    pub syntax: Syntax,
    pub loc: Option<SourceRange>,
    pub raws: Raws,
    pub node: T,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnyRule {
    Empty(EmptyRule),
    Invalid(InvalidRule),
    Comment(TaggedRule<AnyCommentRule>),
    Cosmetic(TaggedRule<CosmeticRule>),
    Network(TaggedRule<NetworkRule>),
}

impl AnyRule {
    pub fn category(&self) -> Category {
        match self {
            AnyRule::Empty(_) => Category::Empty,
            AnyRule::Invalid(_) => Category::Invalid,
            AnyRule::Comment(_) => Category::Comment,
            AnyRule::Cosmetic(_) => Category::Cosmetic,
            AnyRule::Network(_) => Category::Network,
        }
    }

    pub fn syntax(&self) -> Option<Syntax> {
        match self {
            AnyRule::Empty(_) | AnyRule::Invalid(_) => None,
            AnyRule::Comment(r) => Some(r.syntax),
            AnyRule::Cosmetic(r) => Some(r.syntax),
            AnyRule::Network(r) => Some(r.syntax),
        }
    }

    pub fn raws(&self) -> &Raws {
        match self {
            AnyRule::Empty(r) => &r.raws,
            AnyRule::Invalid(r) => &r.raws,
            AnyRule::Comment(r) => &r.raws,
            AnyRule::Cosmetic(r) => &r.raws,
            AnyRule::Network(r) => &r.raws,
        }
    }

    pub fn raws_mut(&mut self) -> &mut Raws {
        match self {
            AnyRule::Empty(r) => &mut r.raws,
            AnyRule::Invalid(r) => &mut r.raws,
            AnyRule::Comment(r) => &mut r.raws,
            AnyRule::Cosmetic(r) => &mut r.raws,
            AnyRule::Network(r) => &mut r.raws,
        }
    }
}

/// A parsed filter list: zero-based-ordered rules plus how they should
/// be re-joined.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterList {
    pub children: Vec<AnyRule>,
}
