//! A parser, serializer, and AST library for adblock filter-list syntax
//! (AdGuard, uBlock Origin, Adblock Plus dialects).
//!
//! The crate is organized bottom-up: [`scanner`] and [`location`] are
//! leaf utilities; [`parser::parameter_list`], [`parser::domain_list`],
//! [`parser::modifier`], and [`parser::logical_expression`] build on
//! them; the comment and cosmetic rule families build on those; and
//! [`filter_list`] drives the whole pipeline over a multi-line input.

pub mod ast;
pub mod convert;
pub mod css;
pub mod domain_utils;
pub mod error;
pub mod filter_list;
pub mod json5;
pub mod location;
pub mod modifiers;
pub mod parser;
pub mod scanner;
pub mod semver_util;

pub use ast::rule::{AnyRule, Category, FilterList, Syntax};
pub use error::{AgtreeError, Result};

/// Parse a full filter list from text.
///
/// In tolerant mode (the default for real-world lists, which always
/// contain some noise), a malformed line becomes an `InvalidRule`
/// instead of aborting the whole parse; in strict mode the first error
/// is returned immediately.
pub fn parse(text: &str, tolerant: bool) -> Result<FilterList> {
    filter_list::parse(text, tolerant)
}

/// Re-join a parsed filter list into text. When `prefer_raw` is set, any
/// rule still carrying its original source slice is emitted verbatim
/// instead of being regenerated from its AST.
pub fn generate(list: &FilterList, prefer_raw: bool) -> String {
    filter_list::generate(list, prefer_raw)
}

/// Parse a single rule (one line, no trailing newline).
pub fn parse_rule(text: &str, tolerant: bool) -> Result<AnyRule> {
    parser::rule::parse(text, location::Position::new(0, 1, 1), tolerant)
}

/// Regenerate the source text of a single parsed rule.
pub fn generate_rule(rule: &AnyRule) -> String {
    parser::rule::generate(rule)
}

/// Modifier metadata lookups: existence, alias resolution.
pub struct ModifierValidator;

impl ModifierValidator {
    pub fn exists(name: &str) -> bool {
        modifiers::exists(name)
    }

    pub fn canonical_name(name: &str) -> Option<&'static str> {
        modifiers::canonical_name(name)
    }
}

/// uBO-to-AdGuard HTML-filtering rule conversion.
pub struct HtmlRuleConverter;

impl HtmlRuleConverter {
    pub fn convert_to_adg(rule: &ast::cosmetic::CosmeticRule) -> Result<ast::cosmetic::CosmeticRule> {
        convert::html::convert_to_adg(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_regenerates_a_small_filter_list() {
        let text = "! Title: Example\nexample.org##.banner\n||example.com^$script\n";
        let list = parse(text, true).unwrap();
        assert_eq!(list.children.len(), 3);
        assert_eq!(generate(&list, true), text);
    }

    #[test]
    fn modifier_validator_resolves_aliases() {
        assert!(ModifierValidator::exists("domain"));
        assert_eq!(ModifierValidator::canonical_name("3p"), Some("third-party"));
    }

    #[test]
    fn single_rule_round_trip() {
        let rule = parse_rule("||example.com^$script,domain=a.com", false).unwrap();
        assert_eq!(generate_rule(&rule), "||example.com^$script,domain=a.com");
    }
}
