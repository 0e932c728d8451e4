//! Top-level rule dispatcher: classifies one line of filter-list text and
//! routes it to the comment, cosmetic, or network parser.

use crate::ast::comment::RuleError;
use crate::ast::rule::{AnyRule, Category, EmptyRule, InvalidRule, Raws, Syntax, TaggedRule};
use crate::error::Result;
use crate::location::Position;
use crate::parser::{comment, cosmetic, network};

/// Parse a single logical line. In tolerant mode, any parse error is
/// captured as an `InvalidRule` instead of propagating. In strict mode,
/// the error is re-raised to the caller.
pub fn parse(raw: &str, base: Position, tolerant: bool) -> Result<AnyRule> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(AnyRule::Empty(EmptyRule {
            raws: Raws::default(),
        }));
    }

    let result = dispatch(trimmed, base);
    match result {
        Ok(rule) => Ok(rule),
        Err(e) if tolerant => Ok(AnyRule::Invalid(InvalidRule {
            raw: raw.to_string(),
            error: RuleError {
                name: e.name().to_string(),
                message: e.message().to_string(),
                loc: e.loc(),
            },
            raws: Raws::default(),
        })),
        Err(e) => Err(e),
    }
}

fn dispatch(trimmed: &str, base: Position) -> Result<AnyRule> {
    if comment::is_comment_rule(trimmed) {
        let rule = comment::parse(trimmed)?;
        return Ok(AnyRule::Comment(TaggedRule {
            syntax: Syntax::Common,
            loc: Some(crate::location::loc_range(base, 0, trimmed.len())),
            raws: Raws::default(),
            node: rule,
        }));
    }
    if cosmetic::contains_cosmetic_separator(trimmed) {
        let rule = cosmetic::parse(trimmed)?;
        let syntax = cosmetic::infer_syntax(&rule);
        return Ok(AnyRule::Cosmetic(TaggedRule {
            syntax,
            loc: Some(crate::location::loc_range(base, 0, trimmed.len())),
            raws: Raws::default(),
            node: rule,
        }));
    }
    let rule = network::parse(trimmed)?;
    Ok(AnyRule::Network(TaggedRule {
        syntax: Syntax::Common,
        loc: Some(crate::location::loc_range(base, 0, trimmed.len())),
        raws: Raws::default(),
        node: rule,
    }))
}

pub fn generate(rule: &AnyRule) -> String {
    match rule {
        AnyRule::Empty(_) => String::new(),
        AnyRule::Invalid(r) => r.raw.clone(),
        AnyRule::Comment(r) => comment::generate(&r.node),
        AnyRule::Cosmetic(r) => cosmetic::generate(&r.node),
        AnyRule::Network(r) => network::generate(&r.node),
    }
}

pub fn category(raw: &str) -> Category {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Category::Empty;
    }
    if comment::is_comment_rule(trimmed) {
        return Category::Comment;
    }
    if cosmetic::contains_cosmetic_separator(trimmed) {
        return Category::Cosmetic;
    }
    Category::Network
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Position {
        Position::new(0, 1, 1)
    }

    #[test]
    fn dispatches_empty_line() {
        let rule = parse("", base(), false).unwrap();
        assert!(matches!(rule, AnyRule::Empty(_)));
    }

    #[test]
    fn dispatches_comment() {
        let rule = parse("! a title comment", base(), false).unwrap();
        assert!(matches!(rule, AnyRule::Comment(_)));
    }

    #[test]
    fn dispatches_cosmetic() {
        let rule = parse("example.org##.banner", base(), false).unwrap();
        assert!(matches!(rule, AnyRule::Cosmetic(_)));
    }

    #[test]
    fn dispatches_network() {
        let rule = parse("||example.com^$script", base(), false).unwrap();
        assert!(matches!(rule, AnyRule::Network(_)));
    }

    #[test]
    fn strict_mode_propagates_error() {
        let err = parse("[$path=/foo]example.com##+js(foo)", base(), false);
        assert!(err.is_err());
    }

    #[test]
    fn tolerant_mode_wraps_error() {
        let rule = parse("[$path=/foo]example.com##+js(foo)", base(), true).unwrap();
        match rule {
            AnyRule::Invalid(r) => assert_eq!(r.error.name, "SyntaxError"),
            other => panic!("expected InvalidRule, got {other:?}"),
        }
    }

    #[test]
    fn generate_round_trips_network_rule() {
        let text = "||example.com^$script";
        let rule = parse(text, base(), false).unwrap();
        assert_eq!(generate(&rule), text);
    }
}
