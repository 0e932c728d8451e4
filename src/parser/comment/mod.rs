//! Comment-family dispatcher.

pub mod agent;
pub mod config;
pub mod hint;
pub mod metadata;
pub mod preprocessor;

use crate::ast::comment::{AnyCommentRule, CommentRule};
use crate::ast::common::Value;
use crate::error::Result;

/// `trim(s)[0] == '!'`.
pub fn is_regular_comment(s: &str) -> bool {
    s.trim_start().starts_with('!')
}

/// Whether `s` should be treated as belonging to the comment family at
/// all (used by the top-level rule dispatcher to decide dispatch order
/// relative to cosmetic rules, which also start with `#`).
///
/// A leading `#` is ambiguous with a cosmetic rule's separator. The fast
/// check is the text that follows the detected cosmetic separator: a
/// well-formed cosmetic rule has a non-empty body there, so an empty or
/// whitespace-only remainder (or no separator at all) means this is a
/// comment, not a cosmetic rule.
pub fn is_comment_rule(s: &str) -> bool {
    let trimmed = s.trim();
    if is_regular_comment(trimmed) {
        return true;
    }
    if trimmed.starts_with('#') {
        match crate::parser::cosmetic::find_separator(trimmed) {
            Some((_, _, end)) => {
                if trimmed[end..].trim().is_empty() {
                    return true;
                }
            }
            None => return true,
        }
    }
    agent::looks_like_agent(trimmed)
}

/// Try each comment sub-parser in priority order; fall back to a plain
/// `CommentRule` on total fallthrough.
pub fn parse(text: &str) -> Result<AnyCommentRule> {
    let trimmed = text.trim();
    let marker = if trimmed.starts_with('!') { "!" } else { "#" };
    let tail = trimmed[marker.len()..].to_string();

    if let Ok(rule) = agent::parse(trimmed) {
        return Ok(AnyCommentRule::Agent(rule));
    }
    if marker == "!" && trimmed.starts_with("!+") {
        if let Ok(rule) = hint::parse(trimmed) {
            return Ok(AnyCommentRule::Hint(rule));
        }
    }
    if marker == "!" && trimmed.starts_with("!#") {
        if let Ok(rule) = preprocessor::parse(trimmed) {
            return Ok(AnyCommentRule::PreProcessor(rule));
        }
    }
    if let Ok(rule) = metadata::parse(marker, &tail) {
        return Ok(AnyCommentRule::Metadata(rule));
    }
    if let Ok(rule) = config::parse(marker, &tail) {
        return Ok(AnyCommentRule::Config(rule));
    }
    Ok(AnyCommentRule::Comment(CommentRule {
        marker: Value::new(marker.to_string()),
        text: Value::new(tail.trim_start().to_string()),
    }))
}

pub fn generate(rule: &AnyCommentRule) -> String {
    match rule {
        AnyCommentRule::Comment(r) => format!("{}{}", r.marker.value, r.text.value),
        AnyCommentRule::Metadata(r) => metadata::generate(r),
        AnyCommentRule::Config(r) => config::generate(r),
        AnyCommentRule::Hint(r) => hint::generate(r),
        AnyCommentRule::PreProcessor(r) => preprocessor::generate(r),
        AnyCommentRule::Agent(r) => agent::generate(r),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_metadata_over_plain_comment() {
        let rule = parse("! Title: My List").unwrap();
        assert!(matches!(rule, AnyCommentRule::Metadata(_)));
    }

    #[test]
    fn falls_through_to_plain_comment() {
        let rule = parse("! just a remark").unwrap();
        assert!(matches!(rule, AnyCommentRule::Comment(_)));
    }

    #[test]
    fn dispatches_hash_comment_without_separator() {
        assert!(is_comment_rule("# just text"));
    }

    #[test]
    fn does_not_treat_cosmetic_rule_as_comment() {
        assert!(!is_comment_rule("example.org##.banner"));
    }
}
