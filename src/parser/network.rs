//! Network-rule parser: `[@@]pattern[$modifier,modifier=value,...]`.

use crate::ast::common::Value;
use crate::ast::network::NetworkRule;
use crate::error::{AgtreeError, Result};
use crate::parser::modifier;
use crate::scanner;

const EXCEPTION_PREFIX: &str = "@@";

/// Find the `$` that separates pattern from modifier list: the last
/// unescaped `$` that is not nested inside a `'...'`/`"..."`/`/.../`
/// region (a `$` inside a regex pattern is part of the pattern, not a
/// modifier separator).
fn find_modifier_separator(text: &str) -> Option<usize> {
    let mut found = None;
    let mut from = 0usize;
    while let Some(idx) = scanner::find_unescaped_non_string_non_regex_char(text, b'$', from) {
        found = Some(idx);
        from = idx + 1;
    }
    found
}

pub fn parse(text: &str) -> Result<NetworkRule> {
    let (exception, rest) = match text.strip_prefix(EXCEPTION_PREFIX) {
        Some(r) => (true, r),
        None => (false, text),
    };
    let (pattern_str, modifiers) = match find_modifier_separator(rest) {
        Some(idx) => {
            let pattern = &rest[..idx];
            let mods = modifier::parse_list(&rest[idx + 1..])?;
            (pattern, Some(mods))
        }
        None => (rest, None),
    };
    let modifiers_empty = modifiers.as_ref().map(|m| m.children.is_empty()).unwrap_or(true);
    if pattern_str.is_empty() && modifiers_empty {
        return Err(AgtreeError::syntax(
            "a network rule must have a non-empty pattern or a non-empty modifier list",
        ));
    }
    Ok(NetworkRule {
        exception,
        pattern: Value::new(pattern_str.to_string()),
        modifiers,
    })
}

pub fn generate(rule: &NetworkRule) -> String {
    let mut out = String::new();
    if rule.exception {
        out.push_str(EXCEPTION_PREFIX);
    }
    out.push_str(&rule.pattern.value);
    if let Some(modifiers) = &rule.modifiers {
        if !modifiers.children.is_empty() {
            out.push('$');
            out.push_str(&modifier::generate_list(modifiers));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_pattern() {
        let rule = parse("||example.com^").unwrap();
        assert!(!rule.exception);
        assert_eq!(rule.pattern.value, "||example.com^");
        assert!(rule.modifiers.is_none());
    }

    #[test]
    fn parses_exception_with_modifiers() {
        let rule = parse("@@||example.com^$script,domain=a.com").unwrap();
        assert!(rule.exception);
        assert_eq!(rule.pattern.value, "||example.com^");
        assert_eq!(rule.modifiers.as_ref().unwrap().children.len(), 2);
    }

    #[test]
    fn dollar_followed_by_slash_is_not_a_separator() {
        let rule = parse("/ads$/").unwrap();
        assert_eq!(rule.pattern.value, "/ads$/");
        assert!(rule.modifiers.is_none());
    }

    #[test]
    fn regex_pattern_with_trailing_modifiers() {
        let rule = parse("/ads$/$important").unwrap();
        assert_eq!(rule.pattern.value, "/ads$/");
        assert_eq!(rule.modifiers.as_ref().unwrap().children.len(), 1);
    }

    #[test]
    fn rejects_empty_pattern_and_modifiers() {
        assert!(parse("").is_err());
    }

    #[test]
    fn empty_pattern_with_modifiers_is_allowed() {
        let rule = parse("$domain=a.com").unwrap();
        assert_eq!(rule.pattern.value, "");
        assert_eq!(rule.modifiers.as_ref().unwrap().children.len(), 1);
    }

    #[test]
    fn generates_round_trip() {
        let text = "@@||example.com^$script,domain=a.com";
        let rule = parse(text).unwrap();
        assert_eq!(generate(&rule), text);
    }
}
