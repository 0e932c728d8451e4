//! Modifier and modifier-list parsers.

use crate::ast::common::{Modifier, ModifierList, Value};
use crate::error::{AgtreeError, Result};
use crate::scanner;

/// Parse a single `[~]name[=value]` modifier. The assignment is the
/// first unescaped `=`.
pub fn parse_modifier(text: &str) -> Result<Modifier> {
    let trimmed = text.trim();
    let (exception, rest) = match trimmed.strip_prefix('~') {
        Some(r) => (true, r),
        None => (false, trimmed),
    };
    let eq = scanner::find_next_unescaped(rest, b'=', 0);
    let (name, value) = match eq {
        Some(idx) => {
            let name = rest[..idx].to_string();
            let value = rest[idx + 1..].to_string();
            if value.is_empty() {
                return Err(AgtreeError::syntax("modifier with '=' must have a non-empty value"));
            }
            (name, Some(value))
        }
        None => (rest.to_string(), None),
    };
    if name.is_empty() {
        return Err(AgtreeError::syntax("modifier name must be non-empty"));
    }
    Ok(Modifier {
        modifier: Value::new(name),
        value: value.map(Value::new),
        exception,
    })
}

pub fn generate_modifier(m: &Modifier) -> String {
    let mut out = String::new();
    if m.exception {
        out.push('~');
    }
    out.push_str(&m.modifier.value);
    if let Some(v) = &m.value {
        out.push('=');
        out.push_str(&v.value);
    }
    out
}

/// Parse a comma-separated modifier list. A trailing comma produces one
/// trailing empty-named entry, which is then rejected as an error (an
/// empty modifier name is never valid).
pub fn parse_list(text: &str) -> Result<ModifierList> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(ModifierList { children: vec![] });
    }
    let parts = scanner::split_by_unescaped_non_string_non_regex_char(trimmed, b',');
    let mut children = Vec::with_capacity(parts.len());
    for part in parts {
        children.push(parse_modifier(&part)?);
    }
    Ok(ModifierList { children })
}

pub fn generate_list(list: &ModifierList) -> String {
    list.children
        .iter()
        .map(generate_modifier)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_modifier() {
        let m = parse_modifier("important").unwrap();
        assert_eq!(m.modifier.value, "important");
        assert!(m.value.is_none());
        assert!(!m.exception);
    }

    #[test]
    fn parses_negated_assigned_modifier() {
        let m = parse_modifier("~domain=a.com").unwrap();
        assert!(m.exception);
        assert_eq!(m.modifier.value, "domain");
        assert_eq!(m.value.as_ref().unwrap().value, "a.com");
    }

    #[test]
    fn rejects_empty_value_after_equals() {
        assert!(parse_modifier("domain=").is_err());
    }

    #[test]
    fn parses_list_and_generates_round_trip() {
        let list = parse_list("important,domain=example.com|~example.net").unwrap();
        assert_eq!(list.children.len(), 2);
        assert_eq!(
            generate_list(&list),
            "important,domain=example.com|~example.net"
        );
    }

    #[test]
    fn rejects_trailing_comma() {
        assert!(parse_list("important,").is_err());
    }
}
