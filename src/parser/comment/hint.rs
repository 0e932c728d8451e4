//! AdGuard hint comment: `!+ NAME NAME(params) ...`.

use crate::ast::comment::HintCommentRule;
use crate::ast::common::{Hint, Value};
use crate::error::{AgtreeError, Result};
use crate::parser::parameter_list;
use crate::scanner;

const MARKER: &str = "!+";

fn is_hint_name_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

/// Capture the next whitespace-delimited hint atom starting at `from`,
/// respecting one level of `(...)`. Returns `(slice, next_index)`.
fn capture_atom(bytes: &[u8], from: usize) -> Result<(String, usize)> {
    let mut i = from;
    let start = i;
    while i < bytes.len() && is_hint_name_char(bytes[i]) {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'(' {
        let mut depth = 1;
        let mut j = i + 1;
        while j < bytes.len() && depth > 0 {
            match bytes[j] {
                b'(' => return Err(AgtreeError::syntax("nested parentheses are forbidden in hints")),
                b')' => depth -= 1,
                b'\\' => j += 1,
                _ => {}
            }
            j += 1;
        }
        if depth != 0 {
            return Err(AgtreeError::syntax("unbalanced parenthesis in hint"));
        }
        i = j;
    }
    Ok((
        String::from_utf8_lossy(&bytes[start..i]).to_string(),
        i,
    ))
}

fn parse_one_hint(atom: &str) -> Result<Hint> {
    let bytes = atom.as_bytes();
    let mut i = 0;
    while i < bytes.len() && is_hint_name_char(bytes[i]) {
        i += 1;
    }
    if i == 0 {
        return Err(AgtreeError::syntax("empty hint name"));
    }
    let name = atom[..i].to_string();
    if i == bytes.len() {
        return Ok(Hint {
            name: Value::new(name),
            params: None,
        });
    }
    if bytes[i] != b'(' {
        return Err(AgtreeError::syntax(format!(
            "unexpected character after hint name: '{}'",
            bytes[i] as char
        )));
    }
    if !atom.ends_with(')') {
        return Err(AgtreeError::syntax("unterminated hint parameter list"));
    }
    let inner = &atom[i + 1..atom.len() - 1];
    Ok(Hint {
        name: Value::new(name),
        params: Some(parameter_list::parse(inner, ' ')),
    })
}

pub fn parse(text: &str) -> Result<HintCommentRule> {
    let trimmed = text.trim_end();
    if !trimmed.starts_with(MARKER) {
        return Err(AgtreeError::syntax("not a hint comment"));
    }
    let bytes = trimmed.as_bytes();
    let mut i = MARKER.len();
    let mut children = Vec::new();
    loop {
        i = scanner::skip_ws(trimmed, i);
        if i >= bytes.len() {
            break;
        }
        let (atom, next) = capture_atom(bytes, i)?;
        children.push(parse_one_hint(&atom)?);
        i = next;
    }
    if children.is_empty() {
        return Err(AgtreeError::syntax("empty hint list"));
    }
    Ok(HintCommentRule { children })
}

pub fn generate(rule: &HintCommentRule) -> String {
    let body = rule
        .children
        .iter()
        .map(|h| match &h.params {
            Some(params) => format!("{}({})", h.name.value, parameter_list::generate(params, ' ')),
            None => h.name.value.clone(),
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!("{MARKER} {body}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_parameterized_hints() {
        let rule = parse("!+ NOT_OPTIMIZED PLATFORM(windows)").unwrap();
        assert_eq!(rule.children.len(), 2);
        assert_eq!(rule.children[0].name.value, "NOT_OPTIMIZED");
        assert!(rule.children[0].params.is_none());
        assert_eq!(rule.children[1].name.value, "PLATFORM");
        assert_eq!(
            rule.children[1].params.as_ref().unwrap().children[0].value.value,
            "windows"
        );
    }

    #[test]
    fn rejects_nested_parens() {
        assert!(parse("!+ FOO(bar(baz))").is_err());
    }

    #[test]
    fn rejects_empty_hint_list() {
        assert!(parse("!+   ").is_err());
    }

    #[test]
    fn round_trips() {
        let rule = parse("!+ NOT_OPTIMIZED PLATFORM(windows)").unwrap();
        assert_eq!(generate(&rule), "!+ NOT_OPTIMIZED PLATFORM(windows)");
    }
}
