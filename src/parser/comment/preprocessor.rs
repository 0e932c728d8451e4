//! Preprocessor directive comment: `!#name[(params)]` / `!#name value`.

use crate::ast::comment::{PreProcessorCommentRule, PreProcessorParams};
use crate::ast::common::Value;
use crate::error::{AgtreeError, Result};
use crate::parser::{logical_expression, parameter_list};

const MARKER: &str = "!#";

pub fn parse(text: &str) -> Result<PreProcessorCommentRule> {
    let trimmed = text.trim_end();
    if !trimmed.starts_with(MARKER) {
        return Err(AgtreeError::syntax("not a preprocessor comment"));
    }
    // "!##" is a regular comment, not a preprocessor directive.
    if trimmed.as_bytes().get(MARKER.len()) == Some(&b'#') {
        return Err(AgtreeError::syntax("'!##' is not a preprocessor directive"));
    }
    let after_marker = &trimmed[MARKER.len()..];
    let without_ws = after_marker.trim_start();
    let leading_ws = after_marker.len() - without_ws.len();

    let _ = leading_ws;
    let name_end = without_ws
        .find(|c: char| c.is_whitespace() || c == '(')
        .unwrap_or(without_ws.len());
    let name = without_ws[..name_end].to_string();
    if name.is_empty() {
        return Err(AgtreeError::syntax("empty preprocessor directive name"));
    }
    let rest = &without_ws[name_end..];

    match name.as_str() {
        "if" => {
            let body = extract_required_params(rest, &name)?;
            let expr = logical_expression::parse(&body)?;
            Ok(PreProcessorCommentRule {
                name: Value::new(name),
                params: Some(PreProcessorParams::Expression(expr)),
            })
        }
        "include" => {
            let body = extract_required_raw(rest, &name)?;
            Ok(PreProcessorCommentRule {
                name: Value::new(name),
                params: Some(PreProcessorParams::Raw(Value::new(body))),
            })
        }
        "safari_cb_affinity" => {
            // Whitespace between the name and '(' is rejected outright.
            if rest.starts_with(char::is_whitespace) && rest.trim_start().starts_with('(') {
                return Err(AgtreeError::syntax(
                    "whitespace between 'safari_cb_affinity' and '(' is not allowed",
                ));
            }
            let params = if rest.trim().is_empty() {
                None
            } else {
                if !rest.starts_with('(') {
                    return Err(AgtreeError::syntax("expected '(' after 'safari_cb_affinity'"));
                }
                if !rest.trim_end().ends_with(')') {
                    return Err(AgtreeError::syntax("expected closing ')'"));
                }
                let inner = &rest.trim_end()[1..rest.trim_end().len() - 1];
                Some(PreProcessorParams::List(parameter_list::parse(inner, ',')))
            };
            Ok(PreProcessorCommentRule {
                name: Value::new(name),
                params,
            })
        }
        _ => {
            let trimmed_rest = rest.trim();
            let params = if trimmed_rest.is_empty() {
                None
            } else {
                Some(PreProcessorParams::Raw(Value::new(trimmed_rest.to_string())))
            };
            Ok(PreProcessorCommentRule {
                name: Value::new(name),
                params,
            })
        }
    }
}

fn extract_required_params(rest: &str, directive: &str) -> Result<String> {
    let trimmed = rest.trim();
    if !trimmed.starts_with('(') || !trimmed.ends_with(')') {
        return Err(AgtreeError::syntax(format!(
            "'{directive}' requires a parenthesized expression"
        )));
    }
    let inner = &trimmed[1..trimmed.len() - 1];
    if inner.trim().is_empty() {
        return Err(AgtreeError::syntax(format!("'{directive}' requires parameters")));
    }
    Ok(inner.to_string())
}

fn extract_required_raw(rest: &str, directive: &str) -> Result<String> {
    let trimmed = rest.trim();
    if trimmed.is_empty() {
        return Err(AgtreeError::syntax(format!("'{directive}' requires parameters")));
    }
    Ok(trimmed.to_string())
}

pub fn generate(rule: &PreProcessorCommentRule) -> String {
    match &rule.params {
        None => format!("{MARKER}{}", rule.name.value),
        Some(PreProcessorParams::Expression(expr)) => format!(
            "{MARKER}{}({})",
            rule.name.value,
            logical_expression::generate(expr)
        ),
        Some(PreProcessorParams::Raw(v)) => format!("{MARKER}{} {}", rule.name.value, v.value),
        Some(PreProcessorParams::List(list)) => format!(
            "{MARKER}{}({})",
            rule.name.value,
            parameter_list::generate(list, ',')
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_if_directive_as_logical_expression() {
        let rule = parse("!#if (adguard_ext_android_cb || adguard_ext_safari)").unwrap();
        assert_eq!(rule.name.value, "if");
        assert!(matches!(rule.params, Some(PreProcessorParams::Expression(_))));
    }

    #[test]
    fn rejects_double_hash() {
        assert!(parse("!##comment").is_err());
    }

    #[test]
    fn parses_include_verbatim() {
        let rule = parse("!#include https://example.org/list.txt").unwrap();
        match rule.params {
            Some(PreProcessorParams::Raw(v)) => assert_eq!(v.value, "https://example.org/list.txt"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn unknown_directive_stored_verbatim() {
        let rule = parse("!#unknown_directive some stuff").unwrap();
        assert_eq!(rule.name.value, "unknown_directive");
        match rule.params {
            Some(PreProcessorParams::Raw(v)) => assert_eq!(v.value, "some stuff"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn round_trips_if() {
        let rule = parse("!#if (a || b)").unwrap();
        assert_eq!(generate(&rule), "!#if(a || b)");
    }
}
