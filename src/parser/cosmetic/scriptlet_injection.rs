//! Scriptlet-injection cosmetic body: the AdGuard/uBO call syntax and
//! the ABP semicolon-separated snippet syntax.

use crate::ast::common::{Parameter, ParameterList, Value};
use crate::ast::cosmetic::ScriptletInjectionBody;
use crate::error::{AgtreeError, Result};
use crate::parser::parameter_list;
use crate::scanner;

/// `js` is a uBO scriptlet mask, but `json...` is not (avoids colliding
/// with ABP's `json-prune`).
fn starts_with_js_mask(s: &str) -> bool {
    s.starts_with("js") && !s[2..].starts_with("on")
}

fn starts_with_call_mask(s: &str) -> bool {
    s.starts_with("//scriptlet") || starts_with_js_mask(s)
}

/// AdGuard/uBO call syntax: `//scriptlet(args)` or `js(args)`, no
/// trailing characters after the closing paren.
pub fn parse_call(body: &str) -> Result<ScriptletInjectionBody> {
    let trimmed = body.trim();
    if !starts_with_call_mask(trimmed) {
        return Err(AgtreeError::syntax("not a scriptlet call"));
    }
    let open = if trimmed.starts_with("//scriptlet") {
        "//scriptlet".len()
    } else {
        2
    };
    if trimmed.as_bytes().get(open) != Some(&b'(') {
        return Err(AgtreeError::syntax("expected '(' immediately after scriptlet mask"));
    }
    let close = scanner::find_unescaped_non_string_non_regex_char(trimmed, b')', open + 1)
        .ok_or_else(|| AgtreeError::syntax("unterminated scriptlet call"))?;
    if close != trimmed.len() - 1 {
        return Err(AgtreeError::syntax(
            "no characters are allowed after the closing ')' of a scriptlet call",
        ));
    }
    let inner = &trimmed[open + 1..close];
    let params = parameter_list::parse(inner, ',');
    if !params.children.is_empty() && params.children[0].value.value.is_empty() {
        return Err(AgtreeError::syntax("scriptlet call is missing a scriptlet name"));
    }
    Ok(ScriptletInjectionBody {
        calls: vec![params],
        abp_style: false,
    })
}

/// ABP syntax: one or more whitespace-separated invocations joined by
/// unescaped `;`.
pub fn parse_abp(body: &str) -> Result<ScriptletInjectionBody> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(AgtreeError::syntax("at least one scriptlet is required"));
    }
    let mut calls = Vec::new();
    for part in scanner::split_by_unescaped_non_string_non_regex_char(trimmed, b';') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let children = part
            .split_whitespace()
            .map(|w| Parameter {
                value: Value::new(w.to_string()),
            })
            .collect::<Vec<_>>();
        calls.push(ParameterList { children });
    }
    if calls.is_empty() {
        return Err(AgtreeError::syntax("at least one scriptlet is required"));
    }
    Ok(ScriptletInjectionBody {
        calls,
        abp_style: true,
    })
}

pub fn is_abp_style(body: &ScriptletInjectionBody) -> bool {
    body.abp_style
}

pub fn generate(body: &ScriptletInjectionBody) -> String {
    if !body.abp_style {
        format!("//scriptlet({})", parameter_list::generate(&body.calls[0], ','))
    } else {
        body.calls
            .iter()
            .map(|c| {
                c.children
                    .iter()
                    .map(|p| p.value.value.as_str())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scriptlet_call() {
        let body = parse_call("//scriptlet('scriptlet0','arg0')").unwrap();
        assert_eq!(body.calls.len(), 1);
        assert_eq!(body.calls[0].children.len(), 2);
    }

    #[test]
    fn parses_js_mask_but_not_json() {
        assert!(parse_call("js(set, atob, noopFunc)").is_ok());
        assert!(parse_call("json(a)").is_err());
    }

    #[test]
    fn rejects_trailing_chars_after_close_paren() {
        assert!(parse_call("js(a)x").is_err());
    }

    #[test]
    fn parses_abp_multi_call() {
        let body = parse_abp("scriptlet0 arg0; scriptlet1 arg1").unwrap();
        assert_eq!(body.calls.len(), 2);
    }

    #[test]
    fn rejects_empty_abp_body() {
        assert!(parse_abp("").is_err());
    }
}
