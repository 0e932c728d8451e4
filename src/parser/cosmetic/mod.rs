//! Cosmetic-rule dispatcher: separator detection, pattern/body split,
//! and dispatch to the correct body parser.

pub mod css_injection;
pub mod element_hiding;
pub mod html_filtering;
pub mod scriptlet_injection;

use crate::ast::common::{DomainList, DomainListSeparator, ModifierList, Value};
use crate::ast::cosmetic::{
    CosmeticBody, CosmeticRule, CosmeticRuleHeader, CosmeticSeparator, JsInjectionBody,
};
use crate::ast::rule::Syntax;
use crate::error::{AgtreeError, Result};
use crate::parser::{domain_list, modifier};

/// Separators in detection-priority order, longest/most-specific first
/// within each marker family so e.g. `##+` is found before `##`.
const SEPARATORS: &[(&str, CosmeticSeparator)] = &[
    ("#@#+", CosmeticSeparator::UboScriptletException),
    ("##+", CosmeticSeparator::UboScriptlet),
    ("#@#^", CosmeticSeparator::UboHtmlException),
    ("##^", CosmeticSeparator::UboHtml),
    ("#@?#", CosmeticSeparator::ExtCssLegacyException),
    ("#?#", CosmeticSeparator::ExtCssLegacy),
    ("#@#", CosmeticSeparator::ElementHidingException),
    ("##", CosmeticSeparator::ElementHiding),
    ("#@$?#", CosmeticSeparator::AdgCssExtCssException),
    ("#$?#", CosmeticSeparator::AdgCssExtCss),
    ("#@$#", CosmeticSeparator::AdgCssException),
    ("#$#", CosmeticSeparator::AdgCss),
    ("#@%#", CosmeticSeparator::AdgJsOrScriptletExc),
    ("#%#", CosmeticSeparator::AdgJsOrScriptlet),
    ("$@$", CosmeticSeparator::AdgHtmlException),
    ("$$", CosmeticSeparator::AdgHtml),
];

/// Find the first cosmetic separator in `text` by a single left-to-right
/// scan: at each position, try every separator literal (in priority
/// order) for a match. Returns `(separator, start, end)` byte offsets.
pub fn find_separator(text: &str) -> Option<(CosmeticSeparator, usize, usize)> {
    let bytes = text.as_bytes();
    for i in 0..bytes.len() {
        for (lit, sep) in SEPARATORS {
            let lit_bytes = lit.as_bytes();
            if bytes[i..].starts_with(lit_bytes) {
                return Some((*sep, i, i + lit_bytes.len()));
            }
        }
    }
    None
}

pub fn contains_cosmetic_separator(text: &str) -> bool {
    find_separator(text).is_some()
}

struct SplitPattern {
    modifiers: Option<ModifierList>,
    domains: DomainList,
}

fn parse_pattern(pattern: &str) -> Result<(SplitPattern, bool)> {
    let trimmed = pattern.trim();
    if let Some(rest) = trimmed.strip_prefix('[') {
        if !rest.starts_with('$') {
            return Err(AgtreeError::syntax("expected '$' after '[' in cosmetic rule pattern"));
        }
        let close = rest
            .find(']')
            .ok_or_else(|| AgtreeError::syntax("unterminated modifier list in cosmetic pattern"))?;
        let mods_text = &rest[1..close];
        let modifiers = modifier::parse_list(mods_text)?;
        let domain_text = rest[close + 1..].trim();
        let domains = if domain_text.is_empty() {
            DomainList {
                separator: DomainListSeparator::Comma,
                children: vec![],
            }
        } else {
            domain_list::parse(domain_text, DomainListSeparator::Comma)?
        };
        Ok((
            SplitPattern {
                modifiers: Some(modifiers),
                domains,
            },
            true,
        ))
    } else {
        let domains = if trimmed.is_empty() {
            DomainList {
                separator: DomainListSeparator::Comma,
                children: vec![],
            }
        } else {
            domain_list::parse(trimmed, DomainListSeparator::Comma)?
        };
        Ok((
            SplitPattern {
                modifiers: None,
                domains,
            },
            false,
        ))
    }
}

fn is_ubo_only(sep: CosmeticSeparator) -> bool {
    use CosmeticSeparator::*;
    matches!(
        sep,
        UboScriptlet | UboScriptletException | UboHtml | UboHtmlException
    )
}

pub fn parse(text: &str) -> Result<CosmeticRule> {
    let (sep, start, end) = find_separator(text)
        .ok_or_else(|| AgtreeError::syntax("not a cosmetic rule: no separator found"))?;
    let pattern_text = &text[..start];
    let body_text = text[end..].trim();

    let (split, has_adg_modifiers) = parse_pattern(pattern_text)?;
    if has_adg_modifiers && is_ubo_only(sep) {
        return Err(AgtreeError::syntax(
            "AdGuard modifier-prefixed pattern is not allowed with this separator",
        ));
    }

    let exception = sep.is_exception();
    let mut syntax = if has_adg_modifiers {
        Syntax::AdGuard
    } else {
        Syntax::Common
    };

    let body = match sep {
        CosmeticSeparator::ElementHiding
        | CosmeticSeparator::ElementHidingException
        | CosmeticSeparator::ExtCssLegacy
        | CosmeticSeparator::ExtCssLegacyException => {
            match css_injection::try_parse_ubo(body_text) {
                Ok(b) => {
                    syntax = Syntax::UblockOrigin;
                    CosmeticBody::CssInjection(b)
                }
                Err(_) => CosmeticBody::ElementHiding(element_hiding::parse(body_text)?),
            }
        }
        CosmeticSeparator::AdgCss | CosmeticSeparator::AdgCssException => {
            match css_injection::try_parse_adg(body_text) {
                Ok(b) => {
                    syntax = Syntax::AdGuard;
                    CosmeticBody::CssInjection(b)
                }
                Err(_) => {
                    syntax = Syntax::AdblockPlus;
                    CosmeticBody::ScriptletInjection(scriptlet_injection::parse_abp(body_text)?)
                }
            }
        }
        CosmeticSeparator::AdgCssExtCss | CosmeticSeparator::AdgCssExtCssException => {
            syntax = Syntax::AdGuard;
            CosmeticBody::CssInjection(css_injection::try_parse_adg(body_text)?)
        }
        CosmeticSeparator::UboScriptlet | CosmeticSeparator::UboScriptletException => {
            syntax = Syntax::UblockOrigin;
            CosmeticBody::ScriptletInjection(scriptlet_injection::parse_call(body_text)?)
        }
        CosmeticSeparator::AdgJsOrScriptlet | CosmeticSeparator::AdgJsOrScriptletExc => {
            syntax = Syntax::AdGuard;
            if body_text.trim_start().starts_with("//scriptlet") {
                CosmeticBody::ScriptletInjection(scriptlet_injection::parse_call(body_text)?)
            } else {
                if body_text.is_empty() {
                    return Err(AgtreeError::syntax("JS injection body must be non-empty"));
                }
                CosmeticBody::JsInjection(JsInjectionBody {
                    code: Value::new(body_text.to_string()),
                })
            }
        }
        CosmeticSeparator::UboHtml | CosmeticSeparator::UboHtmlException => {
            syntax = Syntax::UblockOrigin;
            CosmeticBody::HtmlFiltering(html_filtering::parse(body_text)?)
        }
        CosmeticSeparator::AdgHtml | CosmeticSeparator::AdgHtmlException => {
            syntax = Syntax::AdGuard;
            CosmeticBody::HtmlFiltering(html_filtering::parse_adg_selector_only(body_text)?)
        }
    };

    let header = CosmeticRuleHeader {
        modifiers: split.modifiers,
        domains: split.domains,
        separator: sep,
        exception,
    };
    let _ = syntax;
    Ok(CosmeticRule { header, body })
}

/// The dialect a parsed cosmetic rule should be tagged with. Kept as a
/// free function (rather than folded into `parse`) so the top-level rule
/// dispatcher can retag after the fact without re-deriving the logic.
pub fn infer_syntax(rule: &CosmeticRule) -> Syntax {
    use crate::ast::cosmetic::CosmeticBody::*;
    if rule.header.modifiers.is_some() {
        return Syntax::AdGuard;
    }
    match &rule.body {
        ElementHiding(_) => Syntax::Common,
        CssInjection(b) if b.ubo_syntax => Syntax::UblockOrigin,
        CssInjection(_) => Syntax::AdGuard,
        ScriptletInjection(b) if scriptlet_injection::is_abp_style(b) => Syntax::AdblockPlus,
        ScriptletInjection(_) => {
            if matches!(
                rule.header.separator,
                CosmeticSeparator::UboScriptlet | CosmeticSeparator::UboScriptletException
            ) {
                Syntax::UblockOrigin
            } else {
                Syntax::AdGuard
            }
        }
        HtmlFiltering(_) => {
            if matches!(
                rule.header.separator,
                CosmeticSeparator::UboHtml | CosmeticSeparator::UboHtmlException
            ) {
                Syntax::UblockOrigin
            } else {
                Syntax::AdGuard
            }
        }
        JsInjection(_) => Syntax::AdGuard,
    }
}

pub fn generate(rule: &CosmeticRule) -> String {
    let mut out = String::new();
    if let Some(mods) = &rule.header.modifiers {
        out.push('[');
        out.push('$');
        out.push_str(&crate::parser::modifier::generate_list(mods));
        out.push(']');
    }
    out.push_str(&domain_list::generate(&rule.header.domains));
    out.push_str(rule.header.separator.as_str());
    out.push_str(&generate_body(&rule.body));
    out
}

fn generate_body(body: &CosmeticBody) -> String {
    match body {
        CosmeticBody::ElementHiding(b) => element_hiding::generate(b),
        CosmeticBody::CssInjection(b) => css_injection::generate(b),
        CosmeticBody::ScriptletInjection(b) => scriptlet_injection::generate(b),
        CosmeticBody::HtmlFiltering(b) => html_filtering::generate(b),
        CosmeticBody::JsInjection(b) => b.code.value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_element_hiding_separator() {
        let (sep, start, end) = find_separator("example.org##.banner").unwrap();
        assert_eq!(sep, CosmeticSeparator::ElementHiding);
        assert_eq!(&"example.org##.banner"[start..end], "##");
    }

    #[test]
    fn prefers_scriptlet_over_element_hiding_separator() {
        let (sep, ..) = find_separator("example.org##+js(foo)").unwrap();
        assert_eq!(sep, CosmeticSeparator::UboScriptlet);
    }

    #[test]
    fn parses_element_hiding_rule() {
        let rule = parse("example.org##.banner").unwrap();
        assert_eq!(rule.header.domains.children[0].value, "example.org");
        assert!(matches!(rule.body, CosmeticBody::ElementHiding(_)));
    }

    #[test]
    fn parses_adg_modifier_prefixed_pattern() {
        let rule = parse("[$path=/foo]example.com##.banner").unwrap();
        assert!(rule.header.modifiers.is_some());
    }

    #[test]
    fn rejects_adg_modifier_prefix_on_ubo_scriptlet_separator() {
        assert!(parse("[$path=/foo]example.com##+js(foo)").is_err());
    }

    #[test]
    fn generate_round_trips_element_hiding() {
        let rule = parse("example.org,~sub.example.org#@#.banner").unwrap();
        assert_eq!(generate(&rule), "example.org,~sub.example.org#@#.banner");
    }
}
