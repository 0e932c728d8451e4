//! uBO HTML-filtering (`##^`) to AdGuard HTML-filtering (`$$`) converter.

use crate::ast::cosmetic::{CosmeticRule, CosmeticRuleHeader, CosmeticSeparator, HtmlFilteringBody};
use crate::css::{
    AttrMatcher, AttributeSelector, ComplexSelector, CompoundSelector, SelectorComponent,
    SelectorList,
};
use crate::error::{AgtreeError, Result};

const DEFAULT_MAX_LENGTH: u32 = 262_144;

struct Bounds {
    min_length: Option<u32>,
    max_length: Option<u32>,
}

fn parse_bound(raw: &str) -> Result<u32> {
    let t = raw.trim().trim_matches('"').trim_matches('\'');
    t.parse::<u32>()
        .map_err(|_| AgtreeError::syntax(format!("'{t}' is not a valid length bound")))
}

fn attr_value(attr: &AttributeSelector) -> Result<String> {
    match &attr.matcher {
        Some((AttrMatcher::Equals, v)) => Ok(v.clone()),
        Some(_) => Err(AgtreeError::syntax(format!(
            "'[{}]' only supports the '=' matcher for HTML-filter conversion",
            attr.name
        ))),
        None => Err(AgtreeError::syntax(format!(
            "'[{}]' requires a value",
            attr.name
        ))),
    }
}

fn unquote_pseudo_arg(raw: &str) -> Result<String> {
    let t = raw.trim();
    if t.starts_with('/') {
        return Err(AgtreeError::syntax(
            "regular-expression arguments are not supported in the ADG HTML-filter dialect",
        ));
    }
    if (t.starts_with('"') && t.ends_with('"') && t.len() >= 2)
        || (t.starts_with('\'') && t.ends_with('\'') && t.len() >= 2)
    {
        Ok(t[1..t.len() - 1].to_string())
    } else {
        Ok(t.to_string())
    }
}

fn convert_compound(compound: &CompoundSelector) -> Result<(Vec<SelectorComponent>, Bounds)> {
    let mut out = Vec::new();
    let mut min_length = None;
    let mut max_length = None;
    for (i, comp) in compound.components.iter().enumerate() {
        match comp {
            SelectorComponent::Type(_) => {
                if i != 0 {
                    return Err(AgtreeError::syntax(
                        "a tag-name selector is only allowed as the first component",
                    ));
                }
                out.push(comp.clone());
            }
            SelectorComponent::Universal | SelectorComponent::Id(_) | SelectorComponent::Class(_) => {
                out.push(comp.clone());
            }
            SelectorComponent::Attribute(attr) => match attr.name.as_str() {
                "min-length" => min_length = Some(parse_bound(&attr_value(attr)?)?),
                "max-length" => max_length = Some(parse_bound(&attr_value(attr)?)?),
                "tag-content" | "wildcard" => out.push(comp.clone()),
                _ => out.push(comp.clone()),
            },
            SelectorComponent::PseudoClass(p) => match p.name.as_str() {
                "has-text" | "contains" => {
                    let arg = p
                        .argument
                        .clone()
                        .ok_or_else(|| AgtreeError::syntax(format!(":{}() requires an argument", p.name)))?;
                    let text = unquote_pseudo_arg(&arg)?;
                    out.push(SelectorComponent::Attribute(AttributeSelector {
                        name: "tag-content".to_string(),
                        matcher: Some((AttrMatcher::Equals, text)),
                    }));
                }
                "min-text-length" => {
                    let arg = p
                        .argument
                        .clone()
                        .ok_or_else(|| AgtreeError::syntax(":min-text-length() requires an argument"))?;
                    min_length = Some(parse_bound(&arg)?);
                }
                other => {
                    return Err(AgtreeError::syntax(format!(
                        "pseudo-class ':{other}' has no AdGuard HTML-filter equivalent"
                    )))
                }
            },
            SelectorComponent::PseudoElement(name) => {
                return Err(AgtreeError::syntax(format!(
                    "pseudo-element '::{name}' is not supported in HTML-filter conversion"
                )))
            }
        }
    }
    Ok((
        out,
        Bounds {
            min_length,
            max_length,
        },
    ))
}

fn convert_complex_selector(sel: &ComplexSelector) -> Result<ComplexSelector> {
    if sel.compounds.len() != 1 {
        return Err(AgtreeError::syntax(
            "combinators are not supported in HTML-filter conversion",
        ));
    }
    let (mut components, bounds) = convert_compound(&sel.compounds[0])?;
    if let Some(min) = bounds.min_length {
        components.push(SelectorComponent::Attribute(AttributeSelector {
            name: "min-length".to_string(),
            matcher: Some((AttrMatcher::Equals, min.to_string())),
        }));
    }
    let max = bounds.max_length.unwrap_or(DEFAULT_MAX_LENGTH);
    components.push(SelectorComponent::Attribute(AttributeSelector {
        name: "max-length".to_string(),
        matcher: Some((AttrMatcher::Equals, max.to_string())),
    }));
    Ok(ComplexSelector {
        compounds: vec![CompoundSelector { components }],
        combinators: vec![],
    })
}

/// Convert a uBO `##^`/`#@#^` HTML-filtering rule into its AdGuard
/// `$$`/`$@$` equivalent. The rule must already carry a `SelectorList`
/// body (a uBO function-node body such as `responseheader(...)` has no
/// ADG equivalent and is rejected).
pub fn convert_to_adg(rule: &CosmeticRule) -> Result<CosmeticRule> {
    let list = match &rule.body {
        crate::ast::cosmetic::CosmeticBody::HtmlFiltering(HtmlFilteringBody::SelectorList(l)) => l,
        crate::ast::cosmetic::CosmeticBody::HtmlFiltering(HtmlFilteringBody::Function(_)) => {
            return Err(AgtreeError::syntax(
                "a function-node HTML-filter body has no AdGuard equivalent",
            ))
        }
        _ => return Err(AgtreeError::syntax("not an HTML-filtering rule")),
    };
    let selectors = list
        .selectors
        .iter()
        .map(convert_complex_selector)
        .collect::<Result<Vec<_>>>()?;
    let separator = if rule.header.exception {
        CosmeticSeparator::AdgHtmlException
    } else {
        CosmeticSeparator::AdgHtml
    };
    Ok(CosmeticRule {
        header: CosmeticRuleHeader {
            separator,
            ..rule.header.clone()
        },
        body: crate::ast::cosmetic::CosmeticBody::HtmlFiltering(HtmlFilteringBody::SelectorList(
            SelectorList { selectors },
        )),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::cosmetic;

    #[test]
    fn converts_has_text_and_adds_default_max_length() {
        let rule = cosmetic::parse(r#"example.org##^script:has-text(foo)"#).unwrap();
        let converted = convert_to_adg(&rule).unwrap();
        let out = cosmetic::generate(&converted);
        assert!(out.contains("$$"));
        assert!(out.contains(r#"tag-content="foo""#));
        assert!(out.contains(r#"max-length="262144""#));
    }

    #[test]
    fn converts_min_text_length_to_min_length_bound() {
        let rule = cosmetic::parse(r#"example.org##^script:min-text-length(100)"#).unwrap();
        let converted = convert_to_adg(&rule).unwrap();
        let out = cosmetic::generate(&converted);
        assert!(out.contains(r#"min-length="100""#));
    }

    #[test]
    fn rejects_regex_argument() {
        let rule = cosmetic::parse(r#"example.org##^script:has-text(/foo/)"#).unwrap();
        assert!(convert_to_adg(&rule).is_err());
    }

    #[test]
    fn rejects_unsupported_pseudo_class() {
        let rule = cosmetic::parse(r#"example.org##^script:other(x)"#).unwrap();
        assert!(convert_to_adg(&rule).is_err());
    }

    #[test]
    fn preserves_exception_flag_with_correct_separator() {
        let rule = cosmetic::parse(r#"example.org#@#^script:has-text(foo)"#).unwrap();
        let converted = convert_to_adg(&rule).unwrap();
        assert_eq!(converted.header.separator, CosmeticSeparator::AdgHtmlException);
    }
}
