//! CSS-injection cosmetic body: the uBO `:style()`/`:remove()` surface
//! syntax and the AdGuard `{ declarations }` surface syntax.

use crate::ast::cosmetic::CssInjectionBody;
use crate::css::{
    self, CompoundSelector, ComplexSelector, PseudoClass, SelectorComponent, SelectorList,
    StylesheetItem,
};
use crate::error::{AgtreeError, Result};
use regex::Regex;
use std::sync::OnceLock;

const SPECIAL_NAMES: &[&str] = &["matches-media", "style", "remove"];

fn ubo_probe() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r":(?:matches-media|style|remove)\s*\(").unwrap()
    })
}

fn is_special(p: &PseudoClass) -> bool {
    SPECIAL_NAMES.contains(&p.name.as_str())
}

fn check_no_special(compound: &CompoundSelector) -> Result<()> {
    for c in &compound.components {
        if let SelectorComponent::PseudoClass(p) = c {
            if is_special(p) {
                return Err(AgtreeError::syntax(format!(
                    "':{}' is only allowed on the last selector of a CSS-injection rule",
                    p.name
                )));
            }
        }
    }
    Ok(())
}

struct Partition {
    regular: Vec<SelectorComponent>,
    matches_media: Option<String>,
    style: Option<String>,
    remove: bool,
}

fn partition_last_compound(compound: &CompoundSelector) -> Result<Partition> {
    let mut regular = Vec::new();
    let mut matches_media = None;
    let mut style = None;
    let mut remove = false;
    let mut seen_special = false;
    for c in &compound.components {
        match c {
            SelectorComponent::PseudoClass(p) if is_special(p) => {
                seen_special = true;
                match p.name.as_str() {
                    "matches-media" => {
                        if matches_media.is_some() {
                            return Err(AgtreeError::syntax("duplicate ':matches-media()'"));
                        }
                        let arg = p
                            .argument
                            .clone()
                            .ok_or_else(|| AgtreeError::syntax(":matches-media() requires an argument"))?;
                        matches_media = Some(arg);
                    }
                    "style" => {
                        if style.is_some() {
                            return Err(AgtreeError::syntax("duplicate ':style()'"));
                        }
                        if remove {
                            return Err(AgtreeError::syntax(":style() and :remove() are mutually exclusive"));
                        }
                        let arg = p
                            .argument
                            .clone()
                            .ok_or_else(|| AgtreeError::syntax(":style() requires a declaration list"))?;
                        style = Some(arg);
                    }
                    "remove" => {
                        if style.is_some() {
                            return Err(AgtreeError::syntax(":style() and :remove() are mutually exclusive"));
                        }
                        remove = true;
                    }
                    _ => unreachable!(),
                }
            }
            other => {
                if seen_special {
                    return Err(AgtreeError::syntax(
                        "regular selector elements are not permitted after a special pseudo-class",
                    ));
                }
                regular.push(other.clone());
            }
        }
    }
    Ok(Partition {
        regular,
        matches_media,
        style,
        remove,
    })
}

pub fn try_parse_ubo(body: &str) -> Result<CssInjectionBody> {
    if !ubo_probe().is_match(body) {
        return Err(AgtreeError::syntax("not uBO-style CSS injection"));
    }
    let list = css::parse_selector_list(body, true)
        .map_err(|e| AgtreeError::css(e.message().to_string(), e.loc()))?;
    if list.selectors.is_empty() {
        return Err(AgtreeError::syntax("empty selector list"));
    }
    let (head, last) = list.selectors.split_at(list.selectors.len() - 1);
    for sel in head {
        for compound in &sel.compounds {
            check_no_special(compound)?;
        }
    }
    let last = &last[0];
    let (earlier_compounds, last_compound) = last
        .compounds
        .split_at(last.compounds.len().saturating_sub(1));
    for compound in earlier_compounds {
        check_no_special(compound)?;
    }
    let last_compound = last_compound
        .first()
        .ok_or_else(|| AgtreeError::syntax("selector expected"))?;
    let partition = partition_last_compound(last_compound)?;

    if partition.style.is_none() && !partition.remove {
        return Err(AgtreeError::syntax(
            "CSS injection requires either a declaration list or :remove()",
        ));
    }

    let media_query_list = partition
        .matches_media
        .map(|raw| css::parse_media_query_list(&raw))
        .transpose()?;
    let declaration_list = partition
        .style
        .map(|raw| css::parse_declaration_list(&raw))
        .transpose()?;

    let mut new_compounds: Vec<CompoundSelector> = earlier_compounds.to_vec();
    new_compounds.push(CompoundSelector {
        components: partition.regular,
    });
    let mut new_selectors: Vec<ComplexSelector> = head.to_vec();
    new_selectors.push(ComplexSelector {
        compounds: new_compounds,
        combinators: last.combinators.clone(),
    });

    Ok(CssInjectionBody {
        media_query_list,
        selector_list: SelectorList {
            selectors: new_selectors,
        },
        declaration_list,
        remove: partition.remove,
        ubo_syntax: true,
    })
}

pub fn try_parse_adg(body: &str) -> Result<CssInjectionBody> {
    let sheet = css::parse_stylesheet(body, true)
        .map_err(|e| AgtreeError::css(e.message().to_string(), e.loc()))?;
    if sheet.items.len() != 1 {
        return Err(AgtreeError::syntax(
            "AdGuard CSS injection must contain exactly one rule or @media block",
        ));
    }
    let (media_query_list, rule) = match &sheet.items[0] {
        StylesheetItem::Rule(rule) => (None, rule.clone()),
        StylesheetItem::Media(media) => (Some(media.query.clone()), media.rule.clone()),
    };

    let remove_decl = rule
        .block
        .declarations
        .iter()
        .find(|d| d.property == "remove");
    let (remove, declaration_list) = match remove_decl {
        Some(_) if rule.block.declarations.len() == 1 => (true, None),
        Some(_) => {
            return Err(AgtreeError::syntax(
                "a 'remove' declaration may not coexist with other declarations",
            ))
        }
        None => (false, Some(rule.block.clone())),
    };

    Ok(CssInjectionBody {
        media_query_list,
        selector_list: rule.prelude,
        declaration_list,
        remove,
        ubo_syntax: false,
    })
}

pub fn generate(body: &CssInjectionBody) -> String {
    if body.ubo_syntax {
        let mut out = css::generate_selector_list(&body.selector_list);
        if let Some(mql) = &body.media_query_list {
            out.push_str(&format!(":matches-media({})", css::generate_media_query_list(mql)));
        }
        if body.remove {
            out.push_str(":remove()");
        } else if let Some(decls) = &body.declaration_list {
            out.push_str(&format!(":style({})", css::generate_declaration_list(decls)));
        }
        out
    } else {
        let inner = if body.remove {
            "remove: true;".to_string()
        } else {
            css::generate_declaration_list(body.declaration_list.as_ref().unwrap())
        };
        let rule = format!(
            "{} {{ {} }}",
            css::generate_selector_list(&body.selector_list),
            inner
        );
        match &body.media_query_list {
            Some(mql) => format!("@media {} {{ {} }}", css::generate_media_query_list(mql), rule),
            None => rule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ubo_style_declaration() {
        let body = try_parse_ubo("body:style(padding-top: 0 !important;)").unwrap();
        assert!(!body.remove);
        assert!(body.declaration_list.is_some());
    }

    #[test]
    fn parses_ubo_remove() {
        let body = try_parse_ubo(".ads:remove()").unwrap();
        assert!(body.remove);
        assert!(body.declaration_list.is_none());
    }

    #[test]
    fn rejects_style_and_remove_together() {
        assert!(try_parse_ubo(".ads:style(color: red;):remove()").is_err());
    }

    #[test]
    fn parses_adg_style_declaration() {
        let body = try_parse_adg("body { padding-top: 0 !important; }").unwrap();
        assert!(!body.remove);
        assert_eq!(body.declaration_list.as_ref().unwrap().declarations.len(), 1);
    }

    #[test]
    fn parses_adg_remove() {
        let body = try_parse_adg(".ads { remove: true; }").unwrap();
        assert!(body.remove);
    }

    #[test]
    fn parses_adg_media_query() {
        let body =
            try_parse_adg("@media (min-width: 100px) { .ads { remove: true; } }").unwrap();
        assert!(body.media_query_list.is_some());
    }

    #[test]
    fn rejects_plain_selector_as_ubo_css_injection() {
        assert!(try_parse_ubo(".banner").is_err());
    }
}
