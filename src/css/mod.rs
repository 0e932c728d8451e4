//! A minimal CSS-subset parser and generator.
//!
//! This is the "external CSS AST library" spec.md §6/§9 names as a
//! required collaborator. A production build would swap this module for
//! a drop-in selector/stylesheet crate; this implementation is the
//! fallback spec.md §9 explicitly allows: "a minimal recursive-descent
//! parser covering selector lists, declaration lists, media-query
//! lists, at-rule `@media`, and ExtCSS pseudo-classes."
//!
//! It supports exactly the surface this crate's cosmetic-rule bodies
//! need: selector lists, declaration lists, `@media` at-rules, and
//! function nodes (for `responseheader(...)`-style HTML-filtering
//! bodies). It is not a general-purpose CSS parser.

use crate::error::{AgtreeError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum AttrMatcher {
    Equals,
    Includes,
    DashMatch,
    Prefix,
    Suffix,
    Substring,
}

impl AttrMatcher {
    fn as_str(&self) -> &'static str {
        match self {
            AttrMatcher::Equals => "=",
            AttrMatcher::Includes => "~=",
            AttrMatcher::DashMatch => "|=",
            AttrMatcher::Prefix => "^=",
            AttrMatcher::Suffix => "$=",
            AttrMatcher::Substring => "*=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector {
    pub name: String,
    pub matcher: Option<(AttrMatcher, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PseudoClass {
    pub name: String,
    /// Raw, unparsed argument text (if the pseudo-class took `(...)`).
    pub argument: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    Type(String),
    Universal,
    Id(String),
    Class(String),
    Attribute(AttributeSelector),
    PseudoClass(PseudoClass),
    PseudoElement(String),
}

/// A run of components with no combinator between them (`div.class[x]`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundSelector {
    pub components: Vec<SelectorComponent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
    NextSibling,
    SubsequentSibling,
}

impl Combinator {
    fn as_str(self) -> &'static str {
        match self {
            Combinator::Descendant => " ",
            Combinator::Child => " > ",
            Combinator::NextSibling => " + ",
            Combinator::SubsequentSibling => " ~ ",
        }
    }
}

/// A full selector: a sequence of compound selectors joined by
/// combinators, e.g. `div > .a + span`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComplexSelector {
    pub compounds: Vec<CompoundSelector>,
    pub combinators: Vec<Combinator>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub important: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeclarationList {
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaQueryList {
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CssRule {
    pub prelude: SelectorList,
    pub block: DeclarationList,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaAtRule {
    pub query: MediaQueryList,
    pub rule: CssRule,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StylesheetItem {
    Rule(CssRule),
    Media(MediaAtRule),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stylesheet {
    pub items: Vec<StylesheetItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CssFunction {
    pub name: String,
    pub raw_args: String,
}

/// Split `text` at top-level occurrences of `sep`: tracks `()`, `[]`
/// nesting depth and `'...'`/`"..."` quoting so separators inside those
/// regions are not treated as splits.
fn split_top_level(text: &str, sep: char) -> Vec<String> {
    let mut out = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut start = 0usize;
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    for idx in 0..chars.len() {
        let (i, c) = chars[idx];
        let escaped = idx > 0 && chars[idx - 1].1 == '\\';
        if let Some(q) = quote {
            if c == q && !escaped {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '(' | '[' => depth += 1,
            ')' | ']' => depth -= 1,
            _ if c == sep && depth == 0 => {
                out.push(text[start..i].to_string());
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    out.push(text[start..].to_string());
    out
}

fn matching_close(text: &str, open_idx: usize, open: char, close: char) -> Option<usize> {
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let start_pos = chars.iter().position(|&(i, _)| i == open_idx)?;
    for idx in start_pos..chars.len() {
        let (i, c) = chars[idx];
        let escaped = idx > 0 && chars[idx - 1].1 == '\\';
        if let Some(q) = quote {
            if c == q && !escaped {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            _ if c == open => depth += 1,
            _ if c == close => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn parse_compound(text: &str) -> Result<CompoundSelector> {
    let mut components = Vec::new();
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0usize;
    while i < chars.len() {
        match chars[i] {
            '*' => {
                components.push(SelectorComponent::Universal);
                i += 1;
            }
            '#' => {
                let (name, next) = read_ident(&chars, i + 1);
                if name.is_empty() {
                    return Err(AgtreeError::syntax("empty id selector"));
                }
                components.push(SelectorComponent::Id(name));
                i = next;
            }
            '.' => {
                let (name, next) = read_ident(&chars, i + 1);
                if name.is_empty() {
                    return Err(AgtreeError::syntax("empty class selector"));
                }
                components.push(SelectorComponent::Class(name));
                i = next;
            }
            '[' => {
                let s: String = chars[i..].iter().collect();
                let close = matching_close(&s, 0, '[', ']')
                    .ok_or_else(|| AgtreeError::syntax("unterminated attribute selector"))?;
                let inner = &s[1..close];
                components.push(SelectorComponent::Attribute(parse_attribute(inner)?));
                i += close + 1;
            }
            ':' => {
                let mut j = i + 1;
                let is_pseudo_element = j < chars.len() && chars[j] == ':';
                if is_pseudo_element {
                    j += 1;
                }
                let (name, next) = read_ident(&chars, j);
                if name.is_empty() {
                    return Err(AgtreeError::syntax("empty pseudo-class name"));
                }
                if next < chars.len() && chars[next] == '(' {
                    let s: String = chars[next..].iter().collect();
                    let close = matching_close(&s, 0, '(', ')')
                        .ok_or_else(|| AgtreeError::syntax("unterminated pseudo-class argument"))?;
                    let arg = s[1..close].to_string();
                    if is_pseudo_element {
                        components.push(SelectorComponent::PseudoElement(name));
                    } else {
                        components.push(SelectorComponent::PseudoClass(PseudoClass {
                            name,
                            argument: Some(arg),
                        }));
                    }
                    i = next + close + 1;
                } else {
                    if is_pseudo_element {
                        components.push(SelectorComponent::PseudoElement(name));
                    } else {
                        components.push(SelectorComponent::PseudoClass(PseudoClass {
                            name,
                            argument: None,
                        }));
                    }
                    i = next;
                }
            }
            c if c.is_alphabetic() || c == '_' || c == '-' => {
                let (name, next) = read_ident(&chars, i);
                components.push(SelectorComponent::Type(name));
                i = next;
            }
            _ => {
                return Err(AgtreeError::syntax(format!(
                    "unexpected character in selector: '{}'",
                    chars[i]
                )))
            }
        }
    }
    if components.is_empty() {
        return Err(AgtreeError::syntax("selector expected"));
    }
    Ok(CompoundSelector { components })
}

fn read_ident(chars: &[char], from: usize) -> (String, usize) {
    let mut i = from;
    while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_' || chars[i] == '-') {
        i += 1;
    }
    (chars[from..i].iter().collect(), i)
}

fn parse_attribute(inner: &str) -> Result<AttributeSelector> {
    let matchers = ["~=", "|=", "^=", "$=", "*=", "="];
    for m in matchers {
        if let Some(pos) = inner.find(m) {
            let name = inner[..pos].trim().to_string();
            let mut value = inner[pos + m.len()..].trim().to_string();
            if (value.starts_with('"') && value.ends_with('"') && value.len() >= 2)
                || (value.starts_with('\'') && value.ends_with('\'') && value.len() >= 2)
            {
                value = value[1..value.len() - 1].to_string();
            }
            let matcher = match m {
                "~=" => AttrMatcher::Includes,
                "|=" => AttrMatcher::DashMatch,
                "^=" => AttrMatcher::Prefix,
                "$=" => AttrMatcher::Suffix,
                "*=" => AttrMatcher::Substring,
                _ => AttrMatcher::Equals,
            };
            if name.is_empty() {
                return Err(AgtreeError::syntax("empty attribute name"));
            }
            return Ok(AttributeSelector {
                name,
                matcher: Some((matcher, value)),
            });
        }
    }
    let name = inner.trim().to_string();
    if name.is_empty() {
        return Err(AgtreeError::syntax("empty attribute selector"));
    }
    Ok(AttributeSelector {
        name,
        matcher: None,
    })
}

fn parse_complex_selector(text: &str) -> Result<ComplexSelector> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AgtreeError::syntax("selector expected"));
    }
    let mut compounds = Vec::new();
    let mut combinators = Vec::new();
    let mut cur = String::new();
    let chars: Vec<char> = trimmed.chars().collect();
    let mut i = 0usize;
    let mut depth = 0i32;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '(' | '[' => {
                depth += 1;
                cur.push(c);
                i += 1;
            }
            ')' | ']' => {
                depth -= 1;
                cur.push(c);
                i += 1;
            }
            '>' | '+' | '~' if depth == 0 => {
                if !cur.trim().is_empty() {
                    compounds.push(parse_compound(cur.trim())?);
                }
                cur.clear();
                combinators.push(match c {
                    '>' => Combinator::Child,
                    '+' => Combinator::NextSibling,
                    _ => Combinator::SubsequentSibling,
                });
                i += 1;
            }
            c if c.is_whitespace() && depth == 0 => {
                let mut j = i;
                while j < chars.len() && chars[j].is_whitespace() {
                    j += 1;
                }
                let next_nonspace = chars.get(j).copied();
                if matches!(next_nonspace, Some('>') | Some('+') | Some('~')) {
                    i = j;
                    continue;
                }
                if !cur.trim().is_empty() {
                    compounds.push(parse_compound(cur.trim())?);
                    cur.clear();
                    combinators.push(Combinator::Descendant);
                }
                i = j;
            }
            _ => {
                cur.push(c);
                i += 1;
            }
        }
    }
    if !cur.trim().is_empty() {
        compounds.push(parse_compound(cur.trim())?);
    }
    if compounds.is_empty() {
        return Err(AgtreeError::syntax("selector expected"));
    }
    Ok(ComplexSelector {
        compounds,
        combinators,
    })
}

/// Parse a comma-separated selector list. `tolerant` is accepted for
/// interface symmetry with the embeddable CSS library this module
/// stands in for; this implementation always reports syntax errors
/// (there is no recovery mode to fall back to).
pub fn parse_selector_list(text: &str, _tolerant: bool) -> Result<SelectorList> {
    let parts = split_top_level(text, ',');
    let mut selectors = Vec::new();
    for part in parts {
        selectors.push(parse_complex_selector(&part)?);
    }
    Ok(SelectorList { selectors })
}

pub fn parse_declaration_list(text: &str) -> Result<DeclarationList> {
    let mut declarations = Vec::new();
    for part in split_top_level(text, ';') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let eq = part
            .find(':')
            .ok_or_else(|| AgtreeError::syntax(format!("invalid declaration: '{part}'")))?;
        let property = part[..eq].trim().to_string();
        let mut value = part[eq + 1..].trim().to_string();
        let important = if value.ends_with("!important") {
            value = value[..value.len() - "!important".len()].trim().to_string();
            true
        } else {
            false
        };
        if property.is_empty() {
            return Err(AgtreeError::syntax("empty declaration property"));
        }
        declarations.push(Declaration {
            property,
            value,
            important,
        });
    }
    Ok(DeclarationList { declarations })
}

pub fn parse_media_query_list(text: &str) -> Result<MediaQueryList> {
    let raw = text.trim().to_string();
    if raw.is_empty() {
        return Err(AgtreeError::syntax("media query list expected"));
    }
    Ok(MediaQueryList { raw })
}

/// Parse `text` in "value" context, expecting a single top-level
/// function node (e.g. `responseheader(name)`).
pub fn parse_value_function(text: &str) -> Result<CssFunction> {
    let t = text.trim();
    let open = t
        .find('(')
        .ok_or_else(|| AgtreeError::syntax("function expected"))?;
    if !t.ends_with(')') {
        return Err(AgtreeError::syntax("unterminated function"));
    }
    let name = t[..open].trim().to_string();
    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') {
        return Err(AgtreeError::syntax("invalid function name"));
    }
    let raw_args = t[open + 1..t.len() - 1].to_string();
    Ok(CssFunction { name, raw_args })
}

fn parse_rule(text: &str) -> Result<CssRule> {
    let brace = text
        .find('{')
        .ok_or_else(|| AgtreeError::syntax("expected '{'"))?;
    if !text.trim_end().ends_with('}') {
        return Err(AgtreeError::syntax("expected '}'"));
    }
    let prelude = parse_selector_list(&text[..brace], true)?;
    let end = text.trim_end().len() - 1;
    let block = parse_declaration_list(&text[brace + 1..end])?;
    Ok(CssRule { prelude, block })
}

/// Parse a full stylesheet body: either a single bare rule, or an
/// `@media (...)` at-rule containing exactly one inner rule.
pub fn parse_stylesheet(text: &str, _tolerant: bool) -> Result<Stylesheet> {
    let trimmed = text.trim();
    if trimmed.starts_with("@media") {
        let rest = trimmed["@media".len()..].trim_start();
        let paren = rest
            .find('(')
            .ok_or_else(|| AgtreeError::syntax("expected media query after @media"))?;
        let close_paren = matching_close(rest, paren, '(', ')')
            .ok_or_else(|| AgtreeError::syntax("unterminated media query"))?;
        let query = parse_media_query_list(&rest[paren..=close_paren])?;
        let after = rest[close_paren + 1..].trim_start();
        let after = after
            .strip_prefix('{')
            .ok_or_else(|| AgtreeError::syntax("expected '{' after media query"))?;
        let after = after
            .strip_suffix('}')
            .ok_or_else(|| AgtreeError::syntax("expected trailing '}' for @media block"))?;
        let rule = parse_rule(after.trim())?;
        Ok(Stylesheet {
            items: vec![StylesheetItem::Media(MediaAtRule { query, rule })],
        })
    } else {
        Ok(Stylesheet {
            items: vec![StylesheetItem::Rule(parse_rule(trimmed)?)],
        })
    }
}

// --- generation -------------------------------------------------------

pub fn generate_attribute(attr: &AttributeSelector) -> String {
    match &attr.matcher {
        Some((m, v)) => format!("[{}{}\"{}\"]", attr.name, m.as_str(), v),
        None => format!("[{}]", attr.name),
    }
}

pub fn generate_compound(compound: &CompoundSelector) -> String {
    let mut out = String::new();
    for comp in &compound.components {
        match comp {
            SelectorComponent::Type(name) => out.push_str(name),
            SelectorComponent::Universal => out.push('*'),
            SelectorComponent::Id(name) => {
                out.push('#');
                out.push_str(name);
            }
            SelectorComponent::Class(name) => {
                out.push('.');
                out.push_str(name);
            }
            SelectorComponent::Attribute(attr) => out.push_str(&generate_attribute(attr)),
            SelectorComponent::PseudoClass(p) => {
                out.push(':');
                out.push_str(&p.name);
                if let Some(arg) = &p.argument {
                    out.push('(');
                    out.push_str(arg);
                    out.push(')');
                }
            }
            SelectorComponent::PseudoElement(name) => {
                out.push_str("::");
                out.push_str(name);
            }
        }
    }
    out
}

pub fn generate_complex_selector(sel: &ComplexSelector) -> String {
    let mut out = String::new();
    for (i, compound) in sel.compounds.iter().enumerate() {
        if i > 0 {
            out.push_str(sel.combinators[i - 1].as_str());
        }
        out.push_str(&generate_compound(compound));
    }
    out
}

pub fn generate_selector_list(list: &SelectorList) -> String {
    list.selectors
        .iter()
        .map(generate_complex_selector)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn generate_declaration_list(list: &DeclarationList) -> String {
    list.declarations
        .iter()
        .map(|d| {
            if d.important {
                format!("{}: {} !important;", d.property, d.value)
            } else {
                format!("{}: {};", d.property, d.value)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn generate_media_query_list(mql: &MediaQueryList) -> String {
    mql.raw.clone()
}

pub fn generate_value_function(f: &CssFunction) -> String {
    format!("{}({})", f.name, f.raw_args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_selector_list() {
        let list = parse_selector_list("div.banner, #ad", true).unwrap();
        assert_eq!(list.selectors.len(), 2);
        assert_eq!(generate_selector_list(&list), "div.banner, #ad");
    }

    #[test]
    fn parses_attribute_with_comma_in_value() {
        let list = parse_selector_list(r#"div[data-x="a,b"]"#, true).unwrap();
        assert_eq!(list.selectors.len(), 1);
    }

    #[test]
    fn parses_pseudo_class_with_nested_parens_as_raw_argument() {
        let list = parse_selector_list("div:style(padding-top: 0 !important;)", true).unwrap();
        let compound = &list.selectors[0].compounds[0];
        assert!(matches!(
            compound.components.last(),
            Some(SelectorComponent::PseudoClass(p)) if p.name == "style"
        ));
    }

    #[test]
    fn parses_declaration_list_with_important() {
        let decls = parse_declaration_list("padding-top: 0 !important;").unwrap();
        assert_eq!(decls.declarations.len(), 1);
        assert!(decls.declarations[0].important);
    }

    #[test]
    fn parses_media_atrule() {
        let sheet =
            parse_stylesheet("@media (min-width: 100px) { div { remove: true; } }", true).unwrap();
        assert_eq!(sheet.items.len(), 1);
        assert!(matches!(sheet.items[0], StylesheetItem::Media(_)));
    }

    #[test]
    fn parses_value_function() {
        let f = parse_value_function("responseheader(name)").unwrap();
        assert_eq!(f.name, "responseheader");
        assert_eq!(f.raw_args, "name");
    }
}
