//! Filter-list driver: splits raw input into lines, dispatches each line
//! to the rule parser, and re-joins rules back into text.

use crate::ast::rule::FilterList;
use crate::error::Result;
use crate::location::Position;
use crate::parser::rule;
use crate::scanner::{self, NewlineKind};

/// Parse a full filter list. In tolerant mode (the default for real
/// filter lists, which always contain some noise) a malformed line
/// becomes an `InvalidRule` rather than aborting the whole parse; in
/// strict mode the first error aborts with it.
pub fn parse(text: &str, tolerant: bool) -> Result<FilterList> {
    let mut children = Vec::new();
    let mut offset = 0usize;
    let mut line_no = 1usize;
    for (line, nl) in scanner::split_by_newlines_ex(text) {
        let base = Position::new(offset, line_no, 1);
        let mut parsed = rule::parse(&line, base, tolerant)?;
        {
            let raws = parsed.raws_mut();
            raws.text = Some(line.clone());
            raws.nl = Some(nl);
        }
        children.push(parsed);
        offset += line.len() + nl.as_str().len();
        line_no += 1;
    }
    Ok(FilterList { children })
}

/// Re-join a filter list into text. When `prefer_raw` is set, any rule
/// still carrying its original source slice is emitted verbatim instead
/// of being regenerated from its AST (byte-identical round trip).
pub fn generate(list: &FilterList, prefer_raw: bool) -> String {
    let mut out = String::new();
    for (i, child) in list.children.iter().enumerate() {
        let raws = child.raws();
        let text = if prefer_raw {
            raws.text.clone().unwrap_or_else(|| rule::generate(child))
        } else {
            rule::generate(child)
        };
        out.push_str(&text);
        let nl = raws.nl.unwrap_or(NewlineKind::Lf);
        if i + 1 < list.children.len() {
            out.push_str(nl.as_str());
        } else if !matches!(nl, NewlineKind::Null) {
            out.push_str(nl.as_str());
        }
    }
    out
}

#[cfg(test)]
fn anyrule_summary(rule: &crate::ast::rule::AnyRule) -> &'static str {
    use crate::ast::rule::AnyRule;
    match rule {
        AnyRule::Empty(_) => "empty",
        AnyRule::Invalid(_) => "invalid",
        AnyRule::Comment(_) => "comment",
        AnyRule::Cosmetic(_) => "cosmetic",
        AnyRule::Network(_) => "network",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::rule::AnyRule;

    #[test]
    fn parses_multiline_list_preserving_rule_count() {
        let text = "! title\nexample.org##.banner\n||example.com^$script\n";
        let list = parse(text, true).unwrap();
        assert_eq!(list.children.len(), 3);
        assert_eq!(anyrule_summary(&list.children[0]), "comment");
        assert_eq!(anyrule_summary(&list.children[1]), "cosmetic");
        assert_eq!(anyrule_summary(&list.children[2]), "network");
    }

    #[test]
    fn tolerant_mode_always_succeeds_with_matching_rule_count() {
        let text = "ok.com##.a\n[$path=/x]ok.com##+js(foo)\nanother\n";
        let list = parse(text, true).unwrap();
        assert_eq!(list.children.len(), 3);
        assert!(matches!(list.children[1], AnyRule::Invalid(_)));
    }

    #[test]
    fn round_trips_with_prefer_raw() {
        let text = "! title\r\nexample.org##.banner\n||example.com^$script";
        let list = parse(text, true).unwrap();
        assert_eq!(generate(&list, true), text);
    }

    #[test]
    fn regenerates_from_ast_without_prefer_raw() {
        let text = "example.org##.banner\n";
        let list = parse(text, true).unwrap();
        assert_eq!(generate(&list, false), "example.org##.banner\n");
    }
}
