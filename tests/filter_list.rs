//! Integration tests exercising the public API end to end: concrete
//! scenarios per rule family, plus boundary behaviors and universal
//! invariants.

use agtree::ast::rule::{AnyRule, Category};
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case("! Title: Example", Category::Comment)]
#[case("!+ NOT_OPTIMIZED", Category::Comment)]
#[case("!#if (adguard)", Category::Comment)]
#[case("[Adblock Plus 2.0]", Category::Comment)]
#[case("example.org##.banner", Category::Cosmetic)]
#[case("example.org#@#.banner", Category::Cosmetic)]
#[case("example.org##+js(set-constant, foo, false)", Category::Cosmetic)]
#[case("example.org#$#body { remove: true; }", Category::Cosmetic)]
#[case("example.org##^script:has-text(foo)", Category::Cosmetic)]
#[case("example.org$$script[tag-content=\"foo\"]", Category::Cosmetic)]
#[case("||example.com^$script,domain=a.com", Category::Network)]
#[case("@@||example.com^$script", Category::Network)]
#[case("", Category::Empty)]
fn classifies_each_rule_family(#[case] line: &str, #[case] expected: Category) {
    let rule = agtree::parse_rule(line, true).unwrap();
    assert_eq!(rule.category(), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
fn empty_or_whitespace_only_line_is_empty_rule(#[case] line: &str) {
    let rule = agtree::parse_rule(line, true).unwrap();
    assert!(matches!(rule, AnyRule::Empty(_)));
}

#[test]
fn trailing_newline_produces_no_extra_rule() {
    let list = agtree::parse("example.org##.banner\n", true).unwrap();
    assert_eq!(list.children.len(), 1);
}

#[test]
fn escape_before_separator_is_respected_in_modifier_list() {
    let rule = agtree::parse_rule(r"||example.com^$domain=a\,b.com", true).unwrap();
    match rule {
        AnyRule::Network(r) => {
            let mods = r.node.modifiers.unwrap();
            assert_eq!(mods.children.len(), 1);
        }
        other => panic!("expected network rule, got {other:?}"),
    }
}

#[test]
fn adg_modifier_prefix_rejected_on_ubo_only_separator() {
    let res = agtree::parse_rule("[$path=/foo]example.com##+js(foo)", false);
    assert!(res.is_err());
}

#[test]
fn malformed_hint_falls_back_to_plain_comment() {
    // A syntactically invalid hint body (nested parens) doesn't abort the
    // whole comment dispatch; it degrades to a plain comment, matching
    // how every other sub-parser in the family falls through on failure.
    let rule = agtree::parse_rule("!+ FOO(bar(baz))", false).unwrap();
    assert_eq!(rule.category(), Category::Comment);
}

#[test]
fn domain_list_ending_in_separator_is_rejected() {
    let res = agtree::parse_rule("example.org,##.banner", false);
    assert!(res.is_err());
}

#[test]
fn tolerant_mode_always_succeeds_with_matching_rule_count() {
    let text = "ok.com##.a\n[$path=/x]ok.com##+js(foo)\nanother.com$$\n";
    let list = agtree::parse(text, true).unwrap();
    assert_eq!(list.children.len(), 3);
}

proptest! {
    #[test]
    fn prefer_raw_round_trip_is_lossless(title in "[A-Za-z0-9][A-Za-z0-9 ]{0,39}") {
        let text = format!("! Title: {title}\nexample.org##.banner\n||example.com^$script\n");
        let list = agtree::parse(&text, true).unwrap();
        prop_assert_eq!(agtree::generate(&list, true), text);
    }

    #[test]
    fn parsing_is_idempotent_on_generated_output(domain in "[a-z]{1,10}\\.[a-z]{2,4}") {
        let text = format!("{domain}##.banner\n");
        let list = agtree::parse(&text, true).unwrap();
        let regenerated = agtree::generate(&list, false);
        let reparsed = agtree::parse(&regenerated, true).unwrap();
        prop_assert_eq!(list, reparsed);
    }

    #[test]
    fn network_rule_modifier_count_is_preserved(n in 1usize..5) {
        let mods = (0..n).map(|i| format!("m{i}")).collect::<Vec<_>>().join(",");
        let text = format!("||example.com^${mods}");
        let rule = agtree::parse_rule(&text, false).unwrap();
        match rule {
            AnyRule::Network(r) => {
                prop_assert_eq!(r.node.modifiers.unwrap().children.len(), n);
            }
            other => prop_assert!(false, "expected network rule, got {other:?}"),
        }
    }
}
