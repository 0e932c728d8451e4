//! `aglint` config comment: `! aglint command [params] [-- comment]`.

use crate::ast::comment::{ConfigCommentParams, ConfigCommentRule};
use crate::ast::common::Value;
use crate::error::{AgtreeError, Result};
use crate::json5;
use crate::parser::parameter_list;

const PREFIX: &str = "aglint";

pub fn parse(marker: &str, text: &str) -> Result<ConfigCommentRule> {
    let trimmed = text.trim_start();
    if trimmed.len() < PREFIX.len() || !trimmed[..PREFIX.len()].eq_ignore_ascii_case(PREFIX) {
        return Err(AgtreeError::syntax("not a config comment"));
    }
    let after_prefix = &trimmed[PREFIX.len()..];
    let command_end = after_prefix
        .find(|c: char| c.is_whitespace())
        .unwrap_or(after_prefix.len());
    let command = format!("{PREFIX}{}", &after_prefix[..command_end]);
    let mut rest = after_prefix[command_end..].trim_start();

    // Split off a trailing `-- comment`, which must have `--` preceded
    // by whitespace.
    let mut comment = None;
    if let Some(idx) = find_trailing_comment_marker(rest) {
        let before = rest[..idx].trim_end();
        let after = rest[idx + 2..].trim();
        comment = Some(Value::new(after.to_string()));
        rest = before;
    }
    let rest = rest.trim();

    let params = if command == PREFIX {
        if rest.is_empty() {
            return Err(AgtreeError::syntax("'aglint' requires JSON5 parameters"));
        }
        let value = json5::parse_object(rest)?;
        Some(ConfigCommentParams::Json5(value))
    } else if rest.is_empty() {
        None
    } else {
        Some(ConfigCommentParams::List(parameter_list::parse(rest, ',')))
    };

    Ok(ConfigCommentRule {
        marker: Value::new(marker.to_string()),
        command: Value::new(command),
        params,
        comment,
    })
}

fn find_trailing_comment_marker(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i + 1 < bytes.len() {
        if bytes[i] == b'-' && bytes[i + 1] == b'-' && i > 0 && bytes[i - 1].is_ascii_whitespace() {
            return Some(i);
        }
        i += 1;
    }
    None
}

pub fn generate(rule: &ConfigCommentRule) -> String {
    let mut out = format!("{} {}", rule.marker.value, rule.command.value);
    match &rule.params {
        Some(ConfigCommentParams::Json5(value)) => {
            out.push(' ');
            out.push_str(&json5::generate_object(value));
        }
        Some(ConfigCommentParams::List(list)) => {
            out.push(' ');
            out.push_str(&parameter_list::generate(list, ','));
        }
        None => {}
    }
    if let Some(comment) = &rule.comment {
        out.push_str(" -- ");
        out.push_str(&comment.value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_aglint_as_json5_object() {
        let rule = parse("!", " aglint foo: true, bar: 1").unwrap();
        assert_eq!(rule.command.value, "aglint");
        assert!(matches!(rule.params, Some(ConfigCommentParams::Json5(_))));
    }

    #[test]
    fn rejects_empty_object() {
        assert!(parse("!", " aglint").is_err());
    }

    #[test]
    fn parses_other_command_as_param_list() {
        let rule = parse("!", " aglint-disable some-rule, other-rule").unwrap();
        assert_eq!(rule.command.value, "aglint-disable");
        assert!(matches!(rule.params, Some(ConfigCommentParams::List(_))));
    }

    #[test]
    fn parses_trailing_comment() {
        let rule = parse("!", " aglint-disable some-rule -- because reasons").unwrap();
        assert_eq!(rule.comment.unwrap().value, "because reasons");
    }
}
