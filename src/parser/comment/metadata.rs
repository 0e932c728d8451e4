//! Metadata comment: `! Header: value`.

use crate::ast::comment::MetadataCommentRule;
use crate::ast::common::Value;
use crate::error::{AgtreeError, Result};

const HEADERS: &[&str] = &[
    "Title",
    "Version",
    "Description",
    "Homepage",
    "Expires",
    "Checksum",
    "Last Modified",
    "Last modified",
    "TimeUpdated",
    "Licence",
    "License",
];

pub fn parse(marker: &str, text: &str) -> Result<MetadataCommentRule> {
    if !text.contains(':') {
        return Err(AgtreeError::syntax("not a metadata comment"));
    }
    let trimmed = text.trim_start();
    for header in HEADERS {
        if trimmed.len() < header.len() {
            continue;
        }
        let candidate = &trimmed[..header.len()];
        if !candidate.eq_ignore_ascii_case(header) {
            continue;
        }
        let after_header = trimmed[header.len()..].trim_start();
        let after_colon = match after_header.strip_prefix(':') {
            Some(rest) => rest,
            None => continue,
        };
        let value = after_colon.trim();
        if value.is_empty() {
            continue;
        }
        return Ok(MetadataCommentRule {
            marker: Value::new(marker.to_string()),
            header: Value::new(*header),
            value: Value::new(value.to_string()),
        });
    }
    Err(AgtreeError::syntax("not a metadata comment"))
}

pub fn generate(rule: &MetadataCommentRule) -> String {
    format!(
        "{} {}: {}",
        rule.marker.value, rule.header.value, rule.value.value
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_title_header() {
        let rule = parse("!", " Title: My List").unwrap();
        assert_eq!(rule.header.value, "Title");
        assert_eq!(rule.value.value, "My List");
    }

    #[test]
    fn is_case_insensitive() {
        let rule = parse("!", " title: My List").unwrap();
        assert_eq!(rule.header.value, "Title");
    }

    #[test]
    fn rejects_unknown_header() {
        assert!(parse("!", " Unknown: value").is_err());
    }

    #[test]
    fn rejects_empty_value() {
        assert!(parse("!", " Title:").is_err());
    }

    #[test]
    fn round_trips() {
        let rule = parse("!", " Title: My List").unwrap();
        assert_eq!(generate(&rule), "! Title: My List");
    }
}
