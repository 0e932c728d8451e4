//! Agent comment rule: `[name version; name version; ...]`.

use crate::ast::comment::AgentCommentRule;
use crate::ast::common::{Agent, Value};
use crate::error::{AgtreeError, Result};
use crate::semver_util;

/// Text qualifies as an agent comment if, trimmed, it starts with `[`,
/// ends with `]`, and contains no cosmetic separator (which would mean
/// it's actually an AdGuard modifier-prefixed cosmetic rule pattern).
pub fn looks_like_agent(trimmed: &str) -> bool {
    if !trimmed.starts_with('[') || !trimmed.ends_with(']') {
        return false;
    }
    !crate::parser::cosmetic::contains_cosmetic_separator(trimmed)
}

fn parse_one_agent(text: &str) -> Result<Agent> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AgtreeError::syntax("empty agent name"));
    }
    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    // The last token that round-trips through the version normalizer
    // becomes the version; everything before it is the name.
    let mut version_idx = None;
    for (i, tok) in tokens.iter().enumerate().rev() {
        if semver_util::is_valid_version(tok) {
            version_idx = Some(i);
            break;
        }
    }
    match version_idx {
        Some(idx) if idx == tokens.len() - 1 => {
            // Reject a second version-looking token earlier in the list.
            for tok in &tokens[..idx] {
                if semver_util::is_valid_version(tok) {
                    return Err(AgtreeError::syntax("duplicate version token in agent"));
                }
            }
            let name = tokens[..idx].join(" ");
            if name.is_empty() {
                return Err(AgtreeError::syntax("empty agent name"));
            }
            Ok(Agent {
                adblock: Value::new(name),
                version: Some(Value::new(tokens[idx].to_string())),
            })
        }
        _ => Ok(Agent {
            adblock: Value::new(trimmed.to_string()),
            version: None,
        }),
    }
}

pub fn parse(text: &str) -> Result<AgentCommentRule> {
    let trimmed = text.trim();
    if !looks_like_agent(trimmed) {
        return Err(AgtreeError::syntax("not an agent comment"));
    }
    let inner = &trimmed[1..trimmed.len() - 1];
    let parts: Vec<&str> = inner.split(';').collect();
    let mut children = Vec::with_capacity(parts.len());
    for part in parts {
        children.push(parse_one_agent(part)?);
    }
    if children.is_empty() {
        return Err(AgtreeError::syntax("empty agent list"));
    }
    Ok(AgentCommentRule { children })
}

pub fn generate(rule: &AgentCommentRule) -> String {
    let inner = rule
        .children
        .iter()
        .map(|a| match &a.version {
            Some(v) => format!("{} {}", a.adblock.value, v.value),
            None => a.adblock.value.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ");
    format!("[{inner}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_version_pairs() {
        let rule = parse("[Adblock Plus 2.0; AdGuard]").unwrap();
        assert_eq!(rule.children.len(), 2);
        assert_eq!(rule.children[0].adblock.value, "Adblock Plus");
        assert_eq!(rule.children[0].version.as_ref().unwrap().value, "2.0");
        assert_eq!(rule.children[1].adblock.value, "AdGuard");
        assert!(rule.children[1].version.is_none());
    }

    #[test]
    fn rejects_empty_list() {
        assert!(parse("[]").is_err());
    }

    #[test]
    fn round_trips() {
        let rule = parse("[Adblock Plus 2.0; AdGuard]").unwrap();
        assert_eq!(generate(&rule), "[Adblock Plus 2.0; AdGuard]");
    }
}
