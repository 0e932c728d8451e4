//! Domain-list parser: comma- or pipe-separated domain items with an
//! optional `~` exception marker.

use crate::ast::common::{Domain, DomainList, DomainListSeparator};
use crate::error::{AgtreeError, Result};

pub fn parse(text: &str, separator: DomainListSeparator) -> Result<DomainList> {
    let sep_char = separator.as_char();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AgtreeError::syntax("domain list expected"));
    }
    if trimmed.ends_with(sep_char) {
        return Err(AgtreeError::syntax("domain list cannot end with its separator"));
    }
    let mut children = Vec::new();
    for raw in trimmed.split(sep_char) {
        let item = raw.trim();
        if item.is_empty() {
            return Err(AgtreeError::syntax("empty domain item"));
        }
        let (exception, value) = if let Some(rest) = item.strip_prefix('~') {
            if rest.starts_with('~') {
                return Err(AgtreeError::syntax(
                    "exception marker cannot be followed by another exception marker",
                ));
            }
            if rest.is_empty() {
                return Err(AgtreeError::syntax(
                    "exception marker cannot be followed by the separator or end of item",
                ));
            }
            if rest.starts_with(char::is_whitespace) {
                return Err(AgtreeError::syntax(
                    "exception marker cannot be followed by whitespace",
                ));
            }
            (true, rest.to_string())
        } else {
            (false, item.to_string())
        };
        children.push(Domain { value, exception });
    }
    Ok(DomainList {
        separator,
        children,
    })
}

pub fn generate(list: &DomainList) -> String {
    list.children
        .iter()
        .map(|d| {
            if d.exception {
                format!("~{}", d.value.trim())
            } else {
                d.value.trim().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(&list.separator.as_char().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_list_with_exceptions() {
        let list = parse("example.org,~sub.example.org", DomainListSeparator::Comma).unwrap();
        assert_eq!(list.children.len(), 2);
        assert!(!list.children[0].exception);
        assert!(list.children[1].exception);
        assert_eq!(list.children[1].value, "sub.example.org");
    }

    #[test]
    fn rejects_trailing_separator() {
        assert!(parse("a.com,", DomainListSeparator::Comma).is_err());
    }

    #[test]
    fn rejects_double_exception_marker() {
        assert!(parse("~~a.com", DomainListSeparator::Comma).is_err());
    }

    #[test]
    fn rejects_exception_followed_by_whitespace() {
        assert!(parse("~ a.com", DomainListSeparator::Comma).is_err());
    }

    #[test]
    fn wildcard_domain_is_accepted() {
        let list = parse("*", DomainListSeparator::Comma).unwrap();
        assert_eq!(list.children[0].value, "*");
    }

    #[test]
    fn pipe_separator_round_trips() {
        let list = parse("a.com|~b.com", DomainListSeparator::Pipe).unwrap();
        assert_eq!(generate(&list), "a.com|~b.com");
    }
}
