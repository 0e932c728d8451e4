//! Separator-delimited, quote/regex-aware argument list parser.

use crate::ast::common::{Parameter, ParameterList, Value};
use crate::scanner;

/// Parse `text` into a parameter list, splitting on unescaped,
/// non-string, non-regex occurrences of `sep`. Internal whitespace of
/// each segment is preserved; only leading/trailing whitespace is
/// trimmed. An empty input yields an empty list; a trailing separator
/// yields a trailing empty parameter.
pub fn parse(text: &str, sep: char) -> ParameterList {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return ParameterList { children: vec![] };
    }
    let sep_byte = sep as u8;
    let parts = scanner::split_by_unescaped_non_string_non_regex_char(trimmed, sep_byte);
    let children = parts
        .into_iter()
        .map(|p| Parameter {
            value: Value::new(p.trim().to_string()),
        })
        .collect();
    ParameterList { children }
}

pub fn generate(list: &ParameterList, sep: char) -> String {
    let joiner = if sep == ' ' {
        sep.to_string()
    } else {
        format!("{sep} ")
    };
    list.children
        .iter()
        .map(|p| p.value.value.as_str())
        .collect::<Vec<_>>()
        .join(&joiner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_list() {
        assert!(parse("", ',').children.is_empty());
    }

    #[test]
    fn trailing_separator_yields_trailing_empty_param() {
        let list = parse("a,b,", ',');
        assert_eq!(list.children.len(), 3);
        assert_eq!(list.children[2].value.value, "");
    }

    #[test]
    fn escape_preserves_separator_as_literal() {
        let list = parse(r"a\,b,c", ',');
        assert_eq!(list.children.len(), 2);
        assert_eq!(list.children[0].value.value, r"a\,b");
    }

    #[test]
    fn generate_joins_with_space_after_non_space_separator() {
        let list = parse("a,b", ',');
        assert_eq!(generate(&list, ','), "a, b");
    }

    #[test]
    fn generate_joins_bare_with_space_separator() {
        let list = parse("a b", ' ');
        assert_eq!(generate(&list, ' '), "a b");
    }
}
