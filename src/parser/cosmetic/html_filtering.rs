//! HTML-filtering cosmetic body: a CSS selector list, or (uBO only) a
//! single CSS function node such as `responseheader(name)`.

use crate::ast::cosmetic::HtmlFilteringBody;
use crate::css;
use crate::error::{AgtreeError, Result};

/// uBO bodies may be either a selector list or a function node.
pub fn parse(body: &str) -> Result<HtmlFilteringBody> {
    match css::parse_selector_list(body, false) {
        Ok(list) => Ok(HtmlFilteringBody::SelectorList(list)),
        Err(e) if e.message().contains("selector expected") => {
            let f = css::parse_value_function(body)
                .map_err(|e| AgtreeError::css(e.message().to_string(), e.loc()))?;
            Ok(HtmlFilteringBody::Function(f))
        }
        Err(e) => Err(AgtreeError::css(e.message().to_string(), e.loc())),
    }
}

/// ADG (`$$`/`$@$`) bodies only ever allow a selector list; a function
/// node is rejected. `""` inside string literals is treated as an
/// escaped `\"` on parse.
pub fn parse_adg_selector_only(body: &str) -> Result<HtmlFilteringBody> {
    let unescaped = body.replace("\"\"", "\\\"");
    let list = css::parse_selector_list(&unescaped, false)
        .map_err(|e| AgtreeError::css(e.message().to_string(), e.loc()))?;
    Ok(HtmlFilteringBody::SelectorList(list))
}

pub fn generate(body: &HtmlFilteringBody) -> String {
    match body {
        HtmlFilteringBody::SelectorList(list) => {
            css::generate_selector_list(list).replace("\\\"", "\"\"")
        }
        HtmlFilteringBody::Function(f) => css::generate_value_function(f),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_selector_list_body() {
        let body = parse("div[tag-content=\"foo\"]").unwrap();
        assert!(matches!(body, HtmlFilteringBody::SelectorList(_)));
    }

    #[test]
    fn parses_function_body() {
        let body = parse("responseheader(name)").unwrap();
        assert!(matches!(body, HtmlFilteringBody::Function(_)));
    }
}
