//! Element-hiding cosmetic body: a bare CSS selector list.

use crate::ast::cosmetic::ElementHidingBody;
use crate::css;
use crate::error::{AgtreeError, Result};

pub fn parse(body: &str) -> Result<ElementHidingBody> {
    if body.is_empty() {
        return Err(AgtreeError::syntax("element-hiding body must be non-empty"));
    }
    let selector_list = css::parse_selector_list(body, false)
        .map_err(|e| AgtreeError::css(e.message().to_string(), e.loc()))?;
    Ok(ElementHidingBody { selector_list })
}

pub fn generate(body: &ElementHidingBody) -> String {
    css::generate_selector_list(&body.selector_list)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_body() {
        assert!(parse("").is_err());
    }

    #[test]
    fn parses_single_selector() {
        let body = parse(".banner").unwrap();
        assert_eq!(body.selector_list.selectors.len(), 1);
    }
}
