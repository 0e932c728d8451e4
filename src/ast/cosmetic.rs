//! AST nodes for the cosmetic rule family.

use super::common::{DomainList, ModifierList, ParameterList, Value};
use crate::css::{DeclarationList, MediaQueryList, SelectorList};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CosmeticSeparator {
    ElementHiding,          // ##
    ElementHidingException, // #@#
    ExtCssLegacy,           // #?#
    ExtCssLegacyException,  // #@?#
    AdgCss,                 // #$#
    AdgCssException,        // #@$#
    AdgCssExtCss,           // #$?#
    AdgCssExtCssException,  // #@$?#
    UboScriptlet,           // ##+
    UboScriptletException,  // #@#+
    AdgJsOrScriptlet,       // #%#
    AdgJsOrScriptletExc,    // #@%#
    UboHtml,                // ##^
    UboHtmlException,       // #@#^
    AdgHtml,                // $$
    AdgHtmlException,       // $@$
}

impl CosmeticSeparator {
    pub fn as_str(self) -> &'static str {
        use CosmeticSeparator::*;
        match self {
            ElementHiding => "##",
            ElementHidingException => "#@#",
            ExtCssLegacy => "#?#",
            ExtCssLegacyException => "#@?#",
            AdgCss => "#$#",
            AdgCssException => "#@$#",
            AdgCssExtCss => "#$?#",
            AdgCssExtCssException => "#@$?#",
            UboScriptlet => "##+",
            UboScriptletException => "#@#+",
            AdgJsOrScriptlet => "#%#",
            AdgJsOrScriptletExc => "#@%#",
            UboHtml => "##^",
            UboHtmlException => "#@#^",
            AdgHtml => "$$",
            AdgHtmlException => "$@$",
        }
    }

    pub fn is_exception(self) -> bool {
        self.as_str().contains('@')
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosmeticRuleHeader {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<ModifierList>,
    pub domains: DomainList,
    pub separator: CosmeticSeparator,
    pub exception: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementHidingBody {
    pub selector_list: SelectorList,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CssInjectionBody {
    pub media_query_list: Option<MediaQueryList>,
    pub selector_list: SelectorList,
    pub declaration_list: Option<DeclarationList>,
    pub remove: bool,
    /// Which surface syntax this was parsed from / should generate as.
    pub ubo_syntax: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptletInjectionBody {
    pub calls: Vec<ParameterList>,
    /// `true` for the ABP whitespace-separated, `;`-joined surface
    /// syntax; `false` for the AdGuard/uBO `//scriptlet(...)`/`js(...)`
    /// call syntax.
    pub abp_style: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HtmlFilteringBody {
    SelectorList(SelectorList),
    Function(crate::css::CssFunction),
}

#[derive(Debug, Clone, PartialEq)]
pub struct JsInjectionBody {
    pub code: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CosmeticBody {
    ElementHiding(ElementHidingBody),
    CssInjection(CssInjectionBody),
    ScriptletInjection(ScriptletInjectionBody),
    HtmlFiltering(HtmlFilteringBody),
    JsInjection(JsInjectionBody),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CosmeticRule {
    pub header: CosmeticRuleHeader,
    pub body: CosmeticBody,
}
