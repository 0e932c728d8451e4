//! Modifier metadata: a static table of known network-rule modifiers
//! plus alias resolution, keyed loosely by dialect (most modifiers are
//! common to all three; a handful are AdGuard- or uBO-specific).

use std::collections::HashMap;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy)]
pub struct ModifierInfo {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub assignable: bool,
    pub negatable: bool,
    pub exception_only: bool,
    pub block_only: bool,
    pub deprecated: bool,
}

const MODIFIERS: &[ModifierInfo] = &[
    ModifierInfo { name: "domain", aliases: &["from"], assignable: true, negatable: true, exception_only: false, block_only: false, deprecated: false },
    ModifierInfo { name: "denyallow", aliases: &[], assignable: true, negatable: false, exception_only: false, block_only: true, deprecated: false },
    ModifierInfo { name: "important", aliases: &[], assignable: false, negatable: false, exception_only: false, block_only: false, deprecated: false },
    ModifierInfo { name: "match-case", aliases: &[], assignable: false, negatable: false, exception_only: false, block_only: false, deprecated: false },
    ModifierInfo { name: "third-party", aliases: &["3p"], assignable: false, negatable: true, exception_only: false, block_only: false, deprecated: false },
    ModifierInfo { name: "first-party", aliases: &["1p"], assignable: false, negatable: true, exception_only: false, block_only: false, deprecated: false },
    ModifierInfo { name: "script", aliases: &[], assignable: false, negatable: true, exception_only: false, block_only: false, deprecated: false },
    ModifierInfo { name: "image", aliases: &[], assignable: false, negatable: true, exception_only: false, block_only: false, deprecated: false },
    ModifierInfo { name: "stylesheet", aliases: &["css"], assignable: false, negatable: true, exception_only: false, block_only: false, deprecated: false },
    ModifierInfo { name: "document", aliases: &["doc"], assignable: false, negatable: true, exception_only: false, block_only: false, deprecated: false },
    ModifierInfo { name: "subdocument", aliases: &["frame"], assignable: false, negatable: true, exception_only: false, block_only: false, deprecated: false },
    ModifierInfo { name: "xmlhttprequest", aliases: &["xhr"], assignable: false, negatable: true, exception_only: false, block_only: false, deprecated: false },
    ModifierInfo { name: "websocket", aliases: &[], assignable: false, negatable: true, exception_only: false, block_only: false, deprecated: false },
    ModifierInfo { name: "webrtc", aliases: &[], assignable: false, negatable: false, exception_only: false, block_only: false, deprecated: true },
    ModifierInfo { name: "font", aliases: &[], assignable: false, negatable: true, exception_only: false, block_only: false, deprecated: false },
    ModifierInfo { name: "media", aliases: &[], assignable: false, negatable: true, exception_only: false, block_only: false, deprecated: false },
    ModifierInfo { name: "ping", aliases: &["beacon"], assignable: false, negatable: true, exception_only: false, block_only: false, deprecated: false },
    ModifierInfo { name: "popup", aliases: &[], assignable: false, negatable: false, exception_only: false, block_only: true, deprecated: false },
    ModifierInfo { name: "csp", aliases: &[], assignable: true, negatable: false, exception_only: false, block_only: false, deprecated: false },
    ModifierInfo { name: "replace", aliases: &[], assignable: true, negatable: false, exception_only: false, block_only: true, deprecated: false },
    ModifierInfo { name: "redirect", aliases: &[], assignable: true, negatable: false, exception_only: false, block_only: true, deprecated: false },
    ModifierInfo { name: "redirect-rule", aliases: &[], assignable: true, negatable: false, exception_only: false, block_only: true, deprecated: false },
    ModifierInfo { name: "app", aliases: &[], assignable: true, negatable: true, exception_only: false, block_only: false, deprecated: false },
    ModifierInfo { name: "method", aliases: &[], assignable: true, negatable: true, exception_only: false, block_only: false, deprecated: false },
    ModifierInfo { name: "to", aliases: &[], assignable: true, negatable: true, exception_only: false, block_only: false, deprecated: false },
    ModifierInfo { name: "header", aliases: &[], assignable: true, negatable: false, exception_only: false, block_only: true, deprecated: false },
    ModifierInfo { name: "removeparam", aliases: &[], assignable: true, negatable: true, exception_only: false, block_only: false, deprecated: false },
    ModifierInfo { name: "removeheader", aliases: &[], assignable: true, negatable: false, exception_only: false, block_only: false, deprecated: false },
    ModifierInfo { name: "jsonprune", aliases: &[], assignable: true, negatable: false, exception_only: false, block_only: true, deprecated: false },
    ModifierInfo { name: "all", aliases: &[], assignable: false, negatable: false, exception_only: false, block_only: true, deprecated: false },
    ModifierInfo { name: "badfilter", aliases: &[], assignable: false, negatable: false, exception_only: false, block_only: false, deprecated: false },
    ModifierInfo { name: "elemhide", aliases: &["ehide"], assignable: false, negatable: false, exception_only: true, block_only: false, deprecated: false },
    ModifierInfo { name: "generichide", aliases: &["ghide"], assignable: false, negatable: false, exception_only: true, block_only: false, deprecated: false },
    ModifierInfo { name: "specifichide", aliases: &["shide"], assignable: false, negatable: false, exception_only: true, block_only: false, deprecated: false },
    ModifierInfo { name: "jsinject", aliases: &[], assignable: false, negatable: false, exception_only: true, block_only: false, deprecated: false },
    ModifierInfo { name: "content", aliases: &[], assignable: false, negatable: false, exception_only: true, block_only: false, deprecated: false },
    ModifierInfo { name: "urlblock", aliases: &[], assignable: false, negatable: false, exception_only: true, block_only: false, deprecated: false },
    ModifierInfo { name: "extension", aliases: &[], assignable: false, negatable: true, exception_only: true, block_only: false, deprecated: false },
    ModifierInfo { name: "document-inline", aliases: &[], assignable: false, negatable: false, exception_only: true, block_only: false, deprecated: false },
];

fn table() -> &'static HashMap<&'static str, &'static ModifierInfo> {
    static TABLE: OnceLock<HashMap<&'static str, &'static ModifierInfo>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut map = HashMap::new();
        for m in MODIFIERS {
            map.insert(m.name, m);
            for alias in m.aliases {
                map.insert(*alias, m);
            }
        }
        map
    })
}

/// Whether `name` (without the leading `~`) is a recognized, supported
/// modifier. Deprecated modifiers are excluded from the supported set.
pub fn exists(name: &str) -> bool {
    table()
        .get(name)
        .map(|m| !m.deprecated)
        .unwrap_or(false)
}

pub fn info(name: &str) -> Option<&'static ModifierInfo> {
    table().get(name).copied()
}

/// Resolve an alias (e.g. `3p`, `css`, `ghide`) to its canonical name.
/// Returns `None` for unrecognized modifiers.
pub fn canonical_name(name: &str) -> Option<&'static str> {
    table().get(name).map(|m| m.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_known_modifier() {
        assert!(exists("domain"));
        assert!(exists("third-party"));
    }

    #[test]
    fn recognizes_alias_as_existing() {
        assert!(exists("3p"));
        assert!(exists("css"));
    }

    #[test]
    fn rejects_unknown_modifier() {
        assert!(!exists("not-a-real-modifier"));
    }

    #[test]
    fn deprecated_modifier_is_not_supported() {
        assert!(!exists("webrtc"));
    }

    #[test]
    fn resolves_alias_to_canonical_name() {
        assert_eq!(canonical_name("3p"), Some("third-party"));
        assert_eq!(canonical_name("ghide"), Some("generichide"));
        assert_eq!(canonical_name("domain"), Some("domain"));
        assert_eq!(canonical_name("bogus"), None);
    }
}
