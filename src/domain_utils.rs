//! Syntactic (non-eTLD-aware) domain/hostname validation.

/// Whether `label` is a valid DNS label: 1-63 characters, alphanumeric
/// or `-`, and not starting or ending with `-`. Wildcard labels (`*`)
/// are not handled here; only the surrounding labels of a wildcard
/// domain are checked as ordinary labels.
fn is_valid_label(label: &str) -> bool {
    if label.is_empty() || label.len() > 63 {
        return false;
    }
    if label.starts_with('-') || label.ends_with('-') {
        return false;
    }
    label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Syntactic validity check for a domain or hostname pattern, as used in
/// domain-list entries and the `domain`/`denyallow` modifiers. A bare
/// `*` wildcard is valid on its own (matches any domain); elsewhere `*`
/// is not a recognized wildcard and is rejected as an ordinary label.
pub fn is_valid_domain_or_hostname(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    if s == "*" {
        return true;
    }
    if s.len() > 253 {
        return false;
    }
    s.split('.').all(is_valid_label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_domain() {
        assert!(is_valid_domain_or_hostname("example.com"));
        assert!(is_valid_domain_or_hostname("sub.example.co.uk"));
    }

    #[test]
    fn accepts_bare_wildcard() {
        assert!(is_valid_domain_or_hostname("*"));
    }

    #[test]
    fn rejects_empty_and_hyphen_edges() {
        assert!(!is_valid_domain_or_hostname(""));
        assert!(!is_valid_domain_or_hostname("-example.com"));
        assert!(!is_valid_domain_or_hostname("example-.com"));
    }

    #[test]
    fn rejects_embedded_wildcard_label() {
        assert!(!is_valid_domain_or_hostname("*.example.com"));
    }
}
