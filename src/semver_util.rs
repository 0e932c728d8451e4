//! Thin wrapper around the `semver` crate for agent-version recognition.
//!
//! Agent declarations carry loose version tokens like `2.0` or `1`,
//! which the strict `semver` crate rejects outright (it requires
//! `MAJOR.MINOR.PATCH`). We coerce by padding missing components with
//! `.0` before delegating, mirroring the "round-trip through the
//! external SemVer normalizer" check spec.md describes.

/// Returns whether `s` is recognizable as a version token.
pub fn is_valid_version(s: &str) -> bool {
    coerce(s).is_some()
}

fn coerce(s: &str) -> Option<semver::Version> {
    if s.is_empty() || !s.chars().next()?.is_ascii_digit() {
        return None;
    }
    if let Ok(v) = semver::Version::parse(s) {
        return Some(v);
    }
    let parts: Vec<&str> = s.split('.').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }
    if !parts.iter().all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit())) {
        return None;
    }
    let mut padded = parts.to_vec();
    while padded.len() < 3 {
        padded.push("0");
    }
    semver::Version::parse(&padded.join(".")).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_full_and_partial_versions() {
        assert!(is_valid_version("2.0.1"));
        assert!(is_valid_version("2.0"));
        assert!(is_valid_version("2"));
    }

    #[test]
    fn rejects_non_numeric_tokens() {
        assert!(!is_valid_version("AdGuard"));
        assert!(!is_valid_version(""));
    }
}
