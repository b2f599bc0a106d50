//! Minimum-version filtering of version keys

use std::sync::OnceLock;

use regex::Regex;

use super::refs::DEV_PREFIX;
use crate::config::PackageSource;
use crate::version::DottedVersion;

fn dotted_key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(dev-)?[0-9.]+$").expect("dotted key pattern is valid"))
}

/// Whether `version_key` should be published for `source`
///
/// Only bare dotted-numeric keys (optionally `dev-` prefixed) are held
/// against the bound. Prereleases and named branches always pass.
pub fn should_include(source: &PackageSource, version_key: &str) -> bool {
    let Some(bound) = &source.min_version else {
        return true;
    };

    if !dotted_key_pattern().is_match(version_key) {
        return true;
    }

    let digits = version_key.strip_prefix(DEV_PREFIX).unwrap_or(version_key);
    match DottedVersion::parse(digits) {
        Some(candidate) => candidate >= *bound,
        // Segment overflow: not comparable
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounded(min: &str) -> PackageSource {
        PackageSource::new("acme/widget", "https://github.com/acme/widget.git")
            .with_min_version(DottedVersion::parse_bound(min).unwrap())
    }

    #[test]
    fn test_no_bound_includes_everything() {
        let source = PackageSource::new("acme/widget", "u");
        for key in ["0.0.1", "dev-main", "1.0.0-rc1", "dev-0.1"] {
            assert!(should_include(&source, key));
        }
    }

    #[test]
    fn test_numeric_keys_against_bound() {
        let source = bounded("2.0");
        assert!(!should_include(&source, "1.9.0"));
        assert!(!should_include(&source, "1.99.99"));
        assert!(should_include(&source, "2.0.0"));
        assert!(should_include(&source, "2.0"));
        assert!(should_include(&source, "10.0.0"));
    }

    #[test]
    fn test_dev_numeric_keys_against_bound() {
        let source = bounded("2.0");
        assert!(!should_include(&source, "dev-1.2.3"));
        assert!(should_include(&source, "dev-2.1"));
    }

    #[test]
    fn test_non_numeric_keys_always_pass() {
        let source = bounded("99");
        for key in ["dev-main", "2.1.0-beta1", "1.0.0-rc", "v3.x", "dev-feature/1.0"] {
            assert!(should_include(&source, key), "{}", key);
        }
    }

    #[test]
    fn test_monotonic_above_accepted_version() {
        let source = bounded("1.5");
        let keys = ["1.4.9", "1.5.0", "1.5.1", "1.10.0", "2.0.0", "12.0.0"];
        let first = keys.iter().position(|k| should_include(&source, k)).unwrap();
        assert_eq!(keys[first], "1.5.0");
        assert!(keys[first..].iter().all(|k| should_include(&source, k)));
    }
}
