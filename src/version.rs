//! Version identifiers derived from git reference names
//!
//! Reference names are mapped onto a partially ordered version space:
//! - Numeric: `[v]MAJOR.MINOR.PATCH` with an optional `-rc`, `-alpha` or
//!   `-beta` prerelease, itself optionally followed by an ordinal
//!   (`-beta.1`, `-beta1`)
//! - Opaque: anything else, kept verbatim and only ever compared for equality
//!
//! Minimum-version bounds use the looser [`DottedVersion`] form (`2`, `2.0`,
//! `2.0.0.1`), compared segment by segment with missing segments read as zero.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use anyhow::{bail, Result};
use regex::Regex;

/// Prerelease channel of a numeric version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrereleaseLabel {
    Alpha,
    Beta,
    Rc,
}

impl PrereleaseLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrereleaseLabel::Alpha => "alpha",
            PrereleaseLabel::Beta => "beta",
            PrereleaseLabel::Rc => "rc",
        }
    }
}

impl FromStr for PrereleaseLabel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "alpha" => Ok(PrereleaseLabel::Alpha),
            "beta" => Ok(PrereleaseLabel::Beta),
            "rc" => Ok(PrereleaseLabel::Rc),
            other => bail!("Unknown prerelease label: '{}'", other),
        }
    }
}

impl fmt::Display for PrereleaseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prerelease suffix, e.g. `rc` or `beta.2`
///
/// Ordered by label first, then ordinal. A missing ordinal sorts before any
/// present one, so `alpha` < `alpha.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Prerelease {
    pub label: PrereleaseLabel,
    pub ordinal: Option<u64>,
}

/// A numeric `major.minor.patch` version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<Prerelease>,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
        }
    }

    pub fn with_prerelease(mut self, label: PrereleaseLabel, ordinal: Option<u64>) -> Self {
        self.prerelease = Some(Prerelease { label, ordinal });
        self
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.major.cmp(&other.major) {
            Ordering::Equal => {}
            ord => return ord,
        }
        match self.minor.cmp(&other.minor) {
            Ordering::Equal => {}
            ord => return ord,
        }
        match self.patch.cmp(&other.patch) {
            Ordering::Equal => {}
            ord => return ord,
        }

        // Release sorts after any prerelease of the same triple
        match (&self.prerelease, &other.prerelease) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(b),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{}", pre.label)?;
            if let Some(ordinal) = pre.ordinal {
                write!(f, "{}", ordinal)?;
            }
        }
        Ok(())
    }
}

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^v?(\d+)\.(\d+)\.(\d+)(?:-(rc|alpha|beta)(?:\.?(\d+))?)?$")
            .expect("version pattern is valid")
    })
}

/// Version key of a single git reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionIdentifier {
    Numeric(Version),
    Opaque(String),
}

impl VersionIdentifier {
    /// Parse a reference name. Never fails: names outside the numeric
    /// grammar become [`VersionIdentifier::Opaque`].
    pub fn parse(raw: &str) -> Self {
        Self::parse_numeric(raw)
            .map(VersionIdentifier::Numeric)
            .unwrap_or_else(|| VersionIdentifier::Opaque(raw.to_string()))
    }

    fn parse_numeric(raw: &str) -> Option<Version> {
        let caps = version_pattern().captures(raw)?;

        // Components too large for u64 fall back to opaque
        let mut version = Version::new(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        );

        if let Some(label) = caps.get(4) {
            let label = label.as_str().parse().ok()?;
            let ordinal = match caps.get(5) {
                Some(m) => Some(m.as_str().parse().ok()?),
                None => None,
            };
            version = version.with_prerelease(label, ordinal);
        }

        Some(version)
    }

    pub fn as_numeric(&self) -> Option<&Version> {
        match self {
            VersionIdentifier::Numeric(v) => Some(v),
            VersionIdentifier::Opaque(_) => None,
        }
    }

    /// Compare two identifiers. Only numeric identifiers are ordered;
    /// opaque ones compare equal to an identical opaque string and are
    /// otherwise unordered.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (VersionIdentifier::Numeric(a), VersionIdentifier::Numeric(b)) => Some(a.cmp(b)),
            (VersionIdentifier::Opaque(a), VersionIdentifier::Opaque(b)) if a == b => {
                Some(Ordering::Equal)
            }
            _ => None,
        }
    }
}

impl PartialOrd for VersionIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other)
    }
}

impl fmt::Display for VersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionIdentifier::Numeric(v) => v.fmt(f),
            VersionIdentifier::Opaque(s) => f.write_str(s),
        }
    }
}

/// Bare dotted-numeric version such as `2`, `2.0` or `1.2.3.4`
///
/// Equality and ordering pad the shorter side with zeros, so `2.0 == 2.0.0`.
#[derive(Debug, Clone)]
pub struct DottedVersion {
    segments: Vec<u64>,
}

impl DottedVersion {
    /// Parse a string made only of digits and dots. Empty segments read as
    /// zero; overlong segments make the whole string unparsable.
    pub fn parse(s: &str) -> Option<Self> {
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return None;
        }

        let segments = s
            .split('.')
            .map(|seg| if seg.is_empty() { Some(0) } else { seg.parse().ok() })
            .collect::<Option<Vec<u64>>>()?;

        Some(Self { segments })
    }

    /// Parse a configured minimum-version bound (an optional leading `v`
    /// is accepted)
    pub fn parse_bound(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('v').unwrap_or(trimmed);
        match Self::parse(digits) {
            Some(v) => Ok(v),
            None => bail!(
                "Invalid minimum version: '{}'. Expected a dotted number like '2.0'",
                s
            ),
        }
    }
}

impl PartialEq for DottedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DottedVersion {}

impl PartialOrd for DottedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DottedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        (0..len)
            .map(|i| {
                let a = self.segments.get(i).copied().unwrap_or(0);
                let b = other.segments.get(i).copied().unwrap_or(0);
                a.cmp(&b)
            })
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl fmt::Display for DottedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.segments.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(s: &str) -> Version {
        *VersionIdentifier::parse(s)
            .as_numeric()
            .unwrap_or_else(|| panic!("{} should be numeric", s))
    }

    #[test]
    fn test_parse_release() {
        let v = numeric("1.2.3");
        assert_eq!((v.major, v.minor, v.patch), (1, 2, 3));
        assert!(v.prerelease.is_none());

        assert_eq!(numeric("v10.0.07"), Version::new(10, 0, 7));
    }

    #[test]
    fn test_parse_prerelease() {
        let v = numeric("v2.1.0-beta.1");
        assert_eq!(
            v.prerelease,
            Some(Prerelease {
                label: PrereleaseLabel::Beta,
                ordinal: Some(1)
            })
        );
        assert_eq!(v.to_string(), "2.1.0-beta1");

        assert_eq!(numeric("1.0.0-rc2"), numeric("1.0.0-rc.2"));
        assert_eq!(numeric("1.0.0-alpha").prerelease.unwrap().ordinal, None);
    }

    #[test]
    fn test_parse_falls_back_to_opaque() {
        for raw in ["main", "1.2", "1.2.3-pre", "1.2.3-rc.x", "1.2.3-rc.", "V1.2.3", "1.2.3.4", ""] {
            assert_eq!(
                VersionIdentifier::parse(raw),
                VersionIdentifier::Opaque(raw.to_string()),
                "{}",
                raw
            );
        }

        let huge = "99999999999999999999.0.0";
        assert_eq!(VersionIdentifier::parse(huge).to_string(), huge);
    }

    #[test]
    fn test_display_then_parse() {
        let versions = [
            Version::new(0, 0, 0),
            Version::new(3, 14, 159),
            Version::new(1, 0, 0).with_prerelease(PrereleaseLabel::Rc, None),
            Version::new(1, 0, 0).with_prerelease(PrereleaseLabel::Alpha, Some(12)),
        ];
        for v in versions {
            assert_eq!(numeric(&v.to_string()), v);
        }
    }

    #[test]
    fn test_release_after_prerelease() {
        assert!(numeric("1.2.3") > numeric("1.2.3-rc.1"));
        assert!(numeric("1.2.3-rc.1") < numeric("1.2.3"));
        assert!(numeric("1.2.2") < numeric("1.2.3-alpha"));
    }

    #[test]
    fn test_prerelease_ordering() {
        assert!(numeric("1.0.0-alpha.5") < numeric("1.0.0-beta"));
        assert!(numeric("1.0.0-beta.9") < numeric("1.0.0-rc"));
        assert!(numeric("1.2.3-alpha") < numeric("1.2.3-alpha.1"));
        assert!(numeric("1.2.3-alpha.2") < numeric("1.2.3-alpha.10"));
    }

    #[test]
    fn test_triple_ordering() {
        let mut versions = vec![
            numeric("2.0.0"),
            numeric("1.10.0"),
            numeric("1.9.9"),
            numeric("1.10.0-rc"),
            numeric("0.0.1"),
        ];
        versions.sort();
        let sorted: Vec<String> = versions.iter().map(|v| v.to_string()).collect();
        assert_eq!(sorted, vec!["0.0.1", "1.9.9", "1.10.0-rc", "1.10.0", "2.0.0"]);
    }

    #[test]
    fn test_identifier_partial_order() {
        let a = VersionIdentifier::parse("1.0.0");
        let b = VersionIdentifier::parse("2.0.0");
        let main = VersionIdentifier::parse("main");

        assert_eq!(a.compare(&b), Some(Ordering::Less));
        assert_eq!(main.compare(&main.clone()), Some(Ordering::Equal));
        assert_eq!(a.compare(&main), None);
        assert_eq!(main.compare(&VersionIdentifier::parse("develop")), None);
    }

    #[test]
    fn test_dotted_padding() {
        let two = DottedVersion::parse("2.0").unwrap();
        assert_eq!(two, DottedVersion::parse("2.0.0").unwrap());
        assert_eq!(two, DottedVersion::parse("2").unwrap());
        assert!(DottedVersion::parse("1.9.9").unwrap() < two);
        assert!(DottedVersion::parse("2.0.0.1").unwrap() > two);
        assert!(DottedVersion::parse("10").unwrap() > DottedVersion::parse("9.99").unwrap());
    }

    #[test]
    fn test_dotted_rejects_non_numeric() {
        assert!(DottedVersion::parse("").is_none());
        assert!(DottedVersion::parse("1.2-rc").is_none());
        assert!(DottedVersion::parse("v1.2").is_none());
        assert_eq!(DottedVersion::parse("1..2"), DottedVersion::parse("1.0.2"));
    }

    #[test]
    fn test_parse_bound() {
        assert_eq!(DottedVersion::parse_bound("v2.0").unwrap().to_string(), "2.0");
        assert_eq!(DottedVersion::parse_bound(" 1.5 ").unwrap().to_string(), "1.5");
        assert!(DottedVersion::parse_bound("2.0-beta").is_err());
        assert!(DottedVersion::parse_bound("latest").is_err());
    }
}
