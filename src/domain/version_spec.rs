//! Bare semantic versions and manifest range prefixes
//!
//! Manifests store ranges such as `^1.2.3` or `~1.2.3`; the tool compares
//! against a bare `MAJOR.MINOR.PATCH` and always writes back a caret range.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

static SEMVER_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").expect("valid version regex"));

/// A bare `MAJOR.MINOR.PATCH` version
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VersionSpec(String);

impl VersionSpec {
    /// Accepts only three dot-separated numeric components
    ///
    /// Ranges (`^1.0.0`), partial versions (`1.2`) and pre-releases
    /// (`1.0.0-beta`) are rejected.
    pub fn parse(value: &str) -> Option<Self> {
        if SEMVER_SHAPE.is_match(value) {
            Some(Self(value.to_string()))
        } else {
            None
        }
    }

    /// The version string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The caret range written into manifests
    pub fn to_range(&self) -> String {
        format!("^{}", self.0)
    }

    /// True if a manifest entry already points at this version
    ///
    /// Exact string equality after stripping one leading `^` or `~`.
    pub fn matches_range(&self, range: &str) -> bool {
        strip_range_prefix(range) == self.0
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strip a single leading `^` or `~`
pub fn strip_range_prefix(range: &str) -> &str {
    range
        .strip_prefix('^')
        .or_else(|| range.strip_prefix('~'))
        .unwrap_or(range)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_bare_version() {
        assert_eq!(VersionSpec::parse("1.2.3").unwrap().as_str(), "1.2.3");
        assert!(VersionSpec::parse("10.20.300").is_some());
        assert!(VersionSpec::parse("0.0.0").is_some());
    }

    #[test]
    fn test_parse_rejects_partial_versions() {
        assert!(VersionSpec::parse("1.2").is_none());
        assert!(VersionSpec::parse("1").is_none());
        assert!(VersionSpec::parse("1.2.3.4").is_none());
    }

    #[test]
    fn test_parse_rejects_ranges_and_tags() {
        assert!(VersionSpec::parse("^1.2.3").is_none());
        assert!(VersionSpec::parse("~1.2.3").is_none());
        assert!(VersionSpec::parse("1.2.3-beta.1").is_none());
        assert!(VersionSpec::parse("latest").is_none());
        assert!(VersionSpec::parse("x.y.z").is_none());
        assert!(VersionSpec::parse(" 1.2.3").is_none());
        assert!(VersionSpec::parse("").is_none());
        // Arabic-Indic and full-width digits are not version components
        assert!(VersionSpec::parse("\u{661}.\u{662}.\u{663}").is_none());
        assert!(VersionSpec::parse("\u{ff11}.0.0").is_none());
    }

    #[test]
    fn test_to_range() {
        assert_eq!(VersionSpec::parse("2.0.0").unwrap().to_range(), "^2.0.0");
    }

    #[test]
    fn test_strip_range_prefix() {
        assert_eq!(strip_range_prefix("^1.0.0"), "1.0.0");
        assert_eq!(strip_range_prefix("~1.0.0"), "1.0.0");
        assert_eq!(strip_range_prefix("1.0.0"), "1.0.0");
        assert_eq!(strip_range_prefix("^^1.0.0"), "^1.0.0");
        assert_eq!(strip_range_prefix(">=1.0.0"), ">=1.0.0");
    }

    #[test]
    fn test_matches_range() {
        let version = VersionSpec::parse("2.0.0").unwrap();
        assert!(version.matches_range("~2.0.0"));
        assert!(version.matches_range("^2.0.0"));
        assert!(version.matches_range("2.0.0"));
        assert!(!version.matches_range("^1.0.0"));
        assert!(!version.matches_range(">=2.0.0"));
        assert!(!version.matches_range("^2.0"));
    }

    #[test]
    fn test_serializes_as_string() {
        let version = VersionSpec::parse("3.1.4").unwrap();
        assert_eq!(serde_json::to_string(&version).unwrap(), "\"3.1.4\"");
    }
}
