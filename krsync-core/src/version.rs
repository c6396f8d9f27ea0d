//! Semantic-version comparison over "maybe installed" versions.
//!
//! An absent version (empty field, manifest never written) sorts strictly
//! below any real version, which is what turns "never installed" into an
//! ordinary ordering fact.

use std::cmp::Ordering;

use semver::Version;

use crate::error::VersionError;

/// Parse a version field. Empty or whitespace-only input means "never
/// installed" and maps to `None`; anything else must be a valid
/// `MAJOR.MINOR.PATCH` string.
pub fn parse(input: &str) -> Result<Option<Version>, VersionError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Version::parse(trimmed)
        .map(Some)
        .map_err(|source| VersionError::Invalid {
            input: trimmed.to_owned(),
            source,
        })
}

/// Total order consistent with semver precedence; `None` is strictly less
/// than any real version.
pub fn compare(a: Option<&Version>, b: Option<&Version>) -> Ordering {
    a.cmp(&b)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn v(s: &str) -> Version {
        Version::parse(s).expect("test version")
    }

    #[rstest]
    #[case("1.0.0", "1.2.0", Ordering::Less)]
    #[case("1.2.0", "1.0.0", Ordering::Greater)]
    #[case("1.2.0", "1.2.0", Ordering::Equal)]
    #[case("1.10.0", "1.9.0", Ordering::Greater)]
    #[case("0.9.9", "1.0.0", Ordering::Less)]
    fn semver_precedence(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(compare(Some(&v(a)), Some(&v(b))), expected);
    }

    #[test]
    fn absent_sorts_below_any_real_version() {
        assert_eq!(compare(None, Some(&v("0.0.1"))), Ordering::Less);
        assert_eq!(compare(Some(&v("0.0.1")), None), Ordering::Greater);
        assert_eq!(compare(None, None), Ordering::Equal);
    }

    #[test]
    fn compare_is_reflexive() {
        let version = v("3.14.1");
        assert_eq!(compare(Some(&version), Some(&version)), Ordering::Equal);
    }

    #[test]
    fn parse_empty_is_none() {
        assert_eq!(parse("").expect("empty"), None);
        assert_eq!(parse("   ").expect("whitespace"), None);
    }

    #[test]
    fn parse_valid_version() {
        assert_eq!(parse("1.2.3").expect("valid"), Some(v("1.2.3")));
        assert_eq!(parse(" 1.2.3 ").expect("trimmed"), Some(v("1.2.3")));
    }

    #[test]
    fn parse_garbage_reports_the_input() {
        let err = parse("not-a-version").unwrap_err();
        assert!(err.to_string().contains("not-a-version"));
    }
}
