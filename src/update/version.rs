//! Version ordering and latest-version selection
//!
//! Registry version strings are compared as semantic versions. A single
//! leading tag letter (as in `v1.2.3`) is ignored for ordering but kept in
//! the returned string.

use semver::Version;
use std::cmp::Ordering;

/// Parse a version string, ignoring a leading tag letter such as `v`
pub fn parse_version(version: &str) -> Option<Version> {
    let trimmed = version.trim();
    let mut chars = trimmed.chars();
    let stripped = match (chars.next(), chars.next()) {
        (Some(c), Some(d)) if c.is_ascii_alphabetic() && d.is_ascii_digit() => &trimmed[1..],
        _ => trimmed,
    };
    Version::parse(stripped).ok()
}

/// Compare two version strings using semver precedence
///
/// Returns `None` if either side is not a semantic version.
pub fn compare_versions(a: &str, b: &str) -> Option<Ordering> {
    Some(parse_version(a)?.cmp_precedence(&parse_version(b)?))
}

/// Check whether a version string carries a pre-release tag
pub fn is_prerelease_version(version: &str) -> bool {
    match parse_version(version) {
        Some(v) => !v.pre.is_empty(),
        None => {
            let lower = version.to_lowercase();
            ["alpha", "beta", "rc", "canary", "dev", "next", "nightly"]
                .iter()
                .any(|tag| lower.contains(tag))
        }
    }
}

/// Select the highest version from a registry listing
///
/// Pre-releases are only candidates when `current` is itself a pre-release.
/// Entries that are not semantic versions are ignored.
pub fn select_latest<'a, I>(current: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let allow_prerelease = is_prerelease_version(current);

    candidates
        .into_iter()
        .filter_map(|raw| parse_version(raw).map(|parsed| (raw, parsed)))
        .filter(|(_, parsed)| allow_prerelease || parsed.pre.is_empty())
        .max_by(|(_, a), (_, b)| a.cmp_precedence(b))
        .map(|(raw, _)| raw.clone())
}
