//! Filename derivation and suffix filtering for image URLs.
//!
//! Filenames are taken verbatim from the URL path (no sanitization beyond
//! lowercasing), so two URLs with the same trailing segment on different hosts
//! resolve to the same file and the last writer wins.

use super::constants::ELIGIBLE_SUFFIX;

/// Derives the local filename for a URL.
///
/// Splits on `/`, keeps the last non-empty segment and lowercases it. A URL
/// without any `/` is used whole. A URL made only of separators resolves to an
/// empty string, which is never eligible.
#[must_use]
pub fn resolve_filename(url: &str) -> String {
    url.rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or_default()
        .to_lowercase()
}

/// Returns true if the filename qualifies for download.
#[must_use]
pub fn is_eligible(filename: &str) -> bool {
    filename.to_lowercase().ends_with(ELIGIBLE_SUFFIX)
}
