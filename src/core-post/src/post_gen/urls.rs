//! Deterministic URL construction for the two documentation pages.

use crate::post_gen::errors::Result;
use url::Url;

/// Builds the release-notes page URL for a version.
///
/// The fragment uses the dashed form of the version, matching the anchor the
/// documentation site generates for the "Release notes" section.
///
/// # Errors
///
/// Returns an error if `base` is not a valid URL.
///
/// # Examples
///
/// ```
/// # use core_post::post_gen::release_notes_url;
/// let url = release_notes_url("https://scikit-learn.org/stable", "1.8").unwrap();
/// assert_eq!(
///     url,
///     "https://scikit-learn.org/stable/whats_new/v1.8.html#release-notes-1-8"
/// );
/// ```
pub fn release_notes_url(base: &str, version: &str) -> Result<String> {
    let base = normalize_base(base)?;
    let dashed = version.replace('.', "-");
    Ok(format!("{base}/whats_new/v{version}.html#release-notes-{dashed}"))
}

/// Builds the release-highlights example page URL for a version.
///
/// The page name uses the underscored form of the version.
///
/// # Errors
///
/// Returns an error if `base` is not a valid URL.
///
/// # Examples
///
/// ```
/// # use core_post::post_gen::release_highlights_url;
/// let url = release_highlights_url("https://scikit-learn.org/stable", "1.8").unwrap();
/// assert_eq!(
///     url,
///     "https://scikit-learn.org/stable/auto_examples/release_highlights/plot_release_highlights_1_8_0.html"
/// );
/// ```
pub fn release_highlights_url(base: &str, version: &str) -> Result<String> {
    let base = normalize_base(base)?;
    let underscored = version.replace('.', "_");
    Ok(format!(
        "{base}/auto_examples/release_highlights/plot_release_highlights_{underscored}_0.html"
    ))
}

/// Validates the base URL and strips any trailing slash.
fn normalize_base(base: &str) -> Result<String> {
    let parsed = Url::parse(base)?;
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
