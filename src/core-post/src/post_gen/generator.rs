//! Composing one full post from already-fetched documents.

use crate::post_gen::classifier::count_tags;
use crate::post_gen::contributors::count_contributors;
use crate::post_gen::highlights::{extract_highlights, extract_highlights_from_notes};
use crate::post_gen::render::render_post;
use scraper::Html;

/// A run below this many page highlights falls back to the notes page.
const MIN_PAGE_HIGHLIGHTS: usize = 3;

/// Generates the post text from the fetched release-notes document and,
/// when available, the release-highlights document.
///
/// `highlights_page` is `None` when that page could not be fetched; the post
/// is still complete, with highlights mined from the notes page instead. The
/// same fallback applies when the page yields fewer than 3 highlights.
pub fn generate_post(
    version: &str,
    notes: &Html,
    highlights_page: Option<&Html>,
    notes_url: &str,
    highlights_url: &str,
) -> String {
    let counts = count_tags(notes, version);
    let contributors = count_contributors(notes);

    let mut highlights = highlights_page.map(extract_highlights).unwrap_or_default();
    if highlights.len() < MIN_PAGE_HIGHLIGHTS {
        tracing::debug!(
            found = highlights.len(),
            "too few page highlights, mining the release notes"
        );
        highlights = extract_highlights_from_notes(notes);
    }

    render_post(version, &counts, contributors, &highlights, notes_url, highlights_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTES: &str = r#"<html><body>
        <h2>Version 1.7.0</h2>
        <ul>
          <li>Major Feature Added a brand new solver for sparse problems. See the guide.</li>
          <li>Fix broken thing.</li>
        </ul>
    </body></html>"#;

    #[test]
    fn test_missing_highlights_page_still_renders_full_post() {
        let notes = Html::parse_document(NOTES);
        let post = generate_post("1.7", &notes, None, "https://notes", "https://highlights");

        assert!(post.starts_with("🚀 scikit-learn 1.7 is out 🚀"));
        assert!(post.contains("▶️ Added a brand new solver for sparse problems"));
        assert!(post.contains("🟢 1 new major feature"));
        assert!(post.contains("🔴 1 fix"));
        assert!(post.ends_with("#scikitlearn #MachineLearning #opensource #DataScience #Python #ML"));
    }

    #[test]
    fn test_sparse_highlights_page_falls_back_to_notes() {
        let notes = Html::parse_document(NOTES);
        let page = Html::parse_document(
            r#"<html><body><main><h2>Only one notable improvement here</h2></main></body></html>"#,
        );
        let post = generate_post("1.7", &notes, Some(&page), "https://notes", "https://highlights");

        assert!(post.contains("▶️ Added a brand new solver for sparse problems"));
    }

    #[test]
    fn test_rich_highlights_page_is_used_directly() {
        let notes = Html::parse_document(NOTES);
        let page = Html::parse_document(
            r#"<html><body><main>
                <h2>Improved sparse solver performance</h2>
                <h2>Metadata routing everywhere now</h2>
                <h2>Array api support expanded further</h2>
            </main></body></html>"#,
        );
        let post = generate_post("1.7", &notes, Some(&page), "https://notes", "https://highlights");

        assert!(post.contains("▶️ Improved sparse solver performance"));
        assert!(!post.contains("▶️ Added a brand new solver"));
    }
}
