//! Harvesting short human-readable highlight sentences.
//!
//! The primary extractor works on the dedicated release-highlights page; the
//! fallback mines the release-notes page when the highlights page is missing
//! or yields too little. Both are stacks of length/phrase filters over
//! headings, list items and paragraphs, in that priority order.

use crate::post_gen::dom::{DocIndex, collapsed_text, has_ancestor_named, text_of};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Cap on highlights from the dedicated highlights page.
const MAX_PAGE_HIGHLIGHTS: usize = 7;

/// Cap on highlights mined from the release notes.
const MAX_NOTES_HIGHLIGHTS: usize = 6;

/// Page chrome whose descendants are never highlight material.
const CHROME_NAMES: [&str; 4] = ["nav", "header", "footer", "aside"];

/// Heading phrases that are navigation or gallery furniture, not highlights.
const SKIP_HEADING_PHRASES: [&str; 10] = [
    "contents",
    "navigation",
    "related",
    "examples",
    "download",
    "source code",
    "gallery",
    "previous",
    "next",
    "on this page",
];

/// List-item phrases marking site chrome.
const SKIP_ITEM_PHRASES: [&str; 10] = [
    "skip",
    "navigation",
    "menu",
    "back to top",
    "github",
    "choose version",
    "related projects",
    "previous",
    "next",
    "contents",
];

/// Paragraph phrases marking boilerplate.
const SKIP_PARAGRAPH_PHRASES: [&str; 9] = [
    "skip",
    "navigation",
    "menu",
    "back to top",
    "github",
    "choose version",
    "related projects",
    "copyright",
    "license",
];

/// Keywords that make a notes-page section heading read like a feature.
const FEATURE_KEYWORDS: [&str; 9] = [
    "support",
    "array api",
    "metadata routing",
    "improved",
    "enhanced",
    "custom",
    "plotting",
    "migration",
    "sparse",
];

static MAIN_CONTENT_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("(?i)section|content|body|document").expect("valid pattern"));

static ALL_CAPS_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z\s]{2,}$").expect("valid pattern"));
static ALL_CAPS_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z\s]{3,}$").expect("valid pattern"));

static BULLET_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\s*|^-\s*|^\d+\.\s*").expect("valid pattern"));
static LABEL_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(feature|enhancement|fix|improvement):\s*").expect("valid pattern"));

static RELEASE_HIGHLIGHTS_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("(?i)release.*highlight").expect("valid pattern"));

static MAJOR_FEATURE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bMajor Feature\b").expect("valid pattern"));
static MAJOR_FEATURE_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Major Feature[:\s]+").expect("valid pattern"));
static FEATURE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bFeature\b").expect("valid pattern"));
static FEATURE_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)Feature[:\s]+").expect("valid pattern"));
static SENTENCE_END_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("valid pattern"));

static MODULE_PATH_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*\.\w").expect("valid pattern"));
static MODULE_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*\.[A-Za-z_]").expect("valid pattern"));

static VERSION_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^Version \d+\.\d+").expect("valid pattern"));

/// Extracts highlights from the dedicated release-highlights page.
///
/// Page chrome is skipped, then headings (h2-h4), list items and paragraphs
/// are harvested from the main content area, in that priority order. The
/// result is deduplicated case-insensitively (first-seen casing wins) and
/// capped at 7 entries.
pub fn extract_highlights(document: &Html) -> Vec<String> {
    let index = DocIndex::new(document);
    let main_content = find_main_content(&index, document);
    let mut highlights: Vec<String> = Vec::new();

    if let Ok(selector) = Selector::parse("h2, h3, h4") {
        for heading in main_content.select(&selector) {
            if has_ancestor_named(heading, &CHROME_NAMES) {
                continue;
            }
            let text = collapsed_text(heading);
            let len = text.chars().count();
            let lower = text.to_lowercase();
            if len > 10
                && len < 150
                && !SKIP_HEADING_PHRASES.iter().any(|phrase| lower.contains(phrase))
                && !ALL_CAPS_HEADING_RE.is_match(&text)
            {
                highlights.push(text);
            }
        }
    }

    if let Ok(selector) = Selector::parse("li") {
        for item in main_content.select(&selector) {
            if has_ancestor_named(item, &CHROME_NAMES) {
                continue;
            }
            let text = collapsed_text(item);
            let len = text.chars().count();
            let lower = text.to_lowercase();
            if len > 20
                && len < 300
                && !SKIP_ITEM_PHRASES.iter().any(|phrase| lower.contains(phrase))
                && !ALL_CAPS_ITEM_RE.is_match(&text)
            {
                let text = BULLET_MARKER_RE.replace(&text, "").into_owned();
                let text = LABEL_PREFIX_RE.replace(&text, "").into_owned();
                if !text.is_empty() && !highlights.contains(&text) {
                    highlights.push(text);
                }
            }
        }
    }

    if let Ok(selector) = Selector::parse("p") {
        for paragraph in main_content.select(&selector) {
            if has_ancestor_named(paragraph, &CHROME_NAMES) {
                continue;
            }
            let text = collapsed_text(paragraph);
            let len = text.chars().count();
            let lower = text.to_lowercase();
            if len > 30
                && len < 250
                && !SKIP_PARAGRAPH_PHRASES.iter().any(|phrase| lower.contains(phrase))
                && !highlights.contains(&text)
            {
                highlights.push(text);
            }
        }
    }

    dedupe_case_insensitive(highlights, MAX_PAGE_HIGHLIGHTS)
}

/// Extracts highlights from the release-notes page itself.
///
/// Used when the highlights page is unreachable or yields fewer than 3
/// entries. Three sub-strategies are merged in order: a "Release Highlights"
/// block, "Major Feature"/"Feature" changelog entries, and feature-flavored
/// section headings. Capped at 6 entries.
pub fn extract_highlights_from_notes(document: &Html) -> Vec<String> {
    let index = DocIndex::new(document);
    let mut highlights: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    harvest_release_highlights_block(&index, &mut highlights, &mut seen);
    harvest_feature_entries(&index, &mut highlights, &mut seen);
    harvest_feature_headings(&index, &mut highlights, &mut seen);

    highlights.truncate(MAX_NOTES_HIGHLIGHTS);
    highlights
}

/// Strategy (a): list items / paragraphs under a "Release Highlights" heading.
fn harvest_release_highlights_block(index: &DocIndex, highlights: &mut Vec<String>, seen: &mut HashSet<String>) {
    let Some(heading) = index
        .elements()
        .iter()
        .find(|el| {
            matches!(el.value().name(), "h1" | "h2" | "h3")
                && RELEASE_HIGHLIGHTS_HEADING_RE.is_match(&collapsed_text(**el))
        })
        .copied()
    else {
        return;
    };

    let container = heading
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| matches!(el.value().name(), "div" | "section"))
        .unwrap_or(heading);

    let Ok(selector) = Selector::parse("li, p") else {
        return;
    };
    for item in container.select(&selector).take(10) {
        let text = collapsed_text(item);
        let len = text.chars().count();
        if len > 20 && len < 200 {
            let text = BULLET_MARKER_RE.replace(&text, "").into_owned();
            push_unseen(text, highlights, seen);
        }
    }
}

/// Strategy (b): descriptions lifted from "Major Feature" / "Feature"
/// changelog entries, scanning the first 50 list items.
fn harvest_feature_entries(index: &DocIndex, highlights: &mut Vec<String>, seen: &mut HashSet<String>) {
    let items = index
        .elements()
        .iter()
        .filter(|el| el.value().name() == "li")
        .take(50);

    for item in items {
        let item_text = text_of(*item);

        // Short fragments with a permalink marker are module headings.
        if item_text.contains('#') && item_text.chars().count() < 50 {
            continue;
        }

        if MAJOR_FEATURE_RE.is_match(&item_text) {
            if let Some(desc) = description_after(&MAJOR_FEATURE_SPLIT_RE, &item_text)
                && desc.chars().count() > 20
            {
                push_unseen(desc, highlights, seen);
            }
        } else if FEATURE_RE.is_match(&item_text) && !MODULE_PATH_START_RE.is_match(item_text.trim()) {
            let parts: Vec<&str> = FEATURE_SPLIT_RE.splitn(&item_text, 2).collect();
            if parts.len() > 1 {
                let raw = parts[1].trim();
                let head: String = raw.chars().take(30).collect();
                if raw.chars().count() > 25 && !MODULE_PATH_RE.is_match(&head) {
                    let desc = first_sentence_truncated(raw);
                    if desc.chars().count() > 20 && highlights.len() < MAX_NOTES_HIGHLIGHTS {
                        push_unseen(desc, highlights, seen);
                    }
                }
            }
        }
    }
}

/// Strategy (c): h2/h3 section headings that read like feature names.
fn harvest_feature_headings(index: &DocIndex, highlights: &mut Vec<String>, seen: &mut HashSet<String>) {
    let headings = index
        .elements()
        .iter()
        .filter(|el| matches!(el.value().name(), "h2" | "h3"));

    for heading in headings {
        let text = collapsed_text(*heading);
        let lower = text.to_lowercase();
        if VERSION_HEADING_RE.is_match(&text) || lower.contains("navigation") || text.contains('#') {
            continue;
        }

        let len = text.chars().count();
        if len > 10 && len < 100 && FEATURE_KEYWORDS.iter().any(|keyword| lower.contains(keyword)) {
            push_unseen(text, highlights, seen);
        }
    }
}

/// Splits off the text after a tag label, trimmed to its first sentence and
/// at most 150 characters.
fn description_after(split_re: &Regex, item_text: &str) -> Option<String> {
    let parts: Vec<&str> = split_re.splitn(item_text, 2).collect();
    if parts.len() > 1 {
        Some(first_sentence_truncated(parts[1].trim()))
    } else {
        None
    }
}

fn first_sentence_truncated(text: &str) -> String {
    let sentence = SENTENCE_END_RE.split(text).next().unwrap_or(text);
    sentence.chars().take(150).collect::<String>().trim().to_string()
}

fn push_unseen(text: String, highlights: &mut Vec<String>, seen: &mut HashSet<String>) {
    let key = text.to_lowercase();
    if !text.is_empty() && !seen.contains(&key) {
        seen.insert(key);
        highlights.push(text);
    }
}

/// Picks the main content area: a content-ish `div`, else `main`, `article`
/// or `body`, else the document root. Candidates inside page chrome never
/// qualify (theme sidebars carry content-ish class names too).
fn find_main_content<'a>(index: &DocIndex<'a>, document: &'a Html) -> ElementRef<'a> {
    let by_class = index.elements().iter().find(|el| {
        el.value().name() == "div"
            && !has_ancestor_named(**el, &CHROME_NAMES)
            && el
                .value()
                .attr("class")
                .is_some_and(|class| MAIN_CONTENT_CLASS_RE.is_match(class))
    });
    if let Some(el) = by_class {
        return *el;
    }

    for name in ["main", "article", "body"] {
        if let Ok(selector) = Selector::parse(name)
            && let Some(el) = document.select(&selector).find(|el| !has_ancestor_named(*el, &CHROME_NAMES))
        {
            return el;
        }
    }

    document.root_element()
}

fn dedupe_case_insensitive(items: Vec<String>, cap: usize) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::new();
    for item in items {
        let key = item.to_lowercase();
        if seen.insert(key) {
            unique.push(item);
        }
        if unique.len() == cap {
            break;
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_harvested_and_chrome_skipped() {
        let html = r#"<html><body>
            <nav><h2>Site navigation menu area</h2></nav>
            <main>
              <h2>Improved sparse solver performance</h2>
              <h2>ON THIS PAGE</h2>
              <h3>ALLCAPS HEADING</h3>
            </main>
        </body></html>"#;
        let document = Html::parse_document(html);
        let highlights = extract_highlights(&document);
        assert_eq!(highlights, vec!["Improved sparse solver performance"]);
    }

    #[test]
    fn test_content_div_inside_chrome_is_not_the_container() {
        let html = r#"<html><body>
            <nav><div class="sidebar-content"><ul><li>Section links and other sidebar furniture</li></ul></div></nav>
            <main><h2>Improved sparse solver performance</h2></main>
        </body></html>"#;
        let document = Html::parse_document(html);
        let highlights = extract_highlights(&document);
        assert_eq!(highlights, vec!["Improved sparse solver performance"]);
    }

    #[test]
    fn test_list_items_prefix_stripped() {
        let html = r#"<html><body><main>
            <ul><li>Feature: new estimator for quantile regression tasks</li></ul>
        </main></body></html>"#;
        let document = Html::parse_document(html);
        let highlights = extract_highlights(&document);
        assert_eq!(highlights, vec!["new estimator for quantile regression tasks"]);
    }

    #[test]
    fn test_dedup_is_case_insensitive_keeping_first_casing() {
        let html = r#"<html><body><main>
            <ul>
              <li>Improved solver for very large datasets</li>
              <li>improved SOLVER for very large datasets</li>
            </ul>
        </main></body></html>"#;
        let document = Html::parse_document(html);
        let highlights = extract_highlights(&document);
        assert_eq!(highlights, vec!["Improved solver for very large datasets"]);
    }

    #[test]
    fn test_page_highlights_capped_at_seven() {
        let mut body = String::from("<main>");
        for i in 0..10 {
            body.push_str(&format!("<h2>Notable improvement number {i} in this release</h2>"));
        }
        body.push_str("</main>");
        let document = Html::parse_document(&format!("<html><body>{body}</body></html>"));
        let highlights = extract_highlights(&document);
        assert_eq!(highlights.len(), 7);
    }

    #[test]
    fn test_paragraphs_harvested_after_items() {
        let html = r#"<html><body><main>
            <p>This release brings substantially faster tree building.</p>
            <ul><li>Histogram binning now runs in parallel everywhere</li></ul>
        </main></body></html>"#;
        let document = Html::parse_document(html);
        let highlights = extract_highlights(&document);
        assert_eq!(
            highlights,
            vec![
                "Histogram binning now runs in parallel everywhere",
                "This release brings substantially faster tree building.",
            ]
        );
    }

    #[test]
    fn test_notes_major_feature_description() {
        let html = r#"<html><body>
            <h2>Version 1.7.0</h2>
            <ul><li>Major Feature Added a brand new solver for sparse problems. See the guide.</li></ul>
        </body></html>"#;
        let document = Html::parse_document(html);
        let highlights = extract_highlights_from_notes(&document);
        // The sentence split consumes the terminator.
        assert_eq!(highlights, vec!["Added a brand new solver for sparse problems"]);
    }

    #[test]
    fn test_notes_feature_with_module_path_prefix_skipped() {
        let html = r#"<html><body>
            <h2>Version 1.7.0</h2>
            <ul><li>sklearn.cluster Feature something that applies to one submodule only here</li></ul>
        </body></html>"#;
        let document = Html::parse_document(html);
        let highlights = extract_highlights_from_notes(&document);
        assert!(highlights.is_empty());
    }

    #[test]
    fn test_notes_release_highlights_block() {
        let html = r#"<html><body><div>
            <h2>Release Highlights for 1.7</h2>
            <ul>
              <li>Quantile regression gains a dedicated estimator</li>
              <li>short</li>
            </ul>
        </div></body></html>"#;
        let document = Html::parse_document(html);
        let highlights = extract_highlights_from_notes(&document);
        assert!(
            highlights.contains(&"Quantile regression gains a dedicated estimator".to_string()),
            "{highlights:?}"
        );
        assert!(!highlights.iter().any(|h| h == "short"));
    }

    #[test]
    fn test_notes_feature_keyword_headings() {
        let html = r#"<html><body>
            <h2>Version 1.7.0</h2>
            <h2>Improved array api coverage</h2>
            <h2>Unrelated chapter title</h2>
        </body></html>"#;
        let document = Html::parse_document(html);
        let highlights = extract_highlights_from_notes(&document);
        assert_eq!(highlights, vec!["Improved array api coverage"]);
    }

    #[test]
    fn test_notes_highlights_capped_at_six() {
        let mut body = String::new();
        for i in 0..8 {
            body.push_str(&format!("<h2>Improved support for case number {i}</h2>"));
        }
        let document = Html::parse_document(&format!("<html><body>{body}</body></html>"));
        let highlights = extract_highlights_from_notes(&document);
        assert_eq!(highlights.len(), 6);
    }
}
