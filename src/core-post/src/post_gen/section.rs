//! Locating one version's changelog section amid sibling versions.
//!
//! Release-notes pages stack every release of a series on a single page:
//! "Version 1.7.0" is followed by "Version 1.7.1", "Version 1.7.2", and so
//! on, plus a tag legend near the top. The locator finds the primary
//! release heading and the heading that ends its section, so the classifier
//! only counts entries belonging to the requested release.

use crate::post_gen::dom::{DocIndex, trimmed_text};
use regex::Regex;
use scraper::ElementRef;
use std::sync::LazyLock;

/// Heading levels searched for the primary release heading, in preference
/// order. h2 is what the site currently emits.
const VERSION_HEADING_LEVELS: [&str; 3] = ["h2", "h3", "h1"];

/// Matches any patch-release heading, e.g. "Version 1.7.1" or
/// "Version 1.7.2#" (headings may carry a trailing permalink marker).
static PATCH_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Version \d+\.\d+\.\d+#?$").expect("valid pattern"));

/// Matches any version heading, primary or patch.
pub(crate) static ANY_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Version \d+\.\d+").expect("valid pattern"));

static LEGEND_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new("(?i)legend").expect("valid pattern"));

static LEGEND_PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("(?i)legend for changelog").expect("valid pattern"));

/// The start/end boundary of one version's changelog subtree.
///
/// `end` is `None` when the section runs to the end of the document (the
/// classifier then stops at the contributors heading instead).
#[derive(Debug, Clone, Copy)]
pub struct SectionBoundary<'a> {
    pub start: ElementRef<'a>,
    pub end: Option<ElementRef<'a>>,
}

/// Finds the primary release section for `version` ("MAJOR.MINOR").
///
/// The start heading must read exactly `Version {MAJOR.MINOR}.0`, optionally
/// with a trailing permalink marker; patch-release headings never match. The
/// end boundary is the first same-level heading for a patch release of the
/// same series, else the heading of the next minor release, else absent.
///
/// Returns `None` when no primary heading exists; callers fall back to
/// treating the whole document as the section.
pub fn find_version_section<'a>(index: &DocIndex<'a>, version: &str) -> Option<SectionBoundary<'a>> {
    let escaped = regex::escape(version);
    let primary_re = Regex::new(&format!(r"(?i)^Version {escaped}\.0#?$")).ok()?;

    let (level, start) = VERSION_HEADING_LEVELS.iter().find_map(|level| {
        index
            .elements()
            .iter()
            .find(|el| el.value().name() == *level && primary_re.is_match(&trimmed_text(**el)))
            .map(|el| (*level, *el))
    })?;

    let same_level: Vec<ElementRef<'a>> = index
        .elements()
        .iter()
        .filter(|el| el.value().name() == level)
        .copied()
        .collect();
    let start_idx = same_level.iter().position(|el| el.id() == start.id())?;

    // Patch release of the same series ends the section.
    let mut end = same_level[start_idx + 1..]
        .iter()
        .find(|el| {
            let text = trimmed_text(**el);
            PATCH_VERSION_RE.is_match(&text) && text.contains(version)
        })
        .copied();

    // Otherwise the next minor release does. A malformed version string
    // skips this search and leaves the boundary open.
    if end.is_none()
        && let Some((major, minor)) = parse_major_minor(version)
    {
        let next_minor_re = Regex::new(&format!(r"(?i)^Version {major}\.{}#?$", minor + 1)).ok()?;
        end = same_level
            .iter()
            .filter(|el| el.id() != start.id())
            .find(|el| next_minor_re.is_match(&trimmed_text(**el)))
            .copied();
    }

    Some(SectionBoundary { start, end })
}

fn parse_major_minor(version: &str) -> Option<(u32, u32)> {
    let (major, minor) = version.split_once('.')?;
    Some((major.trim().parse().ok()?, minor.trim().parse().ok()?))
}

/// Computes the legend exclusion set: list items explaining the changelog
/// tags rather than recording changes.
///
/// A legend is anchored by an h2 containing "Legend", a `div` with a
/// legend-ish class, or a "Legend for changelog" paragraph; its items are
/// the first list following the anchor. Without such an anchor, every list
/// item that precedes the first version heading is treated as legend
/// material (the legend is the only list above the first release on these
/// pages).
pub fn legend_items<'a>(index: &DocIndex<'a>) -> Vec<ElementRef<'a>> {
    if let Some(anchor) = find_legend_anchor(index)
        && let Some(pos) = index.position(anchor)
        && let Some((list_pos, _)) = index.following(pos, &["ul", "ol"]).into_iter().next()
    {
        return index
            .following(list_pos, &["li"])
            .into_iter()
            .map(|(_, el)| el)
            .filter(|el| descends_from(*el, index.elements()[list_pos]))
            .collect();
    }

    // Fallback: items above the first version heading.
    let first_version_pos = index.elements().iter().position(|el| {
        matches!(el.value().name(), "h1" | "h2") && ANY_VERSION_RE.is_match(&trimmed_text(*el))
    });

    match first_version_pos {
        Some(boundary) => index.elements()[..boundary]
            .iter()
            .filter(|el| el.value().name() == "li")
            .copied()
            .collect(),
        None => Vec::new(),
    }
}

fn find_legend_anchor<'a>(index: &DocIndex<'a>) -> Option<ElementRef<'a>> {
    index
        .elements()
        .iter()
        .find(|el| el.value().name() == "h2" && LEGEND_RE.is_match(&trimmed_text(**el)))
        .or_else(|| {
            index.elements().iter().find(|el| {
                el.value().name() == "div"
                    && el.value().attr("class").is_some_and(|c| LEGEND_RE.is_match(c))
            })
        })
        .or_else(|| {
            index
                .elements()
                .iter()
                .find(|el| el.value().name() == "p" && LEGEND_PARAGRAPH_RE.is_match(&trimmed_text(**el)))
        })
        .copied()
}

fn descends_from(element: ElementRef, ancestor: ElementRef) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| a.id() == ancestor.id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const NOTES: &str = r#"<html><body>
        <h2>Legend for changelogs</h2>
        <ul><li>Major Feature: something big</li><li>Fix: a bug fix</li></ul>
        <h2>Version 1.7.0#</h2>
        <ul><li>Feature one</li></ul>
        <h2>Version 1.7.1#</h2>
        <ul><li>Patch fix</li></ul>
        <h2>Version 1.6.0#</h2>
    </body></html>"#;

    #[test]
    fn test_end_boundary_is_patch_heading() {
        let document = Html::parse_document(NOTES);
        let index = DocIndex::new(&document);

        let boundary = find_version_section(&index, "1.7").unwrap();
        assert_eq!(trimmed_text(boundary.start), "Version 1.7.0#");
        assert_eq!(trimmed_text(boundary.end.unwrap()), "Version 1.7.1#");
    }

    #[test]
    fn test_primary_heading_is_not_patch() {
        let html = r#"<html><body>
            <h2>Version 1.7.1#</h2>
            <h2>Version 1.7.0</h2>
        </body></html>"#;
        let document = Html::parse_document(html);
        let index = DocIndex::new(&document);

        let boundary = find_version_section(&index, "1.7").unwrap();
        assert_eq!(trimmed_text(boundary.start), "Version 1.7.0");
    }

    #[test]
    fn test_next_minor_ends_section_when_no_patch() {
        let html = r#"<html><body>
            <h2>Version 1.7.0</h2>
            <h2>Version 1.8#</h2>
        </body></html>"#;
        let document = Html::parse_document(html);
        let index = DocIndex::new(&document);

        let boundary = find_version_section(&index, "1.7").unwrap();
        assert_eq!(trimmed_text(boundary.end.unwrap()), "Version 1.8#");
    }

    #[test]
    fn test_open_boundary_when_last_section() {
        let html = r#"<html><body><h2>Version 1.7.0</h2><ul><li>entry</li></ul></body></html>"#;
        let document = Html::parse_document(html);
        let index = DocIndex::new(&document);

        let boundary = find_version_section(&index, "1.7").unwrap();
        assert!(boundary.end.is_none());
    }

    #[test]
    fn test_missing_section() {
        let html = r#"<html><body><h2>Version 1.6.0</h2></body></html>"#;
        let document = Html::parse_document(html);
        let index = DocIndex::new(&document);

        assert!(find_version_section(&index, "1.7").is_none());
    }

    #[test]
    fn test_malformed_minor_leaves_boundary_open() {
        let html = r#"<html><body>
            <h2>Version 1.x.0</h2>
            <h2>Version 1.8#</h2>
        </body></html>"#;
        let document = Html::parse_document(html);
        let index = DocIndex::new(&document);

        let boundary = find_version_section(&index, "1.x").unwrap();
        assert!(boundary.end.is_none());
    }

    #[test]
    fn test_legend_items_from_anchor() {
        let document = Html::parse_document(NOTES);
        let index = DocIndex::new(&document);

        let legend = legend_items(&index);
        let texts: Vec<String> = legend.into_iter().map(trimmed_text).collect();
        assert_eq!(texts, vec!["Major Feature: something big", "Fix: a bug fix"]);
    }

    #[test]
    fn test_legend_fallback_before_first_version_heading() {
        let html = r#"<html><body>
            <ul><li>Fix: explanation</li></ul>
            <h2>Version 1.7.0</h2>
            <ul><li>Fix actual bug</li></ul>
        </body></html>"#;
        let document = Html::parse_document(html);
        let index = DocIndex::new(&document);

        let legend = legend_items(&index);
        assert_eq!(legend.len(), 1);
        assert_eq!(trimmed_text(legend[0]), "Fix: explanation");
    }
}
