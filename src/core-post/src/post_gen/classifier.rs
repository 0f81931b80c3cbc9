//! Classifying changelog list items into the six fixed tag categories.

use crate::post_gen::dom::{DocIndex, HEADING_NAMES, text_of, trimmed_text};
use crate::post_gen::section::{ANY_VERSION_RE, find_version_section, legend_items};
use regex::Regex;
use scraper::{ElementRef, Html};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// The six changelog tag labels, as they appear in rendered entries.
pub const CATEGORY_LABELS: [&str; 6] = [
    "Major Feature",
    "Feature",
    "Efficiency",
    "Enhancement",
    "Fix",
    "API Change",
];

/// Dispatch order for classification. More specific labels first, so
/// "Major Feature" never counts as a bare "Feature".
const DISPATCH_ORDER: [&str; 6] = [
    "Major Feature",
    "API Change",
    "Feature",
    "Efficiency",
    "Enhancement",
    "Fix",
];

/// How many preceding headings to walk when deciding which version section
/// a list item belongs to.
const OWNERSHIP_LOOKBACK: usize = 50;

/// Compiled (label, pattern) pairs, evaluated in priority order with
/// first-match-wins semantics. A label matches at the very start of the item
/// text, or immediately after a module-path-like dotted token (changelog
/// entries lead with the affected submodule).
static CATEGORY_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    DISPATCH_ORDER
        .iter()
        .map(|label| {
            let escaped = regex::escape(label);
            let pattern = format!(
                r"(?im)^\s*\b{escaped}\b|[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z0-9_]+)+.*?\b{escaped}\b"
            );
            (*label, Regex::new(&pattern).expect("valid pattern"))
        })
        .collect()
});

static CONTRIBUTOR_HEADING_MARKER: &str = "code and documentation contributor";

/// Per-category counts for one version section.
///
/// Immutable once returned from [`count_tags`]; every label from
/// [`CATEGORY_LABELS`] is present, zero-count categories included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCounts {
    counts: BTreeMap<&'static str, usize>,
}

impl Default for TagCounts {
    fn default() -> Self {
        Self {
            counts: CATEGORY_LABELS.iter().map(|label| (*label, 0)).collect(),
        }
    }
}

impl TagCounts {
    /// Count for one category label (0 for unknown labels).
    pub fn get(&self, label: &str) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Sum over all categories.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    fn bump(&mut self, label: &'static str) {
        *self.counts.entry(label).or_insert(0) += 1;
    }
}

/// Counts changelog tags in the section belonging to `version`.
///
/// Legend items and entries from patch releases or other versions are never
/// counted. When the primary version heading is missing entirely, the whole
/// document is scanned instead (still excluding the legend). Items matching
/// no category are silently uncategorized; that is expected, not an error.
pub fn count_tags(document: &Html, version: &str) -> TagCounts {
    let index = DocIndex::new(document);
    let mut counts = TagCounts::default();

    let boundary = find_version_section(&index, version);
    if boundary.is_none() {
        tracing::debug!(version, "primary version heading not found, scanning whole document");
    }

    let legend = legend_items(&index);
    let start_pos = boundary.and_then(|b| index.position(b.start));

    let items: Vec<(usize, ElementRef)> = match start_pos {
        Some(pos) => index.following(pos, &["li"]),
        None => index
            .elements()
            .iter()
            .enumerate()
            .filter(|(_, el)| el.value().name() == "li")
            .map(|(i, el)| (i, *el))
            .collect(),
    };

    for (item_pos, item) in items {
        if legend.iter().any(|l| l.id() == item.id()) {
            continue;
        }

        let prev_headings = index.preceding_headings(item_pos, &HEADING_NAMES, OWNERSHIP_LOOKBACK);

        if let Some(b) = boundary {
            // Ownership walk: the start heading must appear before any other
            // version heading, nearest first.
            let mut belongs = false;
            let mut found_other_version = false;
            for heading in &prev_headings {
                if heading.id() == b.start.id() {
                    belongs = true;
                    break;
                }
                if ANY_VERSION_RE.is_match(&trimmed_text(*heading)) {
                    found_other_version = true;
                    break;
                }
            }

            if !belongs {
                if found_other_version {
                    // Items arrive in document order, so the document has
                    // moved past the target section.
                    break;
                }
                continue;
            }

            if let Some(end) = b.end
                && prev_headings.iter().any(|h| h.id() == end.id())
            {
                break;
            }
        }

        // Open boundary: the contributors heading marks the end of the
        // last changelog section.
        if boundary.is_none_or(|b| b.end.is_none())
            && prev_headings
                .iter()
                .any(|h| trimmed_text(*h).to_lowercase().contains(CONTRIBUTOR_HEADING_MARKER))
        {
            break;
        }

        let item_text = text_of(item);
        for &(label, ref pattern) in CATEGORY_PATTERNS.iter() {
            if pattern.is_match(&item_text) {
                counts.bump(label);
                break;
            }
        }
    }

    counts
}
