//! Counting contributor names in the release-notes acknowledgement block.
//!
//! The names live in one dense paragraph ("Thanks to ... Alice, Bob, Carol
//! [bot], and Dave ..."). Detection leans on that density: a block with more
//! than [`MIN_COMMAS`] commas and more than [`MIN_BLOCK_LEN`] characters is
//! taken to be the enumeration. The thresholds are fragile against markup
//! changes on the documentation site, and deliberately so; see DESIGN.md.

use crate::post_gen::dom::{DocIndex, own_text, text_of, trimmed_text};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// A name enumeration has more commas than this.
const MIN_COMMAS: usize = 10;

/// ... and more characters than this.
const MIN_BLOCK_LEN: usize = 200;

/// Sibling hops checked immediately after the anchor heading.
const SIBLING_HOPS: usize = 5;

/// Document-order hops checked after that.
const FOLLOWING_HOPS: usize = 10;

/// Anchor patterns for the contributors section, tried in order.
static ANCHOR_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)code.*documentation.*contributor",
        r"(?i)contributor",
        r"(?i)thanks.*contributor",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid pattern"))
    .collect()
});

static FALLBACK_ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)code.*documentation.*contributor").expect("valid pattern"));

/// Leading/trailing boilerplate strippers, applied in order.
static LEADING_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^.*?code.*documentation.*contributor.*?:?\s*").expect("valid pattern"));
static LEADING_THANKS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^.*?thanks to.*?:?\s*").expect("valid pattern"));
static LEADING_INCLUDING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^.*?including\s+").expect("valid pattern"));
static TRAILING_WHO_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\s+who.*$").expect("valid pattern"));
static TRAILING_INCLUDING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+including.*$").expect("valid pattern"));
static AND_SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\s+and\s+").expect("valid pattern"));

/// Tokens that are grammar or boilerplate, never names.
const STOP_WORDS: [&str; 24] = [
    "the",
    "and",
    "or",
    "by",
    "to",
    "of",
    "in",
    "on",
    "at",
    "for",
    "with",
    "from",
    "including",
    "thanks",
    "everyone",
    "who",
    "has",
    "have",
    "contributed",
    "maintenance",
    "improvement",
    "since",
    "version",
    "project",
];

/// Counts distinct contributor names mentioned in the release notes.
///
/// Returns 0 when no contributors section or no name enumeration can be
/// located; absence is not an error.
pub fn count_contributors(document: &Html) -> usize {
    let index = DocIndex::new(document);

    let Some(anchor) = find_anchor(&index) else {
        return 0;
    };
    let Some(block) = find_name_block(&index, anchor) else {
        return 0;
    };

    let names = parse_names(&text_of(block));
    tracing::debug!(count = names.len(), "parsed contributor names");
    names.len()
}

/// Finds the heading (or text block) that anchors the contributors section.
fn find_anchor<'a>(index: &DocIndex<'a>) -> Option<ElementRef<'a>> {
    for pattern in ANCHOR_PATTERNS.iter() {
        let anchor = index
            .elements()
            .iter()
            .find(|el| {
                matches!(el.value().name(), "h2" | "h3" | "h4" | "h5") && pattern.is_match(&trimmed_text(**el))
            })
            .copied();
        if anchor.is_some() {
            return anchor;
        }
    }

    // Fallback: any block element whose own text mentions the section.
    index
        .elements()
        .iter()
        .find(|el| {
            matches!(el.value().name(), "h2" | "h3" | "h4" | "h5" | "p" | "div")
                && FALLBACK_ANCHOR_RE.is_match(&own_text(**el))
        })
        .copied()
}

/// Searches forward from the anchor for the dense comma-separated block:
/// first nearby siblings, then following elements, then paragraphs inside
/// the anchor's enclosing container.
fn find_name_block<'a>(index: &DocIndex<'a>, anchor: ElementRef<'a>) -> Option<ElementRef<'a>> {
    let sibling = anchor
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "p" | "div"))
        .take(SIBLING_HOPS)
        .find(|el| looks_like_name_block(*el));
    if sibling.is_some() {
        return sibling;
    }

    if let Some(pos) = index.position(anchor) {
        let following = index
            .following(pos, &["p", "div"])
            .into_iter()
            .map(|(_, el)| el)
            .take(FOLLOWING_HOPS)
            .find(|el| looks_like_name_block(*el));
        if following.is_some() {
            return following;
        }
    }

    let container = anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| matches!(el.value().name(), "div" | "section" | "article"))?;
    let paragraphs = Selector::parse("p").ok()?;
    container.select(&paragraphs).find(|el| looks_like_name_block(*el))
}

fn looks_like_name_block(element: ElementRef) -> bool {
    let text = text_of(element);
    text.contains(',') && text.chars().count() > MIN_BLOCK_LEN && text.matches(',').count() > MIN_COMMAS
}

/// Parses the enumeration text into name tokens.
fn parse_names(block_text: &str) -> Vec<String> {
    let mut text = LEADING_HEADING_RE.replace(block_text, "").into_owned();
    text = LEADING_THANKS_RE.replace(&text, "").into_owned();
    text = LEADING_INCLUDING_RE.replace(&text, "").into_owned();
    text = TRAILING_WHO_RE.replace(&text, "").into_owned();
    text = TRAILING_INCLUDING_RE.replace(&text, "").into_owned();
    text = AND_SEPARATOR_RE.replace_all(&text, ", ").into_owned();

    split_outside_brackets(&text)
        .into_iter()
        .filter_map(|raw| {
            let name = raw.trim().trim_end_matches(['.', ',', ';', ':']).trim();
            is_name_like(name).then(|| name.to_string())
        })
        .collect()
}

/// Splits on commas, except commas inside a bracketed annotation so that
/// "Carol [bot]" style suffixes stay attached.
fn split_outside_brackets(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

fn is_name_like(token: &str) -> bool {
    if token.chars().count() < 2 {
        return false;
    }

    let lower = token.to_lowercase();
    if STOP_WORDS.contains(&lower.as_str()) {
        return false;
    }
    if lower.starts_with("including") || lower.starts_with("thanks") || lower.starts_with("the ") {
        return false;
    }

    // "[bot]" is a legitimate suffix; any other digit or bracket is an
    // artifact of markup, version numbers, or footnotes.
    let without_bot = token.replace("[bot]", "");
    if without_bot.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    if without_bot.chars().any(|c| "<>{}[]()".contains(c)) {
        return false;
    }

    true
}
