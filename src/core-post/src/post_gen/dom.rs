//! Document-order element index over a parsed HTML tree.
//!
//! The extraction heuristics need "all list items after this heading" and
//! "the previous N headings before this node" queries, which CSS selectors
//! alone cannot express. This module flattens the tree into a pre-order
//! (document order) element list once and answers both query shapes from it.

use scraper::{ElementRef, Html};

/// Heading tag names used for section-ownership walks.
pub const HEADING_NAMES: [&str; 3] = ["h1", "h2", "h3"];

/// A document-order index of every element in a parsed document.
///
/// Positions are indices into the pre-order traversal; a node's descendants
/// immediately follow it, matching the "following elements" semantics of the
/// extraction heuristics.
pub struct DocIndex<'a> {
    elements: Vec<ElementRef<'a>>,
    /// Positions (into `elements`) of every h1-h6 element, in document order.
    heading_positions: Vec<usize>,
}

impl<'a> DocIndex<'a> {
    /// Builds the index by walking the document tree in pre-order.
    pub fn new(document: &'a Html) -> Self {
        let elements: Vec<ElementRef<'a>> = document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .collect();

        let heading_positions = elements
            .iter()
            .enumerate()
            .filter(|(_, el)| is_heading(el.value().name()))
            .map(|(pos, _)| pos)
            .collect();

        Self {
            elements,
            heading_positions,
        }
    }

    /// All indexed elements, in document order.
    pub fn elements(&self) -> &[ElementRef<'a>] {
        &self.elements
    }

    /// Position of an element in document order, if it is indexed.
    pub fn position(&self, element: ElementRef<'a>) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == element.id())
    }

    /// Elements strictly after `pos` in document order whose tag name is in
    /// `names`, paired with their positions.
    pub fn following(&self, pos: usize, names: &[&str]) -> Vec<(usize, ElementRef<'a>)> {
        self.elements
            .iter()
            .enumerate()
            .skip(pos + 1)
            .filter(|(_, el)| names.contains(&el.value().name()))
            .map(|(i, el)| (i, *el))
            .collect()
    }

    /// Up to `limit` headings strictly before `pos`, nearest first, filtered
    /// to tag names in `names`.
    pub fn preceding_headings(&self, pos: usize, names: &[&str], limit: usize) -> Vec<ElementRef<'a>> {
        self.heading_positions
            .iter()
            .rev()
            .filter(|&&p| p < pos)
            .map(|&p| self.elements[p])
            .filter(|el| names.contains(&el.value().name()))
            .take(limit)
            .collect()
    }
}

fn is_heading(name: &str) -> bool {
    matches!(name, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

/// Concatenated text content of an element's subtree.
pub fn text_of(element: ElementRef) -> String {
    element.text().collect::<String>()
}

/// Text content with surrounding whitespace trimmed.
pub fn trimmed_text(element: ElementRef) -> String {
    text_of(element).trim().to_string()
}

/// Text content with internal whitespace runs collapsed to single spaces.
pub fn collapsed_text(element: ElementRef) -> String {
    text_of(element).split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text from the element's direct text-node children only (no descendants).
pub fn own_text(element: ElementRef) -> String {
    element
        .children()
        .filter_map(|child| child.value().as_text().map(|t| t.text.to_string()))
        .collect::<String>()
        .trim()
        .to_string()
}

/// True if any ancestor element has a tag name in `names`.
pub fn has_ancestor_named(element: ElementRef, names: &[&str]) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| names.contains(&ancestor.value().name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<html><body>
        <h2>First</h2>
        <ul><li>alpha</li><li>beta</li></ul>
        <h2>Second</h2>
        <p>text</p>
        <li>gamma</li>
    </body></html>"#;

    #[test]
    fn test_following_respects_document_order() {
        let document = Html::parse_document(DOC);
        let index = DocIndex::new(&document);

        let first = index
            .elements()
            .iter()
            .find(|el| el.value().name() == "h2" && trimmed_text(**el) == "First")
            .copied()
            .unwrap();
        let pos = index.position(first).unwrap();

        let items: Vec<String> = index
            .following(pos, &["li"])
            .into_iter()
            .map(|(_, el)| trimmed_text(el))
            .collect();
        assert_eq!(items, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_following_excludes_earlier_elements() {
        let document = Html::parse_document(DOC);
        let index = DocIndex::new(&document);

        let second = index
            .elements()
            .iter()
            .find(|el| el.value().name() == "h2" && trimmed_text(**el) == "Second")
            .copied()
            .unwrap();
        let pos = index.position(second).unwrap();

        let items: Vec<String> = index
            .following(pos, &["li"])
            .into_iter()
            .map(|(_, el)| trimmed_text(el))
            .collect();
        assert_eq!(items, vec!["gamma"]);
    }

    #[test]
    fn test_preceding_headings_nearest_first() {
        let document = Html::parse_document(DOC);
        let index = DocIndex::new(&document);

        let para = index
            .elements()
            .iter()
            .find(|el| el.value().name() == "p")
            .copied()
            .unwrap();
        let pos = index.position(para).unwrap();

        let headings: Vec<String> = index
            .preceding_headings(pos, &HEADING_NAMES, 50)
            .into_iter()
            .map(trimmed_text)
            .collect();
        assert_eq!(headings, vec!["Second", "First"]);
    }

    #[test]
    fn test_preceding_headings_limit() {
        let document = Html::parse_document(DOC);
        let index = DocIndex::new(&document);

        let para = index
            .elements()
            .iter()
            .find(|el| el.value().name() == "p")
            .copied()
            .unwrap();
        let pos = index.position(para).unwrap();

        let headings = index.preceding_headings(pos, &HEADING_NAMES, 1);
        assert_eq!(headings.len(), 1);
        assert_eq!(trimmed_text(headings[0]), "Second");
    }

    #[test]
    fn test_has_ancestor_named() {
        let html = r#"<html><body><nav><ul><li>menu</li></ul></nav><li>content</li></body></html>"#;
        let document = Html::parse_document(html);
        let index = DocIndex::new(&document);

        let items: Vec<_> = index
            .elements()
            .iter()
            .filter(|el| el.value().name() == "li")
            .copied()
            .collect();
        assert_eq!(items.len(), 2);
        assert!(has_ancestor_named(items[0], &["nav", "header", "footer", "aside"]));
        assert!(!has_ancestor_named(items[1], &["nav", "header", "footer", "aside"]));
    }

    #[test]
    fn test_own_text_excludes_descendants() {
        let html = r#"<html><body><div>outer <p>inner</p></div></body></html>"#;
        let document = Html::parse_document(html);
        let index = DocIndex::new(&document);

        let div = index
            .elements()
            .iter()
            .find(|el| el.value().name() == "div")
            .copied()
            .unwrap();
        assert_eq!(own_text(div), "outer");
    }
}
