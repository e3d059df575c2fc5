//! Correct answer detection for choice lists
//!
//! A list item counts as correct when any of these holds, checked in order:
//!
//! 1. it contains a checkbox `input` whose `checked` attribute is set;
//! 2. its text starts with `[X]` or `[x]` (leading whitespace ignored);
//! 3. its text starts with a raw store reference whose stored fragment
//!    contains `checked` (task list renderers stash their checkbox markup).
//!
//! When several items qualify the last one wins.

use quizmark_tree::stash::split_reference;
use quizmark_tree::{NodeId, RawStore, Tree};

/// Markers a choice item may start with
pub const MARKERS: [&str; 3] = ["[ ]", "[X]", "[x]"];
/// Markers flagging the correct choice
pub const CHECKED_MARKERS: [&str; 2] = ["[X]", "[x]"];

/// Locate the choice list inside a submission form
///
/// Prefers the first `ul`; falls back to the first element classed
/// `task-list`.
pub fn find_choice_list(tree: &Tree, form: NodeId) -> Option<NodeId> {
    tree.find_descendant(form, |t, id| t.is_tag(id, "ul"))
        .or_else(|| tree.find_descendant(form, |t, id| t.has_class(id, "task-list")))
}

/// The `li` children of a list
pub fn choice_items(tree: &Tree, list: NodeId) -> Vec<NodeId> {
    tree.children(list)
        .iter()
        .copied()
        .filter(|item| tree.is_tag(*item, "li"))
        .collect()
}

/// Decides which choice item holds the correct answer
pub struct AnswerExtractor<'s> {
    store: &'s RawStore,
}

impl<'s> AnswerExtractor<'s> {
    /// Create an extractor resolving stash references against `store`
    pub fn new(store: &'s RawStore) -> Self {
        Self { store }
    }

    /// Check whether one item is marked as correct
    pub fn is_correct(&self, tree: &Tree, item: NodeId) -> bool {
        if has_checked_checkbox(tree, item) {
            return true;
        }
        let Some(text) = tree.text(item) else {
            return false;
        };
        has_checked_marker(text) || self.has_checked_reference(text)
    }

    /// Index of the correct item among `(index, item)` candidates
    ///
    /// Every qualifying item overwrites the previous result, so the last
    /// qualifying candidate in iteration order is returned.
    pub fn extract<I>(&self, tree: &Tree, candidates: I) -> Option<usize>
    where
        I: IntoIterator<Item = (usize, NodeId)>,
    {
        let mut answer = None;
        for (index, item) in candidates {
            if self.is_correct(tree, item) {
                answer = Some(index);
            }
        }
        answer
    }

    fn has_checked_reference(&self, text: &str) -> bool {
        split_reference(text)
            .and_then(|(reference, _)| self.store.lookup(reference))
            .is_some_and(|fragment| fragment.contains("checked"))
    }
}

fn has_checked_checkbox(tree: &Tree, item: NodeId) -> bool {
    tree.find_descendant(item, |t, id| {
        t.is_tag(id, "input") && t.get_attr(id, "type") == Some("checkbox")
    })
    .is_some_and(|input| tree.has_attr(input, "checked"))
}

fn has_checked_marker(text: &str) -> bool {
    let text = text.trim();
    CHECKED_MARKERS.iter().any(|marker| text.starts_with(marker))
}

/// Text shown for a choice item
///
/// Drops a leading `[ ]`/`[X]`/`[x]` marker (and the whitespace around
/// the rest), then anything up to and including a raw store reference.
pub fn display_text(raw: &str) -> &str {
    let mut text = raw;
    if MARKERS.iter().any(|marker| text.starts_with(marker)) {
        text = text[3..].trim();
    }
    if let Some((_, rest)) = split_reference(text) {
        text = rest;
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizmark_tree::html::parse_fragment;

    fn items(html: &str) -> (Tree, Vec<NodeId>) {
        let tree = parse_fragment(html).unwrap();
        let list = tree.children(tree.root())[0];
        let items = choice_items(&tree, list);
        (tree, items)
    }

    #[test]
    fn test_checkbox_marks_answer() {
        let (tree, items) = items(
            concat!(
                r#"<ul><li><input type="checkbox"> a</li>"#,
                r#"<li><input type="checkbox" checked> b</li></ul>"#,
            ),
        );
        let store = RawStore::new();
        let extractor = AnswerExtractor::new(&store);

        assert!(!extractor.is_correct(&tree, items[0]));
        assert!(extractor.is_correct(&tree, items[1]));
    }

    #[test]
    fn test_bracket_marker_marks_answer() {
        let (tree, items) = items("<ul><li>[ ] a</li><li> [x] b</li><li>[X] c</li></ul>");
        let store = RawStore::new();
        let extractor = AnswerExtractor::new(&store);

        assert!(!extractor.is_correct(&tree, items[0]));
        assert!(extractor.is_correct(&tree, items[1]));
        assert!(extractor.is_correct(&tree, items[2]));
    }

    #[test]
    fn test_stash_reference_marks_answer() {
        let mut store = RawStore::new();
        let unchecked = store.store(r#"<input type="checkbox" disabled/>"#);
        let checked = store.store(r#"<input type="checkbox" disabled checked/>"#);
        let html = format!("<ul><li>{unchecked} a</li><li>{checked} b</li></ul>");
        let (tree, items) = items(&html);
        let extractor = AnswerExtractor::new(&store);

        assert!(!extractor.is_correct(&tree, items[0]));
        assert!(extractor.is_correct(&tree, items[1]));
    }

    #[test]
    fn test_malformed_reference_is_not_an_answer() {
        let store = RawStore::new();
        let (tree, items) =
            items("<ul><li>\u{2}wzxhzdk:x\u{3} a</li><li>\u{2}wzxhzdk:5\u{3} b</li></ul>");
        let extractor = AnswerExtractor::new(&store);

        assert_eq!(extractor.extract(&tree, items.iter().copied().enumerate()), None);
    }

    #[test]
    fn test_last_qualifying_item_wins() {
        let (tree, items) = items(
            r#"<ul><li>[ ] a</li><li><input type="checkbox" checked> b</li><li>[X] c</li></ul>"#,
        );
        let store = RawStore::new();
        let extractor = AnswerExtractor::new(&store);

        assert_eq!(
            extractor.extract(&tree, items.iter().copied().enumerate()),
            Some(2)
        );
    }

    #[test]
    fn test_display_text() {
        assert_eq!(display_text("[ ] Paris"), "Paris");
        assert_eq!(display_text("[X]  Lisbon "), "Lisbon");
        assert_eq!(display_text("\u{2}wzxhzdk:0\u{3} Rome"), " Rome");
        assert_eq!(display_text(" [x] kept"), " [x] kept");
        assert_eq!(display_text("plain"), "plain");
    }

    #[test]
    fn test_task_list_fallback() {
        let tree = parse_fragment(r#"<form><ol class="task-list"><li>a</li></ol></form>"#).unwrap();
        let form = tree.children(tree.root())[0];
        let list = find_choice_list(&tree, form).unwrap();
        assert_eq!(tree.tag(list), "ol");
        assert_eq!(choice_items(&tree, list).len(), 1);
    }
}
