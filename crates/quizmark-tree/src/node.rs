//! Node and attribute definitions
//!
//! A [`Node`] mirrors an element of a parsed HTML document: a tag, an
//! ordered attribute map, the text before its first child and the tail
//! text that follows its end tag.

use std::fmt;

/// Handle to a node inside a [`Tree`](crate::Tree)
///
/// Handles are only minted by the tree that owns the node and stay valid
/// for the lifetime of that tree, including after the node is detached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in its tree's arena
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Insertion-ordered attribute map
///
/// Order matters for serialization: attributes are written back in the
/// order they were first set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// Create an empty attribute map
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an attribute value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Check whether an attribute is present (valueless attributes count)
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Set an attribute, keeping its position if it already exists
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Remove an attribute, returning its previous value
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    /// Iterate over `(key, value)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no attributes
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An element of the document tree
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Element tag name (lowercase)
    pub tag: String,
    /// Element attributes, including `class` and `id`
    pub attributes: Attributes,
    /// Text before the first child
    pub text: Option<String>,
    /// Text after the end tag, part of the parent's content
    pub tail: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Attributes::new(),
            text: None,
            tail: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Parent node, `None` for the root and for detached nodes
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Ordered child handles
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Check the tag name
    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_keep_insertion_order() {
        let mut attrs = Attributes::new();
        attrs.set("class", "admonition");
        attrs.set("id", "one");
        attrs.set("class", "admonition exercise");

        let pairs: Vec<_> = attrs.iter().collect();
        assert_eq!(pairs, vec![("class", "admonition exercise"), ("id", "one")]);
    }

    #[test]
    fn test_attributes_remove() {
        let mut attrs = Attributes::new();
        attrs.set("checked", "");
        assert!(attrs.contains("checked"));
        assert_eq!(attrs.remove("checked"), Some(String::new()));
        assert!(attrs.is_empty());
        assert_eq!(attrs.remove("checked"), None);
    }

    #[test]
    fn test_node_tag_check_is_case_insensitive() {
        let node = Node::new("ul");
        assert!(node.is("UL"));
        assert!(!node.is("ol"));
    }
}
