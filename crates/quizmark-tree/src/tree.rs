//! Arena-backed mutable document tree
//!
//! Nodes live in a single arena owned by the [`Tree`] and refer to each
//! other through [`NodeId`] handles. Detaching a node only unlinks it from
//! its parent; the node and its subtree stay addressable and can be
//! re-attached anywhere else.
//!
//! Read accessors index the arena directly and panic when handed a
//! [`NodeId`] minted by a different tree. Structural mutations validate
//! their handles and return [`TreeError`] instead.

use crate::class_list::ClassList;
use crate::error::{Result, TreeError};
use crate::node::{Node, NodeId};

/// Tag used for the synthetic root of an HTML fragment
pub const FRAGMENT_ROOT: &str = "div";

/// A mutable, ordered tree of element nodes
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Tree {
    /// Create a tree holding only a root element
    pub fn new(root_tag: impl Into<String>) -> Self {
        Self {
            nodes: vec![Node::new(root_tag)],
            root: NodeId(0),
        }
    }

    /// Create an empty fragment tree rooted at a `div`
    pub fn fragment() -> Self {
        Self::new(FRAGMENT_ROOT)
    }

    /// The root node
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Total number of nodes in the arena, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check that a handle belongs to this tree
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Borrow a node
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Mutably borrow a node
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Create a new detached element
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.nodes.push(Node::new(tag));
        NodeId(self.nodes.len() - 1)
    }

    /// Create an element and append it to `parent`
    pub fn append_element(&mut self, parent: NodeId, tag: impl Into<String>) -> Result<NodeId> {
        self.check(parent)?;
        let child = self.create_element(tag);
        self.append_child(parent, child)?;
        Ok(child)
    }

    /// Append `child` as the last child of `parent`
    ///
    /// The child is detached from its current parent first, so this also
    /// moves nodes around the tree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check(parent)?;
        self.check(child)?;
        if parent == child || self.is_ancestor(child, parent) {
            return Err(TreeError::Cycle { parent, child });
        }

        self.unlink(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    /// Unlink a node from its parent
    ///
    /// The node keeps its subtree and its tail text. Detaching the root or
    /// an already detached node is a no-op.
    pub fn detach(&mut self, id: NodeId) -> Result<()> {
        self.check(id)?;
        self.unlink(id);
        Ok(())
    }

    fn unlink(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != id);
        }
    }

    fn check(&self, id: NodeId) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(TreeError::UnknownNode(id))
        }
    }

    /// Check whether `ancestor` lies on the parent chain of `id`
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Walk the parent chain, nearest first
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    /// Children of a node, in order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// All nodes of a subtree in document order, starting with `id` itself
    ///
    /// The result is an owned snapshot: mutating the tree afterwards does
    /// not affect it.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.nodes[current.0].children.iter().rev().copied());
        }
        out
    }

    /// First direct child matching a predicate
    pub fn find_child<P>(&self, id: NodeId, mut predicate: P) -> Option<NodeId>
    where
        P: FnMut(&Tree, NodeId) -> bool,
    {
        self.children(id)
            .iter()
            .copied()
            .find(|child| predicate(self, *child))
    }

    /// First strict descendant in document order matching a predicate
    pub fn find_descendant<P>(&self, id: NodeId, mut predicate: P) -> Option<NodeId>
    where
        P: FnMut(&Tree, NodeId) -> bool,
    {
        self.descendants(id)
            .into_iter()
            .skip(1)
            .find(|node| predicate(self, *node))
    }

    /// Tag name of a node
    pub fn tag(&self, id: NodeId) -> &str {
        &self.nodes[id.0].tag
    }

    /// Check the tag name of a node
    pub fn is_tag(&self, id: NodeId, tag: &str) -> bool {
        self.nodes[id.0].is(tag)
    }

    /// Get an attribute
    pub fn get_attr(&self, id: NodeId, key: &str) -> Option<&str> {
        self.nodes[id.0].attributes.get(key)
    }

    /// Check for an attribute, valueless ones included
    pub fn has_attr(&self, id: NodeId, key: &str) -> bool {
        self.nodes[id.0].attributes.contains(key)
    }

    /// Set an attribute
    pub fn set_attr(&mut self, id: NodeId, key: impl Into<String>, value: impl Into<String>) {
        self.nodes[id.0].attributes.set(key, value);
    }

    /// Remove an attribute
    pub fn remove_attr(&mut self, id: NodeId, key: &str) -> Option<String> {
        self.nodes[id.0].attributes.remove(key)
    }

    /// Text before the first child
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.nodes[id.0].text.as_deref()
    }

    /// Replace the text before the first child
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        self.nodes[id.0].text = Some(text.into());
    }

    /// Text after the end tag
    pub fn tail(&self, id: NodeId) -> Option<&str> {
        self.nodes[id.0].tail.as_deref()
    }

    /// Replace the text after the end tag
    pub fn set_tail(&mut self, id: NodeId, tail: impl Into<String>) {
        self.nodes[id.0].tail = Some(tail.into());
    }

    /// Parsed `class` attribute
    pub fn class_list(&self, id: NodeId) -> ClassList {
        ClassList::parse(self.get_attr(id, "class").unwrap_or_default())
    }

    /// Write a class list back, dropping the attribute when empty
    pub fn set_class_list(&mut self, id: NodeId, classes: &ClassList) {
        if classes.is_empty() {
            self.remove_attr(id, "class");
        } else {
            self.set_attr(id, "class", classes.to_string());
        }
    }

    /// Check for a class token
    pub fn has_class(&self, id: NodeId, token: &str) -> bool {
        self.class_list(id).contains(token)
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::fragment()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Tree, NodeId, NodeId, NodeId) {
        let mut tree = Tree::fragment();
        let root = tree.root();
        let section = tree.append_element(root, "section").unwrap();
        let first = tree.append_element(section, "p").unwrap();
        let second = tree.append_element(section, "p").unwrap();
        (tree, section, first, second)
    }

    #[test]
    fn test_descendants_are_in_document_order() {
        let (tree, section, first, second) = sample();
        assert_eq!(
            tree.descendants(tree.root()),
            vec![tree.root(), section, first, second]
        );
    }

    #[test]
    fn test_append_child_moves_node() {
        let (mut tree, section, first, second) = sample();
        let root = tree.root();

        tree.append_child(root, first).unwrap();

        assert_eq!(tree.children(section), &[second]);
        assert_eq!(tree.children(root), &[section, first]);
        assert_eq!(tree.parent(first), Some(root));
    }

    #[test]
    fn test_append_child_rejects_cycles() {
        let (mut tree, section, first, _) = sample();
        let err = tree.append_child(first, section).unwrap_err();
        assert!(matches!(err, TreeError::Cycle { .. }));

        let err = tree.append_child(section, section).unwrap_err();
        assert!(matches!(err, TreeError::Cycle { .. }));
    }

    #[test]
    fn test_detach_keeps_subtree() {
        let (mut tree, section, first, _) = sample();
        tree.set_tail(first, " after");
        tree.detach(section).unwrap();

        assert!(tree.children(tree.root()).is_empty());
        assert_eq!(tree.parent(section), None);
        assert_eq!(tree.parent(first), Some(section));
        assert_eq!(tree.tail(first), Some(" after"));
    }

    #[test]
    fn test_unknown_node() {
        let mut tree = Tree::fragment();
        let err = tree.detach(NodeId(42)).unwrap_err();
        assert!(matches!(err, TreeError::UnknownNode(_)));
    }

    #[test]
    fn test_find_descendant_skips_self() {
        let (mut tree, section, first, second) = sample();
        tree.set_attr(section, "class", "note");
        tree.set_attr(second, "class", "note");

        let found = tree.find_descendant(section, |t, id| t.has_class(id, "note"));
        assert_eq!(found, Some(second));
        assert_eq!(tree.find_child(section, |t, id| t.is_tag(id, "p")), Some(first));
    }

    #[test]
    fn test_class_list_write_back() {
        let (mut tree, section, _, _) = sample();
        tree.set_attr(section, "class", "admonition  exercise");

        let mut classes = tree.class_list(section);
        classes.push_unique("exercise-choice");
        tree.set_class_list(section, &classes);
        assert_eq!(
            tree.get_attr(section, "class"),
            Some("admonition exercise exercise-choice")
        );

        tree.set_class_list(section, &ClassList::default());
        assert!(!tree.has_attr(section, "class"));
    }
}
