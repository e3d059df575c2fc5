//! Error types for tree operations

use thiserror::Error;

use crate::node::NodeId;

/// Errors that can occur while building, mutating or serializing a tree
#[derive(Error, Debug)]
pub enum TreeError {
    /// Error reading markup
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed attribute in markup
    #[error("Attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Markup was not valid UTF-8
    #[error("Invalid UTF-8 in markup: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Error writing markup
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Appending a node below one of its own descendants
    #[error("Cannot append node {child} below its descendant {parent}")]
    Cycle { parent: NodeId, child: NodeId },

    /// Tag or attribute name that cannot be written as markup
    #[error("Invalid markup name: {0:?}")]
    InvalidName(String),

    /// A handle that does not belong to this tree
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),
}

/// Result type for tree operations
pub type Result<T> = std::result::Result<T, TreeError>;
