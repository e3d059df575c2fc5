//! HTML fragment reading and writing
//!
//! The reader is deliberately lenient: it accepts the kind of markup a
//! Markdown renderer produces (valueless attributes, HTML5 named entities,
//! void elements without a closing slash) on top of well-formed XHTML.
//! The writer emits XHTML-compatible markup and expands raw store
//! placeholders.

mod reader;
mod writer;

pub use reader::parse_fragment;
pub use writer::{
    escape_text, expand_placeholders, render_fragment, serialize_children, serialize_node,
};

/// Elements that never have content or an end tag
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Check whether a tag is a void element
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// Elements whose content is kept as raw text
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Check whether a tag holds raw text
pub fn is_raw_text(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.iter().any(|r| r.eq_ignore_ascii_case(tag))
}
