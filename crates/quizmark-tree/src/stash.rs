//! Raw content store
//!
//! Fragments that must reach the output untouched are stored here and
//! replaced in the tree by a placeholder. The placeholder wraps the store
//! index between two control bytes:
//!
//! ```text
//! \u{2}wzxhzdk:{index}\u{3}
//! ```
//!
//! [`render_fragment`](crate::html::render_fragment) swaps placeholders back
//! for the stored markup.

/// Start-of-placeholder control byte
pub const STX: char = '\u{2}';
/// End-of-placeholder control byte
pub const ETX: char = '\u{3}';
/// Fixed key prefix, up to and including the delimiter
pub const KEY_PREFIX: &str = "wzxhzdk:";

/// Append-only store of raw markup fragments
#[derive(Debug, Clone, Default)]
pub struct RawStore {
    fragments: Vec<String>,
}

impl RawStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fragment and return the placeholder that refers to it
    pub fn store(&mut self, html: impl Into<String>) -> String {
        self.fragments.push(html.into());
        placeholder(self.fragments.len() - 1)
    }

    /// Look up a fragment by key
    ///
    /// Accepts a full placeholder, a key without control bytes, or any text
    /// whose part before the ETX byte ends in `:{index}`. Non-numeric,
    /// missing and out-of-range keys yield `None`.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        let index = parse_key(key)?;
        self.fragments.get(index).map(String::as_str)
    }

    /// Number of stored fragments
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Check if nothing was stored yet
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// Build the placeholder for a store index
pub fn placeholder(index: usize) -> String {
    format!("{STX}{KEY_PREFIX}{index}{ETX}")
}

/// Decode the store index from a key
///
/// Only the part before the first ETX byte is considered; the index is the
/// decimal number after the first `:` in that part.
pub fn parse_key(key: &str) -> Option<usize> {
    let key = match key.find(ETX) {
        Some(end) => &key[..end],
        None => key,
    };
    let colon = key.find(':')?;
    key[colon + 1..].parse().ok()
}

/// Split text at the end of a leading stash reference
///
/// Returns `(reference, remainder)` where the reference excludes the ETX
/// byte. `None` if the text holds no ETX byte.
pub fn split_reference(text: &str) -> Option<(&str, &str)> {
    let end = text.find(ETX)?;
    Some((&text[..end], &text[end + ETX.len_utf8()..]))
}
