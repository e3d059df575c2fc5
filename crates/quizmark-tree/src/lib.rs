//! quizmark-tree - Document tree and raw content store
//!
//! This crate provides the mutable tree the quiz pass rewrites, the
//! append-only store for markup that must bypass further processing, and a
//! lenient HTML fragment reader/writer for moving pages in and out of the
//! tree.
//!
//! # Example
//!
//! ```
//! use quizmark_tree::html::{parse_fragment, render_fragment};
//! use quizmark_tree::RawStore;
//!
//! let mut tree = parse_fragment(r#"<div class="admonition note"><p>Hi</p></div>"#).unwrap();
//! let mut store = RawStore::new();
//!
//! let div = tree.children(tree.root())[0];
//! let holder = tree.append_element(div, "div").unwrap();
//! let key = store.store("<button>Go</button>");
//! tree.set_text(holder, key);
//!
//! let html = render_fragment(&tree, &store).unwrap();
//! assert!(html.ends_with("<div><button>Go</button></div></div>"));
//! ```

pub mod class_list;
pub mod error;
pub mod html;
pub mod node;
pub mod stash;
pub mod tree;

pub use class_list::ClassList;
pub use error::{Result, TreeError};
pub use node::{Attributes, Node, NodeId};
pub use stash::RawStore;
pub use tree::Tree;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "0.1.0");
    }
}
