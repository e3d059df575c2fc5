//! HTML serialization and raw store expansion

use std::borrow::Cow;
use std::sync::OnceLock;

use quick_xml::escape::{escape, partial_escape};
use regex::Regex;

use super::{is_raw_text, is_void};
use crate::error::{Result, TreeError};
use crate::node::NodeId;
use crate::stash::{RawStore, STX};
use crate::tree::Tree;

/// Upper bound on nested placeholder expansion rounds
const MAX_EXPANSION_DEPTH: usize = 8;

/// Serialize one node, its subtree and its tail
pub fn serialize_node(tree: &Tree, id: NodeId) -> Result<String> {
    if !tree.contains(id) {
        return Err(TreeError::UnknownNode(id));
    }
    let mut out = String::new();
    write_node(tree, id, &mut out)?;
    if let Some(tail) = tree.tail(id) {
        out.push_str(&partial_escape(tail));
    }
    Ok(out)
}

/// Serialize the content of a node (its text and children), without the
/// node's own tags
pub fn serialize_children(tree: &Tree, id: NodeId) -> Result<String> {
    if !tree.contains(id) {
        return Err(TreeError::UnknownNode(id));
    }
    let mut out = String::new();
    write_content(tree, id, &mut out)?;
    Ok(out)
}

/// Serialize a fragment tree and substitute raw store placeholders
///
/// The synthetic root element is not emitted.
pub fn render_fragment(tree: &Tree, store: &RawStore) -> Result<String> {
    let markup = serialize_children(tree, tree.root())?;
    Ok(expand_placeholders(&markup, store))
}

/// Replace every placeholder with its stored fragment
///
/// Fragments may themselves contain placeholders, so expansion repeats
/// until none remain or the depth limit is hit. Placeholders without a
/// stored fragment are dropped.
pub fn expand_placeholders(markup: &str, store: &RawStore) -> String {
    static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();
    let re = PLACEHOLDER_RE.get_or_init(|| Regex::new(r"\x02wzxhzdk:(\d+)\x03").unwrap());

    let mut current = markup.to_string();
    for _ in 0..MAX_EXPANSION_DEPTH {
        if !current.contains(STX) {
            break;
        }
        current = re
            .replace_all(&current, |caps: &regex::Captures<'_>| {
                match store.lookup(&caps[0]) {
                    Some(fragment) => fragment.to_string(),
                    None => {
                        tracing::warn!("Dropping unknown raw content reference {}", &caps[1]);
                        String::new()
                    }
                }
            })
            .into_owned();
    }
    current
}

/// Escape text for use as element content
pub fn escape_text(text: &str) -> Cow<'_, str> {
    partial_escape(text)
}

fn write_node(tree: &Tree, id: NodeId, out: &mut String) -> Result<()> {
    let node = tree.node(id);
    check_name(&node.tag)?;

    out.push('<');
    out.push_str(&node.tag);
    for (key, value) in node.attributes.iter() {
        check_name(key)?;
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value));
        out.push('"');
    }

    if is_void(&node.tag) {
        out.push_str(" />");
        return Ok(());
    }

    out.push('>');
    write_content(tree, id, out)?;
    out.push_str("</");
    out.push_str(&node.tag);
    out.push('>');
    Ok(())
}

fn write_content(tree: &Tree, id: NodeId, out: &mut String) -> Result<()> {
    if let Some(text) = tree.text(id) {
        if is_raw_text(tree.tag(id)) {
            out.push_str(text);
        } else {
            out.push_str(&partial_escape(text));
        }
    }
    for child in tree.children(id) {
        write_node(tree, *child, out)?;
        if let Some(tail) = tree.tail(*child) {
            out.push_str(&partial_escape(tail));
        }
    }
    Ok(())
}

/// Tag and attribute names must not break the surrounding markup
fn check_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '"' | '\'' | '/' | '='));
    if valid {
        Ok(())
    } else {
        Err(TreeError::InvalidName(name.to_string()))
    }
}
