//! Lenient HTML fragment reader built on quick-xml

use std::borrow::Cow;

use quick_xml::escape::{resolve_html5_entity, unescape_with};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{is_raw_text, is_void};
use crate::error::Result;
use crate::node::NodeId;
use crate::tree::Tree;

/// Parse an HTML fragment into a tree rooted at a synthetic `div`
///
/// Top-level elements become children of the root; text before the first
/// element becomes the root's text.
///
/// # Example
///
/// ```
/// use quizmark_tree::html::parse_fragment;
///
/// let tree = parse_fragment(r#"<p class="note">Hi<br>there</p>"#).unwrap();
/// let p = tree.children(tree.root())[0];
/// assert_eq!(tree.tag(p), "p");
/// assert_eq!(tree.text(p), Some("Hi"));
/// ```
pub fn parse_fragment(html: &str) -> Result<Tree> {
    let mut reader = Reader::from_str(html);
    {
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
    }

    let mut tree = Tree::fragment();
    let mut stack: Vec<NodeId> = vec![tree.root()];

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                let parent = current(&stack, &tree);
                let id = open_element(&mut tree, parent, e)?;
                if is_raw_text(tree.tag(id)) {
                    // Script and style bodies are not markup
                    let body = reader.read_text(e.to_end().name())?;
                    push_text(&mut tree, id, &body);
                } else if !is_void(tree.tag(id)) {
                    stack.push(id);
                }
            }
            Event::Empty(ref e) => {
                let parent = current(&stack, &tree);
                open_element(&mut tree, parent, e)?;
            }
            Event::End(ref e) => {
                let name = std::str::from_utf8(e.name().as_ref())?.to_ascii_lowercase();
                if is_void(&name) {
                    continue;
                }
                // Close up to the nearest open element with this name; stray
                // end tags are dropped.
                if let Some(pos) = stack.iter().rposition(|id| tree.is_tag(*id, &name)) {
                    if pos > 0 {
                        stack.truncate(pos);
                    }
                }
            }
            Event::Text(ref e) => {
                let raw = std::str::from_utf8(e)?;
                let text = unescape_html(raw);
                let parent = current(&stack, &tree);
                push_text(&mut tree, parent, &text);
            }
            Event::CData(ref e) => {
                let text = std::str::from_utf8(e)?;
                let parent = current(&stack, &tree);
                push_text(&mut tree, parent, text);
            }
            Event::Eof => break,
            // Comments, declarations, processing instructions, doctype
            _ => {}
        }
    }

    Ok(tree)
}

fn current(stack: &[NodeId], tree: &Tree) -> NodeId {
    stack.last().copied().unwrap_or_else(|| tree.root())
}

fn open_element(tree: &mut Tree, parent: NodeId, start: &BytesStart<'_>) -> Result<NodeId> {
    let tag = std::str::from_utf8(start.name().as_ref())?.to_ascii_lowercase();
    let id = tree.append_element(parent, tag)?;

    for attr in start.html_attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_ascii_lowercase();
        let value = std::str::from_utf8(&attr.value)?;
        tree.set_attr(id, key, unescape_html(value));
    }

    Ok(id)
}

/// Append text where it belongs in ElementTree terms: the tail of the last
/// child if there is one, the parent's own text otherwise.
fn push_text(tree: &mut Tree, parent: NodeId, text: &str) {
    if text.is_empty() {
        return;
    }
    let node = match tree.children(parent).last().copied() {
        Some(last) => tree.node_mut(last).tail.get_or_insert_with(String::new),
        None => tree.node_mut(parent).text.get_or_insert_with(String::new),
    };
    node.push_str(text);
}

/// Resolve XML, numeric and HTML5 named entities; text with an
/// unrecognised entity is kept verbatim.
fn unescape_html(raw: &str) -> Cow<'_, str> {
    unescape_with(raw, resolve_html5_entity).unwrap_or(Cow::Borrowed(raw))
}
