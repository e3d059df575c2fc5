//! Exercise id assignment
//!
//! Every transformed exercise gets an `id` attribute. By default it is
//! `{base_class}_{n}` where `n` comes from a counter owned by the variant
//! that handles the exercise. A class token `id_<name>` overrides that
//! with `<name>` and is removed from the class attribute.
//!
//! Ids are unique across the whole run. Custom ids are reserved before the
//! first pass, so automatic ids skip them whichever variant comes first. A
//! custom id that repeats an issued one is rejected.

use std::collections::HashSet;

use quizmark_tree::{NodeId, Tree};
use tracing::debug;

use crate::classify::classify;
use crate::error::{QuizError, Result};

/// Class token prefix carrying a custom id
pub const CUSTOM_ID_PREFIX: &str = "id_";

/// Ids handed out during one processing run
#[derive(Debug, Clone, Default)]
pub struct IssuedIds {
    ids: HashSet<String>,
    reserved: HashSet<String>,
}

impl IssuedIds {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether an id was already issued
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Check whether an id was issued or is reserved for a custom id
    pub fn is_taken(&self, id: &str) -> bool {
        self.ids.contains(id) || self.reserved.contains(id)
    }

    /// Record an issued id
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    /// Keep an id away from automatic numbering
    pub fn reserve(&mut self, id: impl Into<String>) -> bool {
        self.reserved.insert(id.into())
    }
}

/// Reserve the custom ids of every exercise in the tree
pub fn reserve_custom_ids(tree: &Tree, issued: &mut IssuedIds) {
    for node in tree.descendants(tree.root()) {
        let mut classes = tree.class_list(node);
        if classify(&classes).is_none() {
            continue;
        }
        if let Some(name) = classes
            .strip_prefixed(CUSTOM_ID_PREFIX)
            .filter(|name| !name.is_empty())
        {
            issued.reserve(name);
        }
    }
}

/// Per-variant id counter
#[derive(Debug, Clone)]
pub struct IdAssigner {
    base_class: &'static str,
    counter: usize,
}

impl IdAssigner {
    /// Create a counter for ids of the form `{base_class}_{n}`
    pub fn new(base_class: &'static str) -> Self {
        Self {
            base_class,
            counter: 0,
        }
    }

    /// Compute, record and write the id of an exercise node
    ///
    /// The counter advances on every call, custom ids included. On a
    /// duplicate custom id the node is left untouched.
    pub fn assign(
        &mut self,
        tree: &mut Tree,
        node: NodeId,
        issued: &mut IssuedIds,
    ) -> Result<String> {
        self.counter += 1;

        let mut classes = tree.class_list(node);
        let custom = classes
            .strip_prefixed(CUSTOM_ID_PREFIX)
            .filter(|name| !name.is_empty());

        let id = match custom {
            Some(name) => {
                if issued.contains(&name) {
                    return Err(QuizError::DuplicateId(name));
                }
                tree.set_class_list(node, &classes);
                name
            }
            None => {
                let mut id = self.default_id();
                while issued.is_taken(&id) {
                    self.counter += 1;
                    id = self.default_id();
                }
                id
            }
        };

        tree.set_attr(node, "id", id.as_str());
        issued.insert(id.as_str());
        debug!("Set element ID: {}", id);
        Ok(id)
    }

    fn default_id(&self) -> String {
        format!("{}_{}", self.base_class, self.counter)
    }
}
