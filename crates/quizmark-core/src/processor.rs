//! Processing runs over a document tree
//!
//! A run applies every variant as a separate pass over the whole tree, in
//! a fixed order (choice, text, self-progress). Each pass walks a snapshot
//! taken when the pass starts, so nodes created by earlier exercises are
//! not revisited within the same pass. A failing exercise is logged and
//! reported, and the run moves on to the next node.

use quizmark_tree::{NodeId, RawStore, Tree};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::classify::classify;
use crate::config::QuizConfig;
use crate::diagnostics::{Diagnostic, Diagnostics, EXERCISE_FAILED};
use crate::exercise::{transform_exercise, ExerciseVariant, RunState};
use crate::ident::reserve_custom_ids;
use crate::variants;

/// Builds the variants of one run, in processing order
pub type VariantFactory = fn() -> Vec<Box<dyn ExerciseVariant>>;

/// Outcome of a processing run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessReport {
    /// Number of exercises transformed successfully
    pub processed: usize,
    /// Problems found along the way
    pub diagnostics: Diagnostics,
}

impl ProcessReport {
    /// Check if any exercise failed
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

/// Runs the exercise variants over document trees
///
/// Id counters live in the variants, which are created afresh for every
/// call to [`QuizProcessor::process`].
///
/// # Example
///
/// ```
/// use quizmark_core::{QuizConfig, QuizProcessor};
/// use quizmark_tree::html::{parse_fragment, render_fragment};
/// use quizmark_tree::RawStore;
///
/// let mut tree = parse_fragment(concat!(
///     r#"<div class="admonition exercise">"#,
///     r#"<p class="admonition-title">Read</p><p>Chapter 1</p></div>"#,
/// )).unwrap();
/// let mut store = RawStore::new();
///
/// let report = QuizProcessor::new(QuizConfig::default()).process(&mut tree, &mut store);
/// assert_eq!(report.processed, 1);
///
/// let html = render_fragment(&tree, &store).unwrap();
/// assert!(html.contains(r#"id="exercise_1""#));
/// assert!(html.contains(r#"value="done""#));
/// ```
#[derive(Debug, Clone)]
pub struct QuizProcessor {
    config: QuizConfig,
    variants: VariantFactory,
}

impl QuizProcessor {
    /// Create a processor running the built-in variants
    pub fn new(config: QuizConfig) -> Self {
        Self::with_variants(config, variants::builtin)
    }

    /// Create a processor running a custom set of variants
    pub fn with_variants(config: QuizConfig, variants: VariantFactory) -> Self {
        Self { config, variants }
    }

    /// Get the configuration
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// Transform every exercise in the tree
    ///
    /// Widget markup goes into `store`; render the tree with
    /// [`quizmark_tree::html::render_fragment`] to expand it.
    pub fn process(&self, tree: &mut Tree, store: &mut RawStore) -> ProcessReport {
        let mut run = RunState::new(tree, store, self.config.captions());
        reserve_custom_ids(run.tree, &mut run.issued);
        let mut processed = 0;

        for mut variant in (self.variants)() {
            processed += run_pass(variant.as_mut(), &mut run);
        }

        if processed > 0 {
            info!("Processed {} quiz exercises", processed);
        }

        ProcessReport {
            processed,
            diagnostics: run.diagnostics,
        }
    }
}

impl Default for QuizProcessor {
    fn default() -> Self {
        Self::new(QuizConfig::default())
    }
}

/// One variant over a snapshot of the tree, returning the success count
fn run_pass(variant: &mut dyn ExerciseVariant, run: &mut RunState<'_>) -> usize {
    let root = run.tree.root();
    let mut processed = 0;

    for node in run.tree.descendants(root) {
        if !is_attached(run.tree, root, node) {
            continue;
        }
        let Some(kind) = classify(&run.tree.class_list(node)) else {
            continue;
        };
        if !variant.matches(kind) {
            continue;
        }

        match transform_exercise(variant, run, node, kind) {
            Ok(_) => processed += 1,
            Err(err) => {
                error!("Error processing {} exercise: {}", variant.name(), err);
                let mut diagnostic =
                    Diagnostic::error(format!("{} exercise failed: {}", variant.name(), err))
                        .with_code(EXERCISE_FAILED);
                if let Some(id) = run.tree.get_attr(node, "id") {
                    diagnostic = diagnostic.with_exercise(id);
                }
                run.diagnostics.push(diagnostic);
            }
        }
    }

    processed
}

fn is_attached(tree: &Tree, root: NodeId, node: NodeId) -> bool {
    node == root || tree.is_ancestor(root, node)
}

/// Run the built-in variants over a tree
pub fn process(tree: &mut Tree, store: &mut RawStore, config: &QuizConfig) -> ProcessReport {
    QuizProcessor::new(config.clone()).process(tree, store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizmark_tree::html::parse_fragment;

    #[test]
    fn test_empty_document() {
        let mut tree = parse_fragment("<p>No exercises here</p>").unwrap();
        let mut store = RawStore::new();

        let report = process(&mut tree, &mut store, &QuizConfig::default());

        assert_eq!(report.processed, 0);
        assert!(report.diagnostics.is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_counts_every_variant() {
        let mut tree = parse_fragment(concat!(
            r#"<div class="admonition exercise choice"><ul><li>[X] a</li></ul></div>"#,
            r#"<div class="admonition exercise short"><p>?</p></div>"#,
            r#"<div class="admonition exercise"><p>!</p></div>"#,
        ))
        .unwrap();
        let mut store = RawStore::new();

        let report = QuizProcessor::default().process(&mut tree, &mut store);

        assert_eq!(report.processed, 3);
        assert!(!report.has_errors());
    }

    #[test]
    fn test_report_serializes() {
        let report = ProcessReport {
            processed: 2,
            diagnostics: Diagnostics::new(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["processed"], 2);
        assert!(json["diagnostics"].as_array().unwrap().is_empty());
    }
}
