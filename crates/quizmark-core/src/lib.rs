//! quizmark-core - Exercise admonitions to interactive quizzes
//!
//! Rewrites exercise blocks of a rendered HTML document into quiz widgets:
//! multiple choice, free text and "mark as done" forms. The document is a
//! [`quizmark_tree::Tree`]; generated widget markup is kept in a
//! [`quizmark_tree::RawStore`] and expanded when the tree is rendered.
//!
//! # Example
//!
//! ```
//! use quizmark_core::{process, QuizConfig};
//! use quizmark_tree::html::{parse_fragment, render_fragment};
//! use quizmark_tree::RawStore;
//!
//! let html = r#"<div class="admonition exercise choice">
//! <p class="admonition-title">Capital</p>
//! <ul><li>[ ] Porto</li><li>[x] Lisbon</li></ul>
//! </div>"#;
//!
//! let mut tree = parse_fragment(html).unwrap();
//! let mut store = RawStore::new();
//! let report = process(&mut tree, &mut store, &QuizConfig::default());
//! assert_eq!(report.processed, 1);
//!
//! let out = render_fragment(&tree, &store).unwrap();
//! assert!(out.contains(r#"data-answer-idx="1""#));
//! assert!(out.contains(r#"<span class="choice-text">Lisbon</span>"#));
//! ```

pub mod answer;
pub mod classify;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod exercise;
pub mod i18n;
pub mod ident;
pub mod processor;
pub mod variants;

pub use classify::{classify, ExerciseKind, TextKind};
pub use config::{AssetSettings, ClientSettings, QuizConfig};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{QuizError, Result};
pub use exercise::{transform_exercise, ExerciseContext, ExerciseVariant, RunState};
pub use i18n::Captions;
pub use processor::{process, ProcessReport, QuizProcessor, VariantFactory};

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
