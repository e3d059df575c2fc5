//! Error types for exercise processing

use quizmark_tree::TreeError;
use thiserror::Error;

/// Errors that abort the transformation of a single exercise
///
/// These never escape a processing run: the processor logs them, records
/// a diagnostic and moves on to the next node.
#[derive(Error, Debug)]
pub enum QuizError {
    /// Tree mutation or serialization failed
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    /// A custom `id_` token names an id already issued in this run
    #[error("Duplicate exercise id: {0}")]
    DuplicateId(String),

    /// Malformed configuration file
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for exercise processing
pub type Result<T> = std::result::Result<T, QuizError>;
