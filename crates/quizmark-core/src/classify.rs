//! Exercise classification from class tokens
//!
//! An exercise node carries the base token `exercise` plus optional
//! discriminating tokens. Classification is a pure function of the token
//! set and maps every node to at most one variant, in priority order:
//!
//! | Tokens (besides `exercise`)  | Kind                         |
//! |------------------------------|------------------------------|
//! | `choice`                     | [`ExerciseKind::Choice`]     |
//! | `short`, `long` or `text`    | [`ExerciseKind::Text`]       |
//! | none of the above            | [`ExerciseKind::SelfProgress`] |

use quizmark_tree::ClassList;

/// Token every exercise carries
pub const BASE_CLASS: &str = "exercise";

/// Token selecting multiple choice exercises
pub const CHOICE_CLASS: &str = "choice";

/// Exercise variant of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExerciseKind {
    /// Multiple choice over a bullet list
    Choice,
    /// Free text answer
    Text(TextKind),
    /// Plain "mark as done" exercise
    SelfProgress,
}

/// Input widget of a text exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKind {
    /// Single-line input
    Short,
    /// Multi-line input asking for a detailed answer
    Long,
    /// Multi-line input (`text` token)
    Plain,
}

impl ExerciseKind {
    /// Presentation class added to transformed exercises
    pub fn extra_class(self) -> &'static str {
        match self {
            ExerciseKind::Choice => "exercise-choice",
            ExerciseKind::Text(TextKind::Short) => "exercise-short",
            ExerciseKind::Text(TextKind::Long) => "exercise-long",
            ExerciseKind::Text(TextKind::Plain) => "exercise-text",
            ExerciseKind::SelfProgress => "exercise-self-progress",
        }
    }
}

impl TextKind {
    /// Pick the text kind from the tokens, `short` > `long` > `text`
    pub fn from_classes(classes: &ClassList) -> Option<Self> {
        if classes.contains("short") {
            Some(TextKind::Short)
        } else if classes.contains("long") {
            Some(TextKind::Long)
        } else if classes.contains("text") {
            Some(TextKind::Plain)
        } else {
            None
        }
    }
}

/// Classify a node's class tokens
///
/// Returns `None` when the base token is missing.
///
/// # Example
///
/// ```
/// use quizmark_core::classify::{classify, ExerciseKind, TextKind};
/// use quizmark_tree::ClassList;
///
/// let kind = classify(&ClassList::parse("admonition exercise long"));
/// assert_eq!(kind, Some(ExerciseKind::Text(TextKind::Long)));
/// ```
pub fn classify(classes: &ClassList) -> Option<ExerciseKind> {
    if !classes.contains(BASE_CLASS) {
        return None;
    }
    if classes.contains(CHOICE_CLASS) {
        return Some(ExerciseKind::Choice);
    }
    if let Some(kind) = TextKind::from_classes(classes) {
        return Some(ExerciseKind::Text(kind));
    }
    Some(ExerciseKind::SelfProgress)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(classes: &str) -> Option<ExerciseKind> {
        classify(&ClassList::parse(classes))
    }

    #[test]
    fn test_base_token_required() {
        assert_eq!(kind("admonition note"), None);
        assert_eq!(kind("admonition choice"), None);
        assert_eq!(kind("admonition exercises"), None);
    }

    #[test]
    fn test_choice_beats_text() {
        assert_eq!(kind("exercise choice short"), Some(ExerciseKind::Choice));
    }

    #[test]
    fn test_text_precedence() {
        assert_eq!(
            kind("exercise text long short"),
            Some(ExerciseKind::Text(TextKind::Short))
        );
        assert_eq!(
            kind("exercise text long"),
            Some(ExerciseKind::Text(TextKind::Long))
        );
        assert_eq!(
            kind("exercise text"),
            Some(ExerciseKind::Text(TextKind::Plain))
        );
    }

    #[test]
    fn test_plain_exercise_is_self_progress() {
        assert_eq!(kind("admonition exercise"), Some(ExerciseKind::SelfProgress));
    }

    #[test]
    fn test_processed_nodes_keep_their_kind() {
        assert_eq!(
            kind("admonition exercise choice exercise-choice"),
            Some(ExerciseKind::Choice)
        );
        assert_eq!(
            kind("admonition exercise exercise-self-progress"),
            Some(ExerciseKind::SelfProgress)
        );
    }

    #[test]
    fn test_extra_classes() {
        assert_eq!(ExerciseKind::Choice.extra_class(), "exercise-choice");
        assert_eq!(
            ExerciseKind::Text(TextKind::Plain).extra_class(),
            "exercise-text"
        );
    }
}
