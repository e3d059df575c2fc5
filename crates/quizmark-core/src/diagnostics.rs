//! Diagnostics reported while rewriting exercises
//!
//! Nothing that goes wrong inside one exercise aborts a run. Problems are
//! logged through `tracing` and also collected here so hosts can print or
//! serialize them.

use serde::{Deserialize, Serialize};

/// Choice exercise without a list or without list items
pub const NO_CHOICES: &str = "QZ001";
/// Choice exercise where no item is marked as correct
pub const NO_CORRECT_ANSWER: &str = "QZ002";
/// A choice item that could not be rendered and was skipped
pub const CHOICE_SKIPPED: &str = "QZ003";
/// An exercise whose transformation failed
pub const EXERCISE_FAILED: &str = "QZ004";

/// A diagnostic message produced by a processing run
///
/// # Example
///
/// ```
/// use quizmark_core::diagnostics::{Diagnostic, Severity, NO_CHOICES};
///
/// let diag = Diagnostic::warning("No choices found")
///     .with_code(NO_CHOICES)
///     .with_exercise("exercise_1");
/// assert_eq!(diag.to_string(), "warning[QZ001]: No choices found (exercise exercise_1)");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level of the diagnostic
    pub severity: Severity,

    /// The diagnostic message
    pub message: String,

    /// Diagnostic code (e.g., "QZ001")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Id of the exercise the diagnostic is about
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise: Option<String>,

    /// Optional file path of the page being processed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Something looks wrong but output was still produced
    Warning,

    /// Part of the input was left untransformed
    Error,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            code: None,
            exercise: None,
            file: None,
        }
    }

    /// Create an error diagnostic
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Set the diagnostic code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the exercise id
    pub fn with_exercise(mut self, exercise: impl Into<String>) -> Self {
        self.exercise = Some(exercise.into());
        self
    }

    /// Set the file path
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Check if this is an error-level diagnostic
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    /// Check if this is a warning-level diagnostic
    pub fn is_warning(&self) -> bool {
        matches!(self.severity, Severity::Warning)
    }

    /// Check the diagnostic code
    pub fn has_code(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: severity[code]: message (exercise id)
        write!(f, "{}", self.severity)?;
        if let Some(ref code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)?;

        if let Some(ref exercise) = self.exercise {
            write!(f, " (exercise {})", exercise)?;
        }
        if let Some(ref file) = self.file {
            write!(f, "\n  --> {}", file)?;
        }

        Ok(())
    }
}

/// A collection of diagnostics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create a new empty diagnostics collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.is_error())
    }

    /// Get the number of errors
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Get the number of warnings
    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_warning()).count()
    }

    /// Diagnostics carrying a given code
    pub fn with_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.diagnostics.iter().filter(move |d| d.has_code(code))
    }

    /// Get all diagnostics
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get the count
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self {
            diagnostics: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_builder() {
        let diag = Diagnostic::error("Transformation failed")
            .with_code(EXERCISE_FAILED)
            .with_exercise("intro")
            .with_file("index.html");

        assert!(diag.is_error());
        assert!(diag.has_code("QZ004"));
        assert_eq!(diag.exercise, Some("intro".to_string()));
    }

    #[test]
    fn test_severity_order() {
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn test_diagnostics_collection() {
        let mut diags = Diagnostics::new();
        diags.push(Diagnostic::warning("w").with_code(NO_CORRECT_ANSWER));
        diags.push(Diagnostic::error("e").with_code(EXERCISE_FAILED));
        diags.push(Diagnostic::warning("w2").with_code(NO_CORRECT_ANSWER));

        assert!(diags.has_errors());
        assert_eq!(diags.error_count(), 1);
        assert_eq!(diags.warning_count(), 2);
        assert_eq!(diags.with_code(NO_CORRECT_ANSWER).count(), 2);
    }

    #[test]
    fn test_diagnostic_display_with_file() {
        let diag = Diagnostic::error("Duplicate exercise id")
            .with_code(EXERCISE_FAILED)
            .with_file("page.html");

        let display = format!("{}", diag);
        assert!(display.starts_with("error[QZ004]: Duplicate exercise id"));
        assert!(display.contains("--> page.html"));
    }

    #[test]
    fn test_diagnostic_serialize() {
        let diag = Diagnostic::warning("No correct answer").with_code(NO_CORRECT_ANSWER);

        let json = serde_json::to_string(&diag).unwrap();
        assert!(json.contains("\"severity\":\"warning\""));
        assert!(json.contains("\"code\":\"QZ002\""));
        assert!(!json.contains("exercise"));

        let restored: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, diag);
    }
}
