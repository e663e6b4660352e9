//! The core diagnostic type of the loader.

use std::fmt;

use crate::{
    error::{Severity, error_code::ErrorCode, label::Label},
    span::Span,
};

/// A single error or warning with an optional code, labeled spans and help.
///
/// ```text
/// warning[E201]: course `02340114` has invalid credits `"four"`
///    = help: credits must be a non-negative number; the course counts as 0
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use degreeplan_parser::error::{Diagnostic, ErrorCode};
    /// # use degreeplan_parser::Span;
    ///
    /// let diag = Diagnostic::error("expected `,` or `]`")
    ///     .with_code(ErrorCode::E100)
    ///     .with_label(Span::new(10..11), "here")
    ///     .with_help("check the catalog file for a missing comma");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Moves a diagnostic produced for an embedded text into its enclosing
    /// document.
    ///
    /// Labels point into the embedded text, so they are dropped; `context`
    /// is prefixed to the message instead.
    pub fn in_context(mut self, context: impl fmt::Display) -> Self {
        self.message = format!("{context}: {}", self.message);
        self.labels.clear();
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E100]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::new(Severity::Error, "test error");

        assert!(diag.severity().is_error());
        assert!(!diag.severity().is_warning());
        assert_eq!(diag.message(), "test error");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::warning("course `A` is listed twice")
            .with_code(ErrorCode::E203)
            .with_label(Span::new(100..120), "duplicate")
            .with_secondary_label(Span::new(50..70), "first defined here")
            .with_help("remove one of the records");

        assert!(diag.severity().is_warning());
        assert_eq!(diag.code(), Some(ErrorCode::E203));
        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_primary());
        assert!(diag.labels()[1].is_secondary());
        assert_eq!(diag.help(), Some("remove one of the records"));
    }

    #[test]
    fn test_diagnostic_display() {
        let with_code = Diagnostic::error("not JSON").with_code(ErrorCode::E100);
        assert_eq!(with_code.to_string(), "error[E100]: not JSON");

        let without_code = Diagnostic::warning("odd input");
        assert_eq!(without_code.to_string(), "warning: odd input");
    }

    #[test]
    fn test_in_context_drops_labels() {
        let diag = Diagnostic::warning("unclosed parenthesis")
            .with_code(ErrorCode::E002)
            .with_label(Span::new(3..4), "opened here")
            .in_context("course `02340114` prerequisites");

        assert_eq!(
            diag.message(),
            "course `02340114` prerequisites: unclosed parenthesis"
        );
        assert!(diag.labels().is_empty());
        assert_eq!(diag.code(), Some(ErrorCode::E002));
    }
}
