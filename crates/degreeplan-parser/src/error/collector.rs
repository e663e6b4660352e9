//! Collector for accumulating diagnostics while loading a document.

use crate::error::{Diagnostic, ParseError};

/// Accumulates errors and warnings so a loader can report every problem in a
/// document instead of stopping at the first.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Emit every diagnostic of `diagnostics`.
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.emit(diagnostic);
        }
    }

    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Finish collection.
    ///
    /// - If there are errors, returns `Err(ParseError)` with all diagnostics.
    /// - Otherwise returns the warnings.
    pub fn finish(self) -> Result<Vec<Diagnostic>, ParseError> {
        if self.has_errors {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCode, span::Span};

    #[test]
    fn test_collector_new_finish_ok() {
        let collector = DiagnosticCollector::new();
        assert!(collector.finish().unwrap().is_empty());
    }

    #[test]
    fn test_collector_emit_error_finish_err() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(Diagnostic::error("test error"));

        assert!(collector.has_errors());
        assert!(collector.finish().is_err());
    }

    #[test]
    fn test_collector_keeps_warnings() {
        let mut collector = DiagnosticCollector::new();

        collector.extend([
            Diagnostic::warning("warning 1"),
            Diagnostic::warning("warning 2"),
        ]);

        let warnings = collector.finish().unwrap();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[1].message(), "warning 2");
    }

    #[test]
    fn test_collector_finish_with_errors() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(
            Diagnostic::error("test error")
                .with_code(ErrorCode::E100)
                .with_label(Span::new(10..20), "here"),
        );
        collector.emit(Diagnostic::warning("test warning"));

        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 2);
        assert_eq!(err.diagnostics()[0].message(), "test error");
    }
}
