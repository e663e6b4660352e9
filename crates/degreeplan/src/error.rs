//! Error types for degree-plan operations.
//!
//! The engine itself never fails: malformed input degrades to documented
//! defaults. [`DegreePlanError`] covers the steps around it: reading files,
//! loading documents, reading configuration and writing reports.

use std::io;

use thiserror::Error;

use degreeplan_parser::error::ParseError;

/// The main error type for degree-plan operations.
///
/// The `Parse` variant keeps the loaded source next to the diagnostics so
/// labels can be rendered against it.
#[derive(Debug, Error)]
pub enum DegreePlanError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for DegreePlanError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl DegreePlanError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
