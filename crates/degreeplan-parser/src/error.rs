//! Error and diagnostic system for the loader.
//!
//! Loading is forgiving: most shape problems in catalog or template data are
//! reported as warnings and replaced by a documented fallback. Only documents
//! that cannot be read at all produce a [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use degreeplan_parser::error::{Diagnostic, ErrorCode};
//! # use degreeplan_parser::Span;
//!
//! let diag = Diagnostic::error("expected value")
//!     .with_code(ErrorCode::E100)
//!     .with_label(Span::new(12..13), "here")
//!     .with_help("check the file for a trailing comma");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
