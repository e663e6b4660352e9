//! # Degreeplan Parser
//!
//! Loaders that turn catalog, degree-template and stored-session JSON into
//! the [`degreeplan_core`] model, plus the parser for human-written
//! prerequisite text.
//!
//! Loading is forgiving. A document that is not JSON, or whose top level has
//! the wrong shape, fails with a [`ParseError`]. Problems inside individual
//! records become warnings carried next to the loaded value in [`Parsed`].
//!
//! ## Usage
//!
//! ```
//! # use degreeplan_parser::{parse_catalog, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"{
//!         "01040012": { "name": "Calculus 1", "credits": 5.5 },
//!         "01040036": { "name": "Calculus 2", "credits": "5.0",
//!                       "prereqTree": { "or": ["01040012", "01040018"] } }
//!     }"#;
//!
//!     let parsed = parse_catalog(source)?;
//!     assert_eq!(parsed.value().len(), 2);
//!     assert!(parsed.warnings().is_empty());
//!     Ok(())
//! }
//! ```

mod catalog;
mod degrees;
pub mod error;
mod json;
mod lexer;
mod prerequisite_text;
mod session;
mod span;
mod tokens;

pub use catalog::{merge_catalogs, parse_catalog};
pub use degrees::{Degrees, parse_degrees};
pub use error::{Diagnostic, ParseError};
pub use prerequisite_text::parse_prerequisite_text;
pub use session::{StoredSession, parse_session};
pub use span::Span;

/// A loaded value together with the warnings produced while loading it.
#[derive(Debug, Clone)]
pub struct Parsed<T> {
    value: T,
    warnings: Vec<Diagnostic>,
}

impl<T> Parsed<T> {
    pub fn new(value: T, warnings: Vec<Diagnostic>) -> Self {
        Self { value, warnings }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (T, Vec<Diagnostic>) {
        (self.value, self.warnings)
    }

    /// Transforms the value, keeping the warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parsed<U> {
        Parsed {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}
