//! Shared helpers for reading loosely-typed JSON values.

use serde_json::{Value, error::Category};

use crate::{
    error::{Diagnostic, ErrorCode},
    span::Span,
};

/// Parses `source` as JSON, mapping decoder failures to an E100 diagnostic
/// pointing at the offending character.
pub fn parse_document(source: &str, what: &str) -> Result<Value, Diagnostic> {
    serde_json::from_str(source).map_err(|err| {
        let span = Span::from_line_column(source, err.line(), err.column());
        let label = match err.classify() {
            Category::Eof => "document ends here",
            Category::Syntax | Category::Data | Category::Io => "here",
        };
        Diagnostic::error(format!("{what} is not valid JSON: {err}"))
            .with_code(ErrorCode::E100)
            .with_label(span, label)
    })
}

/// Error for a document whose top-level value has the wrong shape.
pub fn unexpected_shape(what: &str, expected: &str, found: &Value) -> Diagnostic {
    Diagnostic::error(format!(
        "{what} must be {expected}, found {}",
        type_name(found)
    ))
    .with_code(ErrorCode::E101)
}

/// A number, or a string holding a number.
pub fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|number| number.is_finite())
}

/// An identifier written either as a string or as a bare number.
pub fn identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Strings of a value that is either one string or an array of strings.
/// Non-string array items are skipped.
pub fn strings(value: &Value) -> Vec<String> {
    match value {
        Value::String(text) => vec![text.clone()],
        Value::Array(items) => items.iter().filter_map(identifier).collect(),
        _ => Vec::new(),
    }
}

/// Short JSON type name for messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
