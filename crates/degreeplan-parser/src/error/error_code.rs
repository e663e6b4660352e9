//! Error codes for the loader diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Prerequisite text
//! - `E1xx` - Document syntax and shape
//! - `E2xx` - Catalog records
//! - `E3xx` - Degree templates and rules
//! - `E4xx` - Stored session state

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Prerequisite Text (E0xx)
    // =========================================================================
    /// Unmatched closing parenthesis.
    ///
    /// Text after the stray `)` is ignored.
    E001,

    /// Unclosed parenthesis.
    ///
    /// The group is closed implicitly at the end of the text.
    E002,

    // =========================================================================
    // Document Errors (E1xx)
    // =========================================================================
    /// The document is not valid JSON.
    E100,

    /// The document is valid JSON but not of the expected shape.
    E101,

    // =========================================================================
    // Catalog Errors (E2xx)
    // =========================================================================
    /// A course record has no id.
    E200,

    /// A course's credits are not a non-negative number.
    E201,

    /// A prerequisite tree node has an unrecognized shape.
    ///
    /// The node is kept and treated as satisfied.
    E202,

    /// A course id appears more than once.
    E203,

    // =========================================================================
    // Template Errors (E3xx)
    // =========================================================================
    /// A degree template entry is not an object.
    E300,

    /// A rule has no id.
    E301,

    /// A rule has a type this engine does not evaluate.
    E302,

    /// A rule parameter has the wrong type.
    E303,

    /// A rule references a course list the template does not define.
    E304,

    /// The requested degree template does not exist.
    E305,

    // =========================================================================
    // Session Errors (E4xx)
    // =========================================================================
    /// A stored grade is not a number in 0..=100.
    E400,

    /// Stored classification credits are not a number.
    E401,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E302 => "E302",
            ErrorCode::E303 => "E303",
            ErrorCode::E304 => "E304",
            ErrorCode::E305 => "E305",
            ErrorCode::E400 => "E400",
            ErrorCode::E401 => "E401",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unmatched closing parenthesis",
            ErrorCode::E002 => "unclosed parenthesis",
            ErrorCode::E100 => "invalid JSON",
            ErrorCode::E101 => "unexpected document shape",
            ErrorCode::E200 => "missing course id",
            ErrorCode::E201 => "invalid credits",
            ErrorCode::E202 => "unrecognized prerequisite node",
            ErrorCode::E203 => "duplicate course id",
            ErrorCode::E300 => "invalid degree template",
            ErrorCode::E301 => "missing rule id",
            ErrorCode::E302 => "unsupported rule type",
            ErrorCode::E303 => "invalid rule parameter",
            ErrorCode::E304 => "unknown course list",
            ErrorCode::E305 => "unknown degree template",
            ErrorCode::E400 => "invalid grade",
            ErrorCode::E401 => "invalid classification credits",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E305.to_string(), "E305");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E002.description(), "unclosed parenthesis");
        assert_eq!(ErrorCode::E202.description(), "unrecognized prerequisite node");
        assert_eq!(ErrorCode::E400.description(), "invalid grade");
    }
}
