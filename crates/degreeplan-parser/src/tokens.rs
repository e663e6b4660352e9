//! Tokens of catalog prerequisite text.

use std::fmt;

use crate::span::Span;

/// A lexical unit of a prerequisite sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// An 8-digit course number.
    CourseId(&'a str),
    /// `או`
    Or,
    /// `ו`, `ו-` or `,`
    And,
    LeftParen,
    RightParen,
    Whitespace,
    /// Anything else; skipped by the parser.
    Text(&'a str),
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::CourseId(id) => write!(f, "course `{id}`"),
            Token::Or => write!(f, "`או`"),
            Token::And => write!(f, "conjunction"),
            Token::LeftParen => write!(f, "`(`"),
            Token::RightParen => write!(f, "`)`"),
            Token::Whitespace => write!(f, "whitespace"),
            Token::Text(text) => write!(f, "`{text}`"),
        }
    }
}

/// A token together with its location in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionedToken<'a> {
    pub token: Token<'a>,
    pub span: Span,
}

impl<'a> PositionedToken<'a> {
    pub fn new(token: Token<'a>, span: Span) -> Self {
        Self { token, span }
    }
}
