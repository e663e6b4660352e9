//! Lexical analyzer for catalog prerequisite text.
//!
//! Prerequisite sentences are free Hebrew text such as
//! `(01040012 או 01040036) ו-02340114`. The lexer recognizes course numbers,
//! the conjunctions `או` (or) and `ו` / `ו-` / `,` (and), and parentheses.
//! Everything else becomes [`Token::Text`], merged into one token per run, so
//! lexing never fails.

use winnow::{
    Parser as _,
    combinator::{alt, not, peek, terminated},
    error::{ContextError, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{any, literal, one_of, take_while},
};

use crate::{
    span::Span,
    tokens::{PositionedToken, Token},
};

/// Number of digits in a course number.
const COURSE_ID_DIGITS: usize = 8;

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError>;

/// Parse whitespace
fn whitespace<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    take_while(1.., char::is_whitespace)
        .value(Token::Whitespace)
        .parse_next(input)
}

/// Parse parentheses and the comma conjunction
fn punctuation<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    alt((
        '('.value(Token::LeftParen),
        ')'.value(Token::RightParen),
        ','.value(Token::And),
    ))
    .parse_next(input)
}

/// Parse `או`. Matches inside words too, so `01040012או01040036` splits.
fn or_keyword<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    literal("או").value(Token::Or).parse_next(input)
}

/// Parse `ו-`, or a standalone `ו` not followed by a word character
fn and_keyword<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    alt((
        literal("ו-").value(Token::And),
        terminated(
            'ו',
            peek(not(one_of(|c: char| {
                c.is_alphanumeric() || c == '_' || c == '-'
            }))),
        )
        .value(Token::And),
    ))
    .parse_next(input)
}

/// Parse a run of digits; only exactly eight digits form a course number
fn digits<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    take_while(1.., |c: char| c.is_ascii_digit())
        .map(|run: &'a str| {
            if run.len() == COURSE_ID_DIGITS {
                Token::CourseId(run)
            } else {
                Token::Text(run)
            }
        })
        .parse_next(input)
}

/// Parse any single character as text
fn text<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    any.take().map(Token::Text).parse_next(input)
}

/// Parse a single token with position tracking
fn positioned_token<'a>(input: &mut Input<'a>) -> IResult<PositionedToken<'a>> {
    let start_pos = input.current_token_start();

    let token = alt((
        whitespace,
        punctuation,
        or_keyword,  // Must come before and_keyword
        and_keyword, // Must come before text
        digits,
        text,
    ))
    .parse_next(input)?;

    let end_pos = input.current_token_start();
    Ok(PositionedToken::new(token, Span::new(start_pos..end_pos)))
}

/// Lexer that accumulates tokens, merging adjacent text.
struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<PositionedToken<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
        }
    }

    fn tokenize(&mut self, mut input: Input<'a>) {
        while !input.is_empty() {
            match positioned_token(&mut input) {
                Ok(token) => self.push(token),
                Err(_) => {
                    // `text` accepts any character; skip one to stay total.
                    input.next_token();
                }
            }
        }
    }

    fn push(&mut self, positioned: PositionedToken<'a>) {
        if let Token::Text(_) = positioned.token {
            if let Some(last) = self.tokens.last_mut() {
                if matches!(last.token, Token::Text(_)) && last.span.end() == positioned.span.start() {
                    let span = last.span.union(positioned.span);
                    *last = PositionedToken::new(
                        Token::Text(&self.source[span.start()..span.end()]),
                        span,
                    );
                    return;
                }
            }
        }
        self.tokens.push(positioned);
    }

    fn finish(self) -> Vec<PositionedToken<'a>> {
        self.tokens
    }
}

/// Split prerequisite text into tokens. Never fails; unknown input becomes
/// [`Token::Text`].
pub fn tokenize(source: &str) -> Vec<PositionedToken<'_>> {
    let mut lexer = Lexer::new(source);
    lexer.tokenize(LocatingSlice::new(source));
    lexer.finish()
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    /// Strategy for generating valid course numbers.
    fn course_id_strategy() -> impl Strategy<Value = String> {
        "[0-9]{8}"
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Tokens cover the whole input without gaps or overlaps.
    fn check_spans_cover_input(source: &str) -> Result<(), TestCaseError> {
        let tokens = tokenize(source);
        let mut expected_start = 0;
        for token in &tokens {
            prop_assert_eq!(token.span.start(), expected_start);
            expected_start = token.span.end();
        }
        prop_assert_eq!(expected_start, source.len());
        Ok(())
    }

    /// Course numbers separated by `או` lex to alternating ids and `Or`.
    fn check_or_chain(ids: &[String]) -> Result<(), TestCaseError> {
        let source = ids.join(" או ");
        let tokens: Vec<_> = tokenize(&source)
            .into_iter()
            .map(|t| t.token)
            .filter(|t| *t != Token::Whitespace)
            .collect();

        prop_assert_eq!(tokens.len(), ids.len() * 2 - 1);
        for (idx, token) in tokens.iter().enumerate() {
            if idx % 2 == 0 {
                prop_assert_eq!(*token, Token::CourseId(ids[idx / 2].as_str()));
            } else {
                prop_assert_eq!(*token, Token::Or);
            }
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn spans_cover_input(source in "\\PC{0,40}") {
            check_spans_cover_input(&source)?;
        }

        #[test]
        fn or_chain(ids in prop::collection::vec(course_id_strategy(), 1..6)) {
            check_or_chain(&ids)?;
        }
    }
}
