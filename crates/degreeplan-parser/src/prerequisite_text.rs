//! Builds prerequisite trees from catalog prerequisite text.
//!
//! Terms are course numbers and parenthesized groups. Each term remembers the
//! operator written before it. When a group is closed:
//!
//! - a single term stands alone,
//! - uniform operators give one `AllOf` or `OneOf`,
//! - mixed operators bind `and` tighter than `or`: runs joined by `and` (or
//!   by nothing) become `AllOf` groups inside a top-level `OneOf`.
//!
//! Text that is neither a course number nor an operator is skipped.

use log::trace;

use degreeplan_core::prerequisite::PrerequisiteExpr;

use crate::{
    Parsed,
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    lexer,
    tokens::{PositionedToken, Token},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    And,
    Or,
}

/// One term of a group with the operator written before it.
struct Term {
    operator: Option<Operator>,
    expr: PrerequisiteExpr,
}

struct TreeBuilder<'t, 'a> {
    tokens: &'t [PositionedToken<'a>],
    pos: usize,
    diagnostics: DiagnosticCollector,
}

impl<'t, 'a> TreeBuilder<'t, 'a> {
    fn new(tokens: &'t [PositionedToken<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            diagnostics: DiagnosticCollector::new(),
        }
    }

    fn next(&mut self) -> Option<PositionedToken<'a>> {
        let token = self.tokens.get(self.pos).copied();
        self.pos += 1;
        token
    }

    /// Parses terms until the matching `)` (when `opened` is set) or the end.
    fn group(&mut self, opened: Option<PositionedToken<'a>>) -> Option<PrerequisiteExpr> {
        let mut terms = Vec::new();
        let mut operator = None;

        while let Some(positioned) = self.next() {
            match positioned.token {
                Token::LeftParen => {
                    if let Some(expr) = self.group(Some(positioned)) {
                        terms.push(Term { operator, expr });
                    }
                    operator = None;
                }
                Token::RightParen => {
                    if opened.is_none() {
                        self.diagnostics.emit(
                            Diagnostic::warning("unmatched `)` in prerequisites")
                                .with_code(ErrorCode::E001)
                                .with_label(positioned.span, "no matching `(`")
                                .with_help("text after this parenthesis is ignored"),
                        );
                        self.pos = self.tokens.len();
                    }
                    return Self::combine(terms);
                }
                Token::Or => operator = Some(Operator::Or),
                Token::And => operator = Some(Operator::And),
                Token::CourseId(id) => {
                    terms.push(Term {
                        operator,
                        expr: PrerequisiteExpr::course(id),
                    });
                    operator = None;
                }
                Token::Text(text) => {
                    trace!(text; "Skipping prerequisite text");
                }
                Token::Whitespace => {}
            }
        }

        if let Some(open) = opened {
            self.diagnostics.emit(
                Diagnostic::warning("unclosed `(` in prerequisites")
                    .with_code(ErrorCode::E002)
                    .with_label(open.span, "opened here")
                    .with_help("the group is closed at the end of the text"),
            );
        }
        Self::combine(terms)
    }

    fn combine(terms: Vec<Term>) -> Option<PrerequisiteExpr> {
        let operators: Vec<Operator> = terms.iter().filter_map(|term| term.operator).collect();

        if terms.is_empty() {
            return None;
        }
        if operators.is_empty() {
            // Adjacent terms with no operator at all: the first one stands
            // for the group.
            return terms.into_iter().next().map(|term| term.expr);
        }

        let exprs = || -> Vec<PrerequisiteExpr> { terms.iter().map(|term| term.expr.clone()).collect() };
        if operators.iter().all(|op| *op == Operator::Or) {
            return Some(PrerequisiteExpr::OneOf(exprs()));
        }
        if operators.iter().all(|op| *op == Operator::And) {
            return Some(PrerequisiteExpr::AllOf(exprs()));
        }

        let mut alternatives = Vec::new();
        let mut run: Vec<PrerequisiteExpr> = Vec::new();
        for (idx, term) in terms.into_iter().enumerate() {
            if idx > 0 && term.operator == Some(Operator::Or) {
                alternatives.push(Self::close_run(std::mem::take(&mut run)));
            }
            run.push(term.expr);
        }
        alternatives.push(Self::close_run(run));

        Some(PrerequisiteExpr::OneOf(alternatives))
    }

    fn close_run(mut run: Vec<PrerequisiteExpr>) -> PrerequisiteExpr {
        if run.len() == 1 {
            run.remove(0)
        } else {
            PrerequisiteExpr::AllOf(run)
        }
    }
}

/// Parses prerequisite text into a tree.
///
/// Returns `None` when the text names no course. Parenthesis problems are
/// reported as warnings with spans into `text`.
///
/// # Example
///
/// ```
/// use degreeplan_parser::parse_prerequisite_text;
///
/// let parsed = parse_prerequisite_text("(01040012 או 01040036) ו-02340114");
/// let tree = parsed.value().as_ref().expect("names courses");
///
/// assert_eq!(tree.to_string(), "((01040012 or 01040036) and 02340114)");
/// assert!(parsed.warnings().is_empty());
/// ```
pub fn parse_prerequisite_text(text: &str) -> Parsed<Option<PrerequisiteExpr>> {
    let tokens = lexer::tokenize(text);
    let mut builder = TreeBuilder::new(&tokens);
    let tree = builder.group(None);

    // The builder only emits warnings.
    let warnings = builder.diagnostics.finish().unwrap_or_else(|err| err.diagnostics().to_vec());
    Parsed::new(tree, warnings)
}
