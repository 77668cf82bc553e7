//! Parse error types.

use std::fmt;

use tally_ir::{Span, TokenIdx};

mod diagnostics;

/// A parse error, pointing at the token that triggered it.
///
/// `token` is `None` for errors about the span as a whole (an empty
/// expression, a missing operand at the end of input).
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub token: Option<TokenIdx>,
    pub span: Span,
    /// An earlier part the error relates to, e.g. the operand before a
    /// missing operator.
    pub related: Option<Span>,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ParseErrorKind {
    /// `(` without `)`, or `)` without `(`.
    MismatchParenthesis,
    /// Two operands with nothing joining them, e.g. `a b`.
    MissingOperator,
    /// A binary operator at the start of a span.
    MissingLeftOperand,
    /// An operator that never received its last operand.
    MissingRightOperand,
    /// Operator text that names no operator, e.g. a stray `:`.
    InvalidOperator { found: String },
    UnknownVariable { name: String },
    UnknownFunction { name: String },
    /// More arguments than any function of that name accepts.
    TooManyArguments { name: String, max: usize },
    /// Fewer arguments than every function of that name requires.
    MissingArguments { name: String, min: usize },
    /// Nothing between two commas or around a comma.
    EmptyArgument,
    /// A number literal that does not fit 64 bits.
    InvalidConstant,
    EmptyExpression,
    /// A comma outside a function's argument list.
    UnexpectedComma,
    TooManyParts { max: usize },
    NestingTooDeep { max: usize },
    StackOverflow { max: usize },
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, token: Option<TokenIdx>, span: Span) -> Self {
        ParseError {
            kind,
            token,
            span,
            related: None,
        }
    }

    #[must_use]
    pub fn with_related(mut self, span: Span) -> Self {
        self.related = Some(span);
        self
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::MismatchParenthesis => write!(f, "unbalanced parenthesis"),
            ParseErrorKind::MissingOperator => write!(f, "expected an operator between operands"),
            ParseErrorKind::MissingLeftOperand => write!(f, "operator has no left operand"),
            ParseErrorKind::MissingRightOperand => write!(f, "operator is missing an operand"),
            ParseErrorKind::InvalidOperator { found } => write!(f, "unknown operator `{found}`"),
            ParseErrorKind::UnknownVariable { name } => write!(f, "unknown variable `{name}`"),
            ParseErrorKind::UnknownFunction { name } => write!(f, "unknown function `{name}`"),
            ParseErrorKind::TooManyArguments { name, max } => {
                write!(f, "too many arguments to `{name}` (accepts at most {max})")
            }
            ParseErrorKind::MissingArguments { name, min } => {
                write!(f, "missing arguments to `{name}` (requires at least {min})")
            }
            ParseErrorKind::EmptyArgument => write!(f, "empty function argument"),
            ParseErrorKind::InvalidConstant => write!(f, "number literal out of range"),
            ParseErrorKind::EmptyExpression => write!(f, "empty expression"),
            ParseErrorKind::UnexpectedComma => write!(f, "comma outside of a function call"),
            ParseErrorKind::TooManyParts { max } => {
                write!(f, "expression has more than {max} parts")
            }
            ParseErrorKind::NestingTooDeep { max } => {
                write!(f, "parentheses nested deeper than {max} levels")
            }
            ParseErrorKind::StackOverflow { max } => {
                write!(f, "more than {max} pending operands")
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.span)
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests;
