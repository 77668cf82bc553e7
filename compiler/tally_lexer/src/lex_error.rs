//! Tokenizer error types.
//!
//! A [`LexError`] pairs the offending source range with what went wrong.
//! The first error stops tokenization, so there is no recovery context to
//! carry.

use std::fmt;

use tally_ir::Span;

mod diagnostics;

/// A tokenizer error.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    pub span: Span,
    pub kind: LexErrorKind,
}

/// What kind of tokenizer error occurred.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// A character that cannot start any token: non-ASCII text, control
    /// characters, `@ # $ \` backtick, or a `.` that does not start a number.
    InvalidChar { found: char },
    /// A number running straight into letters or `_`, e.g. `12var`.
    InvalidIdentifier,
    /// A string literal that reaches the end of input.
    MissingQuote,
    /// Source text longer than `u32::MAX` bytes.
    SourceTooLong { len: usize },
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { span, kind }
    }

    pub fn invalid_char(found: char, span: Span) -> Self {
        Self::new(LexErrorKind::InvalidChar { found }, span)
    }

    pub fn invalid_identifier(span: Span) -> Self {
        Self::new(LexErrorKind::InvalidIdentifier, span)
    }

    pub fn missing_quote(span: Span) -> Self {
        Self::new(LexErrorKind::MissingQuote, span)
    }
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::InvalidChar { found } => {
                write!(f, "invalid character `{}`", found.escape_default())
            }
            LexErrorKind::InvalidIdentifier => {
                write!(f, "number is followed directly by an identifier")
            }
            LexErrorKind::MissingQuote => write!(f, "string literal is missing its closing quote"),
            LexErrorKind::SourceTooLong { len } => {
                write!(f, "expression text is too long ({len} bytes)")
            }
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.span)
    }
}

impl std::error::Error for LexError {}
