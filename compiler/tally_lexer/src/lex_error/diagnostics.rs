//! Conversion of tokenizer errors into diagnostics.

use tally_diagnostic::{Diagnostic, ErrorCode};

use super::{LexError, LexErrorKind};

impl LexErrorKind {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            LexErrorKind::InvalidChar { .. } => ErrorCode::E0001,
            LexErrorKind::InvalidIdentifier => ErrorCode::E0002,
            LexErrorKind::MissingQuote => ErrorCode::E0003,
            LexErrorKind::SourceTooLong { .. } => ErrorCode::E0004,
        }
    }

    fn primary_label(&self) -> &'static str {
        match self {
            LexErrorKind::InvalidChar { .. } => "not valid here",
            LexErrorKind::InvalidIdentifier => "identifier starts with a digit",
            LexErrorKind::MissingQuote => "string starts here",
            LexErrorKind::SourceTooLong { .. } => "input starts here",
        }
    }

    fn suggestion(&self) -> Option<&'static str> {
        match self {
            LexErrorKind::InvalidChar { found: '.' } => {
                Some("member access is not supported; a `.` may only start or continue a number")
            }
            LexErrorKind::InvalidChar { found: '\n' | '\r' } => {
                Some("an expression must be written on a single line")
            }
            LexErrorKind::InvalidChar { .. } => None,
            LexErrorKind::InvalidIdentifier => {
                Some("separate the number from the name with an operator")
            }
            LexErrorKind::MissingQuote => Some("add a closing `\"`"),
            LexErrorKind::SourceTooLong { .. } => None,
        }
    }
}

impl LexError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.kind.error_code())
            .with_message(self.kind.to_string())
            .with_label(self.span, self.kind.primary_label());
        if let Some(help) = self.kind.suggestion() {
            diag = diag.with_suggestion(help);
        }
        diag
    }
}
