//! Conversion of parse errors into diagnostics.

use tally_diagnostic::{Diagnostic, ErrorCode};
use tally_ir::OpKind;

use super::{ParseError, ParseErrorKind};

impl ParseErrorKind {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ParseErrorKind::MismatchParenthesis => ErrorCode::E1001,
            ParseErrorKind::MissingOperator => ErrorCode::E1002,
            ParseErrorKind::MissingLeftOperand => ErrorCode::E1003,
            ParseErrorKind::MissingRightOperand => ErrorCode::E1004,
            ParseErrorKind::InvalidOperator { .. } => ErrorCode::E1005,
            ParseErrorKind::UnknownVariable { .. } => ErrorCode::E1006,
            ParseErrorKind::UnknownFunction { .. } => ErrorCode::E1007,
            ParseErrorKind::TooManyArguments { .. } => ErrorCode::E1008,
            ParseErrorKind::MissingArguments { .. } => ErrorCode::E1009,
            ParseErrorKind::EmptyArgument => ErrorCode::E1010,
            ParseErrorKind::InvalidConstant => ErrorCode::E1011,
            ParseErrorKind::EmptyExpression => ErrorCode::E1012,
            ParseErrorKind::UnexpectedComma => ErrorCode::E1013,
            ParseErrorKind::TooManyParts { .. } => ErrorCode::E1014,
            ParseErrorKind::NestingTooDeep { .. } => ErrorCode::E1015,
            ParseErrorKind::StackOverflow { .. } => ErrorCode::E1016,
        }
    }

    fn primary_label(&self) -> &'static str {
        match self {
            ParseErrorKind::MismatchParenthesis => "no matching parenthesis",
            ParseErrorKind::MissingOperator => "expected an operator before this",
            ParseErrorKind::MissingLeftOperand => "nothing on the left",
            ParseErrorKind::MissingRightOperand => "operand missing",
            ParseErrorKind::InvalidOperator { .. } => "not an operator here",
            ParseErrorKind::UnknownVariable { .. } => "not defined in the context",
            ParseErrorKind::UnknownFunction { .. } => "no function with this name",
            ParseErrorKind::TooManyArguments { .. } | ParseErrorKind::MissingArguments { .. } => {
                "wrong number of arguments"
            }
            ParseErrorKind::EmptyArgument => "empty argument",
            ParseErrorKind::InvalidConstant => "does not fit in 64 bits",
            ParseErrorKind::EmptyExpression => "nothing to evaluate",
            ParseErrorKind::UnexpectedComma => "unexpected comma",
            ParseErrorKind::TooManyParts { .. }
            | ParseErrorKind::NestingTooDeep { .. }
            | ParseErrorKind::StackOverflow { .. } => "limit reached here",
        }
    }

    fn suggestion(&self) -> Option<&'static str> {
        match self {
            ParseErrorKind::InvalidOperator { found }
                if OpKind::Ternary.secondary_symbol() == Some(found.as_str()) =>
            {
                Some("`:` is only valid after the `?` of a conditional")
            }
            ParseErrorKind::TooManyParts { .. }
            | ParseErrorKind::NestingTooDeep { .. }
            | ParseErrorKind::StackOverflow { .. } => {
                Some("simplify the expression or raise the engine limits")
            }
            _ => None,
        }
    }
}

impl ParseError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.kind.error_code())
            .with_message(self.kind.to_string())
            .with_label(self.span, self.kind.primary_label());
        if let Some(related) = self.related {
            diag = diag.with_secondary_label(related, "previous operand");
        }
        if let Some(help) = self.kind.suggestion() {
            diag = diag.with_suggestion(help);
        }
        diag
    }
}
