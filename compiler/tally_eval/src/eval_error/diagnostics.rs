//! Conversion of evaluation errors into diagnostics.

use tally_diagnostic::{Diagnostic, ErrorCode};

use super::{EvalError, EvalErrorKind};

impl EvalErrorKind {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            EvalErrorKind::DivideByZero => ErrorCode::E6001,
            EvalErrorKind::BindingType { .. } => ErrorCode::E6002,
            EvalErrorKind::ReturnType { .. } => ErrorCode::E6003,
            EvalErrorKind::EmptyExpression => ErrorCode::E6004,
            EvalErrorKind::StackOverflow { .. } => ErrorCode::E6005,
            EvalErrorKind::MissingContext => ErrorCode::E6006,
            EvalErrorKind::InvalidStack { .. } => ErrorCode::E9001,
            EvalErrorKind::InvalidOperand => ErrorCode::E9002,
        }
    }

    fn primary_label(&self) -> &'static str {
        match self {
            EvalErrorKind::DivideByZero => "right side is zero",
            EvalErrorKind::BindingType { .. } => "read here",
            EvalErrorKind::ReturnType { .. } => "called here",
            EvalErrorKind::StackOverflow { .. } => "stack full here",
            EvalErrorKind::MissingContext => "needs a context",
            EvalErrorKind::EmptyExpression
            | EvalErrorKind::InvalidStack { .. }
            | EvalErrorKind::InvalidOperand => "while evaluating this",
        }
    }

    fn note(&self) -> Option<&'static str> {
        match self {
            EvalErrorKind::BindingType { .. } => {
                Some("the host changed the variable's value to an incompatible type")
            }
            EvalErrorKind::StackOverflow { .. } => Some("raise `Limits::max_eval_stack`"),
            EvalErrorKind::InvalidStack { .. } | EvalErrorKind::InvalidOperand => {
                Some("this is a bug in the expression engine")
            }
            _ => None,
        }
    }
}

impl EvalError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.kind.error_code())
            .with_message(self.kind.to_string())
            .with_label(self.span, self.kind.primary_label());
        if let Some(note) = self.kind.note() {
            diag = diag.with_note(note);
        }
        diag
    }
}
