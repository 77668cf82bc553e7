//! Conversion of type errors into diagnostics.

use tally_diagnostic::{Diagnostic, ErrorCode};
use tally_ir::OpKind;

use super::{TypeCheckError, TypeErrorKind};

impl TypeErrorKind {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            TypeErrorKind::InvalidLeftOperand { .. } => ErrorCode::E2001,
            TypeErrorKind::InvalidRightOperand { .. } => ErrorCode::E2002,
            TypeErrorKind::MismatchedOperandTypes { .. } => ErrorCode::E2003,
            TypeErrorKind::InvalidCondition { .. } => ErrorCode::E2004,
            TypeErrorKind::InvalidCast { .. } => ErrorCode::E2005,
            TypeErrorKind::InvalidArgument { .. } => ErrorCode::E2006,
            TypeErrorKind::ReadOnly { .. } => ErrorCode::E2007,
            TypeErrorKind::MissingContext => ErrorCode::E2008,
        }
    }

    fn primary_label(&self) -> String {
        match self {
            TypeErrorKind::InvalidLeftOperand { found, .. }
            | TypeErrorKind::InvalidRightOperand { found, .. }
            | TypeErrorKind::InvalidCondition { found } => format!("this is `{found}`"),
            TypeErrorKind::MismatchedOperandTypes { left, right, .. } => {
                format!("`{left}` and `{right}` have no common type")
            }
            TypeErrorKind::InvalidCast { .. } => "invalid cast".to_owned(),
            TypeErrorKind::InvalidArgument { expected, .. } => format!("expected `{expected}`"),
            TypeErrorKind::ReadOnly { .. } => "assignment target".to_owned(),
            TypeErrorKind::MissingContext => "needs a context".to_owned(),
        }
    }

    fn note(&self) -> Option<&'static str> {
        match self {
            TypeErrorKind::InvalidLeftOperand { op, .. } if op.compound_base().is_some() => {
                Some("compound assignment needs a numeric variable")
            }
            TypeErrorKind::InvalidLeftOperand {
                op: OpKind::Assign,
                ..
            } => Some("only variables can be assigned"),
            TypeErrorKind::InvalidCast { .. } => {
                Some("strings and pointers only cast to themselves and `bool`")
            }
            TypeErrorKind::MissingContext => {
                Some("type-check with the same context the expression was parsed with")
            }
            _ => None,
        }
    }
}

impl TypeCheckError {
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
