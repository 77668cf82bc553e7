//! Type check error types.

use std::fmt;

use tally_ir::{OpKind, PartId, Span, ValueType};

mod diagnostics;

/// A type error, pointing at the part that failed.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TypeCheckError {
    pub span: Span,
    pub kind: TypeErrorKind,
    pub part: PartId,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TypeErrorKind {
    /// The left operand does not suit the operator. For assignments this
    /// is also a target that is not a variable.
    InvalidLeftOperand { op: OpKind, found: ValueType },
    /// The right operand (or the only operand of `!` and `~`) does not
    /// suit the operator.
    InvalidRightOperand { op: OpKind, found: ValueType },
    /// Each operand is fine alone but the pair has no common type.
    MismatchedOperandTypes {
        op: OpKind,
        left: ValueType,
        right: ValueType,
    },
    /// A ternary condition without a truth value.
    InvalidCondition { found: ValueType },
    InvalidCast { from: ValueType, to: ValueType },
    /// Argument `index` (zero-based) does not cast to its parameter type.
    InvalidArgument {
        function: String,
        index: usize,
        expected: ValueType,
        found: ValueType,
    },
    ReadOnly { name: String },
    /// A variable or function part whose context is absent or does not
    /// define it.
    MissingContext,
}

impl TypeCheckError {
    pub fn new(kind: TypeErrorKind, part: PartId, span: Span) -> Self {
        TypeCheckError { span, kind, part }
    }
}

impl fmt::Display for TypeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeErrorKind::InvalidLeftOperand { op, found } => {
                write!(f, "invalid left operand of type `{found}` for {}", op.name())
            }
            TypeErrorKind::InvalidRightOperand { op, found } => {
                write!(f, "invalid operand of type `{found}` for {}", op.name())
            }
            TypeErrorKind::MismatchedOperandTypes { op, left, right } => {
                write!(f, "cannot apply {} to `{left}` and `{right}`", op.name())
            }
            TypeErrorKind::InvalidCondition { found } => {
                write!(f, "condition of type `{found}` has no truth value")
            }
            TypeErrorKind::InvalidCast { from, to } => {
                write!(f, "cannot cast `{from}` to `{to}`")
            }
            TypeErrorKind::InvalidArgument {
                function,
                index,
                expected,
                found,
            } => write!(
                f,
                "argument {} of `{function}` is `{found}`, expected `{expected}`",
                index + 1
            ),
            TypeErrorKind::ReadOnly { name } => write!(f, "cannot assign to read-only `{name}`"),
            TypeErrorKind::MissingContext => {
                write!(f, "expression refers to a context that was not provided")
            }
        }
    }
}

impl fmt::Display for TypeCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.span)
    }
}

impl std::error::Error for TypeCheckError {}
