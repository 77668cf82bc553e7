//! Evaluation error types.

use std::fmt;

use tally_ir::{PartId, Span, ValueType};

mod diagnostics;

/// An evaluation failure, pointing at the part being executed.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct EvalError {
    pub span: Span,
    pub kind: EvalErrorKind,
    /// `None` when the failure concerns the expression as a whole.
    pub part: Option<PartId>,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum EvalErrorKind {
    /// Integer `/` or `%` with a zero right side.
    DivideByZero,
    /// A variable's binding returned a value that does not cast to the
    /// variable's declared type.
    BindingType {
        name: String,
        expected: ValueType,
        found: ValueType,
    },
    /// A native function returned a value that does not cast to its
    /// declared return type.
    ReturnType {
        function: String,
        expected: ValueType,
        found: ValueType,
    },
    EmptyExpression,
    StackOverflow { max: usize },
    /// Values left on the stack after the root finished.
    InvalidStack { remaining: usize },
    /// A variable or function part whose context is absent or does not
    /// define it.
    MissingContext,
    /// An operand whose value disagrees with the type table.
    InvalidOperand,
}

impl EvalErrorKind {
    /// Whether the error means the evaluator and the type checker disagree,
    /// rather than a problem with the expression or the host.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            EvalErrorKind::InvalidStack { .. } | EvalErrorKind::InvalidOperand
        )
    }
}

impl EvalError {
    pub fn new(kind: EvalErrorKind, part: Option<PartId>, span: Span) -> Self {
        EvalError { span, kind, part }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalErrorKind::DivideByZero => write!(f, "integer division by zero"),
            EvalErrorKind::BindingType {
                name,
                expected,
                found,
            } => write!(
                f,
                "variable `{name}` holds a `{found}`, declared as `{expected}`"
            ),
            EvalErrorKind::ReturnType {
                function,
                expected,
                found,
            } => write!(
                f,
                "function `{function}` returned a `{found}`, declared to return `{expected}`"
            ),
            EvalErrorKind::EmptyExpression => write!(f, "expression produced no value"),
            EvalErrorKind::StackOverflow { max } => {
                write!(f, "evaluation needs more than {max} stack slots")
            }
            EvalErrorKind::InvalidStack { remaining } => {
                write!(f, "evaluation left {remaining} values on the stack")
            }
            EvalErrorKind::MissingContext => {
                write!(f, "expression refers to a context that was not provided")
            }
            EvalErrorKind::InvalidOperand => {
                write!(f, "operand value does not match its checked type")
            }
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.span)
    }
}

impl std::error::Error for EvalError {}
