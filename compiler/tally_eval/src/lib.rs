//! Stack-machine evaluator for tally expressions.
//!
//! Evaluation takes a parsed expression together with the [`TypeTable`]
//! the checker produced for it. Every operand is cast to the type the
//! checker resolved before an operator runs, so the operators themselves
//! only ever see matching operand types.
//!
//! # Semantics
//!
//! - Integer arithmetic wraps in its 64-bit computation type; integer `/`
//!   and `%` by zero fail with [`EvalErrorKind::DivideByZero`].
//! - Every operand is evaluated. `&&`, `||` and `?:` do not short-circuit,
//!   so side effects in an unselected branch still happen.
//! - Assignments write through the variable's binding and yield the value
//!   written.
//! - When the context is interactive, an expression that is nothing but a
//!   writable `bool` variable toggles that variable.
//!
//! [`TypeTable`]: tally_types::TypeTable

mod eval_error;
mod machine;
mod operators;
mod value_stack;

pub use eval_error::{EvalError, EvalErrorKind};
use machine::Machine;
pub use operators::{evaluate_binary, evaluate_unary};
use tally_ir::{Context, Limits, ParsedExpr, Value};
use tally_types::TypeTable;

/// Evaluate a type-checked expression.
///
/// `ctx` must be the context the expression was parsed and checked with.
/// It is borrowed mutably because assignments write variables back.
#[tracing::instrument(level = "trace", skip_all, fields(parts = expr.arena().len()))]
pub fn evaluate(
    expr: &ParsedExpr,
    types: &TypeTable,
    ctx: Option<&mut Context>,
    limits: &Limits,
) -> Result<Value, EvalError> {
    let result = Machine::new(expr, types, ctx, limits.max_eval_stack).run();
    match &result {
        Ok(value) => tracing::debug!(%value, "evaluated"),
        Err(err) => tracing::debug!(%err, "evaluation failed"),
    }
    result
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
