//! Type checker for tally expressions.
//!
//! One post-order walk over a [`ParsedExpr`] that assigns every part a
//! [`ValueType`], stopping at the first error. The result is a
//! [`TypeTable`] side table: the evaluator reads from it which type each
//! operator computes in and which type each part must produce.
//!
//! Numeric operands never narrow. Mixed arithmetic widens to a 64-bit type
//! (`R64` for any float, `I64` for any signed operand or a subtraction,
//! `U64` otherwise), so `(u8)200 + (u8)200` is `400u64`.
//!
//! [`ValueType`]: tally_ir::ValueType

mod check;
mod output;
mod type_error;

use check::Checker;
pub use output::TypeTable;
use tally_ir::{Context, ParsedExpr};
pub use type_error::{TypeCheckError, TypeErrorKind};

/// Type-check an expression against the host context.
///
/// Variables and functions need the context that was used to parse the
/// expression; without one they fail with
/// [`TypeErrorKind::MissingContext`].
#[tracing::instrument(level = "trace", skip_all, fields(parts = expr.arena().len()))]
pub fn check(expr: &ParsedExpr, ctx: Option<&Context>) -> Result<TypeTable, TypeCheckError> {
    let result = Checker::new(expr, ctx).check_root();
    match &result {
        Ok(table) => tracing::debug!(root = %table.root_type(), "type checked"),
        Err(err) => tracing::debug!(%err, "type check failed"),
    }
    result
}
