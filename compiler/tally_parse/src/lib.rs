//! Parser for tally expressions.
//!
//! Builds a [`ParsedExpr`] from the tokenizer's output in a single pass,
//! keeping a small stack of in-progress parts instead of recursing per
//! precedence level:
//!
//! - operands are attached to the operator waiting on top of the stack
//!   ("push and connect")
//! - a binary operator takes the part before it as its left operand, first
//!   splitting off the right-most piece of a lower-precedence operator so
//!   `a + b * c` groups as `a + (b * c)`
//! - locked slots mark operands that must not be split off again: the left
//!   operand of a binary operator, the operand of a cast, and a ternary's
//!   first branch once its `:` has been seen
//!
//! Parentheses and argument lists recurse on their inner token range,
//! bounded by [`Limits::max_nesting_depth`].
//!
//! Names resolve against the host [`Context`] while parsing, so an unknown
//! variable or a call with the wrong number of arguments fails here.

mod error;
mod operand_stack;
mod parser;

pub use error::{ParseError, ParseErrorKind};
use parser::Parser;
use tally_ir::{Context, Limits, ParsedExpr, TokenStream};

/// Parse a token stream into an expression tree.
#[tracing::instrument(level = "trace", skip_all, fields(tokens = stream.len()))]
pub fn parse(
    stream: TokenStream<'_>,
    ctx: Option<&Context>,
    limits: &Limits,
) -> Result<ParsedExpr, ParseError> {
    let result = Parser::new(stream, ctx, *limits).parse_expression();
    match &result {
        Ok(expr) => tracing::debug!(
            parts = expr.arena().len(),
            tree = %expr.display_tree(ctx),
            "parsed"
        ),
        Err(err) => tracing::debug!(%err, "parse failed"),
    }
    result
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
