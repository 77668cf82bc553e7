//! Tokenizer for tally expressions.
//!
//! Turns expression text into a flat list of [`Token`]s. Tokens carry a
//! kind and a byte span; their text is read back from the source when the
//! parser needs it, so tokenizing never allocates per token.
//!
//! Token kinds: operators (longest match), parentheses, commas, numbers,
//! strings (span covers the content between the quotes), and identifiers.
//! Whitespace is spaces and tabs. An expression is a single line, so line
//! breaks are invalid characters.
//!
//! A `-` or `.` directly followed by a digit starts a number literal unless
//! the previous token was a number, string, or identifier. `a-1` is a
//! subtraction while `a*-1` multiplies by a negative literal.

mod cook;
mod cursor;
mod lex_error;
mod scanner;

pub use cook::{number_literal, unescape};
pub use lex_error::{LexError, LexErrorKind};
pub use scanner::Tokenizer;
use tally_ir::Token;
use tracing::{debug, trace};

/// Tokenize a whole expression, stopping at the first error.
#[tracing::instrument(level = "trace", skip_all, fields(len = source.len()))]
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let tokens = Tokenizer::new(source).collect::<Result<Vec<_>, _>>();
    match &tokens {
        Ok(tokens) => {
            debug!(count = tokens.len(), "tokenized expression");
            for token in tokens {
                trace!(kind = token.kind.name(), span = ?token.span, text = token.text(source));
            }
        }
        Err(err) => debug!(%err, "tokenizer failed"),
    }
    tokens
}
