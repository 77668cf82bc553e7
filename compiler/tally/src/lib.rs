//! Tally: an embedded, statically typed expression engine.
//!
//! The host registers typed variables and native functions in a
//! [`Context`], then evaluates text expressions against it:
//!
//! ```
//! use tally::{evaluate_str, Context, Value, ValueType, VariableDef};
//!
//! let mut ctx = Context::new();
//! ctx.add_variable(VariableDef::new("speed", ValueType::U32, 40u32))?;
//! let value = evaluate_str("speed = speed * 2 + 1", Some(&mut ctx))?;
//! assert_eq!(value, Value::U32(81));
//! assert_eq!(ctx.value_of("speed"), Some(Value::U32(81)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Pipeline
//!
//! 1. `tally_lexer` splits the text into tokens.
//! 2. `tally_parse` builds a part tree with a precedence-driven operand
//!    stack, resolving names against the context.
//! 3. `tally_types` assigns every part a type, widening mixed numeric
//!    operands to 64 bits.
//! 4. `tally_eval` runs the tree on a bounded value stack and writes
//!    assignments back through variable bindings.
//!
//! Every stage stops at its first failure. [`Error`] says which stage
//! failed and where, and renders a diagnostic with the source underlined.
//!
//! # Logging
//!
//! Stages emit `tracing` events. [`init_tracing`] installs a hierarchical
//! subscriber when `RUST_LOG` is set, e.g. `RUST_LOG=tally_parse=trace`.

mod engine;
mod error;

use std::sync::Once;

pub use engine::{evaluate_str, Engine, Expression};
pub use error::{Error, Stage};
pub use tally_diagnostic::{Diagnostic, ErrorCode};
pub use tally_eval::{EvalError, EvalErrorKind};
pub use tally_ir::{
    Binding, Context, FunctionDef, Limits, NativeFunction, ParsedExpr, Pointer, RegistryError,
    Span, Value, ValueType, VariableDef, MAX_ARGUMENTS,
};
pub use tally_lexer::{LexError, LexErrorKind};
pub use tally_parse::{ParseError, ParseErrorKind};
pub use tally_types::{TypeCheckError, TypeErrorKind, TypeTable};

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber for debug output.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once; only
/// the first call has an effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let layer = HierarchicalLayer::new(2)
                .with_targets(true)
                .with_bracketed_fields(true);
            // Another subscriber may already be installed by the host
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init();
        }
    });
}
