//! Tally IR: the types every stage of the expression engine shares.
//!
//! - [`Span`]s and [`Token`]s from the tokenizer
//! - [`Value`]s and [`ValueType`]s with their cast rules
//! - [`OpKind`] with symbols, operand counts and precedence
//! - [`Part`]s stored flat in a [`PartArena`], addressed by [`PartId`]
//! - the host [`Context`] of variables and native functions
//! - [`Limits`] bounding each run

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod context;
mod idx;
mod limits;
mod operator;
mod part;
mod span;
mod token;
mod value;
mod value_type;

pub use context::{
    is_identifier, ArityMismatch, Binding, Context, FunctionDef, NativeFunction, Param,
    RegistryError, VariableDef, MAX_ARGUMENTS,
};
pub use idx::{FuncId, PartId, TokenIdx, VarId};
pub use limits::Limits;
pub use operator::{OpCategory, OpKind, CAST_PRECEDENCE};
pub use part::{ParsedExpr, Part, PartArena, PartKind, Slot, MAX_OPERANDS};
pub use span::{Span, SpanError};
pub use token::{Token, TokenKind, TokenStream};
pub use value::{Pointer, Value};
pub use value_type::ValueType;
