//! Runtime values.

use std::fmt;
use std::sync::Arc;

use crate::ValueType;

/// Opaque host handle plus an application-defined type tag.
///
/// The engine never dereferences a pointer; it only compares handles and
/// tests them for null.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Pointer {
    pub handle: usize,
    pub type_id: u64,
}

impl Pointer {
    pub const NULL: Pointer = Pointer {
        handle: 0,
        type_id: 0,
    };

    #[inline]
    pub const fn new(handle: usize, type_id: u64) -> Self {
        Pointer { handle, type_id }
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.handle == 0
    }
}

/// A tagged scalar value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Void,
    Bool(bool),
    Pointer(Pointer),
    String(Arc<str>),
    R32(f32),
    R64(f64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
}

/// Numeric payload lifted to 64 bits, used by casts.
#[derive(Copy, Clone, Debug)]
enum Scalar {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

/// Convert a [`Scalar`] to a primitive with Rust `as` semantics: integers
/// wrap, floats saturate toward the target's range.
macro_rules! scalar_as {
    ($scalar:expr, $ty:ty) => {
        match $scalar {
            Scalar::Signed(v) => v as $ty,
            Scalar::Unsigned(v) => v as $ty,
            Scalar::Float(v) => v as $ty,
        }
    };
}

impl Value {
    /// Build a string value.
    pub fn string(text: impl Into<Arc<str>>) -> Self {
        Value::String(text.into())
    }

    pub fn ty(&self) -> ValueType {
        match self {
            Value::Void => ValueType::Void,
            Value::Bool(_) => ValueType::Bool,
            Value::Pointer(_) => ValueType::Pointer,
            Value::String(_) => ValueType::String,
            Value::R32(_) => ValueType::R32,
            Value::R64(_) => ValueType::R64,
            Value::I8(_) => ValueType::I8,
            Value::I16(_) => ValueType::I16,
            Value::I32(_) => ValueType::I32,
            Value::I64(_) => ValueType::I64,
            Value::U8(_) => ValueType::U8,
            Value::U16(_) => ValueType::U16,
            Value::U32(_) => ValueType::U32,
            Value::U64(_) => ValueType::U64,
        }
    }

    /// Truth value, or `None` for `Void`.
    pub fn truthiness(&self) -> Option<bool> {
        Some(match self {
            Value::Void => return None,
            Value::Bool(b) => *b,
            Value::Pointer(p) => !p.is_null(),
            Value::String(s) => !s.is_empty(),
            Value::R32(v) => *v != 0.0,
            Value::R64(v) => *v != 0.0,
            Value::I8(v) => *v != 0,
            Value::I16(v) => *v != 0,
            Value::I32(v) => *v != 0,
            Value::I64(v) => *v != 0,
            Value::U8(v) => *v != 0,
            Value::U16(v) => *v != 0,
            Value::U32(v) => *v != 0,
            Value::U64(v) => *v != 0,
        })
    }

    fn scalar(&self) -> Option<Scalar> {
        Some(match *self {
            Value::Bool(b) => Scalar::Unsigned(u64::from(b)),
            Value::R32(v) => Scalar::Float(f64::from(v)),
            Value::R64(v) => Scalar::Float(v),
            Value::I8(v) => Scalar::Signed(i64::from(v)),
            Value::I16(v) => Scalar::Signed(i64::from(v)),
            Value::I32(v) => Scalar::Signed(i64::from(v)),
            Value::I64(v) => Scalar::Signed(v),
            Value::U8(v) => Scalar::Unsigned(u64::from(v)),
            Value::U16(v) => Scalar::Unsigned(u64::from(v)),
            Value::U32(v) => Scalar::Unsigned(u64::from(v)),
            Value::U64(v) => Scalar::Unsigned(v),
            Value::Void | Value::Pointer(_) | Value::String(_) => return None,
        })
    }

    /// Convert to `target` following [`ValueType::can_cast_to`].
    ///
    /// Returns `None` when the cast is not allowed.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap,
        clippy::cast_precision_loss,
        reason = "casts follow `as` conversion semantics"
    )]
    pub fn cast(&self, target: ValueType) -> Option<Value> {
        if self.ty() == target {
            return Some(self.clone());
        }
        if !self.ty().can_cast_to(target) {
            return None;
        }
        if target == ValueType::Bool {
            return self.truthiness().map(Value::Bool);
        }
        let scalar = self.scalar()?;
        Some(match target {
            ValueType::R32 => Value::R32(scalar_as!(scalar, f32)),
            ValueType::R64 => Value::R64(scalar_as!(scalar, f64)),
            ValueType::I8 => Value::I8(scalar_as!(scalar, i8)),
            ValueType::I16 => Value::I16(scalar_as!(scalar, i16)),
            ValueType::I32 => Value::I32(scalar_as!(scalar, i32)),
            ValueType::I64 => Value::I64(scalar_as!(scalar, i64)),
            ValueType::U8 => Value::U8(scalar_as!(scalar, u8)),
            ValueType::U16 => Value::U16(scalar_as!(scalar, u16)),
            ValueType::U32 => Value::U32(scalar_as!(scalar, u32)),
            ValueType::U64 => Value::U64(scalar_as!(scalar, u64)),
            ValueType::Void | ValueType::Bool | ValueType::Pointer | ValueType::String => {
                return None
            }
        })
    }

    /// The zero value of a type. `Void` for `Void`, empty for `String`.
    pub fn zero(ty: ValueType) -> Value {
        match ty {
            ValueType::Void => Value::Void,
            ValueType::Bool => Value::Bool(false),
            ValueType::Pointer => Value::Pointer(Pointer::NULL),
            ValueType::String => Value::string(""),
            ValueType::R32 => Value::R32(0.0),
            ValueType::R64 => Value::R64(0.0),
            ValueType::I8 => Value::I8(0),
            ValueType::I16 => Value::I16(0),
            ValueType::I32 => Value::I32(0),
            ValueType::I64 => Value::I64(0),
            ValueType::U8 => Value::U8(0),
            ValueType::U16 => Value::U16(0),
            ValueType::U32 => Value::U32(0),
            ValueType::U64 => Value::U64(0),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<Pointer> for Value {
    fn from(v: Pointer) -> Self {
        Value::Pointer(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::string(v)
    }
}

macro_rules! impl_from_primitive {
    ($($prim:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$prim> for Value {
                fn from(v: $prim) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_primitive! {
    f32 => R32,
    f64 => R64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => write!(f, "void"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Pointer(p) => write!(f, "pointer({:#x}:{})", p.handle, p.type_id),
            Value::String(s) => write!(f, "{s}"),
            Value::R32(v) => write!(f, "{v}"),
            Value::R64(v) => write!(f, "{v}"),
            Value::I8(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::U8(v) => write!(f, "{v}"),
            Value::U16(v) => write!(f, "{v}"),
            Value::U32(v) => write!(f, "{v}"),
            Value::U64(v) => write!(f, "{v}"),
        }
    }
}
