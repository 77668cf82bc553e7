//! Value types and the compatibility rules shared by every stage.

use std::fmt;

/// The type tag of a [`Value`](crate::Value).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ValueType {
    Void,
    Bool,
    /// Opaque host handle, compared by identity only.
    Pointer,
    String,
    R32,
    R64,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
}

impl ValueType {
    /// Every type, in declaration order.
    pub const ALL: [ValueType; 14] = [
        ValueType::Void,
        ValueType::Bool,
        ValueType::Pointer,
        ValueType::String,
        ValueType::R32,
        ValueType::R64,
        ValueType::I8,
        ValueType::I16,
        ValueType::I32,
        ValueType::I64,
        ValueType::U8,
        ValueType::U16,
        ValueType::U32,
        ValueType::U64,
    ];

    /// Name as written in a cast, e.g. `(u8)x`.
    pub const fn name(self) -> &'static str {
        match self {
            ValueType::Void => "void",
            ValueType::Bool => "bool",
            ValueType::Pointer => "pointer",
            ValueType::String => "string",
            ValueType::R32 => "r32",
            ValueType::R64 => "r64",
            ValueType::I8 => "i8",
            ValueType::I16 => "i16",
            ValueType::I32 => "i32",
            ValueType::I64 => "i64",
            ValueType::U8 => "u8",
            ValueType::U16 => "u16",
            ValueType::U32 => "u32",
            ValueType::U64 => "u64",
        }
    }

    /// Look up a type by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<ValueType> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.name().eq_ignore_ascii_case(name))
    }

    #[inline]
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            ValueType::I8
                | ValueType::I16
                | ValueType::I32
                | ValueType::I64
                | ValueType::U8
                | ValueType::U16
                | ValueType::U32
                | ValueType::U64
        )
    }

    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, ValueType::R32 | ValueType::R64)
    }

    #[inline]
    pub const fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Signed integers and floats.
    #[inline]
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            ValueType::I8
                | ValueType::I16
                | ValueType::I32
                | ValueType::I64
                | ValueType::R32
                | ValueType::R64
        )
    }

    /// Whether a value of this type has a truth value.
    #[inline]
    pub const fn is_boolable(self) -> bool {
        matches!(
            self,
            ValueType::Bool | ValueType::Pointer | ValueType::String
        ) || self.is_numeric()
    }

    /// Width in bits for numeric types, `0` for everything else.
    pub const fn bit_width(self) -> u32 {
        match self {
            ValueType::I8 | ValueType::U8 => 8,
            ValueType::I16 | ValueType::U16 => 16,
            ValueType::I32 | ValueType::U32 | ValueType::R32 => 32,
            ValueType::I64 | ValueType::U64 | ValueType::R64 => 64,
            ValueType::Void | ValueType::Bool | ValueType::Pointer | ValueType::String => 0,
        }
    }

    /// The integer type with the given width and signedness.
    pub const fn integer(bits: u32, signed: bool) -> Option<ValueType> {
        match (bits, signed) {
            (8, true) => Some(ValueType::I8),
            (16, true) => Some(ValueType::I16),
            (32, true) => Some(ValueType::I32),
            (64, true) => Some(ValueType::I64),
            (8, false) => Some(ValueType::U8),
            (16, false) => Some(ValueType::U16),
            (32, false) => Some(ValueType::U32),
            (64, false) => Some(ValueType::U64),
            _ => None,
        }
    }

    /// Whether a value of this type can be converted to `target`.
    ///
    /// Every boolable type casts to `Bool`; numbers and bools cast to any
    /// numeric type; pointers and strings only cast to themselves.
    pub fn can_cast_to(self, target: ValueType) -> bool {
        if self == target {
            return true;
        }
        match target {
            ValueType::Bool => self.is_boolable(),
            t if t.is_numeric() => self.is_numeric() || self == ValueType::Bool,
            _ => false,
        }
    }

    /// Common type two numeric operands are computed in.
    ///
    /// Any float widens to `R64`; otherwise the result is `I64` when either
    /// side is signed or `force_signed` is set, else `U64`. Returns `None`
    /// if either side is not numeric.
    pub fn widen_numeric(self, other: ValueType, force_signed: bool) -> Option<ValueType> {
        if !self.is_numeric() || !other.is_numeric() {
            return None;
        }
        Some(if self.is_float() || other.is_float() {
            ValueType::R64
        } else if force_signed || self.is_signed() || other.is_signed() {
            ValueType::I64
        } else {
            ValueType::U64
        })
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
