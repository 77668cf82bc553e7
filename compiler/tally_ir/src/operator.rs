//! Operators.
//!
//! One flat enum covers unary, binary, ternary and assignment operators so
//! the parser can treat every operator node the same way: a symbol, an
//! operand count and a precedence level.

use std::fmt;

/// Operator kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OpKind {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Gt,
    GtEq,
    Lt,
    LtEq,

    // Logical
    Or,
    And,
    Not,

    // Bitwise
    BitOr,
    BitAnd,
    BitXor,
    BitNot,

    /// `cond ? a : b`
    Ternary,

    // Assignment
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    BitOrAssign,
    BitAndAssign,
    BitXorAssign,
}

/// Operator families, as far as type rules are concerned.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OpCategory {
    Arithmetic,
    Comparison,
    Logical,
    Bitwise,
    Ternary,
    Assignment,
}

/// Precedence of type casts, which bind like unary operators.
pub const CAST_PRECEDENCE: u8 = 12;

impl OpKind {
    pub const ALL: [OpKind; 27] = [
        OpKind::Add,
        OpKind::Sub,
        OpKind::Mul,
        OpKind::Div,
        OpKind::Mod,
        OpKind::Eq,
        OpKind::NotEq,
        OpKind::Gt,
        OpKind::GtEq,
        OpKind::Lt,
        OpKind::LtEq,
        OpKind::Or,
        OpKind::And,
        OpKind::Not,
        OpKind::BitOr,
        OpKind::BitAnd,
        OpKind::BitXor,
        OpKind::BitNot,
        OpKind::Ternary,
        OpKind::Assign,
        OpKind::AddAssign,
        OpKind::SubAssign,
        OpKind::MulAssign,
        OpKind::DivAssign,
        OpKind::BitOrAssign,
        OpKind::BitAndAssign,
        OpKind::BitXorAssign,
    ];

    /// Returns the source-level symbol that introduces this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Or => "||",
            Self::And => "&&",
            Self::Not => "!",
            Self::BitOr => "|",
            Self::BitAnd => "&",
            Self::BitXor => "^",
            Self::BitNot => "~",
            Self::Ternary => "?",
            Self::Assign => "=",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::MulAssign => "*=",
            Self::DivAssign => "/=",
            Self::BitOrAssign => "|=",
            Self::BitAndAssign => "&=",
            Self::BitXorAssign => "^=",
        }
    }

    /// Symbol that separates the later operands, if the operator has one.
    pub const fn secondary_symbol(self) -> Option<&'static str> {
        match self {
            Self::Ternary => Some(":"),
            _ => None,
        }
    }

    /// Resolve an operator by exact symbol.
    pub fn from_symbol(symbol: &str) -> Option<OpKind> {
        Self::ALL.into_iter().find(|op| op.as_symbol() == symbol)
    }

    /// Number of operands the operator takes.
    pub const fn operand_count(self) -> usize {
        match self {
            Self::Not | Self::BitNot => 1,
            Self::Ternary => 3,
            _ => 2,
        }
    }

    /// Binding strength; higher binds tighter.
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Not | Self::BitNot => 12,
            Self::Mul | Self::Div | Self::Mod => 11,
            Self::Add | Self::Sub => 10,
            Self::Gt | Self::GtEq | Self::Lt | Self::LtEq => 9,
            Self::Eq | Self::NotEq => 8,
            Self::BitAnd => 7,
            Self::BitXor => 6,
            Self::BitOr => 5,
            Self::And => 4,
            Self::Or => 3,
            Self::Ternary => 2,
            Self::Assign
            | Self::AddAssign
            | Self::SubAssign
            | Self::MulAssign
            | Self::DivAssign
            | Self::BitOrAssign
            | Self::BitAndAssign
            | Self::BitXorAssign => 1,
        }
    }

    /// Right associative operators group `a op b op c` as `a op (b op c)`.
    pub const fn is_right_associative(self) -> bool {
        matches!(self.category(), OpCategory::Assignment)
    }

    pub const fn category(self) -> OpCategory {
        match self {
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod => OpCategory::Arithmetic,
            Self::Eq | Self::NotEq | Self::Gt | Self::GtEq | Self::Lt | Self::LtEq => {
                OpCategory::Comparison
            }
            Self::Or | Self::And | Self::Not => OpCategory::Logical,
            Self::BitOr | Self::BitAnd | Self::BitXor | Self::BitNot => OpCategory::Bitwise,
            Self::Ternary => OpCategory::Ternary,
            Self::Assign
            | Self::AddAssign
            | Self::SubAssign
            | Self::MulAssign
            | Self::DivAssign
            | Self::BitOrAssign
            | Self::BitAndAssign
            | Self::BitXorAssign => OpCategory::Assignment,
        }
    }

    /// For compound assignments, the operator that combines the old value
    /// with the right-hand side (`+=` gives `+`).
    pub const fn compound_base(self) -> Option<OpKind> {
        match self {
            Self::AddAssign => Some(Self::Add),
            Self::SubAssign => Some(Self::Sub),
            Self::MulAssign => Some(Self::Mul),
            Self::DivAssign => Some(Self::Div),
            Self::BitOrAssign => Some(Self::BitOr),
            Self::BitAndAssign => Some(Self::BitAnd),
            Self::BitXorAssign => Some(Self::BitXor),
            _ => None,
        }
    }

    /// Human-readable name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "addition",
            Self::Sub => "subtraction",
            Self::Mul => "multiplication",
            Self::Div => "division",
            Self::Mod => "modulo",
            Self::Eq => "equality",
            Self::NotEq => "inequality",
            Self::Gt => "greater-than",
            Self::GtEq => "greater-or-equal",
            Self::Lt => "less-than",
            Self::LtEq => "less-or-equal",
            Self::Or => "logical or",
            Self::And => "logical and",
            Self::Not => "logical not",
            Self::BitOr => "bitwise or",
            Self::BitAnd => "bitwise and",
            Self::BitXor => "bitwise xor",
            Self::BitNot => "bitwise not",
            Self::Ternary => "ternary",
            Self::Assign => "assignment",
            Self::AddAssign => "add-assignment",
            Self::SubAssign => "subtract-assignment",
            Self::MulAssign => "multiply-assignment",
            Self::DivAssign => "divide-assignment",
            Self::BitOrAssign => "or-assignment",
            Self::BitAndAssign => "and-assignment",
            Self::BitXorAssign => "xor-assignment",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}
