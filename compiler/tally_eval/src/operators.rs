//! Operator implementations for the evaluator.
//!
//! Operands arrive already cast to the type the checker resolved for the
//! operator, so both sides of a binary operator share one type. Integers
//! are lifted to 64 bits, computed with wrapping arithmetic, and cast back
//! to that type.

use std::cmp::Ordering;

use tally_ir::{OpCategory, OpKind, Pointer, Value, ValueType};

use crate::EvalErrorKind;

/// Evaluate a binary arithmetic, comparison, or bitwise operator.
///
/// Compound assignments pass their base operator. Comparisons produce
/// `Bool`; everything else produces a value of the operand type.
pub fn evaluate_binary(op: OpKind, left: &Value, right: &Value) -> Result<Value, EvalErrorKind> {
    let ty = left.ty();
    if right.ty() != ty {
        return Err(EvalErrorKind::InvalidOperand);
    }
    let result = match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => eval_bool_binary(*a, *b, op),
        (Value::String(a), Value::String(b)) => eval_string_binary(a, b, op),
        (Value::Pointer(a), Value::Pointer(b)) => eval_pointer_binary(*a, *b, op),
        (Value::R32(a), Value::R32(b)) => eval_float_binary(f64::from(*a), f64::from(*b), op),
        (Value::R64(a), Value::R64(b)) => eval_float_binary(*a, *b, op),
        _ if ty.is_integer() && ty.is_signed() => {
            eval_signed_binary(lift_signed(left)?, lift_signed(right)?, op)
        }
        _ if ty.is_integer() => {
            eval_unsigned_binary(lift_unsigned(left)?, lift_unsigned(right)?, op)
        }
        _ => Err(EvalErrorKind::InvalidOperand),
    }?;
    if result.ty() == ValueType::Bool {
        Ok(result)
    } else {
        result.cast(ty).ok_or(EvalErrorKind::InvalidOperand)
    }
}

/// Evaluate `!` or `~`.
pub fn evaluate_unary(op: OpKind, value: &Value) -> Result<Value, EvalErrorKind> {
    match op {
        OpKind::Not => truth(value).map(|b| Value::Bool(!b)),
        OpKind::BitNot => {
            let ty = value.ty();
            let flipped = match ty {
                t if t.is_integer() && t.is_signed() => Value::I64(!lift_signed(value)?),
                t if t.is_integer() => Value::U64(!lift_unsigned(value)?),
                _ => return Err(EvalErrorKind::InvalidOperand),
            };
            flipped.cast(ty).ok_or(EvalErrorKind::InvalidOperand)
        }
        _ => Err(EvalErrorKind::InvalidOperand),
    }
}

/// Evaluate `&&` or `||`. Both sides are already evaluated.
pub(crate) fn evaluate_logical(
    op: OpKind,
    left: &Value,
    right: &Value,
) -> Result<Value, EvalErrorKind> {
    let (a, b) = (truth(left)?, truth(right)?);
    match op {
        OpKind::And => Ok(Value::Bool(a && b)),
        OpKind::Or => Ok(Value::Bool(a || b)),
        _ => Err(EvalErrorKind::InvalidOperand),
    }
}

/// Truth value of an operand. `Void` has none.
pub(crate) fn truth(value: &Value) -> Result<bool, EvalErrorKind> {
    value.truthiness().ok_or(EvalErrorKind::InvalidOperand)
}

fn lift_signed(value: &Value) -> Result<i64, EvalErrorKind> {
    match value.cast(ValueType::I64) {
        Some(Value::I64(v)) => Ok(v),
        _ => Err(EvalErrorKind::InvalidOperand),
    }
}

fn lift_unsigned(value: &Value) -> Result<u64, EvalErrorKind> {
    match value.cast(ValueType::U64) {
        Some(Value::U64(v)) => Ok(v),
        _ => Err(EvalErrorKind::InvalidOperand),
    }
}

/// Signed integer operators, wrapping on overflow.
fn eval_signed_binary(a: i64, b: i64, op: OpKind) -> Result<Value, EvalErrorKind> {
    match op {
        OpKind::Add => Ok(Value::I64(a.wrapping_add(b))),
        OpKind::Sub => Ok(Value::I64(a.wrapping_sub(b))),
        OpKind::Mul => Ok(Value::I64(a.wrapping_mul(b))),
        OpKind::Div if b == 0 => Err(EvalErrorKind::DivideByZero),
        OpKind::Div => Ok(Value::I64(a.wrapping_div(b))),
        OpKind::Mod if b == 0 => Err(EvalErrorKind::DivideByZero),
        OpKind::Mod => Ok(Value::I64(a.wrapping_rem(b))),
        OpKind::BitOr => Ok(Value::I64(a | b)),
        OpKind::BitAnd => Ok(Value::I64(a & b)),
        OpKind::BitXor => Ok(Value::I64(a ^ b)),
        _ => compare(a.cmp(&b), op),
    }
}

/// Unsigned integer operators, wrapping on overflow.
fn eval_unsigned_binary(a: u64, b: u64, op: OpKind) -> Result<Value, EvalErrorKind> {
    match op {
        OpKind::Add => Ok(Value::U64(a.wrapping_add(b))),
        OpKind::Sub => Ok(Value::U64(a.wrapping_sub(b))),
        OpKind::Mul => Ok(Value::U64(a.wrapping_mul(b))),
        OpKind::Div if b == 0 => Err(EvalErrorKind::DivideByZero),
        OpKind::Div => Ok(Value::U64(a / b)),
        OpKind::Mod if b == 0 => Err(EvalErrorKind::DivideByZero),
        OpKind::Mod => Ok(Value::U64(a % b)),
        OpKind::BitOr => Ok(Value::U64(a | b)),
        OpKind::BitAnd => Ok(Value::U64(a & b)),
        OpKind::BitXor => Ok(Value::U64(a ^ b)),
        _ => compare(a.cmp(&b), op),
    }
}

/// Float operators. Division by zero follows IEEE 754; `%` is the
/// floating remainder.
fn eval_float_binary(a: f64, b: f64, op: OpKind) -> Result<Value, EvalErrorKind> {
    match op {
        OpKind::Add => Ok(Value::R64(a + b)),
        OpKind::Sub => Ok(Value::R64(a - b)),
        OpKind::Mul => Ok(Value::R64(a * b)),
        OpKind::Div => Ok(Value::R64(a / b)),
        OpKind::Mod => Ok(Value::R64(a % b)),
        // NaN compares unordered: only `!=` holds
        _ => match a.partial_cmp(&b) {
            Some(ordering) => compare(ordering, op),
            None if op == OpKind::NotEq => Ok(Value::Bool(true)),
            None if op.category() == OpCategory::Comparison => Ok(Value::Bool(false)),
            None => Err(EvalErrorKind::InvalidOperand),
        },
    }
}

fn eval_bool_binary(a: bool, b: bool, op: OpKind) -> Result<Value, EvalErrorKind> {
    match op {
        OpKind::Eq => Ok(Value::Bool(a == b)),
        OpKind::NotEq => Ok(Value::Bool(a != b)),
        _ => Err(EvalErrorKind::InvalidOperand),
    }
}

fn eval_string_binary(a: &str, b: &str, op: OpKind) -> Result<Value, EvalErrorKind> {
    match op {
        OpKind::Eq => Ok(Value::Bool(a == b)),
        OpKind::NotEq => Ok(Value::Bool(a != b)),
        _ => Err(EvalErrorKind::InvalidOperand),
    }
}

fn eval_pointer_binary(a: Pointer, b: Pointer, op: OpKind) -> Result<Value, EvalErrorKind> {
    match op {
        OpKind::Eq => Ok(Value::Bool(a == b)),
        OpKind::NotEq => Ok(Value::Bool(a != b)),
        _ => Err(EvalErrorKind::InvalidOperand),
    }
}

fn compare(ordering: Ordering, op: OpKind) -> Result<Value, EvalErrorKind> {
    let holds = match op {
        OpKind::Eq => ordering == Ordering::Equal,
        OpKind::NotEq => ordering != Ordering::Equal,
        OpKind::Gt => ordering == Ordering::Greater,
        OpKind::GtEq => ordering != Ordering::Less,
        OpKind::Lt => ordering == Ordering::Less,
        OpKind::LtEq => ordering != Ordering::Greater,
        _ => return Err(EvalErrorKind::InvalidOperand),
    };
    Ok(Value::Bool(holds))
}
