//! Operator typing rules.
//!
//! The rule functions are pure: they take operand types and return the
//! type the operator computes in, or the kind of error. The checker decides
//! which part an error points at.

use tally_ir::{OpCategory, OpKind, PartId, PartKind, ValueType, MAX_OPERANDS};

use super::Checker;
use crate::{TypeCheckError, TypeErrorKind};

/// Common type of arithmetic operands. Subtraction always computes
/// signed so `3 - 5` is negative rather than wrapping.
pub(crate) fn arithmetic_type(
    op: OpKind,
    left: ValueType,
    right: ValueType,
) -> Result<ValueType, TypeErrorKind> {
    if !left.is_numeric() {
        return Err(TypeErrorKind::InvalidLeftOperand { op, found: left });
    }
    if !right.is_numeric() {
        return Err(TypeErrorKind::InvalidRightOperand { op, found: right });
    }
    let force_signed = matches!(op, OpKind::Sub | OpKind::SubAssign);
    left.widen_numeric(right, force_signed)
        .ok_or(TypeErrorKind::MismatchedOperandTypes { op, left, right })
}

/// Type both sides of a comparison are compared in.
///
/// Numbers compare across types after widening. Other types compare only
/// with themselves, and only for (in)equality.
pub(crate) fn comparison_type(
    op: OpKind,
    left: ValueType,
    right: ValueType,
) -> Result<ValueType, TypeErrorKind> {
    if left == ValueType::Void {
        return Err(TypeErrorKind::InvalidLeftOperand { op, found: left });
    }
    if right == ValueType::Void {
        return Err(TypeErrorKind::InvalidRightOperand { op, found: right });
    }
    if let Some(common) = left.widen_numeric(right, false) {
        return Ok(common);
    }
    if left != right {
        return Err(TypeErrorKind::MismatchedOperandTypes { op, left, right });
    }
    if matches!(op, OpKind::Eq | OpKind::NotEq) {
        Ok(left)
    } else {
        Err(TypeErrorKind::InvalidLeftOperand { op, found: left })
    }
}

/// Result type of a binary bitwise operator.
///
/// `|` and `^` take the wider width and are signed when a signed operand
/// is at least as wide as the other. `&` takes the narrower width and is
/// signed when either operand is.
pub(crate) fn bitwise_type(
    op: OpKind,
    left: ValueType,
    right: ValueType,
) -> Result<ValueType, TypeErrorKind> {
    if !left.is_integer() {
        return Err(TypeErrorKind::InvalidLeftOperand { op, found: left });
    }
    if !right.is_integer() {
        return Err(TypeErrorKind::InvalidRightOperand { op, found: right });
    }
    let (lw, rw) = (left.bit_width(), right.bit_width());
    let (bits, signed) = if matches!(op, OpKind::BitAnd | OpKind::BitAndAssign) {
        (lw.min(rw), left.is_signed() || right.is_signed())
    } else {
        (
            lw.max(rw),
            (left.is_signed() && lw >= rw) || (right.is_signed() && rw >= lw),
        )
    };
    ValueType::integer(bits, signed).ok_or(TypeErrorKind::MismatchedOperandTypes {
        op,
        left,
        right,
    })
}

/// Common type of the two ternary branches.
pub(crate) fn branch_type(left: ValueType, right: ValueType) -> Result<ValueType, TypeErrorKind> {
    if left == right {
        return Ok(left);
    }
    left.widen_numeric(right, false)
        .ok_or(TypeErrorKind::MismatchedOperandTypes {
            op: OpKind::Ternary,
            left,
            right,
        })
}

impl Checker<'_> {
    /// Type an operator part. Returns its result type and the type it
    /// computes in.
    pub(super) fn check_operator(
        &mut self,
        id: PartId,
        op: OpKind,
    ) -> Result<(ValueType, ValueType), TypeCheckError> {
        let expr = self.expr;
        let mut children = [id; MAX_OPERANDS];
        for (child, slot) in children.iter_mut().zip(expr.part(id).slots()) {
            *child = slot.child.ok_or_else(|| {
                let kind = TypeErrorKind::InvalidRightOperand {
                    op,
                    found: ValueType::Void,
                };
                self.error_at(kind, id)
            })?;
        }
        let [first, second, third] = children;

        if op.operand_count() == 1 {
            let child = first;
            let ty = self.check_part(child)?;
            let valid = match op.category() {
                OpCategory::Bitwise => ty.is_integer(),
                _ => ty.is_boolable(),
            };
            if !valid {
                let kind = TypeErrorKind::InvalidRightOperand { op, found: ty };
                return Err(self.error_in(kind, child));
            }
            return Ok(match op.category() {
                OpCategory::Bitwise => (ty, ty),
                _ => (ValueType::Bool, ValueType::Bool),
            });
        }

        if op == OpKind::Ternary {
            let (cond, then, other) = (first, second, third);
            let cond_ty = self.check_part(cond)?;
            let then_ty = self.check_part(then)?;
            let other_ty = self.check_part(other)?;
            if !cond_ty.is_boolable() {
                let kind = TypeErrorKind::InvalidCondition { found: cond_ty };
                return Err(self.error_in(kind, cond));
            }
            let ty = branch_type(then_ty, other_ty).map_err(|kind| self.error_at(kind, id))?;
            return Ok((ty, ty));
        }

        let (left, right) = (first, second);
        if op.category() == OpCategory::Assignment {
            return self.check_assignment(id, op, left, right);
        }

        let left_ty = self.check_part(left)?;
        let right_ty = self.check_part(right)?;
        let computed = match op.category() {
            OpCategory::Arithmetic => arithmetic_type(op, left_ty, right_ty),
            OpCategory::Comparison => comparison_type(op, left_ty, right_ty),
            OpCategory::Bitwise => bitwise_type(op, left_ty, right_ty),
            _ => logical_type(op, left_ty, right_ty),
        }
        .map_err(|kind| self.blame(kind, id, left, right))?;

        Ok(match op.category() {
            OpCategory::Comparison => (ValueType::Bool, computed),
            _ => (computed, computed),
        })
    }

    fn check_assignment(
        &mut self,
        id: PartId,
        op: OpKind,
        target: PartId,
        value: PartId,
    ) -> Result<(ValueType, ValueType), TypeCheckError> {
        let expr = self.expr;
        let target_ty = self.check_part(target)?;
        let PartKind::Variable(var) = expr.part(target).kind else {
            let kind = TypeErrorKind::InvalidLeftOperand {
                op,
                found: target_ty,
            };
            return Err(self.error_in(kind, target));
        };
        let def = self.variable(target, var)?;
        let value_ty = self.check_part(value)?;
        if def.is_read_only() {
            let kind = TypeErrorKind::ReadOnly {
                name: def.name().to_owned(),
            };
            return Err(self.error_at(kind, target));
        }

        let var_ty = def.ty();
        let computed = match op.compound_base().map(OpKind::category) {
            None if value_ty.can_cast_to(var_ty) => Ok(var_ty),
            None => Err(TypeErrorKind::InvalidRightOperand {
                op,
                found: value_ty,
            }),
            Some(OpCategory::Bitwise) => bitwise_type(op, var_ty, value_ty),
            Some(_) => arithmetic_type(op, var_ty, value_ty),
        }
        .map_err(|kind| self.blame(kind, id, target, value))?;
        Ok((var_ty, computed))
    }

    /// Point an operand error at the operand, anything else at the
    /// operator.
    fn blame(
        &self,
        kind: TypeErrorKind,
        op: PartId,
        left: PartId,
        right: PartId,
    ) -> TypeCheckError {
        match kind {
            TypeErrorKind::InvalidLeftOperand { .. } => self.error_in(kind, left),
            TypeErrorKind::InvalidRightOperand { .. } => self.error_in(kind, right),
            _ => self.error_at(kind, op),
        }
    }
}

/// `&&` and `||` need a truth value on both sides and compute in `Bool`.
fn logical_type(
    op: OpKind,
    left: ValueType,
    right: ValueType,
) -> Result<ValueType, TypeErrorKind> {
    if !left.is_boolable() {
        return Err(TypeErrorKind::InvalidLeftOperand { op, found: left });
    }
    if !right.is_boolable() {
        return Err(TypeErrorKind::InvalidRightOperand { op, found: right });
    }
    Ok(ValueType::Bool)
}
