//! Operator handling: push-and-connect and precedence splitting.

use smallvec::SmallVec;
use tally_ir::{OpKind, Part, PartId, PartKind, Slot, TokenIdx};
use tracing::trace;

use super::Parser;
use crate::operand_stack::OperandStack;
use crate::{ParseError, ParseErrorKind};

/// Whether `part`, used as the left operand of `op`, stays whole.
///
/// Non-operators always do. An operator stays whole when it binds tighter,
/// or equally tight for a left-associative `op`.
fn keeps_whole(part: &Part, op: OpKind) -> bool {
    match part.precedence() {
        None => true,
        Some(prec) => {
            prec > op.precedence() || (prec == op.precedence() && !op.is_right_associative())
        }
    }
}

impl Parser<'_> {
    /// Attach `id` to the operator on top of the stack if it is waiting for
    /// an operand, cascading upward as operators complete. Otherwise push.
    pub(super) fn push_and_connect(
        &mut self,
        stack: &mut OperandStack,
        mut id: PartId,
    ) -> Result<(), ParseError> {
        while let Some(top) = stack.last() {
            if !self.arena[id].is_operand_ready() || !self.awaits_operand(top) {
                break;
            }
            let locked = matches!(self.arena[top].kind, PartKind::Cast { .. });
            let slot = self.arena[top].fill_next(id, locked);
            trace!(parent = ?top, child = ?id, ?slot, "connect");
            if !self.arena[top].is_operand_ready() {
                return Ok(());
            }
            stack.pop();
            id = top;
        }
        trace!(part = ?id, depth = stack.len(), "push");
        stack.push(id, &self.arena[id])
    }

    /// An incomplete operator accepts its next operand, except that a
    /// ternary takes its second branch only after `:`.
    fn awaits_operand(&self, id: PartId) -> bool {
        let part = &self.arena[id];
        if !part.is_operator_like() || part.is_operand_ready() {
            return false;
        }
        match (part.op(), part.slots()) {
            (Some(OpKind::Ternary), [_, branch, _]) => !branch.is_filled() || branch.locked,
            _ => true,
        }
    }

    pub(super) fn operator(
        &mut self,
        stack: &mut OperandStack,
        idx: TokenIdx,
    ) -> Result<(), ParseError> {
        let text = self.stream.text(idx);
        let span = self.stream.span(idx);
        if OpKind::Ternary.secondary_symbol() == Some(text) {
            return self.ternary_else(stack, idx);
        }
        let op = OpKind::from_symbol(text).ok_or_else(|| {
            let found = text.to_owned();
            self.error(ParseErrorKind::InvalidOperator { found }, idx)
        })?;

        if op.operand_count() == 1 {
            let id = self.alloc(Part::operator(op, idx, span))?;
            return self.push_and_connect(stack, id);
        }

        let left = stack
            .pop()
            .ok_or_else(|| self.error(ParseErrorKind::MissingLeftOperand, idx))?;
        let operand = self.split_left_operand(stack, left, op)?;
        let mut part = Part::operator(op, idx, span);
        part.fill_next(operand, true);
        let id = self.alloc(part)?;
        self.push_and_connect(stack, id)
    }

    /// Find the left operand of `op` inside `left`.
    ///
    /// Descends the right-most unlocked slots of `left` until reaching a
    /// part that keeps whole. Every operator passed on the way loses that
    /// slot and goes back on the stack, outermost first, to be refilled
    /// once `op` completes.
    fn split_left_operand(
        &mut self,
        stack: &mut OperandStack,
        left: PartId,
        op: OpKind,
    ) -> Result<PartId, ParseError> {
        let mut path: SmallVec<[(PartId, usize); 8]> = SmallVec::new();
        let mut current = left;
        loop {
            let part = &self.arena[current];
            if part.is_operand_ready() && keeps_whole(part, op) {
                break;
            }
            let child = part
                .stealable_slot()
                .and_then(|slot| Some((slot, part.slots()[slot].child?)));
            let Some((slot, child)) = child else {
                return Err(self.part_error(ParseErrorKind::MissingRightOperand, current));
            };
            path.push((current, slot));
            current = child;
        }

        for &(id, slot) in &path {
            self.arena[id].slots_mut()[slot] = Slot::default();
            stack.push(id, &self.arena[id])?;
        }
        if !path.is_empty() {
            trace!(%op, operand = ?current, reopened = path.len(), "split");
        }
        Ok(current)
    }

    /// `:` locks a ternary's first branch so the next operand becomes the
    /// second.
    fn ternary_else(&mut self, stack: &mut OperandStack, idx: TokenIdx) -> Result<(), ParseError> {
        let Some(top) = stack.last() else {
            return Err(self.error(ParseErrorKind::MissingLeftOperand, idx));
        };
        let part = &mut self.arena[top];
        if part.op() == Some(OpKind::Ternary) {
            if let [_, branch, other] = part.slots_mut() {
                if branch.is_filled() && !branch.locked && !other.is_filled() {
                    branch.locked = true;
                    return Ok(());
                }
            }
        }
        if self.arena[top].is_operator_like() && !self.arena[top].is_operand_ready() {
            return Err(self.part_error(ParseErrorKind::MissingRightOperand, top));
        }
        let found = self.stream.text(idx).to_owned();
        Err(self.error(ParseErrorKind::InvalidOperator { found }, idx))
    }
}
