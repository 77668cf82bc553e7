//! Bounded stack of intermediate values.

use smallvec::SmallVec;
use tally_ir::Value;

use crate::EvalErrorKind;

pub(crate) struct ValueStack {
    items: SmallVec<[Value; 8]>,
    max: usize,
}

impl ValueStack {
    pub(crate) fn new(max: usize) -> Self {
        ValueStack {
            items: SmallVec::new(),
            max,
        }
    }

    pub(crate) fn push(&mut self, value: Value) -> Result<(), EvalErrorKind> {
        if self.items.len() >= self.max {
            return Err(EvalErrorKind::StackOverflow { max: self.max });
        }
        self.items.push(value);
        Ok(())
    }

    /// Pop one value. An empty stack means the schedule and the tree
    /// disagree.
    pub(crate) fn pop(&mut self) -> Result<Value, EvalErrorKind> {
        self.items
            .pop()
            .ok_or(EvalErrorKind::InvalidStack { remaining: 0 })
    }

    /// Pop the top `count` values, returned bottom first.
    pub(crate) fn pop_n(&mut self, count: usize) -> Result<SmallVec<[Value; 4]>, EvalErrorKind> {
        let start = self
            .items
            .len()
            .checked_sub(count)
            .ok_or(EvalErrorKind::InvalidStack {
                remaining: self.items.len(),
            })?;
        Ok(self.items.drain(start..).collect())
    }

    /// The single remaining value.
    pub(crate) fn finish(mut self) -> Result<Value, EvalErrorKind> {
        match self.items.len() {
            0 => Err(EvalErrorKind::EmptyExpression),
            1 => self.pop(),
            remaining => Err(EvalErrorKind::InvalidStack { remaining }),
        }
    }
}
