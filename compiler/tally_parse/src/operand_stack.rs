//! Bounded stack of parts waiting to be connected.

use smallvec::SmallVec;
use tally_ir::{Part, PartId};

use crate::{ParseError, ParseErrorKind};

pub(crate) struct OperandStack {
    items: SmallVec<[PartId; 8]>,
    max: usize,
}

impl OperandStack {
    pub(crate) fn new(max: usize) -> Self {
        OperandStack {
            items: SmallVec::new(),
            max,
        }
    }

    /// Push `id`, whose part is `part`; the part locates an overflow error.
    pub(crate) fn push(&mut self, id: PartId, part: &Part) -> Result<(), ParseError> {
        if self.items.len() >= self.max {
            return Err(ParseError::new(
                ParseErrorKind::StackOverflow { max: self.max },
                Some(part.token),
                part.span,
            ));
        }
        self.items.push(id);
        Ok(())
    }

    #[inline]
    pub(crate) fn pop(&mut self) -> Option<PartId> {
        self.items.pop()
    }

    #[inline]
    pub(crate) fn last(&self) -> Option<PartId> {
        self.items.last().copied()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = PartId> + '_ {
        self.items.iter().copied()
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }
}
