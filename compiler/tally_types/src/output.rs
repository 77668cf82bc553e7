//! Type checker output.

use tally_ir::{PartId, ValueType};

/// Types assigned to the parts of one expression, indexed by [`PartId`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeTable {
    results: Vec<ValueType>,
    operands: Vec<ValueType>,
    root: ValueType,
}

impl TypeTable {
    pub(crate) fn new(len: usize) -> Self {
        TypeTable {
            results: vec![ValueType::Void; len],
            operands: vec![ValueType::Void; len],
            root: ValueType::Void,
        }
    }

    pub(crate) fn record(&mut self, id: PartId, result: ValueType, operand: ValueType) {
        if let Some(slot) = self.results.get_mut(id.index()) {
            *slot = result;
        }
        if let Some(slot) = self.operands.get_mut(id.index()) {
            *slot = operand;
        }
    }

    pub(crate) fn set_root(&mut self, root: ValueType) {
        self.root = root;
    }

    /// Type the part produces.
    pub fn result_type(&self, id: PartId) -> ValueType {
        self.results
            .get(id.index())
            .copied()
            .unwrap_or(ValueType::Void)
    }

    /// Type the part computes in.
    ///
    /// For arithmetic, comparison, and bitwise operators this is the
    /// widened type both operands are cast to. For a compound assignment it
    /// is the type the old value and the right side are combined in before
    /// the result is cast back to the variable's type. For a cast it is the
    /// source type. Other parts use their result type.
    pub fn operand_type(&self, id: PartId) -> ValueType {
        self.operands
            .get(id.index())
            .copied()
            .unwrap_or(ValueType::Void)
    }

    /// Type of the whole expression.
    pub fn root_type(&self) -> ValueType {
        self.root
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
