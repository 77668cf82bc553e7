//! Parts: the nodes of a parsed expression.
//!
//! Parts live in a flat [`PartArena`] and refer to their children by
//! [`PartId`]. Operator-like parts (operators and casts) hold their
//! children in [`Slot`]s, each with a lock flag: once a slot is locked the
//! parser may no longer steal its child for a tighter-binding operator.

use std::fmt::{self, Write};
use std::ops::{Index, IndexMut};

use smallvec::SmallVec;

use crate::operator::CAST_PRECEDENCE;
use crate::{Context, FuncId, OpKind, PartId, Span, TokenIdx, Value, ValueType, VarId};

/// Most operand slots any part has (the ternary).
pub const MAX_OPERANDS: usize = 3;

/// One operand position of an operator-like part.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Slot {
    pub child: Option<PartId>,
    pub locked: bool,
}

impl Slot {
    #[inline]
    pub const fn is_filled(self) -> bool {
        self.child.is_some()
    }
}

/// Part variants.
#[derive(Clone, Debug, PartialEq)]
pub enum PartKind {
    Constant(Value),
    Variable(VarId),
    /// Only the first `op.operand_count()` slots are used.
    Operator {
        op: OpKind,
        slots: [Slot; MAX_OPERANDS],
    },
    Function {
        func: FuncId,
        args: SmallVec<[PartId; 4]>,
    },
    /// `( expr )`
    Group(PartId),
    /// `(type) expr`
    Cast {
        target: ValueType,
        slot: Slot,
    },
}

/// A node of the parsed expression.
#[derive(Clone, Debug, PartialEq)]
pub struct Part {
    pub kind: PartKind,
    /// Token the part was built from.
    pub token: TokenIdx,
    /// Span of that token.
    pub span: Span,
}

impl Part {
    pub fn new(kind: PartKind, token: TokenIdx, span: Span) -> Self {
        Part { kind, token, span }
    }

    /// Operator with all operand slots empty.
    pub fn operator(op: OpKind, token: TokenIdx, span: Span) -> Self {
        Part::new(
            PartKind::Operator {
                op,
                slots: [Slot::default(); MAX_OPERANDS],
            },
            token,
            span,
        )
    }

    /// Operand slots in syntactic order. Empty for leaf-like parts.
    pub fn slots(&self) -> &[Slot] {
        match &self.kind {
            PartKind::Operator { op, slots } => &slots[..op.operand_count()],
            PartKind::Cast { slot, .. } => std::slice::from_ref(slot),
            _ => &[],
        }
    }

    pub fn slots_mut(&mut self) -> &mut [Slot] {
        match &mut self.kind {
            PartKind::Operator { op, slots } => &mut slots[..op.operand_count()],
            PartKind::Cast { slot, .. } => std::slice::from_mut(slot),
            _ => &mut [],
        }
    }

    /// Whether the part has slots at all.
    #[inline]
    pub fn is_operator_like(&self) -> bool {
        matches!(
            self.kind,
            PartKind::Operator { .. } | PartKind::Cast { .. }
        )
    }

    /// Whether the part can be used as an operand: every slot is filled.
    pub fn is_operand_ready(&self) -> bool {
        self.slots().iter().all(|slot| slot.is_filled())
    }

    /// Binding strength of operator-like parts.
    pub fn precedence(&self) -> Option<u8> {
        match &self.kind {
            PartKind::Operator { op, .. } => Some(op.precedence()),
            PartKind::Cast { .. } => Some(CAST_PRECEDENCE),
            _ => None,
        }
    }

    pub fn op(&self) -> Option<OpKind> {
        match &self.kind {
            PartKind::Operator { op, .. } => Some(*op),
            _ => None,
        }
    }

    /// Fill the first empty slot with `child`. Returns the slot index, or
    /// `None` when every slot is taken.
    pub fn fill_next(&mut self, child: PartId, locked: bool) -> Option<usize> {
        let (index, slot) = self
            .slots_mut()
            .iter_mut()
            .enumerate()
            .find(|(_, slot)| !slot.is_filled())?;
        slot.child = Some(child);
        slot.locked = locked;
        Some(index)
    }

    /// Index of the right-most filled slot, if that slot is not locked.
    pub fn stealable_slot(&self) -> Option<usize> {
        let (index, slot) = self
            .slots()
            .iter()
            .enumerate()
            .rev()
            .find(|(_, slot)| slot.is_filled())?;
        (!slot.locked).then_some(index)
    }

    /// Children in syntactic (evaluation) order.
    pub fn children(&self) -> SmallVec<[PartId; 4]> {
        match &self.kind {
            PartKind::Constant(_) | PartKind::Variable(_) => SmallVec::new(),
            PartKind::Operator { .. } | PartKind::Cast { .. } => {
                self.slots().iter().filter_map(|slot| slot.child).collect()
            }
            PartKind::Function { args, .. } => args.clone(),
            PartKind::Group(child) => smallvec::smallvec![*child],
        }
    }
}

/// Flat storage for the parts of one expression.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PartArena {
    parts: Vec<Part>,
}

impl PartArena {
    pub fn new() -> Self {
        PartArena { parts: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        PartArena {
            parts: Vec::with_capacity(capacity),
        }
    }

    /// Store a part. Returns `None` only if the arena outgrows `u32` ids.
    pub fn alloc(&mut self, part: Part) -> Option<PartId> {
        let id = PartId::from_usize(self.parts.len())?;
        self.parts.push(part);
        Some(id)
    }

    #[inline]
    pub fn get(&self, id: PartId) -> Option<&Part> {
        self.parts.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: PartId) -> Option<&mut Part> {
        self.parts.get_mut(id.index())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Span covering a part and all of its descendants.
    pub fn extent(&self, id: PartId) -> Span {
        let mut span = self[id].span;
        let mut pending: SmallVec<[PartId; 16]> = self[id].children().into_iter().collect();
        while let Some(child) = pending.pop() {
            let part = &self[child];
            span = span.merge(part.span);
            pending.extend(part.children());
        }
        span
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "alloc keeps every index within u32"
    )]
    pub fn iter(&self) -> impl Iterator<Item = (PartId, &Part)> {
        self.parts
            .iter()
            .enumerate()
            .map(|(i, part)| (PartId::new(i as u32), part))
    }
}

impl Index<PartId> for PartArena {
    type Output = Part;

    #[inline]
    fn index(&self, id: PartId) -> &Part {
        &self.parts[id.index()]
    }
}

impl IndexMut<PartId> for PartArena {
    #[inline]
    fn index_mut(&mut self, id: PartId) -> &mut Part {
        &mut self.parts[id.index()]
    }
}

/// A parsed expression: its parts and the single root.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedExpr {
    arena: PartArena,
    root: PartId,
}

impl ParsedExpr {
    pub fn new(arena: PartArena, root: PartId) -> Self {
        ParsedExpr { arena, root }
    }

    #[inline]
    pub fn root(&self) -> PartId {
        self.root
    }

    #[inline]
    pub fn arena(&self) -> &PartArena {
        &self.arena
    }

    #[inline]
    pub fn part(&self, id: PartId) -> &Part {
        &self.arena[id]
    }

    /// The variable the whole expression consists of, if it is just one
    /// variable reference.
    pub fn as_single_variable(&self) -> Option<VarId> {
        match self.arena.get(self.root)?.kind {
            PartKind::Variable(var) => Some(var),
            _ => None,
        }
    }

    /// Span covering a part and all of its descendants.
    pub fn extent(&self, id: PartId) -> Span {
        self.arena.extent(id)
    }

    /// Render the tree as an S-expression, e.g. `(+ a (* b 100))`.
    ///
    /// Variables and functions are shown by name when `ctx` is given and by
    /// index otherwise.
    pub fn display_tree(&self, ctx: Option<&Context>) -> String {
        let mut out = String::new();
        self.write_part(&mut out, self.root, ctx);
        out
    }

    fn write_part(&self, out: &mut String, id: PartId, ctx: Option<&Context>) {
        let part = &self.arena[id];
        match &part.kind {
            PartKind::Constant(Value::String(s)) => {
                let _ = write!(out, "{s:?}");
            }
            PartKind::Constant(value) => {
                let _ = write!(out, "{value}");
            }
            PartKind::Variable(var) => match ctx.and_then(|ctx| ctx.variable(*var)) {
                Some(def) => out.push_str(def.name()),
                None => {
                    let _ = write!(out, "${}", var.raw());
                }
            },
            PartKind::Operator { op, .. } => {
                let _ = write!(out, "({op}");
                self.write_slots(out, part, ctx);
                out.push(')');
            }
            PartKind::Cast { target, .. } => {
                let _ = write!(out, "({target}");
                self.write_slots(out, part, ctx);
                out.push(')');
            }
            PartKind::Function { func, args } => {
                match ctx.and_then(|ctx| ctx.function(*func)) {
                    Some(def) => {
                        let _ = write!(out, "{}(", def.name());
                    }
                    None => {
                        let _ = write!(out, "#{}(", func.raw());
                    }
                }
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_part(out, *arg, ctx);
                }
                out.push(')');
            }
            PartKind::Group(child) => {
                out.push('[');
                self.write_part(out, *child, ctx);
                out.push(']');
            }
        }
    }

    fn write_slots(&self, out: &mut String, part: &Part, ctx: Option<&Context>) {
        for slot in part.slots() {
            out.push(' ');
            match slot.child {
                Some(child) => self.write_part(out, child, ctx),
                None => out.push('_'),
            }
        }
    }
}

impl fmt::Display for ParsedExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_tree(None))
    }
}
