//! The stack machine.
//!
//! Evaluation runs in two passes. [`schedule`] flattens the part tree into
//! post-order without recursion; [`Machine::step`] then executes each part
//! against the value stack. Assignment targets are never scheduled: the
//! assignment reads and writes its variable through the context itself.

use smallvec::SmallVec;
use tally_ir::{
    Context, FuncId, OpCategory, OpKind, ParsedExpr, PartId, PartKind, Slot, Value, ValueType,
    VarId, VariableDef,
};
use tally_types::TypeTable;
use tracing::trace;

use crate::operators::{evaluate_binary, evaluate_logical, evaluate_unary, truth};
use crate::value_stack::ValueStack;
use crate::{EvalError, EvalErrorKind};

/// Parts in execution order: children before parents, left to right.
pub(crate) fn schedule(expr: &ParsedExpr) -> Vec<PartId> {
    let mut order = Vec::with_capacity(expr.arena().len());
    let mut pending: Vec<(PartId, bool)> = vec![(expr.root(), false)];
    while let Some((id, expanded)) = pending.pop() {
        if expanded {
            order.push(id);
            continue;
        }
        pending.push((id, true));
        let part = expr.part(id);
        let children = part.children();
        let operands = match part.op().map(OpKind::category) {
            Some(OpCategory::Assignment) => children.get(1..).unwrap_or(&[]),
            _ => &children[..],
        };
        pending.extend(operands.iter().rev().map(|&child| (child, false)));
    }
    order
}

pub(crate) struct Machine<'a> {
    expr: &'a ParsedExpr,
    types: &'a TypeTable,
    ctx: Option<&'a mut Context>,
    stack: ValueStack,
}

impl<'a> Machine<'a> {
    pub(crate) fn new(
        expr: &'a ParsedExpr,
        types: &'a TypeTable,
        ctx: Option<&'a mut Context>,
        max_stack: usize,
    ) -> Self {
        Machine {
            expr,
            types,
            ctx,
            stack: ValueStack::new(max_stack),
        }
    }

    pub(crate) fn run(mut self) -> Result<Value, EvalError> {
        if let Some(value) = self.toggle()? {
            return Ok(value);
        }
        let expr = self.expr;
        for id in schedule(expr) {
            self.step(id)?;
        }
        self.stack
            .finish()
            .map_err(|kind| EvalError::new(kind, None, expr.extent(expr.root())))
    }

    /// Interactive shortcut: an expression that is one writable `bool`
    /// variable flips it and yields the new value.
    fn toggle(&mut self) -> Result<Option<Value>, EvalError> {
        let Some(var) = self.expr.as_single_variable() else {
            return Ok(None);
        };
        let root = self.expr.root();
        let span = self.expr.part(root).span;
        let Some(def) = self
            .ctx
            .as_deref_mut()
            .filter(|ctx| ctx.is_interactive())
            .and_then(|ctx| ctx.variable_mut(var))
        else {
            return Ok(None);
        };
        if def.ty() != ValueType::Bool || def.is_read_only() {
            return Ok(None);
        }
        let current = read_binding(def).map_err(|kind| EvalError::new(kind, Some(root), span))?;
        let flipped = Value::Bool(current != Value::Bool(true));
        def.set(flipped.clone());
        trace!(variable = def.name(), value = %flipped, "toggled");
        Ok(Some(flipped))
    }

    fn step(&mut self, id: PartId) -> Result<(), EvalError> {
        let expr = self.expr;
        let value = match &expr.part(id).kind {
            PartKind::Constant(value) => value.clone(),
            PartKind::Variable(var) => self.read_variable(id, *var)?,
            // The child's value already sits on the stack.
            PartKind::Group(_) => return Ok(()),
            PartKind::Cast { target, .. } => {
                let value = self.pop(id)?;
                self.cast(id, &value, *target)?
            }
            PartKind::Function { func, args } => self.call(id, *func, args.len())?,
            PartKind::Operator { op, slots } => self.operator(id, *op, slots)?,
        };
        trace!(part = ?id, %value, "push");
        self.stack.push(value).map_err(|kind| self.error(kind, id))
    }

    fn operator(&mut self, id: PartId, op: OpKind, slots: &[Slot]) -> Result<Value, EvalError> {
        match op.category() {
            OpCategory::Assignment => {
                let target = slots.first().and_then(|slot| slot.child);
                self.assign(id, op, target)
            }
            OpCategory::Ternary => {
                let other = self.pop(id)?;
                let then = self.pop(id)?;
                let cond = self.pop(id)?;
                let chosen = if truth(&cond).map_err(|kind| self.error(kind, id))? {
                    then
                } else {
                    other
                };
                self.cast(id, &chosen, self.types.result_type(id))
            }
            _ if op.operand_count() == 1 => {
                let value = self.pop(id)?;
                let value = self.cast(id, &value, self.types.operand_type(id))?;
                evaluate_unary(op, &value).map_err(|kind| self.error(kind, id))
            }
            OpCategory::Logical => {
                let right = self.pop(id)?;
                let left = self.pop(id)?;
                evaluate_logical(op, &left, &right).map_err(|kind| self.error(kind, id))
            }
            _ => {
                let ty = self.types.operand_type(id);
                let right = self.pop(id)?;
                let left = self.pop(id)?;
                let (left, right) = (self.cast(id, &left, ty)?, self.cast(id, &right, ty)?);
                evaluate_binary(op, &left, &right).map_err(|kind| self.error(kind, id))
            }
        }
    }

    /// `=` and the compound forms. The value written back is cast to the
    /// variable's type and is also the result.
    fn assign(
        &mut self,
        id: PartId,
        op: OpKind,
        target: Option<PartId>,
    ) -> Result<Value, EvalError> {
        let expr = self.expr;
        let value = self.pop(id)?;
        let Some(&PartKind::Variable(var)) = target.map(|target| &expr.part(target).kind) else {
            return Err(self.error(EvalErrorKind::InvalidOperand, id));
        };
        let def = self.variable(id, var)?;
        let var_ty = def.ty();
        let combined = match op.compound_base() {
            None => value,
            Some(base) => {
                let ty = self.types.operand_type(id);
                let old = read_binding(def).map_err(|kind| self.error(kind, id))?;
                let (old, value) = (self.cast(id, &old, ty)?, self.cast(id, &value, ty)?);
                evaluate_binary(base, &old, &value).map_err(|kind| self.error(kind, id))?
            }
        };
        let new_value = self.cast(id, &combined, var_ty)?;

        let span = expr.part(id).span;
        match self.ctx.as_deref_mut().and_then(|ctx| ctx.variable_mut(var)) {
            Some(def) => def.set(new_value.clone()),
            None => {
                return Err(EvalError::new(
                    EvalErrorKind::MissingContext,
                    Some(id),
                    span,
                ))
            }
        }
        trace!(variable = ?var, value = %new_value, "assigned");
        Ok(new_value)
    }

    fn call(&mut self, id: PartId, func: FuncId, arg_count: usize) -> Result<Value, EvalError> {
        let args = self
            .stack
            .pop_n(arg_count)
            .map_err(|kind| self.error(kind, id))?;
        let def = self
            .ctx
            .as_deref()
            .and_then(|ctx| ctx.function(func))
            .ok_or_else(|| self.error(EvalErrorKind::MissingContext, id))?;
        if args.len() != def.arity() {
            return Err(self.error(EvalErrorKind::InvalidOperand, id));
        }
        let args = args
            .iter()
            .zip(def.params())
            .map(|(arg, param)| arg.cast(param.ty))
            .collect::<Option<SmallVec<[Value; 4]>>>()
            .ok_or_else(|| self.error(EvalErrorKind::InvalidOperand, id))?;

        let result = def.call(&args);
        let expected = def.return_type();
        result.cast(expected).ok_or_else(|| {
            let kind = EvalErrorKind::ReturnType {
                function: def.name().to_owned(),
                expected,
                found: result.ty(),
            };
            self.error(kind, id)
        })
    }

    fn read_variable(&self, id: PartId, var: VarId) -> Result<Value, EvalError> {
        let def = self.variable(id, var)?;
        read_binding(def).map_err(|kind| self.error(kind, id))
    }

    fn variable(&self, id: PartId, var: VarId) -> Result<&VariableDef, EvalError> {
        self.ctx
            .as_deref()
            .and_then(|ctx| ctx.variable(var))
            .ok_or_else(|| self.error(EvalErrorKind::MissingContext, id))
    }

    fn pop(&mut self, id: PartId) -> Result<Value, EvalError> {
        self.stack.pop().map_err(|kind| self.error(kind, id))
    }

    /// Cast to a type the checker already approved.
    fn cast(&self, id: PartId, value: &Value, ty: ValueType) -> Result<Value, EvalError> {
        value
            .cast(ty)
            .ok_or_else(|| self.error(EvalErrorKind::InvalidOperand, id))
    }

    fn error(&self, kind: EvalErrorKind, id: PartId) -> EvalError {
        EvalError::new(kind, Some(id), self.expr.part(id).span)
    }
}

/// Current value of a variable, cast to its declared type.
fn read_binding(def: &VariableDef) -> Result<Value, EvalErrorKind> {
    let value = def.get();
    value
        .cast(def.ty())
        .ok_or_else(|| EvalErrorKind::BindingType {
            name: def.name().to_owned(),
            expected: def.ty(),
            found: value.ty(),
        })
}
