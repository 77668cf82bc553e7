//! The checking walk.

mod rules;

use tally_ir::{Context, FuncId, ParsedExpr, PartId, PartKind, ValueType, VarId, VariableDef};
use tally_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::{TypeCheckError, TypeErrorKind, TypeTable};

pub(crate) struct Checker<'a> {
    expr: &'a ParsedExpr,
    ctx: Option<&'a Context>,
    table: TypeTable,
}

impl<'a> Checker<'a> {
    pub(crate) fn new(expr: &'a ParsedExpr, ctx: Option<&'a Context>) -> Self {
        Checker {
            expr,
            ctx,
            table: TypeTable::new(expr.arena().len()),
        }
    }

    pub(crate) fn check_root(mut self) -> Result<TypeTable, TypeCheckError> {
        let root = self.check_part(self.expr.root())?;
        self.table.set_root(root);
        Ok(self.table)
    }

    fn check_part(&mut self, id: PartId) -> Result<ValueType, TypeCheckError> {
        ensure_sufficient_stack(|| self.check_part_inner(id))
    }

    fn check_part_inner(&mut self, id: PartId) -> Result<ValueType, TypeCheckError> {
        let expr = self.expr;
        let (result, operand) = match &expr.part(id).kind {
            PartKind::Constant(value) => (value.ty(), value.ty()),
            PartKind::Variable(var) => {
                let ty = self.variable(id, *var)?.ty();
                (ty, ty)
            }
            PartKind::Group(child) => {
                let ty = self.check_part(*child)?;
                (ty, ty)
            }
            PartKind::Cast { target, slot } => {
                let Some(child) = slot.child else {
                    let kind = TypeErrorKind::InvalidCast {
                        from: ValueType::Void,
                        to: *target,
                    };
                    return Err(self.error_at(kind, id));
                };
                let from = self.check_part(child)?;
                if !from.can_cast_to(*target) {
                    let kind = TypeErrorKind::InvalidCast { from, to: *target };
                    return Err(self.error_at(kind, id));
                }
                (*target, from)
            }
            PartKind::Function { func, args } => {
                let ty = self.check_call(id, *func, args)?;
                (ty, ty)
            }
            PartKind::Operator { op, .. } => self.check_operator(id, *op)?,
        };
        trace!(part = ?id, %result, %operand, "typed");
        self.table.record(id, result, operand);
        Ok(result)
    }

    fn check_call(
        &mut self,
        id: PartId,
        func: FuncId,
        args: &[PartId],
    ) -> Result<ValueType, TypeCheckError> {
        let def = self
            .ctx
            .and_then(|ctx| ctx.function(func))
            .ok_or_else(|| self.error_at(TypeErrorKind::MissingContext, id))?;
        for (index, &arg) in args.iter().enumerate() {
            let found = self.check_part(arg)?;
            let expected = def.params().get(index).map_or(ValueType::Void, |p| p.ty);
            if !found.can_cast_to(expected) {
                let kind = TypeErrorKind::InvalidArgument {
                    function: def.name().to_owned(),
                    index,
                    expected,
                    found,
                };
                return Err(self.error_in(kind, arg));
            }
        }
        Ok(def.return_type())
    }

    fn variable(&self, id: PartId, var: VarId) -> Result<&'a VariableDef, TypeCheckError> {
        self.ctx
            .and_then(|ctx| ctx.variable(var))
            .ok_or_else(|| self.error_at(TypeErrorKind::MissingContext, id))
    }

    /// Error at the token of part `id`.
    fn error_at(&self, kind: TypeErrorKind, id: PartId) -> TypeCheckError {
        TypeCheckError::new(kind, id, self.expr.part(id).span)
    }

    /// Error covering the whole subtree of part `id`.
    fn error_in(&self, kind: TypeErrorKind, id: PartId) -> TypeCheckError {
        TypeCheckError::new(kind, id, self.expr.extent(id))
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
