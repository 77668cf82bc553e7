//! Function calls.

use tally_ir::{ArityMismatch, FuncId, Part, PartKind, TokenIdx, MAX_ARGUMENTS};

use super::Parser;
use crate::operand_stack::OperandStack;
use crate::{ParseError, ParseErrorKind};

impl Parser<'_> {
    /// Parse `name(args..)` starting at the name token and return the
    /// position after the closing parenthesis.
    ///
    /// Trailing optional parameters the call leaves out are filled with
    /// their default values as constant parts.
    pub(super) fn call(
        &mut self,
        stack: &mut OperandStack,
        pos: u32,
        end: u32,
    ) -> Result<u32, ParseError> {
        let name_idx = TokenIdx::new(pos);
        let open = pos + 1;
        let close = self.matching_paren(open, end)?;
        let close_idx = TokenIdx::new(close);
        let close_span = self.stream.span(close_idx);
        let span = self.stream.span(name_idx).merge(close_span);

        let mut args = self.nested(TokenIdx::new(open), |p| {
            p.parse_arguments(open + 1, close, close_span)
        })?;
        let func = self.resolve_call(name_idx, args.len())?;

        let defaults = self
            .ctx
            .and_then(|ctx| ctx.function(func))
            .and_then(|def| def.params().get(args.len()..))
            .unwrap_or_default();
        for param in defaults {
            if let Some(value) = &param.default {
                let constant = Part::new(PartKind::Constant(value.clone()), close_idx, close_span);
                args.push(self.alloc(constant)?);
            }
        }

        self.push_part(stack, Part::new(PartKind::Function { func, args }, name_idx, span))?;
        Ok(close + 1)
    }

    fn resolve_call(&self, name_idx: TokenIdx, arg_count: usize) -> Result<FuncId, ParseError> {
        let name = self.stream.text(name_idx);
        if arg_count > MAX_ARGUMENTS {
            let kind = ParseErrorKind::TooManyArguments {
                name: name.to_owned(),
                max: MAX_ARGUMENTS,
            };
            return Err(self.error(kind, name_idx));
        }
        let resolved = match self.ctx {
            Some(ctx) => ctx.resolve_function(name, arg_count),
            None => Err(ArityMismatch::Unknown),
        };
        resolved.map_err(|mismatch| {
            let name = name.to_owned();
            let kind = match mismatch {
                ArityMismatch::Unknown => ParseErrorKind::UnknownFunction { name },
                ArityMismatch::TooMany { max } => ParseErrorKind::TooManyArguments { name, max },
                ArityMismatch::Missing { min } => ParseErrorKind::MissingArguments { name, min },
            };
            self.error(kind, name_idx)
        })
    }
}
