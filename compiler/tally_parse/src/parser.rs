//! Parser state and the per-token dispatch.

mod call;
mod connect;

use smallvec::SmallVec;
use tally_ir::{
    Context, Limits, ParsedExpr, Part, PartArena, PartId, PartKind, Slot, Span, TokenIdx,
    TokenKind, TokenStream, Value, ValueType,
};
use tally_lexer::{number_literal, unescape};
use tally_stack::ensure_sufficient_stack;

use crate::operand_stack::OperandStack;
use crate::{ParseError, ParseErrorKind};

pub(crate) struct Parser<'a> {
    stream: TokenStream<'a>,
    ctx: Option<&'a Context>,
    limits: Limits,
    arena: PartArena,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(stream: TokenStream<'a>, ctx: Option<&'a Context>, limits: Limits) -> Self {
        Parser {
            stream,
            ctx,
            limits,
            arena: PartArena::with_capacity(stream.len().min(limits.max_parts)),
            depth: 0,
        }
    }

    pub(crate) fn parse_expression(mut self) -> Result<ParsedExpr, ParseError> {
        // The tokenizer rejects sources past `u32::MAX` bytes, so the token
        // count always fits.
        let end = u32::try_from(self.stream.len()).unwrap_or(u32::MAX);
        let root = self.parse_span(0, end, Span::point(self.stream.end_offset()))?;
        Ok(ParsedExpr::new(self.arena, root))
    }

    /// Parse tokens `start..end` into one part. `anchor` locates an empty
    /// span.
    fn parse_span(&mut self, start: u32, end: u32, anchor: Span) -> Result<PartId, ParseError> {
        let mut stack = OperandStack::new(self.limits.max_parse_stack);
        let mut pos = start;
        while pos < end {
            pos = self.parse_token(&mut stack, pos, end)?;
        }
        self.take_single(&mut stack, ParseErrorKind::EmptyExpression, anchor)
    }

    /// Parse the comma-separated argument tokens `start..end`.
    fn parse_arguments(
        &mut self,
        start: u32,
        end: u32,
        anchor: Span,
    ) -> Result<SmallVec<[PartId; 4]>, ParseError> {
        let mut args = SmallVec::new();
        if start == end {
            return Ok(args);
        }
        let mut stack = OperandStack::new(self.limits.max_parse_stack);
        let mut pos = start;
        while pos < end {
            let idx = TokenIdx::new(pos);
            if self.kind_at(pos) == Some(TokenKind::Comma) {
                let comma = self.stream.span(idx);
                args.push(self.take_single(&mut stack, ParseErrorKind::EmptyArgument, comma)?);
                pos += 1;
                continue;
            }
            pos = self.parse_token(&mut stack, pos, end)?;
        }
        args.push(self.take_single(&mut stack, ParseErrorKind::EmptyArgument, anchor)?);
        Ok(args)
    }

    /// Handle the token at `pos` and return the position after everything
    /// it consumed.
    fn parse_token(
        &mut self,
        stack: &mut OperandStack,
        pos: u32,
        end: u32,
    ) -> Result<u32, ParseError> {
        let idx = TokenIdx::new(pos);
        let Some(token) = self.stream.get(idx) else {
            return Ok(end);
        };
        let text = self.stream.text(idx);
        match token.kind {
            TokenKind::Number => {
                let value = number_literal(text)
                    .ok_or_else(|| self.error(ParseErrorKind::InvalidConstant, idx))?;
                self.push_part(stack, Part::new(PartKind::Constant(value), idx, token.span))?;
                Ok(pos + 1)
            }
            TokenKind::String => {
                let value = Value::string(unescape(text));
                self.push_part(stack, Part::new(PartKind::Constant(value), idx, token.span))?;
                Ok(pos + 1)
            }
            TokenKind::Identifier => self.identifier(stack, pos, end),
            TokenKind::Parenthesis if text == "(" => self.parenthesis(stack, pos, end),
            TokenKind::Parenthesis => Err(self.error(ParseErrorKind::MismatchParenthesis, idx)),
            TokenKind::Operator => {
                self.operator(stack, idx)?;
                Ok(pos + 1)
            }
            TokenKind::Comma => Err(self.error(ParseErrorKind::UnexpectedComma, idx)),
        }
    }

    fn identifier(
        &mut self,
        stack: &mut OperandStack,
        pos: u32,
        end: u32,
    ) -> Result<u32, ParseError> {
        let idx = TokenIdx::new(pos);
        let text = self.stream.text(idx);
        let span = self.stream.span(idx);

        let boolean = if text.eq_ignore_ascii_case("true") {
            Some(true)
        } else if text.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        };
        if let Some(b) = boolean {
            self.push_part(stack, Part::new(PartKind::Constant(Value::Bool(b)), idx, span))?;
            return Ok(pos + 1);
        }

        if pos + 1 < end && self.is_open_paren(pos + 1) {
            return self.call(stack, pos, end);
        }

        let var = self
            .ctx
            .and_then(|ctx| ctx.lookup_variable(text))
            .ok_or_else(|| {
                let name = text.to_owned();
                self.error(ParseErrorKind::UnknownVariable { name }, idx)
            })?;
        self.push_part(stack, Part::new(PartKind::Variable(var), idx, span))?;
        Ok(pos + 1)
    }

    /// `(type)` becomes a cast waiting for its operand; anything else in
    /// parentheses is parsed on its own and grouped.
    fn parenthesis(
        &mut self,
        stack: &mut OperandStack,
        open: u32,
        end: u32,
    ) -> Result<u32, ParseError> {
        let close = self.matching_paren(open, end)?;
        let open_idx = TokenIdx::new(open);
        let span = self
            .stream
            .span(open_idx)
            .merge(self.stream.span(TokenIdx::new(close)));

        if close == open + 2 && self.kind_at(open + 1) == Some(TokenKind::Identifier) {
            let name = self.stream.text(TokenIdx::new(open + 1));
            if let Some(target) = ValueType::from_name(name) {
                let cast = PartKind::Cast {
                    target,
                    slot: Slot::default(),
                };
                self.push_part(stack, Part::new(cast, open_idx, span))?;
                return Ok(close + 1);
            }
        }

        let inner = self.nested(open_idx, |p| p.parse_span(open + 1, close, span))?;
        self.push_part(stack, Part::new(PartKind::Group(inner), open_idx, span))?;
        Ok(close + 1)
    }

    /// Position of the `)` closing the `(` at `open`.
    fn matching_paren(&self, open: u32, end: u32) -> Result<u32, ParseError> {
        let mut depth = 0usize;
        for pos in open..end {
            if self.kind_at(pos) != Some(TokenKind::Parenthesis) {
                continue;
            }
            if self.is_open_paren(pos) {
                depth += 1;
            } else {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Ok(pos);
                }
            }
        }
        Err(self.error(ParseErrorKind::MismatchParenthesis, TokenIdx::new(open)))
    }

    /// Run `f` one nesting level deeper.
    fn nested<T>(
        &mut self,
        token: TokenIdx,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.limits.max_nesting_depth {
            let max = self.limits.max_nesting_depth;
            return Err(self.error(ParseErrorKind::NestingTooDeep { max }, token));
        }
        self.depth += 1;
        let result = ensure_sufficient_stack(|| f(self));
        self.depth -= 1;
        result
    }

    /// Drain `stack`, which must hold exactly one complete part.
    fn take_single(
        &self,
        stack: &mut OperandStack,
        empty: ParseErrorKind,
        anchor: Span,
    ) -> Result<PartId, ParseError> {
        if let Some(unfinished) = stack.iter().find(|&id| !self.arena[id].is_operand_ready()) {
            return Err(self.part_error(ParseErrorKind::MissingRightOperand, unfinished));
        }
        let first = stack.iter().next();
        let second = stack.iter().nth(1);
        match (first, second) {
            (None, _) => Err(ParseError::new(empty, None, anchor)),
            (Some(previous), Some(extra)) => {
                let err = self.part_error(ParseErrorKind::MissingOperator, extra);
                Err(err.with_related(self.arena.extent(previous)))
            }
            (Some(root), None) => {
                stack.clear();
                Ok(root)
            }
        }
    }

    /// Allocate `part` and connect it to the stack.
    fn push_part(&mut self, stack: &mut OperandStack, part: Part) -> Result<(), ParseError> {
        let id = self.alloc(part)?;
        self.push_and_connect(stack, id)
    }

    fn alloc(&mut self, part: Part) -> Result<PartId, ParseError> {
        let max = self.limits.max_parts;
        let (token, span) = (part.token, part.span);
        if self.arena.len() >= max {
            return Err(ParseError::new(ParseErrorKind::TooManyParts { max }, Some(token), span));
        }
        self.arena
            .alloc(part)
            .ok_or_else(|| ParseError::new(ParseErrorKind::TooManyParts { max }, Some(token), span))
    }

    #[inline]
    fn kind_at(&self, pos: u32) -> Option<TokenKind> {
        self.stream.get(TokenIdx::new(pos)).map(|token| token.kind)
    }

    #[inline]
    fn is_open_paren(&self, pos: u32) -> bool {
        self.stream
            .get(TokenIdx::new(pos))
            .is_some_and(|token| token.is(self.stream.source(), "("))
    }

    fn error(&self, kind: ParseErrorKind, token: TokenIdx) -> ParseError {
        ParseError::new(kind, Some(token), self.stream.span(token))
    }

    fn part_error(&self, kind: ParseErrorKind, id: PartId) -> ParseError {
        let part = &self.arena[id];
        ParseError::new(kind, Some(part.token), part.span)
    }
}
