//! Single-pass tokenizer over the expression text.
//!
//! Produces [`Token`]s one at a time. The only context the scanner keeps is
//! the kind of the previous token, which decides whether a `-` or `.` in
//! front of a digit starts a number literal or is an operator.

use tally_ir::{Span, Token, TokenKind};

use crate::cursor::Cursor;
use crate::lex_error::{LexError, LexErrorKind};

/// Two-byte operators, checked before single bytes (longest match).
const TWO_BYTE_OPERATORS: &[[u8; 2]] = &[
    *b"==", *b"!=", *b">=", *b"<=", *b"||", *b"&&", *b"+=", *b"-=", *b"*=", *b"/=", *b"|=",
    *b"&=", *b"^=",
];

/// Single-byte operators. `:` is the second half of the ternary.
const ONE_BYTE_OPERATORS: &[u8] = b"+-*/%<>!|&^~?:=";

/// Iterator over the tokens of an expression.
///
/// Yields `Err` at most once, after which it is exhausted.
pub struct Tokenizer<'a> {
    source: &'a str,
    cursor: Cursor<'a>,
    prev: Option<TokenKind>,
    state: State,
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum State {
    Scanning,
    TooLong,
    Done,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        let state = if u32::try_from(source.len()).is_ok() {
            State::Scanning
        } else {
            State::TooLong
        };
        Tokenizer {
            source,
            cursor: Cursor::new(source),
            prev: None,
            state,
        }
    }

    fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.cursor.pos())
    }

    /// A `-` or `.` may begin a number only where an operand is expected.
    fn number_may_start(&self) -> bool {
        !self.prev.is_some_and(TokenKind::ends_operand)
    }

    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.cursor.eat_while(|b| b == b' ' || b == b'\t');
        if self.cursor.is_eof() {
            return Ok(None);
        }

        let start = self.cursor.pos();
        let kind = match self.cursor.current() {
            b'0'..=b'9' => self.number(start)?,
            b'-' | b'.' if self.number_may_start() && self.cursor.peek().is_ascii_digit() => {
                self.number(start)?
            }
            b'"' => return self.string(start).map(Some),
            b'(' | b')' => {
                self.cursor.advance();
                TokenKind::Parenthesis
            }
            b',' => {
                self.cursor.advance();
                TokenKind::Comma
            }
            b if b.is_ascii_alphabetic() || b == b'_' => {
                self.cursor.eat_while(is_identifier_continue);
                TokenKind::Identifier
            }
            _ => self.operator(start)?,
        };
        Ok(Some(Token::new(kind, self.span_from(start))))
    }

    /// Digits with at most one `.`, after an optional leading `-`.
    fn number(&mut self, start: u32) -> Result<TokenKind, LexError> {
        if self.cursor.current() == b'-' {
            self.cursor.advance();
        }
        let mut seen_dot = false;
        loop {
            match self.cursor.current() {
                b'0'..=b'9' => self.cursor.advance(),
                b'.' if !seen_dot => {
                    seen_dot = true;
                    self.cursor.advance();
                }
                _ => break,
            }
        }
        if is_identifier_continue(self.cursor.current()) {
            self.cursor.eat_while(is_identifier_continue);
            return Err(LexError::invalid_identifier(self.span_from(start)));
        }
        Ok(TokenKind::Number)
    }

    /// The token span covers the content between the quotes. Escapes are
    /// skipped here and decoded later by [`crate::unescape`].
    fn string(&mut self, start: u32) -> Result<Token, LexError> {
        self.cursor.advance();
        let content_start = self.cursor.pos();
        loop {
            if self.cursor.is_eof() {
                return Err(LexError::missing_quote(self.span_from(start)));
            }
            match self.cursor.current() {
                b'"' => break,
                b'\\' if self.cursor.pos() as usize + 1 < self.source.len() => {
                    self.cursor.advance_n(2);
                }
                _ => self.cursor.advance(),
            }
        }
        let content = self.span_from(content_start);
        self.cursor.advance();
        Ok(Token::new(TokenKind::String, content))
    }

    fn operator(&mut self, start: u32) -> Result<TokenKind, LexError> {
        let pair = [self.cursor.current(), self.cursor.peek()];
        if TWO_BYTE_OPERATORS.contains(&pair) {
            self.cursor.advance_n(2);
            return Ok(TokenKind::Operator);
        }
        if ONE_BYTE_OPERATORS.contains(&pair[0]) {
            self.cursor.advance();
            return Ok(TokenKind::Operator);
        }
        Err(self.invalid_char(start))
    }

    fn invalid_char(&self, start: u32) -> LexError {
        let found = self
            .source
            .get(start as usize..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or('\0');
        let width = u32::try_from(found.len_utf8()).unwrap_or(1);
        LexError::invalid_char(found, Span::new(start, start + width))
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            State::Done => None,
            State::TooLong => {
                self.state = State::Done;
                let len = self.source.len();
                Some(Err(LexError::new(
                    LexErrorKind::SourceTooLong { len },
                    Span::point(0),
                )))
            }
            State::Scanning => match self.next_token() {
                Ok(Some(token)) => {
                    self.prev = Some(token.kind);
                    Some(Ok(token))
                }
                Ok(None) => {
                    self.state = State::Done;
                    None
                }
                Err(err) => {
                    self.state = State::Done;
                    Some(Err(err))
                }
            },
        }
    }
}

impl std::iter::FusedIterator for Tokenizer<'_> {}

#[inline]
fn is_identifier_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
