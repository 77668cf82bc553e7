//! Tokens produced by the tally tokenizer.

use std::fmt;

use crate::{Span, TokenIdx};

/// Coarse token classification.
///
/// Operators are not split into one kind per symbol here: the parser
/// resolves the symbol text against [`OpKind`](crate::OpKind) itself, since
/// `:` only means something while a ternary is waiting for its else branch.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    Operator,
    Parenthesis,
    Comma,
    Number,
    /// String literal. The token span covers the text between the quotes,
    /// escapes still unexpanded.
    String,
    Identifier,
}

impl TokenKind {
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Operator => "operator",
            TokenKind::Parenthesis => "parenthesis",
            TokenKind::Comma => "comma",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Identifier => "identifier",
        }
    }

    /// Whether a token of this kind ends an operand, which turns a following
    /// `-` into subtraction instead of a sign.
    #[inline]
    pub const fn ends_operand(self) -> bool {
        matches!(
            self,
            TokenKind::Number | TokenKind::String | TokenKind::Identifier
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token with its span in the source.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }

    /// Source text of the token.
    #[inline]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        self.span.slice(source)
    }

    /// Whether this is the given punctuation or operator symbol.
    #[inline]
    pub fn is(&self, source: &str, symbol: &str) -> bool {
        matches!(
            self.kind,
            TokenKind::Operator | TokenKind::Parenthesis | TokenKind::Comma
        ) && self.text(source) == symbol
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

/// A token sequence together with the source it was cut from.
///
/// Lookups go through [`TokenIdx`] so parse errors can point back at the
/// token that caused them.
#[derive(Clone, Copy, Debug)]
pub struct TokenStream<'a> {
    source: &'a str,
    tokens: &'a [Token],
}

impl<'a> TokenStream<'a> {
    pub fn new(source: &'a str, tokens: &'a [Token]) -> Self {
        TokenStream { source, tokens }
    }

    #[inline]
    pub fn source(&self) -> &'a str {
        self.source
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, idx: TokenIdx) -> Option<&'a Token> {
        self.tokens.get(idx.index())
    }

    #[inline]
    pub fn text(&self, idx: TokenIdx) -> &'a str {
        self.get(idx).map_or("", |token| token.text(self.source))
    }

    #[inline]
    pub fn span(&self, idx: TokenIdx) -> Span {
        self.get(idx).map_or(Span::point(self.end_offset()), |token| token.span)
    }

    /// Byte offset just past the source, used to anchor end-of-input errors.
    pub fn end_offset(&self) -> u32 {
        u32::try_from(self.source.len()).unwrap_or(u32::MAX)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Token;
    crate::static_assert_size!(Token, 12);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_text_and_is() {
        let source = "a += 1";
        let op = Token::new(TokenKind::Operator, Span::new(2, 4));
        assert_eq!(op.text(source), "+=");
        assert!(op.is(source, "+="));
        assert!(!op.is(source, "+"));

        let ident = Token::new(TokenKind::Identifier, Span::new(0, 1));
        assert!(!ident.is(source, "a"));
    }

    #[test]
    fn test_ends_operand() {
        assert!(TokenKind::Number.ends_operand());
        assert!(TokenKind::String.ends_operand());
        assert!(TokenKind::Identifier.ends_operand());
        assert!(!TokenKind::Parenthesis.ends_operand());
        assert!(!TokenKind::Operator.ends_operand());
    }

    #[test]
    fn test_stream_out_of_range() {
        let tokens = [Token::new(TokenKind::Number, Span::new(0, 1))];
        let stream = TokenStream::new("1", &tokens);
        assert_eq!(stream.text(TokenIdx::new(0)), "1");
        assert_eq!(stream.text(TokenIdx::new(5)), "");
        assert_eq!(stream.span(TokenIdx::new(5)), Span::point(1));
    }
}
