//! Byte cursor over the expression text.
//!
//! Reads past the end return `0x00`, which no scanning predicate accepts,
//! so loops terminate at the end of input without explicit bounds checks.
//! An interior NUL byte also reads as `0x00`; [`Cursor::is_eof`] tells the
//! two apart.

#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor<'a> {
    buf: &'a [u8],
    pos: u32,
}

impl<'a> Cursor<'a> {
    /// The caller guarantees `source.len()` fits in `u32`.
    pub(crate) fn new(source: &'a str) -> Self {
        Cursor {
            buf: source.as_bytes(),
            pos: 0,
        }
    }

    /// Byte at the current position, `0x00` past the end.
    #[inline]
    pub(crate) fn current(&self) -> u8 {
        self.byte_at(self.pos as usize)
    }

    /// Byte one position ahead of current.
    #[inline]
    pub(crate) fn peek(&self) -> u8 {
        self.byte_at(self.pos as usize + 1)
    }

    #[inline]
    fn byte_at(&self, index: usize) -> u8 {
        self.buf.get(index).copied().unwrap_or(0)
    }

    #[inline]
    pub(crate) fn advance(&mut self) {
        self.pos += 1;
    }

    #[inline]
    pub(crate) fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos as usize >= self.buf.len()
    }

    #[inline]
    pub(crate) fn pos(&self) -> u32 {
        self.pos
    }

    /// Advance while `pred` holds for the current byte. `pred(0)` must be
    /// `false`.
    #[inline]
    pub(crate) fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.current()) {
            self.pos += 1;
        }
    }
}
