//! Converting raw token text into values.
//!
//! The scanner only finds token boundaries. These functions give string and
//! number tokens their meaning once the parser asks for it.

use std::borrow::Cow;

use tally_ir::Value;

/// Expand the escapes `\\ \" \' \n \r \t` in string-literal content.
///
/// An unrecognized escape is kept verbatim, backslash included. A trailing
/// lone backslash is kept. Borrows when there is nothing to expand.
pub fn unescape(raw: &str) -> Cow<'_, str> {
    if !raw.contains('\\') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    Cow::Owned(out)
}

/// Significant decimal digits in a number literal.
///
/// Leading zeros are skipped, trailing zeros are dropped, zeros between
/// non-zero digits count.
fn significant_digits(text: &str) -> u32 {
    let mut count = 0;
    let mut pending_zeros = 0;
    for b in text.bytes().filter(u8::is_ascii_digit) {
        if b != b'0' {
            count += pending_zeros + 1;
            pending_zeros = 0;
        } else if count > 0 {
            pending_zeros += 1;
        }
    }
    count
}

/// Type and value of a number token.
///
/// With a `.` the literal is `R64` at 7 or more significant digits (past
/// what an `f32` mantissa holds) and `R32` otherwise. Without a `.` it is
/// the narrowest signed type when a `-` is present, else the narrowest
/// unsigned type. `None` when the text overflows 64 bits or does not parse.
pub fn number_literal(text: &str) -> Option<Value> {
    if text.contains('.') {
        return if significant_digits(text) >= 7 {
            text.parse::<f64>().ok().map(Value::R64)
        } else {
            text.parse::<f32>().ok().map(Value::R32)
        };
    }

    if text.starts_with('-') {
        let v: i64 = text.parse().ok()?;
        Some(if let Ok(v) = i8::try_from(v) {
            Value::I8(v)
        } else if let Ok(v) = i16::try_from(v) {
            Value::I16(v)
        } else if let Ok(v) = i32::try_from(v) {
            Value::I32(v)
        } else {
            Value::I64(v)
        })
    } else {
        let v: u64 = text.parse().ok()?;
        Some(if let Ok(v) = u8::try_from(v) {
            Value::U8(v)
        } else if let Ok(v) = u16::try_from(v) {
            Value::U16(v)
        } else if let Ok(v) = u32::try_from(v) {
            Value::U32(v)
        } else {
            Value::U64(v)
        })
    }
}

#[cfg(test)]
mod tests;
