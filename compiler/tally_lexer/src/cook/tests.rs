use std::borrow::Cow;

use pretty_assertions::assert_eq;
use tally_ir::Value;

use super::{number_literal, significant_digits, unescape};

#[test]
fn test_unescape_borrows_plain_text() {
    assert!(matches!(unescape("plain"), Cow::Borrowed("plain")));
}

#[test]
fn test_unescape_known_escapes() {
    assert_eq!(unescape(r#"str\"ing"#), "str\"ing");
    assert_eq!(unescape(r"a\\b"), "a\\b");
    assert_eq!(unescape(r"it\'s"), "it's");
    assert_eq!(unescape(r"1\n2\r3\t4"), "1\n2\r3\t4");
}

#[test]
fn test_unescape_unknown_kept_verbatim() {
    assert_eq!(unescape(r"\q"), "\\q");
    assert_eq!(unescape(r"C:\path"), "C:\\path");
}

#[test]
fn test_unescape_trailing_backslash() {
    assert_eq!(unescape("end\\"), "end\\");
}

#[test]
fn test_significant_digits() {
    assert_eq!(significant_digits("0"), 0);
    assert_eq!(significant_digits(".0"), 0);
    assert_eq!(significant_digits("007"), 1);
    assert_eq!(significant_digits("1.02"), 3);
    assert_eq!(significant_digits("100.0"), 1);
    assert_eq!(significant_digits("-10.01"), 4);
    assert_eq!(significant_digits("1234567890.1234567890"), 19);
}

#[test]
fn test_unsigned_literals_pick_narrowest() {
    assert_eq!(number_literal("0"), Some(Value::U8(0)));
    assert_eq!(number_literal("255"), Some(Value::U8(255)));
    assert_eq!(number_literal("256"), Some(Value::U16(256)));
    assert_eq!(number_literal("65536"), Some(Value::U32(65_536)));
    assert_eq!(number_literal("4294967296"), Some(Value::U64(4_294_967_296)));
    assert_eq!(
        number_literal("18446744073709551615"),
        Some(Value::U64(u64::MAX))
    );
}

#[test]
fn test_signed_literals_pick_narrowest() {
    assert_eq!(number_literal("-1"), Some(Value::I8(-1)));
    assert_eq!(number_literal("-0"), Some(Value::I8(0)));
    assert_eq!(number_literal("-128"), Some(Value::I8(-128)));
    assert_eq!(number_literal("-129"), Some(Value::I16(-129)));
    assert_eq!(number_literal("-40000"), Some(Value::I32(-40_000)));
    assert_eq!(number_literal("-3000000000"), Some(Value::I64(-3_000_000_000)));
}

#[test]
fn test_float_literals() {
    assert_eq!(number_literal(".0"), Some(Value::R32(0.0)));
    assert_eq!(number_literal("7."), Some(Value::R32(7.0)));
    assert_eq!(number_literal("-1.02"), Some(Value::R32(-1.02)));
    assert_eq!(number_literal("123456.7"), Some(Value::R64(123_456.7)));
    assert_eq!(
        number_literal("1234567890.1234567890"),
        Some(Value::R64(1_234_567_890.123_456_789))
    );
}

#[test]
fn test_overflow_is_rejected() {
    assert_eq!(number_literal("18446744073709551616"), None);
    assert_eq!(number_literal("-9223372036854775809"), None);
}
