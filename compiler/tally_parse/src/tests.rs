use pretty_assertions::assert_eq;
use tally_diagnostic::ErrorCode;
use tally_ir::{Limits, PartKind, Span, TokenStream, Value};
use tally_lexer::tokenize;

use super::{parse, ParseErrorKind};

#[test]
fn test_parse_without_context() {
    let source = "(u16)300 * 2 > 500";
    let tokens = tokenize(source).unwrap();
    let expr = parse(TokenStream::new(source, &tokens), None, &Limits::DEFAULT).unwrap();
    assert_eq!(expr.to_string(), "(> (* (u16 300) 2) 500)");
    assert_eq!(expr.extent(expr.root()), Span::new(0, 18));
}

#[test]
fn test_names_need_a_context() {
    let source = "x + 1";
    let tokens = tokenize(source).unwrap();
    let err = parse(TokenStream::new(source, &tokens), None, &Limits::DEFAULT).unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::UnknownVariable {
            name: "x".to_owned()
        }
    );
    assert_eq!(err.to_diagnostic().code, ErrorCode::E1006);
}

#[test]
fn test_string_constant_is_unescaped() {
    let source = r#""tab\there""#;
    let tokens = tokenize(source).unwrap();
    let expr = parse(TokenStream::new(source, &tokens), None, &Limits::DEFAULT).unwrap();
    assert_eq!(
        expr.part(expr.root()).kind,
        PartKind::Constant(Value::string("tab\there"))
    );
}
