use pretty_assertions::assert_eq;
use tally_diagnostic::ErrorCode;
use tally_ir::{Span, TokenIdx};

use super::{ParseError, ParseErrorKind};

#[test]
fn test_every_kind_is_a_parser_code() {
    let kinds = [
        ParseErrorKind::MismatchParenthesis,
        ParseErrorKind::MissingOperator,
        ParseErrorKind::MissingLeftOperand,
        ParseErrorKind::MissingRightOperand,
        ParseErrorKind::InvalidOperator {
            found: ":".to_owned(),
        },
        ParseErrorKind::UnknownVariable {
            name: "x".to_owned(),
        },
        ParseErrorKind::UnknownFunction {
            name: "f".to_owned(),
        },
        ParseErrorKind::TooManyArguments {
            name: "f".to_owned(),
            max: 1,
        },
        ParseErrorKind::MissingArguments {
            name: "f".to_owned(),
            min: 2,
        },
        ParseErrorKind::EmptyArgument,
        ParseErrorKind::InvalidConstant,
        ParseErrorKind::EmptyExpression,
        ParseErrorKind::UnexpectedComma,
        ParseErrorKind::TooManyParts { max: 1 },
        ParseErrorKind::NestingTooDeep { max: 1 },
        ParseErrorKind::StackOverflow { max: 1 },
    ];
    for kind in &kinds {
        assert!(kind.error_code().is_parser_error(), "{kind:?}");
    }
    for (i, a) in kinds.iter().enumerate() {
        for b in &kinds[i + 1..] {
            assert_ne!(a.error_code(), b.error_code());
        }
    }
}

#[test]
fn test_display() {
    let err = ParseError::new(
        ParseErrorKind::TooManyArguments {
            name: "clamp".to_owned(),
            max: 3,
        },
        Some(TokenIdx::new(0)),
        Span::new(0, 5),
    );
    assert_eq!(
        err.to_string(),
        "too many arguments to `clamp` (accepts at most 3) at 0..5"
    );
}

#[test]
fn test_stray_colon_gets_help() {
    let err = ParseError::new(
        ParseErrorKind::InvalidOperator {
            found: ":".to_owned(),
        },
        Some(TokenIdx::new(1)),
        Span::new(2, 3),
    );
    let diag = err.to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E1005);
    assert_eq!(diag.primary_span(), Some(Span::new(2, 3)));
    assert_eq!(diag.suggestions.len(), 1);
}

#[test]
fn test_related_span_is_secondary_label() {
    let err = ParseError::new(
        ParseErrorKind::MissingOperator,
        Some(TokenIdx::new(3)),
        Span::new(6, 7),
    )
    .with_related(Span::new(0, 5));
    let diag = err.to_diagnostic();
    assert_eq!(diag.primary_span(), Some(Span::new(6, 7)));
    assert_eq!(diag.labels.len(), 2);
    assert!(!diag.labels[1].is_primary);
    assert_eq!(diag.labels[1].span, Span::new(0, 5));
    assert_eq!(diag.labels[1].message, "previous operand");
}
