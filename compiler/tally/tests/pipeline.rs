//! End-to-end tests of the expression pipeline through the public API.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::sync::Arc;

use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use tally::{
    evaluate_str, Context, Engine, Error, FunctionDef, LexErrorKind, Limits, ParseErrorKind,
    Stage, TypeErrorKind, Value, ValueType, VariableDef,
};
use tally_ir::TokenKind;
use tally_lexer::tokenize;

fn context() -> Context {
    let mut ctx = Context::new();
    ctx.add_variable(VariableDef::new("pi", ValueType::R64, std::f64::consts::PI).read_only())
        .unwrap();
    ctx.add_variable(VariableDef::new("hp", ValueType::I32, 100i32))
        .unwrap();
    ctx.add_function(
        FunctionDef::new("sqrt", ValueType::R64, |args: &[Value]| match args {
            [Value::R64(v)] => Value::R64(v.sqrt()),
            _ => Value::Void,
        })
        .param(ValueType::R64),
    )
    .unwrap();
    ctx
}

fn eval(source: &str) -> Value {
    evaluate_str(source, None).unwrap()
}

fn eval_in(source: &str, ctx: &mut Context) -> Result<Value, Error> {
    evaluate_str(source, Some(ctx))
}

#[test]
fn test_tokenize_example() {
    let source = "a+b*100";
    let tokens = tokenize(source).unwrap();
    let actual: Vec<(TokenKind, &str)> = tokens
        .iter()
        .map(|token| (token.kind, token.text(source)))
        .collect();
    assert_eq!(
        actual,
        vec![
            (TokenKind::Identifier, "a"),
            (TokenKind::Operator, "+"),
            (TokenKind::Identifier, "b"),
            (TokenKind::Operator, "*"),
            (TokenKind::Number, "100"),
        ]
    );
}

#[test]
fn test_arithmetic() {
    assert_eq!(eval("2+3*4"), Value::U64(14));
    assert_eq!(eval("10-3-2"), Value::I64(5));
    assert_eq!(eval("(u8)200 + (u8)200"), Value::U64(400));
    assert_eq!(eval("(2 + 3) * 4"), Value::U64(20));
}

#[test]
fn test_truthiness() {
    assert_eq!(eval("!0"), Value::Bool(true));
    assert_eq!(eval("(bool)\"\""), Value::Bool(false));
    assert_eq!(eval("(bool)\"x\""), Value::Bool(true));
}

#[test]
fn test_read_only_assignment_fails_type_check() {
    let mut ctx = context();
    let err = eval_in("pi = 4", &mut ctx).unwrap_err();
    assert_eq!(err.stage(), Stage::TypeCheck);
    let Error::TypeCheck(inner) = err else {
        panic!("expected a type error");
    };
    assert_eq!(
        inner.kind,
        TypeErrorKind::ReadOnly {
            name: "pi".to_owned()
        }
    );
}

#[test]
fn test_too_many_arguments() {
    let mut ctx = context();
    let err = eval_in("sqrt(4, 9)", &mut ctx).unwrap_err();
    let Error::Parse(inner) = err else {
        panic!("expected a parse error");
    };
    assert_eq!(
        inner.kind,
        ParseErrorKind::TooManyArguments {
            name: "sqrt".to_owned(),
            max: 1
        }
    );
}

#[test]
fn test_lex_error_stops_pipeline() {
    let err = evaluate_str("1 # 2", None).unwrap_err();
    assert_eq!(err.stage(), Stage::Tokenize);
    let Error::Lex(inner) = err else {
        panic!("expected a lex error");
    };
    assert_eq!(inner.kind, LexErrorKind::InvalidChar { found: '#' });
}

#[test]
fn test_functions_and_variables() {
    let mut ctx = context();
    assert_eq!(eval_in("sqrt(16) + hp", &mut ctx).unwrap(), Value::R64(104.0));
    assert_eq!(eval_in("hp -= 30", &mut ctx).unwrap(), Value::I32(70));
    assert_eq!(ctx.value_of("hp"), Some(Value::I32(70)));
}

#[test]
fn test_compiled_expression_reruns() {
    let engine = Engine::default();
    let mut ctx = context();
    let expression = engine.compile("hp = hp * 2", Some(&ctx)).unwrap();
    assert_eq!(expression.result_type(), ValueType::I32);
    engine.run(&expression, Some(&mut ctx)).unwrap();
    let value = engine.run(&expression, Some(&mut ctx)).unwrap();
    assert_eq!(value, Value::I32(400));
}

#[test]
fn test_limits_reach_every_stage() {
    let engine = Engine::new(Limits::DEFAULT.with_max_eval_stack(2));
    let err = engine.evaluate("1 + (2 + 3)", None).unwrap_err();
    assert_eq!(err.stage(), Stage::Evaluate);

    let engine = Engine::new(Limits::DEFAULT.with_max_parts(2));
    let err = engine.evaluate("1 + 2", None).unwrap_err();
    assert_eq!(err.stage(), Stage::Parse);
}

#[test]
fn test_mutex_binding_shared_with_host() {
    let level = Arc::new(Mutex::new(Value::U8(1)));
    let mut ctx = Context::new();
    ctx.add_variable(VariableDef::with_binding(
        "level",
        ValueType::U8,
        Arc::clone(&level),
    ))
    .unwrap();

    let host = Arc::clone(&level);
    std::thread::spawn(move || *host.lock() = Value::U8(5))
        .join()
        .unwrap();
    assert_eq!(eval_in("level += 1", &mut ctx).unwrap(), Value::U8(6));
    assert_eq!(*level.lock(), Value::U8(6));
}

#[test]
fn test_render() {
    let mut ctx = context();
    let source = "pi = 4";
    let err = eval_in(source, &mut ctx).unwrap_err();
    let rendered = err.render(source);
    assert!(rendered.starts_with("error[E2007]: cannot assign to read-only `pi`"));
    assert!(rendered.contains("type check failed at `pi`"));
}

#[test]
fn test_render_marks_previous_operand() {
    let mut ctx = context();
    let source = "pi + hp 2";
    let err = eval_in(source, &mut ctx).unwrap_err();
    assert_eq!(err.stage(), Stage::Parse);
    let rendered = err.render(source);
    assert!(rendered.contains("   |         ^ expected an operator before this"), "{rendered}");
    assert!(rendered.contains("   | ------- previous operand"), "{rendered}");
}
