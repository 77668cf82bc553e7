use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use tally_ir::{
    Context, FunctionDef, Limits, ParsedExpr, Pointer, Span, TokenStream, Value, ValueType,
    VariableDef,
};
use tally_lexer::tokenize;
use tally_parse::parse;
use tally_types::{check, TypeTable};

use crate::{evaluate, EvalError, EvalErrorKind};

fn context() -> Context {
    let mut ctx = Context::new();
    let vars = [
        VariableDef::new("x", ValueType::I32, 0i32),
        VariableDef::new("small", ValueType::U8, 3u8),
        VariableDef::new("mask", ValueType::U8, 1u8),
        VariableDef::new("u8v", ValueType::U8, 200u8),
        VariableDef::new("i8v", ValueType::I8, -3i8),
        VariableDef::new("flag", ValueType::Bool, true),
        VariableDef::new("locked", ValueType::Bool, true).read_only(),
        VariableDef::new("name", ValueType::String, "tally"),
        VariableDef::new("ptr", ValueType::Pointer, Pointer::new(0x10, 1)),
    ];
    for var in vars {
        ctx.add_variable(var).unwrap();
    }
    ctx.add_function(
        FunctionDef::new("max", ValueType::R64, |args: &[Value]| match args {
            [Value::R64(a), Value::R64(b)] => Value::R64(a.max(*b)),
            _ => Value::Void,
        })
        .param(ValueType::R64)
        .param(ValueType::R64),
    )
    .unwrap();
    ctx.add_function(
        FunctionDef::new("scale", ValueType::R64, |args: &[Value]| match args {
            [Value::R64(v), Value::U8(factor)] => Value::R64(v * f64::from(*factor)),
            _ => Value::Void,
        })
        .param(ValueType::R64)
        .optional_param(ValueType::U8, 2u8),
    )
    .unwrap();
    ctx.add_function(FunctionDef::new("bad", ValueType::U32, |_: &[Value]| {
        Value::string("oops")
    }))
    .unwrap();
    ctx.add_function(FunctionDef::new("nothing", ValueType::Void, |_: &[Value]| {
        Value::Void
    }))
    .unwrap();
    ctx
}

fn prepare(source: &str, ctx: &Context) -> (ParsedExpr, TypeTable) {
    let tokens = tokenize(source).unwrap();
    let expr = parse(TokenStream::new(source, &tokens), Some(ctx), &Limits::DEFAULT).unwrap();
    let types = check(&expr, Some(ctx)).unwrap();
    (expr, types)
}

fn run_with(source: &str, ctx: &mut Context, limits: &Limits) -> Result<Value, EvalError> {
    let (expr, types) = prepare(source, ctx);
    evaluate(&expr, &types, Some(ctx), limits)
}

fn run_in(source: &str, ctx: &mut Context) -> Result<Value, EvalError> {
    run_with(source, ctx, &Limits::DEFAULT)
}

fn eval(source: &str) -> Value {
    let mut ctx = context();
    match run_in(source, &mut ctx) {
        Ok(value) => value,
        Err(err) => panic!("{source:?} failed to evaluate: {err}"),
    }
}

#[test]
fn test_precedence_and_widening() {
    assert_eq!(eval("2+3*4"), Value::U64(14));
    assert_eq!(eval("10-3-2"), Value::I64(5));
    assert_eq!(eval("(u8)200 + (u8)200"), Value::U64(400));
    assert_eq!(eval("1 - 2"), Value::I64(-1));
    assert_eq!(eval("1 + 2.5"), Value::R64(3.5));
    assert_eq!(eval("7.5 % 2"), Value::R64(1.5));
}

#[test]
fn test_logic_and_truthiness() {
    assert_eq!(eval("!0"), Value::Bool(true));
    assert_eq!(eval("(bool)\"\""), Value::Bool(false));
    assert_eq!(eval("(bool)\"x\""), Value::Bool(true));
    assert_eq!(eval("ptr && 1"), Value::Bool(true));
    assert_eq!(eval("!name"), Value::Bool(false));
}

#[test]
fn test_comparisons() {
    assert_eq!(eval("i8v < u8v"), Value::Bool(true));
    assert_eq!(eval("name == \"tally\""), Value::Bool(true));
    assert_eq!(eval("ptr != ptr"), Value::Bool(false));
    assert_eq!(eval("1.5 >= 2"), Value::Bool(false));
}

#[test]
fn test_bitwise() {
    assert_eq!(eval("u8v | 7"), Value::U8(207));
    assert_eq!(eval("~(u8)15"), Value::U8(240));
    assert_eq!(eval("6 ^ 3"), Value::U8(5));
}

#[test]
fn test_ternary_widens_branches() {
    assert_eq!(eval("flag ? 1 : 2.5"), Value::R64(1.0));
    assert_eq!(eval("0 ? \"a\" : \"b\""), Value::string("b"));
}

#[test]
fn test_integer_division_by_zero() {
    let mut ctx = context();
    let err = run_in("7 / 0", &mut ctx).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::DivideByZero);
    assert_eq!(err.span, Span::new(2, 3));
    assert_eq!(eval("7.0 / 0"), Value::R64(f64::INFINITY));
}

#[test]
fn test_assignment_writes_back() {
    let mut ctx = context();
    assert_eq!(run_in("x = 5", &mut ctx).unwrap(), Value::I32(5));
    assert_eq!(ctx.value_of("x"), Some(Value::I32(5)));
}

#[test]
fn test_chained_assignment() {
    let mut ctx = context();
    assert_eq!(run_in("x = small = 7", &mut ctx).unwrap(), Value::I32(7));
    assert_eq!(ctx.value_of("small"), Some(Value::U8(7)));
    assert_eq!(ctx.value_of("x"), Some(Value::I32(7)));
}

#[test]
fn test_compound_assignment_casts_back() {
    let mut ctx = context();
    // Subtraction computes signed, then wraps into the u8 variable
    assert_eq!(run_in("small -= 10", &mut ctx).unwrap(), Value::U8(249));
    assert_eq!(run_in("x += 2.9", &mut ctx).unwrap(), Value::I32(2));
    assert_eq!(run_in("mask |= 6", &mut ctx).unwrap(), Value::U8(7));
    assert_eq!(ctx.value_of("mask"), Some(Value::U8(7)));
}

#[test]
fn test_compound_division_by_zero_leaves_variable() {
    let mut ctx = context();
    let err = run_in("small /= 0", &mut ctx).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::DivideByZero);
    assert_eq!(ctx.value_of("small"), Some(Value::U8(3)));
}

#[test]
fn test_no_short_circuit() {
    let mut ctx = context();
    assert_eq!(run_in("0 && (x = 9)", &mut ctx).unwrap(), Value::Bool(false));
    assert_eq!(ctx.value_of("x"), Some(Value::I32(9)));
    assert_eq!(run_in("1 ? 2 : (small = 1)", &mut ctx).unwrap(), Value::U8(2));
    assert_eq!(ctx.value_of("small"), Some(Value::U8(1)));
}

#[test]
fn test_functions() {
    assert_eq!(eval("max(1, 2.5)"), Value::R64(2.5));
    assert_eq!(eval("scale(1.5)"), Value::R64(3.0));
    assert_eq!(eval("scale(1.5, 4)"), Value::R64(6.0));
    assert_eq!(eval("nothing()"), Value::Void);
}

#[test]
fn test_return_type_mismatch() {
    let mut ctx = context();
    let err = run_in("bad() + 1", &mut ctx).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::ReturnType {
            function: "bad".to_owned(),
            expected: ValueType::U32,
            found: ValueType::String,
        }
    );
    assert_eq!(err.span, Span::new(0, 5));
}

#[test]
fn test_shared_binding() {
    let cell = Rc::new(RefCell::new(Value::I32(1)));
    let mut ctx = Context::new();
    ctx.add_variable(VariableDef::with_binding(
        "level",
        ValueType::I32,
        Rc::clone(&cell),
    ))
    .unwrap();

    assert_eq!(run_in("level = 40 + 2", &mut ctx).unwrap(), Value::I32(42));
    assert_eq!(*cell.borrow(), Value::I32(42));

    *cell.borrow_mut() = Value::string("high");
    let err = run_in("level + 1", &mut ctx).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::BindingType {
            name: "level".to_owned(),
            expected: ValueType::I32,
            found: ValueType::String,
        }
    );
}

#[test]
fn test_binding_value_is_cast_on_read() {
    let cell = Rc::new(RefCell::new(Value::U8(7)));
    let mut ctx = Context::new();
    ctx.add_variable(VariableDef::with_binding(
        "wide",
        ValueType::I64,
        Rc::clone(&cell),
    ))
    .unwrap();
    assert_eq!(run_in("wide", &mut ctx).unwrap(), Value::I64(7));
}

#[test]
fn test_interactive_toggle() {
    let mut ctx = context();
    assert_eq!(run_in("flag", &mut ctx).unwrap(), Value::Bool(true));
    assert_eq!(ctx.value_of("flag"), Some(Value::Bool(true)));

    ctx.set_interactive(true);
    assert_eq!(run_in("flag", &mut ctx).unwrap(), Value::Bool(false));
    assert_eq!(ctx.value_of("flag"), Some(Value::Bool(false)));
    assert_eq!(run_in("flag", &mut ctx).unwrap(), Value::Bool(true));
}

#[test]
fn test_toggle_needs_bare_writable_bool() {
    let mut ctx = context();
    ctx.set_interactive(true);
    assert_eq!(run_in("locked", &mut ctx).unwrap(), Value::Bool(true));
    assert_eq!(run_in("(flag)", &mut ctx).unwrap(), Value::Bool(true));
    assert_eq!(run_in("small", &mut ctx).unwrap(), Value::U8(3));
    assert_eq!(ctx.value_of("flag"), Some(Value::Bool(true)));
}

#[test]
fn test_stack_limit() {
    let mut ctx = context();
    let source = "1 + (2 + (3 + 4))";
    let tight = Limits::DEFAULT.with_max_eval_stack(3);
    let err = run_with(source, &mut ctx, &tight).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::StackOverflow { max: 3 });
    assert_eq!(run_in(source, &mut ctx).unwrap(), Value::U64(10));
}

#[test]
fn test_missing_context() {
    let ctx = context();
    let (expr, types) = prepare("x + 1", &ctx);
    let err = evaluate(&expr, &types, None, &Limits::DEFAULT).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::MissingContext);
    assert_eq!(err.span, Span::new(0, 1));
}

#[test]
fn test_constant_expression_needs_no_context() {
    let ctx = Context::new();
    let (expr, types) = prepare("(1 + 2) * 3", &ctx);
    assert_eq!(
        evaluate(&expr, &types, None, &Limits::DEFAULT).unwrap(),
        Value::U64(9)
    );
}

#[test]
fn test_repeat_runs_agree() {
    let mut ctx = context();
    let source = "max(u8v, i8v) * 2 + (flag ? 1 : 0)";
    let first = run_in(source, &mut ctx).unwrap();
    let second = run_in(source, &mut ctx).unwrap();
    assert_eq!(first, Value::R64(401.0));
    assert_eq!(first, second);
}
