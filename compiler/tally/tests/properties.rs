//! Property-based tests for the whole pipeline.
//!
//! Random expressions over constants, variables, operators, casts and a
//! function call check that:
//! 1. Determinism: evaluating an expression without assignments twice
//!    against the same context gives the same outcome.
//! 2. Balance: an expression that type-checks never hits an internal
//!    evaluator error; it yields exactly one value or a user-facing error.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use proptest::prelude::*;
use tally::{Context, Engine, Error, FunctionDef, Value, ValueType, VariableDef};

fn context() -> Context {
    let mut ctx = Context::new();
    ctx.add_variable(VariableDef::new("a", ValueType::I32, 7i32))
        .unwrap();
    ctx.add_variable(VariableDef::new("b", ValueType::R64, 2.5f64))
        .unwrap();
    ctx.add_variable(VariableDef::new("flag", ValueType::Bool, true))
        .unwrap();
    ctx.add_variable(VariableDef::new("s", ValueType::String, "tally"))
        .unwrap();
    ctx.add_function(
        FunctionDef::new("max", ValueType::R64, |args: &[Value]| match args {
            [Value::R64(x), Value::R64(y)] => Value::R64(x.max(*y)),
            _ => Value::Void,
        })
        .param(ValueType::R64)
        .param(ValueType::R64),
    )
    .unwrap();
    ctx
}

fn leaf_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..1000).prop_map(|n| n.to_string()),
        (0u32..100, 0u32..100).prop_map(|(whole, frac)| format!("{whole}.{frac}")),
        Just("a".to_owned()),
        Just("b".to_owned()),
        Just("flag".to_owned()),
        Just("s".to_owned()),
        Just("\"x\"".to_owned()),
    ]
}

fn binary_op_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "+", "-", "*", "/", "%", "==", "!=", "<", "<=", ">", ">=", "&&", "||", "&", "|", "^",
    ])
}

fn cast_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["bool", "u8", "i16", "u32", "i64", "r32", "r64", "string"])
}

fn expr_strategy() -> impl Strategy<Value = String> {
    leaf_strategy().prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            (inner.clone(), binary_op_strategy(), inner.clone())
                .prop_map(|(left, op, right)| format!("{left} {op} {right}")),
            inner.clone().prop_map(|e| format!("({e})")),
            (prop::sample::select(vec!["!", "~"]), inner.clone())
                .prop_map(|(op, e)| format!("{op}({e})")),
            (inner.clone(), inner.clone(), inner.clone())
                .prop_map(|(c, t, e)| format!("({c}) ? ({t}) : ({e})")),
            (cast_strategy(), inner.clone()).prop_map(|(ty, e)| format!("({ty})({e})")),
            (inner.clone(), inner).prop_map(|(x, y)| format!("max({x}, {y})")),
        ]
    })
}

proptest! {
    #[test]
    fn evaluation_is_deterministic(source in expr_strategy()) {
        let engine = Engine::default();
        let mut ctx = context();
        // Debug output compares NaN results as equal
        let first = format!("{:?}", engine.evaluate(&source, Some(&mut ctx)));
        let second = format!("{:?}", engine.evaluate(&source, Some(&mut ctx)));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn checked_expressions_leave_one_value(source in expr_strategy()) {
        let engine = Engine::default();
        let mut ctx = context();
        if let Ok(expression) = engine.compile(&source, Some(&ctx)) {
            match engine.run(&expression, Some(&mut ctx)) {
                Ok(value) => prop_assert_eq!(value.ty(), expression.result_type()),
                Err(Error::Eval(err)) => prop_assert!(!err.kind.is_internal(), "{}", err),
                Err(other) => prop_assert!(false, "unexpected stage: {}", other),
            }
        }
    }
}
