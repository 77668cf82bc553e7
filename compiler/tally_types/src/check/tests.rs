use pretty_assertions::assert_eq;
use tally_ir::{
    Context, FunctionDef, Limits, OpKind, ParsedExpr, PartKind, Pointer, Span, TokenStream, Value,
    ValueType, VariableDef,
};
use tally_lexer::tokenize;
use tally_parse::parse;

use crate::{check, TypeCheckError, TypeErrorKind, TypeTable};

fn context() -> Context {
    let mut ctx = Context::new();
    let vars = [
        VariableDef::new("u8v", ValueType::U8, 200u8),
        VariableDef::new("i8v", ValueType::I8, -3i8),
        VariableDef::new("count", ValueType::U32, 7u32),
        VariableDef::new("f", ValueType::R32, 0.5f32),
        VariableDef::new("flag", ValueType::Bool, true),
        VariableDef::new("name", ValueType::String, "tally"),
        VariableDef::new("ptr", ValueType::Pointer, Pointer::NULL),
        VariableDef::new("pi", ValueType::R64, std::f64::consts::PI).read_only(),
    ];
    for var in vars {
        ctx.add_variable(var).unwrap();
    }
    ctx.add_function(
        FunctionDef::new("sqrt", ValueType::R64, |_: &[Value]| Value::R64(0.0))
            .param(ValueType::R64),
    )
    .unwrap();
    ctx.add_function(FunctionDef::new("nothing", ValueType::Void, |_: &[Value]| {
        Value::Void
    }))
    .unwrap();
    ctx
}

fn parse_in(source: &str, ctx: &Context) -> ParsedExpr {
    let tokens = tokenize(source).unwrap();
    parse(TokenStream::new(source, &tokens), Some(ctx), &Limits::DEFAULT).unwrap()
}

fn checked(source: &str) -> Result<TypeTable, TypeCheckError> {
    let ctx = context();
    check(&parse_in(source, &ctx), Some(&ctx))
}

fn root_type(source: &str) -> ValueType {
    match checked(source) {
        Ok(table) => table.root_type(),
        Err(err) => panic!("{source:?} failed to check: {err}"),
    }
}

fn error(source: &str) -> TypeErrorKind {
    match checked(source) {
        Ok(table) => panic!("{source:?} checked as {}", table.root_type()),
        Err(err) => err.kind,
    }
}

#[test]
fn test_arithmetic_widens_to_64_bits() {
    assert_eq!(root_type("1 + 2"), ValueType::U64);
    assert_eq!(root_type("(u8)200 + (u8)200"), ValueType::U64);
    assert_eq!(root_type("10 - 3 - 2"), ValueType::I64);
    assert_eq!(root_type("-1 * 2"), ValueType::I64);
    assert_eq!(root_type("1 + 2.5"), ValueType::R64);
    assert_eq!(root_type("u8v % i8v"), ValueType::I64);
}

#[test]
fn test_arithmetic_operand_errors() {
    assert_eq!(
        error("flag + 1"),
        TypeErrorKind::InvalidLeftOperand {
            op: OpKind::Add,
            found: ValueType::Bool
        }
    );
    assert_eq!(
        error("1 * name"),
        TypeErrorKind::InvalidRightOperand {
            op: OpKind::Mul,
            found: ValueType::String
        }
    );
}

#[test]
fn test_comparisons() {
    assert_eq!(root_type("1 < 2.0"), ValueType::Bool);
    assert_eq!(root_type(r#"name == "x""#), ValueType::Bool);
    assert_eq!(root_type("flag != flag"), ValueType::Bool);
    assert_eq!(root_type("ptr == ptr"), ValueType::Bool);
    assert_eq!(
        error(r#"name < "x""#),
        TypeErrorKind::InvalidLeftOperand {
            op: OpKind::Lt,
            found: ValueType::String
        }
    );
    assert_eq!(
        error("flag > flag"),
        TypeErrorKind::InvalidLeftOperand {
            op: OpKind::Gt,
            found: ValueType::Bool
        }
    );
    assert_eq!(
        error("name == 1"),
        TypeErrorKind::MismatchedOperandTypes {
            op: OpKind::Eq,
            left: ValueType::String,
            right: ValueType::U8
        }
    );
    assert_eq!(
        error("nothing() == 1"),
        TypeErrorKind::InvalidLeftOperand {
            op: OpKind::Eq,
            found: ValueType::Void
        }
    );
}

#[test]
fn test_comparison_operand_type_is_recorded() {
    let ctx = context();
    let expr = parse_in("u8v < -1", &ctx);
    let table = check(&expr, Some(&ctx)).unwrap();
    assert_eq!(table.result_type(expr.root()), ValueType::Bool);
    assert_eq!(table.operand_type(expr.root()), ValueType::I64);
}

#[test]
fn test_logical() {
    assert_eq!(root_type("!0"), ValueType::Bool);
    assert_eq!(root_type("flag && 1"), ValueType::Bool);
    assert_eq!(root_type("ptr || name"), ValueType::Bool);
    assert_eq!(
        error("nothing() || flag"),
        TypeErrorKind::InvalidLeftOperand {
            op: OpKind::Or,
            found: ValueType::Void
        }
    );
    assert_eq!(
        error("!nothing()"),
        TypeErrorKind::InvalidRightOperand {
            op: OpKind::Not,
            found: ValueType::Void
        }
    );
}

#[test]
fn test_bitwise_widths() {
    assert_eq!(root_type("u8v | i8v"), ValueType::I8);
    assert_eq!(root_type("(u16)1 | (i8)1"), ValueType::U16);
    assert_eq!(root_type("(u16)1 ^ (i32)1"), ValueType::I32);
    assert_eq!(root_type("(u16)1 & (i8)1"), ValueType::I8);
    assert_eq!(root_type("(u64)1 & (u32)1"), ValueType::U32);
    assert_eq!(root_type("~u8v"), ValueType::U8);
    assert_eq!(
        error("~f"),
        TypeErrorKind::InvalidRightOperand {
            op: OpKind::BitNot,
            found: ValueType::R32
        }
    );
    assert_eq!(
        error("1.5 | 1"),
        TypeErrorKind::InvalidLeftOperand {
            op: OpKind::BitOr,
            found: ValueType::R32
        }
    );
}

#[test]
fn test_ternary() {
    assert_eq!(root_type("flag ? 1 : 2"), ValueType::U8);
    assert_eq!(root_type("flag ? 1 : 2.5"), ValueType::R64);
    assert_eq!(root_type("name ? name : name"), ValueType::String);
    assert_eq!(
        error("flag ? name : 1"),
        TypeErrorKind::MismatchedOperandTypes {
            op: OpKind::Ternary,
            left: ValueType::String,
            right: ValueType::U8
        }
    );
    assert_eq!(
        error("nothing() ? 1 : 2"),
        TypeErrorKind::InvalidCondition {
            found: ValueType::Void
        }
    );
}

#[test]
fn test_assignment() {
    assert_eq!(root_type("count = 5"), ValueType::U32);
    assert_eq!(root_type("count = flag"), ValueType::U32);
    assert_eq!(root_type("flag = count"), ValueType::Bool);
    assert_eq!(root_type("count = f = 2"), ValueType::U32);
    assert_eq!(
        error("pi = 4"),
        TypeErrorKind::ReadOnly {
            name: "pi".to_owned()
        }
    );
    assert_eq!(
        error("1 = 2"),
        TypeErrorKind::InvalidLeftOperand {
            op: OpKind::Assign,
            found: ValueType::U8
        }
    );
    assert_eq!(
        error("count = name"),
        TypeErrorKind::InvalidRightOperand {
            op: OpKind::Assign,
            found: ValueType::String
        }
    );
}

#[test]
fn test_compound_assignment() {
    let ctx = context();
    let expr = parse_in("count += 1.5", &ctx);
    let table = check(&expr, Some(&ctx)).unwrap();
    assert_eq!(table.result_type(expr.root()), ValueType::U32);
    assert_eq!(table.operand_type(expr.root()), ValueType::R64);

    let expr = parse_in("count -= 1", &ctx);
    let table = check(&expr, Some(&ctx)).unwrap();
    assert_eq!(table.operand_type(expr.root()), ValueType::I64);

    assert_eq!(root_type("i8v &= 3"), ValueType::I8);
    assert_eq!(
        error("name += 1"),
        TypeErrorKind::InvalidLeftOperand {
            op: OpKind::AddAssign,
            found: ValueType::String
        }
    );
    assert_eq!(
        error("count |= 1.5"),
        TypeErrorKind::InvalidRightOperand {
            op: OpKind::BitOrAssign,
            found: ValueType::R32
        }
    );
}

#[test]
fn test_functions() {
    assert_eq!(root_type("sqrt(4)"), ValueType::R64);
    assert_eq!(root_type("sqrt(flag)"), ValueType::R64);
    assert_eq!(root_type("nothing()"), ValueType::Void);
    assert_eq!(
        error("sqrt(name)"),
        TypeErrorKind::InvalidArgument {
            function: "sqrt".to_owned(),
            index: 0,
            expected: ValueType::R64,
            found: ValueType::String
        }
    );
}

#[test]
fn test_casts() {
    assert_eq!(root_type(r#"(bool)"""#), ValueType::Bool);
    assert_eq!(root_type("(pointer)ptr"), ValueType::Pointer);
    assert_eq!(root_type("(r32)flag"), ValueType::R32);
    assert_eq!(root_type("(1 + 2)"), ValueType::U64);
    assert_eq!(
        error("(u8)name"),
        TypeErrorKind::InvalidCast {
            from: ValueType::String,
            to: ValueType::U8
        }
    );
    assert_eq!(
        error("(string)1"),
        TypeErrorKind::InvalidCast {
            from: ValueType::U8,
            to: ValueType::String
        }
    );
}

#[test]
fn test_every_part_is_typed() {
    let ctx = context();
    let expr = parse_in("(u8)200 + (u8)200", &ctx);
    let table = check(&expr, Some(&ctx)).unwrap();
    assert_eq!(table.len(), expr.arena().len());
    for (id, part) in expr.arena().iter() {
        let expected = match &part.kind {
            PartKind::Cast { .. } => ValueType::U8,
            PartKind::Constant(value) => value.ty(),
            _ => ValueType::U64,
        };
        assert_eq!(table.result_type(id), expected, "{id:?}");
    }
}

#[test]
fn test_missing_context() {
    let ctx = context();
    let expr = parse_in("count + 1", &ctx);
    assert_eq!(
        check(&expr, None).unwrap_err().kind,
        TypeErrorKind::MissingContext
    );
    let other = Context::new();
    assert_eq!(
        check(&expr, Some(&other)).unwrap_err().kind,
        TypeErrorKind::MissingContext
    );
    let expr = parse_in("sqrt(1)", &ctx);
    assert_eq!(
        check(&expr, None).unwrap_err().kind,
        TypeErrorKind::MissingContext
    );
}

#[test]
fn test_operand_error_covers_operand() {
    let err = checked("1 + name").unwrap_err();
    assert_eq!(err.span, Span::new(4, 8));
    let err = checked("1 + (name)").unwrap_err();
    assert_eq!(err.span, Span::new(4, 10));
}
