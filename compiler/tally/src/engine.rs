//! Running the whole pipeline.

use tally_eval::evaluate;
use tally_ir::{Context, Limits, ParsedExpr, TokenStream, Value, ValueType};
use tally_lexer::tokenize;
use tally_parse::parse;
use tally_types::{check, TypeTable};

use crate::Error;

/// A parsed and type-checked expression, ready to run any number of times.
///
/// It stays valid for the context it was compiled against. Running it with
/// a different context fails or reads the wrong variables.
#[derive(Clone, Debug)]
pub struct Expression {
    expr: ParsedExpr,
    types: TypeTable,
}

impl Expression {
    /// Type of the value a run produces.
    pub fn result_type(&self) -> ValueType {
        self.types.root_type()
    }

    pub fn tree(&self) -> &ParsedExpr {
        &self.expr
    }

    pub fn types(&self) -> &TypeTable {
        &self.types
    }
}

/// The expression pipeline, configured with [`Limits`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Engine {
    limits: Limits,
}

impl Engine {
    pub fn new(limits: Limits) -> Self {
        Engine { limits }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Tokenize, parse and type-check `source`.
    #[tracing::instrument(level = "debug", skip_all, fields(source = %source))]
    pub fn compile(&self, source: &str, ctx: Option<&Context>) -> Result<Expression, Error> {
        let tokens = tokenize(source)?;
        let expr = parse(TokenStream::new(source, &tokens), ctx, &self.limits)?;
        let types = check(&expr, ctx)?;
        Ok(Expression { expr, types })
    }

    /// Evaluate a compiled expression.
    pub fn run(&self, expression: &Expression, ctx: Option<&mut Context>) -> Result<Value, Error> {
        evaluate(&expression.expr, &expression.types, ctx, &self.limits).map_err(Error::from)
    }

    /// Compile and run `source` in one go.
    pub fn evaluate(&self, source: &str, ctx: Option<&mut Context>) -> Result<Value, Error> {
        let expression = self.compile(source, ctx.as_deref())?;
        self.run(&expression, ctx)
    }
}

/// Evaluate `source` with the default [`Limits`].
pub fn evaluate_str(source: &str, ctx: Option<&mut Context>) -> Result<Value, Error> {
    Engine::default().evaluate(source, ctx)
}
