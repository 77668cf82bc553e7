//! The pipeline error type.

use std::fmt;

use tally_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use tally_diagnostic::Diagnostic;
use tally_eval::EvalError;
use tally_ir::Span;
use tally_lexer::LexError;
use tally_parse::ParseError;
use tally_types::TypeCheckError;

/// Pipeline stage an [`Error`] came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Tokenize,
    Parse,
    TypeCheck,
    Evaluate,
}

impl Stage {
    pub const fn name(self) -> &'static str {
        match self {
            Stage::Tokenize => "tokenize",
            Stage::Parse => "parse",
            Stage::TypeCheck => "type check",
            Stage::Evaluate => "evaluate",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The first failure of a pipeline run.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    TypeCheck(#[from] TypeCheckError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl Error {
    pub fn stage(&self) -> Stage {
        match self {
            Error::Lex(_) => Stage::Tokenize,
            Error::Parse(_) => Stage::Parse,
            Error::TypeCheck(_) => Stage::TypeCheck,
            Error::Eval(_) => Stage::Evaluate,
        }
    }

    /// Source span the error points at.
    pub fn span(&self) -> Span {
        match self {
            Error::Lex(err) => err.span,
            Error::Parse(err) => err.span,
            Error::TypeCheck(err) => err.span,
            Error::Eval(err) => err.span,
        }
    }

    /// The stage's diagnostic, with a note quoting the offending text of
    /// `source`.
    pub fn diagnostic(&self, source: &str) -> Diagnostic {
        let diag = match self {
            Error::Lex(err) => err.to_diagnostic(),
            Error::Parse(err) => err.to_diagnostic(),
            Error::TypeCheck(err) => err.to_diagnostic(),
            Error::Eval(err) => err.to_diagnostic(),
        };
        let text = self.span().slice(source);
        if text.is_empty() {
            diag.with_note(format!("{} failed", self.stage()))
        } else {
            diag.with_note(format!("{} failed at `{text}`", self.stage()))
        }
    }

    /// Render the error for a terminal, without colors, with `source`
    /// underlined.
    pub fn render(&self, source: &str) -> String {
        let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false)
            .with_source(source);
        emitter.emit(&self.diagnostic(source));
        String::from_utf8_lossy(&emitter.into_inner()).into_owned()
    }
}
