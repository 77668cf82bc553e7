//! Diagnostic system for reporting expression failures.
//!
//! Every stage error converts into a [`Diagnostic`] carrying:
//! - an [`ErrorCode`] whose first digit names the stage
//! - a message saying what went wrong
//! - a primary label pointing at the offending token
//! - optional notes and suggestions
//!
//! [`emitter::TerminalEmitter`] renders diagnostics for humans, with the
//! expression source underlined when it is available.

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
