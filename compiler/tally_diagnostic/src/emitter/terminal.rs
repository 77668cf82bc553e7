//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support. When
//! the expression source is attached, labels are drawn as underlines below
//! the expression text.

use std::io::{self, Write};

use crate::{Diagnostic, Label};

use super::DiagnosticEmitter;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean. `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    source: Option<String>,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter with explicit color mode.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
        }
    }

    /// Attach the expression text so labels render as underlines.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Consume the emitter, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write text with optional ANSI color codes.
    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_code(&mut self, code: &str) {
        if self.colors {
            let _ = write!(self.writer, "{}[{code}]{}", colors::BOLD, colors::RESET);
        } else {
            let _ = write!(self.writer, "[{code}]");
        }
    }

    /// `--> start..end: message` fallback used without source text.
    fn write_label_line(&mut self, label: &Label) {
        let marker = if label.is_primary { "-->" } else { "   " };
        let _ = write!(self.writer, "  {marker} {:?}: ", label.span);
        let color = if label.is_primary {
            colors::ERROR
        } else {
            colors::SECONDARY
        };
        self.write_colored(&label.message, color);
        let _ = writeln!(self.writer);
    }

    /// The source line with one underline row per label.
    fn write_snippet(&mut self, source: &str, labels: &[Label]) {
        let _ = writeln!(self.writer, "   |");
        let _ = writeln!(self.writer, "   | {source}");
        for label in labels {
            let (pad, width) = underline_geometry(source, label);
            let (mark, color) = if label.is_primary {
                ('^', colors::ERROR)
            } else {
                ('-', colors::SECONDARY)
            };
            let underline: String = std::iter::repeat(mark).take(width).collect();
            let _ = write!(self.writer, "   | {}", " ".repeat(pad));
            self.write_colored(&format!("{underline} {}", label.message), color);
            let _ = writeln!(self.writer);
        }
    }
}

impl TerminalEmitter<io::Stderr> {
    /// Create a terminal emitter for stderr.
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

/// Column and width (in chars) of a label's underline. Spans past the end
/// of the source point just after its last character.
fn underline_geometry(source: &str, label: &Label) -> (usize, usize) {
    let start = (label.span.start as usize).min(source.len());
    let end = (label.span.end as usize).clamp(start, source.len());
    let pad = source.get(..start).map_or(start, |s| s.chars().count());
    let width = source.get(start..end).map_or(0, |s| s.chars().count());
    (pad, width.max(1))
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: error[CODE]: message
        self.write_colored("error", colors::ERROR);
        self.write_code(diagnostic.code.as_str());
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        match self.source.take() {
            Some(source) if !diagnostic.labels.is_empty() => {
                if let Some(primary) = diagnostic.primary_span() {
                    let _ = writeln!(self.writer, "  --> {primary:?}");
                }
                self.write_snippet(&source, &diagnostic.labels);
                self.source = Some(source);
            }
            source => {
                self.source = source;
                for label in &diagnostic.labels {
                    self.write_label_line(label);
                }
            }
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "   = ");
            self.write_colored("note", colors::BOLD);
            let _ = writeln!(self.writer, ": {note}");
        }

        for suggestion in &diagnostic.suggestions {
            let _ = write!(self.writer, "   = ");
            self.write_colored("help", colors::HELP);
            let _ = writeln!(self.writer, ": {suggestion}");
        }
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}
