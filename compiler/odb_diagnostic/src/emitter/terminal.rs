//! Plain-text rendering for terminals, colored when asked.
//!
//! With the program text attached, every label is followed by an underlined
//! excerpt of the lines it covers.

use std::io::{self, Write};

use crate::{Diagnostic, Label, Severity};

use super::DiagnosticEmitter;

mod colors {
    pub const ERROR: &str = "\x1b[1;31m";
    pub const WARNING: &str = "\x1b[1;33m";
    pub const NOTE: &str = "\x1b[1;36m";
    pub const HELP: &str = "\x1b[1;32m";
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m";
    pub const RESET: &str = "\x1b[0m";
}

/// `"1 warning"`, `"3 warnings"`.
fn count_of(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color only when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Writes diagnostics as `severity[CODE]: message` blocks, one label per line.
pub struct TerminalEmitter<'src, W: Write> {
    writer: W,
    colors: bool,
    source: Option<&'src str>,
}

impl<'src, W: Write> TerminalEmitter<'src, W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
        }
    }

    /// Attach the program text so labels render with source excerpts.
    #[must_use]
    pub fn with_source(mut self, source: &'src str) -> Self {
        self.source = Some(source);
        self
    }

    fn paint(&mut self, text: &str, color: &str) {
        let _ = if self.colors {
            write!(self.writer, "{color}{text}{}", colors::RESET)
        } else {
            write!(self.writer, "{text}")
        };
    }

    fn severity_color(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
            Severity::Help => colors::HELP,
        }
    }

    fn write_label(&mut self, label: &Label) {
        let (marker, color) = if label.is_primary {
            ("-->", colors::ERROR)
        } else {
            (":::", colors::SECONDARY)
        };
        let _ = write!(self.writer, "  {marker} {}: ", label.span);
        self.paint(&label.message, color);
        let _ = writeln!(self.writer);

        if let Some(source) = self.source {
            for line in label.span.excerpt(source).lines() {
                let _ = writeln!(self.writer, "    {line}");
            }
        }
    }

    /// `  = note: ...` and `  = help: ...` lines.
    fn write_trailer(&mut self, kind: &str, color: &str, text: &str) {
        let _ = write!(self.writer, "  = ");
        self.paint(kind, color);
        let _ = writeln!(self.writer, ": {text}");
    }
}

impl TerminalEmitter<'static, io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let severity = diagnostic.severity;
        self.paint(&severity.to_string(), Self::severity_color(severity));
        self.paint(&format!("[{}]", diagnostic.code), colors::BOLD);
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        for label in &diagnostic.labels {
            self.write_label(label);
        }
        for note in &diagnostic.notes {
            self.write_trailer("note", colors::BOLD, note);
        }
        for suggestion in &diagnostic.suggestions {
            self.write_trailer("help", colors::HELP, suggestion);
        }
        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        let warnings = (warning_count > 0)
            .then(|| format!("{} emitted", count_of(warning_count, "warning")));
        if error_count == 0 {
            if let Some(warnings) = warnings {
                self.paint("warning", colors::WARNING);
                let _ = writeln!(self.writer, ": {warnings}");
            }
            return;
        }

        let errors = if error_count == 1 {
            "previous error".to_owned()
        } else {
            format!("{error_count} previous errors")
        };
        self.paint("error", colors::ERROR);
        match warnings {
            Some(warnings) => {
                let _ = writeln!(self.writer, ": aborting due to {errors}; {warnings}");
            }
            None => {
                let _ = writeln!(self.writer, ": aborting due to {errors}");
            }
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
