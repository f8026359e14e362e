//! Diagnostic Emitters
//!
//! Each emitter implements the [`DiagnosticEmitter`] trait. The terminal
//! emitter is the only one the front-end ships; drivers embedding it can add
//! their own.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// Output format for flushed diagnostics.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    fn flush(&mut self);

    /// Closing line after all diagnostics, e.g. `aborting due to 3 previous errors`.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}
