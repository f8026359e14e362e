//! Diagnostic system for the ODB front-end.
//!
//! Every diagnostic carries:
//! - An error code for searchability
//! - A message saying what went wrong
//! - A primary label saying where, plus secondary labels for related places
//! - Notes and suggestions
//!
//! Passes push diagnostics into a [`DiagnosticQueue`] and report success as a
//! plain `bool`; the queue decides what reaches the user.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod queue;

pub use diagnostic::{too_many_errors, Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
