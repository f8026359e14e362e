//! Where passes put their diagnostics.
//!
//! The queue caps the number of errors, drops repeats at the same position and
//! errors nested inside an earlier one of the same code, and hands everything
//! back in source order.

use odb_ir::SourceSpan;

use crate::{diagnostic::too_many_errors, Diagnostic};

/// Two errors on one line count as repeats when their messages agree this far.
const MESSAGE_PREFIX_LEN: usize = 30;

fn message_prefix(msg: &str) -> &str {
    match msg.char_indices().nth(MESSAGE_PREFIX_LEN) {
        Some((end, _)) => &msg[..end],
        None => msg,
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Errors accepted before the rest are counted and dropped; 0 disables.
    pub error_limit: usize,
    /// Drop an error whose primary span lies inside an already reported
    /// error with the same code.
    pub filter_follow_on: bool,
    /// Drop an error reported at the same position as the previous one when
    /// the messages start alike.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 10,
            filter_follow_on: true,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// Keep everything. Tests use this to see every report.
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            filter_follow_on: false,
            deduplicate: false,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
struct QueuedDiagnostic {
    diagnostic: Diagnostic,
    span: SourceSpan,
}

/// Sink the passes report into.
///
/// A pass only needs [`add`](Self::add); the driver inspects
/// [`has_errors`](Self::has_errors) and drains the queue with
/// [`flush`](Self::flush).
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticQueue {
    diagnostics: Vec<QueuedDiagnostic>,
    error_count: usize,
    warning_count: usize,
    /// Errors rejected because the limit was reached.
    overflow: usize,
    /// Start position and message prefix of the last accepted error.
    last_error: Option<((u32, u32), String)>,
    config: DiagnosticConfig,
}

impl Default for DiagnosticQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::with_config(DiagnosticConfig::default())
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            error_count: 0,
            warning_count: 0,
            overflow: 0,
            last_error: None,
            config,
        }
    }

    /// Queue `diag`. Returns `false` if the configuration filtered it out.
    pub fn add(&mut self, diag: Diagnostic) -> bool {
        let span = diag.primary_span().unwrap_or(SourceSpan::DUMMY);

        if !diag.is_error() {
            if diag.is_warning() {
                self.warning_count += 1;
            }
            self.diagnostics.push(QueuedDiagnostic {
                diagnostic: diag,
                span,
            });
            return true;
        }

        if self.limit_reached() {
            self.overflow += 1;
            return false;
        }

        if self.config.filter_follow_on && self.is_follow_on(&diag, span) {
            tracing::trace!(code = %diag.code, %span, "dropping follow-on error");
            return false;
        }

        let prefix = message_prefix(&diag.message);
        let repeated = self
            .last_error
            .as_ref()
            .is_some_and(|(start, last)| *start == span.start() && last == prefix);
        if self.config.deduplicate && repeated {
            return false;
        }
        self.last_error = Some((span.start(), prefix.to_owned()));

        self.diagnostics.push(QueuedDiagnostic {
            diagnostic: diag,
            span,
        });
        self.error_count += 1;
        true
    }

    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    /// Whether any error has been recorded. Warnings never count.
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    /// Drain the queue in source order.
    ///
    /// Errors dropped by the limit are summarized by one trailing E9002.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        // Stable, so diagnostics at one position keep their report order.
        self.diagnostics.sort_by_key(|d| d.span.start());

        let last_span = self.diagnostics.last().map(|d| d.span);
        let mut result: Vec<Diagnostic> =
            self.diagnostics.drain(..).map(|d| d.diagnostic).collect();
        if self.overflow > 0 {
            result.push(too_many_errors(
                self.config.error_limit,
                last_span.unwrap_or(SourceSpan::DUMMY),
            ));
        }

        self.error_count = 0;
        self.warning_count = 0;
        self.overflow = 0;
        self.last_error = None;

        result
    }

    /// Queued diagnostics in report order, unsorted.
    pub fn peek(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().map(|d| &d.diagnostic)
    }

    fn is_follow_on(&self, diag: &Diagnostic, span: SourceSpan) -> bool {
        if span.is_dummy() {
            return false;
        }
        self.diagnostics.iter().any(|queued| {
            queued.diagnostic.is_error()
                && queued.diagnostic.code == diag.code
                && queued.span != span
                && queued.span.contains_span(span)
        })
    }
}
