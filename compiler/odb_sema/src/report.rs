//! Per-pass error accounting in front of the diagnostic queue.
//!
//! The queue may drop follow-on or duplicate diagnostics, so whether a pass
//! failed is tracked here rather than read back from the queue.

use odb_diagnostic::DiagnosticQueue;
use odb_ir::StringInterner;

use crate::{SemaError, SemaWarning};

pub(crate) struct Reporter<'q> {
    queue: &'q mut DiagnosticQueue,
    errors: usize,
}

impl<'q> Reporter<'q> {
    pub(crate) fn new(queue: &'q mut DiagnosticQueue) -> Self {
        Reporter { queue, errors: 0 }
    }

    pub(crate) fn error(&mut self, interner: &StringInterner, error: SemaError) {
        tracing::debug!(code = %error.code(), span = ?error.span, "semantic error");
        self.errors += 1;
        self.queue.add(error.into_diagnostic(interner));
    }

    pub(crate) fn warning(&mut self, interner: &StringInterner, warning: SemaWarning) {
        tracing::trace!(code = %warning.code(), span = ?warning.span, "semantic warning");
        self.queue.add(warning.into_diagnostic(interner));
    }

    pub(crate) fn error_count(&self) -> usize {
        self.errors
    }

    pub(crate) fn has_failed(&self) -> bool {
        self.errors > 0
    }
}
