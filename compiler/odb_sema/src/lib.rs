//! ODB Sema - semantic passes over the syntax tree.
//!
//! Passes, in the order [`check_program`] runs them:
//! - [`eliminate_bitwise_not`]: binary `..` becomes unary bitwise-not
//! - [`resolve_labels`]: `GOTO`/`GOSUB` bind to their labels
//! - [`enforce_single_default_case`]: at most one `CASE DEFAULT` per select
//! - [`validate_udt_annotations`]: no sigils on UDT-valued expressions
//! - [`resolve_and_check_types`]: scopes, variables, calls, implicit casts
//!
//! Every pass takes the tree, a root, and a [`DiagnosticQueue`], reports
//! problems to the queue, and returns `true` on success. A failed pass leaves
//! the tree well-formed, so later passes can still run and report.

mod bitwise_not;
mod default_case;
mod error;
mod labels;
mod query;
mod report;
mod resolve;
mod udt_annotations;

use std::sync::Once;

use odb_commands::CommandIndex;
use odb_diagnostic::DiagnosticQueue;
use odb_ir::{Ast, NodeId};

pub use bitwise_not::eliminate_bitwise_not;
pub use default_case::enforce_single_default_case;
pub use error::{CalleeKind, SemaError, SemaErrorKind, SemaWarning, SemaWarningKind, SymbolName};
pub use labels::resolve_labels;
pub use resolve::{resolve_and_check_types, resolve_and_check_types_with, ResolveOptions};
pub use udt_annotations::validate_udt_annotations;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=odb_sema=debug` or `RUST_LOG=odb_sema=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Run every semantic pass over `program`.
///
/// All passes run even after one fails, so a single call reports as much as
/// possible. Returns `true` only if every pass succeeded.
#[tracing::instrument(level = "debug", skip_all)]
pub fn check_program(
    ast: &mut Ast,
    program: NodeId,
    index: &dyn CommandIndex,
    queue: &mut DiagnosticQueue,
) -> bool {
    let mut ok = eliminate_bitwise_not(ast, program, queue);
    ok &= resolve_labels(ast, program, queue);
    ok &= enforce_single_default_case(ast, program, queue);
    ok &= validate_udt_annotations(ast, program, queue);
    ok &= resolve_and_check_types(ast, program, index, queue);
    tracing::debug!(
        ok,
        errors = queue.error_count(),
        warnings = queue.warning_count(),
        "semantic checks finished"
    );
    ok
}
