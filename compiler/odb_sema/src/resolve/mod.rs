//! Scoped variable resolution, call resolution, and implicit casts.
//!
//! # Architecture
//!
//! ```text
//! Pass A: gather         scopes, functions, UDTs (tree untouched)
//!
//! Pass B: resolve
//!   1. declare           pre-order: bind DIM declarations before any use
//!   2. variables         post-order: references, implicit declarations,
//!                        call-or-array disambiguation
//!   3. types             post-order: overloads, calls, UDT fields, casts
//! ```
//!
//! Sweep 3 only runs when sweeps 1 and 2 succeeded: it relies on every
//! reference carrying its `Variable`, so argument types are known when
//! overloads are scored.

mod declare;
mod gather;
mod overload;
mod types;
mod variables;

use odb_commands::CommandIndex;
use odb_diagnostic::DiagnosticQueue;
use odb_ir::{Ast, NodeId};

use crate::report::Reporter;
use gather::ProgramInfo;

/// Knobs for [`resolve_and_check_types_with`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ResolveOptions {
    /// Warn when an implicit cast truncates or changes signedness.
    pub truncation_warnings: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        ResolveOptions {
            truncation_warnings: true,
        }
    }
}

/// Resolve variables, functions, and commands of `program` and insert the
/// implicit casts its types require, with default options.
///
/// Returns `false` if any error was reported to `queue`.
pub fn resolve_and_check_types(
    ast: &mut Ast,
    program: NodeId,
    index: &dyn CommandIndex,
    queue: &mut DiagnosticQueue,
) -> bool {
    resolve_and_check_types_with(ast, program, index, queue, ResolveOptions::default())
}

/// [`resolve_and_check_types`] with explicit options.
#[tracing::instrument(level = "debug", skip_all)]
pub fn resolve_and_check_types_with(
    ast: &mut Ast,
    program: NodeId,
    index: &dyn CommandIndex,
    queue: &mut DiagnosticQueue,
    options: ResolveOptions,
) -> bool {
    let mut reporter = Reporter::new(queue);

    let info = ProgramInfo::gather(ast, program);
    declare::declare_variables(ast, program, &info, &mut reporter);
    variables::resolve_variables(ast, program, &info, &mut reporter);
    if reporter.has_failed() {
        tracing::debug!(
            errors = reporter.error_count(),
            "variable resolution failed; skipping type checks"
        );
        return false;
    }

    types::check_types(ast, program, &info, index, options, &mut reporter);
    tracing::debug!(
        errors = reporter.error_count(),
        variables = ast.symbols.variables().len(),
        "resolution finished"
    );
    !reporter.has_failed()
}

#[cfg(test)]
mod tests;
