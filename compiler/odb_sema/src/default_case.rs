//! At most one `CASE DEFAULT` per `SELECT`.

use odb_diagnostic::DiagnosticQueue;
use odb_ir::{visit, Ast, NodeId, NodeKind, Order, Select, Visitor};

use crate::report::Reporter;
use crate::{SemaError, SemaErrorKind};

struct DefaultCaseChecker<'r, 'q> {
    reporter: &'r mut Reporter<'q>,
}

impl Visitor for DefaultCaseChecker<'_, '_> {
    fn visit_select(&mut self, ast: &Ast, id: NodeId, node: &Select) {
        let defaults: Vec<_> = ast
            .children(node.cases)
            .iter()
            .filter(|&&case| matches!(ast.kind(case), NodeKind::DefaultCase(_)))
            .map(|&case| ast.span(case))
            .collect();
        if defaults.len() > 1 {
            let error =
                SemaError::new(ast.span(id), SemaErrorKind::MultipleDefaultCases { defaults });
            self.reporter.error(&ast.interner, error);
        }
    }
}

/// Report every `Select` under `root` with more than one default case.
#[tracing::instrument(level = "debug", skip_all)]
pub fn enforce_single_default_case(
    ast: &Ast,
    root: NodeId,
    queue: &mut DiagnosticQueue,
) -> bool {
    let mut reporter = Reporter::new(queue);
    visit(
        ast,
        root,
        &mut DefaultCaseChecker {
            reporter: &mut reporter,
        },
        Order::PreOrder,
    );
    !reporter.has_failed()
}
