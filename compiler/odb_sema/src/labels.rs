//! Bind `GOTO` and `GOSUB` to their labels.
//!
//! Labels are program-wide. A redefined label fails the pass before any jump
//! is rewritten, since the target would be ambiguous.

use rustc_hash::FxHashMap;

use odb_diagnostic::DiagnosticQueue;
use odb_ir::{visit, Ast, Name, NodeId, NodeKind, Order, Visitor};

use crate::report::Reporter;
use crate::{SemaError, SemaErrorKind};

#[derive(Default)]
struct LabelCollector {
    labels: FxHashMap<Name, NodeId>,
    redefinitions: Vec<(NodeId, NodeId)>,
    jumps: Vec<NodeId>,
}

impl Visitor for LabelCollector {
    fn visit_label(&mut self, _ast: &Ast, id: NodeId, name: Name) {
        match self.labels.get(&name) {
            Some(&first) => self.redefinitions.push((id, first)),
            None => {
                self.labels.insert(name, id);
            }
        }
    }

    fn visit_unresolved_goto(&mut self, _ast: &Ast, id: NodeId, _label: Name) {
        self.jumps.push(id);
    }

    fn visit_unresolved_sub_call(&mut self, _ast: &Ast, id: NodeId, _label: Name) {
        self.jumps.push(id);
    }
}

/// Rewrite every `UnresolvedGoto`/`UnresolvedSubCall` under `root` into a
/// `Goto`/`SubCall` pointing at its `Label` node.
///
/// Returns `false` if a label is defined twice or a jump names no label.
#[tracing::instrument(level = "debug", skip_all)]
pub fn resolve_labels(ast: &mut Ast, root: NodeId, queue: &mut DiagnosticQueue) -> bool {
    let mut reporter = Reporter::new(queue);
    let mut collector = LabelCollector::default();
    visit(ast, root, &mut collector, Order::PreOrder);

    for &(redefined, first) in &collector.redefinitions {
        let NodeKind::Label(name) = *ast.kind(redefined) else {
            continue;
        };
        let error = SemaError::new(
            ast.span(redefined),
            SemaErrorKind::LabelRedefined {
                name,
                previous: ast.span(first),
            },
        );
        reporter.error(&ast.interner, error);
    }
    if reporter.has_failed() {
        return false;
    }

    for jump in collector.jumps {
        let (label_name, is_sub) = match *ast.kind(jump) {
            NodeKind::UnresolvedGoto(name) => (name, false),
            NodeKind::UnresolvedSubCall(name) => (name, true),
            _ => continue,
        };
        let Some(&label) = collector.labels.get(&label_name) else {
            let error = SemaError::new(
                ast.span(jump),
                SemaErrorKind::LabelUndefined { name: label_name },
            );
            reporter.error(&ast.interner, error);
            continue;
        };
        let Some(parent) = ast.parent(jump) else {
            continue;
        };

        let kind = if is_sub {
            NodeKind::SubCall(label)
        } else {
            NodeKind::Goto(label)
        };
        let resolved = ast.alloc(kind, ast.span(jump));
        ast.swap_child(parent, jump, resolved);
        tracing::trace!(label = ast.name(label_name), ?jump, ?resolved, "jump resolved");
    }

    tracing::debug!(
        labels = collector.labels.len(),
        errors = reporter.error_count(),
        "label resolution finished"
    );
    !reporter.has_failed()
}

#[cfg(test)]
mod tests {
    use odb_diagnostic::{DiagnosticConfig, ErrorCode};
    use odb_ir::SourceSpan;
    use pretty_assertions::assert_eq;

    use super::*;

    fn span(line: u32) -> SourceSpan {
        SourceSpan::new(line, 1, line, 10)
    }

    fn queue() -> DiagnosticQueue {
        DiagnosticQueue::with_config(DiagnosticConfig::unlimited())
    }

    #[test]
    fn jumps_point_at_their_labels() {
        let mut ast = Ast::new();
        let label = ast.label("loop", span(1));
        let goto = ast.goto("loop", span(2));
        let gosub = ast.gosub("loop", span(3));
        let program = ast.program(vec![label, goto, gosub]);
        let mut queue = queue();

        assert!(resolve_labels(&mut ast, program, &mut queue));
        let body = ast.program_body(program);
        let stmts = ast.children(body).to_vec();
        assert_eq!(ast.kind(stmts[1]), &NodeKind::Goto(label));
        assert_eq!(ast.kind(stmts[2]), &NodeKind::SubCall(label));
        assert_eq!(ast.parent(stmts[1]), Some(body));
        assert!(!queue.has_errors());
    }

    #[test]
    fn forward_jumps_resolve() {
        let mut ast = Ast::new();
        let goto = ast.goto("end", span(1));
        let label = ast.label("end", span(2));
        let program = ast.program(vec![goto, label]);
        let mut queue = queue();

        assert!(resolve_labels(&mut ast, program, &mut queue));
        let body = ast.program_body(program);
        assert_eq!(ast.kind(ast.children(body)[0]), &NodeKind::Goto(label));
    }

    #[test]
    fn redefined_label_fails_without_rewriting() {
        let mut ast = Ast::new();
        let first = ast.label("here", span(1));
        let second = ast.label("here", span(2));
        let goto = ast.goto("here", span(3));
        let program = ast.program(vec![first, second, goto]);
        let mut queue = queue();

        assert!(!resolve_labels(&mut ast, program, &mut queue));
        let diags = queue.flush();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, ErrorCode::E3001);
        assert_eq!(diags[0].labels.len(), 2);
        assert!(matches!(ast.kind(goto), NodeKind::UnresolvedGoto(_)));
    }

    #[test]
    fn missing_label_is_reported_per_jump() {
        let mut ast = Ast::new();
        let goto = ast.goto("nowhere", span(1));
        let gosub = ast.gosub("nowhere", span(2));
        let program = ast.program(vec![goto, gosub]);
        let mut queue = queue();

        assert!(!resolve_labels(&mut ast, program, &mut queue));
        assert_eq!(queue.error_count(), 2);
        assert!(queue.peek().all(|d| d.code == ErrorCode::E3002));
    }
}
