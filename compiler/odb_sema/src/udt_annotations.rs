//! Reject type sigils on UDT-valued expressions.
//!
//! `a#.x` reads as "float `a`", which can never hold a UDT; the same goes for
//! commands whose name ends in a sigil character.

use odb_diagnostic::DiagnosticQueue;
use odb_ir::{visit, Ast, NodeId, NodeKind, Order, UdtField, Visitor};

use crate::report::Reporter;
use crate::{query, SemaError, SemaErrorKind, SymbolName};

struct AnnotationChecker<'r, 'q> {
    reporter: &'r mut Reporter<'q>,
}

impl Visitor for AnnotationChecker<'_, '_> {
    fn visit_udt_field(&mut self, ast: &Ast, _id: NodeId, node: &UdtField) {
        let base = node.udt_expr;
        let identifier = match ast.kind(base) {
            NodeKind::VarRef(n) => n.identifier,
            NodeKind::ArrayRef(n) => n.identifier,
            NodeKind::FuncCallExprOrArrayRef(n) => n.identifier,
            NodeKind::FuncCallExpr(n) => n.identifier,
            NodeKind::CommandExpr(n) => {
                if ast.name(n.name).ends_with(['$', '#']) {
                    let error = SemaError::new(
                        ast.span(base),
                        SemaErrorKind::MisleadingCommandAnnotation { name: n.name },
                    );
                    self.reporter.error(&ast.interner, error);
                }
                return;
            }
            _ => return,
        };
        let Some(ident) = query::identifier(ast, identifier) else {
            return;
        };
        if !ident.annotation.is_none() {
            let error = SemaError::new(
                ast.span(base),
                SemaErrorKind::AnnotatedUdt {
                    name: SymbolName::new(ident.name, ident.annotation),
                },
            );
            self.reporter.error(&ast.interner, error);
        }
    }
}

/// Report every UDT field access under `root` whose base carries a sigil.
#[tracing::instrument(level = "debug", skip_all)]
pub fn validate_udt_annotations(ast: &Ast, root: NodeId, queue: &mut DiagnosticQueue) -> bool {
    let mut reporter = Reporter::new(queue);
    visit(
        ast,
        root,
        &mut AnnotationChecker {
            reporter: &mut reporter,
        },
        Order::PreOrder,
    );
    !reporter.has_failed()
}
