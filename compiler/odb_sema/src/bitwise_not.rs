//! Rewrite the binary form of bitwise-not into the unary one.
//!
//! The parser reads `a .. b` as a binary operator; only the left side is
//! negated and the right side is dropped, which is only sound if evaluating
//! it does nothing.

use odb_diagnostic::DiagnosticQueue;
use odb_ir::traverse::pre_order;
use odb_ir::{
    visit_mut, Ast, BinaryOp, BinaryOpKind, NodeId, NodeKind, Order, UnaryOpKind, VisitCx,
    VisitorMut,
};

use crate::report::Reporter;
use crate::{SemaError, SemaErrorKind};

/// Whether evaluating `root` reads values only.
fn is_side_effect_free(ast: &Ast, root: NodeId) -> bool {
    pre_order(ast, root).all(|(id, _)| {
        matches!(
            ast.kind(id),
            NodeKind::Literal(_)
                | NodeKind::Identifier(_)
                | NodeKind::Variable(_)
                | NodeKind::VarRef(_)
                | NodeKind::ArrayRef(_)
                | NodeKind::ArgList(_)
                | NodeKind::BinaryOp(_)
                | NodeKind::UnaryOp(_)
                | NodeKind::ImplicitCast(_)
                | NodeKind::UdtField(_)
        )
    })
}

struct BitwiseNotRewriter<'r, 'q> {
    reporter: &'r mut Reporter<'q>,
    rewritten: usize,
}

impl VisitorMut for BitwiseNotRewriter<'_, '_> {
    fn visit_binary_op(&mut self, cx: &mut VisitCx<'_>, id: NodeId, node: &BinaryOp) {
        if node.op != BinaryOpKind::BitwiseNot {
            return;
        }
        let ast = cx.ast_mut();
        if !is_side_effect_free(ast, node.rhs) {
            let error = SemaError::new(ast.span(node.rhs), SemaErrorKind::BitwiseNotSideEffects);
            self.reporter.error(&ast.interner, error);
            return;
        }
        let span = ast.span(id);
        let unary = ast.unary(UnaryOpKind::BitwiseNot, node.lhs, span);
        cx.replace_current(unary);
        self.rewritten += 1;
    }
}

/// Replace every binary `BitwiseNot` under `root` with a unary `BitwiseNot`
/// of its left operand.
///
/// Returns `false` if any right operand may have side effects; those
/// operators are left in place.
#[tracing::instrument(level = "debug", skip_all)]
pub fn eliminate_bitwise_not(ast: &mut Ast, root: NodeId, queue: &mut DiagnosticQueue) -> bool {
    let mut reporter = Reporter::new(queue);
    let mut rewriter = BitwiseNotRewriter {
        reporter: &mut reporter,
        rewritten: 0,
    };
    visit_mut(ast, root, &mut rewriter, Order::PreOrder);
    tracing::debug!(rewritten = rewriter.rewritten, "bitwise-not elimination finished");
    !reporter.has_failed()
}
