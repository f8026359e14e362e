use pretty_assertions::assert_eq;

use super::*;
use crate::{Annotation, BinaryOpKind, SourceSpan};

const S: SourceSpan = SourceSpan::DUMMY;

/// `x = 1 + y` followed by `label: goto label`.
fn sample(ast: &mut Ast) -> NodeId {
    let target = ast.var_ref("x", Annotation::None, S);
    let one = ast.int_literal(1, S);
    let y = ast.var_ref("y", Annotation::None, S);
    let sum = ast.binary(BinaryOpKind::Add, one, y);
    let assign = ast.var_assign(target, sum, S);
    let label = ast.label("top", S);
    let goto = ast.goto("top", S);
    ast.program(vec![assign, label, goto])
}

#[derive(Default)]
struct Recorder {
    kinds: Vec<&'static str>,
    var_refs: usize,
}

impl Visitor for Recorder {
    fn visit_node(&mut self, ast: &Ast, id: NodeId) {
        self.kinds.push(ast.kind(id).name());
    }

    fn visit_var_ref(&mut self, ast: &Ast, id: NodeId, _node: &VarRef) {
        self.var_refs += 1;
        self.visit_node(ast, id);
    }
}

#[test]
fn unhandled_kinds_fall_back_to_visit_node() {
    let mut ast = Ast::new();
    let root = sample(&mut ast);
    let mut recorder = Recorder::default();
    visit(&ast, root, &mut recorder, Order::PreOrder);
    assert_eq!(recorder.var_refs, 2);
    assert_eq!(
        recorder.kinds,
        vec![
            "Program",
            "Block",
            "VarAssignment",
            "VarRef",
            "Identifier",
            "BinaryOp",
            "Literal",
            "VarRef",
            "Identifier",
            "Label",
            "UnresolvedGoto",
        ]
    );
}

#[test]
fn post_order_driver_visits_children_first() {
    let mut ast = Ast::new();
    let root = sample(&mut ast);
    let mut recorder = Recorder::default();
    visit(&ast, root, &mut recorder, Order::PostOrder);
    assert_eq!(recorder.kinds.first(), Some(&"Identifier"));
    assert_eq!(recorder.kinds.last(), Some(&"Program"));
    assert_eq!(recorder.kinds.len(), 11);
}

#[test]
fn visitors_work_as_trait_objects() {
    let mut ast = Ast::new();
    let root = sample(&mut ast);
    let mut recorder = Recorder::default();
    let dynamic: &mut dyn Visitor = &mut recorder;
    visit(&ast, root, dynamic, Order::PreOrder);
    assert_eq!(recorder.var_refs, 2);
}

/// Turns every `UnresolvedGoto` into a `SubReturn` and counts what it sees.
#[derive(Default)]
struct Rewriter {
    seen: Vec<&'static str>,
}

impl VisitorMut for Rewriter {
    fn visit_node(&mut self, cx: &mut VisitCx<'_>, id: NodeId) {
        self.seen.push(cx.ast().kind(id).name());
    }

    fn visit_unresolved_goto(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _label: Name) {
        self.seen.push("UnresolvedGoto");
        let span = cx.ast().span(id);
        let replacement = cx.ast_mut().sub_return(span);
        cx.replace_current(replacement);
        assert_eq!(cx.current(), Some(replacement));
    }
}

#[test]
fn mutable_visitor_replaces_current_node() {
    let mut ast = Ast::new();
    let root = sample(&mut ast);
    let body = ast.program_body(root);
    let mut rewriter = Rewriter::default();
    visit_mut(&mut ast, root, &mut rewriter, Order::PostOrder);

    let last = *ast.children(body).last().unwrap_or(&body);
    assert_eq!(ast.kind(last).name(), "SubReturn");
    assert_eq!(ast.parent(last), Some(body));
    assert_eq!(rewriter.seen.last(), Some(&"Program"));
    assert!(rewriter.seen.contains(&"UnresolvedGoto"));
}

/// Replaces the `1 + y` operand with a fresh `VarRef` during pre-order.
struct ReplaceSum {
    replacement_children_seen: bool,
    fresh: Option<NodeId>,
}

impl VisitorMut for ReplaceSum {
    fn visit_binary_op(&mut self, cx: &mut VisitCx<'_>, _id: NodeId, _node: &BinaryOp) {
        let fresh = cx.ast_mut().var_ref("z", Annotation::Float, S);
        self.fresh = Some(fresh);
        cx.replace_current(fresh);
    }

    fn visit_identifier(&mut self, cx: &mut VisitCx<'_>, _id: NodeId, node: &Identifier) {
        if cx.ast().name(node.name) == "z" {
            self.replacement_children_seen = true;
        }
    }
}

#[test]
fn pre_order_mutable_visit_descends_into_replacement() {
    let mut ast = Ast::new();
    let root = sample(&mut ast);
    let mut visitor = ReplaceSum {
        replacement_children_seen: false,
        fresh: None,
    };
    visit_mut(&mut ast, root, &mut visitor, Order::PreOrder);
    assert!(visitor.replacement_children_seen);
    let fresh = visitor.fresh.unwrap_or(root);
    assert_eq!(ast.kind(ast.parent(fresh).unwrap_or(root)).name(), "VarAssignment");
}
