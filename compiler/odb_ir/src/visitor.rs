//! Per-kind dispatch over a traversal.
//!
//! [`Visitor`] and [`VisitorMut`] declare one handler per [`NodeKind`].
//! Every handler defaults to `visit_node`, so a pass implements the few
//! kinds it cares about and lets the rest fall through.
//!
//! [`visit`] and [`visit_mut`] are the only place traversal order and
//! dispatch meet. Mutable handlers receive a [`VisitCx`] that can rewrite
//! the tree and replace the current node through the cursor.
//!
//! # Example
//!
//! ```text
//! struct CountLabels(usize);
//!
//! impl Visitor for CountLabels {
//!     fn visit_label(&mut self, _ast: &Ast, _id: NodeId, _name: Name) {
//!         self.0 += 1;
//!     }
//! }
//!
//! visit(&ast, root, &mut CountLabels(0), Order::PreOrder);
//! ```

use crate::ast::{
    ArrayDecl, ArrayRef, ArrayUndim, Assignment, BinaryOp, Case, CommandCall, CondLoop,
    Conditional, DefaultCase, ForLoop, FuncCall, FuncCallOrArrayRef, FuncDecl, FuncExit,
    ImplicitCast, LiteralValue, NodeKind, Select, UdtDecl, UdtField, UnaryOp, VarDecl, VarRef,
};
use crate::traverse::{Order, PostOrder, PreOrder};
use crate::{Ast, Identifier, Name, NodeId, VariableId};

/// Read-only visitor.
pub trait Visitor {
    /// Fallback for every kind without an overridden handler.
    fn visit_node(&mut self, _ast: &Ast, _id: NodeId) {}

    fn visit_program(&mut self, ast: &Ast, id: NodeId, _body: NodeId) {
        self.visit_node(ast, id);
    }

    fn visit_block(&mut self, ast: &Ast, id: NodeId, _stmts: &[NodeId]) {
        self.visit_node(ast, id);
    }

    fn visit_arg_list(&mut self, ast: &Ast, id: NodeId, _args: &[NodeId]) {
        self.visit_node(ast, id);
    }

    fn visit_expr_list(&mut self, ast: &Ast, id: NodeId, _exprs: &[NodeId]) {
        self.visit_node(ast, id);
    }

    fn visit_initializer_list(&mut self, ast: &Ast, id: NodeId, _exprs: &[NodeId]) {
        self.visit_node(ast, id);
    }

    fn visit_func_arg_list(&mut self, ast: &Ast, id: NodeId, _params: &[NodeId]) {
        self.visit_node(ast, id);
    }

    fn visit_udt_decl_body(&mut self, ast: &Ast, id: NodeId, _fields: &[NodeId]) {
        self.visit_node(ast, id);
    }

    fn visit_case_list(&mut self, ast: &Ast, id: NodeId, _cases: &[NodeId]) {
        self.visit_node(ast, id);
    }

    fn visit_identifier(&mut self, ast: &Ast, id: NodeId, _node: &Identifier) {
        self.visit_node(ast, id);
    }

    fn visit_variable(&mut self, ast: &Ast, id: NodeId, _variable: VariableId) {
        self.visit_node(ast, id);
    }

    fn visit_literal(&mut self, ast: &Ast, id: NodeId, _value: &LiteralValue) {
        self.visit_node(ast, id);
    }

    fn visit_var_ref(&mut self, ast: &Ast, id: NodeId, _node: &VarRef) {
        self.visit_node(ast, id);
    }

    fn visit_array_ref(&mut self, ast: &Ast, id: NodeId, _node: &ArrayRef) {
        self.visit_node(ast, id);
    }

    fn visit_udt_field(&mut self, ast: &Ast, id: NodeId, _node: &UdtField) {
        self.visit_node(ast, id);
    }

    fn visit_func_call_expr_or_array_ref(&mut self, ast: &Ast, id: NodeId, _node: &FuncCallOrArrayRef) {
        self.visit_node(ast, id);
    }

    fn visit_func_call_expr(&mut self, ast: &Ast, id: NodeId, _node: &FuncCall) {
        self.visit_node(ast, id);
    }

    fn visit_func_call_stmnt(&mut self, ast: &Ast, id: NodeId, _node: &FuncCall) {
        self.visit_node(ast, id);
    }

    fn visit_command_expr(&mut self, ast: &Ast, id: NodeId, _node: &CommandCall) {
        self.visit_node(ast, id);
    }

    fn visit_command_stmnt(&mut self, ast: &Ast, id: NodeId, _node: &CommandCall) {
        self.visit_node(ast, id);
    }

    fn visit_binary_op(&mut self, ast: &Ast, id: NodeId, _node: &BinaryOp) {
        self.visit_node(ast, id);
    }

    fn visit_unary_op(&mut self, ast: &Ast, id: NodeId, _node: &UnaryOp) {
        self.visit_node(ast, id);
    }

    fn visit_implicit_cast(&mut self, ast: &Ast, id: NodeId, _node: &ImplicitCast) {
        self.visit_node(ast, id);
    }

    fn visit_var_decl(&mut self, ast: &Ast, id: NodeId, _node: &VarDecl) {
        self.visit_node(ast, id);
    }

    fn visit_array_decl(&mut self, ast: &Ast, id: NodeId, _node: &ArrayDecl) {
        self.visit_node(ast, id);
    }

    fn visit_array_undim(&mut self, ast: &Ast, id: NodeId, _node: &ArrayUndim) {
        self.visit_node(ast, id);
    }

    fn visit_func_decl(&mut self, ast: &Ast, id: NodeId, _node: &FuncDecl) {
        self.visit_node(ast, id);
    }

    fn visit_func_exit(&mut self, ast: &Ast, id: NodeId, _node: &FuncExit) {
        self.visit_node(ast, id);
    }

    fn visit_udt_decl(&mut self, ast: &Ast, id: NodeId, _node: &UdtDecl) {
        self.visit_node(ast, id);
    }

    fn visit_var_assignment(&mut self, ast: &Ast, id: NodeId, _node: &Assignment) {
        self.visit_node(ast, id);
    }

    fn visit_array_assignment(&mut self, ast: &Ast, id: NodeId, _node: &Assignment) {
        self.visit_node(ast, id);
    }

    fn visit_udt_field_assignment(&mut self, ast: &Ast, id: NodeId, _node: &Assignment) {
        self.visit_node(ast, id);
    }

    fn visit_conditional(&mut self, ast: &Ast, id: NodeId, _node: &Conditional) {
        self.visit_node(ast, id);
    }

    fn visit_select(&mut self, ast: &Ast, id: NodeId, _node: &Select) {
        self.visit_node(ast, id);
    }

    fn visit_case(&mut self, ast: &Ast, id: NodeId, _node: &Case) {
        self.visit_node(ast, id);
    }

    fn visit_default_case(&mut self, ast: &Ast, id: NodeId, _node: &DefaultCase) {
        self.visit_node(ast, id);
    }

    fn visit_for_loop(&mut self, ast: &Ast, id: NodeId, _node: &ForLoop) {
        self.visit_node(ast, id);
    }

    fn visit_while_loop(&mut self, ast: &Ast, id: NodeId, _node: &CondLoop) {
        self.visit_node(ast, id);
    }

    fn visit_until_loop(&mut self, ast: &Ast, id: NodeId, _node: &CondLoop) {
        self.visit_node(ast, id);
    }

    fn visit_infinite_loop(&mut self, ast: &Ast, id: NodeId, _body: NodeId) {
        self.visit_node(ast, id);
    }

    fn visit_exit(&mut self, ast: &Ast, id: NodeId) {
        self.visit_node(ast, id);
    }

    fn visit_label(&mut self, ast: &Ast, id: NodeId, _name: Name) {
        self.visit_node(ast, id);
    }

    fn visit_unresolved_goto(&mut self, ast: &Ast, id: NodeId, _label: Name) {
        self.visit_node(ast, id);
    }

    fn visit_unresolved_sub_call(&mut self, ast: &Ast, id: NodeId, _label: Name) {
        self.visit_node(ast, id);
    }

    fn visit_goto(&mut self, ast: &Ast, id: NodeId, _label: NodeId) {
        self.visit_node(ast, id);
    }

    fn visit_sub_call(&mut self, ast: &Ast, id: NodeId, _label: NodeId) {
        self.visit_node(ast, id);
    }

    fn visit_sub_return(&mut self, ast: &Ast, id: NodeId) {
        self.visit_node(ast, id);
    }
}

/// Mutating visitor.
///
/// Payloads are snapshots taken before the handler runs; re-read through
/// `cx.ast()` after mutating.
pub trait VisitorMut {
    /// Fallback for every kind without an overridden handler.
    fn visit_node(&mut self, _cx: &mut VisitCx<'_>, _id: NodeId) {}

    fn visit_program(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _body: NodeId) {
        self.visit_node(cx, id);
    }

    fn visit_block(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _stmts: &[NodeId]) {
        self.visit_node(cx, id);
    }

    fn visit_arg_list(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _args: &[NodeId]) {
        self.visit_node(cx, id);
    }

    fn visit_expr_list(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _exprs: &[NodeId]) {
        self.visit_node(cx, id);
    }

    fn visit_initializer_list(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _exprs: &[NodeId]) {
        self.visit_node(cx, id);
    }

    fn visit_func_arg_list(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _params: &[NodeId]) {
        self.visit_node(cx, id);
    }

    fn visit_udt_decl_body(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _fields: &[NodeId]) {
        self.visit_node(cx, id);
    }

    fn visit_case_list(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _cases: &[NodeId]) {
        self.visit_node(cx, id);
    }

    fn visit_identifier(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _node: &Identifier) {
        self.visit_node(cx, id);
    }

    fn visit_variable(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _variable: VariableId) {
        self.visit_node(cx, id);
    }

    fn visit_literal(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _value: &LiteralValue) {
        self.visit_node(cx, id);
    }

    fn visit_var_ref(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _node: &VarRef) {
        self.visit_node(cx, id);
    }

    fn visit_array_ref(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _node: &ArrayRef) {
        self.visit_node(cx, id);
    }

    fn visit_udt_field(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _node: &UdtField) {
        self.visit_node(cx, id);
    }

    fn visit_func_call_expr_or_array_ref(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _node: &FuncCallOrArrayRef) {
        self.visit_node(cx, id);
    }

    fn visit_func_call_expr(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _node: &FuncCall) {
        self.visit_node(cx, id);
    }

    fn visit_func_call_stmnt(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _node: &FuncCall) {
        self.visit_node(cx, id);
    }

    fn visit_command_expr(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _node: &CommandCall) {
        self.visit_node(cx, id);
    }

    fn visit_command_stmnt(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _node: &CommandCall) {
        self.visit_node(cx, id);
    }

    fn visit_binary_op(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _node: &BinaryOp) {
        self.visit_node(cx, id);
    }

    fn visit_unary_op(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _node: &UnaryOp) {
        self.visit_node(cx, id);
    }

    fn visit_implicit_cast(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _node: &ImplicitCast) {
        self.visit_node(cx, id);
    }

    fn visit_var_decl(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _node: &VarDecl) {
        self.visit_node(cx, id);
    }

    fn visit_array_decl(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _node: &ArrayDecl) {
        self.visit_node(cx, id);
    }

    fn visit_array_undim(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _node: &ArrayUndim) {
        self.visit_node(cx, id);
    }

    fn visit_func_decl(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _node: &FuncDecl) {
        self.visit_node(cx, id);
    }

    fn visit_func_exit(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _node: &FuncExit) {
        self.visit_node(cx, id);
    }

    fn visit_udt_decl(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _node: &UdtDecl) {
        self.visit_node(cx, id);
    }

    fn visit_var_assignment(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _node: &Assignment) {
        self.visit_node(cx, id);
    }

    fn visit_array_assignment(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _node: &Assignment) {
        self.visit_node(cx, id);
    }

    fn visit_udt_field_assignment(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _node: &Assignment) {
        self.visit_node(cx, id);
    }

    fn visit_conditional(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _node: &Conditional) {
        self.visit_node(cx, id);
    }

    fn visit_select(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _node: &Select) {
        self.visit_node(cx, id);
    }

    fn visit_case(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _node: &Case) {
        self.visit_node(cx, id);
    }

    fn visit_default_case(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _node: &DefaultCase) {
        self.visit_node(cx, id);
    }

    fn visit_for_loop(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _node: &ForLoop) {
        self.visit_node(cx, id);
    }

    fn visit_while_loop(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _node: &CondLoop) {
        self.visit_node(cx, id);
    }

    fn visit_until_loop(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _node: &CondLoop) {
        self.visit_node(cx, id);
    }

    fn visit_infinite_loop(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _body: NodeId) {
        self.visit_node(cx, id);
    }

    fn visit_exit(&mut self, cx: &mut VisitCx<'_>, id: NodeId) {
        self.visit_node(cx, id);
    }

    fn visit_label(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _name: Name) {
        self.visit_node(cx, id);
    }

    fn visit_unresolved_goto(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _label: Name) {
        self.visit_node(cx, id);
    }

    fn visit_unresolved_sub_call(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _label: Name) {
        self.visit_node(cx, id);
    }

    fn visit_goto(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _label: NodeId) {
        self.visit_node(cx, id);
    }

    fn visit_sub_call(&mut self, cx: &mut VisitCx<'_>, id: NodeId, _label: NodeId) {
        self.visit_node(cx, id);
    }

    fn visit_sub_return(&mut self, cx: &mut VisitCx<'_>, id: NodeId) {
        self.visit_node(cx, id);
    }
}

/// Dispatch `id` to the matching [`Visitor`] handler.
pub fn dispatch<V: Visitor + ?Sized>(visitor: &mut V, ast: &Ast, id: NodeId) {
    match ast.kind(id) {
        NodeKind::Program(p) => visitor.visit_program(ast, id, *p),
        NodeKind::Block(p) => visitor.visit_block(ast, id, p),
        NodeKind::ArgList(p) => visitor.visit_arg_list(ast, id, p),
        NodeKind::ExprList(p) => visitor.visit_expr_list(ast, id, p),
        NodeKind::InitializerList(p) => visitor.visit_initializer_list(ast, id, p),
        NodeKind::FuncArgList(p) => visitor.visit_func_arg_list(ast, id, p),
        NodeKind::UdtDeclBody(p) => visitor.visit_udt_decl_body(ast, id, p),
        NodeKind::CaseList(p) => visitor.visit_case_list(ast, id, p),
        NodeKind::Identifier(p) => visitor.visit_identifier(ast, id, p),
        NodeKind::Variable(p) => visitor.visit_variable(ast, id, *p),
        NodeKind::Literal(p) => visitor.visit_literal(ast, id, p),
        NodeKind::VarRef(p) => visitor.visit_var_ref(ast, id, p),
        NodeKind::ArrayRef(p) => visitor.visit_array_ref(ast, id, p),
        NodeKind::UdtField(p) => visitor.visit_udt_field(ast, id, p),
        NodeKind::FuncCallExprOrArrayRef(p) => visitor.visit_func_call_expr_or_array_ref(ast, id, p),
        NodeKind::FuncCallExpr(p) => visitor.visit_func_call_expr(ast, id, p),
        NodeKind::FuncCallStmnt(p) => visitor.visit_func_call_stmnt(ast, id, p),
        NodeKind::CommandExpr(p) => visitor.visit_command_expr(ast, id, p),
        NodeKind::CommandStmnt(p) => visitor.visit_command_stmnt(ast, id, p),
        NodeKind::BinaryOp(p) => visitor.visit_binary_op(ast, id, p),
        NodeKind::UnaryOp(p) => visitor.visit_unary_op(ast, id, p),
        NodeKind::ImplicitCast(p) => visitor.visit_implicit_cast(ast, id, p),
        NodeKind::VarDecl(p) => visitor.visit_var_decl(ast, id, p),
        NodeKind::ArrayDecl(p) => visitor.visit_array_decl(ast, id, p),
        NodeKind::ArrayUndim(p) => visitor.visit_array_undim(ast, id, p),
        NodeKind::FuncDecl(p) => visitor.visit_func_decl(ast, id, p),
        NodeKind::FuncExit(p) => visitor.visit_func_exit(ast, id, p),
        NodeKind::UdtDecl(p) => visitor.visit_udt_decl(ast, id, p),
        NodeKind::VarAssignment(p) => visitor.visit_var_assignment(ast, id, p),
        NodeKind::ArrayAssignment(p) => visitor.visit_array_assignment(ast, id, p),
        NodeKind::UdtFieldAssignment(p) => visitor.visit_udt_field_assignment(ast, id, p),
        NodeKind::Conditional(p) => visitor.visit_conditional(ast, id, p),
        NodeKind::Select(p) => visitor.visit_select(ast, id, p),
        NodeKind::Case(p) => visitor.visit_case(ast, id, p),
        NodeKind::DefaultCase(p) => visitor.visit_default_case(ast, id, p),
        NodeKind::ForLoop(p) => visitor.visit_for_loop(ast, id, p),
        NodeKind::WhileLoop(p) => visitor.visit_while_loop(ast, id, p),
        NodeKind::UntilLoop(p) => visitor.visit_until_loop(ast, id, p),
        NodeKind::InfiniteLoop(p) => visitor.visit_infinite_loop(ast, id, *p),
        NodeKind::Exit => visitor.visit_exit(ast, id),
        NodeKind::Label(p) => visitor.visit_label(ast, id, *p),
        NodeKind::UnresolvedGoto(p) => visitor.visit_unresolved_goto(ast, id, *p),
        NodeKind::UnresolvedSubCall(p) => visitor.visit_unresolved_sub_call(ast, id, *p),
        NodeKind::Goto(p) => visitor.visit_goto(ast, id, *p),
        NodeKind::SubCall(p) => visitor.visit_sub_call(ast, id, *p),
        NodeKind::SubReturn => visitor.visit_sub_return(ast, id),
    }
}

/// Dispatch `id` to the matching [`VisitorMut`] handler.
pub fn dispatch_mut<V: VisitorMut + ?Sized>(visitor: &mut V, cx: &mut VisitCx<'_>, id: NodeId) {
    let kind = cx.ast().kind(id).clone();
    match &kind {
        NodeKind::Program(p) => visitor.visit_program(cx, id, *p),
        NodeKind::Block(p) => visitor.visit_block(cx, id, p),
        NodeKind::ArgList(p) => visitor.visit_arg_list(cx, id, p),
        NodeKind::ExprList(p) => visitor.visit_expr_list(cx, id, p),
        NodeKind::InitializerList(p) => visitor.visit_initializer_list(cx, id, p),
        NodeKind::FuncArgList(p) => visitor.visit_func_arg_list(cx, id, p),
        NodeKind::UdtDeclBody(p) => visitor.visit_udt_decl_body(cx, id, p),
        NodeKind::CaseList(p) => visitor.visit_case_list(cx, id, p),
        NodeKind::Identifier(p) => visitor.visit_identifier(cx, id, p),
        NodeKind::Variable(p) => visitor.visit_variable(cx, id, *p),
        NodeKind::Literal(p) => visitor.visit_literal(cx, id, p),
        NodeKind::VarRef(p) => visitor.visit_var_ref(cx, id, p),
        NodeKind::ArrayRef(p) => visitor.visit_array_ref(cx, id, p),
        NodeKind::UdtField(p) => visitor.visit_udt_field(cx, id, p),
        NodeKind::FuncCallExprOrArrayRef(p) => visitor.visit_func_call_expr_or_array_ref(cx, id, p),
        NodeKind::FuncCallExpr(p) => visitor.visit_func_call_expr(cx, id, p),
        NodeKind::FuncCallStmnt(p) => visitor.visit_func_call_stmnt(cx, id, p),
        NodeKind::CommandExpr(p) => visitor.visit_command_expr(cx, id, p),
        NodeKind::CommandStmnt(p) => visitor.visit_command_stmnt(cx, id, p),
        NodeKind::BinaryOp(p) => visitor.visit_binary_op(cx, id, p),
        NodeKind::UnaryOp(p) => visitor.visit_unary_op(cx, id, p),
        NodeKind::ImplicitCast(p) => visitor.visit_implicit_cast(cx, id, p),
        NodeKind::VarDecl(p) => visitor.visit_var_decl(cx, id, p),
        NodeKind::ArrayDecl(p) => visitor.visit_array_decl(cx, id, p),
        NodeKind::ArrayUndim(p) => visitor.visit_array_undim(cx, id, p),
        NodeKind::FuncDecl(p) => visitor.visit_func_decl(cx, id, p),
        NodeKind::FuncExit(p) => visitor.visit_func_exit(cx, id, p),
        NodeKind::UdtDecl(p) => visitor.visit_udt_decl(cx, id, p),
        NodeKind::VarAssignment(p) => visitor.visit_var_assignment(cx, id, p),
        NodeKind::ArrayAssignment(p) => visitor.visit_array_assignment(cx, id, p),
        NodeKind::UdtFieldAssignment(p) => visitor.visit_udt_field_assignment(cx, id, p),
        NodeKind::Conditional(p) => visitor.visit_conditional(cx, id, p),
        NodeKind::Select(p) => visitor.visit_select(cx, id, p),
        NodeKind::Case(p) => visitor.visit_case(cx, id, p),
        NodeKind::DefaultCase(p) => visitor.visit_default_case(cx, id, p),
        NodeKind::ForLoop(p) => visitor.visit_for_loop(cx, id, p),
        NodeKind::WhileLoop(p) => visitor.visit_while_loop(cx, id, p),
        NodeKind::UntilLoop(p) => visitor.visit_until_loop(cx, id, p),
        NodeKind::InfiniteLoop(p) => visitor.visit_infinite_loop(cx, id, *p),
        NodeKind::Exit => visitor.visit_exit(cx, id),
        NodeKind::Label(p) => visitor.visit_label(cx, id, *p),
        NodeKind::UnresolvedGoto(p) => visitor.visit_unresolved_goto(cx, id, *p),
        NodeKind::UnresolvedSubCall(p) => visitor.visit_unresolved_sub_call(cx, id, *p),
        NodeKind::Goto(p) => visitor.visit_goto(cx, id, *p),
        NodeKind::SubCall(p) => visitor.visit_sub_call(cx, id, *p),
        NodeKind::SubReturn => visitor.visit_sub_return(cx, id),
    }
}

/// Visit every node under `root`, inclusive, in `order`.
pub fn visit<V: Visitor + ?Sized>(ast: &Ast, root: NodeId, visitor: &mut V, order: Order) {
    match order {
        Order::PreOrder => {
            for (id, _) in crate::traverse::pre_order(ast, root) {
                dispatch(visitor, ast, id);
            }
        }
        Order::PostOrder => {
            for (id, _) in crate::traverse::post_order(ast, root) {
                dispatch(visitor, ast, id);
            }
        }
    }
}

/// Visit every node under `root`, inclusive, in `order`, allowing handlers
/// to mutate the tree.
pub fn visit_mut<V: VisitorMut + ?Sized>(
    ast: &mut Ast,
    root: NodeId,
    visitor: &mut V,
    order: Order,
) {
    let mut cursor = match order {
        Order::PreOrder => Cursor::Pre(PreOrder::new(root)),
        Order::PostOrder => Cursor::Post(PostOrder::new(ast, root)),
    };
    while let Some(current) = cursor.current() {
        let mut cx = VisitCx {
            ast: &mut *ast,
            cursor: &mut cursor,
        };
        dispatch_mut(visitor, &mut cx, current);
        cursor.advance(ast);
    }
}

enum Cursor {
    Pre(PreOrder),
    Post(PostOrder),
}

impl Cursor {
    fn current(&self) -> Option<NodeId> {
        match self {
            Cursor::Pre(c) => c.current(),
            Cursor::Post(c) => c.current(),
        }
    }

    fn parent(&self) -> Option<NodeId> {
        match self {
            Cursor::Pre(c) => c.parent(),
            Cursor::Post(c) => c.parent(),
        }
    }

    fn advance(&mut self, ast: &Ast) {
        match self {
            Cursor::Pre(c) => c.advance(ast),
            Cursor::Post(c) => c.advance(ast),
        }
    }

    fn replace_node(&mut self, ast: &mut Ast, new: NodeId) {
        match self {
            Cursor::Pre(c) => c.replace_node(ast, new),
            Cursor::Post(c) => c.replace_node(ast, new),
        }
    }
}

/// Handler context for [`VisitorMut`].
pub struct VisitCx<'a> {
    ast: &'a mut Ast,
    cursor: &'a mut Cursor,
}

impl VisitCx<'_> {
    pub fn ast(&self) -> &Ast {
        &*self.ast
    }

    pub fn ast_mut(&mut self) -> &mut Ast {
        &mut *self.ast
    }

    /// The node being visited; changes after [`VisitCx::replace_current`].
    pub fn current(&self) -> Option<NodeId> {
        self.cursor.current()
    }

    /// Parent of the node being visited, `None` at the traversal root.
    pub fn parent(&self) -> Option<NodeId> {
        self.cursor.parent()
    }

    /// Replace the node being visited in its parent.
    ///
    /// In pre-order the traversal continues into `new`'s children; in
    /// post-order they are not visited.
    ///
    /// # Panics
    /// Panics at the traversal root.
    pub fn replace_current(&mut self, new: NodeId) {
        self.cursor.replace_node(&mut *self.ast, new);
    }
}

#[cfg(test)]
mod tests;
