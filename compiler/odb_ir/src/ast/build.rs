//! Constructor helpers.
//!
//! The external parser and the tests build trees through these. Leaf and
//! statement constructors take an explicit span; list containers and binary
//! operators cover the union of their children.

use super::{
    ArrayDecl, ArrayRef, ArrayUndim, Assignment, BinaryOp, BinaryOpKind, Case, CommandCall,
    CondLoop, Conditional, DefaultCase, ForLoop, FuncCall, FuncCallOrArrayRef, FuncDecl,
    FuncExit, ImplicitCast, LiteralValue, NodeKind, Select, UdtDecl, UdtField, UnaryOp,
    UnaryOpKind, VarDecl, VarRef,
};
use crate::{Annotation, Ast, Identifier, NodeId, SourceSpan, Type};

impl Ast {
    fn span_of_all(&self, ids: &[NodeId]) -> SourceSpan {
        ids.iter()
            .fold(SourceSpan::DUMMY, |acc, &id| acc.union(self.span(id)))
    }

    fn list(&mut self, ids: Vec<NodeId>, wrap: fn(Vec<NodeId>) -> NodeKind) -> NodeId {
        let span = self.span_of_all(&ids);
        self.alloc(wrap(ids), span)
    }

    fn opt_list(
        &mut self,
        ids: Vec<NodeId>,
        wrap: fn(Vec<NodeId>) -> NodeKind,
    ) -> Option<NodeId> {
        (!ids.is_empty()).then(|| self.list(ids, wrap))
    }

    /// A `Program` whose main block holds `stmts`.
    pub fn program(&mut self, stmts: Vec<NodeId>) -> NodeId {
        let body = self.block(stmts);
        let span = self.span(body);
        self.alloc(NodeKind::Program(body), span)
    }

    /// The main block of a program.
    ///
    /// # Panics
    /// Panics if `program` is not a `Program`.
    pub fn program_body(&self, program: NodeId) -> NodeId {
        match self.kind(program) {
            NodeKind::Program(body) => *body,
            other => panic!("{program:?} is a {}, not a Program", other.name()),
        }
    }

    pub fn block(&mut self, stmts: Vec<NodeId>) -> NodeId {
        self.list(stmts, NodeKind::Block)
    }

    pub fn arg_list(&mut self, args: Vec<NodeId>) -> NodeId {
        self.list(args, NodeKind::ArgList)
    }

    pub fn expr_list(&mut self, exprs: Vec<NodeId>) -> NodeId {
        self.list(exprs, NodeKind::ExprList)
    }

    pub fn initializer_list(&mut self, exprs: Vec<NodeId>) -> NodeId {
        self.list(exprs, NodeKind::InitializerList)
    }

    pub fn identifier(&mut self, name: &str, annotation: Annotation, span: SourceSpan) -> NodeId {
        let name = self.intern(name);
        self.alloc(NodeKind::Identifier(Identifier::new(name, annotation)), span)
    }

    pub fn scoped_identifier(&mut self, ident: Identifier, span: SourceSpan) -> NodeId {
        self.alloc(NodeKind::Identifier(ident), span)
    }

    pub fn literal(&mut self, value: LiteralValue, span: SourceSpan) -> NodeId {
        self.alloc(NodeKind::Literal(value), span)
    }

    pub fn int_literal(&mut self, value: i32, span: SourceSpan) -> NodeId {
        self.literal(LiteralValue::Integer(value), span)
    }

    pub fn float_literal(&mut self, value: f32, span: SourceSpan) -> NodeId {
        self.literal(LiteralValue::Float(value), span)
    }

    pub fn string_literal(&mut self, value: &str, span: SourceSpan) -> NodeId {
        let name = self.intern(value);
        self.literal(LiteralValue::String(name), span)
    }

    /// `name` as a scalar read.
    pub fn var_ref(&mut self, name: &str, annotation: Annotation, span: SourceSpan) -> NodeId {
        let identifier = self.identifier(name, annotation, span);
        self.var_ref_of(identifier, span)
    }

    /// Scalar read of an existing `Identifier` node.
    pub fn var_ref_of(&mut self, identifier: NodeId, span: SourceSpan) -> NodeId {
        self.alloc(
            NodeKind::VarRef(VarRef {
                identifier,
                variable: None,
            }),
            span,
        )
    }

    pub fn array_ref(
        &mut self,
        name: &str,
        annotation: Annotation,
        dims: Vec<NodeId>,
        span: SourceSpan,
    ) -> NodeId {
        let identifier = self.identifier(name, annotation, span);
        let dims = self.opt_list(dims, NodeKind::ArgList);
        self.alloc(
            NodeKind::ArrayRef(ArrayRef {
                identifier,
                dims,
                variable: None,
            }),
            span,
        )
    }

    /// `base.field`, where `field` is a `VarRef` or `ArrayRef`.
    pub fn udt_field(&mut self, udt_expr: NodeId, field: NodeId, span: SourceSpan) -> NodeId {
        self.alloc(
            NodeKind::UdtField(UdtField {
                udt_expr,
                field,
                resolved_ty: None,
            }),
            span,
        )
    }

    /// `name(args)` in expression position, not yet disambiguated.
    pub fn func_call_or_array(
        &mut self,
        name: &str,
        annotation: Annotation,
        args: Vec<NodeId>,
        span: SourceSpan,
    ) -> NodeId {
        let identifier = self.identifier(name, annotation, span);
        let args = self.opt_list(args, NodeKind::ArgList);
        self.alloc(
            NodeKind::FuncCallExprOrArrayRef(FuncCallOrArrayRef { identifier, args }),
            span,
        )
    }

    fn func_call(&mut self, name: &str, args: Vec<NodeId>, span: SourceSpan) -> FuncCall {
        let identifier = self.identifier(name, Annotation::None, span);
        let args = self.opt_list(args, NodeKind::ArgList);
        FuncCall {
            identifier,
            args,
            function: None,
        }
    }

    pub fn func_call_expr(&mut self, name: &str, args: Vec<NodeId>, span: SourceSpan) -> NodeId {
        let call = self.func_call(name, args, span);
        self.alloc(NodeKind::FuncCallExpr(call), span)
    }

    pub fn func_call_stmnt(&mut self, name: &str, args: Vec<NodeId>, span: SourceSpan) -> NodeId {
        let call = self.func_call(name, args, span);
        self.alloc(NodeKind::FuncCallStmnt(call), span)
    }

    fn command_call(&mut self, name: &str, args: Vec<NodeId>) -> CommandCall {
        CommandCall {
            name: self.intern(name),
            args: self.opt_list(args, NodeKind::ArgList),
            command: None,
        }
    }

    pub fn command_expr(&mut self, name: &str, args: Vec<NodeId>, span: SourceSpan) -> NodeId {
        let call = self.command_call(name, args);
        self.alloc(NodeKind::CommandExpr(call), span)
    }

    pub fn command_stmnt(&mut self, name: &str, args: Vec<NodeId>, span: SourceSpan) -> NodeId {
        let call = self.command_call(name, args);
        self.alloc(NodeKind::CommandStmnt(call), span)
    }

    pub fn binary(&mut self, op: BinaryOpKind, lhs: NodeId, rhs: NodeId) -> NodeId {
        let span = self.span(lhs).union(self.span(rhs));
        self.alloc(NodeKind::BinaryOp(BinaryOp { op, lhs, rhs }), span)
    }

    pub fn unary(&mut self, op: UnaryOpKind, expr: NodeId, span: SourceSpan) -> NodeId {
        self.alloc(NodeKind::UnaryOp(UnaryOp { op, expr }), span)
    }

    /// Wrap `expr` in a cast to `target`, spanning the same source.
    pub fn implicit_cast(&mut self, expr: NodeId, target: Type) -> NodeId {
        let span = self.span(expr);
        self.alloc(NodeKind::ImplicitCast(ImplicitCast { expr, target }), span)
    }

    /// `DIM name AS ty [= init...]`. An empty `init` means no initializer.
    pub fn var_decl(
        &mut self,
        name: &str,
        annotation: Annotation,
        ty: Type,
        init: Vec<NodeId>,
        span: SourceSpan,
    ) -> NodeId {
        let identifier = self.identifier(name, annotation, span);
        self.var_decl_of(identifier, ty, init, span)
    }

    /// `VarDecl` for an existing `Identifier` node, e.g. one with a scope marker.
    pub fn var_decl_of(
        &mut self,
        identifier: NodeId,
        ty: Type,
        init: Vec<NodeId>,
        span: SourceSpan,
    ) -> NodeId {
        let initializer = self.opt_list(init, NodeKind::InitializerList);
        self.alloc(
            NodeKind::VarDecl(VarDecl {
                identifier,
                ty,
                initializer,
            }),
            span,
        )
    }

    pub fn array_decl(
        &mut self,
        name: &str,
        annotation: Annotation,
        element_ty: Type,
        dims: Vec<NodeId>,
        span: SourceSpan,
    ) -> NodeId {
        let identifier = self.identifier(name, annotation, span);
        let dims = self.opt_list(dims, NodeKind::ArgList);
        self.alloc(
            NodeKind::ArrayDecl(ArrayDecl {
                identifier,
                element_ty,
                dims,
                variable: None,
            }),
            span,
        )
    }

    pub fn array_undim(
        &mut self,
        name: &str,
        annotation: Annotation,
        dims: Vec<NodeId>,
        span: SourceSpan,
    ) -> NodeId {
        let identifier = self.identifier(name, annotation, span);
        let dims = self.list(dims, NodeKind::ArgList);
        self.alloc(
            NodeKind::ArrayUndim(ArrayUndim {
                identifier,
                dims,
                variable: None,
            }),
            span,
        )
    }

    /// `FUNCTION name(params) body ENDFUNCTION [return_value]`.
    ///
    /// `params` are `VarDecl` nodes without initializers.
    pub fn func_decl(
        &mut self,
        name: &str,
        params: Vec<NodeId>,
        body: Vec<NodeId>,
        return_value: Option<NodeId>,
        span: SourceSpan,
    ) -> NodeId {
        let identifier = self.identifier(name, Annotation::None, span);
        let args = self.opt_list(params, NodeKind::FuncArgList);
        let body = self.block(body);
        self.alloc(
            NodeKind::FuncDecl(FuncDecl {
                identifier,
                args,
                body,
                return_value,
            }),
            span,
        )
    }

    pub fn func_exit(&mut self, return_value: Option<NodeId>, span: SourceSpan) -> NodeId {
        self.alloc(NodeKind::FuncExit(FuncExit { return_value }), span)
    }

    /// `TYPE name fields ENDTYPE`; `fields` are `VarDecl`/`ArrayDecl` nodes.
    pub fn udt_decl(&mut self, name: &str, fields: Vec<NodeId>, span: SourceSpan) -> NodeId {
        let name = self.identifier(name, Annotation::None, span);
        let body = self.list(fields, NodeKind::UdtDeclBody);
        self.alloc(NodeKind::UdtDecl(UdtDecl { name, body }), span)
    }

    pub fn var_assign(&mut self, target: NodeId, expr: NodeId, span: SourceSpan) -> NodeId {
        self.alloc(NodeKind::VarAssignment(Assignment { target, expr }), span)
    }

    pub fn array_assign(&mut self, target: NodeId, expr: NodeId, span: SourceSpan) -> NodeId {
        self.alloc(NodeKind::ArrayAssignment(Assignment { target, expr }), span)
    }

    pub fn udt_field_assign(&mut self, target: NodeId, expr: NodeId, span: SourceSpan) -> NodeId {
        self.alloc(
            NodeKind::UdtFieldAssignment(Assignment { target, expr }),
            span,
        )
    }

    pub fn conditional(
        &mut self,
        condition: NodeId,
        true_branch: Vec<NodeId>,
        false_branch: Option<Vec<NodeId>>,
        span: SourceSpan,
    ) -> NodeId {
        let true_branch = self.block(true_branch);
        let false_branch = false_branch.map(|stmts| self.block(stmts));
        self.alloc(
            NodeKind::Conditional(Conditional {
                condition,
                true_branch,
                false_branch,
            }),
            span,
        )
    }

    /// `SELECT expr`; `cases` are `Case` and `DefaultCase` nodes.
    pub fn select(&mut self, expr: NodeId, cases: Vec<NodeId>, span: SourceSpan) -> NodeId {
        let cases = self.list(cases, NodeKind::CaseList);
        self.alloc(NodeKind::Select(Select { expr, cases }), span)
    }

    pub fn case(&mut self, values: Vec<NodeId>, body: Vec<NodeId>, span: SourceSpan) -> NodeId {
        let values = self.expr_list(values);
        let body = self.block(body);
        self.alloc(NodeKind::Case(Case { values, body }), span)
    }

    pub fn default_case(&mut self, body: Vec<NodeId>, span: SourceSpan) -> NodeId {
        let body = self.block(body);
        self.alloc(NodeKind::DefaultCase(DefaultCase { body }), span)
    }

    /// `FOR counter TO end [STEP step] body NEXT`; `counter` is a `VarAssignment`.
    pub fn for_loop(
        &mut self,
        counter: NodeId,
        end: NodeId,
        step: Option<NodeId>,
        body: Vec<NodeId>,
        span: SourceSpan,
    ) -> NodeId {
        let body = self.block(body);
        self.alloc(
            NodeKind::ForLoop(ForLoop {
                counter,
                end,
                step,
                body,
            }),
            span,
        )
    }

    pub fn while_loop(&mut self, condition: NodeId, body: Vec<NodeId>, span: SourceSpan) -> NodeId {
        let body = self.block(body);
        self.alloc(NodeKind::WhileLoop(CondLoop { condition, body }), span)
    }

    pub fn until_loop(&mut self, condition: NodeId, body: Vec<NodeId>, span: SourceSpan) -> NodeId {
        let body = self.block(body);
        self.alloc(NodeKind::UntilLoop(CondLoop { condition, body }), span)
    }

    pub fn infinite_loop(&mut self, body: Vec<NodeId>, span: SourceSpan) -> NodeId {
        let body = self.block(body);
        self.alloc(NodeKind::InfiniteLoop(body), span)
    }

    pub fn exit(&mut self, span: SourceSpan) -> NodeId {
        self.alloc(NodeKind::Exit, span)
    }

    pub fn label(&mut self, name: &str, span: SourceSpan) -> NodeId {
        let name = self.intern(name);
        self.alloc(NodeKind::Label(name), span)
    }

    pub fn goto(&mut self, label: &str, span: SourceSpan) -> NodeId {
        let label = self.intern(label);
        self.alloc(NodeKind::UnresolvedGoto(label), span)
    }

    pub fn gosub(&mut self, label: &str, span: SourceSpan) -> NodeId {
        let label = self.intern(label);
        self.alloc(NodeKind::UnresolvedSubCall(label), span)
    }

    pub fn sub_return(&mut self, span: SourceSpan) -> NodeId {
        self.alloc(NodeKind::SubReturn, span)
    }
}
