//! Sweep 2: references, implicit declarations, and call-or-array rewrites.

use odb_ir::{
    visit_mut, ArrayRef, ArrayUndim, Ast, FuncCall, FuncCallOrArrayRef, NodeId, NodeKind, Order,
    Type, VarRef, Variable, VariableId, VariableKey, VisitCx, VisitorMut,
};

use super::gather::ProgramInfo;
use crate::query;
use crate::report::Reporter;
use crate::{SemaError, SemaErrorKind, SymbolName};

pub(super) fn resolve_variables(
    ast: &mut Ast,
    program: NodeId,
    info: &ProgramInfo,
    reporter: &mut Reporter<'_>,
) {
    let mut resolver = Resolver { info, reporter };
    visit_mut(ast, program, &mut resolver, Order::PostOrder);
}

struct Resolver<'a, 'q> {
    info: &'a ProgramInfo,
    reporter: &'a mut Reporter<'q>,
}

impl Resolver<'_, '_> {
    /// Resolve a scalar, declaring it on first use.
    fn scalar(&mut self, ast: &mut Ast, node: NodeId, identifier: NodeId) -> Option<VariableId> {
        let ident = query::identifier(ast, identifier)?;
        let key = VariableKey {
            name: ident.name,
            annotation: ident.annotation,
            is_array: false,
        };
        if let Some(variable) = self.info.lookup(ast, node, key) {
            return Some(variable);
        }

        let scope = self.info.implicit_scope(ast, node, ident.scope);
        let ty = Type::from_annotation(ident.annotation);
        tracing::debug!(
            name = ast.name(ident.name),
            ?scope,
            ty = %ty.display(&ast.interner),
            "implicitly declared"
        );
        let span = ast.span(node);
        Some(ast.symbols.declare(
            scope,
            Variable {
                name: ident.name,
                annotation: ident.annotation,
                ty,
                span,
            },
        ))
    }

    /// Resolve an array, which must have been declared with `DIM`.
    fn array(&mut self, ast: &Ast, node: NodeId, identifier: NodeId) -> Option<VariableId> {
        let ident = query::identifier(ast, identifier)?;
        let key = VariableKey {
            name: ident.name,
            annotation: ident.annotation,
            is_array: true,
        };
        let found = self.info.lookup(ast, node, key);
        if found.is_none() {
            let error = SemaError::new(
                ast.span(node),
                SemaErrorKind::UndeclaredArray {
                    name: SymbolName::new(ident.name, ident.annotation),
                },
            );
            self.reporter.error(&ast.interner, error);
        }
        found
    }

    fn attach_array(&mut self, ast: &mut Ast, id: NodeId, identifier: NodeId) {
        let Some(variable) = self.array(ast, id, identifier) else {
            return;
        };
        match ast.kind_mut(id) {
            NodeKind::ArrayRef(n) => n.variable = Some(variable),
            NodeKind::ArrayUndim(n) => n.variable = Some(variable),
            _ => {}
        }
    }
}

impl VisitorMut for Resolver<'_, '_> {
    fn visit_var_ref(&mut self, cx: &mut VisitCx<'_>, id: NodeId, node: &VarRef) {
        if node.variable.is_some() || query::is_field_selector(cx.ast(), cx.parent(), id) {
            return;
        }
        let ast = cx.ast_mut();
        let Some(variable) = self.scalar(ast, id, node.identifier) else {
            return;
        };
        if let NodeKind::VarRef(n) = ast.kind_mut(id) {
            n.variable = Some(variable);
        }
    }

    fn visit_array_ref(&mut self, cx: &mut VisitCx<'_>, id: NodeId, node: &ArrayRef) {
        if node.variable.is_some() || query::is_field_selector(cx.ast(), cx.parent(), id) {
            return;
        }
        self.attach_array(cx.ast_mut(), id, node.identifier);
    }

    fn visit_array_undim(&mut self, cx: &mut VisitCx<'_>, id: NodeId, node: &ArrayUndim) {
        if node.variable.is_none() {
            self.attach_array(cx.ast_mut(), id, node.identifier);
        }
    }

    fn visit_func_call_expr_or_array_ref(
        &mut self,
        cx: &mut VisitCx<'_>,
        id: NodeId,
        node: &FuncCallOrArrayRef,
    ) {
        let is_selector = query::is_field_selector(cx.ast(), cx.parent(), id);
        let Some(ident) = query::identifier(cx.ast(), node.identifier) else {
            return;
        };
        let span = cx.ast().span(id);

        if !is_selector && self.info.function(ident.name).is_some() {
            let call = cx.ast_mut().alloc(
                NodeKind::FuncCallExpr(FuncCall {
                    identifier: node.identifier,
                    args: node.args,
                    function: None,
                }),
                span,
            );
            tracing::trace!(?id, ?call, "call-or-array is a function call");
            cx.replace_current(call);
            return;
        }

        let array = cx.ast_mut().alloc(
            NodeKind::ArrayRef(ArrayRef {
                identifier: node.identifier,
                dims: node.args,
                variable: None,
            }),
            span,
        );
        tracing::trace!(?id, ?array, "call-or-array is an array reference");
        cx.replace_current(array);
        if !is_selector {
            self.attach_array(cx.ast_mut(), array, node.identifier);
        }
    }
}
