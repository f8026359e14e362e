//! Sweep 1: explicit declarations.
//!
//! Runs in pre-order over the whole program so every `DIM` is bound before
//! the reference sweep looks anything up, regardless of where the use sits.

use odb_ir::{
    visit_mut, ArrayDecl, Ast, NodeId, NodeKind, Order, Type, VarDecl, Variable, VariableId,
    VariableKey, VisitCx, VisitorMut,
};

use super::gather::ProgramInfo;
use crate::query;
use crate::report::Reporter;
use crate::{SemaError, SemaErrorKind, SymbolName};

pub(super) fn declare_variables(
    ast: &mut Ast,
    program: NodeId,
    info: &ProgramInfo,
    reporter: &mut Reporter<'_>,
) {
    let mut declarer = Declarer { info, reporter };
    visit_mut(ast, program, &mut declarer, Order::PreOrder);
}

struct Declarer<'a, 'q> {
    info: &'a ProgramInfo,
    reporter: &'a mut Reporter<'q>,
}

impl Declarer<'_, '_> {
    /// Bind `identifier` to a fresh variable of type `ty`, or report the
    /// clash with an existing one.
    fn declare(
        &mut self,
        ast: &mut Ast,
        decl: NodeId,
        identifier: NodeId,
        ty: Type,
    ) -> Option<VariableId> {
        let ident = query::identifier(ast, identifier)?;
        let is_array = matches!(ty, Type::Array(_));
        let scope = self
            .info
            .declaration_scope(ast, decl, ident.scope, is_array);
        let key = VariableKey {
            name: ident.name,
            annotation: ident.annotation,
            is_array,
        };
        let span = ast.span(decl);

        if let Some(existing) = ast.symbols.lookup(scope, key) {
            let previous = ast.symbols.variable(existing);
            let error = SemaError::new(
                span,
                SemaErrorKind::AlreadyDeclared {
                    name: SymbolName::new(ident.name, ident.annotation),
                    is_array,
                    previous_ty: previous.ty.clone(),
                    previous: previous.span,
                },
            );
            self.reporter.error(&ast.interner, error);
            return None;
        }

        tracing::trace!(
            name = ast.name(ident.name),
            ?scope,
            ty = %ty.display(&ast.interner),
            "declared"
        );
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
}

/// UDT fields are members, not variables.
fn is_udt_field_decl(ast: &Ast, parent: Option<NodeId>) -> bool {
    parent.is_some_and(|parent| matches!(ast.kind(parent), NodeKind::UdtDeclBody(_)))
}

impl VisitorMut for Declarer<'_, '_> {
    fn visit_var_decl(&mut self, cx: &mut VisitCx<'_>, id: NodeId, node: &VarDecl) {
        if is_udt_field_decl(cx.ast(), cx.parent()) {
            return;
        }
        let ast = cx.ast_mut();
        let Some(variable) = self.declare(ast, id, node.identifier, node.ty.clone()) else {
            return;
        };
        let span = ast.span(node.identifier);
        let var_node = ast.alloc(NodeKind::Variable(variable), span);
        ast.swap_child(id, node.identifier, var_node);
    }

    fn visit_array_decl(&mut self, cx: &mut VisitCx<'_>, id: NodeId, node: &ArrayDecl) {
        if is_udt_field_decl(cx.ast(), cx.parent()) {
            return;
        }
        let ast = cx.ast_mut();
        let Some(variable) = self.declare(ast, id, node.identifier, node.array_type()) else {
            return;
        };
        if let NodeKind::ArrayDecl(decl) = ast.kind_mut(id) {
            decl.variable = Some(variable);
        }
    }
}
