//! Read-only lookups over the tree shared by the passes.

use odb_ir::{Ast, Identifier, NodeId, NodeKind};

use crate::SymbolName;

pub(crate) fn identifier(ast: &Ast, id: NodeId) -> Option<Identifier> {
    match ast.kind(id) {
        NodeKind::Identifier(ident) => Some(*ident),
        _ => None,
    }
}

/// Name of a declaration's `Identifier` child, or of the `Variable` that
/// replaced it.
pub(crate) fn declared_name(ast: &Ast, id: NodeId) -> Option<SymbolName> {
    match ast.kind(id) {
        NodeKind::Identifier(ident) => Some(SymbolName::new(ident.name, ident.annotation)),
        NodeKind::Variable(variable) => {
            let variable = ast.symbols.variable(*variable);
            Some(SymbolName::new(variable.name, variable.annotation))
        }
        _ => None,
    }
}

/// Whether `id` is the field selector of a `UdtField` parent, which names a
/// member of the UDT rather than a variable.
pub(crate) fn is_field_selector(ast: &Ast, parent: Option<NodeId>, id: NodeId) -> bool {
    parent.is_some_and(|parent| matches!(ast.kind(parent), NodeKind::UdtField(f) if f.field == id))
}

/// Elements of an optional list child such as call arguments.
pub(crate) fn list_items(ast: &Ast, list: Option<NodeId>) -> Vec<NodeId> {
    list.map(|list| ast.children(list).to_vec()).unwrap_or_default()
}
