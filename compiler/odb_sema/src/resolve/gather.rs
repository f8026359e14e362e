//! Pass A: scopes, functions, and UDTs.
//!
//! Every node is mapped to the scope of the nearest enclosing `FuncDecl`, or
//! to the main scope. Scopes are created in pre-order so their ids follow
//! source order.

use rustc_hash::FxHashMap;

use odb_ir::{
    visit, Ast, FuncDecl, Name, NodeId, Order, ScopeId, ScopeKind, ScopeMarker, UdtDecl,
    VariableId, VariableKey, Visitor,
};

use crate::query;

/// What resolution needs to know about the whole program up front.
pub(super) struct ProgramInfo {
    global: ScopeId,
    main: ScopeId,
    scope_of: FxHashMap<NodeId, ScopeId>,
    functions: FxHashMap<Name, NodeId>,
    udts: FxHashMap<Name, NodeId>,
}

#[derive(Default)]
struct Gatherer {
    /// `Program` first, then every `FuncDecl` in pre-order.
    owners: Vec<NodeId>,
    owner_of: FxHashMap<NodeId, NodeId>,
    functions: FxHashMap<Name, NodeId>,
    udts: FxHashMap<Name, NodeId>,
}

impl Gatherer {
    fn own(&mut self, id: NodeId) {
        self.owners.push(id);
        self.owner_of.insert(id, id);
    }

    fn inherit(&mut self, ast: &Ast, id: NodeId) {
        let owner = ast
            .parent(id)
            .and_then(|parent| self.owner_of.get(&parent).copied());
        if let Some(owner) = owner {
            self.owner_of.insert(id, owner);
        }
    }
}

impl Visitor for Gatherer {
    fn visit_node(&mut self, ast: &Ast, id: NodeId) {
        self.inherit(ast, id);
    }

    fn visit_program(&mut self, _ast: &Ast, id: NodeId, _body: NodeId) {
        self.own(id);
    }

    fn visit_func_decl(&mut self, ast: &Ast, id: NodeId, node: &FuncDecl) {
        self.own(id);
        if let Some(ident) = query::identifier(ast, node.identifier) {
            if let Some(previous) = self.functions.insert(ident.name, id) {
                tracing::debug!(
                    name = ast.name(ident.name),
                    ?previous,
                    "function redefined; later definition wins"
                );
            }
        }
    }

    fn visit_udt_decl(&mut self, ast: &Ast, id: NodeId, node: &UdtDecl) {
        self.inherit(ast, id);
        if let Some(ident) = query::identifier(ast, node.name) {
            self.udts.insert(ident.name, id);
        }
    }
}

impl ProgramInfo {
    pub(super) fn gather(ast: &mut Ast, program: NodeId) -> Self {
        let mut gatherer = Gatherer::default();
        visit(ast, program, &mut gatherer, Order::PreOrder);

        let global = ast.symbols.scope_for(program, ScopeKind::Global);
        let main = ast.symbols.scope_for(program, ScopeKind::Main);
        let mut owner_scopes = FxHashMap::default();
        for &owner in &gatherer.owners {
            let scope = if owner == program {
                main
            } else {
                ast.symbols.scope_for(owner, ScopeKind::Function)
            };
            owner_scopes.insert(owner, scope);
        }
        let scope_of = gatherer
            .owner_of
            .iter()
            .filter_map(|(&node, owner)| owner_scopes.get(owner).map(|&scope| (node, scope)))
            .collect();

        tracing::debug!(
            functions = gatherer.functions.len(),
            udts = gatherer.udts.len(),
            scopes = ast.symbols.scope_count(),
            "gathered program info"
        );
        ProgramInfo {
            global,
            main,
            scope_of,
            functions: gatherer.functions,
            udts: gatherer.udts,
        }
    }

    /// Scope of the function (or main body) containing `node`.
    ///
    /// Nodes created after gathering take the scope of their nearest
    /// gathered ancestor.
    pub(super) fn local_scope(&self, ast: &Ast, node: NodeId) -> ScopeId {
        let mut current = Some(node);
        while let Some(id) = current {
            if let Some(&scope) = self.scope_of.get(&id) {
                return scope;
            }
            current = ast.parent(id);
        }
        self.main
    }

    /// Scope an explicit declaration binds into. Without a marker, arrays
    /// are global and everything else is local.
    pub(super) fn declaration_scope(
        &self,
        ast: &Ast,
        node: NodeId,
        marker: Option<ScopeMarker>,
        is_array: bool,
    ) -> ScopeId {
        match marker {
            Some(ScopeMarker::Global) => self.global,
            Some(ScopeMarker::Local) => self.local_scope(ast, node),
            None if is_array => self.global,
            None => self.local_scope(ast, node),
        }
    }

    /// Scope an implicitly declared variable lands in.
    pub(super) fn implicit_scope(
        &self,
        ast: &Ast,
        node: NodeId,
        marker: Option<ScopeMarker>,
    ) -> ScopeId {
        match marker {
            Some(ScopeMarker::Global) => self.global,
            _ => self.local_scope(ast, node),
        }
    }

    /// Look `key` up in the local scope of `node`, then in the global scope.
    pub(super) fn lookup(&self, ast: &Ast, node: NodeId, key: VariableKey) -> Option<VariableId> {
        ast.symbols
            .lookup(self.local_scope(ast, node), key)
            .or_else(|| ast.symbols.lookup(self.global, key))
    }

    pub(super) fn function(&self, name: Name) -> Option<NodeId> {
        self.functions.get(&name).copied()
    }

    pub(super) fn udt(&self, name: Name) -> Option<NodeId> {
        self.udts.get(&name).copied()
    }
}
