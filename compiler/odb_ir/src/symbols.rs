//! Variables and the scopes that own them.
//!
//! Reference nodes hold [`VariableId`] handles; the [`Variable`] itself lives
//! in the [`SymbolTable`] for the lifetime of the tree. A scope is keyed on
//! `(name, annotation, is_array)`, so `a`, `a$`, and the array `a()` are
//! three distinct variables.

use rustc_hash::FxHashMap;

use crate::{Annotation, Name, NodeId, ScopeId, SourceSpan, Type, VariableId};

/// A resolved storage location.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Variable {
    pub name: Name,
    pub annotation: Annotation,
    pub ty: Type,
    /// Where the variable was declared, explicitly or by first use.
    pub span: SourceSpan,
}

impl Variable {
    pub fn is_array(&self) -> bool {
        matches!(self.ty, Type::Array(_))
    }
}

/// Lookup key within one scope.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct VariableKey {
    pub name: Name,
    pub annotation: Annotation,
    pub is_array: bool,
}

/// Which part of the program a scope belongs to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ScopeKind {
    Global,
    Main,
    Function,
}

/// An ordered collection of variables.
#[derive(Clone, Debug)]
pub struct Scope {
    kind: ScopeKind,
    /// The `Program` or `FuncDecl` node this scope belongs to.
    owner: NodeId,
    order: Vec<VariableId>,
    by_key: FxHashMap<VariableKey, VariableId>,
}

impl Scope {
    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    pub fn owner(&self) -> NodeId {
        self.owner
    }

    pub fn lookup(&self, key: VariableKey) -> Option<VariableId> {
        self.by_key.get(&key).copied()
    }

    /// Variables in declaration order.
    pub fn variables(&self) -> &[VariableId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Owner of all variables and scopes of one tree.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    variables: Vec<Variable>,
    scopes: Vec<Scope>,
    by_owner: FxHashMap<(NodeId, ScopeKind), ScopeId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The scope of `kind` owned by `owner`, created on first request.
    pub fn scope_for(&mut self, owner: NodeId, kind: ScopeKind) -> ScopeId {
        if let Some(&id) = self.by_owner.get(&(owner, kind)) {
            return id;
        }
        let id = ScopeId::next(&self.scopes);
        self.scopes.push(Scope {
            kind,
            owner,
            order: Vec::new(),
            by_key: FxHashMap::default(),
        });
        self.by_owner.insert((owner, kind), id);
        id
    }

    /// Existing scope lookup without creating one.
    pub fn find_scope(&self, owner: NodeId, kind: ScopeKind) -> Option<ScopeId> {
        self.by_owner.get(&(owner, kind)).copied()
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn variable(&self, id: VariableId) -> &Variable {
        &self.variables[id.index()]
    }

    pub fn lookup(&self, scope: ScopeId, key: VariableKey) -> Option<VariableId> {
        self.scope(scope).lookup(key)
    }

    /// Add `variable` to `scope`.
    ///
    /// # Panics
    /// Panics if the key is already present; callers check with
    /// [`SymbolTable::lookup`] first.
    pub fn declare(&mut self, scope: ScopeId, variable: Variable) -> VariableId {
        let key = VariableKey {
            name: variable.name,
            annotation: variable.annotation,
            is_array: variable.is_array(),
        };
        let id = VariableId::next(&self.variables);
        let scope = &mut self.scopes[scope.index()];
        let previous = scope.by_key.insert(key, id);
        assert!(previous.is_none(), "variable {key:?} declared twice in one scope");
        scope.order.push(id);
        self.variables.push(variable);
        id
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }
}
