//! Arena-allocated syntax tree.
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeId`]. Each
//! node owns the children named by [`NodeKind::children`] and records its
//! parent as a plain index, so there are no ownership cycles and replacing a
//! child is an O(1) slot rewrite.
//!
//! # Module Structure
//!
//! - `kind`: the [`NodeKind`] enum and its children shapes
//! - `expr` / `stmt`: payload structs
//! - `literal`, `operators`: leaf value types
//! - `build`: constructor helpers used by the parser and tests
//! - `compare`: structural equality and dumps

mod build;
mod compare;
mod expr;
mod kind;
mod literal;
mod operators;
mod stmt;

pub use expr::{
    ArrayRef, BinaryOp, CommandCall, FuncCall, FuncCallOrArrayRef, ImplicitCast, UdtField,
    UnaryOp, VarRef,
};
pub use kind::{Children, NodeKind};
pub use literal::LiteralValue;
pub use operators::{BinaryOpKind, UnaryOpKind};
pub use stmt::{
    ArrayDecl, ArrayUndim, Assignment, Case, CondLoop, Conditional, DefaultCase, ForLoop,
    FuncDecl, FuncExit, Select, UdtDecl, VarDecl,
};

use crate::{Name, NodeId, SourceSpan, StringInterner, SymbolTable};

/// One arena slot.
#[derive(Clone, Debug)]
pub struct Node {
    kind: NodeKind,
    span: SourceSpan,
    parent: Option<NodeId>,
}

impl Node {
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn span(&self) -> SourceSpan {
        self.span
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// A program's syntax tree plus the tables that outlive any single pass.
#[derive(Clone, Debug, Default)]
pub struct Ast {
    nodes: Vec<Node>,
    pub interner: StringInterner,
    pub symbols: SymbolTable,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, taking ownership of the children its kind names.
    ///
    /// Children are re-parented to the new node, which is how a cast wraps
    /// an expression that is still attached elsewhere: the subsequent
    /// [`Ast::swap_child`] on the old parent sees the child already moved.
    pub fn alloc(&mut self, kind: NodeKind, span: SourceSpan) -> NodeId {
        let id = NodeId::next(&self.nodes);
        for &child in kind.children().iter() {
            self.nodes[child.index()].parent = Some(id);
        }
        self.nodes.push(Node {
            kind,
            span,
            parent: None,
        });
        id
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    /// Mutable payload access for attaching resolution results.
    ///
    /// Rewriting an owned child id through this bypasses parent links; use
    /// [`Ast::swap_child`] for that.
    #[inline]
    pub fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id.index()].kind
    }

    #[inline]
    pub fn span(&self, id: NodeId) -> SourceSpan {
        self.nodes[id.index()].span
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    pub fn children(&self, id: NodeId) -> Children<'_> {
        self.nodes[id.index()].kind.children()
    }

    /// Total number of allocated nodes, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn intern(&mut self, s: &str) -> Name {
        self.interner.intern(s)
    }

    pub fn name(&self, name: Name) -> &str {
        self.interner.lookup(name)
    }

    /// Replace the owned child `old` of `parent` with `new`.
    ///
    /// `old` is detached (unless something else already adopted it) and
    /// `new` is attached to `parent`.
    ///
    /// # Panics
    /// Panics if `old` is not a direct child of `parent`.
    pub fn swap_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        let slot = self.nodes[parent.index()]
            .kind
            .child_slots_mut()
            .into_iter()
            .find(|slot| **slot == old);
        let Some(slot) = slot else {
            panic!("swap_child: {old:?} is not a child of {parent:?}");
        };
        if old == new {
            return;
        }
        *slot = new;

        let old_node = &mut self.nodes[old.index()];
        if old_node.parent == Some(parent) {
            old_node.parent = None;
        }
        self.nodes[new.index()].parent = Some(parent);
    }

    /// Deep-copy the subtree rooted at `id`.
    ///
    /// Spans are preserved and the copy has no parent. Non-owning handles
    /// (variables, resolved functions, jump targets, commands) are shared
    /// with the original.
    pub fn duplicate(&mut self, id: NodeId) -> NodeId {
        odb_stack::ensure_sufficient_stack(|| {
            let node = &self.nodes[id.index()];
            let span = node.span;
            let mut kind = node.kind.clone();
            for slot in kind.child_slots_mut() {
                *slot = self.duplicate(*slot);
            }
            self.alloc(kind, span)
        })
    }

    /// Move all statements of `other` to the end of `block`.
    ///
    /// # Panics
    /// Panics if either node is not a `Block`.
    pub fn merge_blocks(&mut self, block: NodeId, other: NodeId) {
        let moved = match &mut self.nodes[other.index()].kind {
            NodeKind::Block(stmts) => std::mem::take(stmts),
            kind => panic!("merge_blocks: {other:?} is a {}, not a Block", kind.name()),
        };
        for &stmt in &moved {
            self.nodes[stmt.index()].parent = Some(block);
        }
        match &mut self.nodes[block.index()].kind {
            NodeKind::Block(stmts) => stmts.extend(moved),
            kind => panic!("merge_blocks: {block:?} is a {}, not a Block", kind.name()),
        }
    }

    /// Detach every statement of `block`.
    ///
    /// # Panics
    /// Panics if `block` is not a `Block`.
    pub fn clear_block(&mut self, block: NodeId) {
        let removed = match &mut self.nodes[block.index()].kind {
            NodeKind::Block(stmts) => std::mem::take(stmts),
            kind => panic!("clear_block: {block:?} is a {}, not a Block", kind.name()),
        };
        for stmt in removed {
            self.nodes[stmt.index()].parent = None;
        }
    }

    /// Fill the missing `STEP` of a `ForLoop` with `step`.
    ///
    /// # Panics
    /// Panics if `for_loop` is not a `ForLoop` or already has a step.
    pub fn set_loop_step(&mut self, for_loop: NodeId, step: NodeId) {
        match &mut self.nodes[for_loop.index()].kind {
            NodeKind::ForLoop(n) if n.step.is_none() => n.step = Some(step),
            NodeKind::ForLoop(_) => panic!("set_loop_step: {for_loop:?} already has a step"),
            kind => panic!("set_loop_step: {for_loop:?} is a {}, not a ForLoop", kind.name()),
        }
        self.nodes[step.index()].parent = Some(for_loop);
    }
}
