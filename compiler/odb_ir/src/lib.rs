//! ODB IR - syntax tree and semantic data model
//!
//! This crate contains the core data structures of the ODB front-end:
//! - Line/column source spans
//! - Interned names
//! - Builtin types and the resolved [`Type`]
//! - Identifiers, variables, and scopes
//! - The arena-allocated syntax tree ([`Ast`], [`NodeKind`])
//! - Mutation-tolerant traversal cursors and visitor dispatch
//!
//! # Design
//!
//! - **Arena + index**: nodes are addressed by [`NodeId`]; parents are
//!   indices, never owners, so replacing a child is a slot rewrite.
//! - **One closed enum**: every node kind is a [`NodeKind`] variant and every
//!   per-kind operation is an exhaustive `match`.
//! - **Explicit context**: the tree owns its interner and symbol table;
//!   nothing is global.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod builtin_type;
mod ident;
mod ids;
mod interner;
mod span;
mod symbols;
pub mod traverse;
mod ty;
pub mod visitor;

pub use ast::{
    ArrayDecl, ArrayRef, ArrayUndim, Assignment, Ast, BinaryOp, BinaryOpKind, Case, Children,
    CommandCall, CondLoop, Conditional, DefaultCase, ForLoop, FuncCall, FuncCallOrArrayRef,
    FuncDecl, FuncExit, ImplicitCast, LiteralValue, Node, NodeKind, Select, UdtDecl, UdtField,
    UnaryOp, UnaryOpKind, VarDecl, VarRef,
};
pub use builtin_type::{Archetype, BuiltinType};
pub use ident::{Annotation, Identifier, ScopeMarker};
pub use ids::{NodeId, ScopeId, VariableId};
pub use interner::{Name, StringInterner};
pub use span::SourceSpan;
pub use symbols::{Scope, ScopeKind, SymbolTable, Variable, VariableKey};
pub use traverse::{Order, PostOrder, PreOrder};
pub use ty::{ConversionLoss, Type, TypeDisplay};
pub use visitor::{visit, visit_mut, VisitCx, Visitor, VisitorMut};
