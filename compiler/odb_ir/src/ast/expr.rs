//! Expression payloads.
//!
//! Fields of type [`NodeId`] (and `Option<NodeId>`) are owned children.
//! `VariableId`, `function`, and `command` fields are non-owning handles
//! attached by resolution.

use std::sync::Arc;

use odb_commands::Command;

use super::{BinaryOpKind, UnaryOpKind};
use crate::{Name, NodeId, Type, VariableId};

/// Read of a scalar variable.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct VarRef {
    /// `Identifier` node.
    pub identifier: NodeId,
    pub variable: Option<VariableId>,
}

/// Read of an array element, `arr(i, j)`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ArrayRef {
    /// `Identifier` node.
    pub identifier: NodeId,
    /// `ArgList` of indices.
    pub dims: Option<NodeId>,
    pub variable: Option<VariableId>,
}

/// `base.field`, where `field` is a `VarRef` or `ArrayRef` naming a field of
/// the UDT that `base` evaluates to.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct UdtField {
    pub udt_expr: NodeId,
    pub field: NodeId,
    /// Element type of the selected field once resolved.
    pub resolved_ty: Option<Type>,
}

/// `name(args)` before it is known whether `name` is a function or an array.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FuncCallOrArrayRef {
    pub identifier: NodeId,
    pub args: Option<NodeId>,
}

/// Call of a user function, in expression or statement position.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FuncCall {
    pub identifier: NodeId,
    pub args: Option<NodeId>,
    /// The `FuncDecl` this call resolved to.
    pub function: Option<NodeId>,
}

/// Call of a library command, in expression or statement position.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CommandCall {
    /// Command name as written, possibly several words and a sigil.
    pub name: Name,
    pub args: Option<NodeId>,
    /// The overload selected by resolution.
    pub command: Option<Arc<Command>>,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct BinaryOp {
    pub op: BinaryOpKind,
    pub lhs: NodeId,
    pub rhs: NodeId,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct UnaryOp {
    pub op: UnaryOpKind,
    pub expr: NodeId,
}

/// Conversion inserted by resolution.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ImplicitCast {
    pub expr: NodeId,
    pub target: Type,
}
