//! Declaration and statement payloads.

use crate::{NodeId, Type, VariableId};

/// `DIM x AS <ty> = init`, a function parameter, or a UDT field.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct VarDecl {
    /// `Identifier` node; replaced by a `Variable` node once declared.
    pub identifier: NodeId,
    pub ty: Type,
    /// `InitializerList` node.
    pub initializer: Option<NodeId>,
}

/// `DIM arr(dims) AS <element_ty>`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ArrayDecl {
    pub identifier: NodeId,
    pub element_ty: Type,
    /// `ArgList` of dimension sizes.
    pub dims: Option<NodeId>,
    pub variable: Option<VariableId>,
}

impl ArrayDecl {
    pub fn array_type(&self) -> Type {
        Type::array_of(self.element_ty.clone())
    }
}

/// `UNDIM arr(dims)`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ArrayUndim {
    pub identifier: NodeId,
    pub dims: NodeId,
    pub variable: Option<VariableId>,
}

/// `FUNCTION name(args) ... ENDFUNCTION [return_value]`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FuncDecl {
    pub identifier: NodeId,
    /// `FuncArgList` of parameter `VarDecl`s.
    pub args: Option<NodeId>,
    pub body: NodeId,
    pub return_value: Option<NodeId>,
}

/// `EXITFUNCTION [value]`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FuncExit {
    pub return_value: Option<NodeId>,
}

/// `TYPE name ... ENDTYPE`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct UdtDecl {
    /// `Identifier` node naming the type.
    pub name: NodeId,
    /// `UdtDeclBody` of field declarations.
    pub body: NodeId,
}

/// Shared shape of the three assignment kinds.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Assignment {
    /// `VarRef`, `ArrayRef`, or `UdtField`.
    pub target: NodeId,
    pub expr: NodeId,
}

/// `IF cond ... ELSE ... ENDIF`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Conditional {
    pub condition: NodeId,
    pub true_branch: NodeId,
    pub false_branch: Option<NodeId>,
}

/// `SELECT expr ... ENDSELECT`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Select {
    pub expr: NodeId,
    /// `CaseList` holding `Case` and `DefaultCase` nodes.
    pub cases: NodeId,
}

/// `CASE v1, v2 ... ENDCASE`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Case {
    /// `ExprList` of case values.
    pub values: NodeId,
    pub body: NodeId,
}

/// `CASE DEFAULT ... ENDCASE`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct DefaultCase {
    pub body: NodeId,
}

/// `FOR counter = start TO end [STEP step] ... NEXT`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ForLoop {
    /// `VarAssignment` of the start value.
    pub counter: NodeId,
    pub end: NodeId,
    pub step: Option<NodeId>,
    pub body: NodeId,
}

/// `WHILE cond ... ENDWHILE` or `REPEAT ... UNTIL cond`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CondLoop {
    pub condition: NodeId,
    pub body: NodeId,
}
