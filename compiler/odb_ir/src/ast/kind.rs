//! The closed set of node kinds and their owned-children shapes.

use smallvec::SmallVec;

use super::{
    ArrayDecl, ArrayRef, ArrayUndim, Assignment, BinaryOp, Case, CommandCall, CondLoop,
    Conditional, DefaultCase, ForLoop, FuncCall, FuncCallOrArrayRef, FuncDecl, FuncExit,
    ImplicitCast, LiteralValue, Select, UdtDecl, UdtField, UnaryOp, VarDecl, VarRef,
};
use crate::{Identifier, Name, NodeId, VariableId};

/// Every node kind of the tree.
///
/// `children` and `child_slots_mut` are the single source of truth for which
/// fields are owned; both list them in declaration order.
#[derive(Clone, PartialEq, Debug)]
pub enum NodeKind {
    // Containers
    /// Root. Owns the main `Block`; functions and UDTs are statements in it.
    Program(NodeId),
    Block(Vec<NodeId>),
    ArgList(Vec<NodeId>),
    ExprList(Vec<NodeId>),
    InitializerList(Vec<NodeId>),
    FuncArgList(Vec<NodeId>),
    UdtDeclBody(Vec<NodeId>),
    CaseList(Vec<NodeId>),

    // References
    Identifier(Identifier),
    /// A declared variable, replacing the `Identifier` of a `VarDecl`.
    Variable(VariableId),
    Literal(LiteralValue),
    VarRef(VarRef),
    ArrayRef(ArrayRef),
    UdtField(UdtField),

    // Calls
    FuncCallExprOrArrayRef(FuncCallOrArrayRef),
    FuncCallExpr(FuncCall),
    FuncCallStmnt(FuncCall),
    CommandExpr(CommandCall),
    CommandStmnt(CommandCall),

    // Operators
    BinaryOp(BinaryOp),
    UnaryOp(UnaryOp),
    ImplicitCast(ImplicitCast),

    // Declarations
    VarDecl(VarDecl),
    ArrayDecl(ArrayDecl),
    ArrayUndim(ArrayUndim),
    FuncDecl(FuncDecl),
    FuncExit(FuncExit),
    UdtDecl(UdtDecl),

    // Assignments
    VarAssignment(Assignment),
    ArrayAssignment(Assignment),
    UdtFieldAssignment(Assignment),

    // Control flow
    Conditional(Conditional),
    Select(Select),
    Case(Case),
    DefaultCase(DefaultCase),
    ForLoop(ForLoop),
    WhileLoop(CondLoop),
    UntilLoop(CondLoop),
    /// `DO ... LOOP`; owns its body.
    InfiniteLoop(NodeId),
    Exit,
    Label(Name),
    UnresolvedGoto(Name),
    UnresolvedSubCall(Name),
    /// Resolved jump to a `Label` node. The label is not owned.
    Goto(NodeId),
    /// Resolved `GOSUB` to a `Label` node. The label is not owned.
    SubCall(NodeId),
    SubReturn,
}

/// View over a node's owned children.
///
/// List kinds lend their storage directly; fixed-shape kinds collect into
/// an inline buffer.
#[derive(Clone, Debug)]
pub enum Children<'a> {
    Inline(SmallVec<[NodeId; 4]>),
    Borrowed(&'a [NodeId]),
}

impl std::ops::Deref for Children<'_> {
    type Target = [NodeId];

    fn deref(&self) -> &[NodeId] {
        match self {
            Children::Inline(ids) => ids,
            Children::Borrowed(ids) => ids,
        }
    }
}

fn push_opt(out: &mut SmallVec<[NodeId; 4]>, id: Option<NodeId>) {
    if let Some(id) = id {
        out.push(id);
    }
}

fn push_opt_mut<'a>(out: &mut SmallVec<[&'a mut NodeId; 4]>, id: &'a mut Option<NodeId>) {
    if let Some(id) = id {
        out.push(id);
    }
}

impl NodeKind {
    /// Kind name used in dumps and diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            NodeKind::Program(_) => "Program",
            NodeKind::Block(_) => "Block",
            NodeKind::ArgList(_) => "ArgList",
            NodeKind::ExprList(_) => "ExprList",
            NodeKind::InitializerList(_) => "InitializerList",
            NodeKind::FuncArgList(_) => "FuncArgList",
            NodeKind::UdtDeclBody(_) => "UdtDeclBody",
            NodeKind::CaseList(_) => "CaseList",
            NodeKind::Identifier(_) => "Identifier",
            NodeKind::Variable(_) => "Variable",
            NodeKind::Literal(_) => "Literal",
            NodeKind::VarRef(_) => "VarRef",
            NodeKind::ArrayRef(_) => "ArrayRef",
            NodeKind::UdtField(_) => "UdtField",
            NodeKind::FuncCallExprOrArrayRef(_) => "FuncCallExprOrArrayRef",
            NodeKind::FuncCallExpr(_) => "FuncCallExpr",
            NodeKind::FuncCallStmnt(_) => "FuncCallStmnt",
            NodeKind::CommandExpr(_) => "CommandExpr",
            NodeKind::CommandStmnt(_) => "CommandStmnt",
            NodeKind::BinaryOp(_) => "BinaryOp",
            NodeKind::UnaryOp(_) => "UnaryOp",
            NodeKind::ImplicitCast(_) => "ImplicitCast",
            NodeKind::VarDecl(_) => "VarDecl",
            NodeKind::ArrayDecl(_) => "ArrayDecl",
            NodeKind::ArrayUndim(_) => "ArrayUndim",
            NodeKind::FuncDecl(_) => "FuncDecl",
            NodeKind::FuncExit(_) => "FuncExit",
            NodeKind::UdtDecl(_) => "UdtDecl",
            NodeKind::VarAssignment(_) => "VarAssignment",
            NodeKind::ArrayAssignment(_) => "ArrayAssignment",
            NodeKind::UdtFieldAssignment(_) => "UdtFieldAssignment",
            NodeKind::Conditional(_) => "Conditional",
            NodeKind::Select(_) => "Select",
            NodeKind::Case(_) => "Case",
            NodeKind::DefaultCase(_) => "DefaultCase",
            NodeKind::ForLoop(_) => "ForLoop",
            NodeKind::WhileLoop(_) => "WhileLoop",
            NodeKind::UntilLoop(_) => "UntilLoop",
            NodeKind::InfiniteLoop(_) => "InfiniteLoop",
            NodeKind::Exit => "Exit",
            NodeKind::Label(_) => "Label",
            NodeKind::UnresolvedGoto(_) => "UnresolvedGoto",
            NodeKind::UnresolvedSubCall(_) => "UnresolvedSubCall",
            NodeKind::Goto(_) => "Goto",
            NodeKind::SubCall(_) => "SubCall",
            NodeKind::SubReturn => "SubReturn",
        }
    }

    /// Owned children in declaration order.
    pub fn children(&self) -> Children<'_> {
        let mut out: SmallVec<[NodeId; 4]> = SmallVec::new();
        match self {
            NodeKind::Block(ids)
            | NodeKind::ArgList(ids)
            | NodeKind::ExprList(ids)
            | NodeKind::InitializerList(ids)
            | NodeKind::FuncArgList(ids)
            | NodeKind::UdtDeclBody(ids)
            | NodeKind::CaseList(ids) => return Children::Borrowed(ids),

            NodeKind::Identifier(_)
            | NodeKind::Variable(_)
            | NodeKind::Literal(_)
            | NodeKind::Exit
            | NodeKind::Label(_)
            | NodeKind::UnresolvedGoto(_)
            | NodeKind::UnresolvedSubCall(_)
            | NodeKind::Goto(_)
            | NodeKind::SubCall(_)
            | NodeKind::SubReturn => {}

            NodeKind::Program(body) | NodeKind::InfiniteLoop(body) => out.push(*body),
            NodeKind::VarRef(n) => out.push(n.identifier),
            NodeKind::ArrayRef(n) => {
                out.push(n.identifier);
                push_opt(&mut out, n.dims);
            }
            NodeKind::UdtField(n) => out.extend([n.udt_expr, n.field]),
            NodeKind::FuncCallExprOrArrayRef(n) => {
                out.push(n.identifier);
                push_opt(&mut out, n.args);
            }
            NodeKind::FuncCallExpr(n) | NodeKind::FuncCallStmnt(n) => {
                out.push(n.identifier);
                push_opt(&mut out, n.args);
            }
            NodeKind::CommandExpr(n) | NodeKind::CommandStmnt(n) => push_opt(&mut out, n.args),
            NodeKind::BinaryOp(n) => out.extend([n.lhs, n.rhs]),
            NodeKind::UnaryOp(n) => out.push(n.expr),
            NodeKind::ImplicitCast(n) => out.push(n.expr),
            NodeKind::VarDecl(n) => {
                out.push(n.identifier);
                push_opt(&mut out, n.initializer);
            }
            NodeKind::ArrayDecl(n) => {
                out.push(n.identifier);
                push_opt(&mut out, n.dims);
            }
            NodeKind::ArrayUndim(n) => out.extend([n.identifier, n.dims]),
            NodeKind::FuncDecl(n) => {
                out.push(n.identifier);
                push_opt(&mut out, n.args);
                out.push(n.body);
                push_opt(&mut out, n.return_value);
            }
            NodeKind::FuncExit(n) => push_opt(&mut out, n.return_value),
            NodeKind::UdtDecl(n) => out.extend([n.name, n.body]),
            NodeKind::VarAssignment(n)
            | NodeKind::ArrayAssignment(n)
            | NodeKind::UdtFieldAssignment(n) => out.extend([n.target, n.expr]),
            NodeKind::Conditional(n) => {
                out.extend([n.condition, n.true_branch]);
                push_opt(&mut out, n.false_branch);
            }
            NodeKind::Select(n) => out.extend([n.expr, n.cases]),
            NodeKind::Case(n) => out.extend([n.values, n.body]),
            NodeKind::DefaultCase(n) => out.push(n.body),
            NodeKind::ForLoop(n) => {
                out.extend([n.counter, n.end]);
                push_opt(&mut out, n.step);
                out.push(n.body);
            }
            NodeKind::WhileLoop(n) | NodeKind::UntilLoop(n) => out.extend([n.condition, n.body]),
        }
        Children::Inline(out)
    }

    /// Mutable access to every owned child slot, in the order of
    /// [`NodeKind::children`].
    pub(crate) fn child_slots_mut(&mut self) -> SmallVec<[&mut NodeId; 4]> {
        let mut out = SmallVec::new();
        match self {
            NodeKind::Block(ids)
            | NodeKind::ArgList(ids)
            | NodeKind::ExprList(ids)
            | NodeKind::InitializerList(ids)
            | NodeKind::FuncArgList(ids)
            | NodeKind::UdtDeclBody(ids)
            | NodeKind::CaseList(ids) => out.extend(ids.iter_mut()),

            NodeKind::Identifier(_)
            | NodeKind::Variable(_)
            | NodeKind::Literal(_)
            | NodeKind::Exit
            | NodeKind::Label(_)
            | NodeKind::UnresolvedGoto(_)
            | NodeKind::UnresolvedSubCall(_)
            | NodeKind::Goto(_)
            | NodeKind::SubCall(_)
            | NodeKind::SubReturn => {}

            NodeKind::Program(body) | NodeKind::InfiniteLoop(body) => out.push(body),
            NodeKind::VarRef(n) => out.push(&mut n.identifier),
            NodeKind::ArrayRef(n) => {
                out.push(&mut n.identifier);
                push_opt_mut(&mut out, &mut n.dims);
            }
            NodeKind::UdtField(n) => {
                out.push(&mut n.udt_expr);
                out.push(&mut n.field);
            }
            NodeKind::FuncCallExprOrArrayRef(n) => {
                out.push(&mut n.identifier);
                push_opt_mut(&mut out, &mut n.args);
            }
            NodeKind::FuncCallExpr(n) | NodeKind::FuncCallStmnt(n) => {
                out.push(&mut n.identifier);
                push_opt_mut(&mut out, &mut n.args);
            }
            NodeKind::CommandExpr(n) | NodeKind::CommandStmnt(n) => {
                push_opt_mut(&mut out, &mut n.args);
            }
            NodeKind::BinaryOp(n) => {
                out.push(&mut n.lhs);
                out.push(&mut n.rhs);
            }
            NodeKind::UnaryOp(n) => out.push(&mut n.expr),
            NodeKind::ImplicitCast(n) => out.push(&mut n.expr),
            NodeKind::VarDecl(n) => {
                out.push(&mut n.identifier);
                push_opt_mut(&mut out, &mut n.initializer);
            }
            NodeKind::ArrayDecl(n) => {
                out.push(&mut n.identifier);
                push_opt_mut(&mut out, &mut n.dims);
            }
            NodeKind::ArrayUndim(n) => {
                out.push(&mut n.identifier);
                out.push(&mut n.dims);
            }
            NodeKind::FuncDecl(n) => {
                out.push(&mut n.identifier);
                push_opt_mut(&mut out, &mut n.args);
                out.push(&mut n.body);
                push_opt_mut(&mut out, &mut n.return_value);
            }
            NodeKind::FuncExit(n) => push_opt_mut(&mut out, &mut n.return_value),
            NodeKind::UdtDecl(n) => {
                out.push(&mut n.name);
                out.push(&mut n.body);
            }
            NodeKind::VarAssignment(n)
            | NodeKind::ArrayAssignment(n)
            | NodeKind::UdtFieldAssignment(n) => {
                out.push(&mut n.target);
                out.push(&mut n.expr);
            }
            NodeKind::Conditional(n) => {
                out.push(&mut n.condition);
                out.push(&mut n.true_branch);
                push_opt_mut(&mut out, &mut n.false_branch);
            }
            NodeKind::Select(n) => {
                out.push(&mut n.expr);
                out.push(&mut n.cases);
            }
            NodeKind::Case(n) => {
                out.push(&mut n.values);
                out.push(&mut n.body);
            }
            NodeKind::DefaultCase(n) => out.push(&mut n.body),
            NodeKind::ForLoop(n) => {
                out.push(&mut n.counter);
                out.push(&mut n.end);
                push_opt_mut(&mut out, &mut n.step);
                out.push(&mut n.body);
            }
            NodeKind::WhileLoop(n) | NodeKind::UntilLoop(n) => {
                out.push(&mut n.condition);
                out.push(&mut n.body);
            }
        }
        out
    }

    /// Whether this kind is a pure container of a child list.
    pub const fn is_list(&self) -> bool {
        matches!(
            self,
            NodeKind::Block(_)
                | NodeKind::ArgList(_)
                | NodeKind::ExprList(_)
                | NodeKind::InitializerList(_)
                | NodeKind::FuncArgList(_)
                | NodeKind::UdtDeclBody(_)
                | NodeKind::CaseList(_)
        )
    }
}
