//! Sweep 3: calls, UDT fields, and implicit casts.
//!
//! Runs in post-order, so every operand's type is settled before its parent
//! is checked. A function body is checked the first time the function is
//! called, or where it is declared, whichever comes first; its return type is
//! cached from then on.

use rustc_hash::{FxHashMap, FxHashSet};

use odb_commands::{CommandIndex, CommandParam};
use odb_ir::{
    visit_mut, ArrayDecl, ArrayRef, ArrayUndim, Assignment, Ast, BinaryOp, BuiltinType,
    CommandCall, CondLoop, Conditional, ForLoop, FuncCall, LiteralValue, NodeId, NodeKind, Order,
    Type, UdtField, UnaryOp, UnaryOpKind, VarDecl, VisitCx, VisitorMut,
};

use super::gather::ProgramInfo;
use super::overload::{select_overload, CallStyle, OverloadError};
use super::ResolveOptions;
use crate::query;
use crate::report::Reporter;
use crate::{CalleeKind, SemaError, SemaErrorKind, SemaWarning, SemaWarningKind, SymbolName};

pub(super) fn check_types(
    ast: &mut Ast,
    program: NodeId,
    info: &ProgramInfo,
    index: &dyn CommandIndex,
    options: ResolveOptions,
    reporter: &mut Reporter<'_>,
) {
    let mut checker = TypeChecker {
        info,
        index,
        options,
        reporter,
        return_types: FxHashMap::default(),
        in_progress: FxHashSet::default(),
    };
    let body = ast.program_body(program);
    for stmt in query::list_items(ast, Some(body)) {
        if matches!(ast.kind(stmt), NodeKind::FuncDecl(_)) {
            checker.check_function(ast, stmt);
        } else {
            visit_mut(ast, stmt, &mut checker, Order::PostOrder);
        }
    }
}

struct TypeChecker<'a, 'q> {
    info: &'a ProgramInfo,
    index: &'a dyn CommandIndex,
    options: ResolveOptions,
    reporter: &'a mut Reporter<'q>,
    /// Return type per checked `FuncDecl`; `Void` without a return value.
    return_types: FxHashMap<NodeId, Option<Type>>,
    /// Functions whose bodies are being checked, for recursive calls.
    in_progress: FxHashSet<NodeId>,
}

/// Operand type after integer promotion for negation.
fn promoted(ty: Type) -> Type {
    match ty.as_builtin() {
        Some(BuiltinType::Byte | BuiltinType::Word) => Type::INTEGER,
        Some(BuiltinType::Dword) => Type::Builtin(BuiltinType::DoubleInteger),
        _ => ty,
    }
}

impl TypeChecker<'_, '_> {
    fn check_function(&mut self, ast: &mut Ast, func: NodeId) {
        if self.return_types.contains_key(&func) || !self.in_progress.insert(func) {
            return;
        }
        tracing::trace!(?func, "checking function body");
        visit_mut(ast, func, self, Order::PostOrder);
        self.in_progress.remove(&func);

        let return_type = match ast.kind(func) {
            NodeKind::FuncDecl(decl) => match decl.return_value {
                Some(value) => self.expr_type(ast, value),
                None => Some(Type::Void),
            },
            _ => None,
        };
        self.return_types.insert(func, return_type);
    }

    /// Type of an expression node, `None` where it cannot be determined
    /// (unresolved references, recursive calls, wildcard command returns).
    fn expr_type(&self, ast: &Ast, expr: NodeId) -> Option<Type> {
        match ast.kind(expr) {
            NodeKind::Literal(value) => Some(Type::Builtin(value.builtin_type())),
            NodeKind::Variable(variable) => Some(ast.symbols.variable(*variable).ty.clone()),
            NodeKind::VarRef(node) => node.variable.map(|v| ast.symbols.variable(v).ty.clone()),
            NodeKind::ArrayRef(node) => node
                .variable
                .and_then(|v| ast.symbols.variable(v).ty.array_element().cloned()),
            NodeKind::UdtField(node) => node.resolved_ty.clone(),
            NodeKind::FuncCallExpr(node) => node
                .function
                .and_then(|func| self.return_types.get(&func).cloned().flatten()),
            NodeKind::CommandExpr(node) => node
                .command
                .as_ref()
                .and_then(|cmd| Type::from_command_type(cmd.return_type())),
            NodeKind::BinaryOp(node) if node.op.is_comparison() => Some(Type::BOOLEAN),
            NodeKind::BinaryOp(node) => self.expr_type(ast, node.lhs),
            NodeKind::UnaryOp(node) => {
                let operand = self.expr_type(ast, node.expr)?;
                Some(match node.op {
                    UnaryOpKind::Negate => promoted(operand),
                    UnaryOpKind::BitwiseNot | UnaryOpKind::LogicalNot => operand,
                })
            }
            NodeKind::ImplicitCast(node) => Some(node.target.clone()),
            _ => None,
        }
    }

    /// Make `expr`, a child of `parent`, have type `target`, wrapping it in
    /// an `ImplicitCast` when the types differ but convert.
    fn ensure_type(
        &mut self,
        ast: &mut Ast,
        parent: NodeId,
        expr: NodeId,
        target: &Type,
        warn: bool,
    ) {
        let Some(from) = self.expr_type(ast, expr) else {
            return;
        };
        if from == *target {
            return;
        }
        if !from.is_convertible_to(target) {
            let error = SemaError::new(
                ast.span(expr),
                SemaErrorKind::CannotConvert {
                    from,
                    to: target.clone(),
                },
            );
            self.reporter.error(&ast.interner, error);
            return;
        }

        let is_literal = matches!(ast.kind(expr), NodeKind::Literal(_));
        if warn && self.options.truncation_warnings && !is_literal {
            if let Some(loss) = from.conversion_loss(target) {
                let warning = SemaWarning::new(
                    ast.span(expr),
                    SemaWarningKind::ImplicitConversion {
                        from: from.clone(),
                        to: target.clone(),
                        loss,
                    },
                );
                self.reporter.warning(&ast.interner, warning);
            }
        }

        let cast = ast.implicit_cast(expr, target.clone());
        ast.swap_child(parent, expr, cast);
    }

    /// Coerce each element of an index or dimension list to `Dword`.
    fn ensure_indices(&mut self, ast: &mut Ast, dims: Option<NodeId>) {
        let Some(dims) = dims else {
            return;
        };
        for dim in query::list_items(ast, Some(dims)) {
            self.ensure_type(ast, dims, dim, &Type::DWORD, false);
        }
    }

    fn check_func_call(&mut self, ast: &mut Ast, id: NodeId, node: &FuncCall) {
        let Some(ident) = query::identifier(ast, node.identifier) else {
            return;
        };
        let Some(func) = self.info.function(ident.name) else {
            let error = SemaError::new(
                ast.span(id),
                SemaErrorKind::UnknownFunction { name: ident.name },
            );
            self.reporter.error(&ast.interner, error);
            return;
        };

        let params: Vec<Type> = match ast.kind(func) {
            NodeKind::FuncDecl(decl) => query::list_items(ast, decl.args)
                .into_iter()
                .filter_map(|param| match ast.kind(param) {
                    NodeKind::VarDecl(p) => Some(p.ty.clone()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };
        let args = query::list_items(ast, node.args);

        if params.len() == args.len() {
            if let Some(list) = node.args {
                for (arg, ty) in args.into_iter().zip(&params) {
                    self.ensure_type(ast, list, arg, ty, true);
                }
            }
        } else {
            let signature = params
                .iter()
                .map(|ty| ty.display(&ast.interner).to_string())
                .collect::<Vec<_>>()
                .join(", ");
            let error = SemaError::new(
                ast.span(id),
                SemaErrorKind::ArgCountMismatch {
                    callee: CalleeKind::Function,
                    name: ast.name(ident.name).to_owned(),
                    signature,
                    expected: params.len(),
                    found: args.len(),
                },
            );
            self.reporter.error(&ast.interner, error);
        }

        if let NodeKind::FuncCallExpr(call) | NodeKind::FuncCallStmnt(call) = ast.kind_mut(id) {
            call.function = Some(func);
        }
        self.check_function(ast, func);
    }

    fn check_command(
        &mut self,
        ast: &mut Ast,
        id: NodeId,
        node: &CommandCall,
        style: CallStyle,
    ) {
        let index = self.index;
        let overloads = index.lookup(ast.name(node.name));
        if overloads.is_empty() {
            let error = SemaError::new(
                ast.span(id),
                SemaErrorKind::UnknownCommand { name: node.name },
            );
            self.reporter.error(&ast.interner, error);
            return;
        }

        let args = query::list_items(ast, node.args);
        let arg_types: Vec<Option<Type>> =
            args.iter().map(|&arg| self.expr_type(ast, arg)).collect();
        let command = match select_overload(overloads, &arg_types, style) {
            Ok(command) => command,
            Err(OverloadError::NoMatch) => {
                let error = SemaError::new(
                    ast.span(id),
                    SemaErrorKind::NoMatchingOverload {
                        name: node.name,
                        arg_types,
                        overloads: overloads.to_vec(),
                    },
                );
                self.reporter.error(&ast.interner, error);
                return;
            }
            Err(OverloadError::ArgCount(command)) => {
                let signature = command
                    .params()
                    .iter()
                    .map(|param| param.ty.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                let error = SemaError::new(
                    ast.span(id),
                    SemaErrorKind::ArgCountMismatch {
                        callee: CalleeKind::Command,
                        name: command.symbol().to_owned(),
                        signature,
                        expected: command.params().len(),
                        found: args.len(),
                    },
                );
                self.reporter.error(&ast.interner, error);
                return;
            }
        };
        tracing::debug!(
            command = command.symbol(),
            signature = %command.signature(),
            candidates = overloads.len(),
            "selected overload"
        );

        if let Some(list) = node.args {
            for (&arg, &param) in args.iter().zip(command.params()) {
                self.coerce_command_arg(ast, list, arg, param);
            }
        }
        if let NodeKind::CommandExpr(call) | NodeKind::CommandStmnt(call) = ast.kind_mut(id) {
            call.command = Some(command);
        }
    }

    fn coerce_command_arg(
        &mut self,
        ast: &mut Ast,
        list: NodeId,
        arg: NodeId,
        param: CommandParam,
    ) {
        if param.ty.is_wildcard() {
            return;
        }
        let Some(target) = Type::from_command_type(param.ty) else {
            return;
        };
        if !param.is_out {
            self.ensure_type(ast, list, arg, &target, true);
            return;
        }
        // Out parameters are written through, so they cannot be cast.
        if let Some(from) = self.expr_type(ast, arg).filter(|from| *from != target) {
            let error = SemaError::new(
                ast.span(arg),
                SemaErrorKind::CannotConvert { from, to: target },
            );
            self.reporter.error(&ast.interner, error);
        }
    }

    fn check_udt_field(&mut self, ast: &mut Ast, id: NodeId, node: &UdtField) {
        let Some(base) = self.expr_type(ast, node.udt_expr) else {
            return;
        };
        let (selector, selects_array) = match ast.kind(node.field) {
            NodeKind::VarRef(r) => (r.identifier, false),
            NodeKind::ArrayRef(r) => (r.identifier, true),
            _ => return,
        };
        let Some(field) = query::declared_name(ast, selector) else {
            return;
        };
        let span = ast.span(node.field);

        let Some(udt) = base.as_udt() else {
            let error = SemaError::new(span, SemaErrorKind::FieldOnNonUdt { field, ty: base });
            self.reporter.error(&ast.interner, error);
            return;
        };
        let Some(decl) = self.info.udt(udt) else {
            let error = SemaError::new(span, SemaErrorKind::UnknownUdt { field, udt });
            self.reporter.error(&ast.interner, error);
            return;
        };
        let Some((member_ty, member_is_array)) = udt_member(ast, decl, field) else {
            let error = SemaError::new(span, SemaErrorKind::UnknownField { field, udt });
            self.reporter.error(&ast.interner, error);
            return;
        };
        if member_is_array != selects_array {
            let error = SemaError::new(
                span,
                SemaErrorKind::FieldArrayMismatch {
                    field,
                    udt,
                    field_is_array: member_is_array,
                },
            );
            self.reporter.error(&ast.interner, error);
            return;
        }
        if let NodeKind::UdtField(n) = ast.kind_mut(id) {
            n.resolved_ty = Some(member_ty);
        }
    }
}

/// Declared type of the member `field` of the UDT `decl`, and whether the
/// member is an array. Array members report their element type.
fn udt_member(ast: &Ast, decl: NodeId, field: SymbolName) -> Option<(Type, bool)> {
    let NodeKind::UdtDecl(udt) = ast.kind(decl) else {
        return None;
    };
    ast.children(udt.body).iter().find_map(|&member| {
        let (identifier, ty, is_array) = match ast.kind(member) {
            NodeKind::VarDecl(d) => (d.identifier, d.ty.clone(), false),
            NodeKind::ArrayDecl(d) => (d.identifier, d.element_ty.clone(), true),
            _ => return None,
        };
        (query::declared_name(ast, identifier)? == field).then_some((ty, is_array))
    })
}

impl VisitorMut for TypeChecker<'_, '_> {
    fn visit_var_decl(&mut self, cx: &mut VisitCx<'_>, id: NodeId, node: &VarDecl) {
        let exempt = cx.parent().is_some_and(|parent| {
            matches!(
                cx.ast().kind(parent),
                NodeKind::FuncArgList(_) | NodeKind::UdtDeclBody(_)
            )
        });
        let Some(builtin) = node.ty.as_builtin() else {
            return;
        };
        if exempt {
            return;
        }
        let ast = cx.ast_mut();

        let Some(list) = node.initializer else {
            if let Some(name) = query::declared_name(ast, node.identifier) {
                let error =
                    SemaError::new(ast.span(id), SemaErrorKind::MissingInitializer { name });
                self.reporter.error(&ast.interner, error);
            }
            return;
        };
        let items = query::list_items(ast, Some(list));
        let (expected, element) = builtin.initializer_shape();
        if items.len() != expected {
            let kind = if expected == 1 {
                SemaErrorKind::InitializerListNotAllowed { ty: node.ty.clone() }
            } else {
                SemaErrorKind::InitializerListLength {
                    ty: node.ty.clone(),
                    expected,
                    found: items.len(),
                }
            };
            self.reporter.error(&ast.interner, SemaError::new(ast.span(list), kind));
            return;
        }
        let element = Type::Builtin(element);
        for item in items {
            self.ensure_type(ast, list, item, &element, true);
        }
    }

    fn visit_array_decl(&mut self, cx: &mut VisitCx<'_>, _id: NodeId, node: &ArrayDecl) {
        self.ensure_indices(cx.ast_mut(), node.dims);
    }

    fn visit_array_undim(&mut self, cx: &mut VisitCx<'_>, _id: NodeId, node: &ArrayUndim) {
        self.ensure_indices(cx.ast_mut(), Some(node.dims));
    }

    fn visit_array_ref(&mut self, cx: &mut VisitCx<'_>, _id: NodeId, node: &ArrayRef) {
        self.ensure_indices(cx.ast_mut(), node.dims);
    }

    fn visit_udt_field(&mut self, cx: &mut VisitCx<'_>, id: NodeId, node: &UdtField) {
        self.check_udt_field(cx.ast_mut(), id, node);
    }

    fn visit_func_call_expr(&mut self, cx: &mut VisitCx<'_>, id: NodeId, node: &FuncCall) {
        self.check_func_call(cx.ast_mut(), id, node);
    }

    fn visit_func_call_stmnt(&mut self, cx: &mut VisitCx<'_>, id: NodeId, node: &FuncCall) {
        self.check_func_call(cx.ast_mut(), id, node);
    }

    fn visit_command_expr(&mut self, cx: &mut VisitCx<'_>, id: NodeId, node: &CommandCall) {
        self.check_command(cx.ast_mut(), id, node, CallStyle::Expression);
    }

    fn visit_command_stmnt(&mut self, cx: &mut VisitCx<'_>, id: NodeId, node: &CommandCall) {
        self.check_command(cx.ast_mut(), id, node, CallStyle::Statement);
    }

    fn visit_binary_op(&mut self, cx: &mut VisitCx<'_>, id: NodeId, node: &BinaryOp) {
        let ast = cx.ast_mut();
        let Some(common) = self.expr_type(ast, node.lhs) else {
            return;
        };
        self.ensure_type(ast, id, node.rhs, &common, true);
    }

    fn visit_unary_op(&mut self, cx: &mut VisitCx<'_>, id: NodeId, node: &UnaryOp) {
        let ast = cx.ast_mut();
        let Some(operand) = self.expr_type(ast, node.expr) else {
            return;
        };
        if !operand.is_numeric() {
            let error = SemaError::new(
                ast.span(node.expr),
                SemaErrorKind::NonNumericOperand {
                    op: node.op,
                    ty: operand,
                },
            );
            self.reporter.error(&ast.interner, error);
            return;
        }
        if node.op == UnaryOpKind::Negate {
            let target = promoted(operand);
            self.ensure_type(ast, id, node.expr, &target, false);
        }
    }

    fn visit_var_assignment(&mut self, cx: &mut VisitCx<'_>, id: NodeId, node: &Assignment) {
        self.check_assignment(cx.ast_mut(), id, node);
    }

    fn visit_array_assignment(&mut self, cx: &mut VisitCx<'_>, id: NodeId, node: &Assignment) {
        self.check_assignment(cx.ast_mut(), id, node);
    }

    fn visit_udt_field_assignment(
        &mut self,
        cx: &mut VisitCx<'_>,
        id: NodeId,
        node: &Assignment,
    ) {
        self.check_assignment(cx.ast_mut(), id, node);
    }

    fn visit_conditional(&mut self, cx: &mut VisitCx<'_>, id: NodeId, node: &Conditional) {
        self.ensure_type(cx.ast_mut(), id, node.condition, &Type::BOOLEAN, true);
    }

    fn visit_while_loop(&mut self, cx: &mut VisitCx<'_>, id: NodeId, node: &CondLoop) {
        self.ensure_type(cx.ast_mut(), id, node.condition, &Type::BOOLEAN, true);
    }

    fn visit_until_loop(&mut self, cx: &mut VisitCx<'_>, id: NodeId, node: &CondLoop) {
        self.ensure_type(cx.ast_mut(), id, node.condition, &Type::BOOLEAN, true);
    }

    fn visit_for_loop(&mut self, cx: &mut VisitCx<'_>, id: NodeId, node: &ForLoop) {
        let ast = cx.ast_mut();
        let counter_ty = match ast.kind(node.counter) {
            NodeKind::VarAssignment(assign) => self.expr_type(ast, assign.target),
            _ => None,
        };
        let Some(counter_ty) = counter_ty else {
            return;
        };

        self.ensure_type(ast, id, node.end, &counter_ty, true);
        match node.step {
            Some(step) => self.ensure_type(ast, id, step, &counter_ty, true),
            None => {
                let one = counter_ty.as_builtin().and_then(LiteralValue::one);
                if let Some(one) = one {
                    let step = ast.literal(one, ast.span(id));
                    ast.set_loop_step(id, step);
                }
            }
        }
    }
}

impl TypeChecker<'_, '_> {
    fn check_assignment(&mut self, ast: &mut Ast, id: NodeId, node: &Assignment) {
        if let Some(target) = self.expr_type(ast, node.target) {
            self.ensure_type(ast, id, node.expr, &target, true);
        }
    }
}
