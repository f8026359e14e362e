use odb_commands::CommandDb;
use odb_diagnostic::{Diagnostic, DiagnosticConfig, DiagnosticQueue, ErrorCode};
use odb_ir::{
    Annotation, Ast, BinaryOpKind, BuiltinType, Identifier, LiteralValue, NodeId, NodeKind,
    ScopeMarker, SourceSpan, Type, UnaryOpKind, VariableId,
};
use pretty_assertions::assert_eq;

use super::{resolve_and_check_types, resolve_and_check_types_with, ResolveOptions};

const NONE: Annotation = Annotation::None;

fn line(n: u32) -> SourceSpan {
    SourceSpan::on_line(n, 1, 20)
}

fn run(ast: &mut Ast, program: NodeId) -> (bool, Vec<Diagnostic>) {
    run_with(ast, program, ResolveOptions::default())
}

fn run_with(ast: &mut Ast, program: NodeId, options: ResolveOptions) -> (bool, Vec<Diagnostic>) {
    let db = CommandDb::new();
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
    let ok = resolve_and_check_types_with(ast, program, &db, &mut queue, options);
    (ok, queue.flush())
}

fn codes(diags: &[Diagnostic]) -> Vec<ErrorCode> {
    diags.iter().map(|d| d.code).collect()
}

/// Variable a reference or declaration resolved to.
fn variable_of(ast: &Ast, id: NodeId) -> VariableId {
    let resolved = match ast.kind(id) {
        NodeKind::VarRef(r) => r.variable,
        NodeKind::ArrayRef(r) => r.variable,
        NodeKind::ArrayDecl(d) => d.variable,
        NodeKind::VarDecl(d) => match ast.kind(d.identifier) {
            NodeKind::Variable(v) => Some(*v),
            _ => None,
        },
        _ => None,
    };
    match resolved {
        Some(variable) => variable,
        None => panic!("{id:?} ({}) is not resolved", ast.kind(id).name()),
    }
}

fn assigned_expr(ast: &Ast, assignment: NodeId) -> NodeId {
    match ast.kind(assignment) {
        NodeKind::VarAssignment(a)
        | NodeKind::ArrayAssignment(a)
        | NodeKind::UdtFieldAssignment(a) => a.expr,
        other => panic!("expected an assignment, found {}", other.name()),
    }
}

fn cast_target(ast: &Ast, id: NodeId) -> Option<Type> {
    match ast.kind(id) {
        NodeKind::ImplicitCast(cast) => Some(cast.target.clone()),
        _ => None,
    }
}

// Sweeps 1 and 2

#[test]
fn undeclared_uses_share_one_integer_variable() {
    let mut ast = Ast::new();
    let x1 = ast.var_ref("x", NONE, line(1));
    let one = ast.int_literal(1, line(1));
    let first = ast.var_assign(x1, one, line(1));
    let x2 = ast.var_ref("x", NONE, line(2));
    let y = ast.var_ref("y", NONE, line(2));
    let second = ast.var_assign(y, x2, line(2));
    let program = ast.program(vec![first, second]);

    let (ok, diags) = run(&mut ast, program);
    assert!(ok, "{diags:?}");
    assert_eq!(variable_of(&ast, x1), variable_of(&ast, x2));
    assert_eq!(ast.symbols.variable(variable_of(&ast, x1)).ty, Type::INTEGER);
    assert_ne!(variable_of(&ast, x1), variable_of(&ast, y));
}

#[test]
fn sigils_pick_the_implicit_type() {
    let mut ast = Ast::new();
    let s = ast.var_ref("a", Annotation::String, line(1));
    let text = ast.string_literal("hi", line(1));
    let first = ast.var_assign(s, text, line(1));
    let f = ast.var_ref("a", Annotation::Float, line(2));
    let half = ast.float_literal(0.5, line(2));
    let second = ast.var_assign(f, half, line(2));
    let program = ast.program(vec![first, second]);

    let (ok, _) = run(&mut ast, program);
    assert!(ok);
    assert_eq!(ast.symbols.variable(variable_of(&ast, s)).ty, Type::STRING);
    assert_eq!(ast.symbols.variable(variable_of(&ast, f)).ty, Type::FLOAT);
    assert_ne!(variable_of(&ast, s), variable_of(&ast, f));
}

#[test]
fn functions_see_globals_but_not_main_locals() {
    let mut ast = Ast::new();
    let g_name = ast.intern("g");
    let g_ident = ast.scoped_identifier(
        Identifier {
            scope: Some(ScopeMarker::Global),
            ..Identifier::new(g_name, NONE)
        },
        line(1),
    );
    let zero = ast.int_literal(0, line(1));
    let g_decl = ast.var_decl_of(g_ident, Type::INTEGER, vec![zero], line(1));
    let x_main = ast.var_ref("x", NONE, line(2));
    let one = ast.int_literal(1, line(2));
    let main_assign = ast.var_assign(x_main, one, line(2));

    let g_in_f = ast.var_ref("g", NONE, line(4));
    let two = ast.int_literal(2, line(4));
    let g_assign = ast.var_assign(g_in_f, two, line(4));
    let x_in_f = ast.var_ref("x", NONE, line(5));
    let three = ast.int_literal(3, line(5));
    let x_assign = ast.var_assign(x_in_f, three, line(5));
    let func = ast.func_decl("f", vec![], vec![g_assign, x_assign], None, line(3));
    let program = ast.program(vec![g_decl, main_assign, func]);

    let (ok, diags) = run(&mut ast, program);
    assert!(ok, "{diags:?}");
    assert_eq!(variable_of(&ast, g_in_f), variable_of(&ast, g_decl));
    assert_ne!(variable_of(&ast, x_in_f), variable_of(&ast, x_main));
}

#[test]
fn arrays_are_global_by_default() {
    let mut ast = Ast::new();
    let ten = ast.int_literal(10, line(1));
    let decl = ast.array_decl("arr", NONE, Type::INTEGER, vec![ten], line(1));
    let index = ast.int_literal(1, line(3));
    let read = ast.func_call_or_array("arr", NONE, vec![index], line(3));
    let r = ast.var_ref("r", NONE, line(3));
    let assign = ast.var_assign(r, read, line(3));
    let func = ast.func_decl("f", vec![], vec![assign], None, line(2));
    let program = ast.program(vec![decl, func]);

    let (ok, diags) = run(&mut ast, program);
    assert!(ok, "{diags:?}");
    let array_ref = assigned_expr(&ast, assign);
    assert_eq!(variable_of(&ast, array_ref), variable_of(&ast, decl));
    let NodeKind::ArrayRef(node) = ast.kind(array_ref) else {
        panic!("call-or-array was not rewritten to an array reference");
    };
    let dims = ast.children(node.dims.unwrap_or(array_ref)).to_vec();
    assert_eq!(cast_target(&ast, dims[0]), Some(Type::DWORD));
}

#[test]
fn arrays_are_never_declared_implicitly() {
    let mut ast = Ast::new();
    let index = ast.int_literal(1, line(1));
    let read = ast.array_ref("missing", NONE, vec![index], line(1));
    let r = ast.var_ref("r", NONE, line(1));
    let assign = ast.var_assign(r, read, line(1));
    let program = ast.program(vec![assign]);

    let (ok, diags) = run(&mut ast, program);
    assert!(!ok);
    assert_eq!(codes(&diags), vec![ErrorCode::E2003]);
}

#[test]
fn redeclaration_reports_both_spans() {
    let mut ast = Ast::new();
    let zero = ast.int_literal(0, line(1));
    let first = ast.var_decl("x", NONE, Type::INTEGER, vec![zero], line(1));
    let one = ast.int_literal(1, line(2));
    let second = ast.var_decl("x", NONE, Type::INTEGER, vec![one], line(2));
    let program = ast.program(vec![first, second]);

    let (ok, diags) = run(&mut ast, program);
    assert!(!ok);
    assert_eq!(codes(&diags), vec![ErrorCode::E2002]);
    let spans: Vec<_> = diags[0].labels.iter().map(|l| (l.span, l.is_primary)).collect();
    assert_eq!(spans, vec![(line(2), true), (line(1), false)]);
}

#[test]
fn type_checks_are_skipped_after_resolution_errors() {
    let mut ast = Ast::new();
    let uninitialized = ast.var_decl("n", NONE, Type::INTEGER, vec![], line(1));
    let read = ast.array_ref("missing", NONE, vec![], line(2));
    let r = ast.var_ref("r", NONE, line(2));
    let assign = ast.var_assign(r, read, line(2));
    let program = ast.program(vec![uninitialized, assign]);

    let (ok, diags) = run(&mut ast, program);
    assert!(!ok);
    assert_eq!(codes(&diags), vec![ErrorCode::E2003]);
}

// Sweep 3

#[test]
fn narrowing_assignment_is_cast_and_warned() {
    let mut ast = Ast::new();
    let value = ast.float_literal(1.5, line(1));
    let decl = ast.var_decl("f", Annotation::Float, Type::FLOAT, vec![value], line(1));
    let i = ast.var_ref("i", NONE, line(2));
    let f = ast.var_ref("f", Annotation::Float, line(2));
    let assign = ast.var_assign(i, f, line(2));
    let program = ast.program(vec![decl, assign]);

    let (ok, diags) = run(&mut ast, program);
    assert!(ok);
    let expr = assigned_expr(&ast, assign);
    assert_eq!(cast_target(&ast, expr), Some(Type::INTEGER));
    assert_eq!(ast.parent(f), Some(expr));
    assert_eq!(ast.parent(expr), Some(assign));
    assert_eq!(codes(&diags), vec![ErrorCode::W2001]);
}

#[test]
fn literal_conversions_and_disabled_warnings_stay_quiet() {
    let build = |ast: &mut Ast| {
        let i = ast.var_ref("i", NONE, line(1));
        let half = ast.float_literal(2.5, line(1));
        let literal = ast.var_assign(i, half, line(1));
        let j = ast.var_ref("j", NONE, line(2));
        let f = ast.var_ref("f", Annotation::Float, line(2));
        let variable = ast.var_assign(j, f, line(2));
        (ast.program(vec![literal, variable]), literal)
    };

    let mut ast = Ast::new();
    let (program, literal) = build(&mut ast);
    let (ok, diags) = run(&mut ast, program);
    assert!(ok);
    assert_eq!(cast_target(&ast, assigned_expr(&ast, literal)), Some(Type::INTEGER));
    assert_eq!(codes(&diags), vec![ErrorCode::W2001]);
    assert_eq!(diags[0].primary_span(), Some(line(2)));

    let mut ast = Ast::new();
    let (program, _) = build(&mut ast);
    let quiet = ResolveOptions {
        truncation_warnings: false,
    };
    let (ok, diags) = run_with(&mut ast, program, quiet);
    assert!(ok);
    assert!(diags.is_empty());
}

#[test]
fn unconvertible_assignment_is_an_error() {
    let mut ast = Ast::new();
    let i = ast.var_ref("i", NONE, line(1));
    let text = ast.string_literal("nope", line(1));
    let assign = ast.var_assign(i, text, line(1));
    let program = ast.program(vec![assign]);

    let (ok, diags) = run(&mut ast, program);
    assert!(!ok);
    assert_eq!(codes(&diags), vec![ErrorCode::E2001]);
    assert_eq!(assigned_expr(&ast, assign), text);
}

#[test]
fn initializers_are_checked_against_the_declared_shape() {
    let mut ast = Ast::new();
    let missing = ast.var_decl("n", NONE, Type::INTEGER, vec![], line(1));
    let a = ast.float_literal(1.0, line(2));
    let b = ast.float_literal(2.0, line(2));
    let short = ast.var_decl("v", NONE, Type::Builtin(BuiltinType::Vec3), vec![a, b], line(2));
    let c = ast.int_literal(1, line(3));
    let d = ast.int_literal(2, line(3));
    let scalar = ast.var_decl("m", NONE, Type::INTEGER, vec![c, d], line(3));
    let program = ast.program(vec![missing, short, scalar]);

    let (ok, diags) = run(&mut ast, program);
    assert!(!ok);
    assert_eq!(
        codes(&diags),
        vec![ErrorCode::E2009, ErrorCode::E2010, ErrorCode::E2010]
    );
}

#[test]
fn vector_initializer_elements_become_floats() {
    let mut ast = Ast::new();
    let x = ast.int_literal(1, line(1));
    let y = ast.float_literal(2.0, line(1));
    let decl = ast.var_decl("v", NONE, Type::Builtin(BuiltinType::Vec2), vec![x, y], line(1));
    let program = ast.program(vec![decl]);

    let (ok, diags) = run(&mut ast, program);
    assert!(ok, "{diags:?}");
    let NodeKind::VarDecl(node) = ast.kind(decl) else {
        panic!("declaration was replaced");
    };
    let items = ast.children(node.initializer.unwrap_or(decl)).to_vec();
    assert_eq!(cast_target(&ast, items[0]), Some(Type::FLOAT));
    assert_eq!(items[1], y);
}

#[test]
fn loop_without_step_gets_a_unit_step_of_the_counter_type() {
    let mut ast = Ast::new();
    let counter = ast.var_ref("f", Annotation::Float, line(1));
    let start = ast.float_literal(0.0, line(1));
    let init = ast.var_assign(counter, start, line(1));
    let end = ast.int_literal(10, line(1));
    let for_loop = ast.for_loop(init, end, None, vec![], line(1));
    let program = ast.program(vec![for_loop]);

    let (ok, diags) = run(&mut ast, program);
    assert!(ok, "{diags:?}");
    let NodeKind::ForLoop(node) = ast.kind(for_loop) else {
        panic!("loop was replaced");
    };
    assert_eq!(cast_target(&ast, node.end), Some(Type::FLOAT));
    let Some(step) = node.step else {
        panic!("no step was synthesized");
    };
    assert_eq!(ast.kind(step), &NodeKind::Literal(LiteralValue::Float(1.0)));
    assert_eq!(ast.parent(step), Some(for_loop));
}

#[test]
fn conditions_are_coerced_to_boolean() {
    let mut ast = Ast::new();
    let n = ast.var_ref("n", NONE, line(1));
    let cond = ast.conditional(n, vec![], None, line(1));
    let a = ast.var_ref("a", NONE, line(2));
    let b = ast.var_ref("b", NONE, line(2));
    let less = ast.binary(BinaryOpKind::Less, a, b);
    let loop_ = ast.while_loop(less, vec![], line(2));
    let program = ast.program(vec![cond, loop_]);

    let (ok, _) = run(&mut ast, program);
    assert!(ok);
    let NodeKind::Conditional(node) = ast.kind(cond) else {
        panic!("conditional was replaced");
    };
    assert_eq!(cast_target(&ast, node.condition), Some(Type::BOOLEAN));
    let NodeKind::WhileLoop(node) = ast.kind(loop_) else {
        panic!("loop was replaced");
    };
    assert_eq!(node.condition, less);
}

#[test]
fn binary_operands_take_the_left_type() {
    let mut ast = Ast::new();
    let f = ast.var_ref("f", Annotation::Float, line(1));
    let i = ast.var_ref("i", NONE, line(1));
    let sum = ast.binary(BinaryOpKind::Add, f, i);
    let r = ast.var_ref("r", Annotation::Float, line(1));
    let assign = ast.var_assign(r, sum, line(1));
    let program = ast.program(vec![assign]);

    let (ok, _) = run(&mut ast, program);
    assert!(ok);
    let NodeKind::BinaryOp(node) = ast.kind(sum) else {
        panic!("operator was replaced");
    };
    assert_eq!(node.lhs, f);
    assert_eq!(cast_target(&ast, node.rhs), Some(Type::FLOAT));
    assert_eq!(assigned_expr(&ast, assign), sum);
}

#[test]
fn negation_promotes_small_integers_and_rejects_strings() {
    let mut ast = Ast::new();
    let one = ast.int_literal(1, line(1));
    let decl = ast.var_decl("b", NONE, Type::Builtin(BuiltinType::Byte), vec![one], line(1));
    let b = ast.var_ref("b", NONE, line(2));
    let neg = ast.unary(UnaryOpKind::Negate, b, line(2));
    let r = ast.var_ref("r", NONE, line(2));
    let promoted = ast.var_assign(r, neg, line(2));
    let s = ast.var_ref("s", Annotation::String, line(3));
    let bad = ast.unary(UnaryOpKind::Negate, s, line(3));
    let t = ast.var_ref("t", Annotation::String, line(3));
    let rejected = ast.var_assign(t, bad, line(3));
    let program = ast.program(vec![decl, promoted, rejected]);

    let (ok, diags) = run(&mut ast, program);
    assert!(!ok);
    assert_eq!(codes(&diags), vec![ErrorCode::E2008]);
    let NodeKind::UnaryOp(node) = ast.kind(neg) else {
        panic!("negation was replaced");
    };
    assert_eq!(cast_target(&ast, node.expr), Some(Type::INTEGER));
    assert_eq!(assigned_expr(&ast, promoted), neg);
}

#[test]
fn udt_fields_resolve_to_member_types() {
    let mut ast = Ast::new();
    let x_field = ast.var_decl("x", NONE, Type::FLOAT, vec![], line(1));
    let four = ast.int_literal(4, line(1));
    let tags_field = ast.array_decl("tags", NONE, Type::INTEGER, vec![four], line(1));
    let udt = ast.udt_decl("point", vec![x_field, tags_field], line(1));
    let point = ast.intern("point");
    let decl = ast.var_decl("p", NONE, Type::Udt(point), vec![], line(2));

    let base = ast.var_ref("p", NONE, line(3));
    let selector = ast.var_ref("x", NONE, line(3));
    let access = ast.udt_field(base, selector, line(3));
    let f = ast.var_ref("f", Annotation::Float, line(3));
    let read = ast.var_assign(f, access, line(3));

    let base = ast.var_ref("p", NONE, line(4));
    let selector = ast.var_ref("y", NONE, line(4));
    let unknown = ast.udt_field(base, selector, line(4));
    let g = ast.var_ref("g", Annotation::Float, line(4));
    let unknown_read = ast.var_assign(g, unknown, line(4));

    let base = ast.var_ref("p", NONE, line(5));
    let selector = ast.var_ref("tags", NONE, line(5));
    let unindexed = ast.udt_field(base, selector, line(5));
    let h = ast.var_ref("h", NONE, line(5));
    let mismatch = ast.var_assign(h, unindexed, line(5));

    let program = ast.program(vec![udt, decl, read, unknown_read, mismatch]);

    let (ok, diags) = run(&mut ast, program);
    assert!(!ok);
    assert_eq!(codes(&diags), vec![ErrorCode::E2013, ErrorCode::E2014]);
    let NodeKind::UdtField(node) = ast.kind(access) else {
        panic!("field access was replaced");
    };
    assert_eq!(node.resolved_ty, Some(Type::FLOAT));
    assert_eq!(assigned_expr(&ast, read), access);
    let NodeKind::VarRef(sel) = ast.kind(selector) else {
        panic!("selector was replaced");
    };
    assert_eq!(sel.variable, None);
}

#[test]
fn fields_of_non_udt_values_are_rejected() {
    let mut ast = Ast::new();
    let base = ast.var_ref("n", NONE, line(1));
    let selector = ast.var_ref("x", NONE, line(1));
    let access = ast.udt_field(base, selector, line(1));
    let r = ast.var_ref("r", NONE, line(1));
    let assign = ast.var_assign(r, access, line(1));
    let program = ast.program(vec![assign]);

    let (ok, diags) = run(&mut ast, program);
    assert!(!ok);
    assert_eq!(codes(&diags), vec![ErrorCode::E2011]);
}

#[test]
fn function_calls_cast_arguments_and_attach_the_declaration() {
    let mut ast = Ast::new();
    let w = ast.var_decl("w", NONE, Type::FLOAT, vec![], line(1));
    let h = ast.var_decl("h", NONE, Type::FLOAT, vec![], line(1));
    let w_ref = ast.var_ref("w", NONE, line(2));
    let h_ref = ast.var_ref("h", NONE, line(2));
    let product = ast.binary(BinaryOpKind::Mul, w_ref, h_ref);
    let func = ast.func_decl("area", vec![w, h], vec![], Some(product), line(1));

    let two = ast.int_literal(2, line(3));
    let three = ast.int_literal(3, line(3));
    let call = ast.func_call_or_array("area", NONE, vec![two, three], line(3));
    let r = ast.var_ref("r", Annotation::Float, line(3));
    let assign = ast.var_assign(r, call, line(3));
    let program = ast.program(vec![func, assign]);

    let (ok, diags) = run(&mut ast, program);
    assert!(ok, "{diags:?}");
    let resolved = assigned_expr(&ast, assign);
    let NodeKind::FuncCallExpr(node) = ast.kind(resolved) else {
        panic!("call-or-array was not rewritten to a call");
    };
    assert_eq!(node.function, Some(func));
    let args = ast.children(node.args.unwrap_or(resolved)).to_vec();
    assert!(args.iter().all(|&arg| cast_target(&ast, arg) == Some(Type::FLOAT)));
    assert_eq!(variable_of(&ast, w_ref), variable_of(&ast, w));
}

#[test]
fn bad_function_calls_are_reported() {
    let mut ast = Ast::new();
    let n = ast.var_decl("n", NONE, Type::INTEGER, vec![], line(1));
    let func = ast.func_decl("twice", vec![n], vec![], None, line(1));
    let unknown = ast.func_call_stmnt("nothing", vec![], line(2));
    let wrong_arity = ast.func_call_stmnt("twice", vec![], line(3));
    let program = ast.program(vec![func, unknown, wrong_arity]);

    let (ok, diags) = run(&mut ast, program);
    assert!(!ok);
    assert_eq!(codes(&diags), vec![ErrorCode::E2005, ErrorCode::E2004]);
    assert_eq!(
        diags[1].message,
        "Function 'twice' with signature 'Integer' expects 1 argument, but 0 were provided"
    );
}

#[test]
fn recursive_functions_terminate() {
    let mut ast = Ast::new();
    let n = ast.var_decl("n", NONE, Type::INTEGER, vec![], line(1));
    let n_ref = ast.var_ref("n", NONE, line(1));
    let one = ast.int_literal(1, line(1));
    let less = ast.binary(BinaryOpKind::Sub, n_ref, one);
    let recurse = ast.func_call_or_array("fact", NONE, vec![less], line(1));
    let func = ast.func_decl("fact", vec![n], vec![], Some(recurse), line(1));
    let three = ast.int_literal(3, line(2));
    let call = ast.func_call_or_array("fact", NONE, vec![three], line(2));
    let r = ast.var_ref("r", NONE, line(2));
    let assign = ast.var_assign(r, call, line(2));
    let program = ast.program(vec![func, assign]);

    let (ok, diags) = run(&mut ast, program);
    assert!(ok, "{diags:?}");
    let NodeKind::FuncDecl(decl) = ast.kind(func) else {
        panic!("function was replaced");
    };
    let inner = decl.return_value.unwrap_or(func);
    assert!(matches!(ast.kind(inner), NodeKind::FuncCallExpr(c) if c.function == Some(func)));
}

#[test]
fn default_options_warn_on_truncation() {
    let mut ast = Ast::new();
    let program = ast.program(vec![]);
    let db = CommandDb::new();
    let mut queue = DiagnosticQueue::new();
    assert!(ResolveOptions::default().truncation_warnings);
    assert!(resolve_and_check_types(&mut ast, program, &db, &mut queue));
}
