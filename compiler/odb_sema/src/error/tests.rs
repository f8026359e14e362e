use std::sync::Arc;

use odb_commands::{Command, CommandType};
use odb_diagnostic::{ErrorCode, Severity};
use odb_ir::{Annotation, ConversionLoss, SourceSpan, StringInterner, Type};
use pretty_assertions::assert_eq;

use super::*;

fn span(line: u32) -> SourceSpan {
    SourceSpan::on_line(line, 1, 8)
}

#[test]
fn redeclaration_cites_the_earlier_declaration() {
    let mut interner = StringInterner::new();
    let name = SymbolName::new(interner.intern("score"), Annotation::None);
    let error = SemaError::new(
        span(4),
        SemaErrorKind::AlreadyDeclared {
            name,
            is_array: false,
            previous_ty: Type::INTEGER,
            previous: span(2),
        },
    );

    let diag = error.into_diagnostic(&interner);
    assert_eq!(diag.code, ErrorCode::E2002);
    assert_eq!(
        diag.message,
        "Variable 'score' has already been declared as type Integer"
    );
    assert_eq!(diag.primary_span(), Some(span(4)));
    let secondary: Vec<_> = diag.labels.iter().filter(|l| !l.is_primary).collect();
    assert_eq!(secondary.len(), 1);
    assert_eq!(secondary[0].span, span(2));
    assert_eq!(secondary[0].message, "see last declaration");
}

#[test]
fn sigils_are_part_of_displayed_names() {
    let mut interner = StringInterner::new();
    let name = SymbolName::new(interner.intern("title"), Annotation::String);
    let error = SemaError::new(span(1), SemaErrorKind::UndeclaredArray { name });
    assert_eq!(
        error.into_diagnostic(&interner).message,
        "Array 'title$' does not exist in this scope"
    );
}

#[test]
fn argument_count_message_agrees_in_number() {
    let interner = StringInterner::new();
    let render = |expected, found, signature: &str| {
        SemaError::new(
            span(1),
            SemaErrorKind::ArgCountMismatch {
                callee: CalleeKind::Function,
                name: "area".to_owned(),
                signature: signature.to_owned(),
                expected,
                found,
            },
        )
        .into_diagnostic(&interner)
        .message
    };

    assert_eq!(
        render(2, 1, "Float, Float"),
        "Function 'area' with signature 'Float, Float' expects 2 arguments, but 1 was provided"
    );
    assert_eq!(
        render(0, 3, ""),
        "Function 'area' expects 0 arguments, but 3 were provided"
    );
}

#[test]
fn failed_overload_lists_every_candidate() {
    let mut interner = StringInterner::new();
    let name = interner.intern("position object");
    let overloads = vec![
        Arc::new(
            Command::new("position object", CommandType::Void)
                .with_param(CommandType::Integer)
                .with_param(CommandType::Float),
        ),
        Arc::new(Command::new("position object", CommandType::Void).with_param(CommandType::Integer)),
    ];
    let error = SemaError::new(
        span(1),
        SemaErrorKind::NoMatchingOverload {
            name,
            arg_types: vec![Some(Type::STRING), None],
            overloads,
        },
    );

    let diag = error.into_diagnostic(&interner);
    assert_eq!(diag.code, ErrorCode::E2007);
    assert_eq!(
        diag.message,
        "Unable to find matching overload for command 'position object' matching 'String, ?'"
    );
    assert_eq!(
        diag.notes,
        vec![
            "... does not match 'position object Integer, Float'".to_owned(),
            "... does not match 'position object Integer'".to_owned(),
        ]
    );
}

#[test]
fn codes_follow_the_error_kind() {
    let mut interner = StringInterner::new();
    let name = interner.intern("here");
    let cases = [
        (SemaErrorKind::LabelUndefined { name }, ErrorCode::E3002),
        (SemaErrorKind::BitwiseNotSideEffects, ErrorCode::E2017),
        (
            SemaErrorKind::InitializerListLength {
                ty: Type::Builtin(odb_ir::BuiltinType::Vec3),
                expected: 3,
                found: 2,
            },
            ErrorCode::E2010,
        ),
        (
            SemaErrorKind::InitializerListNotAllowed { ty: Type::INTEGER },
            ErrorCode::E2010,
        ),
    ];
    for (kind, code) in cases {
        let diag = SemaError::new(span(1), kind).into_diagnostic(&interner);
        assert_eq!(diag.code, code);
        assert_eq!(diag.severity, Severity::Error);
    }
}

#[test]
fn conversion_warnings_name_the_loss() {
    let interner = StringInterner::new();
    let truncation = SemaWarning::new(
        span(3),
        SemaWarningKind::ImplicitConversion {
            from: Type::FLOAT,
            to: Type::INTEGER,
            loss: ConversionLoss::Truncation,
        },
    );
    let sign = SemaWarning::new(
        span(3),
        SemaWarningKind::ImplicitConversion {
            from: Type::INTEGER,
            to: Type::DWORD,
            loss: ConversionLoss::SignChange,
        },
    );

    let truncation = truncation.into_diagnostic(&interner);
    assert_eq!(truncation.code, ErrorCode::W2001);
    assert!(truncation.is_warning());
    assert_eq!(
        truncation.message,
        "implicit conversion from Float to Integer may truncate the value"
    );
    let sign = sign.into_diagnostic(&interner);
    assert_eq!(sign.code, ErrorCode::W2002);
    assert_eq!(
        sign.message,
        "implicit conversion from Integer to Dword changes signedness"
    );
}
