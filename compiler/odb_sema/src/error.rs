//! Semantic errors and warnings.
//!
//! Passes record a [`SemaError`] or [`SemaWarning`] carrying the data of the
//! problem; rendering to a [`Diagnostic`] happens once, with the interner at
//! hand.

use std::fmt::Write as _;
use std::sync::Arc;

use odb_commands::Command;
use odb_diagnostic::{Diagnostic, ErrorCode};
use odb_ir::{Annotation, ConversionLoss, Name, SourceSpan, StringInterner, Type, UnaryOpKind};

/// A name as written in source, sigil included.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct SymbolName {
    pub name: Name,
    pub annotation: Annotation,
}

impl SymbolName {
    pub const fn new(name: Name, annotation: Annotation) -> Self {
        SymbolName { name, annotation }
    }

    pub fn display(self, interner: &StringInterner) -> String {
        let mut out = interner.lookup(self.name).to_owned();
        if let Some(sigil) = self.annotation.sigil() {
            out.push(sigil);
        }
        out
    }
}

/// What kind of callee an arity error is about.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CalleeKind {
    Command,
    Function,
}

/// Semantic error data.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum SemaErrorKind {
    CannotConvert {
        from: Type,
        to: Type,
    },
    AlreadyDeclared {
        name: SymbolName,
        is_array: bool,
        previous_ty: Type,
        previous: SourceSpan,
    },
    UndeclaredArray {
        name: SymbolName,
    },
    ArgCountMismatch {
        callee: CalleeKind,
        name: String,
        /// Rendered parameter types, empty for parameterless callees.
        signature: String,
        expected: usize,
        found: usize,
    },
    UnknownFunction {
        name: Name,
    },
    UnknownCommand {
        name: Name,
    },
    NoMatchingOverload {
        name: Name,
        /// `None` for arguments whose type could not be determined.
        arg_types: Vec<Option<Type>>,
        overloads: Vec<Arc<Command>>,
    },
    NonNumericOperand {
        op: UnaryOpKind,
        ty: Type,
    },
    MissingInitializer {
        name: SymbolName,
    },
    InitializerListNotAllowed {
        ty: Type,
    },
    InitializerListLength {
        ty: Type,
        expected: usize,
        found: usize,
    },
    FieldOnNonUdt {
        field: SymbolName,
        ty: Type,
    },
    UnknownUdt {
        field: SymbolName,
        udt: Name,
    },
    UnknownField {
        field: SymbolName,
        udt: Name,
    },
    FieldArrayMismatch {
        field: SymbolName,
        udt: Name,
        /// Whether the declared field is the array side of the mismatch.
        field_is_array: bool,
    },
    AnnotatedUdt {
        name: SymbolName,
    },
    MisleadingCommandAnnotation {
        name: Name,
    },
    BitwiseNotSideEffects,
    LabelRedefined {
        name: Name,
        previous: SourceSpan,
    },
    LabelUndefined {
        name: Name,
    },
    MultipleDefaultCases {
        /// Every default case of the select, in source order.
        defaults: Vec<SourceSpan>,
    },
}

/// A semantic error at a source location.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct SemaError {
    pub span: SourceSpan,
    pub kind: SemaErrorKind,
}

/// Default-case ordinals named in notes before the rest are summarized.
const ORDINALS: [&str; 3] = ["first", "second", "third"];

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn type_list(types: &[Option<Type>], interner: &StringInterner) -> String {
    let mut out = String::new();
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        match ty {
            Some(ty) => {
                let _ = write!(out, "{}", ty.display(interner));
            }
            None => out.push('?'),
        }
    }
    out
}

impl SemaError {
    pub fn new(span: SourceSpan, kind: SemaErrorKind) -> Self {
        SemaError { span, kind }
    }

    pub fn code(&self) -> ErrorCode {
        match &self.kind {
            SemaErrorKind::CannotConvert { .. } => ErrorCode::E2001,
            SemaErrorKind::AlreadyDeclared { .. } => ErrorCode::E2002,
            SemaErrorKind::UndeclaredArray { .. } => ErrorCode::E2003,
            SemaErrorKind::ArgCountMismatch { .. } => ErrorCode::E2004,
            SemaErrorKind::UnknownFunction { .. } => ErrorCode::E2005,
            SemaErrorKind::UnknownCommand { .. } => ErrorCode::E2006,
            SemaErrorKind::NoMatchingOverload { .. } => ErrorCode::E2007,
            SemaErrorKind::NonNumericOperand { .. } => ErrorCode::E2008,
            SemaErrorKind::MissingInitializer { .. } => ErrorCode::E2009,
            SemaErrorKind::InitializerListNotAllowed { .. }
            | SemaErrorKind::InitializerListLength { .. } => ErrorCode::E2010,
            SemaErrorKind::FieldOnNonUdt { .. } => ErrorCode::E2011,
            SemaErrorKind::UnknownUdt { .. } => ErrorCode::E2012,
            SemaErrorKind::UnknownField { .. } => ErrorCode::E2013,
            SemaErrorKind::FieldArrayMismatch { .. } => ErrorCode::E2014,
            SemaErrorKind::AnnotatedUdt { .. } => ErrorCode::E2015,
            SemaErrorKind::MisleadingCommandAnnotation { .. } => ErrorCode::E2016,
            SemaErrorKind::BitwiseNotSideEffects => ErrorCode::E2017,
            SemaErrorKind::LabelRedefined { .. } => ErrorCode::E3001,
            SemaErrorKind::LabelUndefined { .. } => ErrorCode::E3002,
            SemaErrorKind::MultipleDefaultCases { .. } => ErrorCode::E3003,
        }
    }

    /// Render as a diagnostic.
    pub fn into_diagnostic(self, interner: &StringInterner) -> Diagnostic {
        let span = self.span;
        let diag = Diagnostic::error(self.code());
        match self.kind {
            SemaErrorKind::CannotConvert { from, to } => {
                let (from, to) = (from.display(interner), to.display(interner));
                diag.with_message(format!("Failed to convert {from} to {to}"))
                    .with_label(span, format!("this expression has type {from}"))
            }
            SemaErrorKind::AlreadyDeclared {
                name,
                is_array,
                previous_ty,
                previous,
            } => {
                let what = if is_array { "Array" } else { "Variable" };
                diag.with_message(format!(
                    "{what} '{}' has already been declared as type {}",
                    name.display(interner),
                    previous_ty.display(interner)
                ))
                .with_label(span, "declared again here")
                .with_secondary_label(previous, "see last declaration")
            }
            SemaErrorKind::UndeclaredArray { name } => {
                let name = name.display(interner);
                diag.with_message(format!("Array '{name}' does not exist in this scope"))
                    .with_label(span, "arrays are never declared implicitly")
                    .with_suggestion(format!("declare it first with `dim {name}(...)`"))
            }
            SemaErrorKind::ArgCountMismatch {
                callee,
                name,
                signature,
                expected,
                found,
            } => {
                let what = match callee {
                    CalleeKind::Command => "Command",
                    CalleeKind::Function => "Function",
                };
                let with_signature = if signature.is_empty() {
                    String::new()
                } else {
                    format!(" with signature '{signature}'")
                };
                let verb = if found == 1 { "was" } else { "were" };
                diag.with_message(format!(
                    "{what} '{name}'{with_signature} expects {expected} argument{}, but {found} {verb} provided",
                    plural(expected)
                ))
                .with_label(span, format!("expected {expected} argument{}", plural(expected)))
                .with_suggestion(if found > expected {
                    "remove extra arguments"
                } else {
                    "add missing arguments"
                })
            }
            SemaErrorKind::UnknownFunction { name } => diag
                .with_message(format!("Unknown function '{}'", interner.lookup(name)))
                .with_label(span, "no function with this name is declared"),
            SemaErrorKind::UnknownCommand { name } => diag
                .with_message(format!("Unknown command '{}'", interner.lookup(name)))
                .with_label(span, "not found in the command index"),
            SemaErrorKind::NoMatchingOverload {
                name,
                arg_types,
                overloads,
            } => {
                let mut diag = diag
                    .with_message(format!(
                        "Unable to find matching overload for command '{}' matching '{}'",
                        interner.lookup(name),
                        type_list(&arg_types, interner)
                    ))
                    .with_label(span, "no overload accepts these arguments");
                for overload in &overloads {
                    diag = diag.with_note(format!("... does not match '{overload}'"));
                }
                diag
            }
            SemaErrorKind::NonNumericOperand { op, ty } => diag
                .with_message(format!(
                    "The {} operator only works with numeric types",
                    op.description()
                ))
                .with_label(span, format!("operand has type {}", ty.display(interner))),
            SemaErrorKind::MissingInitializer { name } => diag
                .with_message(format!(
                    "An initializer must be provided for variable {}",
                    name.display(interner)
                ))
                .with_label(span, "declared without a value"),
            SemaErrorKind::InitializerListNotAllowed { ty } => diag
                .with_message(format!(
                    "An initializer list cannot be used to initialize a variable of type {}",
                    ty.display(interner)
                ))
                .with_label(span, "expected a single value"),
            SemaErrorKind::InitializerListLength {
                ty,
                expected,
                found,
            } => diag
                .with_message(format!(
                    "An initializer list must be of length {expected} to initialize a variable of type {}",
                    ty.display(interner)
                ))
                .with_label(span, format!("found {found} value{}", plural(found))),
            SemaErrorKind::FieldOnNonUdt { field, ty } => diag
                .with_message(format!(
                    "Attempting to access field '{}' from an expression of type {}",
                    field.display(interner),
                    ty.display(interner)
                ))
                .with_label(span, "not a UDT"),
            SemaErrorKind::UnknownUdt { field, udt } => diag
                .with_message(format!(
                    "Attempting to access field '{}' from an unknown UDT type '{}'",
                    field.display(interner),
                    interner.lookup(udt)
                ))
                .with_label(span, "UDT is not declared"),
            SemaErrorKind::UnknownField { field, udt } => diag
                .with_message(format!(
                    "Field '{}' does not exist in UDT '{}'",
                    field.display(interner),
                    interner.lookup(udt)
                ))
                .with_label(span, "unknown field"),
            SemaErrorKind::FieldArrayMismatch {
                field,
                udt,
                field_is_array,
            } => {
                let detail = if field_is_array {
                    "is an array, but no indices were provided"
                } else {
                    "is not an array, but indices were provided"
                };
                diag.with_message(format!(
                    "Field '{}' in UDT '{}' {detail}",
                    field.display(interner),
                    interner.lookup(udt)
                ))
                .with_label(span, "field used here")
            }
            SemaErrorKind::AnnotatedUdt { name } => diag
                .with_message("UDTs cannot be annotated")
                .with_label(
                    span,
                    format!("'{}' carries a type annotation", name.display(interner)),
                ),
            SemaErrorKind::MisleadingCommandAnnotation { name } => diag
                .with_message(
                    "Misleading command annotation: command returns a UDT, but UDTs cannot be annotated",
                )
                .with_label(
                    span,
                    format!("'{}' ends in a type annotation", interner.lookup(name)),
                ),
            SemaErrorKind::BitwiseNotSideEffects => diag
                .with_message("RHS of bitwise-not operator causes side effects")
                .with_label(span, "this operand is discarded"),
            SemaErrorKind::LabelRedefined { name, previous } => diag
                .with_message(format!("Label `{}` redefined", interner.lookup(name)))
                .with_label(span, "redefined here")
                .with_secondary_label(previous, "label previously defined here"),
            SemaErrorKind::LabelUndefined { name } => diag
                .with_message(format!("Label `{}` undefined", interner.lookup(name)))
                .with_label(span, "no such label"),
            SemaErrorKind::MultipleDefaultCases { defaults } => {
                let mut diag = diag
                    .with_message("select statement has multiple default cases")
                    .with_label(span, "in this select");
                for (ordinal, case) in ORDINALS.iter().zip(&defaults) {
                    diag = diag.with_secondary_label(
                        *case,
                        format!("{ordinal} default case defined here"),
                    );
                }
                let omitted = defaults.len().saturating_sub(ORDINALS.len());
                if omitted > 0 {
                    diag = diag.with_note(format!("{omitted} more default case(s) were omitted"));
                }
                diag
            }
        }
    }
}

/// Semantic warning data.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum SemaWarningKind {
    ImplicitConversion {
        from: Type,
        to: Type,
        loss: ConversionLoss,
    },
}

/// A semantic warning at a source location. Warnings never fail a pass.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct SemaWarning {
    pub span: SourceSpan,
    pub kind: SemaWarningKind,
}

impl SemaWarning {
    pub fn new(span: SourceSpan, kind: SemaWarningKind) -> Self {
        SemaWarning { span, kind }
    }

    pub fn code(&self) -> ErrorCode {
        match &self.kind {
            SemaWarningKind::ImplicitConversion { loss, .. } => match loss {
                ConversionLoss::Truncation => ErrorCode::W2001,
                ConversionLoss::SignChange => ErrorCode::W2002,
            },
        }
    }

    pub fn into_diagnostic(self, interner: &StringInterner) -> Diagnostic {
        let code = self.code();
        match self.kind {
            SemaWarningKind::ImplicitConversion { from, to, loss } => {
                let effect = match loss {
                    ConversionLoss::Truncation => "may truncate the value",
                    ConversionLoss::SignChange => "changes signedness",
                };
                Diagnostic::warning(code)
                    .with_message(format!(
                        "implicit conversion from {} to {} {effect}",
                        from.display(interner),
                        to.display(interner)
                    ))
                    .with_label(self.span, "converted here")
            }
        }
    }
}

#[cfg(test)]
mod tests;
