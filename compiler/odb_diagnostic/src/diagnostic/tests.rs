use pretty_assertions::assert_eq;

use super::*;

fn span(line: u32, first: u32, last: u32) -> SourceSpan {
    SourceSpan::on_line(line, first, last)
}

#[test]
fn test_diagnostic_builder() {
    let diag = Diagnostic::error(ErrorCode::E2002)
        .with_message("variable 'x' already declared")
        .with_label(span(4, 5, 5), "redeclared here")
        .with_secondary_label(span(1, 5, 5), "See last declaration")
        .with_note("some context")
        .with_suggestion("rename one of them");

    assert_eq!(diag.code, ErrorCode::E2002);
    assert!(diag.is_error());
    assert!(!diag.is_warning());
    assert_eq!(diag.labels.len(), 2);
    assert!(diag.labels[0].is_primary);
    assert!(!diag.labels[1].is_primary);
    assert_eq!(diag.notes.len(), 1);
    assert_eq!(diag.suggestions.len(), 1);
}

#[test]
fn test_primary_span_skips_secondary_labels() {
    let diag = Diagnostic::warning(ErrorCode::W2001)
        .with_secondary_label(span(1, 1, 3), "context")
        .with_label(span(2, 4, 9), "here");
    assert!(diag.is_warning());
    assert_eq!(diag.primary_span(), Some(span(2, 4, 9)));

    let bare = Diagnostic::error(ErrorCode::E9001);
    assert_eq!(bare.primary_span(), None);
}

#[test]
fn test_display_lists_labels_and_notes() {
    let diag = Diagnostic::error(ErrorCode::E3003)
        .with_message("multiple default cases")
        .with_label(span(3, 1, 6), "in this select")
        .with_secondary_label(span(5, 3, 9), "first default case")
        .with_note("1 more default case was omitted");

    assert_eq!(
        diag.to_string(),
        "error [E3003]: multiple default cases\n  \
         --> 3:1: in this select\n      \
         5:3: first default case\n  \
         = note: 1 more default case was omitted"
    );
}

#[test]
fn test_too_many_errors() {
    let diag = too_many_errors(10, span(40, 1, 2));
    assert_eq!(diag.code, ErrorCode::E9002);
    assert!(diag.message.contains("10"));
    assert_eq!(diag.primary_span(), Some(span(40, 1, 2)));
}
