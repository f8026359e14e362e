use pretty_assertions::assert_eq;

use super::*;

#[test]
fn union_covers_both_spans() {
    let a = SourceSpan::on_line(1, 5, 9);
    let b = SourceSpan::on_line(3, 2, 4);
    let u = a.union(b);
    assert_eq!(u, SourceSpan::new(1, 5, 3, 4));
    assert!(u.contains_span(a));
    assert!(u.contains_span(b));
}

#[test]
fn union_is_commutative() {
    let a = SourceSpan::new(2, 7, 4, 1);
    let b = SourceSpan::new(1, 9, 2, 3);
    assert_eq!(a.union(b), b.union(a));
}

#[test]
fn union_on_same_line_compares_columns() {
    let a = SourceSpan::on_line(4, 10, 12);
    let b = SourceSpan::on_line(4, 3, 6);
    assert_eq!(a.union(b), SourceSpan::on_line(4, 3, 12));
}

#[test]
fn union_with_dummy_is_identity() {
    let a = SourceSpan::on_line(7, 1, 3);
    assert_eq!(a.union(SourceSpan::DUMMY), a);
    assert_eq!(SourceSpan::DUMMY.union(a), a);
}

#[test]
fn display_and_debug() {
    let span = SourceSpan::new(3, 10, 3, 15);
    assert_eq!(span.to_string(), "3:10");
    assert_eq!(format!("{span:?}"), "3:10-3:15");
}

#[test]
fn excerpt_single_line() {
    let source = "x = 1\nresult = arr(2)\n";
    let span = SourceSpan::on_line(2, 10, 15);
    assert_eq!(
        span.excerpt(source),
        "2 | result = arr(2)\n  |          ^~~~~~\n"
    );
}

#[test]
fn excerpt_multiple_lines() {
    let source = "if a\n  b\nendif\n";
    let span = SourceSpan::new(1, 1, 3, 5);
    assert_eq!(
        span.excerpt(source),
        "1 | if a\n  | ^~~~\n2 |   b\n  | ~~~\n3 | endif\n  | ~~~~~\n"
    );
}

#[test]
fn excerpt_out_of_range_is_empty() {
    let span = SourceSpan::on_line(40, 1, 2);
    assert_eq!(span.excerpt("one line"), "");
    assert_eq!(SourceSpan::DUMMY.excerpt("one line"), "");
}
