use odb_ir::SourceSpan;

use super::*;
use crate::ErrorCode;

const SOURCE: &str = "dim x as integer\nx = \"hello\"\n";

fn sample_diagnostic() -> Diagnostic {
    Diagnostic::error(ErrorCode::E2001)
        .with_message("Failed to convert STRING to INTEGER")
        .with_label(SourceSpan::on_line(2, 5, 11), "this expression")
        .with_secondary_label(SourceSpan::on_line(1, 5, 5), "declared here")
        .with_note("strings never convert to numbers")
        .with_suggestion("use val() to parse the string")
}

fn render(emitter_source: Option<&str>, mode: ColorMode) -> String {
    let mut output = Vec::new();
    {
        let mut emitter = TerminalEmitter::with_color_mode(&mut output, mode, false);
        if let Some(source) = emitter_source {
            emitter = emitter.with_source(source);
        }
        emitter.emit(&sample_diagnostic());
        emitter.flush();
    }
    String::from_utf8(output).unwrap()
}

#[test]
fn test_terminal_emitter_no_color() {
    let text = render(None, ColorMode::Never);
    assert!(text.starts_with("error[E2001]: Failed to convert STRING to INTEGER\n"));
    assert!(text.contains("  --> 2:5: this expression\n"));
    assert!(text.contains("  ::: 1:5: declared here\n"));
    assert!(text.contains("  = note: strings never convert to numbers\n"));
    assert!(text.contains("  = help: use val() to parse the string\n"));
    assert!(!text.contains("\x1b["));
}

#[test]
fn test_terminal_emitter_with_color() {
    let text = render(None, ColorMode::Always);
    assert!(text.contains("\x1b["));
    assert!(text.contains("E2001"));
}

#[test]
fn test_source_excerpts_follow_labels() {
    let text = render(Some(SOURCE), ColorMode::Never);
    assert!(text.contains("    2 | x = \"hello\"\n"));
    assert!(text.contains("    1 | dim x as integer\n"));
    let underline = text
        .lines()
        .find(|line| line.contains('^') && line.contains('~'))
        .unwrap();
    assert_eq!(underline.trim_end(), "      |     ^~~~~~~");
}

#[test]
fn test_emit_all_and_summary() {
    let mut output = Vec::new();
    {
        let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false);
        let diagnostics = vec![
            Diagnostic::error(ErrorCode::E2005).with_message("error 1"),
            Diagnostic::warning(ErrorCode::W2001).with_message("warning 1"),
        ];
        emitter.emit_all(&diagnostics);
        emitter.emit_summary(1, 1);
        emitter.emit_summary(0, 2);
        emitter.emit_summary(0, 0);
    }
    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("error[E2005]: error 1"));
    assert!(text.contains("warning[W2001]: warning 1"));
    assert!(text.contains("error: aborting due to previous error; 1 warning emitted\n"));
    assert!(text.ends_with("warning: 2 warnings emitted\n"));
}

#[test]
fn test_color_mode_resolution() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
}
