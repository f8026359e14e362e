//! Source location spans.
//!
//! Spans are line/column ranges rather than byte ranges: the parser reports
//! positions the way BASIC programmers read them, and diagnostics print them
//! back verbatim. Lines and columns are 1-based and both ends are inclusive.

use std::fmt;

/// A range of source positions.
///
/// Layout: 16 bytes, four `u32` coordinates.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct SourceSpan {
    pub first_line: u32,
    pub last_line: u32,
    pub first_column: u32,
    pub last_column: u32,
}

impl SourceSpan {
    /// Placeholder for nodes synthesized without a source position.
    pub const DUMMY: SourceSpan = SourceSpan {
        first_line: 0,
        last_line: 0,
        first_column: 0,
        last_column: 0,
    };

    #[inline]
    pub const fn new(first_line: u32, first_column: u32, last_line: u32, last_column: u32) -> Self {
        SourceSpan {
            first_line,
            last_line,
            first_column,
            last_column,
        }
    }

    /// A span covering a single position.
    #[inline]
    pub const fn point(line: u32, column: u32) -> Self {
        Self::new(line, column, line, column)
    }

    /// A span on a single line.
    #[inline]
    pub const fn on_line(line: u32, first_column: u32, last_column: u32) -> Self {
        Self::new(line, first_column, line, last_column)
    }

    #[inline]
    pub const fn start(&self) -> (u32, u32) {
        (self.first_line, self.first_column)
    }

    #[inline]
    pub const fn end(&self) -> (u32, u32) {
        (self.last_line, self.last_column)
    }

    pub const fn is_dummy(&self) -> bool {
        self.first_line == 0 && self.last_line == 0
    }

    /// Smallest span containing both `self` and `other`.
    #[inline]
    #[must_use]
    pub fn union(self, other: SourceSpan) -> SourceSpan {
        if self.is_dummy() {
            return other;
        }
        if other.is_dummy() {
            return self;
        }
        let (first_line, first_column) = self.start().min(other.start());
        let (last_line, last_column) = self.end().max(other.end());
        SourceSpan {
            first_line,
            last_line,
            first_column,
            last_column,
        }
    }

    /// Whether `other` lies entirely within this span.
    pub fn contains_span(&self, other: SourceSpan) -> bool {
        self.start() <= other.start() && other.end() <= self.end()
    }

    /// Render the covered source lines with the covered columns underlined.
    ///
    /// ```text
    ///    3 | result = arr(2)
    ///      |          ^~~~~~
    /// ```
    ///
    /// Lines outside `source` are skipped, so a stale span renders as an
    /// empty string rather than failing.
    pub fn excerpt(&self, source: &str) -> String {
        if self.is_dummy() {
            return String::new();
        }
        let gutter = self.last_line.to_string().len();
        let mut out = String::new();

        for (idx, text) in source.lines().enumerate() {
            let Ok(line) = u32::try_from(idx + 1) else {
                break;
            };
            if line < self.first_line {
                continue;
            }
            if line > self.last_line {
                break;
            }

            let width = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
            let from = if line == self.first_line {
                self.first_column.max(1)
            } else {
                1
            };
            let to = if line == self.last_line {
                self.last_column.min(width.max(from))
            } else {
                width.max(from)
            };

            out.push_str(&format!("{line:>gutter$} | {text}\n"));
            out.push_str(&format!("{:>gutter$} | ", ""));
            for _ in 1..from {
                out.push(' ');
            }
            for col in from..=to {
                out.push(if line == self.first_line && col == from {
                    '^'
                } else {
                    '~'
                });
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Debug for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.first_line, self.first_column, self.last_line, self.last_column
        )
    }
}

/// Renders as `line:column`, the form used in diagnostic headers.
impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.first_line, self.first_column)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::SourceSpan;
    crate::static_assert_size!(SourceSpan, 16);
}

#[cfg(test)]
mod tests;
