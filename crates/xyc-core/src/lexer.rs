//! Line normalizer.
//!
//! Turns physical lines into logical lines: comments removed, trailing
//! whitespace trimmed, and `\` continuations joined. The order matters. A
//! physical line is always comment-stripped before it is trimmed and before
//! the continuation marker is looked for, so `x,y \  # note` still continues.

use crate::error::{ParseError, ParseResult};
use crate::grammar::{COMMENT, CONTINUATION};

/// One comment-free, continuation-joined unit of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// Joined text with source case and interior spacing preserved.
    pub text: String,
    /// 1-based number of the first physical line.
    pub first_line: usize,
    /// 1-based number of the last physical line consumed.
    pub last_line: usize,
}

impl LogicalLine {
    /// True when the line holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Strips the comment and trailing whitespace from one physical line.
pub fn clean_physical(line: &str) -> &str {
    let uncommented = match line.find(COMMENT) {
        Some(pos) => &line[..pos],
        None => line,
    };
    uncommented.trim_end()
}

/// Lazy iterator of [`LogicalLine`]s over any sequence of physical lines.
///
/// After yielding an error the iterator is fused and returns `None`.
pub struct LogicalLines<I> {
    lines: I,
    line_no: usize,
    failed: bool,
}

impl<I> LogicalLines<I> {
    /// Wraps a sequence of physical lines.
    pub fn new<S>(lines: I) -> Self
    where
        I: Iterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            lines,
            line_no: 0,
            failed: false,
        }
    }

    /// Number of physical lines consumed so far.
    pub fn physical_lines_read(&self) -> usize {
        self.line_no
    }
}

impl<I, S> LogicalLines<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    fn next_physical(&mut self) -> Option<S> {
        let line = self.lines.next()?;
        self.line_no += 1;
        Some(line)
    }

    fn continue_line(&mut self, mut joined: String) -> ParseResult<String> {
        loop {
            let Some(next) = self.next_physical() else {
                return Err(ParseError::syntax(
                    self.line_no,
                    "unexpected end of input while continuing a line",
                ));
            };
            let piece = clean_physical(next.as_ref());
            // Comment-only and blank lines do not end a continuation.
            if piece.is_empty() {
                continue;
            }
            match piece.strip_suffix(CONTINUATION) {
                Some(head) => joined.push_str(head),
                None => {
                    joined.push_str(piece);
                    return Ok(joined);
                }
            }
        }
    }
}

impl<I, S> Iterator for LogicalLines<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = ParseResult<LogicalLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let raw = self.next_physical()?;
        let first_line = self.line_no;
        let cleaned = clean_physical(raw.as_ref());

        let text = match cleaned.strip_suffix(CONTINUATION) {
            Some(head) => match self.continue_line(head.to_string()) {
                Ok(joined) => joined,
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            },
            None => cleaned.to_string(),
        };

        Some(Ok(LogicalLine {
            text,
            first_line,
            last_line: self.line_no,
        }))
    }
}

/// Convenience constructor over the lines of a string.
pub fn logical_lines(input: &str) -> LogicalLines<std::str::Lines<'_>> {
    LogicalLines::new(input.lines())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;

    fn collect(input: &str) -> Vec<LogicalLine> {
        logical_lines(input)
            .collect::<ParseResult<Vec<_>>>()
            .expect("normalizes")
    }

    #[test]
    fn test_comment_and_trailing_whitespace_removed() {
        let lines = collect("__xyc__   # header\n  __end__\t\n");
        assert_eq!(lines[0].text, "__xyc__");
        assert_eq!(lines[1].text, "  __end__");
    }

    #[test]
    fn test_full_comment_line_becomes_blank() {
        let lines = collect("# only a comment\n");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_blank());
    }

    #[test]
    fn test_continuation_joins_lines() {
        let lines = collect("__file__: a.csv: x,y; \\\n   x,z\nnext");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "__file__: a.csv: x,y;    x,z");
        assert_eq!(lines[0].first_line, 1);
        assert_eq!(lines[0].last_line, 2);
        assert_eq!(lines[1].first_line, 3);
    }

    #[test]
    fn test_comment_after_continuation_marker() {
        let lines = collect("a, b \\   # trailing note\n c");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "a, b  c");
    }

    #[test]
    fn test_multi_line_continuation() {
        let lines = collect("a\\\nb\\  # x\nc");
        assert_eq!(lines[0].text, "abc");
        assert_eq!(lines[0].last_line, 3);
    }

    #[test]
    fn test_comment_only_line_inside_continuation_is_skipped() {
        let lines = collect("x,y\\\n# comment\n  , label;");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "x,y  , label;");
        assert!(!lines[0].text.contains('#'));
    }

    #[test]
    fn test_eof_while_continuing_is_fatal() {
        let mut it = logical_lines("__xyc__\n__file__: a.csv: x,y \\\n# dangling");
        assert!(it.next().unwrap().is_ok());
        let err = it.next().unwrap().unwrap_err();
        assert_eq!(err.line, Some(3));
        assert!(matches!(err.kind, ParseErrorKind::Syntax(ref m) if m.contains("continuing")));
        assert!(it.next().is_none());
    }

    #[test]
    fn test_physical_line_count() {
        let mut it = logical_lines("a\\\nb\nc");
        while it.next().is_some() {}
        assert_eq!(it.physical_lines_read(), 3);

        let mut empty = logical_lines("");
        assert!(empty.next().is_none());
        assert_eq!(empty.physical_lines_read(), 0);
    }
}
