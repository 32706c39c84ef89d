//! Document parser.
//!
//! A small state machine, `AwaitingHeader -> Active -> Terminated`, fed one
//! [`LogicalLine`] at a time. All bookkeeping (which directives were seen,
//! where `__format__` was declared) lives on [`Parser`], so the machine can
//! be driven directly from tests without any file I/O.
//!
//! Directive recognition works on the whitespace-collapsed line. Only
//! `__params__` values are re-read from the raw text, since axis labels
//! and titles legitimately contain spaces.

use tracing::debug;

use crate::document::{FileEntry, FormatList, FormatSpec, GraphParams, ParsedDocument, SeriesRequest};
use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::grammar::{
    collapse_whitespace, split_optional_trailing, Directive, AUTO_FORMAT, CSV_SUFFIX, END, FILE,
    FORMAT, HEADER, MAJOR_SEPARATOR, MAX_FORMAT_LEN, MINOR_SEPARATOR, PARAMS, SERIES_SEPARATOR,
};
use crate::lexer::{LogicalLine, LogicalLines};

/// Parser states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// No `__xyc__` seen yet.
    AwaitingHeader,
    /// Inside the document body.
    Active,
    /// `__end__` accepted; nothing more is read.
    Terminated,
}

/// Whether the driver should keep feeding lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Feed the next line.
    Continue,
    /// The document is closed.
    Stop,
}

/// Incremental configuration parser.
#[derive(Debug, Clone)]
pub struct Parser {
    state: ParserState,
    source_name: String,
    document: ParsedDocument,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Creates a parser for an unnamed source.
    pub fn new() -> Self {
        Self::with_source_name("[no name]")
    }

    /// Creates a parser whose messages mention `name`.
    pub fn with_source_name(name: impl Into<String>) -> Self {
        Self {
            state: ParserState::AwaitingHeader,
            source_name: name.into(),
            document: ParsedDocument::default(),
        }
    }

    /// Current state.
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Document built so far.
    pub fn document(&self) -> &ParsedDocument {
        &self.document
    }

    /// Consumes one logical line.
    pub fn feed(&mut self, line: &LogicalLine) -> ParseResult<Step> {
        let lnum = line.last_line;
        self.document.last_line = lnum;

        if self.state == ParserState::Terminated {
            return Ok(Step::Stop);
        }

        let clean = collapse_whitespace(&line.text);
        if clean.is_empty() {
            return Ok(Step::Continue);
        }

        if self.state == ParserState::AwaitingHeader {
            if clean == HEADER {
                debug!(line = lnum, "configuration activated");
                self.state = ParserState::Active;
                return Ok(Step::Continue);
            }
            return Err(ParseError::at(lnum, ParseErrorKind::Activation));
        }

        if clean == HEADER {
            return Err(ParseError::syntax(
                lnum,
                format!("duplicate occurrence of {HEADER} in {}", self.source_name),
            ));
        }
        if clean == END {
            return self.close(lnum);
        }

        let parts: Vec<&str> = clean.split(MAJOR_SEPARATOR).collect();
        let token = parts[0];
        if token.is_empty() {
            return Err(ParseError::syntax(lnum, "missing directive token"));
        }
        let directive = Directive::from_token(token).ok_or_else(|| {
            ParseError::at(lnum, ParseErrorKind::IllegalToken(token.to_string()))
        })?;

        match directive {
            Directive::FileDecl => self.file_decl(&parts, lnum)?,
            Directive::Params => self.params(&parts, &line.text, lnum)?,
            Directive::Format => self.format(&parts, lnum)?,
            Directive::Header | Directive::End => {
                return Err(ParseError::syntax(
                    lnum,
                    format!("out of place {directive} encountered"),
                ));
            }
        }
        Ok(Step::Continue)
    }

    /// Ends the run and returns the (unvalidated) document.
    ///
    /// `physical_lines` is the number of raw lines read, used to tell an
    /// empty input from one that never declared itself.
    pub fn finish(self, physical_lines: usize) -> ParseResult<ParsedDocument> {
        match self.state {
            ParserState::AwaitingHeader if physical_lines == 0 => {
                Err(ParseError::unplaced(ParseErrorKind::EmptyFile {
                    source_name: self.source_name,
                }))
            }
            ParserState::AwaitingHeader => {
                Err(ParseError::at(physical_lines, ParseErrorKind::Activation))
            }
            ParserState::Active | ParserState::Terminated => Ok(self.document),
        }
    }

    fn close(&mut self, lnum: usize) -> ParseResult<Step> {
        let missing = if self.document.file_entries.is_empty() {
            Some(FILE)
        } else if self.document.params.is_none() {
            Some(PARAMS)
        } else if self.document.formats.is_none() {
            Some(FORMAT)
        } else {
            None
        };
        if let Some(token) = missing {
            return Err(ParseError::syntax(
                lnum,
                format!("premature incidence of {END} before {token}"),
            ));
        }
        debug!(line = lnum, "configuration terminated");
        self.document.explicitly_terminated = true;
        self.state = ParserState::Terminated;
        Ok(Step::Stop)
    }

    fn file_decl(&mut self, parts: &[&str], lnum: usize) -> ParseResult<()> {
        if parts.len() != 3 {
            return Err(ParseError::syntax(
                lnum,
                format!("expected 3 major tokens, {} received", parts.len()),
            ));
        }
        let (path, list) = (parts[1], parts[2]);
        if path.is_empty() || list.is_empty() {
            return Err(ParseError::syntax(
                lnum,
                "expected 3 major tokens, at least one empty",
            ));
        }
        if !path.ends_with(CSV_SUFFIX) {
            return Err(ParseError::syntax(
                lnum,
                format!("input file must be a {CSV_SUFFIX} file"),
            ));
        }

        let clauses = split_optional_trailing(list, MINOR_SEPARATOR);
        if clauses.iter().any(|c| c.is_empty()) {
            return Err(ParseError::syntax(
                lnum,
                format!("extraneous {MINOR_SEPARATOR}"),
            ));
        }
        if clauses.is_empty() {
            return Err(ParseError::syntax(lnum, "no series tokens"));
        }

        let series = clauses
            .into_iter()
            .map(|clause| series_clause(clause, lnum))
            .collect::<ParseResult<Vec<_>>>()?;

        debug!(line = lnum, path, series = series.len(), "file declared");
        self.document.file_entries.push(FileEntry {
            path: path.into(),
            series,
            line: lnum,
        });
        Ok(())
    }

    fn params(&mut self, parts: &[&str], raw: &str, lnum: usize) -> ParseResult<()> {
        if self.document.params.is_some() {
            return Err(ParseError::syntax(
                lnum,
                format!("duplicate {PARAMS} token encountered"),
            ));
        }
        let body = single_remainder(parts, lnum)?;
        let sets = split_optional_trailing(body, MINOR_SEPARATOR);
        match sets.len() {
            0 => return Err(ParseError::syntax(lnum, "missing graph params")),
            1 => {}
            _ => return Err(ParseError::syntax(lnum, "multiple sets of graph params")),
        }
        let count = sets[0].split(SERIES_SEPARATOR).count();
        if count != 3 {
            return Err(ParseError::syntax(
                lnum,
                format!("3 graph params expected, {count} received"),
            ));
        }

        // The collapsed text validated the shape; values come from the raw line.
        let raw_body = raw
            .split(MAJOR_SEPARATOR)
            .nth(1)
            .and_then(|rest| rest.split(MINOR_SEPARATOR).next())
            .unwrap_or_default();
        let mut fields = raw_body.split(SERIES_SEPARATOR).map(|f| f.trim().to_string());
        let params = GraphParams {
            x_label: fields.next().unwrap_or_default(),
            y_label: fields.next().unwrap_or_default(),
            title: fields.next().unwrap_or_default(),
        };
        debug!(line = lnum, ?params, "graph params set");
        self.document.params = Some(params);
        Ok(())
    }

    fn format(&mut self, parts: &[&str], lnum: usize) -> ParseResult<()> {
        if self.document.formats.is_some() {
            return Err(ParseError::syntax(
                lnum,
                format!("duplicate {FORMAT} token encountered"),
            ));
        }
        let body = single_remainder(parts, lnum)?;
        let sets = split_optional_trailing(body, MINOR_SEPARATOR);
        match sets.len() {
            0 => return Err(ParseError::syntax(lnum, "missing format params")),
            1 => {}
            _ => return Err(ParseError::syntax(lnum, "multiple sets of format params")),
        }

        let fields: Vec<&str> = sets[0].split(SERIES_SEPARATOR).collect();
        for field in &fields {
            if field.is_empty() {
                return Err(ParseError::graph_format(
                    lnum,
                    "non-empty format strings required",
                ));
            }
            if fields.len() > 1 && field.chars().count() > MAX_FORMAT_LEN {
                return Err(ParseError::graph_format(
                    lnum,
                    "format specifiers must be two characters or less",
                ));
            }
        }
        if let [only] = fields.as_slice() {
            if *only != AUTO_FORMAT && only.chars().count() > MAX_FORMAT_LEN {
                return Err(ParseError::graph_format(
                    lnum,
                    format!("non-'{AUTO_FORMAT}' format specifier must be two characters or less"),
                ));
            }
        }

        debug!(line = lnum, count = fields.len(), "format declared");
        self.document.formats = Some(FormatList {
            specs: fields.into_iter().map(FormatSpec::parse).collect(),
            line: lnum,
        });
        Ok(())
    }
}

/// Checks a `directive: remainder` line and returns the remainder.
fn single_remainder<'a>(parts: &[&'a str], lnum: usize) -> ParseResult<&'a str> {
    if parts.len() != 2 {
        return Err(ParseError::syntax(
            lnum,
            format!("expected 2 major tokens, {} received", parts.len()),
        ));
    }
    if parts[1].is_empty() {
        return Err(ParseError::syntax(
            lnum,
            "expected 2 major tokens, latter empty",
        ));
    }
    Ok(parts[1])
}

/// Parses `x,y` or `x,y,label`.
fn series_clause(clause: &str, lnum: usize) -> ParseResult<SeriesRequest> {
    let fields: Vec<&str> = clause.split(SERIES_SEPARATOR).collect();
    let (x, y, label) = match fields.as_slice() {
        [x, y] => (*x, *y, None),
        [x, y, label] => (*x, *y, Some(*label)),
        _ => {
            return Err(ParseError::syntax(
                lnum,
                format!("expected 2-3 series tokens, {} received", fields.len()),
            ));
        }
    };
    if x.is_empty() || y.is_empty() {
        return Err(ParseError::syntax(lnum, "empty column name in series"));
    }
    Ok(match label {
        Some(label) if !label.is_empty() => SeriesRequest::new(x, y, label),
        _ => SeriesRequest::unlabelled(x, y),
    })
}

/// Parses a sequence of physical lines into an unvalidated document.
pub fn parse_lines<I, S>(lines: I, source_name: &str) -> ParseResult<ParsedDocument>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    let mut logical = LogicalLines::new(lines);
    let mut parser = Parser::with_source_name(source_name);
    for line in logical.by_ref() {
        if parser.feed(&line?)? == Step::Stop {
            break;
        }
    }
    parser.finish(logical.physical_lines_read())
}

/// Parses configuration text into an unvalidated document.
pub fn parse_str(input: &str, source_name: &str) -> ParseResult<ParsedDocument> {
    parse_lines(input.lines(), source_name)
}
