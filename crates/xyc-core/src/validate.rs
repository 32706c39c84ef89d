//! Post-parse validation.
//!
//! A parsed document is usable only when it declares at least one file, one
//! `__params__` and one `__format__`, and when the format list either has a
//! single entry or one entry per series.

use tracing::debug;

use crate::document::{ParsedDocument, PlotDocument};
use crate::error::{ParseError, ParseResult};
use crate::grammar::{END, FILE, FORMAT, PARAMS};

/// Validates a parsed document and returns its complete form.
pub fn validate(doc: ParsedDocument) -> ParseResult<PlotDocument> {
    let ParsedDocument {
        file_entries,
        params,
        formats,
        explicitly_terminated,
        last_line,
    } = doc;

    if file_entries.is_empty() {
        return Err(premature_eof(FILE, last_line));
    }
    let params = params.ok_or_else(|| premature_eof(PARAMS, last_line))?;
    let formats = formats.ok_or_else(|| premature_eof(FORMAT, last_line))?;

    let total: usize = file_entries.iter().map(|e| e.series.len()).sum();
    check_cardinality(formats.cardinality(), total, formats.line)?;

    debug!(
        files = file_entries.len(),
        series = total,
        formats = formats.cardinality(),
        "configuration validated"
    );
    Ok(PlotDocument {
        file_entries,
        params,
        formats,
        explicitly_terminated,
    })
}

/// Checks that `formats` specifiers can be applied to `series` series.
pub fn check_cardinality(formats: usize, series: usize, line: usize) -> ParseResult<()> {
    if formats == 1 || formats == series {
        return Ok(());
    }
    Err(ParseError::graph_format(
        line,
        format!("1 or {series} graph format specifiers required, {formats} received"),
    ))
}

fn premature_eof(token: &str, line: usize) -> ParseError {
    ParseError::syntax(
        line,
        format!("premature end of input: no {token} before {END}"),
    )
}
