//! End-to-end run: text → document → resolution → render.

use serde::Serialize;
use tracing::warn;

use crate::document::PlotDocument;
use crate::error::{ParseResult, XycError, XycResult};
use crate::parser::parse_str;
use crate::render::{dispatch, OutputTarget, Renderer};
use crate::resolve::{resolve, DroppedSeries};
use crate::source::TabularSource;
use crate::validate::validate;

/// Parses and validates configuration text.
///
/// A missing `__end__` is only reported once the document is known to be
/// otherwise well formed.
pub fn load_document(input: &str, source_name: &str) -> ParseResult<PlotDocument> {
    let doc = validate(parse_str(input, source_name)?)?;
    if !doc.explicitly_terminated {
        warn!("{source_name} not explicitly terminated");
    }
    Ok(doc)
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// Series requests declared in the configuration.
    pub declared: usize,
    /// Series handed to the renderer.
    pub rendered: usize,
    /// Requests skipped for missing columns.
    pub dropped: Vec<DroppedSeries>,
    /// Whether the configuration ended with `__end__`.
    pub explicitly_terminated: bool,
}

/// Runs the whole pipeline for one configuration.
pub fn run<S, R>(
    input: &str,
    source_name: &str,
    source: &S,
    renderer: &R,
    output: OutputTarget,
) -> XycResult<RunReport>
where
    S: TabularSource + ?Sized,
    R: Renderer + ?Sized,
{
    let doc = load_document(input, source_name).map_err(|error| XycError::Parse {
        source_name: source_name.to_string(),
        error,
    })?;
    let resolution = resolve(&doc, source)?;
    if resolution.series.is_empty() {
        warn!("{source_name}: no series could be resolved");
    }

    let report = RunReport {
        declared: doc.series_count(),
        rendered: resolution.series.len(),
        dropped: resolution.dropped.clone(),
        explicitly_terminated: doc.explicitly_terminated,
    };
    dispatch(resolution, &doc.params, output, renderer)?;
    Ok(report)
}
