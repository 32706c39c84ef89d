//! Series resolution.
//!
//! Reconciles a validated document with the tables it references. Every
//! series request keeps its global index whether it resolves or not, so a
//! per-series format list stays aligned after a request is dropped.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, warn};

use crate::document::{FileEntry, FormatSpec, PlotDocument, SeriesRequest};
use crate::error::SourceResult;
use crate::source::{Cell, TabularSource, Table};

/// A series whose columns were found, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSeries {
    /// Global series index of the originating request.
    pub index: usize,
    /// X values; non-numeric cells are NaN.
    pub x_values: Vec<f64>,
    /// Y values; non-numeric cells are NaN.
    pub y_values: Vec<f64>,
    /// Legend label.
    pub label: String,
    /// Format selected for [`Self::index`].
    pub format: FormatSpec,
}

/// Which column of a request was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// The x column.
    X,
    /// The y column.
    Y,
}

/// A request skipped because its table lacks a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedSeries {
    /// Global series index of the request.
    pub index: usize,
    /// Path of the owning file entry.
    pub path: PathBuf,
    /// The request itself.
    pub request: SeriesRequest,
    /// Missing columns with the axis they were requested for.
    pub missing: Vec<(Axis, String)>,
}

/// Output of [`resolve`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Resolution {
    /// Resolved series in document order.
    pub series: Vec<ResolvedSeries>,
    /// Requests that were skipped.
    pub dropped: Vec<DroppedSeries>,
}

/// Resolves every series request of `doc` against `source`.
///
/// Each file entry's table is loaded once. Only a load failure is an error;
/// missing columns are reported in [`Resolution::dropped`].
pub fn resolve<S>(doc: &PlotDocument, source: &S) -> SourceResult<Resolution>
where
    S: TabularSource + ?Sized,
{
    let mut resolution = Resolution::default();
    let mut index = 0usize;

    for entry in &doc.file_entries {
        let table = source.load(entry.path())?;
        debug!(
            path = %entry.path.display(),
            columns = table.column_names().len(),
            rows = table.row_count(),
            "table loaded"
        );

        for request in &entry.series {
            match resolve_one(entry, request, &table, index) {
                Ok((x_values, y_values)) => {
                    let format = doc
                        .formats
                        .spec_for(index)
                        .cloned()
                        .unwrap_or(FormatSpec::Auto);
                    resolution.series.push(ResolvedSeries {
                        index,
                        x_values,
                        y_values,
                        label: request.label.clone(),
                        format,
                    });
                }
                Err(dropped) => resolution.dropped.push(dropped),
            }
            index += 1;
        }
    }

    Ok(resolution)
}

fn resolve_one(
    entry: &FileEntry,
    request: &SeriesRequest,
    table: &Table,
    index: usize,
) -> Result<(Vec<f64>, Vec<f64>), DroppedSeries> {
    let (x, y) = (
        table.column(&request.x_column),
        table.column(&request.y_column),
    );
    match (x, y) {
        (Some(x), Some(y)) => Ok((
            numeric(x, &request.x_column, entry),
            numeric(y, &request.y_column, entry),
        )),
        (x, y) => {
            let mut missing = Vec::new();
            if x.is_none() {
                warn!(
                    "no x column '{}' in {}",
                    request.x_column,
                    entry.path.display()
                );
                missing.push((Axis::X, request.x_column.clone()));
            }
            if y.is_none() {
                warn!(
                    "no y column '{}' in {}",
                    request.y_column,
                    entry.path.display()
                );
                missing.push((Axis::Y, request.y_column.clone()));
            }
            Err(DroppedSeries {
                index,
                path: entry.path.clone(),
                request: request.clone(),
                missing,
            })
        }
    }
}

fn numeric(cells: &[Cell], column: &str, entry: &FileEntry) -> Vec<f64> {
    let values: Vec<f64> = cells
        .iter()
        .map(|c| c.as_f64().unwrap_or(f64::NAN))
        .collect();
    let non_numeric = cells.iter().filter(|c| c.as_f64().is_none()).count();
    if non_numeric > 0 {
        warn!(
            "column '{}' in {} has {} non-numeric cell(s); plotted as gaps",
            column,
            entry.path.display(),
            non_numeric
        );
    }
    values
}
