//! # XYC Ext File
//!
//! CSV-backed [`TabularSource`] for resolving series requests.
//!
//! The first record is the header row; every later field is classified as a
//! number, text, or empty [`Cell`]. Ragged rows and invalid UTF-8 are
//! reported as [`SourceError::Malformed`].

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use xyc_core::error::{SourceError, SourceResult};
use xyc_core::source::{Cell, TabularSource, Table};

/// Loads tables from CSV files on disk.
#[derive(Debug, Clone, Default)]
pub struct CsvTableSource {
    base_dir: Option<PathBuf>,
}

impl CsvTableSource {
    /// Creates a source that opens paths as given.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source that resolves relative paths against `dir`.
    pub fn with_base_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(dir.into()),
        }
    }

    /// Path that [`TabularSource::load`] will actually open.
    pub fn full_path(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl TabularSource for CsvTableSource {
    fn load(&self, path: &Path) -> SourceResult<Table> {
        let full = self.full_path(path);
        let file = File::open(&full).map_err(|e| SourceError::from_io(&full, e))?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| csv_error(&full, e))?
            .clone();
        if headers.is_empty() {
            return Err(SourceError::Malformed {
                path: full,
                reason: "no header row".into(),
            });
        }

        let mut seen = HashSet::new();
        for name in &headers {
            if !seen.insert(name) {
                warn!(
                    "duplicate column '{}' in {}; using the first",
                    name,
                    full.display()
                );
            }
        }

        let mut columns: Vec<Vec<Cell>> = vec![Vec::new(); headers.len()];
        for record in reader.records() {
            let record = record.map_err(|e| csv_error(&full, e))?;
            for (column, field) in columns.iter_mut().zip(record.iter()) {
                column.push(Cell::parse(field));
            }
        }

        let mut table = Table::new();
        for (name, values) in headers.iter().zip(columns) {
            table.push_column(name, values);
        }
        debug!(
            path = %full.display(),
            columns = headers.len(),
            rows = table.row_count(),
            "csv loaded"
        );
        Ok(table)
    }
}

fn csv_error(path: &Path, err: csv::Error) -> SourceError {
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io) => SourceError::from_io(path, io),
        _ => SourceError::Malformed {
            path: path.to_path_buf(),
            reason,
        },
    }
}
