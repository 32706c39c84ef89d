//! Tabular data source seam.
//!
//! The resolver only needs "path in, named columns out". Concrete sources
//! (CSV files, in-memory fixtures) implement [`TabularSource`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{SourceError, SourceResult};

/// A single cell as read from a table.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Parsed numeric value.
    Number(f64),
    /// Non-numeric text.
    Text(String),
    /// Empty field.
    Empty,
}

impl Cell {
    /// Classifies a raw field.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(v) => Cell::Number(v),
            Err(_) => Cell::Text(trimmed.to_string()),
        }
    }

    /// Numeric value, if any.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

/// Named columns of equal length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    columns: Vec<Vec<Cell>>,
}

impl Table {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<Cell>) {
        self.headers.push(name.into());
        self.columns.push(values);
    }

    /// Builder-style [`Self::push_column`] for numeric data.
    #[must_use]
    pub fn with_column(mut self, name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        self.push_column(name, values.into_iter().map(Cell::Number).collect());
        self
    }

    /// Column names in file order.
    pub fn column_names(&self) -> &[String] {
        &self.headers
    }

    /// True if a column called `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Cells of the first column called `name`.
    pub fn column(&self, name: &str) -> Option<&[Cell]> {
        let idx = self.headers.iter().position(|h| h == name)?;
        self.columns.get(idx).map(Vec::as_slice)
    }

    /// Number of rows (length of the longest column).
    pub fn row_count(&self) -> usize {
        self.columns.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Loads a table for a path named in the configuration.
///
/// Failing here is fatal for the whole run; a table that loads but lacks a
/// requested column is not an error at this level.
pub trait TabularSource {
    /// Loads the table at `path`.
    fn load(&self, path: &Path) -> SourceResult<Table>;
}

impl<T: TabularSource + ?Sized> TabularSource for &T {
    fn load(&self, path: &Path) -> SourceResult<Table> {
        (**self).load(path)
    }
}

/// In-memory source keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    tables: HashMap<PathBuf, Table>,
}

impl MemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `table` under `path`.
    #[must_use]
    pub fn with_table(mut self, path: impl Into<PathBuf>, table: Table) -> Self {
        self.tables.insert(path.into(), table);
        self
    }
}

impl TabularSource for MemorySource {
    fn load(&self, path: &Path) -> SourceResult<Table> {
        self.tables
            .get(path)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                path: path.to_path_buf(),
            })
    }
}
