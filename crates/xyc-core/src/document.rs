//! Parsed configuration model.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::grammar::AUTO_FORMAT;

/// One `(x, y, label)` triple declared under a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesRequest {
    /// Column holding x values.
    pub x_column: String,
    /// Column holding y values.
    pub y_column: String,
    /// Legend label; defaults to the y column.
    pub label: String,
}

impl SeriesRequest {
    /// Creates a request with an explicit label.
    pub fn new(
        x_column: impl Into<String>,
        y_column: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            x_column: x_column.into(),
            y_column: y_column.into(),
            label: label.into(),
        }
    }

    /// Creates a request labelled by its y column.
    pub fn unlabelled(x_column: impl Into<String>, y_column: impl Into<String>) -> Self {
        let y_column = y_column.into();
        Self {
            x_column: x_column.into(),
            label: y_column.clone(),
            y_column,
        }
    }
}

/// A `__file__` declaration: one CSV path and the series read from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// Path as written in the configuration (always ends in `.csv`).
    pub path: PathBuf,
    /// Requests in declaration order.
    pub series: Vec<SeriesRequest>,
    /// Line on which the declaration ended.
    pub line: usize,
}

impl FileEntry {
    /// Path of the referenced table.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Axis labels and title from `__params__`. Empty strings are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GraphParams {
    /// X axis label.
    pub x_label: String,
    /// Y axis label.
    pub y_label: String,
    /// Plot title.
    pub title: String,
}

/// A single format specifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormatSpec {
    /// Renderer picks colours and styles.
    Auto,
    /// Explicit shorthand of at most two characters, e.g. `r^` or `--`.
    Explicit(String),
}

impl FormatSpec {
    /// Classifies a raw token. `auto` becomes [`FormatSpec::Auto`].
    pub fn parse(token: &str) -> Self {
        if token == AUTO_FORMAT {
            FormatSpec::Auto
        } else {
            FormatSpec::Explicit(token.to_string())
        }
    }

    /// Source spelling.
    pub fn as_str(&self) -> &str {
        match self {
            FormatSpec::Auto => AUTO_FORMAT,
            FormatSpec::Explicit(s) => s,
        }
    }

    /// True for [`FormatSpec::Auto`].
    pub fn is_auto(&self) -> bool {
        matches!(self, FormatSpec::Auto)
    }
}

impl fmt::Display for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FormatSpec {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The `__format__` list and the line it was declared on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatList {
    /// Specifiers in declaration order; never empty.
    pub specs: Vec<FormatSpec>,
    /// Line of the `__format__` directive.
    pub line: usize,
}

impl FormatList {
    /// Number of declared specifiers.
    pub fn cardinality(&self) -> usize {
        self.specs.len()
    }

    /// True when a single specifier applies to every series.
    pub fn is_broadcast(&self) -> bool {
        self.specs.len() == 1
    }

    /// Specifier for the series at `global_index`.
    ///
    /// Broadcast lists return their only entry for every index.
    pub fn spec_for(&self, global_index: usize) -> Option<&FormatSpec> {
        if self.is_broadcast() {
            self.specs.first()
        } else {
            self.specs.get(global_index)
        }
    }
}

/// Output of the parser state machine, before validation.
///
/// Params and formats stay optional here; [`crate::validate::validate`]
/// turns a complete document into a [`PlotDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedDocument {
    /// File declarations in order.
    pub file_entries: Vec<FileEntry>,
    /// The single `__params__` record, if seen.
    pub params: Option<GraphParams>,
    /// The single `__format__` record, if seen.
    pub formats: Option<FormatList>,
    /// Whether `__end__` closed the document.
    pub explicitly_terminated: bool,
    /// Last physical line read.
    pub last_line: usize,
}

impl ParsedDocument {
    /// Total series requests across all file entries.
    pub fn series_count(&self) -> usize {
        self.file_entries.iter().map(|e| e.series.len()).sum()
    }

    /// True once every required directive has been seen.
    pub fn is_complete(&self) -> bool {
        !self.file_entries.is_empty() && self.params.is_some() && self.formats.is_some()
    }
}

/// A validated document, ready for resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlotDocument {
    /// File declarations in order; never empty.
    pub file_entries: Vec<FileEntry>,
    /// Axis labels and title.
    pub params: GraphParams,
    /// Format specifiers; cardinality 1 or [`Self::series_count`].
    pub formats: FormatList,
    /// Whether `__end__` closed the document.
    pub explicitly_terminated: bool,
}

impl PlotDocument {
    /// Total series requests across all file entries.
    pub fn series_count(&self) -> usize {
        self.file_entries.iter().map(|e| e.series.len()).sum()
    }

    /// Iterates `(global_index, entry, request)` in document order.
    pub fn indexed_series(&self) -> impl Iterator<Item = (usize, &FileEntry, &SeriesRequest)> {
        self.file_entries
            .iter()
            .flat_map(|entry| entry.series.iter().map(move |req| (entry, req)))
            .enumerate()
            .map(|(i, (entry, req))| (i, entry, req))
    }
}
