//! Error types for the XYC pipeline.
//!
//! Parsing and validation share a single [`ParseError`] carrying the line
//! where the problem was detected and a [`ParseErrorKind`] discriminant.
//! Loading tables and rendering have their own error types so callers can
//! tell a broken configuration apart from an unreadable data file or a failed
//! image write. [`XycError`] aggregates all of them for the end-to-end run.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized Result type for parsing and validation.
pub type ParseResult<T> = Result<T, ParseError>;

/// A specialized Result type for tabular source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// A specialized Result type for rendering.
pub type RenderResult<T> = Result<T, RenderError>;

/// A specialized Result type for a whole pipeline run.
pub type XycResult<T> = Result<T, XycError>;

// =============================================================================
// PARSE ERRORS
// =============================================================================

/// The kind of failure raised while parsing or validating a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The configuration contained no lines at all.
    #[error("configuration {source_name} is empty")]
    EmptyFile {
        /// Name of the configuration source.
        source_name: String,
    },

    /// Content appeared before the `__xyc__` header, or the header never did.
    #[error("missing __xyc__")]
    Activation,

    /// A leading directive token that is not part of the grammar.
    #[error("encountered illegal token '{0}'")]
    IllegalToken(String),

    /// Generic grammar violation.
    #[error("{0}")]
    Syntax(String),

    /// Format specifier count or length violation.
    #[error("{0}")]
    GraphFormat(String),
}

/// Error raised by the line normalizer, the parser, or the validator.
///
/// Parsing never recovers: the first error aborts the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ParseError {
    /// 1-based line number where the error was detected, if known.
    pub line: Option<usize>,
    /// What went wrong.
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Creates an error at a known line.
    pub fn at(line: usize, kind: ParseErrorKind) -> Self {
        Self {
            line: Some(line),
            kind,
        }
    }

    /// Creates an error whose line is unknown.
    pub fn unplaced(kind: ParseErrorKind) -> Self {
        Self { line: None, kind }
    }

    /// Generic grammar violation at `line`.
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::at(line, ParseErrorKind::Syntax(message.into()))
    }

    /// Format specifier violation at `line`.
    pub fn graph_format(line: usize, message: impl Into<String>) -> Self {
        Self::at(line, ParseErrorKind::GraphFormat(message.into()))
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.kind),
            None => write!(f, "line unknown: {}", self.kind),
        }
    }
}

// =============================================================================
// SOURCE ERRORS
// =============================================================================

/// Failure to load a referenced table. Always fatal for the run.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The file does not exist.
    #[error("file {} not found", path.display())]
    NotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The file exists but could not be opened.
    #[error("error accessing file {}", path.display())]
    PermissionDenied {
        /// Path that was requested.
        path: PathBuf,
    },

    /// Any other I/O failure while reading.
    #[error("error reading file {}: {source}", path.display())]
    Io {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not a well-formed table.
    #[error("malformed table in {}: {reason}", path.display())]
    Malformed {
        /// Path that was requested.
        path: PathBuf,
        /// Description of the problem.
        reason: String,
    },
}

impl SourceError {
    /// Classifies an I/O error for `path`.
    pub fn from_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => SourceError::NotFound { path },
            std::io::ErrorKind::PermissionDenied => SourceError::PermissionDenied { path },
            _ => SourceError::Io { path, source: err },
        }
    }
}

// =============================================================================
// RENDER ERRORS
// =============================================================================

/// Failure raised by render dispatch or a renderer. Never retried.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Output target suffix is not one of the supported image types.
    #[error("output file must be one of the following: {supported}")]
    UnsupportedOutput {
        /// The rejected target.
        target: String,
        /// Human-readable list of accepted suffixes.
        supported: String,
    },

    /// A series has x and y sequences of different lengths.
    #[error("x and y series of '{label}' must have same length ({x_len} vs {y_len})")]
    LengthMismatch {
        /// Series label.
        label: String,
        /// Number of x values.
        x_len: usize,
        /// Number of y values.
        y_len: usize,
    },

    /// A format specifier the renderer cannot interpret.
    #[error("invalid format specifier '{spec}': {reason}")]
    InvalidFormat {
        /// Offending specifier.
        spec: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Renderer settings are out of range.
    #[error("invalid render settings: {0}")]
    InvalidSettings(String),

    /// Writing the output failed.
    #[error("failed to write {}: {reason}", path.display())]
    Write {
        /// Output path.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },
}

// =============================================================================
// PIPELINE ERROR
// =============================================================================

/// Any fatal error of an end-to-end run.
#[derive(Debug, Error)]
pub enum XycError {
    /// Configuration could not be parsed or validated.
    #[error("{source_name}: {error}")]
    Parse {
        /// Name of the configuration source.
        source_name: String,
        /// The parse failure.
        #[source]
        error: ParseError,
    },

    /// A referenced table could not be loaded.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The renderer failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}
