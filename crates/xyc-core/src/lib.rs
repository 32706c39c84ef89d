//! # XYC Core
//!
//! Configuration language and series resolution for batch XY plotting.
//!
//! A `.xyc` document names CSV files, the column pairs to plot from each,
//! graph labels, and line formats:
//!
//! ```text
//! __xyc__
//! # short rate paths
//! __file__: cir.csv: t, r1, path_1; \
//!                    t, r2, path_2
//! __params__: Time (years), Short rate, CIR paths
//! __format__: b-, r:
//! __end__
//! ```
//!
//! Data flows strictly forward:
//!
//! - [`lexer`] turns physical lines into logical lines
//! - [`parser`] runs the directive state machine
//! - [`validate`] checks completeness and format cardinality
//! - [`resolve`] matches requests against a [`TabularSource`]
//! - [`render`] hands the result to a [`Renderer`]
//!
//! ## Example
//!
//! ```rust
//! use xyc_core::prelude::*;
//!
//! let doc = load_document(
//!     "__xyc__\n__file__: a.csv: t, r\n__params__: t, r, demo\n__format__: auto\n__end__\n",
//!     "demo.xyc",
//! )
//! .unwrap();
//! assert_eq!(doc.series_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod resolve;
pub mod source;
pub mod validate;

pub use render::Renderer;
pub use source::TabularSource;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::document::{
        FileEntry, FormatList, FormatSpec, GraphParams, ParsedDocument, PlotDocument,
        SeriesRequest,
    };
    pub use crate::error::{
        ParseError, ParseErrorKind, ParseResult, RenderError, RenderResult, SourceError,
        SourceResult, XycError, XycResult,
    };
    pub use crate::lexer::{logical_lines, LogicalLine, LogicalLines};
    pub use crate::parser::{parse_lines, parse_str, Parser, ParserState};
    pub use crate::pipeline::{load_document, run, RunReport};
    pub use crate::render::{dispatch, ImageKind, OutputTarget, RenderRequest, Renderer};
    pub use crate::resolve::{resolve, Axis, DroppedSeries, Resolution, ResolvedSeries};
    pub use crate::source::{Cell, MemorySource, TabularSource, Table};
    pub use crate::validate::validate;
}
