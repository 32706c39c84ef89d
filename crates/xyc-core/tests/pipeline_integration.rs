//! Integration tests for xyc-core.
//!
//! These tests drive the full text → render path against in-memory tables
//! and a renderer that records what it was asked to draw.

use std::cell::RefCell;

use xyc_core::prelude::*;

// =============================================================================
// TEST FIXTURES
// =============================================================================

/// Renderer that keeps every request it receives.
#[derive(Default)]
struct RecordingRenderer {
    requests: RefCell<Vec<RenderRequest>>,
}

impl Renderer for RecordingRenderer {
    fn render(&self, request: &RenderRequest) -> RenderResult<()> {
        self.requests.borrow_mut().push(request.clone());
        Ok(())
    }
}

/// Renderer that always fails.
struct FailingRenderer;

impl Renderer for FailingRenderer {
    fn render(&self, request: &RenderRequest) -> RenderResult<()> {
        Err(RenderError::Write {
            path: request.output.path().to_path_buf(),
            reason: "disk full".into(),
        })
    }
}

fn rate_table() -> Table {
    Table::new()
        .with_column("t", [0.0, 0.25, 0.5, 0.75])
        .with_column("r", [0.030, 0.031, 0.029, 0.032])
}

const ROUND_TRIP: &str = "\
__xyc__
__file__: data.csv: t, r; t, q
__params__: Time, Rate, Paths
__format__: auto
__end__
";

// =============================================================================
// PARSING
// =============================================================================

#[test]
fn test_round_trip_document() {
    let doc = load_document(ROUND_TRIP, "rt.xyc").unwrap();
    assert_eq!(doc.file_entries.len(), 1);
    let series = &doc.file_entries[0].series;
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].label, "r");
    assert_eq!(series[1].label, "q");
    assert_eq!(doc.formats.cardinality(), 1);
    assert!(doc.explicitly_terminated);
}

#[test]
fn test_trailing_semicolons_are_optional() {
    let with = "__xyc__\n__file__: d.csv: t,r; t,q;\n__params__: a, b, c;\n__format__: r-, bo;\n";
    let without = "__xyc__\n__file__: d.csv: t,r; t,q\n__params__: a, b, c\n__format__: r-, bo\n";
    assert_eq!(
        load_document(with, "a.xyc").unwrap(),
        load_document(without, "b.xyc").unwrap()
    );
}

#[test]
fn test_continuation_with_comment_only_line() {
    let input = "__xyc__\n\
                 __file__: a.csv: x,y\\\n\
                 # comment\n  , label;\n\
                 __params__: , , \n\
                 __format__: auto\n\
                 __end__\n";
    let doc = load_document(input, "c.xyc").unwrap();
    assert_eq!(doc.file_entries.len(), 1);
    assert_eq!(
        doc.file_entries[0].series,
        vec![SeriesRequest::new("x", "y", "label")]
    );
}

#[test]
fn test_continuation_marker_followed_by_comment() {
    let input = "__xyc__\n\
                 __file__: a.csv: x,y; \\   # more below\n\
                 x,z\n\
                 __params__: a,b,c\n\
                 __format__: r, g\n";
    let doc = load_document(input, "c.xyc").unwrap();
    assert_eq!(doc.series_count(), 2);
    assert!(!doc.explicitly_terminated);
}

#[test]
fn test_format_cardinality_against_series_total() {
    let base = "__xyc__\n__file__: a.csv: x,y; x,z\n__params__: a,b,c\n";
    let err = load_document(&format!("{base}__format__: r, g, b\n__end__\n"), "f.xyc").unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::GraphFormat(_)));
    assert_eq!(err.line, Some(4));

    assert!(load_document(&format!("{base}__format__: r, g\n__end__\n"), "f.xyc").is_ok());

    let doc = load_document(&format!("{base}__format__: auto\n__end__\n"), "f.xyc").unwrap();
    assert!(doc.formats.is_broadcast());
}

#[test]
fn test_empty_and_premature_documents() {
    let err = load_document("", "empty.xyc").unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::EmptyFile { ref source_name } if source_name == "empty.xyc"));

    let err = load_document("__xyc__\n__end__\n", "p.xyc").unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::Syntax(ref m) if m.contains("premature")));
}

#[test]
fn test_colon_in_format_splits_directive() {
    let input = "__xyc__\n__file__: a.csv: x,y; x,z\n__params__: a,b,c\n__format__: r-, b:\n";
    let err = load_document(input, "c.xyc").unwrap_err();
    assert_eq!(err.line, Some(4));
    assert!(matches!(err.kind, ParseErrorKind::Syntax(ref m) if m == "expected 2 major tokens, 3 received"));
}

#[test]
fn test_duplicate_params_anywhere() {
    let input = "__xyc__\n__params__: a,b,c\n__file__: a.csv: x,y\n__format__: auto\n__params__: d,e,f\n";
    let err = load_document(input, "d.xyc").unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::Syntax(ref m) if m.contains("duplicate")));
    assert_eq!(err.line, Some(5));
}

// =============================================================================
// RESOLUTION AND DISPATCH
// =============================================================================

#[test]
fn test_run_drops_missing_column_and_keeps_alignment() {
    let input = "\
__xyc__
__file__: data.csv: t, r, run; t, missing; r, t, flipped
__params__: Time, Rate, Resolver
__format__: r-, g-, bo
__end__
";
    let source = MemorySource::new().with_table("data.csv", rate_table());
    let renderer = RecordingRenderer::default();
    let output = OutputTarget::new("plot.png").unwrap();

    let report = run(input, "res.xyc", &source, &renderer, output).unwrap();
    assert_eq!(report.declared, 3);
    assert_eq!(report.rendered, 2);
    assert_eq!(report.dropped.len(), 1);
    assert_eq!(report.dropped[0].index, 1);
    assert_eq!(report.dropped[0].missing, vec![(Axis::Y, "missing".to_string())]);

    let requests = renderer.requests.borrow();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.title, "Resolver");
    assert_eq!(request.x_label, "Time");
    assert_eq!(request.series[0].label, "run");
    assert_eq!(request.series[0].format.as_str(), "r-");
    assert_eq!(request.series[1].label, "flipped");
    assert_eq!(request.series[1].format.as_str(), "bo");
    assert_eq!(request.series[1].x_values, vec![0.030, 0.031, 0.029, 0.032]);
}

#[test]
fn test_run_with_no_resolvable_series_still_renders() {
    let input = "__xyc__\n__file__: data.csv: a, b\n__params__: , , \n__format__: auto\n__end__\n";
    let source = MemorySource::new().with_table("data.csv", rate_table());
    let renderer = RecordingRenderer::default();

    let report = run(input, "none.xyc", &source, &renderer, OutputTarget::default()).unwrap();
    assert_eq!(report.rendered, 0);
    let requests = renderer.requests.borrow();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].series.is_empty());
}

#[test]
fn test_run_fails_on_unreadable_table() {
    let input = "__xyc__\n__file__: gone.csv: t, r\n__params__: a,b,c\n__format__: auto\n";
    let renderer = RecordingRenderer::default();
    let err = run(input, "g.xyc", &MemorySource::new(), &renderer, OutputTarget::default())
        .unwrap_err();
    assert!(matches!(err, XycError::Source(SourceError::NotFound { .. })));
    assert!(renderer.requests.borrow().is_empty());
}

#[test]
fn test_run_reports_parse_errors_with_source_name() {
    let err = run(
        "__xyc__\n__bogus__: x\n",
        "bad.xyc",
        &MemorySource::new(),
        &RecordingRenderer::default(),
        OutputTarget::default(),
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "bad.xyc: line 2: encountered illegal token '__bogus__'"
    );
}

#[test]
fn test_render_failure_propagates() {
    let source = MemorySource::new().with_table("data.csv", rate_table());
    let err = run(ROUND_TRIP, "rt.xyc", &source, &FailingRenderer, OutputTarget::default())
        .unwrap_err();
    assert!(matches!(err, XycError::Render(RenderError::Write { .. })));
}

#[test]
fn test_render_request_serializes() {
    let source = MemorySource::new().with_table("data.csv", rate_table());
    let renderer = RecordingRenderer::default();
    run(ROUND_TRIP, "rt.xyc", &source, &renderer, OutputTarget::default()).unwrap();

    let json = serde_json::to_value(&renderer.requests.borrow()[0]).unwrap();
    assert_eq!(json["title"], "Paths");
    assert_eq!(json["series"][0]["format"], "auto");
    assert_eq!(json["output"]["kind"], "png");
}
