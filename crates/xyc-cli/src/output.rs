//! Output formatting utilities.

use std::io::Write;
use std::path::PathBuf;

use xyc_core::document::PlotDocument;
use xyc_core::error::{RenderError, RenderResult};
use xyc_core::grammar::END;
use xyc_core::render::{RenderRequest, Renderer};
use xyc_core::resolve::DroppedSeries;

/// Renderer that prints each request as pretty JSON on stdout.
#[derive(Debug, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, request: &RenderRequest) -> RenderResult<()> {
        let write_err = |reason: String| RenderError::Write {
            path: PathBuf::from("<stdout>"),
            reason,
        };
        let json = serde_json::to_string_pretty(request).map_err(|e| write_err(e.to_string()))?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{json}").map_err(|e| write_err(e.to_string()))
    }
}

/// Human-readable summary of a validated configuration.
pub fn document_summary(name: &str, doc: &PlotDocument) -> String {
    let formats = if doc.formats.is_broadcast() {
        format!("{} (all series)", doc.formats.specs[0].as_str())
    } else {
        format!("{} specifiers", doc.formats.cardinality())
    };
    let terminated = if doc.explicitly_terminated {
        "yes".to_string()
    } else {
        format!("no (missing {END})")
    };
    let mut out = format!("{name}: ok\n");
    out.push_str(&format!("  files:      {}\n", doc.file_entries.len()));
    for entry in &doc.file_entries {
        out.push_str(&format!(
            "    {} ({} series)\n",
            entry.path.display(),
            entry.series.len()
        ));
    }
    out.push_str(&format!("  series:     {}\n", doc.series_count()));
    out.push_str(&format!("  format:     {formats}\n"));
    out.push_str(&format!("  title:      {}\n", doc.params.title));
    out.push_str(&format!("  terminated: {terminated}"));
    out
}

/// One line per skipped series.
pub fn dropped_summary(dropped: &[DroppedSeries]) -> Vec<String> {
    dropped
        .iter()
        .map(|d| {
            let missing: Vec<&str> = d.missing.iter().map(|(_, name)| name.as_str()).collect();
            format!(
                "series {} ({}) from {} skipped: missing {}",
                d.index + 1,
                d.request.label,
                d.path.display(),
                missing.join(", ")
            )
        })
        .collect()
}
