//! Default command: resolve series and render them.

use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};
use xyc_core::pipeline::{run, RunReport};
use xyc_core::render::{OutputTarget, Renderer};
use xyc_ext_file::CsvTableSource;
use xyc_ext_image::RasterRenderer;

use crate::cli::Cli;
use crate::config::CliConfig;
use crate::output::{dropped_summary, JsonRenderer};

/// Runs the pipeline, drawing to an image or printing JSON for `--dry-run`.
pub fn execute(cli: &Cli) -> Result<()> {
    let text = super::read_config(&cli.config)?;
    let output = OutputTarget::new(&cli.output)?;
    let config = CliConfig::load(cli.settings.as_deref())?;

    let base_dir = cli.config.parent().unwrap_or_else(|| Path::new(""));
    let source = CsvTableSource::with_base_dir(base_dir);
    let name = cli.config.display().to_string();

    let report = if cli.dry_run {
        render_with(&text, &name, &source, &JsonRenderer, output)?
    } else {
        let renderer = RasterRenderer::with_settings(config.render)?;
        render_with(&text, &name, &source, &renderer, output)?
    };

    for line in dropped_summary(&report.dropped) {
        warn!("{line}");
    }
    info!(
        declared = report.declared,
        rendered = report.rendered,
        dropped = report.dropped.len(),
        "done"
    );
    Ok(())
}

fn render_with<R: Renderer>(
    text: &str,
    name: &str,
    source: &CsvTableSource,
    renderer: &R,
    output: OutputTarget,
) -> Result<RunReport> {
    Ok(run(text, name, source, renderer, output)?)
}
