//! `--check`: parse and validate without touching data files.

use anyhow::Result;
use xyc_core::error::XycError;
use xyc_core::pipeline::load_document;

use crate::cli::Cli;
use crate::output::document_summary;

/// Validates the configuration and prints a summary.
pub fn execute(cli: &Cli) -> Result<()> {
    let text = super::read_config(&cli.config)?;
    let name = cli.config.display().to_string();
    let doc = load_document(&text, &name).map_err(|error| XycError::Parse {
        source_name: name.clone(),
        error,
    })?;
    println!("{}", document_summary(&name, &doc));
    Ok(())
}
