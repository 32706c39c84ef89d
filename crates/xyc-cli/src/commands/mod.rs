//! Command implementations.

pub mod check;
pub mod plot;

use std::path::Path;

use anyhow::{bail, Result};
use xyc_core::error::SourceError;
use xyc_core::grammar::CONFIG_SUFFIX;

/// Reads a configuration file after checking its suffix.
///
/// Open failures keep their not-found / permission / I/O classification.
pub fn read_config(path: &Path) -> Result<String> {
    let name = path.to_string_lossy();
    if !name.ends_with(CONFIG_SUFFIX) {
        bail!("configuration file must end with {CONFIG_SUFFIX}");
    }
    let text = std::fs::read_to_string(path).map_err(|e| SourceError::from_io(path, e))?;
    Ok(text)
}
