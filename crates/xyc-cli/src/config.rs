//! Settings file loading.
//!
//! ```toml
//! [render]
//! width = 1024
//! height = 576
//! line_width = 2
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;
use xyc_ext_image::RenderSettings;

/// Contents of a settings file. Missing tables and keys take defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Raster renderer settings.
    pub render: RenderSettings,
}

impl CliConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read settings file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("invalid settings file {}", path.display()))?;
        config
            .render
            .validate()
            .with_context(|| format!("invalid settings file {}", path.display()))?;
        debug!(path = %path.display(), ?config, "settings loaded");
        Ok(config)
    }

    /// Loads `path` if given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}
