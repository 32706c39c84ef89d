//! Canvas settings.

use image::Rgb;
use serde::{Deserialize, Serialize};
use xyc_core::error::{RenderError, RenderResult};

const MAX_DIMENSION: u32 = 10_000;

/// Raster renderer settings. Every field has a default, so a settings file
/// only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Gap between the canvas edge and the plot frame.
    pub margin: u32,
    /// Stroke width of series lines.
    pub line_width: u32,
    /// Marker half-size in pixels.
    pub marker_size: u32,
    /// Tick marks per axis.
    pub ticks: u32,
    /// Background colour as `[r, g, b]`.
    pub background: [u8; 3],
    /// Frame and tick colour as `[r, g, b]`.
    pub foreground: [u8; 3],
}

impl Default for RenderSettings {
    fn default() -> Self {
        // 8 x 4.5 inches at 100 dpi.
        Self {
            width: 800,
            height: 450,
            margin: 48,
            line_width: 1,
            marker_size: 3,
            ticks: 5,
            background: [255, 255, 255],
            foreground: [0, 0, 0],
        }
    }
}

impl RenderSettings {
    /// Checks ranges before any drawing happens.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidSettings(
                "cannot have nonpositive dimension".into(),
            ));
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(RenderError::InvalidSettings(format!(
                "dimensions above {MAX_DIMENSION} pixels are not supported"
            )));
        }
        if self.margin.saturating_mul(2) >= self.width.min(self.height) {
            return Err(RenderError::InvalidSettings(
                "margin leaves no room for the plot".into(),
            ));
        }
        if !(1..=10).contains(&self.line_width) {
            return Err(RenderError::InvalidSettings(
                "line_width must be between 1 and 10".into(),
            ));
        }
        if !(1..=20).contains(&self.marker_size) {
            return Err(RenderError::InvalidSettings(
                "marker_size must be between 1 and 20".into(),
            ));
        }
        if self.ticks > 50 {
            return Err(RenderError::InvalidSettings(
                "ticks must be between 0 and 50".into(),
            ));
        }
        Ok(())
    }

    pub(crate) fn background(&self) -> Rgb<u8> {
        Rgb(self.background)
    }

    pub(crate) fn foreground(&self) -> Rgb<u8> {
        Rgb(self.foreground)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(RenderSettings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: RenderSettings = toml::from_str("width = 1024\nline_width = 2\n").unwrap();
        assert_eq!(settings.width, 1024);
        assert_eq!(settings.line_width, 2);
        assert_eq!(settings.height, 450);
    }

    #[test]
    fn test_invalid_ranges() {
        let zero = RenderSettings {
            width: 0,
            ..RenderSettings::default()
        };
        assert!(zero.validate().is_err());

        let crowded = RenderSettings {
            margin: 300,
            ..RenderSettings::default()
        };
        assert!(crowded.validate().is_err());

        let thick = RenderSettings {
            line_width: 0,
            ..RenderSettings::default()
        };
        assert!(thick.validate().is_err());
    }

    #[test]
    fn test_tick_count_is_bounded() {
        let none = RenderSettings {
            ticks: 0,
            ..RenderSettings::default()
        };
        assert!(none.validate().is_ok());

        let busy: RenderSettings = toml::from_str("ticks = 4000000000\n").unwrap();
        let err = busy.validate().unwrap_err();
        assert!(err.to_string().contains("ticks must be between 0 and 50"));
    }
}
