//! # XYC Ext Image
//!
//! Raster [`Renderer`] that writes PNG or JPEG files with the `image` crate.
//!
//! Series are drawn in request order inside a framed plot area scaled to the
//! finite extent of all points. Format specifiers follow the matplotlib
//! shorthand (`r-`, `bo`, `k:`, `--`); `auto` cycles a fixed palette.
//! Labels, titles and legends are not rasterized.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod canvas;
pub mod settings;
pub mod style;

use image::ImageFormat;
use tracing::{debug, info};
use xyc_core::error::{RenderError, RenderResult};
use xyc_core::render::{ImageKind, RenderRequest, Renderer};

pub use canvas::{Bounds, Canvas};
pub use settings::RenderSettings;
pub use style::{series_style, LineStyle, Marker, SeriesStyle};

/// Draws render requests to image files.
#[derive(Debug, Clone, Default)]
pub struct RasterRenderer {
    settings: RenderSettings,
}

impl RasterRenderer {
    /// Creates a renderer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renderer after checking `settings`.
    pub fn with_settings(settings: RenderSettings) -> RenderResult<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// Active settings.
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Draws `request` into a canvas without writing it anywhere.
    pub fn draw(&self, request: &RenderRequest) -> RenderResult<Canvas> {
        request.validate()?;
        let styles = request
            .series
            .iter()
            .enumerate()
            .map(|(slot, s)| series_style(&s.format, slot))
            .collect::<RenderResult<Vec<_>>>()?;

        let bounds = Bounds::from_points(
            request
                .series
                .iter()
                .map(|s| (s.x_values.as_slice(), s.y_values.as_slice())),
        );
        let cfg = &self.settings;
        let mut canvas = Canvas::new(cfg.width, cfg.height, cfg.margin, cfg.background(), bounds);
        canvas.frame(cfg.ticks, cfg.foreground());

        for (series, style) in request.series.iter().zip(&styles) {
            debug!(label = %series.label, points = series.x_values.len(), ?style, "drawing series");
            canvas.polyline(
                &series.x_values,
                &series.y_values,
                cfg.line_width,
                style.color,
                style.line,
            );
            if let Some(marker) = style.marker {
                canvas.markers(
                    &series.x_values,
                    &series.y_values,
                    cfg.marker_size,
                    style.color,
                    marker,
                );
            }
        }
        Ok(canvas)
    }
}

impl Renderer for RasterRenderer {
    fn render(&self, request: &RenderRequest) -> RenderResult<()> {
        let canvas = self.draw(request)?;
        let path = request.output.path();
        let format = match request.output.kind() {
            ImageKind::Png => ImageFormat::Png,
            ImageKind::Jpeg => ImageFormat::Jpeg,
        };
        canvas
            .into_image()
            .save_with_format(path, format)
            .map_err(|e| RenderError::Write {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        info!(path = %path.display(), series = request.series.len(), "image written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xyc_core::document::{FormatSpec, GraphParams};
    use xyc_core::render::OutputTarget;
    use xyc_core::resolve::ResolvedSeries;

    fn series(format: FormatSpec) -> ResolvedSeries {
        ResolvedSeries {
            index: 0,
            x_values: vec![0.0, 1.0, 2.0, 3.0],
            y_values: vec![1.0, 3.0, 2.0, f64::NAN],
            label: "s".into(),
            format,
        }
    }

    fn request(series: Vec<ResolvedSeries>, output: OutputTarget) -> RenderRequest {
        RenderRequest::new(series, &GraphParams::default(), output)
    }

    #[test]
    fn test_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let out = OutputTarget::new(dir.path().join("plot.png")).unwrap();
        let req = request(vec![series(FormatSpec::Auto)], out);
        RasterRenderer::new().render(&req).unwrap();

        let img = image::open(dir.path().join("plot.png")).unwrap();
        assert_eq!((img.width(), img.height()), (800, 450));
    }

    #[test]
    fn test_writes_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let out = OutputTarget::new(dir.path().join("plot.jpg")).unwrap();
        let req = request(vec![series(FormatSpec::Explicit("ro".into()))], out);
        RasterRenderer::new().render(&req).unwrap();
        assert!(dir.path().join("plot.jpg").exists());
    }

    #[test]
    fn test_empty_request_draws_frame_only() {
        let dir = tempfile::tempdir().unwrap();
        let out = OutputTarget::new(dir.path().join("blank.png")).unwrap();
        let renderer = RasterRenderer::new();
        let canvas = renderer.draw(&request(vec![], out)).unwrap();
        let black = image::Rgb([0, 0, 0]);
        let m = renderer.settings().margin;
        assert_eq!(*canvas.image().get_pixel(m, m), black);
        assert_eq!(*canvas.image().get_pixel(400, 200), image::Rgb([255, 255, 255]));
    }

    #[test]
    fn test_bad_format_is_rejected_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never.png");
        let out = OutputTarget::new(&path).unwrap();
        let req = request(vec![series(FormatSpec::Explicit("zz".into()))], out);
        let err = RasterRenderer::new().render(&req).unwrap_err();
        assert!(matches!(err, RenderError::InvalidFormat { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_unwritable_target() {
        let dir = tempfile::tempdir().unwrap();
        let out = OutputTarget::new(dir.path().join("missing/dir/plot.png")).unwrap();
        let err = RasterRenderer::new().render(&request(vec![], out)).unwrap_err();
        assert!(matches!(err, RenderError::Write { .. }));
    }

    #[test]
    fn test_invalid_settings() {
        let settings = RenderSettings {
            height: 0,
            ..RenderSettings::default()
        };
        assert!(RasterRenderer::with_settings(settings).is_err());
    }
}
