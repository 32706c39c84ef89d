//! Render dispatch.
//!
//! The only side effect of a run: resolved series and graph parameters are
//! packaged into a [`RenderRequest`] and handed to a [`Renderer`] once.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::document::{FormatSpec, GraphParams};
use crate::error::{RenderError, RenderResult};
use crate::grammar::MAX_FORMAT_LEN;
use crate::resolve::{Resolution, ResolvedSeries};

/// Image suffixes accepted as output targets.
pub const IMAGE_SUFFIXES: [&str; 2] = [".jpg", ".png"];

/// Output file used when none is given.
pub const DEFAULT_OUTPUT: &str = "xy_graph.png";

/// Encoded image type of an output target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    /// `.png`
    Png,
    /// `.jpg`
    Jpeg,
}

/// A validated output path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputTarget {
    path: PathBuf,
    kind: ImageKind,
}

impl OutputTarget {
    /// Accepts `path` if its suffix is one of [`IMAGE_SUFFIXES`].
    pub fn new(path: impl Into<PathBuf>) -> RenderResult<Self> {
        let path = path.into();
        let kind = match path.extension().and_then(|e| e.to_str()) {
            Some("png") => ImageKind::Png,
            Some("jpg") => ImageKind::Jpeg,
            _ => {
                return Err(RenderError::UnsupportedOutput {
                    target: path.display().to_string(),
                    supported: IMAGE_SUFFIXES.join(", "),
                })
            }
        };
        Ok(Self { path, kind })
    }

    /// Output path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Image type implied by the suffix.
    pub fn kind(&self) -> ImageKind {
        self.kind
    }
}

impl Default for OutputTarget {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT),
            kind: ImageKind::Png,
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Everything a renderer receives.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderRequest {
    /// Series to draw, in document order.
    pub series: Vec<ResolvedSeries>,
    /// X axis label.
    pub x_label: String,
    /// Y axis label.
    pub y_label: String,
    /// Plot title.
    pub title: String,
    /// Where to write the image.
    pub output: OutputTarget,
}

impl RenderRequest {
    /// Packages resolved series with graph parameters.
    pub fn new(series: Vec<ResolvedSeries>, params: &GraphParams, output: OutputTarget) -> Self {
        Self {
            series,
            x_label: params.x_label.clone(),
            y_label: params.y_label.clone(),
            title: params.title.clone(),
            output,
        }
    }

    /// Checks the structural contract renderers rely on.
    ///
    /// Every series has matching x and y lengths and every explicit format is
    /// one or two characters.
    pub fn validate(&self) -> RenderResult<()> {
        for s in &self.series {
            if s.x_values.len() != s.y_values.len() {
                return Err(RenderError::LengthMismatch {
                    label: s.label.clone(),
                    x_len: s.x_values.len(),
                    y_len: s.y_values.len(),
                });
            }
            if let FormatSpec::Explicit(spec) = &s.format {
                let len = spec.chars().count();
                if len == 0 || len > MAX_FORMAT_LEN {
                    return Err(RenderError::InvalidFormat {
                        spec: spec.clone(),
                        reason: "must be one or two characters".into(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Rendering collaborator.
pub trait Renderer {
    /// Draws `request`. Failures are fatal and never retried.
    fn render(&self, request: &RenderRequest) -> RenderResult<()>;
}

impl<T: Renderer + ?Sized> Renderer for &T {
    fn render(&self, request: &RenderRequest) -> RenderResult<()> {
        (**self).render(request)
    }
}

/// Hands the resolved series to `renderer` in a single call.
///
/// An empty resolution still reaches the renderer.
pub fn dispatch<R>(
    resolution: Resolution,
    params: &GraphParams,
    output: OutputTarget,
    renderer: &R,
) -> RenderResult<()>
where
    R: Renderer + ?Sized,
{
    let request = RenderRequest::new(resolution.series, params, output);
    info!(
        series = request.series.len(),
        title = %request.title,
        x_label = %request.x_label,
        y_label = %request.y_label,
        output = %request.output,
        "rendering"
    );
    renderer.render(&request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_suffixes() {
        assert_eq!(OutputTarget::new("out.png").unwrap().kind(), ImageKind::Png);
        assert_eq!(OutputTarget::new("dir/out.jpg").unwrap().kind(), ImageKind::Jpeg);
        assert!(OutputTarget::new("out.gif").is_err());
        assert!(OutputTarget::new("out.PNG").is_err());
        assert!(OutputTarget::new("out").is_err());
    }

    #[test]
    fn test_default_output() {
        let target = OutputTarget::default();
        assert_eq!(target.path(), Path::new("xy_graph.png"));
    }

    #[test]
    fn test_validate_lengths() {
        let request = RenderRequest {
            series: vec![ResolvedSeries {
                index: 0,
                x_values: vec![1.0, 2.0],
                y_values: vec![1.0],
                label: "bad".into(),
                format: FormatSpec::Auto,
            }],
            x_label: String::new(),
            y_label: String::new(),
            title: String::new(),
            output: OutputTarget::default(),
        };
        assert!(matches!(
            request.validate(),
            Err(RenderError::LengthMismatch { x_len: 2, y_len: 1, .. })
        ));
    }

    #[test]
    fn test_validate_format_length() {
        let request = RenderRequest {
            series: vec![ResolvedSeries {
                index: 0,
                x_values: vec![],
                y_values: vec![],
                label: "s".into(),
                format: FormatSpec::Explicit("r--".into()),
            }],
            x_label: String::new(),
            y_label: String::new(),
            title: String::new(),
            output: OutputTarget::default(),
        };
        assert!(matches!(request.validate(), Err(RenderError::InvalidFormat { .. })));
    }
}
