//! Format specifier interpretation.
//!
//! Supports the matplotlib shorthand subset that fits in two characters:
//! one colour letter, one marker, and one line style (`-`, `:`, or `--`).
//! A configuration file cannot carry `:`; dotted lines only come from
//! requests built in code.

use image::Rgb;
use xyc_core::document::FormatSpec;
use xyc_core::error::{RenderError, RenderResult};

/// Colour cycle used for `auto` and for specifiers without a colour letter.
pub const PALETTE: [[u8; 3]; 8] = [
    [31, 119, 180],
    [255, 127, 14],
    [44, 160, 44],
    [214, 39, 40],
    [148, 103, 189],
    [140, 86, 75],
    [227, 119, 194],
    [127, 127, 127],
];

/// How consecutive points are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Continuous stroke.
    Solid,
    /// `--`
    Dashed,
    /// `:`
    Dotted,
    /// Markers only.
    None,
}

/// Point marker shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// `.`
    Point,
    /// `o`
    Circle,
    /// `^`
    TriangleUp,
    /// `v`
    TriangleDown,
    /// `s`
    Square,
    /// `+`
    Plus,
    /// `x`
    Cross,
    /// `*`
    Star,
}

/// Fully resolved drawing style of one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesStyle {
    /// Stroke and marker colour.
    pub color: Rgb<u8>,
    /// Line style.
    pub line: LineStyle,
    /// Optional marker.
    pub marker: Option<Marker>,
}

fn color_for(c: char) -> Option<Rgb<u8>> {
    let rgb = match c {
        'b' => [0, 0, 255],
        'g' => [0, 128, 0],
        'r' => [255, 0, 0],
        'c' => [0, 191, 191],
        'm' => [191, 0, 191],
        'y' => [191, 191, 0],
        'k' => [0, 0, 0],
        'w' => [255, 255, 255],
        _ => return None,
    };
    Some(Rgb(rgb))
}

fn marker_for(c: char) -> Option<Marker> {
    Some(match c {
        '.' => Marker::Point,
        'o' => Marker::Circle,
        '^' => Marker::TriangleUp,
        'v' => Marker::TriangleDown,
        's' => Marker::Square,
        '+' => Marker::Plus,
        'x' => Marker::Cross,
        '*' => Marker::Star,
        _ => return None,
    })
}

fn palette(slot: usize) -> Rgb<u8> {
    Rgb(PALETTE[slot % PALETTE.len()])
}

fn invalid(spec: &str, reason: impl Into<String>) -> RenderError {
    RenderError::InvalidFormat {
        spec: spec.to_string(),
        reason: reason.into(),
    }
}

/// Resolves `spec` for the series drawn in `slot` (its position in the
/// render request, which drives the colour cycle).
pub fn series_style(spec: &FormatSpec, slot: usize) -> RenderResult<SeriesStyle> {
    let raw = match spec {
        FormatSpec::Auto => {
            return Ok(SeriesStyle {
                color: palette(slot),
                line: LineStyle::Solid,
                marker: None,
            })
        }
        FormatSpec::Explicit(raw) => raw.as_str(),
    };

    if raw == "--" {
        return Ok(SeriesStyle {
            color: palette(slot),
            line: LineStyle::Dashed,
            marker: None,
        });
    }

    let mut color = None;
    let mut line = None;
    let mut marker = None;
    for c in raw.chars() {
        if let Some(rgb) = color_for(c) {
            if color.replace(rgb).is_some() {
                return Err(invalid(raw, "more than one colour"));
            }
        } else if let Some(m) = marker_for(c) {
            if marker.replace(m).is_some() {
                return Err(invalid(raw, "more than one marker"));
            }
        } else {
            let style = match c {
                '-' => LineStyle::Solid,
                ':' => LineStyle::Dotted,
                _ => return Err(invalid(raw, format!("unrecognized character '{c}'"))),
            };
            if line.replace(style).is_some() {
                return Err(invalid(raw, "more than one line style"));
            }
        }
    }

    let line = match (line, marker) {
        (Some(style), _) => style,
        (None, Some(_)) => LineStyle::None,
        (None, None) => LineStyle::Solid,
    };
    Ok(SeriesStyle {
        color: color.unwrap_or_else(|| palette(slot)),
        line,
        marker,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explicit(s: &str) -> FormatSpec {
        FormatSpec::Explicit(s.to_string())
    }

    #[test]
    fn test_auto_cycles_palette() {
        let a = series_style(&FormatSpec::Auto, 0).unwrap();
        let b = series_style(&FormatSpec::Auto, 1).unwrap();
        assert_ne!(a.color, b.color);
        assert_eq!(series_style(&FormatSpec::Auto, 8).unwrap().color, a.color);
        assert_eq!(a.line, LineStyle::Solid);
    }

    #[test]
    fn test_color_and_marker() {
        let style = series_style(&explicit("r^"), 0).unwrap();
        assert_eq!(style.color, Rgb([255, 0, 0]));
        assert_eq!(style.marker, Some(Marker::TriangleUp));
        assert_eq!(style.line, LineStyle::None);
    }

    #[test]
    fn test_color_only_is_solid_line() {
        let style = series_style(&explicit("k"), 3).unwrap();
        assert_eq!(style.line, LineStyle::Solid);
        assert_eq!(style.marker, None);
    }

    #[test]
    fn test_line_styles() {
        assert_eq!(series_style(&explicit("--"), 0).unwrap().line, LineStyle::Dashed);
        assert_eq!(series_style(&explicit("b:"), 0).unwrap().line, LineStyle::Dotted);
        let style = series_style(&explicit("o-"), 2).unwrap();
        assert_eq!(style.line, LineStyle::Solid);
        assert_eq!(style.marker, Some(Marker::Circle));
        assert_eq!(style.color, Rgb(PALETTE[2]));
    }

    #[test]
    fn test_rejects_unknown_and_duplicates() {
        assert!(series_style(&explicit("q"), 0).is_err());
        assert!(series_style(&explicit("rb"), 0).is_err());
        assert!(series_style(&explicit("os"), 0).is_err());
        assert!(series_style(&explicit(":-"), 0).is_err());
    }
}
