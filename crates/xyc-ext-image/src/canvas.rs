//! Pixel-level drawing on an RGB buffer.

use image::{Rgb, RgbImage};

use crate::style::{LineStyle, Marker};

/// Data-space extent of everything drawn on a plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Smallest x.
    pub x_min: f64,
    /// Largest x.
    pub x_max: f64,
    /// Smallest y.
    pub y_min: f64,
    /// Largest y.
    pub y_max: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            x_min: 0.0,
            x_max: 1.0,
            y_min: 0.0,
            y_max: 1.0,
        }
    }
}

impl Bounds {
    /// Extent of all points where both coordinates are finite.
    ///
    /// Returns the unit square when no such point exists. A zero-width range
    /// is widened around its value.
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = (&'a [f64], &'a [f64])>,
    {
        let mut found: Option<Bounds> = None;
        for (xs, ys) in points {
            for (&x, &y) in xs.iter().zip(ys) {
                if !x.is_finite() || !y.is_finite() {
                    continue;
                }
                let b = found.get_or_insert(Bounds {
                    x_min: x,
                    x_max: x,
                    y_min: y,
                    y_max: y,
                });
                b.x_min = b.x_min.min(x);
                b.x_max = b.x_max.max(x);
                b.y_min = b.y_min.min(y);
                b.y_max = b.y_max.max(y);
            }
        }
        let Some(mut b) = found else {
            return Self::default();
        };
        (b.x_min, b.x_max) = widen(b.x_min, b.x_max);
        (b.y_min, b.y_max) = widen(b.y_min, b.y_max);
        b
    }
}

fn widen(lo: f64, hi: f64) -> (f64, f64) {
    if hi > lo {
        return (lo, hi);
    }
    let pad = if lo == 0.0 { 0.5 } else { lo.abs() * 0.05 };
    (lo - pad, hi + pad)
}

/// An image plus the mapping from data space to the plot frame.
pub struct Canvas {
    image: RgbImage,
    left: i64,
    top: i64,
    right: i64,
    bottom: i64,
    bounds: Bounds,
}

impl Canvas {
    /// Creates a filled canvas whose plot frame is inset by `margin`.
    pub fn new(width: u32, height: u32, margin: u32, background: Rgb<u8>, bounds: Bounds) -> Self {
        let image = RgbImage::from_pixel(width, height, background);
        let m = i64::from(margin);
        Self {
            image,
            left: m,
            top: m,
            right: i64::from(width) - 1 - m,
            bottom: i64::from(height) - 1 - m,
            bounds,
        }
    }

    /// Consumes the canvas.
    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Borrow of the pixel buffer.
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Maps a data point to pixel coordinates. `None` for non-finite input.
    pub fn to_pixel(&self, x: f64, y: f64) -> Option<(i64, i64)> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let b = &self.bounds;
        let fx = (x - b.x_min) / (b.x_max - b.x_min);
        let fy = (y - b.y_min) / (b.y_max - b.y_min);
        let px = self.left as f64 + fx * (self.right - self.left) as f64;
        let py = self.bottom as f64 - fy * (self.bottom - self.top) as f64;
        Some((px.round() as i64, py.round() as i64))
    }

    fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if x < 0 || y < 0 || x >= i64::from(self.image.width()) || y >= i64::from(self.image.height())
        {
            return;
        }
        self.image.put_pixel(x as u32, y as u32, color);
    }

    fn brush(&mut self, x: i64, y: i64, width: u32, color: Rgb<u8>) {
        let w = i64::from(width);
        let lo = -(w - 1) / 2;
        let hi = w / 2;
        for dy in lo..=hi {
            for dx in lo..=hi {
                self.put(x + dx, y + dy, color);
            }
        }
    }

    /// Bresenham segment. `step` carries the dash phase across segments so
    /// patterns stay continuous along a polyline.
    fn segment(
        &mut self,
        (mut x0, mut y0): (i64, i64),
        (x1, y1): (i64, i64),
        width: u32,
        color: Rgb<u8>,
        style: LineStyle,
        step: &mut u64,
    ) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            if pattern_on(style, *step) {
                self.brush(x0, y0, width, color);
            }
            *step += 1;
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Joins consecutive points. Non-finite points break the line.
    pub fn polyline(&mut self, xs: &[f64], ys: &[f64], width: u32, color: Rgb<u8>, style: LineStyle) {
        if style == LineStyle::None {
            return;
        }
        let mut step = 0u64;
        let mut prev = None;
        for (&x, &y) in xs.iter().zip(ys) {
            let here = self.to_pixel(x, y);
            if let (Some(a), Some(b)) = (prev, here) {
                self.segment(a, b, width, color, style, &mut step);
            } else if let (None, Some(b)) = (prev, here) {
                // Isolated points still leave a dot.
                self.brush(b.0, b.1, width, color);
            }
            prev = here;
        }
    }

    /// Draws `marker` at every finite point.
    pub fn markers(&mut self, xs: &[f64], ys: &[f64], size: u32, color: Rgb<u8>, marker: Marker) {
        for (&x, &y) in xs.iter().zip(ys) {
            if let Some((px, py)) = self.to_pixel(x, y) {
                self.marker(px, py, size, color, marker);
            }
        }
    }

    fn marker(&mut self, cx: i64, cy: i64, size: u32, color: Rgb<u8>, marker: Marker) {
        let r = i64::from(size);
        let mut step = 0;
        match marker {
            Marker::Point => self.brush(cx, cy, 2, color),
            Marker::Square => {
                for dy in -r..=r {
                    for dx in -r..=r {
                        self.put(cx + dx, cy + dy, color);
                    }
                }
            }
            Marker::Circle => {
                for dy in -r..=r {
                    for dx in -r..=r {
                        if dx * dx + dy * dy <= r * r {
                            self.put(cx + dx, cy + dy, color);
                        }
                    }
                }
            }
            Marker::TriangleUp | Marker::TriangleDown => {
                let dir = if marker == Marker::TriangleUp { 1 } else { -1 };
                // Apex at cy - dir*r, base at cy + dir*r.
                for row in 0..=2 * r {
                    let half = row / 2;
                    let y = cy - dir * r + dir * row;
                    for dx in -half..=half {
                        self.put(cx + dx, y, color);
                    }
                }
            }
            Marker::Plus => {
                let s = LineStyle::Solid;
                self.segment((cx - r, cy), (cx + r, cy), 1, color, s, &mut step);
                self.segment((cx, cy - r), (cx, cy + r), 1, color, s, &mut step);
            }
            Marker::Cross => {
                let s = LineStyle::Solid;
                self.segment((cx - r, cy - r), (cx + r, cy + r), 1, color, s, &mut step);
                self.segment((cx - r, cy + r), (cx + r, cy - r), 1, color, s, &mut step);
            }
            Marker::Star => {
                self.marker(cx, cy, size, color, Marker::Plus);
                self.marker(cx, cy, size, color, Marker::Cross);
            }
        }
    }

    /// Plot frame with `ticks` evenly spaced marks on each axis.
    pub fn frame(&mut self, ticks: u32, color: Rgb<u8>) {
        let (l, t, r, b) = (self.left, self.top, self.right, self.bottom);
        let mut step = 0;
        let solid = LineStyle::Solid;
        self.segment((l, t), (r, t), 1, color, solid, &mut step);
        self.segment((r, t), (r, b), 1, color, solid, &mut step);
        self.segment((r, b), (l, b), 1, color, solid, &mut step);
        self.segment((l, b), (l, t), 1, color, solid, &mut step);

        if ticks < 2 {
            return;
        }
        const TICK: i64 = 5;
        let n = i64::from(ticks) - 1;
        for i in 0..=n {
            let x = l + (r - l) * i / n;
            self.segment((x, b), (x, b + TICK), 1, color, solid, &mut step);
            let y = b - (b - t) * i / n;
            self.segment((l - TICK, y), (l, y), 1, color, solid, &mut step);
        }
    }
}

fn pattern_on(style: LineStyle, step: u64) -> bool {
    match style {
        LineStyle::Solid => true,
        LineStyle::Dashed => step % 12 < 8,
        LineStyle::Dotted => step % 4 < 2,
        LineStyle::None => false,
    }
}
