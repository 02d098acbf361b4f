//! Vector overlay rendering.
//!
//! Each sample becomes a line segment anchored at its pixel. Plots put the y
//! axis upward while raster rows grow downward, so a sample `(u, v)` is drawn
//! towards `(x + u·len, y − v·len)`.

use crate::sampling::{sample_flow_field, FlowSample};
use flowfield_core::{FlowFieldError, Result, ScalarField};
use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

/// Appearance of the vector overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    /// Distance in pixels between sampled rows and columns.
    pub stride: usize,
    /// Vector color.
    pub color: [u8; 3],
    /// Vector length as a fraction of `stride`.
    pub scale: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            stride: 30,
            color: [255, 0, 0],
            scale: 0.8,
        }
    }
}

impl OverlayStyle {
    /// Vector length in pixels.
    pub fn vector_length(&self) -> f64 {
        self.stride as f64 * self.scale as f64
    }

    /// Reject a zero stride and a scale that is not a positive finite number.
    pub fn validate(&self) -> Result<()> {
        if self.stride == 0 {
            return Err(FlowFieldError::configuration("overlay stride must be at least 1"));
        }
        if !(self.scale > 0.0 && self.scale.is_finite()) {
            return Err(FlowFieldError::configuration(format!(
                "overlay scale must be positive and finite, got {}",
                self.scale
            )));
        }
        Ok(())
    }
}

/// Sample `orientation` with `style.stride` and draw it over `base`.
pub fn draw_flow_field(
    base: &RgbImage,
    orientation: &ScalarField,
    style: &OverlayStyle,
) -> Result<RgbImage> {
    style.validate()?;
    let samples = sample_flow_field(orientation, style.stride)?;
    Ok(render_overlay(base, &samples, style))
}

/// Draw `samples` as vectors over a copy of `base`.
///
/// Pixels falling outside `base` are skipped. Vectors longer than the image
/// width plus height are shortened to that length, which leaves every visible
/// pixel in place up to rounding. A non-finite length draws only the anchor.
pub fn render_overlay(base: &RgbImage, samples: &[FlowSample], style: &OverlayStyle) -> RgbImage {
    let mut out = base.clone();
    let color = Rgb(style.color);
    let reach = base.width() as f64 + base.height() as f64;
    let len = style.vector_length();
    let len = if len.is_finite() { len.clamp(-reach, reach) } else { 0.0 };

    for s in samples {
        let x0 = s.x as i64;
        let y0 = s.y as i64;
        let x1 = (s.x as f64 + s.u * len).round() as i64;
        let y1 = (s.y as f64 - s.v * len).round() as i64;
        draw_line(&mut out, (x0, y0), (x1, y1), color);
        // Head marker at the tip.
        for (dx, dy) in [(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)] {
            put_pixel_checked(&mut out, x1 + dx, y1 + dy, color);
        }
    }
    out
}

/// Bresenham line between two inclusive endpoints.
fn draw_line(img: &mut RgbImage, (x0, y0): (i64, i64), (x1, y1): (i64, i64), color: Rgb<u8>) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        put_pixel_checked(img, x, y, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[inline]
fn put_pixel_checked(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u64) < img.width() as u64 && (y as u64) < img.height() as u64 {
        img.put_pixel(x as u32, y as u32, color);
    }
}
