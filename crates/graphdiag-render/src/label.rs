//! Label font fitting and placement.
//!
//! Text is never measured; widths are estimated from the display width of the label (as
//! reported by `unicode-width`) times a per-character factor. A label is hidden when the font
//! it would get is unreadable once the drawing is scaled to its reference display size.

use crate::bounds::Bounds;
use crate::geometry::{QuadBezier, bulge, unit_normal};
use crate::options::LabelOptions;
use crate::util::round1;
use graphdiag_core::geom::{Point, point, vector};
use unicode_width::UnicodeWidthStr;

/// Lower bound of the base node label font before fitting.
pub const NODE_BASE_MIN_FONT_SIZE: f64 = 5.0;
/// Horizontal gap between a node's circle and its label.
pub const NODE_LABEL_GAP: f64 = 5.0;
/// Share of a curved edge's bulge kept by its label path.
pub const LABEL_CURVE_FLATTENING: f64 = 0.8;

pub fn text_width(text: &str, font_size: f64, opts: &LabelOptions) -> f64 {
    text.width() as f64 * font_size * opts.char_width_factor
}

/// Largest font, up to `max_font`, that fits `text` into `available_width × available_height`.
///
/// Returns `None` when the label should be hidden: it is empty, or the fitted font would be
/// smaller than `opts.hide_below` pixels at `scale`. Visible fonts are raised to
/// `opts.min_font_size` and rounded to one decimal.
pub fn fit_font_size(
    text: &str,
    available_width: f64,
    available_height: f64,
    max_font: f64,
    scale: f64,
    opts: &LabelOptions,
) -> Option<f64> {
    let chars = text.width();
    if chars == 0 {
        return None;
    }
    let by_width = available_width * opts.fill_ratio / (chars as f64 * opts.char_width_factor);
    let by_height = available_height * opts.fill_ratio;
    let fitted = by_width.min(by_height).min(max_font);
    if !fitted.is_finite() || fitted * scale < opts.hide_below {
        return None;
    }
    Some(round1(fitted.max(opts.min_font_size)))
}

/// Perpendicular distance between an edge and its label.
pub fn edge_label_offset(thickness: f64) -> f64 {
    (2.0 * thickness + 12.0).max(10.0)
}

pub fn edge_font_size(
    text: &str,
    segment_length: f64,
    thickness: f64,
    scale: f64,
    opts: &LabelOptions,
) -> Option<f64> {
    let height = 2.0 * edge_label_offset(thickness);
    fit_font_size(text, segment_length, height, opts.max_edge_font_size, scale, opts)
}

pub fn node_font_size(text: &str, size: f64, scale: f64, opts: &LabelOptions) -> Option<f64> {
    let base = (0.3 * size).clamp(NODE_BASE_MIN_FONT_SIZE, opts.max_node_font_size);
    fit_font_size(text, 8.0 * size, 2.0 * size, base, scale, opts)
}

/// Anchor and rotation of a label along a straight edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StraightLabel {
    pub x: f64,
    pub y: f64,
    /// Rotation in degrees, always within `[-90, 90]`.
    pub angle: f64,
}

impl StraightLabel {
    /// Midpoint of `start → end`, rotated with the segment and pushed off it by
    /// [`edge_label_offset`].
    pub fn place(start: Point, end: Point, thickness: f64) -> Self {
        let mid = start.lerp(end, 0.5);
        let d = end - start;
        let mut angle = d.y.atan2(d.x).to_degrees();
        if angle > 90.0 {
            angle -= 180.0;
        } else if angle < -90.0 {
            angle += 180.0;
        }
        let rad = angle.to_radians();
        let offset = edge_label_offset(thickness);
        Self {
            x: mid.x + rad.sin() * offset,
            y: mid.y - rad.cos() * offset,
            angle,
        }
    }

    /// Axis-aligned box around the rotated text.
    pub fn bounds(&self, width: f64, font_size: f64) -> Bounds {
        let rad = self.angle.to_radians();
        let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
        let half_w = cos * width / 2.0 + sin * font_size / 2.0;
        let half_h = sin * width / 2.0 + cos * font_size / 2.0;
        Bounds::around(point(self.x, self.y), half_w, half_h)
    }
}

/// Path a curved edge's label follows.
///
/// The path runs between the two node centers shifted off the edge on its convex side, with a
/// flatter bulge than the edge itself. It is reversed when the edge runs right to left so the
/// text reads left to right.
pub fn curved_label_path(
    source: Point,
    target: Point,
    multiplier: f64,
    thickness: f64,
) -> QuadBezier {
    let d = target - source;
    let normal = unit_normal(d).unwrap_or(vector(0.0, 1.0));
    let b = bulge(d.length(), multiplier);
    let side = if b < 0.0 { -1.0 } else { 1.0 };
    let offset = edge_label_offset(thickness) * side;

    let from = source + normal * offset;
    let to = target + normal * offset;
    let ctrl = source.lerp(target, 0.5) + normal * (b * LABEL_CURVE_FLATTENING + offset);
    if target.x < source.x {
        QuadBezier::new(to, ctrl, from)
    } else {
        QuadBezier::new(from, ctrl, to)
    }
}
