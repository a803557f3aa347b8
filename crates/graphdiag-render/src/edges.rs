//! Filled edge shapes: straight quads, ribbons around quadratic curves, and arrowheads.

use crate::geometry::{Circle, QuadBezier, clip_curve, clip_straight, control_point, unit_normal};
use crate::path::PathData;
use graphdiag_core::EdgeKind;
use graphdiag_core::geom::{Point, Vector, vector};

pub const ARROW_MIN_LENGTH: f64 = 8.0;
pub const ARROW_MAX_LENGTH: f64 = 40.0;
pub const ARROW_MIN_WIDTH: f64 = 6.0;
pub const ARROW_MAX_WIDTH: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowSize {
    pub length: f64,
    pub width: f64,
}

impl ArrowSize {
    pub fn for_thickness(thickness: f64) -> Self {
        Self {
            length: (2.5 * thickness).clamp(ARROW_MIN_LENGTH, ARROW_MAX_LENGTH),
            width: (1.8 * thickness).clamp(ARROW_MIN_WIDTH, ARROW_MAX_WIDTH),
        }
    }

    /// Caps the head length so two heads never cross over a segment of length `available`.
    fn capped(self, available: f64) -> Self {
        Self {
            length: self.length.min(available / 2.0),
            ..self
        }
    }
}

/// A clipped, ready-to-fill edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeShape {
    /// Point on the source circle where the edge leaves it.
    pub start: Point,
    /// Point on the target circle where the edge enters it.
    pub end: Point,
    /// Control point of curved edges.
    pub ctrl: Option<Point>,
    pub path: PathData,
}

impl EdgeShape {
    pub fn is_curved(&self) -> bool {
        self.ctrl.is_some()
    }
}

/// Builds the filled shape of an edge between two node circles.
///
/// Returns `None` when the circles overlap or share a center: such an edge has nothing
/// visible to draw.
pub fn edge_shape(
    source: &Circle,
    target: &Circle,
    kind: EdgeKind,
    thickness: f64,
    multiplier: f64,
) -> Option<EdgeShape> {
    let distance = (target.center - source.center).length();
    if !distance.is_finite() || distance <= 0.0 || distance < source.radius + target.radius {
        return None;
    }
    let heads = kind.arrow_heads();

    if kind.is_curved() {
        let ctrl = control_point(source.center, target.center, multiplier);
        let full = QuadBezier::new(source.center, ctrl, target.center);
        let (start, end) = clip_curve(&full, source, target);
        let path = curved_edge(&QuadBezier::new(start, ctrl, end), thickness, heads);
        Some(EdgeShape {
            start,
            end,
            ctrl: Some(ctrl),
            path,
        })
    } else {
        let (start, end) = clip_straight(source, target)?;
        let path = straight_edge(start, end, thickness, heads)?;
        Some(EdgeShape {
            start,
            end,
            ctrl: None,
            path,
        })
    }
}

/// A `thickness`-wide quadrilateral from `start` to `end`.
pub fn straight_body(start: Point, end: Point, thickness: f64) -> Option<PathData> {
    let n = unit_normal(end - start)?;
    let half = n * (thickness / 2.0);
    let mut path = PathData::new();
    path.move_to(start + half)
        .line_to(start - half)
        .line_to(end - half)
        .line_to(end + half)
        .close();
    Some(path)
}

/// Triangle with its tip at `tip`, pointing along the unit vector `dir`.
pub fn arrow_head(tip: Point, dir: Vector, size: ArrowSize) -> PathData {
    let base = tip - dir * size.length;
    let half = vector(-dir.y, dir.x) * (size.width / 2.0);
    let mut path = PathData::new();
    path.move_to(tip)
        .line_to(base + half)
        .line_to(base - half)
        .close();
    path
}

/// Straight body plus optional `(start, end)` arrowheads; the body is shortened under each head.
pub fn straight_edge(
    start: Point,
    end: Point,
    thickness: f64,
    (head_start, head_end): (bool, bool),
) -> Option<PathData> {
    let d = end - start;
    let len = d.length();
    if !(len > 0.0 && len.is_finite()) {
        return None;
    }
    let u = d / len;
    let size = ArrowSize::for_thickness(thickness).capped(len);

    let body_start = if head_start { start + u * size.length } else { start };
    let body_end = if head_end { end - u * size.length } else { end };

    let mut path = straight_body(body_start, body_end, thickness).unwrap_or_default();
    if head_start {
        path.extend(arrow_head(start, -u, size));
    }
    if head_end {
        path.extend(arrow_head(end, u, size));
    }
    Some(path)
}

/// Closed ribbon of width `thickness` around the curve `start → ctrl → end`.
///
/// Both offset curves share the same control point shifted along the average of the start and
/// end normals.
pub fn ribbon(start: Point, ctrl: Point, end: Point, thickness: f64) -> PathData {
    let start_normal = unit_normal(ctrl - start).unwrap_or(vector(0.0, 1.0));
    let end_normal = unit_normal(end - ctrl).unwrap_or(vector(0.0, 1.0));
    let sum = start_normal + end_normal;
    let mid_normal = if sum.length() > 0.0 {
        sum / sum.length()
    } else {
        start_normal
    };

    let h = thickness / 2.0;
    let mut path = PathData::new();
    path.move_to(start + start_normal * h)
        .quad_to(ctrl + mid_normal * h, end + end_normal * h)
        .line_to(end - end_normal * h)
        .quad_to(ctrl - mid_normal * h, start - start_normal * h)
        .close();
    path
}

/// Ribbon along `curve` with arrowheads aligned to the curve's end tangents.
pub fn curved_edge(curve: &QuadBezier, thickness: f64, (head_start, head_end): (bool, bool)) -> PathData {
    let chord = curve.to - curve.from;
    let fallback = if chord.length() > 0.0 {
        chord / chord.length()
    } else {
        vector(1.0, 0.0)
    };
    let unit = |v: Vector| {
        let len = v.length();
        if len > 0.0 && len.is_finite() { v / len } else { fallback }
    };
    let t_start = unit(curve.tangent(0.0));
    let t_end = unit(curve.tangent(1.0));
    let size = ArrowSize::for_thickness(thickness).capped(chord.length());

    let from = if head_start {
        curve.from + t_start * size.length
    } else {
        curve.from
    };
    let to = if head_end {
        curve.to - t_end * size.length
    } else {
        curve.to
    };

    let mut path = ribbon(from, curve.ctrl, to, thickness);
    if head_start {
        path.extend(arrow_head(curve.from, -t_start, size));
    }
    if head_end {
        path.extend(arrow_head(curve.to, t_end, size));
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Segment;
    use graphdiag_core::geom::point;

    fn subpaths(path: &PathData) -> usize {
        path.segments
            .iter()
            .filter(|s| matches!(s, Segment::MoveTo(_)))
            .count()
    }

    fn circles() -> (Circle, Circle) {
        (
            Circle::new(point(0.0, 0.0), 10.0),
            Circle::new(point(100.0, 0.0), 20.0),
        )
    }

    #[test]
    fn overlapping_circles_have_no_shape() {
        let a = Circle::new(point(0.0, 0.0), 10.0);
        let b = Circle::new(point(15.0, 0.0), 10.0);
        assert_eq!(edge_shape(&a, &b, EdgeKind::Line, 1.0, 0.0), None);
        assert_eq!(edge_shape(&a, &a, EdgeKind::Curved, 1.0, 0.0), None);
    }

    #[test]
    fn straight_endpoints_sit_on_the_circles() {
        let (a, b) = circles();
        let shape = edge_shape(&a, &b, EdgeKind::Line, 2.0, 0.0).unwrap();
        assert_eq!(shape.start, point(10.0, 0.0));
        assert_eq!(shape.end, point(80.0, 0.0));
        assert!(!shape.is_curved());
        assert_eq!(
            shape.path.to_absolute(),
            "M 10 1 L 10 -1 L 80 -1 L 80 1 Z"
        );
    }

    #[test]
    fn arrowheads_shorten_the_body() {
        let (a, b) = circles();
        let shape = edge_shape(&a, &b, EdgeKind::Arrow, 2.0, 0.0).unwrap();
        assert_eq!(subpaths(&shape.path), 2);
        // Minimum head length is 8, so the body stops at x = 72.
        assert_eq!(
            shape.path.segments[3],
            Segment::LineTo(point(72.0, 1.0))
        );
        assert_eq!(shape.path.segments[5], Segment::MoveTo(point(80.0, 0.0)));

        let shape = edge_shape(&a, &b, EdgeKind::DoubleArrow, 2.0, 0.0).unwrap();
        assert_eq!(subpaths(&shape.path), 3);
    }

    #[test]
    fn arrow_size_is_clamped() {
        assert_eq!(
            ArrowSize::for_thickness(1.0),
            ArrowSize {
                length: 8.0,
                width: 6.0
            }
        );
        assert_eq!(
            ArrowSize::for_thickness(10.0),
            ArrowSize {
                length: 25.0,
                width: 18.0
            }
        );
        assert_eq!(
            ArrowSize::for_thickness(100.0),
            ArrowSize {
                length: 40.0,
                width: 30.0
            }
        );
    }

    #[test]
    fn heads_never_overrun_a_short_segment() {
        let path = straight_edge(point(0.0, 0.0), point(20.0, 0.0), 20.0, (true, true)).unwrap();
        // Each head takes half the segment, leaving a zero-length body that is dropped.
        assert_eq!(subpaths(&path), 2);
        assert_eq!(path.segments[0], Segment::MoveTo(point(0.0, 0.0)));
        assert_eq!(path.segments[1], Segment::LineTo(point(10.0, -15.0)));
    }

    #[test]
    fn curved_endpoints_sit_on_the_circles() {
        let (a, b) = circles();
        for kind in [EdgeKind::Curved, EdgeKind::CurvedArrow, EdgeKind::CurvedDoubleArrow] {
            let shape = edge_shape(&a, &b, kind, 3.0, 0.8).unwrap();
            assert!(((shape.start - a.center).length() - a.radius).abs() < 1e-3);
            assert!(((shape.end - b.center).length() - b.radius).abs() < 1e-3);
            assert!(shape.is_curved());
        }
    }

    #[test]
    fn ribbon_offsets_both_sides() {
        let path = ribbon(point(0.0, 0.0), point(50.0, 0.0), point(100.0, 0.0), 4.0);
        assert_eq!(
            path.to_absolute(),
            "M 0 2 Q 50 2 100 2 L 100 -2 Q 50 -2 0 -2 Z"
        );
    }
}
