//! Curve geometry: quadratic beziers, control points, and clipping against node circles.

use graphdiag_core::geom::{Point, Vector, point, vector};

/// Base bulge of a curved edge as a share of the endpoint distance.
pub const CURVE_BULGE: f64 = 0.12;
/// Extra bulge per unit of parallel-group curvature multiplier.
pub const CURVE_BULGE_PER_MULTIPLIER: f64 = 0.12;

/// Uniform samples used to bracket a curve/circle crossing.
pub const INTERSECTION_SAMPLES: usize = 100;
pub const INTERSECTION_BISECTIONS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, p: Point) -> bool {
        (p - self.center).length() < self.radius
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadBezier {
    pub from: Point,
    pub ctrl: Point,
    pub to: Point,
}

impl QuadBezier {
    pub fn new(from: Point, ctrl: Point, to: Point) -> Self {
        Self { from, ctrl, to }
    }

    pub fn at(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let x = mt * mt * self.from.x + 2.0 * mt * t * self.ctrl.x + t * t * self.to.x;
        let y = mt * mt * self.from.y + 2.0 * mt * t * self.ctrl.y + t * t * self.to.y;
        point(x, y)
    }

    pub fn tangent(&self, t: f64) -> Vector {
        (self.ctrl - self.from) * (2.0 * (1.0 - t)) + (self.to - self.ctrl) * (2.0 * t)
    }
}

/// Unit normal (rotated +90°) of `v`, or `None` for a zero vector.
pub fn unit_normal(v: Vector) -> Option<Vector> {
    let len = v.length();
    if len > 0.0 && len.is_finite() {
        Some(vector(-v.y / len, v.x / len))
    } else {
        None
    }
}

/// Signed perpendicular displacement of the control point of an edge between `from` and `to`.
pub fn bulge(distance: f64, multiplier: f64) -> f64 {
    distance * (CURVE_BULGE + CURVE_BULGE_PER_MULTIPLIER * multiplier)
}

/// Single quadratic control point: the segment midpoint pushed along the segment's normal.
pub fn control_point(from: Point, to: Point, multiplier: f64) -> Point {
    let d = to - from;
    let mid = from.lerp(to, 0.5);
    match unit_normal(d) {
        Some(n) => mid + n * bulge(d.length(), multiplier),
        None => mid,
    }
}

/// Point where `curve` crosses the boundary of `circle`.
///
/// The curve is sampled at `t = i / 100` to find the sample whose distance to the center is
/// closest to the radius, then the bracket `[t - 0.01, t + 0.01]` is bisected 20 times. With
/// `from_start` the curve is assumed to leave the circle as `t` grows (a curve starting at the
/// circle's center); otherwise it is assumed to enter it.
pub fn curve_circle_intersection(curve: &QuadBezier, circle: &Circle, from_start: bool) -> Point {
    let step = 1.0 / INTERSECTION_SAMPLES as f64;
    let mut best_t = if from_start { 0.0 } else { 1.0 };
    let mut best_err = f64::INFINITY;
    for i in 0..=INTERSECTION_SAMPLES {
        let t = i as f64 * step;
        let err = ((curve.at(t) - circle.center).length() - circle.radius).abs();
        if err < best_err {
            best_err = err;
            best_t = t;
        }
    }

    let mut lo = (best_t - step).max(0.0);
    let mut hi = (best_t + step).min(1.0);
    for _ in 0..INTERSECTION_BISECTIONS {
        let mid = (lo + hi) / 2.0;
        let inside = circle.contains(curve.at(mid));
        if inside == from_start {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    curve.at((lo + hi) / 2.0)
}

/// Endpoints of a straight edge clipped to both node circles.
pub fn clip_straight(source: &Circle, target: &Circle) -> Option<(Point, Point)> {
    let d = target.center - source.center;
    let len = d.length();
    if !(len > 0.0 && len.is_finite()) {
        return None;
    }
    let u = d / len;
    Some((
        source.center + u * source.radius,
        target.center - u * target.radius,
    ))
}

/// Endpoints of a curved edge clipped to both node circles.
pub fn clip_curve(curve: &QuadBezier, source: &Circle, target: &Circle) -> (Point, Point) {
    (
        curve_circle_intersection(curve, source, true),
        curve_circle_intersection(curve, target, false),
    )
}
