use crate::options::LabelOptions;
use crate::util::fmt;
use graphdiag_core::geom::Point;

/// Axis-aligned drawing extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Viewport of a drawing with nothing in it.
    pub const EMPTY_VIEWPORT: Bounds = Bounds {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 100.0,
        max_y: 100.0,
    };

    pub fn around(center: Point, half_width: f64, half_height: f64) -> Self {
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn padded(&self, padding: f64) -> Bounds {
        Bounds {
            min_x: self.min_x - padding,
            min_y: self.min_y - padding,
            max_x: self.max_x + padding,
            max_y: self.max_y + padding,
        }
    }

    /// `min-x min-y width height`.
    pub fn view_box(&self) -> String {
        format!(
            "{} {} {} {}",
            fmt(self.min_x),
            fmt(self.min_y),
            fmt(self.width()),
            fmt(self.height())
        )
    }
}

/// Folds boxes into their union; `None` for an empty iterator.
pub fn union_all(boxes: impl IntoIterator<Item = Bounds>) -> Option<Bounds> {
    boxes.into_iter().reduce(|acc, b| acc.union(&b))
}

/// Ratio between the reference display size and the padded drawing, clamped to the tighter
/// axis. Labels are judged readable against this scale.
pub fn view_scale(geometry: &Bounds, padding: f64, opts: &LabelOptions) -> f64 {
    let padded = geometry.padded(padding);
    let sx = opts.reference_width / padded.width();
    let sy = opts.reference_height / padded.height();
    let scale = sx.min(sy);
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphdiag_core::geom::point;

    #[test]
    fn union_and_padding() {
        let a = Bounds::around(point(0.0, 0.0), 10.0, 10.0);
        let b = Bounds::around(point(100.0, 50.0), 5.0, 5.0);
        let u = union_all([a, b]).unwrap();
        assert_eq!((u.min_x, u.min_y, u.max_x, u.max_y), (-10.0, -10.0, 105.0, 55.0));
        assert_eq!(u.padded(20.0).view_box(), "-30 -30 155 105");
        assert_eq!(union_all(std::iter::empty()), None);
    }

    #[test]
    fn empty_viewport_is_100_square() {
        assert_eq!(Bounds::EMPTY_VIEWPORT.view_box(), "0 0 100 100");
    }

    #[test]
    fn scale_uses_the_tighter_axis() {
        let opts = LabelOptions::default();
        let geometry = Bounds::around(point(0.0, 0.0), 780.0, 100.0);
        // Padded to 1600 x 240: 800/1600 = 0.5 beats 600/240.
        assert_eq!(view_scale(&geometry, 20.0, &opts), 0.5);

        let degenerate = Bounds::around(point(0.0, 0.0), 0.0, 0.0);
        assert_eq!(view_scale(&degenerate, 0.0, &opts), 1.0);
    }
}
