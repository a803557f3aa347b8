//! Path data: absolute command lists and their compact relative form.

use crate::util::{fmt, fmt1, round1};
use graphdiag_core::geom::Point;
use regex::Regex;
use std::fmt::Write as _;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CubicTo(Point, Point, Point),
    Close,
}

/// An absolute path made of filled subpaths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    pub segments: Vec<Segment>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.segments.push(Segment::MoveTo(p));
        self
    }

    pub fn line_to(&mut self, p: Point) -> &mut Self {
        self.segments.push(Segment::LineTo(p));
        self
    }

    pub fn quad_to(&mut self, ctrl: Point, to: Point) -> &mut Self {
        self.segments.push(Segment::QuadTo(ctrl, to));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.segments.push(Segment::Close);
        self
    }

    pub fn extend(&mut self, other: PathData) {
        self.segments.extend(other.segments);
    }

    /// First drawn point.
    pub fn start(&self) -> Option<Point> {
        self.segments.iter().find_map(|s| match s {
            Segment::MoveTo(p) => Some(*p),
            _ => None,
        })
    }

    /// Full-precision absolute commands: `M x y L x y Q cx cy x y Z`.
    pub fn to_absolute(&self) -> String {
        let mut out = String::new();
        for seg in &self.segments {
            if !out.is_empty() {
                out.push(' ');
            }
            match seg {
                Segment::MoveTo(p) => {
                    let _ = write!(out, "M {} {}", fmt(p.x), fmt(p.y));
                }
                Segment::LineTo(p) => {
                    let _ = write!(out, "L {} {}", fmt(p.x), fmt(p.y));
                }
                Segment::QuadTo(c, p) => {
                    let _ = write!(out, "Q {} {} {} {}", fmt(c.x), fmt(c.y), fmt(p.x), fmt(p.y));
                }
                Segment::CubicTo(c1, c2, p) => {
                    let _ = write!(
                        out,
                        "C {} {} {} {} {} {}",
                        fmt(c1.x),
                        fmt(c1.y),
                        fmt(c2.x),
                        fmt(c2.y),
                        fmt(p.x),
                        fmt(p.y)
                    );
                }
                Segment::Close => out.push('Z'),
            }
        }
        out
    }

    /// Compact form: `M` stays absolute, every other command becomes relative, and all
    /// coordinates are rounded to one decimal.
    ///
    /// Offsets are taken between *rounded* absolute coordinates, so rounding errors never
    /// accumulate along a subpath.
    pub fn to_optimized(&self) -> String {
        let mut out = String::new();
        let mut cur = (0.0, 0.0);
        let rel = |p: &Point, cur: (f64, f64)| {
            let (x, y) = (round1(p.x), round1(p.y));
            ((x, y), fmt1(x - cur.0), fmt1(y - cur.1))
        };

        for seg in &self.segments {
            match seg {
                Segment::MoveTo(p) => {
                    let (x, y) = (round1(p.x), round1(p.y));
                    let _ = write!(out, "M{},{}", fmt(x), fmt(y));
                    cur = (x, y);
                }
                Segment::LineTo(p) => {
                    let (next, dx, dy) = rel(p, cur);
                    let _ = write!(out, "l{dx},{dy}");
                    cur = next;
                }
                Segment::QuadTo(c, p) => {
                    let (_, cx, cy) = rel(c, cur);
                    let (next, dx, dy) = rel(p, cur);
                    let _ = write!(out, "q{cx},{cy},{dx},{dy}");
                    cur = next;
                }
                Segment::CubicTo(c1, c2, p) => {
                    let (_, c1x, c1y) = rel(c1, cur);
                    let (_, c2x, c2y) = rel(c2, cur);
                    let (next, dx, dy) = rel(p, cur);
                    let _ = write!(out, "c{c1x},{c1y},{c2x},{c2y},{dx},{dy}");
                    cur = next;
                }
                Segment::Close => out.push('z'),
            }
        }
        out
    }

    pub fn render(&self, optimize: bool) -> String {
        if optimize {
            self.to_optimized()
        } else {
            self.to_absolute()
        }
    }

    /// Parses absolute `M`/`L`/`Q`/`C`/`Z` path data; commands with too few numbers are
    /// skipped, other command letters are not recognized.
    pub fn parse_absolute(d: &str) -> Self {
        static COMMAND_RE: OnceLock<Regex> = OnceLock::new();
        let re = COMMAND_RE
            .get_or_init(|| Regex::new(r"[MLQCZ][^MLQCZ]*").expect("path command regex"));

        let mut path = PathData::new();
        for m in re.find_iter(d) {
            let cmd = m.as_str();
            let letter = cmd.as_bytes()[0];
            let nums: Vec<f64> = cmd[1..]
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|s| !s.is_empty())
                .filter_map(|s| s.parse().ok())
                .collect();
            let pt = |i: usize| graphdiag_core::geom::point(nums[i], nums[i + 1]);
            match letter {
                b'M' if nums.len() >= 2 => {
                    path.move_to(pt(0));
                }
                b'L' if nums.len() >= 2 => {
                    path.line_to(pt(0));
                }
                b'Q' if nums.len() >= 4 => {
                    path.quad_to(pt(0), pt(2));
                }
                b'C' if nums.len() >= 6 => {
                    path.segments.push(Segment::CubicTo(pt(0), pt(2), pt(4)));
                }
                b'Z' => {
                    path.close();
                }
                _ => {}
            }
        }
        path
    }
}

/// Rewrites absolute path data into its compact relative form.
pub fn optimize_path(d: &str) -> String {
    PathData::parse_absolute(d).to_optimized()
}
