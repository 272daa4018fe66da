//! SVG path data
//!
//! [`PathData`] is the path descriptor handed to the scene graph: an ordered
//! list of drawing commands with a fluent builder (`m`, `l`, `q`, `c`, `a`,
//! `z`). It also answers the geometric questions label and arrow placement
//! need (arc length, point at a length ratio, terminal tangents, bounds) by
//! flattening curves into short line pieces.

use std::fmt;

use glam::dvec2;

use super::defaults;
use crate::types::{BBox, Point};

/// One drawing command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo {
        ctrl: Point,
        to: Point,
    },
    CubicTo {
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    ArcTo {
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    Close,
}

/// An ordered sequence of path commands
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn m(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::MoveTo(dvec2(x, y)));
        self
    }

    pub fn l(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::LineTo(dvec2(x, y)));
        self
    }

    pub fn q(mut self, cx: f64, cy: f64, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::QuadTo {
            ctrl: dvec2(cx, cy),
            to: dvec2(x, y),
        });
        self
    }

    #[allow(clippy::too_many_arguments)]
    pub fn c(mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::CubicTo {
            ctrl1: dvec2(c1x, c1y),
            ctrl2: dvec2(c2x, c2y),
            to: dvec2(x, y),
        });
        self
    }

    #[allow(clippy::too_many_arguments)]
    pub fn a(mut self, rx: f64, ry: f64, rotation: f64, large_arc: bool, sweep: bool, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::ArcTo {
            rx,
            ry,
            rotation,
            large_arc,
            sweep,
            to: dvec2(x, y),
        });
        self
    }

    pub fn z(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Point-based aliases used by the path strategies
    pub fn move_to(self, p: Point) -> Self {
        self.m(p.x, p.y)
    }

    pub fn line_to(self, p: Point) -> Self {
        self.l(p.x, p.y)
    }

    pub fn quad_to(self, ctrl: Point, to: Point) -> Self {
        self.q(ctrl.x, ctrl.y, to.x, to.y)
    }

    pub fn cubic_to(self, ctrl1: Point, ctrl2: Point, to: Point) -> Self {
        self.c(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y)
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Every coordinate (end points and control points) is finite
    pub fn is_finite(&self) -> bool {
        self.commands.iter().all(|cmd| match *cmd {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p.is_finite(),
            PathCommand::QuadTo { ctrl, to } => ctrl.is_finite() && to.is_finite(),
            PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                ctrl1.is_finite() && ctrl2.is_finite() && to.is_finite()
            }
            PathCommand::ArcTo { rx, ry, rotation, to, .. } => {
                rx.is_finite() && ry.is_finite() && rotation.is_finite() && to.is_finite()
            }
            PathCommand::Close => true,
        })
    }

    /// Flatten into drawn line pieces.
    ///
    /// Curves are sampled uniformly in their parameter; arcs are replaced by
    /// their chord, which is enough for the marker symbols they appear in.
    /// Move commands start a new sub-path and draw nothing.
    pub fn segments(&self) -> Vec<(Point, Point)> {
        let mut pieces = Vec::new();
        let mut current: Option<Point> = None;
        let mut subpath_start: Option<Point> = None;

        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    current = Some(p);
                    subpath_start = Some(p);
                }
                PathCommand::LineTo(p) | PathCommand::ArcTo { to: p, .. } => {
                    if let Some(from) = current {
                        pieces.push((from, p));
                    }
                    current = Some(p);
                }
                PathCommand::QuadTo { ctrl, to } => {
                    if let Some(from) = current {
                        sample_curve(&mut pieces, |t| quad_point(from, ctrl, to, t));
                    }
                    current = Some(to);
                }
                PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                    if let Some(from) = current {
                        sample_curve(&mut pieces, |t| cubic_point(from, ctrl1, ctrl2, to, t));
                    }
                    current = Some(to);
                }
                PathCommand::Close => {
                    if let (Some(from), Some(start)) = (current, subpath_start) {
                        pieces.push((from, start));
                        current = Some(start);
                    }
                }
            }
        }

        pieces
    }

    /// Total drawn length
    pub fn length(&self) -> f64 {
        self.segments().iter().map(|(a, b)| a.distance(*b)).sum()
    }

    /// Point at `ratio` of the total length (clamped to `[0, 1]`).
    ///
    /// A path that draws nothing answers with its first point.
    pub fn point_at(&self, ratio: f64) -> Option<Point> {
        let pieces = self.segments();
        let Some(&(first, _)) = pieces.first() else {
            return self.first_point();
        };

        let total: f64 = pieces.iter().map(|(a, b)| a.distance(*b)).sum();
        if total <= 0.0 {
            return Some(first);
        }

        let mut remaining = ratio.clamp(0.0, 1.0) * total;
        for &(a, b) in &pieces {
            let len = a.distance(b);
            if remaining <= len {
                if len == 0.0 {
                    return Some(a);
                }
                return Some(a + (b - a) * (remaining / len));
            }
            remaining -= len;
        }

        pieces.last().map(|&(_, b)| b)
    }

    pub fn first_point(&self) -> Option<Point> {
        self.commands.iter().find_map(|cmd| match *cmd {
            PathCommand::MoveTo(p) => Some(p),
            _ => None,
        })
    }

    /// Where the path ends, together with the outward unit direction at
    /// that end. `at_start` selects the first end; its direction points away
    /// from the path body. `None` when no piece has non-zero length.
    pub fn terminal(&self, at_start: bool) -> Option<(Point, Point)> {
        let pieces = self.segments();
        if at_start {
            let &(a, _) = pieces.first()?;
            let (_, b) = *pieces.iter().find(|(p, q)| p.distance(*q) > 0.0)?;
            Some((a, (a - b).normalize_or_zero()))
        } else {
            let &(_, b) = pieces.last()?;
            let (a, _) = *pieces.iter().rev().find(|(p, q)| p.distance(*q) > 0.0)?;
            Some((b, (b - a).normalize_or_zero()))
        }
    }

    /// Bounds of every end point and sampled curve point
    pub fn bounds(&self) -> Option<BBox> {
        let mut bbox = BBox::empty();
        for cmd in &self.commands {
            if let PathCommand::MoveTo(p) = *cmd {
                bbox.expand_point(p);
            }
        }
        for (a, b) in self.segments() {
            bbox.expand_point(a);
            bbox.expand_point(b);
        }
        (!bbox.is_empty()).then_some(bbox)
    }
}

fn sample_curve(pieces: &mut Vec<(Point, Point)>, at: impl Fn(f64) -> Point) {
    let steps = defaults::CURVE_SAMPLES;
    let mut prev = at(0.0);
    for i in 1..=steps {
        let next = at(i as f64 / steps as f64);
        pieces.push((prev, next));
        prev = next;
    }
}

fn quad_point(p0: Point, p1: Point, p2: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    p0 * (mt * mt) + p1 * (2.0 * mt * t) + p2 * (t * t)
}

fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    p0 * (mt * mt * mt) + p1 * (3.0 * mt * mt * t) + p2 * (3.0 * mt * t * t) + p3 * (t * t * t)
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match *cmd {
                PathCommand::MoveTo(p) => write!(f, "M{}", fmt_point(p))?,
                PathCommand::LineTo(p) => write!(f, "L{}", fmt_point(p))?,
                PathCommand::QuadTo { ctrl, to } => write!(f, "Q{} {}", fmt_point(ctrl), fmt_point(to))?,
                PathCommand::CubicTo { ctrl1, ctrl2, to } => write!(
                    f,
                    "C{} {} {}",
                    fmt_point(ctrl1),
                    fmt_point(ctrl2),
                    fmt_point(to)
                )?,
                PathCommand::ArcTo {
                    rx,
                    ry,
                    rotation,
                    large_arc,
                    sweep,
                    to,
                } => write!(
                    f,
                    "A{},{} {} {} {} {}",
                    fmt_num(rx),
                    fmt_num(ry),
                    fmt_num(rotation),
                    u8::from(large_arc),
                    u8::from(sweep),
                    fmt_point(to)
                )?,
                PathCommand::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

fn fmt_point(p: Point) -> String {
    format!("{},{}", fmt_num(p.x), fmt_num(p.y))
}

/// Format a number with 6 significant figures, trailing zeros trimmed.
pub(crate) fn fmt_num(value: f64) -> String {
    fmt_num_precision(value, 6)
}

/// Format a number with specified significant figures, trailing zeros trimmed.
fn fmt_num_precision(value: f64, sig_figs: i32) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    // Round to specified significant figures
    let abs_val = value.abs();
    let magnitude = abs_val.log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    // Format with enough decimal places, then trim
    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    if !s.contains('.') {
        return s;
    }
    let s = s.trim_end_matches('0');
    let s = s.trim_end_matches('.');
    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Point, expected: Point) {
        assert!(
            actual.distance(expected) < 1e-9,
            "point mismatch: {actual} != {expected}"
        );
    }

    #[test]
    fn fmt_num_trims_trailing_zeros() {
        assert_eq!(fmt_num(100.0), "100");
        assert_eq!(fmt_num(-5.0), "-5");
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(-0.0), "0");
        assert_eq!(fmt_num(1_234_567.0), "1234570");
        assert_eq!(fmt_num(1.0 / 3.0), "0.333333");
    }

    #[test]
    fn display_uses_svg_commands() {
        let path = PathData::new()
            .m(0.0, 0.0)
            .l(10.0, 0.0)
            .q(15.0, 5.0, 10.0, 10.0)
            .c(5.0, 15.0, 0.0, 15.0, 0.0, 10.0)
            .a(2.0, 2.0, 0.0, true, false, 4.0, 4.0)
            .z();
        insta::assert_snapshot!(path.to_string(), @"M0,0 L10,0 Q15,5 10,10 C5,15 0,15 0,10 A2,2 0 1 0 4,4 Z");
    }

    #[test]
    fn straight_path_length_and_midpoint() {
        let path = PathData::new().m(0.0, 0.0).l(100.0, 0.0);
        assert_eq!(path.length(), 100.0);
        assert_eq!(path.point_at(0.5), Some(dvec2(50.0, 0.0)));
        assert_eq!(path.point_at(0.0), Some(dvec2(0.0, 0.0)));
        assert_eq!(path.point_at(1.0), Some(dvec2(100.0, 0.0)));
    }

    #[test]
    fn point_at_walks_across_pieces() {
        let path = PathData::new().m(0.0, 0.0).l(10.0, 0.0).l(10.0, 10.0);
        assert_close(path.point_at(0.75).unwrap(), dvec2(10.0, 5.0));
    }

    #[test]
    fn zero_length_path_answers_with_its_start() {
        let path = PathData::new().m(3.0, 4.0).l(3.0, 4.0);
        assert_eq!(path.length(), 0.0);
        assert_eq!(path.point_at(0.5), Some(dvec2(3.0, 4.0)));
        assert_eq!(path.terminal(false), None);
    }

    #[test]
    fn move_only_path_draws_nothing() {
        let path = PathData::new().m(1.0, 2.0);
        assert!(path.segments().is_empty());
        assert_eq!(path.point_at(0.3), Some(dvec2(1.0, 2.0)));
        assert_eq!(path.bounds(), Some(BBox::new(dvec2(1.0, 2.0), dvec2(1.0, 2.0))));
    }

    #[test]
    fn quadratic_curve_passes_through_its_midpoint() {
        // Symmetric curve: apex at t = 0.5 is (50, 25)
        let path = PathData::new().m(0.0, 0.0).q(50.0, 50.0, 100.0, 0.0);
        let bounds = path.bounds().unwrap();
        assert_close(bounds.max, dvec2(100.0, 25.0));
        assert_close(path.point_at(0.5).unwrap(), dvec2(50.0, 25.0));
    }

    #[test]
    fn terminal_directions_point_outward() {
        let path = PathData::new().m(0.0, 0.0).l(10.0, 0.0).l(10.0, 10.0);
        assert_eq!(path.terminal(true), Some((dvec2(0.0, 0.0), dvec2(-1.0, 0.0))));
        assert_eq!(path.terminal(false), Some((dvec2(10.0, 10.0), dvec2(0.0, 1.0))));
    }

    #[test]
    fn close_returns_to_subpath_start() {
        let path = PathData::new().m(0.0, 0.0).l(4.0, 0.0).l(4.0, 3.0).z();
        assert_eq!(path.length(), 12.0);
    }

    #[test]
    fn non_finite_coordinates_are_detected() {
        assert!(PathData::new().m(0.0, 0.0).l(1.0, 1.0).is_finite());
        assert!(!PathData::new().m(0.0, f64::NAN).l(1.0, 1.0).is_finite());
    }
}
