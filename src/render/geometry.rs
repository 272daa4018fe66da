//! Geometry functions: point helpers, intersections and corner rounding
//!
//! Everything here is pure and total. Degenerate input (zero-length
//! directions, empty boxes, parallel lines) yields a defined fallback point
//! or `None`, never a NaN produced by dividing through zero.

use glam::{DVec2, dvec2};

use super::svg::PathData;
use crate::types::{BBox, Point, PointObject, Segment};

// ============================================================================
// Conversions and small helpers
// ============================================================================

pub fn parse_point(p: PointObject) -> Point {
    p.into()
}

pub fn to_point_object(p: Point) -> PointObject {
    p.into()
}

/// Round each coordinate to `precision` decimal digits.
pub fn round(p: Point, precision: i32) -> Point {
    let factor = 10_f64.powi(precision);
    dvec2((p.x * factor).round() / factor, (p.y * factor).round() / factor)
}

pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Move `dist` from `from` toward `to`.
///
/// Extrapolates past `to` when `dist` is longer than the segment. A
/// zero-length direction leaves `from` where it is.
pub fn move_to(from: Point, to: Point, dist: f64) -> Point {
    from + (to - from).normalize_or_zero() * dist
}

pub fn is_horizontal(a: Point, b: Point) -> bool {
    a.y == b.y
}

pub fn is_vertical(a: Point, b: Point) -> bool {
    a.x == b.x
}

pub fn is_orthogonal(a: Point, b: Point) -> bool {
    is_horizontal(a, b) || is_vertical(a, b)
}

/// The triangle `a, b, c` has zero area.
pub fn is_collinear(a: Point, b: Point, c: Point) -> bool {
    (b - a).perp_dot(c - a) == 0.0
}

pub fn is_lines_parallel(s1: Segment, s2: Segment) -> bool {
    (s1[1] - s1[0]).perp_dot(s2[1] - s2[0]) == 0.0
}

/// Rotate `p` around `origin` by `angle` radians.
pub fn rotate_around(p: Point, origin: Point, angle: f64) -> Point {
    origin + DVec2::from_angle(angle).rotate(p - origin)
}

/// Corners of a box, clockwise from the top-left.
pub fn get_bbox_points(bbox: &BBox) -> [Point; 4] {
    bbox.corners()
}

/// Vertices of a diamond of the given size, relative to its center.
///
/// Zero-sized input keeps the signed zeros negation produces.
pub fn get_diamond_points(width: f64, height: f64) -> Vec<Point> {
    vec![
        dvec2(0.0, -height / 2.0),
        dvec2(width / 2.0, 0.0),
        dvec2(0.0, height / 2.0),
        dvec2(-width / 2.0, 0.0),
    ]
}

/// The pair (one point from each series) with the smallest distance.
///
/// Ties keep the pair found first. `None` when either series is empty.
pub fn find_nearest_points(a: &[Point], b: &[Point]) -> Option<(Point, Point)> {
    let mut best: Option<(Point, Point, f64)> = None;
    for &p in a {
        for &q in b {
            let d = p.distance(q);
            if best.is_none_or(|(_, _, min)| d < min) {
                best = Some((p, q, d));
            }
        }
    }
    best.map(|(p, q, _)| (p, q))
}

// ============================================================================
// Intersections
// ============================================================================

/// Solve `s1[0] + t * d1 == s2[0] + u * d2`, returning `(t, u)`.
fn line_parameters(s1: Segment, s2: Segment) -> Option<(f64, f64)> {
    let d1 = s1[1] - s1[0];
    let d2 = s2[1] - s2[0];
    let denom = d1.perp_dot(d2);
    if denom == 0.0 {
        return None;
    }
    let offset = s2[0] - s1[0];
    Some((offset.perp_dot(d2) / denom, offset.perp_dot(d1) / denom))
}

/// Crossing point of two segments.
///
/// `None` when the segments are parallel (coincident included) or when the
/// crossing of their supporting lines lies outside either segment.
pub fn get_lines_intersection(s1: Segment, s2: Segment) -> Option<Point> {
    let (t, u) = line_parameters(s1, s2)?;
    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return None;
    }
    Some(s1[0] + (s1[1] - s1[0]) * t)
}

/// Crossing point of the infinite lines through two segments.
pub fn get_lines_intersection_extended(s1: Segment, s2: Segment) -> Option<Point> {
    let (t, _) = line_parameters(s1, s2)?;
    Some(s1[0] + (s1[1] - s1[0]) * t)
}

/// Where the ray from the box center toward `from` leaves the box.
///
/// An aim point on the center returns the center.
pub fn get_rect_intersect_point(from: Point, bbox: &BBox) -> Point {
    let center = bbox.center();
    let half = bbox.half_size();
    let delta = from - center;

    let mut scale = f64::INFINITY;
    if delta.x != 0.0 {
        scale = scale.min(half.x / delta.x.abs());
    }
    if delta.y != 0.0 {
        scale = scale.min(half.y / delta.y.abs());
    }
    if !scale.is_finite() {
        return center;
    }
    center + delta * scale
}

/// Where the ray from the ellipse center toward `from` crosses the ellipse
/// inscribed in `bbox`.
///
/// An aim point on the center falls back to the +x direction, giving
/// `(cx + rx, cy)`. A collapsed ellipse returns its center.
pub fn get_ellipse_intersect_point(from: Point, bbox: &BBox) -> Point {
    let center = bbox.center();
    let radii = bbox.half_size();
    if radii.x <= 0.0 || radii.y <= 0.0 {
        return center;
    }

    let mut delta = from - center;
    if delta == DVec2::ZERO {
        delta = DVec2::X;
    }

    // Scale so that (dx/rx)^2 + (dy/ry)^2 == 1
    let denom = (delta / radii).length_squared();
    center + delta / denom.sqrt()
}

/// Where the segment `center -> from` crosses a polygon outline.
///
/// `vertices` are relative to `center`. With several crossings (concave
/// outlines) the one nearest to `center` wins; without any, `center` is
/// returned.
pub fn get_polygon_intersect_point(from: Point, center: Point, vertices: &[Point]) -> Point {
    let ray: Segment = [center, from];
    let n = vertices.len();
    (0..n)
        .filter_map(|i| {
            let edge = [center + vertices[i], center + vertices[(i + 1) % n]];
            get_lines_intersection(ray, edge)
        })
        .min_by(|a, b| a.distance_squared(center).total_cmp(&b.distance_squared(center)))
        .unwrap_or(center)
}

// ============================================================================
// Corner rounding
// ============================================================================

/// Calculate a point along the line from `from` to `to` that is `r` units
/// prior to reaching `to`, except if the path is less than 2*r total,
/// return the midpoint.
///
/// Returns (midpoint, is_mid) where is_mid=true if radius was clamped to midpoint.
fn radius_midpoint(from: Point, to: Point, r: f64) -> (Point, bool) {
    let delta = to - from;
    let dist = delta.length();

    if dist <= 0.0 {
        return (to, false);
    }

    let dir = delta / dist;

    if r > 0.5 * dist {
        ((from + to) * 0.5, true)
    } else {
        (to - dir * r, false)
    }
}

/// Polyline through `points` whose interior corners are rounded.
///
/// 1. Move to the first point
/// 2. Line to a point `r` before the second point
/// 3. For each interior vertex, a quadratic with the vertex as control point
///    ending `r` past it, then a line toward the next corner unless the
///    radius was clamped to a midpoint
/// 4. Line to the last point
///
/// `r <= 0` draws plain line segments.
pub fn create_radius_path(points: &[Point], r: f64) -> PathData {
    let Some((&first, rest)) = points.split_first() else {
        return PathData::new();
    };

    let mut path = PathData::new().move_to(first);
    if rest.is_empty() {
        return path;
    }
    if r <= 0.0 {
        for &p in rest {
            path = path.line_to(p);
        }
        return path;
    }

    let n = points.len();
    let (m, _) = radius_midpoint(points[0], points[1], r);
    path = path.line_to(m);

    for i in 1..n - 1 {
        let vertex = points[i];
        let next = points[i + 1];

        let (m, is_mid) = radius_midpoint(next, vertex, r);
        path = path.quad_to(vertex, m);

        if !is_mid {
            let (m2, _) = radius_midpoint(vertex, next, r);
            path = path.line_to(m2);
        }
    }

    path.line_to(points[n - 1])
}
