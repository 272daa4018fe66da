//! Edge path builder.
//!
//! Turns resolved edge attributes into the key path. Two branches:
//!
//! - **Self-loop**: source and target are the same node. A single cubic
//!   leaves the node, swings out by the loop distance and comes back,
//!   whatever raw points were supplied (those only move the loop's ends).
//! - **Distinct nodes**: the endpoints come from the connection resolver and
//!   the active [`EdgeRoute`] strategy draws between them.
//!
//! # Strategies
//!
//! | `type`             | Path                                                    |
//! |--------------------|---------------------------------------------------------|
//! | `line`             | `M s L t`                                               |
//! | `quadratic`        | `M s Q c t`, control point pushed off the chord         |
//! | `cubic`            | `M s C c1 c2 t`, control points on opposite sides       |
//! | `cubic-horizontal` | `M s C c1 c2 t`, tangents horizontal at both ends       |
//! | `cubic-vertical`   | `M s C c1 c2 t`, tangents vertical at both ends         |
//! | `polyline`         | through the control points, optional rounded corners    |

use std::f64::consts::FRAC_PI_4;
use std::str::FromStr;

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};

use super::connect::{find_port, resolve_endpoints};
use super::defaults;
use super::geometry::{create_radius_path, distance, is_orthogonal, move_to};
use super::svg::PathData;
use crate::errors::KeywordError;
use crate::log::trace;
use crate::model::{EdgeAttributes, Node};
use crate::style::{LoopStyle, RouteStyle};
use crate::types::Point;

// ============================================================================
// Keywords
// ============================================================================

/// Edge `type` keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeType {
    #[default]
    Line,
    Quadratic,
    Cubic,
    CubicHorizontal,
    CubicVertical,
    Polyline,
}

impl FromStr for EdgeType {
    type Err = KeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(EdgeType::Line),
            "quadratic" => Ok(EdgeType::Quadratic),
            "cubic" => Ok(EdgeType::Cubic),
            "cubic-horizontal" => Ok(EdgeType::CubicHorizontal),
            "cubic-vertical" => Ok(EdgeType::CubicVertical),
            "polyline" => Ok(EdgeType::Polyline),
            _ => Err(KeywordError::new(
                s,
                "line, quadratic, cubic, cubic-horizontal, cubic-vertical or polyline",
            )),
        }
    }
}

/// Side of the node a self-loop bulges out of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopPosition {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl LoopPosition {
    /// Unit direction from the node center (screen space, y down)
    pub fn direction(self) -> DVec2 {
        let d = match self {
            LoopPosition::Top => dvec2(0.0, -1.0),
            LoopPosition::Bottom => dvec2(0.0, 1.0),
            LoopPosition::Left => dvec2(-1.0, 0.0),
            LoopPosition::Right => dvec2(1.0, 0.0),
            LoopPosition::TopLeft => dvec2(-1.0, -1.0),
            LoopPosition::TopRight => dvec2(1.0, -1.0),
            LoopPosition::BottomLeft => dvec2(-1.0, 1.0),
            LoopPosition::BottomRight => dvec2(1.0, 1.0),
        };
        d.normalize()
    }
}

impl FromStr for LoopPosition {
    type Err = KeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(LoopPosition::Top),
            "bottom" => Ok(LoopPosition::Bottom),
            "left" => Ok(LoopPosition::Left),
            "right" => Ok(LoopPosition::Right),
            "top-left" | "left-top" => Ok(LoopPosition::TopLeft),
            "top-right" | "right-top" => Ok(LoopPosition::TopRight),
            "bottom-left" | "left-bottom" => Ok(LoopPosition::BottomLeft),
            "bottom-right" | "right-bottom" => Ok(LoopPosition::BottomRight),
            _ => Err(KeywordError::new(
                s,
                "top, bottom, left, right, top-left, top-right, bottom-left or bottom-right",
            )),
        }
    }
}

// ============================================================================
// Strategies
// ============================================================================

/// Draws the key path between two resolved endpoints
#[enum_dispatch]
pub trait PathStrategy {
    fn key_path(&self, source: Point, target: Point) -> PathData;
}

/// Straight segment
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Line;

impl PathStrategy for Line {
    fn key_path(&self, source: Point, target: Point) -> PathData {
        PathData::new().move_to(source).line_to(target)
    }
}

/// Single control point pushed `curve_offset` off the chord at
/// `curve_position` along it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadratic {
    pub curve_offset: f64,
    pub curve_position: f64,
}

impl Default for Quadratic {
    fn default() -> Self {
        Self {
            curve_offset: defaults::QUADRATIC_CURVE_OFFSET,
            curve_position: defaults::CURVE_POSITION,
        }
    }
}

impl PathStrategy for Quadratic {
    fn key_path(&self, source: Point, target: Point) -> PathData {
        let ctrl = get_curve_control_point(source, target, self.curve_position, self.curve_offset);
        PathData::new().move_to(source).quad_to(ctrl, target)
    }
}

/// Two control points mirrored across the chord, giving an S-bend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cubic {
    pub curve_offset: f64,
    pub curve_position: f64,
}

impl Default for Cubic {
    fn default() -> Self {
        Self {
            curve_offset: defaults::CUBIC_CURVE_OFFSET,
            curve_position: defaults::CURVE_POSITION,
        }
    }
}

impl PathStrategy for Cubic {
    fn key_path(&self, source: Point, target: Point) -> PathData {
        let c1 = get_curve_control_point(source, target, self.curve_position, self.curve_offset);
        let c2 = get_curve_control_point(source, target, 1.0 - self.curve_position, -self.curve_offset);
        PathData::new().move_to(source).cubic_to(c1, c2, target)
    }
}

/// Cubic whose tangents are horizontal at both ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicHorizontal {
    pub curve_offset: f64,
    pub curve_position: f64,
}

impl Default for CubicHorizontal {
    fn default() -> Self {
        Self {
            curve_offset: 0.0,
            curve_position: defaults::CURVE_POSITION,
        }
    }
}

impl PathStrategy for CubicHorizontal {
    fn key_path(&self, source: Point, target: Point) -> PathData {
        let dx = target.x - source.x;
        let c1 = dvec2(source.x + dx * self.curve_position + self.curve_offset, source.y);
        let c2 = dvec2(source.x + dx * (1.0 - self.curve_position) - self.curve_offset, target.y);
        PathData::new().move_to(source).cubic_to(c1, c2, target)
    }
}

/// Cubic whose tangents are vertical at both ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicVertical {
    pub curve_offset: f64,
    pub curve_position: f64,
}

impl Default for CubicVertical {
    fn default() -> Self {
        Self {
            curve_offset: 0.0,
            curve_position: defaults::CURVE_POSITION,
        }
    }
}

impl PathStrategy for CubicVertical {
    fn key_path(&self, source: Point, target: Point) -> PathData {
        let dy = target.y - source.y;
        let c1 = dvec2(source.x, source.y + dy * self.curve_position + self.curve_offset);
        let c2 = dvec2(target.x, source.y + dy * (1.0 - self.curve_position) - self.curve_offset);
        PathData::new().move_to(source).cubic_to(c1, c2, target)
    }
}

/// Polyline through explicit control points
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    pub control_points: Vec<Point>,
    /// Corner radius; `0` keeps sharp corners
    pub radius: f64,
    /// Replace every diagonal leg by a horizontal-vertical-horizontal elbow
    pub orthogonal: bool,
}

impl Polyline {
    fn points(&self, source: Point, target: Point) -> Vec<Point> {
        let mut raw = Vec::with_capacity(self.control_points.len() + 2);
        raw.push(source);
        raw.extend_from_slice(&self.control_points);
        raw.push(target);

        if !self.orthogonal {
            return raw;
        }

        let mut points = vec![source];
        for pair in raw.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if !is_orthogonal(a, b) {
                let mid_x = (a.x + b.x) / 2.0;
                points.push(dvec2(mid_x, a.y));
                points.push(dvec2(mid_x, b.y));
            }
            points.push(b);
        }
        points
    }
}

impl PathStrategy for Polyline {
    fn key_path(&self, source: Point, target: Point) -> PathData {
        create_radius_path(&self.points(source, target), self.radius)
    }
}

/// Closed set of path strategies, selected by the edge `type`
#[enum_dispatch(PathStrategy)]
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeRoute {
    Line,
    Quadratic,
    Cubic,
    CubicHorizontal,
    CubicVertical,
    Polyline,
}

impl EdgeRoute {
    pub fn from_style(route: &RouteStyle) -> Self {
        match route.edge_type {
            EdgeType::Line => Line.into(),
            EdgeType::Quadratic => {
                let d = Quadratic::default();
                Quadratic {
                    curve_offset: route.curve_offset.unwrap_or(d.curve_offset),
                    curve_position: route.curve_position.unwrap_or(d.curve_position),
                }
                .into()
            }
            EdgeType::Cubic => {
                let d = Cubic::default();
                Cubic {
                    curve_offset: route.curve_offset.unwrap_or(d.curve_offset),
                    curve_position: route.curve_position.unwrap_or(d.curve_position),
                }
                .into()
            }
            EdgeType::CubicHorizontal => {
                let d = CubicHorizontal::default();
                CubicHorizontal {
                    curve_offset: route.curve_offset.unwrap_or(d.curve_offset),
                    curve_position: route.curve_position.unwrap_or(d.curve_position),
                }
                .into()
            }
            EdgeType::CubicVertical => {
                let d = CubicVertical::default();
                CubicVertical {
                    curve_offset: route.curve_offset.unwrap_or(d.curve_offset),
                    curve_position: route.curve_position.unwrap_or(d.curve_position),
                }
                .into()
            }
            EdgeType::Polyline => Polyline {
                control_points: route.control_points.clone(),
                radius: route.radius,
                orthogonal: route.router_orthogonal,
            }
            .into(),
        }
    }
}

/// Control point `position` of the way from `source` to `target`, pushed
/// `offset` along the chord's normal `(dy, -dx)`.
///
/// Coincident endpoints have no normal; the source is returned.
pub fn get_curve_control_point(source: Point, target: Point, position: f64, offset: f64) -> Point {
    if source == target {
        return source;
    }
    let delta = target - source;
    let normal = dvec2(delta.y, -delta.x).normalize_or_zero();
    source + delta * position + normal * offset
}

// ============================================================================
// Self-loops
// ============================================================================

/// Self-loop on `node`.
///
/// Without ports the ends sit on the outline a quarter turn either side of
/// the loop direction. A single port key serves both ends. Raw points
/// replace the computed ends. The distance defaults to the node's larger
/// side.
pub fn get_cubic_loop_path(
    node: &Node,
    loop_style: &LoopStyle,
    source_port: Option<&str>,
    target_port: Option<&str>,
    source_point: Option<Point>,
    target_point: Option<Point>,
) -> PathData {
    let center = node.center;
    let direction = loop_style.position.direction();
    let dist = loop_style
        .dist
        .unwrap_or_else(|| node.size.x.max(node.size.y));

    let port_position = |key: Option<&str>| find_port(node, key).map(|port| node.port_position(port));
    let source_port_pos = port_position(source_port);
    let target_port_pos = port_position(target_port);

    let (mut source, mut target) = match (source_port_pos, target_port_pos) {
        (Some(s), Some(t)) => (s, t),
        (Some(p), None) | (None, Some(p)) => (p, p),
        (None, None) => {
            let before = node.intersect_point(center + DVec2::from_angle(-FRAC_PI_4).rotate(direction));
            let after = node.intersect_point(center + DVec2::from_angle(FRAC_PI_4).rotate(direction));
            if loop_style.clockwise {
                (before, after)
            } else {
                (after, before)
            }
        }
    };
    if let Some(p) = source_point {
        source = p;
    }
    if let Some(p) = target_point {
        target = p;
    }

    let (c1, c2) = get_cubic_loop_control_points(center, source, target, dist, direction, loop_style.clockwise);
    trace!(?source, ?target, ?c1, ?c2, "loop path");
    PathData::new().move_to(source).cubic_to(c1, c2, target)
}

/// Control points pushing a loop `dist` beyond its ends.
///
/// Distinct ends are each pushed radially away from the center. Coincident
/// ends (a single port) fan out either side of the radial direction.
fn get_cubic_loop_control_points(
    center: Point,
    source: Point,
    target: Point,
    dist: f64,
    fallback_direction: DVec2,
    clockwise: bool,
) -> (Point, Point) {
    if source != target {
        return (
            move_to(center, source, distance(center, source) + dist),
            move_to(center, target, distance(center, target) + dist),
        );
    }

    let mut d = (source - center).normalize_or_zero();
    if d == DVec2::ZERO {
        d = fallback_direction;
    }
    let perp = dvec2(-d.y, d.x);
    let tip = source + d * dist;
    let c1 = tip - perp * (dist / 2.0);
    let c2 = tip + perp * (dist / 2.0);
    if clockwise { (c1, c2) } else { (c2, c1) }
}

// ============================================================================
// Entry point
// ============================================================================

/// Key path for an edge: the loop branch for same-node edges, the route
/// strategy between resolved endpoints otherwise.
pub fn build_key_path(attributes: &EdgeAttributes) -> PathData {
    if attributes.is_loop() {
        return get_cubic_loop_path(
            &attributes.source_node,
            &attributes.style.loop_style,
            attributes.source_port.as_deref(),
            attributes.target_port.as_deref(),
            attributes.source_point,
            attributes.target_point,
        );
    }

    let (source, target) = resolve_endpoints(
        &attributes.source_node,
        &attributes.target_node,
        attributes.source_port.as_deref(),
        attributes.target_port.as_deref(),
        attributes.source_point,
        attributes.target_point,
    );
    EdgeRoute::from_style(&attributes.style.route).key_path(source, target)
}
