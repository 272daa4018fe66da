//! Node outlines edges attach to
//!
//! A node is described by its center, its size and one of a closed set of
//! outlines. Each outline knows where a ray leaving its center crosses the
//! boundary, which is all the connection resolver needs.

use std::f64::consts::FRAC_PI_6;
use std::fmt;
use std::str::FromStr;

use glam::{DVec2, dvec2};

use super::geometry::{
    get_diamond_points, get_ellipse_intersect_point, get_polygon_intersect_point,
    get_rect_intersect_point,
};
use crate::errors::KeywordError;
use crate::types::{BBox, Point};

/// Which way a triangle's apex points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriangleDirection {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

/// Outline of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeShape {
    /// Circle of diameter `min(width, height)`
    #[default]
    Circle,
    Ellipse,
    Rect,
    Diamond,
    Triangle(TriangleDirection),
    Hexagon,
}

impl NodeShape {
    /// Polygon vertices relative to the node center, `None` for round and
    /// rectangular outlines that have a dedicated routine.
    pub fn polygon(self, size: DVec2) -> Option<Vec<Point>> {
        match self {
            NodeShape::Circle | NodeShape::Ellipse | NodeShape::Rect => None,
            NodeShape::Diamond => Some(get_diamond_points(size.x, size.y)),
            NodeShape::Triangle(direction) => Some(get_triangle_points(size.x, size.y, direction)),
            NodeShape::Hexagon => Some(get_hexagon_points(size.x.min(size.y) / 2.0)),
        }
    }

    /// Box the outline is inscribed in
    pub fn bounds(self, center: Point, size: DVec2) -> BBox {
        match self {
            NodeShape::Circle => {
                let d = size.x.min(size.y);
                BBox::from_center_size(center, dvec2(d, d))
            }
            _ => BBox::from_center_size(center, size),
        }
    }

    /// Where the ray from `center` toward `toward` leaves the outline.
    pub fn intersect_point(self, center: Point, size: DVec2, toward: Point) -> Point {
        match self {
            NodeShape::Circle | NodeShape::Ellipse => {
                get_ellipse_intersect_point(toward, &self.bounds(center, size))
            }
            NodeShape::Rect => get_rect_intersect_point(toward, &self.bounds(center, size)),
            NodeShape::Diamond | NodeShape::Triangle(_) | NodeShape::Hexagon => {
                let vertices = self.polygon(size).unwrap_or_default();
                get_polygon_intersect_point(toward, center, &vertices)
            }
        }
    }
}

/// Triangle vertices relative to the center, apex toward `direction`.
pub fn get_triangle_points(width: f64, height: f64, direction: TriangleDirection) -> Vec<Point> {
    let hw = width / 2.0;
    let hh = height / 2.0;
    match direction {
        TriangleDirection::Up => vec![dvec2(-hw, hh), dvec2(hw, hh), dvec2(0.0, -hh)],
        TriangleDirection::Down => vec![dvec2(-hw, -hh), dvec2(hw, -hh), dvec2(0.0, hh)],
        TriangleDirection::Left => vec![dvec2(-hw, 0.0), dvec2(hw, hh), dvec2(hw, -hh)],
        TriangleDirection::Right => vec![dvec2(-hw, hh), dvec2(-hw, -hh), dvec2(hw, 0.0)],
    }
}

/// Pointy-top hexagon of circumradius `r`, relative to its center.
pub fn get_hexagon_points(r: f64) -> Vec<Point> {
    // Vertices every 60 degrees starting straight down (screen y grows down)
    (0..6)
        .map(|i| {
            let angle = FRAC_PI_6 * 3.0 - f64::from(i) * FRAC_PI_6 * 2.0;
            dvec2(r * angle.cos(), r * angle.sin())
        })
        .map(|p| dvec2(clean_zero(p.x), clean_zero(p.y)))
        .collect()
}

/// Snap trigonometric noise around zero back to zero.
fn clean_zero(v: f64) -> f64 {
    if v.abs() < 1e-12 { 0.0 } else { v }
}

impl FromStr for TriangleDirection {
    type Err = KeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(TriangleDirection::Up),
            "down" => Ok(TriangleDirection::Down),
            "left" => Ok(TriangleDirection::Left),
            "right" => Ok(TriangleDirection::Right),
            _ => Err(KeywordError::new(s, "up, down, left or right")),
        }
    }
}

impl FromStr for NodeShape {
    type Err = KeywordError;

    /// Accepts `circle`, `ellipse`, `rect`, `diamond`, `hexagon`, `triangle`
    /// (apex up) and `triangle-<direction>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const EXPECTED: &str = "circle, ellipse, rect, diamond, hexagon or triangle[-up|-down|-left|-right]";
        match s {
            "circle" => Ok(NodeShape::Circle),
            "ellipse" => Ok(NodeShape::Ellipse),
            "rect" => Ok(NodeShape::Rect),
            "diamond" => Ok(NodeShape::Diamond),
            "hexagon" => Ok(NodeShape::Hexagon),
            "triangle" => Ok(NodeShape::Triangle(TriangleDirection::Up)),
            _ => s
                .strip_prefix("triangle-")
                .and_then(|dir| dir.parse().ok())
                .map(NodeShape::Triangle)
                .ok_or_else(|| KeywordError::new(s, EXPECTED)),
        }
    }
}

impl fmt::Display for NodeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeShape::Circle => f.write_str("circle"),
            NodeShape::Ellipse => f.write_str("ellipse"),
            NodeShape::Rect => f.write_str("rect"),
            NodeShape::Diamond => f.write_str("diamond"),
            NodeShape::Hexagon => f.write_str("hexagon"),
            NodeShape::Triangle(TriangleDirection::Up) => f.write_str("triangle"),
            NodeShape::Triangle(TriangleDirection::Down) => f.write_str("triangle-down"),
            NodeShape::Triangle(TriangleDirection::Left) => f.write_str("triangle-left"),
            NodeShape::Triangle(TriangleDirection::Right) => f.write_str("triangle-right"),
        }
    }
}
