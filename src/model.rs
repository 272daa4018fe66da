//! Node and edge data as handed over by the data layer
//!
//! [`resolve_edge`] is the boundary where caller data enters the engine:
//! node references are checked, geometry is validated and style layers are
//! merged into the [`EdgeAttributes`] the renderer consumes.

use std::str::FromStr;

use glam::{DVec2, dvec2};

use crate::errors::{EdgeError, KeywordError};
use crate::log::debug;
use crate::render::shapes::NodeShape;
use crate::style::{EdgeStyle, EdgeStylePatch};
use crate::types::{BBox, Point};

/// Where a port sits on its node's bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Placement {
    Left,
    Right,
    Top,
    Bottom,
    LeftTop,
    RightTop,
    LeftBottom,
    RightBottom,
    #[default]
    Center,
    /// Fractions of the box width and height, from the top-left corner
    Ratio(f64, f64),
}

impl Placement {
    pub fn ratio(self) -> DVec2 {
        match self {
            Placement::Left => dvec2(0.0, 0.5),
            Placement::Right => dvec2(1.0, 0.5),
            Placement::Top => dvec2(0.5, 0.0),
            Placement::Bottom => dvec2(0.5, 1.0),
            Placement::LeftTop => dvec2(0.0, 0.0),
            Placement::RightTop => dvec2(1.0, 0.0),
            Placement::LeftBottom => dvec2(0.0, 1.0),
            Placement::RightBottom => dvec2(1.0, 1.0),
            Placement::Center => dvec2(0.5, 0.5),
            Placement::Ratio(x, y) => dvec2(x, y),
        }
    }
}

impl FromStr for Placement {
    type Err = KeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Placement::Left),
            "right" => Ok(Placement::Right),
            "top" => Ok(Placement::Top),
            "bottom" => Ok(Placement::Bottom),
            "left-top" | "top-left" => Ok(Placement::LeftTop),
            "right-top" | "top-right" => Ok(Placement::RightTop),
            "left-bottom" | "bottom-left" => Ok(Placement::LeftBottom),
            "right-bottom" | "bottom-right" => Ok(Placement::RightBottom),
            "center" => Ok(Placement::Center),
            _ => Err(KeywordError::new(
                s,
                "left, right, top, bottom, left-top, right-top, left-bottom, right-bottom or center",
            )),
        }
    }
}

/// Named attachment point on a node
#[derive(Debug, Clone, PartialEq)]
pub struct Port {
    pub key: String,
    pub placement: Placement,
    /// Radius of the port's own circle; `0` makes it a bare point
    pub r: f64,
}

impl Port {
    pub fn new(key: impl Into<String>, placement: Placement) -> Self {
        Self {
            key: key.into(),
            placement,
            r: 0.0,
        }
    }

    pub fn with_radius(mut self, r: f64) -> Self {
        self.r = r;
        self
    }
}

/// Snapshot of a node's geometry
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub shape: NodeShape,
    pub center: Point,
    pub size: DVec2,
    pub ports: Vec<Port>,
}

impl Node {
    pub fn new(id: impl Into<String>, shape: NodeShape, center: Point, size: DVec2) -> Self {
        Self {
            id: id.into(),
            shape,
            center,
            size,
            ports: Vec::new(),
        }
    }

    pub fn with_port(mut self, port: Port) -> Self {
        self.ports.push(port);
        self
    }

    pub fn bbox(&self) -> BBox {
        BBox::from_center_size(self.center, self.size)
    }

    pub fn port(&self, key: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.key == key)
    }

    /// Canvas position of `port`, placed on this node's bounding box
    pub fn port_position(&self, port: &Port) -> Point {
        let bbox = self.bbox();
        bbox.min + port.placement.ratio() * bbox.size()
    }

    /// Where the ray from the center toward `toward` leaves the outline
    pub fn intersect_point(&self, toward: Point) -> Point {
        self.shape.intersect_point(self.center, self.size, toward)
    }

    pub fn is_finite(&self) -> bool {
        self.center.is_finite() && self.size.is_finite()
    }
}

pub fn is_same_node(a: &Node, b: &Node) -> bool {
    a.id == b.id
}

/// Edge record from the data layer
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EdgeData {
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_port: Option<String>,
    pub target_port: Option<String>,
    /// Raw endpoints; they win over node geometry only when both are set
    pub source_point: Option<Point>,
    pub target_point: Option<Point>,
    pub style: EdgeStylePatch,
}

impl EdgeData {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            ..Self::default()
        }
    }

    pub fn with_ports(mut self, source_port: Option<&str>, target_port: Option<&str>) -> Self {
        self.source_port = source_port.map(str::to_string);
        self.target_port = target_port.map(str::to_string);
        self
    }

    pub fn with_points(mut self, source_point: Point, target_point: Point) -> Self {
        self.source_point = Some(source_point);
        self.target_point = Some(target_point);
        self
    }

    pub fn with_style(mut self, style: EdgeStylePatch) -> Self {
        self.style = style;
        self
    }
}

/// Everything the renderer needs for one edge
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeAttributes {
    pub source_node: Node,
    pub target_node: Node,
    pub source_port: Option<String>,
    pub target_port: Option<String>,
    pub source_point: Option<Point>,
    pub target_point: Option<Point>,
    pub style: EdgeStyle,
}

impl EdgeAttributes {
    /// Attributes for an edge between two nodes with default style
    pub fn between(source_node: Node, target_node: Node) -> Self {
        Self {
            source_node,
            target_node,
            source_port: None,
            target_port: None,
            source_point: None,
            target_point: None,
            style: EdgeStyle::default(),
        }
    }

    pub fn is_loop(&self) -> bool {
        is_same_node(&self.source_node, &self.target_node)
    }
}

/// Resolve `edge` against `nodes` and merge its style over `layers`.
///
/// `layers` are applied in order (defaults first, theme, state...) and the
/// edge's own style goes on top.
pub fn resolve_edge(
    nodes: &[Node],
    edge: &EdgeData,
    layers: &[EdgeStylePatch],
) -> Result<EdgeAttributes, EdgeError> {
    let lookup = |id: &str| -> Result<Node, EdgeError> {
        let node = nodes.iter().find(|n| n.id == id).ok_or_else(|| EdgeError::UnknownNode {
            edge: edge.id.clone(),
            node: id.to_string(),
        })?;
        if !node.is_finite() {
            return Err(EdgeError::InvalidGeometry { node: id.to_string() });
        }
        Ok(node.clone())
    };

    let source_node = lookup(&edge.source)?;
    let target_node = lookup(&edge.target)?;

    let merged = layers
        .iter()
        .chain(std::iter::once(&edge.style))
        .fold(EdgeStylePatch::default(), |acc, layer| acc.merge(layer));

    debug!(edge = %edge.id, source = %edge.source, target = %edge.target, "resolved edge");

    Ok(EdgeAttributes {
        source_node,
        target_node,
        source_port: edge.source_port.clone(),
        target_port: edge.target_port.clone(),
        source_point: edge.source_point,
        target_point: edge.target_point,
        style: merged.resolve(),
    })
}
