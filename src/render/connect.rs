//! Connection points between two nodes
//!
//! Each side of an edge has a reference shape: the node itself, or one of
//! its ports when a port key names an existing port. The side's connection
//! point is where the ray from its reference center toward the other side's
//! reference center leaves its own outline. Neither side looks at the
//! point computed for the other, so the result does not depend on order.

use crate::log::warn;
use crate::model::{Node, Port};
use crate::types::{BBox, Point};

/// Reference shape for one side of an edge
#[derive(Debug, Clone, Copy)]
pub enum Anchor<'a> {
    Node(&'a Node),
    Port { node: &'a Node, port: &'a Port },
}

impl<'a> Anchor<'a> {
    /// The port when one was found, the node otherwise
    pub fn from_port(node: &'a Node, port: Option<&'a Port>) -> Self {
        match port {
            Some(port) => Anchor::Port { node, port },
            None => Anchor::Node(node),
        }
    }

    pub fn center(&self) -> Point {
        match *self {
            Anchor::Node(node) => node.center,
            Anchor::Port { node, port } => node.port_position(port),
        }
    }

    /// Where the ray from this anchor's center toward `toward` leaves it.
    ///
    /// A port without radius is a bare point and answers with its position.
    pub fn intersect_point(&self, toward: Point) -> Point {
        match *self {
            Anchor::Node(node) => node.intersect_point(toward),
            Anchor::Port { node, port } => {
                let position = node.port_position(port);
                if port.r > 0.0 {
                    let d = port.r * 2.0;
                    super::geometry::get_ellipse_intersect_point(
                        toward,
                        &BBox::from_center_size(position, Point::new(d, d)),
                    )
                } else {
                    position
                }
            }
        }
    }
}

/// Look up a port by key; a missing port is not an error.
pub fn find_port<'a>(node: &'a Node, key: Option<&str>) -> Option<&'a Port> {
    let key = key?;
    let port = node.port(key);
    if port.is_none() {
        warn!(node = %node.id, port = key, "port not found, connecting to the node");
    }
    port
}

/// Ports for both sides of an edge
pub fn find_ports<'a>(
    source: &'a Node,
    target: &'a Node,
    source_key: Option<&str>,
    target_key: Option<&str>,
) -> (Option<&'a Port>, Option<&'a Port>) {
    (find_port(source, source_key), find_port(target, target_key))
}

/// Connection point of `anchor` aiming at the center of `opposite`
pub fn get_connection_point(anchor: &Anchor<'_>, opposite: &Anchor<'_>) -> Point {
    anchor.intersect_point(opposite.center())
}

/// Endpoints of an edge between two (distinct) nodes.
///
/// When both explicit points are given they are returned unchanged;
/// a single explicit point is ignored.
pub fn resolve_endpoints(
    source: &Node,
    target: &Node,
    source_port: Option<&str>,
    target_port: Option<&str>,
    explicit_source: Option<Point>,
    explicit_target: Option<Point>,
) -> (Point, Point) {
    if let (Some(s), Some(t)) = (explicit_source, explicit_target) {
        return (s, t);
    }

    let (sp, tp) = find_ports(source, target, source_port, target_port);
    let source_anchor = Anchor::from_port(source, sp);
    let target_anchor = Anchor::from_port(target, tp);

    (
        get_connection_point(&source_anchor, &target_anchor),
        get_connection_point(&target_anchor, &source_anchor),
    )
}
