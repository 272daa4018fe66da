//! Edge geometry and shape composition for G6-style graph visualization.
//!
//! The crate turns an edge between two laid-out nodes into the shapes a
//! retained scene graph draws: a key path routed by one of several
//! strategies, an optional halo, arrow markers and a label placed along the
//! path. Data enters through [`model::resolve_edge`], drawing goes through
//! [`render::EdgeShape`] into any [`render::SceneGraph`].

pub mod errors;
mod log;
pub mod model;
pub mod render;
pub mod style;
pub mod types;

pub use errors::{EdgeError, KeywordError, StyleError};
pub use model::{EdgeAttributes, EdgeData, Node, Placement, Port, resolve_edge};
pub use render::{EdgeShape, MemoryScene, PathData, SceneGraph};
pub use style::{EdgeStyle, EdgeStylePatch, StyleValue};
pub use types::{BBox, Point, PointObject, Segment};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::shapes::NodeShape;
    use crate::render::{ShapeStyle, SubShape};
    use glam::dvec2;

    fn nodes() -> Vec<Node> {
        vec![
            Node::new("a", NodeShape::Rect, dvec2(0.0, 0.0), dvec2(40.0, 40.0)),
            Node::new("b", NodeShape::Rect, dvec2(200.0, 0.0), dvec2(40.0, 40.0)),
        ]
    }

    #[test]
    fn resolve_then_render() {
        let style = EdgeStylePatch::from_props([
            ("endArrow", StyleValue::from(true)),
            ("labelText", StyleValue::from("flows")),
        ])
        .unwrap();
        let edge = EdgeData::new("e1", "a", "b").with_style(style);
        let attrs = resolve_edge(&nodes(), &edge, &[]).unwrap();

        let mut scene = MemoryScene::new();
        let mut shape = EdgeShape::new();
        shape.render(&attrs, &mut scene);

        let key = scene
            .get(shape.shape(SubShape::Key).unwrap())
            .and_then(ShapeStyle::as_path)
            .unwrap();
        assert_eq!(key.path.to_string(), "M20,0 L180,0");
        assert!(shape.shape(SubShape::EndArrow).is_some());
        assert!(shape.shape(SubShape::Label).is_some());
        assert_eq!(scene.len(), 3);
    }

    #[test]
    fn resolve_reports_missing_nodes_as_diagnostics() {
        let err = resolve_edge(&nodes(), &EdgeData::new("e1", "a", "zz"), &[]).unwrap_err();
        let report = miette::Report::new(err);
        assert!(report.to_string().contains("unknown node `zz`"));
    }
}
