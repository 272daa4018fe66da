//! Edge rendering
//!
//! This module is organized into submodules:
//! - `defaults`: Default sizes, colors and sampling settings
//! - `geometry`: Point math, outline intersections and rounded polylines
//! - `shapes`: Node outlines and their ray intersections
//! - `connect`: Port lookup and connection points between two nodes
//! - `path_builder`: Key path strategies and self-loops
//! - `label`: Label placement along a path
//! - `symbols`: Arrow marker paths
//! - `svg`: Path data model and SVG path strings
//! - `scene`: Scene graph interface the renderer draws into
//! - `edge`: The composite edge shape

pub mod connect;
pub mod defaults;
pub mod edge;
pub mod geometry;
pub mod label;
pub mod path_builder;
pub mod scene;
pub mod shapes;
pub mod svg;
pub mod symbols;

// Re-export commonly used items
pub use edge::{EdgeAnimation, EdgeShape, FrameCallback, RenderOutcome, SubShape};
pub use label::{LabelPlacement, LabelPosition, MaxWidth, TextAlign};
pub use path_builder::{EdgeRoute, EdgeType, LoopPosition, PathStrategy, build_key_path};
pub use scene::{
    AnimationId, AnimationOptions, Keyframe, MemoryScene, SceneGraph, ShapeId, ShapeStyle,
};
pub use shapes::NodeShape;
pub use svg::{PathCommand, PathData};
pub use symbols::{ArrowType, SymbolFactory};
