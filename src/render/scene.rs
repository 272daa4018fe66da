//! Retained scene graph interface
//!
//! The engine does not draw. It describes sub-shapes and hands them to a
//! host scene graph through [`SceneGraph`], reading back live bounds and
//! paths when later steps depend on what the host currently holds.
//! [`MemoryScene`] keeps everything in memory and serves headless hosts and
//! tests.

use std::collections::BTreeMap;

use glam::DVec2;

use super::label::TextAlign;
use super::svg::PathData;
use crate::style::StyleProps;
use crate::types::{BBox, Point};

/// Handle of a shape owned by the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId(pub u64);

/// Handle of a running animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnimationId(pub u64);

/// Translation then rotation (radians) around the shape origin
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub translate: Point,
    pub rotate: f64,
}

impl Transform {
    /// Map a local point into the parent space
    pub fn apply(&self, p: Point) -> Point {
        self.translate + DVec2::from_angle(self.rotate).rotate(p)
    }
}

/// Stroked path shape
#[derive(Debug, Clone, PartialEq)]
pub struct PathStyle {
    pub path: PathData,
    pub stroke: Option<String>,
    pub fill: Option<String>,
    pub line_width: f64,
    pub line_dash: Vec<f64>,
    pub opacity: f64,
    pub z_index: f64,
    pub transform: Transform,
    pub pointer_events: bool,
    /// Room left for the start marker
    pub marker_start_offset: Option<f64>,
    /// Room left for the end marker
    pub marker_end_offset: Option<f64>,
}

/// Box drawn behind the label text
#[derive(Debug, Clone, PartialEq)]
pub struct LabelBackground {
    pub fill: String,
    /// `[top, right, bottom, left]`
    pub padding: [f64; 4],
}

/// Text shape
#[derive(Debug, Clone, PartialEq)]
pub struct LabelShapeStyle {
    pub text: String,
    pub transform: Transform,
    pub text_align: TextAlign,
    pub text_baseline: String,
    pub font_size: f64,
    pub fill: String,
    pub word_wrap_width: f64,
    pub background: Option<LabelBackground>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeStyle {
    Path(PathStyle),
    Label(LabelShapeStyle),
}

impl ShapeStyle {
    pub fn as_path(&self) -> Option<&PathStyle> {
        match self {
            ShapeStyle::Path(style) => Some(style),
            ShapeStyle::Label(_) => None,
        }
    }

    pub fn as_label(&self) -> Option<&LabelShapeStyle> {
        match self {
            ShapeStyle::Label(style) => Some(style),
            ShapeStyle::Path(_) => None,
        }
    }
}

/// One keyframe: target property values at `offset` (0..=1) of the run
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Keyframe {
    pub offset: Option<f64>,
    pub props: StyleProps,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationOptions {
    /// Milliseconds
    pub duration: f64,
    pub delay: f64,
    pub easing: String,
    pub iterations: f64,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            duration: 300.0,
            delay: 0.0,
            easing: "linear".to_string(),
            iterations: 1.0,
        }
    }
}

/// Host scene graph the renderer draws into
pub trait SceneGraph {
    fn create(&mut self, style: ShapeStyle) -> ShapeId;

    fn update(&mut self, id: ShapeId, style: ShapeStyle);

    fn remove(&mut self, id: ShapeId);

    /// Current bounds in the shape's own coordinate space
    fn local_bounds(&self, id: ShapeId) -> Option<BBox>;

    /// Current path of a path shape
    fn path(&self, id: ShapeId) -> Option<PathData>;

    /// Start a keyframe animation; `None` when the host declines
    fn animate(
        &mut self,
        id: ShapeId,
        keyframes: &[Keyframe],
        options: &AnimationOptions,
    ) -> Option<AnimationId>;
}

/// A started animation as recorded by [`MemoryScene`]
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationRecord {
    pub id: AnimationId,
    pub shape: ShapeId,
    pub keyframes: Vec<Keyframe>,
    pub options: AnimationOptions,
}

/// Scene graph kept in memory, with operation counters
#[derive(Debug, Default)]
pub struct MemoryScene {
    shapes: BTreeMap<ShapeId, ShapeStyle>,
    next_id: u64,
    created: usize,
    updated: usize,
    removed: usize,
    animations: Vec<AnimationRecord>,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ShapeId) -> Option<&ShapeStyle> {
        self.shapes.get(&id)
    }

    /// Replace a path shape's path, as a running animation would
    pub fn set_path(&mut self, id: ShapeId, path: PathData) -> bool {
        match self.shapes.get_mut(&id) {
            Some(ShapeStyle::Path(style)) => {
                style.path = path;
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn created(&self) -> usize {
        self.created
    }

    pub fn updated(&self) -> usize {
        self.updated
    }

    pub fn removed(&self) -> usize {
        self.removed
    }

    pub fn animations(&self) -> &[AnimationRecord] {
        &self.animations
    }
}

impl SceneGraph for MemoryScene {
    fn create(&mut self, style: ShapeStyle) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        self.created += 1;
        self.shapes.insert(id, style);
        id
    }

    fn update(&mut self, id: ShapeId, style: ShapeStyle) {
        if let Some(slot) = self.shapes.get_mut(&id) {
            *slot = style;
            self.updated += 1;
        }
    }

    fn remove(&mut self, id: ShapeId) {
        if self.shapes.remove(&id).is_some() {
            self.removed += 1;
        }
    }

    fn local_bounds(&self, id: ShapeId) -> Option<BBox> {
        match self.shapes.get(&id)? {
            ShapeStyle::Path(style) => style.path.bounds(),
            // Text is not measured; a label occupies its anchor
            ShapeStyle::Label(_) => Some(BBox::new(Point::ZERO, Point::ZERO)),
        }
    }

    fn path(&self, id: ShapeId) -> Option<PathData> {
        self.shapes.get(&id)?.as_path().map(|style| style.path.clone())
    }

    fn animate(
        &mut self,
        id: ShapeId,
        keyframes: &[Keyframe],
        options: &AnimationOptions,
    ) -> Option<AnimationId> {
        if !self.shapes.contains_key(&id) {
            return None;
        }
        let anim = AnimationId(self.animations.len() as u64);
        self.animations.push(AnimationRecord {
            id: anim,
            shape: id,
            keyframes: keyframes.to_vec(),
            options: options.clone(),
        });
        Some(anim)
    }
}
