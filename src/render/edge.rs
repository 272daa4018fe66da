//! Composite edge shape
//!
//! One edge is drawn as up to five sub-shapes: the key path, a halo under
//! it, a marker at either end and a label. [`EdgeShape::render`] recomputes
//! all of them from the edge attributes and upserts each one: create when
//! absent, update in place when present, remove when no longer wanted.
//! Rendering the same attributes twice therefore creates and removes
//! nothing.
//!
//! Order matters. The key path is written first; markers and label then
//! read the key's live path and bounds back from the scene, so they follow
//! whatever the host currently displays (including mid-animation).

use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::fmt;

use super::label::{get_label_position, get_word_wrap_width_by_ends};
use super::path_builder::build_key_path;
use super::scene::{
    AnimationId, AnimationOptions, Keyframe, LabelBackground, LabelShapeStyle, PathStyle,
    SceneGraph, ShapeId, ShapeStyle, Transform,
};
use super::svg::PathData;
use crate::log::{debug, warn};
use crate::model::EdgeAttributes;
use crate::style::{ArrowStyle, EdgeStyle, parse_padding};

/// Named parts of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SubShape {
    Key,
    Halo,
    StartArrow,
    EndArrow,
    Label,
}

/// What [`EdgeShape::render`] managed to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Key and every enabled dependent are up to date
    Drawn,
    /// The key path has zero length; dependents were removed
    KeyOnly,
    /// The key path had non-finite coordinates; nothing is drawn
    Aborted,
}

/// One edge and the scene shapes it owns
#[derive(Debug, Default)]
pub struct EdgeShape {
    attributes: Option<EdgeAttributes>,
    shapes: BTreeMap<SubShape, ShapeId>,
}

impl EdgeShape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scene handle of a sub-shape, if it is currently drawn
    pub fn shape(&self, which: SubShape) -> Option<ShapeId> {
        self.shapes.get(&which).copied()
    }

    /// Attributes of the last render
    pub fn attributes(&self) -> Option<&EdgeAttributes> {
        self.attributes.as_ref()
    }

    /// Recompute every sub-shape from `attributes`.
    pub fn render<S: SceneGraph>(&mut self, attributes: &EdgeAttributes, scene: &mut S) -> RenderOutcome {
        self.attributes = Some(attributes.clone());
        let style = &attributes.style;

        // 1. key shape
        let Some(key_style) = key_style(attributes) else {
            warn!("edge key path is not finite, removing edge shapes");
            self.clear(scene);
            return RenderOutcome::Aborted;
        };
        let zero_length = key_style.path.length() == 0.0;
        self.upsert(SubShape::Key, Some(ShapeStyle::Path(key_style.clone())), scene);

        if zero_length {
            debug!("edge key path has zero length, skipping dependents");
            for which in [SubShape::StartArrow, SubShape::EndArrow, SubShape::Label, SubShape::Halo] {
                self.upsert(which, None, scene);
            }
            return RenderOutcome::KeyOnly;
        }

        // 2. arrows
        self.draw_arrow(style, true, scene);
        self.draw_arrow(style, false, scene);

        // 3. label
        self.draw_label(style, scene);

        // 4. halo
        let halo = style.halo.enabled.then(|| ShapeStyle::Path(halo_style(&key_style, style)));
        self.upsert(SubShape::Halo, halo, scene);

        RenderOutcome::Drawn
    }

    /// Start `keyframes` on the key shape.
    ///
    /// The returned handle carries the frame callback the host must invoke
    /// once per animation frame; it re-places the label and the markers
    /// against the key's animated path. `None` when nothing is rendered or
    /// the scene declines to animate.
    pub fn animate<S: SceneGraph + 'static>(
        &mut self,
        keyframes: &[Keyframe],
        options: &AnimationOptions,
        scene: &mut S,
    ) -> Option<EdgeAnimation<S>> {
        let key = self.shape(SubShape::Key)?;
        let id = scene.animate(key, keyframes, options)?;
        Some(EdgeAnimation {
            id,
            on_frame: Box::new(|edge: &mut EdgeShape, scene: &mut S| edge.refresh_dependents(scene)),
        })
    }

    /// Re-place label and markers against the key's current path.
    pub fn refresh_dependents<S: SceneGraph>(&mut self, scene: &mut S) {
        let Some(style) = self.attributes.as_ref().map(|a| a.style.clone()) else {
            return;
        };
        if self.shape(SubShape::Key).is_none() {
            return;
        }
        self.draw_label(&style, scene);
        self.draw_arrow(&style, true, scene);
        self.draw_arrow(&style, false, scene);
    }

    /// Remove every sub-shape from the scene.
    pub fn destroy<S: SceneGraph>(&mut self, scene: &mut S) {
        self.clear(scene);
        self.attributes = None;
    }

    fn clear<S: SceneGraph>(&mut self, scene: &mut S) {
        debug!(count = self.shapes.len(), "removing edge shapes");
        for id in std::mem::take(&mut self.shapes).into_values() {
            scene.remove(id);
        }
    }

    fn upsert<S: SceneGraph>(&mut self, which: SubShape, style: Option<ShapeStyle>, scene: &mut S) {
        match (style, self.shapes.get(&which).copied()) {
            (None, None) => {}
            (None, Some(id)) => {
                debug!(?which, "removing edge sub-shape");
                scene.remove(id);
                self.shapes.remove(&which);
            }
            (Some(style), Some(id)) => scene.update(id, style),
            (Some(style), None) => {
                debug!(?which, "creating edge sub-shape");
                let id = scene.create(style);
                self.shapes.insert(which, id);
            }
        }
    }

    fn draw_arrow<S: SceneGraph>(&mut self, style: &EdgeStyle, is_start: bool, scene: &mut S) {
        let (which, arrow) = if is_start {
            (SubShape::StartArrow, &style.start_arrow)
        } else {
            (SubShape::EndArrow, &style.end_arrow)
        };
        let shape = if arrow.enabled {
            self.key_path(scene)
                .and_then(|path| arrow_style(&path, arrow, style, is_start))
                .map(ShapeStyle::Path)
        } else {
            None
        };
        self.upsert(which, shape, scene);
    }

    fn draw_label<S: SceneGraph>(&mut self, style: &EdgeStyle, scene: &mut S) {
        let label = &style.label;
        let shape = if label.is_visible() {
            self.shape(SubShape::Key).and_then(|key| {
                let path = scene.path(key)?;
                let bounds = scene.local_bounds(key).or_else(|| path.bounds())?;
                let placed = get_label_position(&path, label.placement, label.auto_rotate, label.offset_x, label.offset_y)?;
                Some(ShapeStyle::Label(LabelShapeStyle {
                    text: label.text.clone(),
                    transform: Transform {
                        translate: placed.position,
                        rotate: placed.rotation,
                    },
                    text_align: placed.text_align,
                    text_baseline: label.text_baseline.clone(),
                    font_size: label.font_size,
                    fill: label.fill.clone(),
                    word_wrap_width: get_word_wrap_width_by_ends(&bounds, label.max_width),
                    background: label.background.then(|| LabelBackground {
                        fill: label.background_fill.clone(),
                        padding: parse_padding(&label.padding),
                    }),
                }))
            })
        } else {
            None
        };
        self.upsert(SubShape::Label, shape, scene);
    }

    fn key_path<S: SceneGraph>(&self, scene: &S) -> Option<PathData> {
        scene.path(self.shape(SubShape::Key)?)
    }
}

/// Key path style, `None` when the geometry is not finite
fn key_style(attributes: &EdgeAttributes) -> Option<PathStyle> {
    let path = build_key_path(attributes);
    if !path.is_finite() {
        return None;
    }
    let style = &attributes.style;
    let marker_offset = |arrow: &ArrowStyle| arrow.enabled.then(|| arrow.effective_offset());
    Some(PathStyle {
        path,
        stroke: Some(style.key.effective_stroke().to_string()),
        fill: None,
        line_width: style.key.line_width,
        line_dash: style.key.line_dash.clone(),
        opacity: style.key.opacity,
        z_index: style.key.z_index,
        transform: Transform::default(),
        pointer_events: true,
        marker_start_offset: marker_offset(&style.start_arrow),
        marker_end_offset: marker_offset(&style.end_arrow),
    })
}

/// Copy of the key style with the halo overrides on top
fn halo_style(key: &PathStyle, style: &EdgeStyle) -> PathStyle {
    let halo = &style.halo;
    PathStyle {
        stroke: halo.stroke.clone().or_else(|| key.stroke.clone()),
        line_width: halo.line_width,
        line_dash: halo.line_dash.clone(),
        opacity: halo.opacity,
        z_index: halo.z_index,
        pointer_events: halo.pointer_events,
        marker_start_offset: None,
        marker_end_offset: None,
        ..key.clone()
    }
}

/// Marker at one end of `path`, rotated so its tip points out of the path
/// and pulled back by the arrow offset. `None` for a path without a
/// direction at that end.
fn arrow_style(
    path: &PathData,
    arrow: &ArrowStyle,
    style: &EdgeStyle,
    is_start: bool,
) -> Option<PathStyle> {
    let (end, direction) = path.terminal(is_start)?;
    let key_stroke = style.key.effective_stroke().to_string();
    let fill = arrow
        .fill
        .clone()
        .or_else(|| arrow.kind.is_filled().then(|| key_stroke.clone()));

    Some(PathStyle {
        path: arrow.kind.path(arrow.width, arrow.height),
        stroke: Some(arrow.stroke.clone().unwrap_or(key_stroke)),
        fill,
        line_width: arrow.line_width,
        line_dash: arrow.line_dash.clone(),
        opacity: style.key.opacity,
        z_index: style.key.z_index,
        transform: Transform {
            translate: end - direction * arrow.effective_offset(),
            // Symbols point toward -x
            rotate: direction.y.atan2(direction.x) + PI,
        },
        pointer_events: true,
        marker_start_offset: None,
        marker_end_offset: None,
    })
}

/// Per-frame callback of an edge animation
pub type FrameCallback<S> = Box<dyn FnMut(&mut EdgeShape, &mut S)>;

/// Handle of an animation started through [`EdgeShape::animate`]
pub struct EdgeAnimation<S> {
    id: AnimationId,
    on_frame: FrameCallback<S>,
}

impl<S> EdgeAnimation<S> {
    pub fn id(&self) -> AnimationId {
        self.id
    }

    /// Invoked by the host once per animation frame.
    pub fn frame(&mut self, edge: &mut EdgeShape, scene: &mut S) {
        (self.on_frame)(edge, scene);
    }
}

impl<S> fmt::Debug for EdgeAnimation<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeAnimation").field("id", &self.id).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;
    use crate::render::scene::MemoryScene;
    use crate::render::shapes::NodeShape;
    use crate::render::symbols::ArrowType;
    use crate::types::Point;
    use glam::dvec2;

    fn attributes() -> EdgeAttributes {
        let a = Node::new("a", NodeShape::Circle, dvec2(0.0, 0.0), dvec2(20.0, 20.0));
        let b = Node::new("b", NodeShape::Circle, dvec2(120.0, 0.0), dvec2(20.0, 20.0));
        EdgeAttributes::between(a, b)
    }

    fn path_of(scene: &MemoryScene, id: ShapeId) -> &PathStyle {
        scene.get(id).and_then(ShapeStyle::as_path).unwrap()
    }

    fn assert_point_eq(actual: Point, expected: Point) {
        assert!(
            actual.distance(expected) < 1e-9,
            "point mismatch: {actual} != {expected}"
        );
    }

    #[test]
    fn default_edge_draws_only_the_key() {
        let mut scene = MemoryScene::new();
        let mut edge = EdgeShape::new();
        assert_eq!(edge.render(&attributes(), &mut scene), RenderOutcome::Drawn);
        assert_eq!(scene.len(), 1);

        let key = path_of(&scene, edge.shape(SubShape::Key).unwrap());
        assert_eq!(key.path.to_string(), "M10,0 L110,0");
        assert_eq!(key.stroke.as_deref(), Some("#99ADD1"));
        assert_eq!(key.marker_end_offset, None);
    }

    #[test]
    fn end_arrow_sits_on_the_path_end() {
        let mut attrs = attributes();
        attrs.style.end_arrow.enabled = true;
        let mut scene = MemoryScene::new();
        let mut edge = EdgeShape::new();
        edge.render(&attrs, &mut scene);

        let key = path_of(&scene, edge.shape(SubShape::Key).unwrap());
        assert_eq!(key.marker_end_offset, Some(6.0));

        let arrow = path_of(&scene, edge.shape(SubShape::EndArrow).unwrap());
        assert_point_eq(arrow.transform.translate, dvec2(104.0, 0.0));
        assert!((arrow.transform.rotate.cos() + 1.0).abs() < 1e-12);
        assert_eq!(arrow.fill.as_deref(), Some("#99ADD1"));
        // The tip (local -w/2) lands one line width before the end
        assert_point_eq(arrow.transform.apply(dvec2(-5.0, 0.0)), dvec2(109.0, 0.0));
    }

    #[test]
    fn start_arrow_points_backward() {
        let mut attrs = attributes();
        attrs.style.start_arrow.enabled = true;
        attrs.style.start_arrow.kind = ArrowType::Simple;
        let mut scene = MemoryScene::new();
        let mut edge = EdgeShape::new();
        edge.render(&attrs, &mut scene);

        let arrow = path_of(&scene, edge.shape(SubShape::StartArrow).unwrap());
        assert_point_eq(arrow.transform.translate, dvec2(16.0, 0.0));
        assert!((arrow.transform.rotate.cos() - 1.0).abs() < 1e-12);
        assert_point_eq(arrow.transform.apply(dvec2(-5.0, 0.0)), dvec2(11.0, 0.0));
        assert_eq!(arrow.fill, None);
    }

    #[test]
    fn halo_copies_key_with_overrides() {
        let mut attrs = attributes();
        attrs.style.key.stroke = Some("red".into());
        attrs.style.halo.enabled = true;
        let mut scene = MemoryScene::new();
        let mut edge = EdgeShape::new();
        edge.render(&attrs, &mut scene);

        let key = path_of(&scene, edge.shape(SubShape::Key).unwrap()).clone();
        let halo = path_of(&scene, edge.shape(SubShape::Halo).unwrap());
        assert_eq!(halo.path, key.path);
        assert_eq!(halo.stroke.as_deref(), Some("red"));
        assert_eq!(halo.z_index, -1.0);
        assert_eq!(halo.line_width, 12.0);
        assert!(!halo.pointer_events);
    }

    #[test]
    fn label_follows_key_geometry() {
        let mut attrs = attributes();
        attrs.style.label.text = "a to b".into();
        let mut scene = MemoryScene::new();
        let mut edge = EdgeShape::new();
        edge.render(&attrs, &mut scene);

        let label = scene
            .get(edge.shape(SubShape::Label).unwrap())
            .and_then(ShapeStyle::as_label)
            .unwrap();
        assert_eq!(label.transform.translate, dvec2(64.0, 0.0));
        assert_eq!(label.word_wrap_width, 80.0);
        assert_eq!(label.background, None);
    }

    #[test]
    fn rerender_is_idempotent() {
        let mut attrs = attributes();
        attrs.style.label.text = "x".into();
        attrs.style.halo.enabled = true;
        attrs.style.end_arrow.enabled = true;
        let mut scene = MemoryScene::new();
        let mut edge = EdgeShape::new();
        edge.render(&attrs, &mut scene);
        let snapshot: Vec<_> = [SubShape::Key, SubShape::Halo, SubShape::EndArrow, SubShape::Label]
            .iter()
            .map(|s| edge.shape(*s))
            .collect();
        edge.render(&attrs, &mut scene);

        assert_eq!(scene.created(), 4);
        assert_eq!(scene.removed(), 0);
        let again: Vec<_> = [SubShape::Key, SubShape::Halo, SubShape::EndArrow, SubShape::Label]
            .iter()
            .map(|s| edge.shape(*s))
            .collect();
        assert_eq!(snapshot, again);
    }

    #[test]
    fn non_finite_geometry_removes_everything() {
        let mut attrs = attributes();
        attrs.style.end_arrow.enabled = true;
        let mut scene = MemoryScene::new();
        let mut edge = EdgeShape::new();
        edge.render(&attrs, &mut scene);
        assert_eq!(scene.len(), 2);

        attrs.source_node.center = dvec2(f64::NAN, 0.0);
        assert_eq!(edge.render(&attrs, &mut scene), RenderOutcome::Aborted);
        assert!(scene.is_empty());
        assert_eq!(edge.shape(SubShape::Key), None);
    }

    #[test]
    fn zero_length_key_skips_dependents() {
        let mut attrs = attributes();
        attrs.style.end_arrow.enabled = true;
        attrs.style.label.text = "x".into();
        attrs.source_point = Some(dvec2(5.0, 5.0));
        attrs.target_point = Some(dvec2(5.0, 5.0));
        let mut scene = MemoryScene::new();
        let mut edge = EdgeShape::new();
        assert_eq!(edge.render(&attrs, &mut scene), RenderOutcome::KeyOnly);
        assert_eq!(scene.len(), 1);
        assert!(edge.shape(SubShape::Key).is_some());
    }

    #[test]
    fn frame_callback_tracks_animated_key() {
        let mut attrs = attributes();
        attrs.style.label.text = "x".into();
        attrs.style.label.offset_x = 0.0;
        let mut scene = MemoryScene::new();
        let mut edge = EdgeShape::new();
        edge.render(&attrs, &mut scene);

        let mut animation = edge
            .animate(&[Keyframe::default()], &AnimationOptions::default(), &mut scene)
            .unwrap();
        assert_eq!(scene.animations().len(), 1);

        // The host moves the key along; the frame hook re-places the label
        let key = edge.shape(SubShape::Key).unwrap();
        scene.set_path(key, PathData::new().m(0.0, 50.0).l(200.0, 50.0));
        animation.frame(&mut edge, &mut scene);

        let label = scene
            .get(edge.shape(SubShape::Label).unwrap())
            .and_then(ShapeStyle::as_label)
            .unwrap();
        assert_eq!(label.transform.translate, dvec2(100.0, 50.0));
    }

    #[test]
    fn animate_without_key_returns_none() {
        let mut scene = MemoryScene::new();
        let mut edge = EdgeShape::new();
        assert!(edge.animate(&[], &AnimationOptions::default(), &mut scene).is_none());
    }

    #[test]
    fn destroy_removes_all_sub_shapes() {
        let mut attrs = attributes();
        attrs.style.label.text = "x".into();
        attrs.style.start_arrow.enabled = true;
        let mut scene = MemoryScene::new();
        let mut edge = EdgeShape::new();
        edge.render(&attrs, &mut scene);
        assert_eq!(scene.len(), 3);

        edge.destroy(&mut scene);
        assert!(scene.is_empty());
        assert!(edge.attributes().is_none());
    }
}
