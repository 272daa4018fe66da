//! Edge style configuration
//!
//! An edge is styled through one flat property set whose keys are namespaced
//! by sub-shape prefix: `stroke` and `lineWidth` style the key path,
//! `labelText` and `labelOffsetX` the label, `haloStroke` the halo,
//! `startArrowType` and `endArrowWidth` the markers, `loopPosition` the
//! self-loop. [`EdgeStylePatch::from_props`] strips the prefix and routes
//! every key into its typed block.
//!
//! Every block comes in two forms generated by [`style_block!`]:
//!
//! - the resolved struct (`LabelStyle`), fully populated with defaults
//! - the patch (`LabelStylePatch`), every field optional
//!
//! Layers merge patch over patch, later layers winning per property, and
//! the merged patch is finally applied over the defaults.

use std::collections::BTreeMap;

use crate::errors::StyleError;
use crate::render::defaults;
use crate::render::label::{LabelPlacement, MaxWidth};
use crate::render::path_builder::{EdgeType, LoopPosition};
use crate::render::symbols::ArrowType;
use crate::types::Point;

// ============================================================================
// Raw values
// ============================================================================

/// A property value as supplied by the caller
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Numbers(Vec<f64>),
    Points(Vec<Point>),
}

impl StyleValue {
    pub fn kind(&self) -> &'static str {
        match self {
            StyleValue::Bool(_) => "a boolean",
            StyleValue::Number(_) => "a number",
            StyleValue::Text(_) => "a string",
            StyleValue::Numbers(_) => "a list of numbers",
            StyleValue::Points(_) => "a list of points",
        }
    }
}

impl From<bool> for StyleValue {
    fn from(v: bool) -> Self {
        StyleValue::Bool(v)
    }
}

impl From<f64> for StyleValue {
    fn from(v: f64) -> Self {
        StyleValue::Number(v)
    }
}

impl From<i32> for StyleValue {
    fn from(v: i32) -> Self {
        StyleValue::Number(f64::from(v))
    }
}

impl From<&str> for StyleValue {
    fn from(v: &str) -> Self {
        StyleValue::Text(v.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(v: String) -> Self {
        StyleValue::Text(v)
    }
}

impl From<Vec<f64>> for StyleValue {
    fn from(v: Vec<f64>) -> Self {
        StyleValue::Numbers(v)
    }
}

impl From<Vec<Point>> for StyleValue {
    fn from(v: Vec<Point>) -> Self {
        StyleValue::Points(v)
    }
}

impl From<&StyleValue> for StyleValue {
    fn from(v: &StyleValue) -> Self {
        v.clone()
    }
}

/// Conversion from a raw [`StyleValue`] into a typed property.
pub trait FromStyleValue: Sized {
    const EXPECTED: &'static str;

    fn from_style_value(value: &StyleValue) -> Option<Self>;

    /// Convert, reporting a mismatch against `key`.
    fn parse_value(key: &str, value: &StyleValue) -> Result<Self, StyleError> {
        Self::from_style_value(value).ok_or_else(|| StyleError::TypeMismatch {
            key: key.to_string(),
            expected: Self::EXPECTED,
            got: value.kind(),
        })
    }
}

impl FromStyleValue for bool {
    const EXPECTED: &'static str = "a boolean";

    fn from_style_value(value: &StyleValue) -> Option<Self> {
        match value {
            StyleValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromStyleValue for f64 {
    const EXPECTED: &'static str = "a number";

    fn from_style_value(value: &StyleValue) -> Option<Self> {
        match value {
            StyleValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromStyleValue for String {
    const EXPECTED: &'static str = "a string";

    fn from_style_value(value: &StyleValue) -> Option<Self> {
        match value {
            StyleValue::Text(s) => Some(s.clone()),
            _ => None,
        }
    }
}

/// A single number stands for a one-element list (`lineDash: 0`).
impl FromStyleValue for Vec<f64> {
    const EXPECTED: &'static str = "a number or a list of numbers";

    fn from_style_value(value: &StyleValue) -> Option<Self> {
        match value {
            StyleValue::Numbers(v) => Some(v.clone()),
            StyleValue::Number(n) => Some(vec![*n]),
            _ => None,
        }
    }
}

impl FromStyleValue for Vec<Point> {
    const EXPECTED: &'static str = "a list of points";

    fn from_style_value(value: &StyleValue) -> Option<Self> {
        match value {
            StyleValue::Points(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl<T: FromStyleValue> FromStyleValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_style_value(value: &StyleValue) -> Option<Self> {
        T::from_style_value(value).map(Some)
    }

    fn parse_value(key: &str, value: &StyleValue) -> Result<Self, StyleError> {
        T::parse_value(key, value).map(Some)
    }
}

/// Keyword properties parse their text through `FromStr`, so a bad keyword
/// reports what was expected instead of a bare type mismatch.
macro_rules! keyword_style_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromStyleValue for $ty {
                const EXPECTED: &'static str = "a keyword";

                fn from_style_value(value: &StyleValue) -> Option<Self> {
                    match value {
                        StyleValue::Text(s) => s.parse().ok(),
                        _ => None,
                    }
                }

                fn parse_value(key: &str, value: &StyleValue) -> Result<Self, StyleError> {
                    match value {
                        StyleValue::Text(s) => s.parse().map_err(|e: crate::errors::KeywordError| e.with_key(key)),
                        other => Err(StyleError::TypeMismatch {
                            key: key.to_string(),
                            expected: Self::EXPECTED,
                            got: other.kind(),
                        }),
                    }
                }
            }
        )*
    };
}

keyword_style_value!(ArrowType, EdgeType, LoopPosition);

/// `labelPlacement` also takes a ratio along the path.
impl FromStyleValue for LabelPlacement {
    const EXPECTED: &'static str = "start, center, end or a ratio";

    fn from_style_value(value: &StyleValue) -> Option<Self> {
        match value {
            StyleValue::Text(s) => s.parse().ok(),
            StyleValue::Number(n) => Some(LabelPlacement::Ratio(*n)),
            _ => None,
        }
    }

    fn parse_value(key: &str, value: &StyleValue) -> Result<Self, StyleError> {
        match value {
            StyleValue::Text(s) => s.parse().map_err(|e: crate::errors::KeywordError| e.with_key(key)),
            _ => Self::from_style_value(value).ok_or_else(|| StyleError::TypeMismatch {
                key: key.to_string(),
                expected: Self::EXPECTED,
                got: value.kind(),
            }),
        }
    }
}

/// `labelMaxWidth` is either `"<n>%"` or an absolute width.
impl FromStyleValue for MaxWidth {
    const EXPECTED: &'static str = "a percentage or a number";

    fn from_style_value(value: &StyleValue) -> Option<Self> {
        match value {
            StyleValue::Text(s) => s.parse().ok(),
            StyleValue::Number(n) => Some(MaxWidth::Absolute(*n)),
            _ => None,
        }
    }

    fn parse_value(key: &str, value: &StyleValue) -> Result<Self, StyleError> {
        match value {
            StyleValue::Text(s) => s.parse().map_err(|e: crate::errors::KeywordError| e.with_key(key)),
            _ => Self::from_style_value(value).ok_or_else(|| StyleError::TypeMismatch {
                key: key.to_string(),
                expected: Self::EXPECTED,
                got: value.kind(),
            }),
        }
    }
}

// ============================================================================
// Prefix handling
// ============================================================================

/// Strip a sub-shape prefix from a flat property key.
///
/// `label` alone yields `""` (the block's on/off switch), `labelOffsetX`
/// yields `offsetX`. Keys that merely start with the same letters
/// (`labelled`) do not match.
pub fn strip_prefix<'a>(key: &'a str, prefix: &str) -> Option<std::borrow::Cow<'a, str>> {
    let rest = key.strip_prefix(prefix)?;
    let mut chars = rest.chars();
    match chars.next() {
        None => Some(std::borrow::Cow::Borrowed("")),
        Some(first) if first.is_ascii_uppercase() => {
            let mut prop = String::with_capacity(rest.len());
            prop.push(first.to_ascii_lowercase());
            prop.push_str(chars.as_str());
            Some(std::borrow::Cow::Owned(prop))
        }
        Some(_) => None,
    }
}

// ============================================================================
// Blocks
// ============================================================================

/// Declare a resolved style block, its patch, and the property keys that
/// address each field once the block prefix is stripped.
macro_rules! style_block {
    (
        $(#[$meta:meta])*
        $name:ident / $patch:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $ty:ty = $default:expr => $key:literal,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self { $( $field: $default, )* }
            }
        }

        #[doc = concat!("Partial [`", stringify!($name), "`]; unset fields fall through to the layer below")]
        #[derive(Debug, Clone, PartialEq, Default)]
        pub struct $patch {
            $( pub $field: Option<$ty>, )*
        }

        impl $patch {
            /// Overlay `over` on `self`, property by property.
            pub fn merge(mut self, over: &Self) -> Self {
                $(
                    if let Some(v) = &over.$field {
                        self.$field = Some(v.clone());
                    }
                )*
                self
            }

            pub fn is_empty(&self) -> bool {
                true $( && self.$field.is_none() )*
            }

            /// Fill every unset field from `base`.
            pub fn apply(&self, base: &$name) -> $name {
                $name {
                    $( $field: self.$field.clone().unwrap_or_else(|| base.$field.clone()), )*
                }
            }

            /// Set the field addressed by the prefix-stripped `prop`.
            ///
            /// Returns `Ok(false)` when no field answers to `prop`.
            pub fn set(&mut self, prop: &str, full_key: &str, value: &StyleValue) -> Result<bool, StyleError> {
                match prop {
                    $(
                        $key => {
                            self.$field = Some(<$ty as FromStyleValue>::parse_value(full_key, value)?);
                            Ok(true)
                        }
                    )*
                    _ => Ok(false),
                }
            }
        }
    };
}

style_block! {
    /// Key path style (unprefixed keys)
    KeyStyle / KeyStylePatch {
        /// Explicit stroke; wins over `color`
        stroke: Option<String> = None => "stroke",
        color: String = defaults::EDGE_COLOR.to_string() => "color",
        line_width: f64 = defaults::LINE_WIDTH => "lineWidth",
        line_dash: Vec<f64> = Vec::new() => "lineDash",
        opacity: f64 = defaults::OPACITY => "opacity",
        z_index: f64 = 0.0 => "zIndex",
    }
}

impl KeyStyle {
    /// The stroke actually drawn
    pub fn effective_stroke(&self) -> &str {
        self.stroke.as_deref().unwrap_or(&self.color)
    }
}

style_block! {
    /// Label style (`label*` keys)
    LabelStyle / LabelStylePatch {
        enabled: bool = true => "",
        text: String = String::new() => "text",
        placement: LabelPlacement = LabelPlacement::Center => "placement",
        offset_x: f64 = defaults::LABEL_OFFSET_X => "offsetX",
        offset_y: f64 = defaults::LABEL_OFFSET_Y => "offsetY",
        auto_rotate: bool = true => "autoRotate",
        max_width: MaxWidth = MaxWidth::Percent(defaults::LABEL_MAX_WIDTH_PERCENT) => "maxWidth",
        text_baseline: String = defaults::LABEL_TEXT_BASELINE.to_string() => "textBaseline",
        font_size: f64 = defaults::LABEL_FONT_SIZE => "fontSize",
        fill: String = defaults::LABEL_FILL.to_string() => "fill",
        background: bool = false => "background",
        background_fill: String = defaults::LABEL_BACKGROUND_FILL.to_string() => "backgroundFill",
        /// CSS-style shorthand, expanded by [`parse_padding`]
        padding: Vec<f64> = Vec::new() => "padding",
    }
}

impl LabelStyle {
    /// Drawn only when switched on and carrying text
    pub fn is_visible(&self) -> bool {
        self.enabled && !self.text.is_empty()
    }
}

style_block! {
    /// Halo style (`halo*` keys), overlaid on a copy of the key style
    HaloStyle / HaloStylePatch {
        enabled: bool = false => "",
        /// Falls back to the key stroke
        stroke: Option<String> = None => "stroke",
        line_width: f64 = defaults::HALO_LINE_WIDTH => "lineWidth",
        line_dash: Vec<f64> = Vec::new() => "lineDash",
        opacity: f64 = defaults::HALO_OPACITY => "opacity",
        z_index: f64 = defaults::HALO_Z_INDEX => "zIndex",
        pointer_events: bool = false => "pointerEvents",
    }
}

style_block! {
    /// Arrow marker style (`startArrow*` and `endArrow*` keys)
    ArrowStyle / ArrowStylePatch {
        enabled: bool = false => "",
        kind: ArrowType = ArrowType::Triangle => "type",
        width: f64 = defaults::ARROW_SIZE => "width",
        height: f64 = defaults::ARROW_SIZE => "height",
        /// Distance from the path end to the marker center
        offset: Option<f64> = None => "offset",
        line_width: f64 = defaults::ARROW_LINE_WIDTH => "lineWidth",
        line_dash: Vec<f64> = Vec::new() => "lineDash",
        fill: Option<String> = None => "fill",
        stroke: Option<String> = None => "stroke",
    }
}

impl ArrowStyle {
    /// Explicit offset, or half the width plus the line width so the tip
    /// lands on the path end
    pub fn effective_offset(&self) -> f64 {
        // A zero offset counts as unset
        match self.offset {
            Some(offset) if offset != 0.0 => offset,
            _ => self.width / 2.0 + self.line_width,
        }
    }
}

style_block! {
    /// Self-loop style (`loop*` keys)
    LoopStyle / LoopStylePatch {
        position: LoopPosition = LoopPosition::Top => "position",
        clockwise: bool = true => "clockwise",
        /// Defaults to the larger side of the node
        dist: Option<f64> = None => "dist",
    }
}

style_block! {
    /// Path routing (unprefixed keys)
    RouteStyle / RouteStylePatch {
        edge_type: EdgeType = EdgeType::Line => "type",
        curve_offset: Option<f64> = None => "curveOffset",
        curve_position: Option<f64> = None => "curvePosition",
        control_points: Vec<Point> = Vec::new() => "controlPoints",
        radius: f64 = 0.0 => "radius",
        router_orthogonal: bool = false => "routerOrthogonal",
    }
}

// ============================================================================
// Whole edge
// ============================================================================

/// Fully resolved edge style
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EdgeStyle {
    pub key: KeyStyle,
    pub label: LabelStyle,
    pub halo: HaloStyle,
    pub start_arrow: ArrowStyle,
    pub end_arrow: ArrowStyle,
    pub loop_style: LoopStyle,
    pub route: RouteStyle,
}

impl EdgeStyle {
    /// Merge `layers` in order over the defaults.
    pub fn resolve(layers: &[EdgeStylePatch]) -> Self {
        layers
            .iter()
            .fold(EdgeStylePatch::default(), |acc, layer| acc.merge(layer))
            .resolve()
    }
}

/// One layer of edge style
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EdgeStylePatch {
    pub key: KeyStylePatch,
    pub label: LabelStylePatch,
    pub halo: HaloStylePatch,
    pub start_arrow: ArrowStylePatch,
    pub end_arrow: ArrowStylePatch,
    pub loop_style: LoopStylePatch,
    pub route: RouteStylePatch,
}

impl EdgeStylePatch {
    /// Parse flat, prefixed property keys.
    pub fn from_props<I, K, V>(props: I) -> Result<Self, StyleError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<StyleValue>,
    {
        let mut patch = Self::default();
        for (key, value) in props {
            patch.set(key.as_ref(), &value.into())?;
        }
        Ok(patch)
    }

    /// Route one flat property into its block.
    pub fn set(&mut self, key: &str, value: &StyleValue) -> Result<(), StyleError> {
        let handled = if let Some(prop) = strip_prefix(key, "startArrow") {
            self.start_arrow.set(&prop, key, value)?
        } else if let Some(prop) = strip_prefix(key, "endArrow") {
            self.end_arrow.set(&prop, key, value)?
        } else if let Some(prop) = strip_prefix(key, "label") {
            self.label.set(&prop, key, value)?
        } else if let Some(prop) = strip_prefix(key, "halo") {
            self.halo.set(&prop, key, value)?
        } else if let Some(prop) = strip_prefix(key, "loop") {
            self.loop_style.set(&prop, key, value)?
        } else {
            self.key.set(key, key, value)? || self.route.set(key, key, value)?
        };

        if handled {
            Ok(())
        } else {
            Err(StyleError::UnknownProperty { key: key.to_string() })
        }
    }

    /// Overlay `over` on `self`, block by block.
    pub fn merge(self, over: &Self) -> Self {
        Self {
            key: self.key.merge(&over.key),
            label: self.label.merge(&over.label),
            halo: self.halo.merge(&over.halo),
            start_arrow: self.start_arrow.merge(&over.start_arrow),
            end_arrow: self.end_arrow.merge(&over.end_arrow),
            loop_style: self.loop_style.merge(&over.loop_style),
            route: self.route.merge(&over.route),
        }
    }

    /// Apply over the defaults.
    pub fn resolve(&self) -> EdgeStyle {
        let base = EdgeStyle::default();
        EdgeStyle {
            key: self.key.apply(&base.key),
            label: self.label.apply(&base.label),
            halo: self.halo.apply(&base.halo),
            start_arrow: self.start_arrow.apply(&base.start_arrow),
            end_arrow: self.end_arrow.apply(&base.end_arrow),
            loop_style: self.loop_style.apply(&base.loop_style),
            route: self.route.apply(&base.route),
        }
    }
}

/// Flat property map, as hosts typically store it
pub type StyleProps = BTreeMap<String, StyleValue>;

/// Expand a CSS-style padding shorthand into `[top, right, bottom, left]`.
///
/// Missing sides mirror their opposite: `[a]` is all sides, `[a, b]` is
/// vertical/horizontal, `[a, b, c]` reuses `b` for the left. Empty input is
/// no padding.
pub fn parse_padding(padding: &[f64]) -> [f64; 4] {
    match *padding {
        [] => [0.0; 4],
        [all] => [all; 4],
        [vertical, horizontal] => [vertical, horizontal, vertical, horizontal],
        [top, horizontal, bottom] => [top, horizontal, bottom, horizontal],
        [top, right, bottom, left, ..] => [top, right, bottom, left],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn strip_prefix_requires_camel_case_boundary() {
        assert_eq!(strip_prefix("labelOffsetX", "label").as_deref(), Some("offsetX"));
        assert_eq!(strip_prefix("label", "label").as_deref(), Some(""));
        assert_eq!(strip_prefix("labelled", "label"), None);
        assert_eq!(strip_prefix("stroke", "label"), None);
    }

    #[test]
    fn defaults_match_base_edge_table() {
        let style = EdgeStyle::default();
        assert!(style.label.enabled);
        assert_eq!(style.label.placement, LabelPlacement::Center);
        assert_eq!(style.label.max_width, MaxWidth::Percent(80.0));
        assert_eq!(style.label.offset_x, 4.0);
        assert_eq!(style.label.offset_y, 0.0);
        assert!(style.label.auto_rotate);
        assert_eq!(style.label.text_baseline, "middle");
        assert!(!style.halo.enabled);
        assert_eq!(style.halo.z_index, -1.0);
        assert!(!style.halo.pointer_events);
        assert!(!style.start_arrow.enabled);
        assert!(!style.end_arrow.enabled);
        assert_eq!(style.end_arrow.kind, ArrowType::Triangle);
        assert_eq!((style.end_arrow.width, style.end_arrow.height), (10.0, 10.0));
        assert_eq!(style.end_arrow.line_width, 1.0);
        assert_eq!(style.loop_style.position, LoopPosition::Top);
        assert!(style.loop_style.clockwise);
    }

    #[test]
    fn from_props_routes_by_prefix() {
        let patch = EdgeStylePatch::from_props([
            ("stroke", StyleValue::from("red")),
            ("lineWidth", StyleValue::from(2.0)),
            ("labelText", StyleValue::from("hello")),
            ("labelPlacement", StyleValue::from("end")),
            ("halo", StyleValue::from(true)),
            ("haloStroke", StyleValue::from("blue")),
            ("endArrow", StyleValue::from(true)),
            ("endArrowType", StyleValue::from("vee")),
            ("startArrowWidth", StyleValue::from(6.0)),
            ("loopPosition", StyleValue::from("bottom-right")),
            ("type", StyleValue::from("cubic")),
            ("controlPoints", StyleValue::from(vec![dvec2(1.0, 2.0)])),
        ])
        .unwrap();

        let style = patch.resolve();
        assert_eq!(style.key.effective_stroke(), "red");
        assert_eq!(style.key.line_width, 2.0);
        assert_eq!(style.label.text, "hello");
        assert_eq!(style.label.placement, LabelPlacement::End);
        assert!(style.halo.enabled);
        assert_eq!(style.halo.stroke.as_deref(), Some("blue"));
        assert!(style.end_arrow.enabled);
        assert_eq!(style.end_arrow.kind, ArrowType::Vee);
        assert_eq!(style.start_arrow.width, 6.0);
        assert!(!style.start_arrow.enabled);
        assert_eq!(style.loop_style.position, LoopPosition::BottomRight);
        assert_eq!(style.route.edge_type, EdgeType::Cubic);
        assert_eq!(style.route.control_points, vec![dvec2(1.0, 2.0)]);
    }

    #[test]
    fn color_feeds_stroke_unless_stroke_is_set() {
        let style = EdgeStylePatch::from_props([("color", "green")]).unwrap().resolve();
        assert_eq!(style.key.effective_stroke(), "green");
        assert_eq!(EdgeStyle::default().key.effective_stroke(), defaults::EDGE_COLOR);
    }

    #[test]
    fn numbers_select_ratio_and_absolute_width() {
        let style = EdgeStylePatch::from_props([
            ("labelPlacement", StyleValue::from(0.25)),
            ("labelMaxWidth", StyleValue::from(120.0)),
        ])
        .unwrap()
        .resolve();
        assert_eq!(style.label.placement, LabelPlacement::Ratio(0.25));
        assert_eq!(style.label.max_width, MaxWidth::Absolute(120.0));

        let style = EdgeStylePatch::from_props([("labelMaxWidth", "50%")]).unwrap().resolve();
        assert_eq!(style.label.max_width, MaxWidth::Percent(50.0));
    }

    #[test]
    fn later_layers_win_per_property() {
        let theme = EdgeStylePatch::from_props([
            ("stroke", StyleValue::from("gray")),
            ("labelFontSize", StyleValue::from(14.0)),
            ("labelText", StyleValue::from("theme")),
        ])
        .unwrap();
        let user = EdgeStylePatch::from_props([("labelText", "user")]).unwrap();

        let style = EdgeStyle::resolve(&[theme, user]);
        assert_eq!(style.label.text, "user");
        assert_eq!(style.label.font_size, 14.0);
        assert_eq!(style.key.effective_stroke(), "gray");
        assert_eq!(style.label.offset_x, 4.0);
    }

    #[test]
    fn unknown_properties_are_rejected() {
        let err = EdgeStylePatch::from_props([("labelColour", "red")]).unwrap_err();
        assert_eq!(err, StyleError::UnknownProperty { key: "labelColour".into() });

        let err = EdgeStylePatch::from_props([("shadow", true)]).unwrap_err();
        assert_eq!(err, StyleError::UnknownProperty { key: "shadow".into() });
    }

    #[test]
    fn wrong_value_types_are_rejected() {
        let err = EdgeStylePatch::from_props([("halo", "yes")]).unwrap_err();
        assert_eq!(
            err,
            StyleError::TypeMismatch {
                key: "halo".into(),
                expected: "a boolean",
                got: "a string",
            }
        );
    }

    #[test]
    fn bad_keywords_name_the_property() {
        let err = EdgeStylePatch::from_props([("endArrowType", "star")]).unwrap_err();
        assert!(matches!(
            err,
            StyleError::InvalidKeyword { ref key, ref value, .. } if key == "endArrowType" && value == "star"
        ));
    }

    #[test]
    fn arrow_offset_defaults_to_half_width_plus_line_width() {
        let mut arrow = ArrowStyle::default();
        assert_eq!(arrow.effective_offset(), 6.0);
        arrow.width = 20.0;
        arrow.line_width = 2.0;
        assert_eq!(arrow.effective_offset(), 12.0);
        arrow.offset = Some(3.0);
        assert_eq!(arrow.effective_offset(), 3.0);
    }

    #[test]
    fn label_visibility_needs_text() {
        let mut label = LabelStyle::default();
        assert!(!label.is_visible());
        label.text = "hi".into();
        assert!(label.is_visible());
        label.enabled = false;
        assert!(!label.is_visible());
    }

    #[test]
    fn padding_shorthand_expands() {
        assert_eq!(parse_padding(&[]), [0.0; 4]);
        assert_eq!(parse_padding(&[4.0]), [4.0; 4]);
        assert_eq!(parse_padding(&[1.0, 2.0]), [1.0, 2.0, 1.0, 2.0]);
        assert_eq!(parse_padding(&[1.0, 2.0, 3.0]), [1.0, 2.0, 3.0, 2.0]);
        assert_eq!(parse_padding(&[1.0, 2.0, 3.0, 4.0]), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn from_props_accepts_a_stored_map() {
        let mut props = StyleProps::new();
        props.insert("labelText".into(), StyleValue::from("stored"));
        props.insert("labelPadding".into(), StyleValue::from(vec![2.0, 4.0]));
        let style = EdgeStylePatch::from_props(&props).unwrap().resolve();
        assert_eq!(style.label.text, "stored");
        assert_eq!(parse_padding(&style.label.padding), [2.0, 4.0, 2.0, 4.0]);
    }

    #[test]
    fn patches_report_emptiness() {
        assert!(LoopStylePatch::default().is_empty());
        let patch = EdgeStylePatch::from_props([("loopDist", 30.0)]).unwrap();
        assert!(!patch.loop_style.is_empty());
        assert_eq!(patch.resolve().loop_style.dist, Some(30.0));
    }
}
