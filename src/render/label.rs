//! Label placement along an edge path and word-wrap sizing

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use super::defaults;
use super::svg::PathData;
use crate::errors::KeywordError;
use crate::types::{BBox, Point};

/// Where along the key path the label sits
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LabelPlacement {
    Start,
    #[default]
    Center,
    End,
    /// Fraction of the path length
    Ratio(f64),
}

impl LabelPlacement {
    pub fn ratio(self) -> f64 {
        match self {
            LabelPlacement::Start => 0.0,
            LabelPlacement::Center => 0.5,
            LabelPlacement::End => defaults::LABEL_END_RATIO,
            LabelPlacement::Ratio(r) => r,
        }
    }

    fn text_align(self) -> TextAlign {
        match self {
            LabelPlacement::Start => TextAlign::Left,
            LabelPlacement::End => TextAlign::Right,
            LabelPlacement::Center | LabelPlacement::Ratio(_) => TextAlign::Center,
        }
    }
}

impl FromStr for LabelPlacement {
    type Err = KeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(LabelPlacement::Start),
            "center" => Ok(LabelPlacement::Center),
            "end" => Ok(LabelPlacement::End),
            _ => Err(KeywordError::new(s, "start, center, end or a ratio")),
        }
    }
}

/// Upper bound for the label's wrap width
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaxWidth {
    /// Percentage of the key path's bounds span
    Percent(f64),
    Absolute(f64),
}

impl FromStr for MaxWidth {
    type Err = KeywordError;

    /// Parses `"80%"` as a percentage and a bare number as a width.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || KeywordError::new(s, "a percentage like `80%` or a number");
        match s.trim().strip_suffix('%') {
            Some(pct) => pct.trim().parse().map(MaxWidth::Percent).map_err(|_| invalid()),
            None => s.trim().parse().map(MaxWidth::Absolute).map_err(|_| invalid()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    fn mirrored(self) -> Self {
        match self {
            TextAlign::Left => TextAlign::Right,
            TextAlign::Right => TextAlign::Left,
            TextAlign::Center => TextAlign::Center,
        }
    }
}

impl FromStr for TextAlign {
    type Err = KeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" | "start" => Ok(TextAlign::Left),
            "center" => Ok(TextAlign::Center),
            "right" | "end" => Ok(TextAlign::Right),
            _ => Err(KeywordError::new(s, "left, center or right")),
        }
    }
}

impl fmt::Display for TextAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextAlign::Left => f.write_str("left"),
            TextAlign::Center => f.write_str("center"),
            TextAlign::Right => f.write_str("right"),
        }
    }
}

/// Computed label anchor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPosition {
    pub position: Point,
    /// Radians, clockwise in screen space
    pub rotation: f64,
    pub text_align: TextAlign,
}

/// Place a label on `path`.
///
/// The anchor is the point at the placement ratio; the tangent is sampled
/// one step further along, or over the last step when the ratio is that
/// close to the end. With auto-rotation the label follows the tangent,
/// flipped by half a turn when the path runs leftward so text never reads
/// upside down, and the offsets are rotated with it. Returns `None` for a
/// path with no points.
pub fn get_label_position(
    path: &PathData,
    placement: LabelPlacement,
    auto_rotate: bool,
    offset_x: f64,
    offset_y: f64,
) -> Option<LabelPosition> {
    let ratio = placement.ratio();
    let point = path.point_at(ratio)?;
    // The tangent window stays inside the path near its end
    let behind_ratio = ratio.min(1.0 - defaults::LABEL_TANGENT_STEP);
    let behind = path.point_at(behind_ratio)?;
    let ahead = path.point_at(behind_ratio + defaults::LABEL_TANGENT_STEP)?;
    let text_align = placement.text_align();

    if behind.y == ahead.y || !auto_rotate {
        return Some(LabelPosition {
            position: point + Point::new(offset_x, offset_y),
            rotation: 0.0,
            text_align,
        });
    }

    let mut angle = (ahead.y - behind.y).atan2(ahead.x - behind.x);
    let mut text_align = text_align;
    let mut offset_x = offset_x;
    if ahead.x < behind.x {
        text_align = text_align.mirrored();
        offset_x = -offset_x;
        angle += PI;
    }

    let (sin, cos) = angle.sin_cos();
    let position = point
        + Point::new(
            offset_x * cos - offset_y * sin,
            offset_x * sin + offset_y * cos,
        );

    Some(LabelPosition {
        position,
        rotation: angle,
        text_align,
    })
}

/// Wrap width for a label given the key path bounds.
///
/// The span is the diagonal between the bounds extrema; a percentage takes
/// that share of it and an absolute width is capped by it.
pub fn get_word_wrap_width_by_ends(bounds: &BBox, max_width: MaxWidth) -> f64 {
    let span = bounds.min.distance(bounds.max);
    match max_width {
        MaxWidth::Percent(pct) => span * pct / 100.0,
        MaxWidth::Absolute(width) => width.min(span),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    fn assert_point_eq(actual: Point, expected: Point) {
        assert!(
            actual.distance(expected) < 1e-9,
            "point mismatch: {actual} != {expected}"
        );
    }

    #[test]
    fn horizontal_path_keeps_label_upright() {
        let path = PathData::new().m(0.0, 0.0).l(100.0, 0.0);
        let label = get_label_position(&path, LabelPlacement::Center, true, 4.0, 0.0).unwrap();
        assert_eq!(label.position, dvec2(54.0, 0.0));
        assert_eq!(label.rotation, 0.0);
        assert_eq!(label.text_align, TextAlign::Center);
    }

    #[test]
    fn placement_keywords_select_ratio_and_alignment() {
        let path = PathData::new().m(0.0, 0.0).l(100.0, 0.0);
        let start = get_label_position(&path, LabelPlacement::Start, true, 0.0, 0.0).unwrap();
        assert_eq!(start.position, dvec2(0.0, 0.0));
        assert_eq!(start.text_align, TextAlign::Left);

        let end = get_label_position(&path, LabelPlacement::End, true, 0.0, 0.0).unwrap();
        assert_point_eq(end.position, dvec2(99.0, 0.0));
        assert_eq!(end.text_align, TextAlign::Right);

        let ratio = get_label_position(&path, LabelPlacement::Ratio(0.25), true, 0.0, 0.0).unwrap();
        assert_point_eq(ratio.position, dvec2(25.0, 0.0));
        assert_eq!(ratio.text_align, TextAlign::Center);
    }

    #[test]
    fn downward_path_rotates_and_rotates_offsets() {
        let path = PathData::new().m(0.0, 0.0).l(0.0, 100.0);
        let label = get_label_position(&path, LabelPlacement::Center, true, 4.0, 2.0).unwrap();
        assert!((label.rotation - PI / 2.0).abs() < 1e-12);
        // Along the path by 4, then 2 to the path's left (screen -x)
        assert_point_eq(label.position, dvec2(-2.0, 54.0));
    }

    #[test]
    fn leftward_path_flips_text() {
        let path = PathData::new().m(100.0, 100.0).l(0.0, 0.0);
        let label = get_label_position(&path, LabelPlacement::End, true, 4.0, 0.0).unwrap();
        assert_eq!(label.text_align, TextAlign::Left);
        // atan2 gives -3pi/4; the flip adds pi
        assert!((label.rotation - PI / 4.0).abs() < 1e-12);
        // Negated offset still pushes the label outward past the end
        let anchor = path.point_at(0.99).unwrap();
        assert!(label.position.x < anchor.x);
    }

    #[test]
    fn label_at_the_very_end_keeps_rotating() {
        let path = PathData::new().m(0.0, 0.0).l(0.0, 100.0);
        for ratio in [0.995, 1.0] {
            let label = get_label_position(&path, LabelPlacement::Ratio(ratio), true, 4.0, 0.0).unwrap();
            assert!((label.rotation - std::f64::consts::FRAC_PI_2).abs() < 1e-9, "ratio {ratio}: {}", label.rotation);
            assert_point_eq(label.position, dvec2(0.0, 100.0 * ratio + 4.0));
        }
    }

    #[test]
    fn auto_rotate_off_applies_offsets_as_is() {
        let path = PathData::new().m(0.0, 0.0).l(100.0, 100.0);
        let label = get_label_position(&path, LabelPlacement::Center, false, 4.0, -3.0).unwrap();
        assert_eq!(label.rotation, 0.0);
        assert_point_eq(label.position, dvec2(54.0, 47.0));
    }

    #[test]
    fn empty_path_has_no_label_position() {
        assert_eq!(
            get_label_position(&PathData::new(), LabelPlacement::Center, true, 0.0, 0.0),
            None
        );
    }

    #[test]
    fn word_wrap_width() {
        let bounds = BBox::new(dvec2(0.0, 0.0), dvec2(30.0, 40.0));
        assert_eq!(get_word_wrap_width_by_ends(&bounds, MaxWidth::Percent(80.0)), 40.0);
        assert_eq!(get_word_wrap_width_by_ends(&bounds, MaxWidth::Absolute(20.0)), 20.0);
        assert_eq!(get_word_wrap_width_by_ends(&bounds, MaxWidth::Absolute(200.0)), 50.0);
    }

    #[test]
    fn max_width_parses_percent_and_number() {
        assert_eq!("80%".parse::<MaxWidth>(), Ok(MaxWidth::Percent(80.0)));
        assert_eq!("120".parse::<MaxWidth>(), Ok(MaxWidth::Absolute(120.0)));
        assert!("wide".parse::<MaxWidth>().is_err());
    }
}
