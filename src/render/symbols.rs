//! Arrow marker symbols
//!
//! A symbol is a pure function of `(width, height)` producing a path
//! centered on the origin with its tip at `-width / 2` on the x axis. The
//! renderer rotates and translates it onto the path end.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::svg::PathData;
use crate::errors::KeywordError;

/// Caller-supplied symbol
#[derive(Clone)]
pub struct SymbolFactory(Arc<dyn Fn(f64, f64) -> PathData + Send + Sync>);

impl SymbolFactory {
    pub fn new(f: impl Fn(f64, f64) -> PathData + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn build(&self, width: f64, height: f64) -> PathData {
        (self.0)(width, height)
    }
}

impl fmt::Debug for SymbolFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymbolFactory(..)")
    }
}

/// Two factories are equal when they share the same function.
impl PartialEq for SymbolFactory {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Marker shape
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ArrowType {
    #[default]
    Triangle,
    Circle,
    Diamond,
    Vee,
    Rect,
    TriangleRect,
    /// Two open strokes, drawn unfilled
    Simple,
    Custom(SymbolFactory),
}

impl ArrowType {
    pub fn path(&self, width: f64, height: f64) -> PathData {
        match self {
            ArrowType::Triangle => triangle(width, height),
            ArrowType::Circle => circle(width, height),
            ArrowType::Diamond => diamond(width, height),
            ArrowType::Vee => vee(width, height),
            ArrowType::Rect => rect(width, height),
            ArrowType::TriangleRect => triangle_rect(width, height),
            ArrowType::Simple => simple(width, height),
            ArrowType::Custom(factory) => factory.build(width, height),
        }
    }

    pub fn is_filled(&self) -> bool {
        !matches!(self, ArrowType::Simple)
    }
}

impl FromStr for ArrowType {
    type Err = KeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "triangle" => Ok(ArrowType::Triangle),
            "circle" => Ok(ArrowType::Circle),
            "diamond" => Ok(ArrowType::Diamond),
            "vee" => Ok(ArrowType::Vee),
            "rect" => Ok(ArrowType::Rect),
            "triangleRect" => Ok(ArrowType::TriangleRect),
            "simple" => Ok(ArrowType::Simple),
            _ => Err(KeywordError::new(
                s,
                "triangle, circle, diamond, vee, rect, triangleRect or simple",
            )),
        }
    }
}

pub fn triangle(width: f64, height: f64) -> PathData {
    PathData::new()
        .m(-width / 2.0, 0.0)
        .l(width / 2.0, -height / 2.0)
        .l(width / 2.0, height / 2.0)
        .z()
}

/// Circle of radius `max(width, height) / 2` touching the tip
pub fn circle(width: f64, height: f64) -> PathData {
    let r = width.max(height) / 2.0;
    PathData::new()
        .m(-width / 2.0, 0.0)
        .a(r, r, 0.0, true, false, 2.0 * r - width / 2.0, 0.0)
        .a(r, r, 0.0, true, false, -width / 2.0, 0.0)
        .z()
}

pub fn diamond(width: f64, height: f64) -> PathData {
    PathData::new()
        .m(-width / 2.0, 0.0)
        .l(0.0, -height / 2.0)
        .l(width / 2.0, 0.0)
        .l(0.0, height / 2.0)
        .z()
}

/// Triangle with a notch cut into its back
pub fn vee(width: f64, height: f64) -> PathData {
    PathData::new()
        .m(-width / 2.0, 0.0)
        .l(width / 2.0, -height / 2.0)
        .l(4.0 * width / 5.0 - width / 2.0, 0.0)
        .l(width / 2.0, height / 2.0)
        .z()
}

pub fn rect(width: f64, height: f64) -> PathData {
    PathData::new()
        .m(-width / 2.0, -height / 2.0)
        .l(width / 2.0, -height / 2.0)
        .l(width / 2.0, height / 2.0)
        .l(-width / 2.0, height / 2.0)
        .z()
}

/// Half-width triangle followed by a thin bar
pub fn triangle_rect(width: f64, height: f64) -> PathData {
    let bar_width = width / 7.0;
    let bar_x = width - bar_width - width / 2.0;
    PathData::new()
        .m(-width / 2.0, 0.0)
        .l(0.0, -height / 2.0)
        .l(0.0, height / 2.0)
        .z()
        .m(bar_x, -height / 2.0)
        .l(width / 2.0, -height / 2.0)
        .l(width / 2.0, height / 2.0)
        .l(bar_x, height / 2.0)
        .z()
}

pub fn simple(width: f64, height: f64) -> PathData {
    PathData::new()
        .m(-width / 2.0, 0.0)
        .l(width / 2.0, -height / 2.0)
        .m(-width / 2.0, 0.0)
        .l(width / 2.0, height / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_points_left() {
        insta::assert_snapshot!(triangle(10.0, 10.0).to_string(), @"M-5,0 L5,-5 L5,5 Z");
    }

    #[test]
    fn named_symbols() {
        insta::assert_snapshot!(diamond(10.0, 6.0).to_string(), @"M-5,0 L0,-3 L5,0 L0,3 Z");
        insta::assert_snapshot!(vee(10.0, 10.0).to_string(), @"M-5,0 L5,-5 L3,0 L5,5 Z");
        insta::assert_snapshot!(rect(10.0, 4.0).to_string(), @"M-5,-2 L5,-2 L5,2 L-5,2 Z");
        insta::assert_snapshot!(circle(10.0, 10.0).to_string(), @"M-5,0 A5,5 0 1 0 5,0 A5,5 0 1 0 -5,0 Z");
        insta::assert_snapshot!(simple(10.0, 10.0).to_string(), @"M-5,0 L5,-5 M-5,0 L5,5");
    }

    #[test]
    fn triangle_rect_has_two_subpaths() {
        let path = triangle_rect(14.0, 10.0);
        insta::assert_snapshot!(path.to_string(), @"M-7,0 L0,-5 L0,5 Z M5,-5 L7,-5 L7,5 L5,5 Z");
    }

    #[test]
    fn only_simple_is_unfilled() {
        assert!(ArrowType::Triangle.is_filled());
        assert!(ArrowType::Circle.is_filled());
        assert!(!ArrowType::Simple.is_filled());
    }

    #[test]
    fn keywords_parse() {
        assert_eq!("triangleRect".parse::<ArrowType>(), Ok(ArrowType::TriangleRect));
        assert_eq!("vee".parse::<ArrowType>(), Ok(ArrowType::Vee));
        assert!("arrow".parse::<ArrowType>().is_err());
    }

    #[test]
    fn custom_factory_is_called_with_size() {
        let factory = SymbolFactory::new(|w, h| PathData::new().m(0.0, 0.0).l(w, h));
        let arrow = ArrowType::Custom(factory.clone());
        insta::assert_snapshot!(arrow.path(3.0, 4.0).to_string(), @"M0,0 L3,4");
        assert_eq!(arrow, ArrowType::Custom(factory));
        assert_ne!(
            arrow,
            ArrowType::Custom(SymbolFactory::new(|_, _| PathData::new()))
        );
    }
}
