//! Core value types: points, segments and axis-aligned bounds.
//!
//! Points are `glam::DVec2` so every geometric routine gets vector math for
//! free. The record form [`PointObject`] exists for callers that carry
//! `{ x, y }` data; both convert into each other without loss.

use glam::{DVec2, dvec2};

/// A point in canvas space (x grows right, y grows down).
pub type Point = DVec2;

/// A directed segment `[from, to]`.
pub type Segment = [Point; 2];

/// Record form of a point
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PointObject {
    pub x: f64,
    pub y: f64,
}

impl PointObject {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Point> for PointObject {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<PointObject> for Point {
    fn from(p: PointObject) -> Self {
        dvec2(p.x, p.y)
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl Default for BBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl BBox {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Box of the given size centered on `center`
    pub fn from_center_size(center: Point, size: DVec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Create an empty bounding box (will expand on first point)
    pub fn empty() -> Self {
        Self {
            min: dvec2(f64::MAX, f64::MAX),
            max: dvec2(f64::MIN, f64::MIN),
        }
    }

    /// Smallest box containing every point, `None` for an empty iterator
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut bbox = Self::empty();
        for p in points {
            bbox.expand_point(p);
        }
        (!bbox.is_empty()).then_some(bbox)
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: Point) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    pub fn half_size(&self) -> DVec2 {
        self.size() / 2.0
    }

    pub fn center(&self) -> Point {
        (self.min + self.max) / 2.0
    }

    /// Corners clockwise from the top-left
    pub fn corners(&self) -> [Point; 4] {
        [
            self.min,
            dvec2(self.max.x, self.min.y),
            self.max,
            dvec2(self.min.x, self.max.y),
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_object_round_trip() {
        let p = dvec2(12.5, -3.0);
        let obj = PointObject::from(p);
        assert_eq!(obj, PointObject::new(12.5, -3.0));
        assert_eq!(Point::from(obj), p);
    }

    #[test]
    fn bbox_new_is_empty() {
        assert!(BBox::empty().is_empty());
        assert_eq!(BBox::from_points([]), None);
    }

    #[test]
    fn bbox_from_points() {
        let bb = BBox::from_points([dvec2(1.0, 2.0), dvec2(5.0, 8.0), dvec2(3.0, 0.0)]).unwrap();
        assert_eq!(bb.min, dvec2(1.0, 0.0));
        assert_eq!(bb.max, dvec2(5.0, 8.0));
        assert_eq!(bb.width(), 4.0);
        assert_eq!(bb.height(), 8.0);
        assert_eq!(bb.center(), dvec2(3.0, 4.0));
    }

    #[test]
    fn bbox_from_center_size() {
        // center (5,5), width 4, height 2 -> min (3,4), max (7,6)
        let bb = BBox::from_center_size(dvec2(5.0, 5.0), dvec2(4.0, 2.0));
        assert_eq!(bb.min, dvec2(3.0, 4.0));
        assert_eq!(bb.max, dvec2(7.0, 6.0));
        assert_eq!(bb.half_size(), dvec2(2.0, 1.0));
    }

    #[test]
    fn bbox_corners_go_clockwise() {
        let bb = BBox::new(dvec2(0.0, 0.0), dvec2(2.0, 1.0));
        assert_eq!(
            bb.corners(),
            [dvec2(0.0, 0.0), dvec2(2.0, 0.0), dvec2(2.0, 1.0), dvec2(0.0, 1.0)]
        );
    }
}
