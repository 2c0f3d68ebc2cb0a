//! Integer geometry in document space.
//!
//! Points and boxes are always whole EMU. Centers and distances are computed in
//! `f64` because a box center can fall on a half unit.
use serde::{Deserialize, Serialize};

/// A point in document (or image-relative) space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Round a floating-point position to the nearest EMU.
    #[inline]
    pub fn from_f64(x: f64, y: f64) -> Self {
        Self::new(x.round() as i64, y.round() as i64)
    }

    /// Snap onto a square grid of `cell` EMU, merging near-coincident points.
    ///
    /// A `cell` below 1 is treated as 1 (no merging).
    pub fn snapped(&self, cell: i64) -> Self {
        let cell = cell.max(1);
        let snap = |v: i64| (v as f64 / cell as f64).round() as i64 * cell;
        Self::new(snap(self.x), snap(self.y))
    }

    /// Squared Euclidean distance to a floating-point position.
    #[inline]
    pub fn distance_squared_to(&self, (cx, cy): (f64, f64)) -> f64 {
        let dx = self.x as f64 - cx;
        let dy = self.y as f64 - cy;
        dx * dx + dy * dy
    }
}

/// Axis-aligned box with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl BoundingBox {
    #[inline]
    pub const fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> i64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> i64 {
        self.y + self.height
    }

    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }

    /// Area in square EMU, as `f64` so slide-sized boxes cannot overflow.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }

    /// Inclusive containment test against the box grown by `pad` on every side.
    pub fn contains_padded(&self, p: Point, pad: i64) -> bool {
        self.x - pad <= p.x
            && p.x <= self.right() + pad
            && self.y - pad <= p.y
            && p.y <= self.bottom() + pad
    }

    /// Smallest box covering both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        BoundingBox::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_merges_nearby_points() {
        let a = Point::new(1_003_900, 2_000_100).snapped(8000);
        let b = Point::new(1_000_100, 1_996_500).snapped(8000);
        assert_eq!(a, b);
        assert_eq!(a, Point::new(1_000_000, 2_000_000));
    }

    #[test]
    fn test_snap_with_degenerate_cell() {
        let p = Point::new(17, -3);
        assert_eq!(p.snapped(0), p);
        assert_eq!(p.snapped(-5), p);
    }

    #[test]
    fn test_contains_padded_is_inclusive() {
        let b = BoundingBox::new(100, 100, 50, 20);
        assert!(b.contains_padded(Point::new(150, 120), 0));
        assert!(!b.contains_padded(Point::new(151, 120), 0));
        assert!(b.contains_padded(Point::new(96, 96), 4));
        assert!(!b.contains_padded(Point::new(95, 110), 4));
    }

    #[test]
    fn test_center_and_union() {
        let a = BoundingBox::new(0, 0, 3, 4);
        assert_eq!(a.center(), (1.5, 2.0));
        let b = BoundingBox::new(10, -2, 5, 5);
        assert_eq!(a.union(&b), BoundingBox::new(0, -2, 15, 6));
    }

    #[test]
    fn test_distance_squared() {
        assert_eq!(Point::new(3, 4).distance_squared_to((0.0, 0.0)), 25.0);
    }
}
