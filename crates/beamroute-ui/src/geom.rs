//! Geometry primitives: [`Point`], [`Range`], and straight-line rasterising.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A cell position. X grows right, Y grows down (screen coordinates).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return a point shifted by (dx, dy).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The point halfway between `self` and `other`, rounded toward `self`.
    #[inline]
    pub const fn midpoint(self, other: Point) -> Self {
        Self {
            x: self.x + (other.x - self.x) / 2,
            y: self.y + (other.y - self.y) / 2,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A half-open rectangle \[min, max).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// Create a range from two corners, canonicalised so `min` ≤ `max`.
    #[inline]
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0.min(x1), y0.min(y1)),
            max: Point::new(x0.max(x1), y0.max(y1)),
        }
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Row-major iterator over every point in the range.
    pub fn iter(self) -> impl Iterator<Item = Point> {
        let Range { min, max } = self;
        (min.y..max.y).flat_map(move |y| (min.x..max.x).map(move |x| Point::new(x, y)))
    }
}

// ---------------------------------------------------------------------------
// Lines
// ---------------------------------------------------------------------------

/// Points on the straight segment from `a` to `b`, both ends included
/// (Bresenham).
pub fn line(a: Point, b: Point) -> Vec<Point> {
    let dx = (b.x - a.x).abs();
    let dy = -(b.y - a.y).abs();
    let sx = if a.x < b.x { 1 } else { -1 };
    let sy = if a.y < b.y { 1 } else { -1 };

    let mut pts = Vec::with_capacity((dx.max(-dy) + 1) as usize);
    let mut p = a;
    let mut err = dx + dy;
    loop {
        pts.push(p);
        if p == b {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            p.x += sx;
        }
        if e2 <= dx {
            err += dx;
            p.y += sy;
        }
    }
    pts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_contains_is_half_open() {
        let r = Range::new(4, 3, 0, 0);
        assert_eq!(r.min, Point::ZERO);
        assert!(r.contains(Point::new(3, 2)));
        assert!(!r.contains(Point::new(4, 2)));
        assert_eq!(r.iter().count(), 12);
        assert!(Range::new(1, 1, 1, 5).is_empty());
    }

    #[test]
    fn line_includes_both_ends() {
        let pts = line(Point::new(0, 0), Point::new(4, 2));
        assert_eq!(pts.first(), Some(&Point::new(0, 0)));
        assert_eq!(pts.last(), Some(&Point::new(4, 2)));
        assert_eq!(pts.len(), 5);

        let back = line(Point::new(4, 2), Point::new(0, 0));
        assert_eq!(back.len(), 5);
        assert_eq!(line(Point::new(2, 2), Point::new(2, 2)), vec![Point::new(2, 2)]);
    }

    #[test]
    fn midpoint_rounds_toward_self() {
        assert_eq!(Point::new(0, 0).midpoint(Point::new(5, 3)), Point::new(2, 1));
        assert_eq!(Point::new(5, 3).midpoint(Point::new(0, 0)), Point::new(3, 2));
    }
}
