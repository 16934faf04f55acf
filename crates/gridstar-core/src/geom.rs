//! Geometry primitives: [`Point`] and [`Range`].
//!
//! `x` is the column and `y` is the row. Which vertical extreme row 0 sits
//! at is up to whoever draws the grid; the search never cares.

use std::fmt;
use std::ops::Add;

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A cell coordinate on a 2D grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Absolute per-axis distance to `other`, as a point `(|dx|, |dy|)`.
    #[inline]
    pub fn abs_delta(self, other: Point) -> Point {
        Point::new((self.x - other.x).abs(), (self.y - other.y).abs())
    }

    /// Whether `other` is one of the eight cells touching `self`.
    #[inline]
    pub fn is_adjacent(self, other: Point) -> bool {
        let d = self.abs_delta(other);
        d != Point::ZERO && d.x <= 1 && d.y <= 1
    }

    /// Whether `other` touches `self` along an axis (no diagonal).
    #[inline]
    pub fn is_orthogonally_adjacent(self, other: Point) -> bool {
        let d = self.abs_delta(other);
        d.x + d.y == 1
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

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A half-open rectangle \[min, max): `min` inclusive, `max` exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// The range `[0, width) × [0, height)`.
    #[inline]
    pub fn sized(width: i32, height: i32) -> Self {
        Self {
            min: Point::ZERO,
            max: Point::new(width, height),
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

    /// Number of cells covered.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.width() as usize) * (self.height() as usize)
    }

    /// Whether the range covers no cell.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Whether `p` lies inside the range.
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Row-major iterator over every point in the range.
    #[inline]
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            cur: self.min,
        }
    }
}

impl IntoIterator for Range {
    type Item = Point;
    type IntoIter = RangeIter;
    #[inline]
    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

/// Row-major iterator over the points of a [`Range`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    cur: Point,
}

impl Iterator for RangeIter {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        if self.range.is_empty() || self.cur.y >= self.range.max.y {
            return None;
        }
        let p = self.cur;
        self.cur.x += 1;
        if self.cur.x >= self.range.max.x {
            self.cur.x = self.range.min.x;
            self.cur.y += 1;
        }
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.range.is_empty() || self.cur.y >= self.range.max.y {
            return (0, Some(0));
        }
        let row_rest = (self.range.max.x - self.cur.x) as usize;
        let rows_after = (self.range.max.y - self.cur.y - 1) as usize;
        let n = row_rest + rows_after * self.range.width() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for RangeIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = Point::new(1, 2);
        let b = Point::new(3, 4);
        assert_eq!(a + b, Point::new(4, 6));
        assert_eq!(a.abs_delta(b), Point::new(2, 2));
        assert_eq!(b.abs_delta(a), Point::new(2, 2));
        assert_eq!(a.to_string(), "(1, 2)");
    }

    #[test]
    fn point_adjacency() {
        let p = Point::new(5, 5);
        assert!(p.is_adjacent(Point::new(6, 6)));
        assert!(p.is_adjacent(Point::new(4, 5)));
        assert!(!p.is_adjacent(p));
        assert!(!p.is_adjacent(Point::new(7, 5)));
        assert!(p.is_orthogonally_adjacent(Point::new(5, 4)));
        assert!(!p.is_orthogonally_adjacent(Point::new(4, 4)));
    }

    #[test]
    fn range_basics() {
        let r = Range::sized(3, 2);
        assert_eq!((r.width(), r.height()), (3, 2));
        assert_eq!(r.len(), 6);
        assert!(r.contains(Point::new(0, 0)));
        assert!(r.contains(Point::new(2, 1)));
        assert!(!r.contains(Point::new(3, 0)));
        assert!(!r.contains(Point::new(0, 2)));
        assert!(!r.contains(Point::new(-1, 0)));
    }

    #[test]
    fn range_iter_is_row_major() {
        let pts: Vec<_> = Range::sized(3, 2).iter().collect();
        assert_eq!(pts.len(), 6);
        assert_eq!(pts[0], Point::new(0, 0));
        assert_eq!(pts[3], Point::new(0, 1));
        assert_eq!(pts[5], Point::new(2, 1));
        assert_eq!(Range::sized(3, 2).iter().len(), 6);
    }

    #[test]
    fn empty_range() {
        let r = Range::sized(0, 4);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.iter().count(), 0);
    }
}
