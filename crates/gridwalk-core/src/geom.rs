//! Integer geometry for grid addressing: [`Point`] and [`Range`].

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D integer coordinate in screen orientation: x grows right, y down.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The point offset by `(dx, dy)`.
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    /// Row-major order: by `y`, then by `x`.
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { x, y } = self;
        write!(f, "({x}, {y})")
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// An axis-aligned rectangle of points, inclusive of `min`, exclusive of
/// `max`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// Build a range from two corners, canonicalized so that `min` ≤ `max`
    /// on each axis.
    #[inline]
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let min = Point::new(x0.min(x1), y0.min(y1));
        let max = Point::new(x0.max(x1), y0.max(y1));
        Self { min, max }
    }

    /// Extent on both axes, as a `Point`.
    #[inline]
    pub fn size(self) -> Point {
        self.max - self.min
    }

    /// Extent on the x axis.
    #[inline]
    pub fn width(self) -> i32 {
        self.size().x
    }

    /// Extent on the y axis.
    #[inline]
    pub fn height(self) -> i32 {
        self.size().y
    }

    /// Number of points in the range.
    #[inline]
    pub fn len(self) -> usize {
        let s = self.size();
        s.x as usize * s.y as usize
    }

    /// Whether the range covers no points.
    #[inline]
    pub fn is_empty(self) -> bool {
        let s = self.size();
        s.x == 0 || s.y == 0
    }

    /// Whether `p` falls within the half-open bounds.
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        (self.min.x..self.max.x).contains(&p.x) && (self.min.y..self.max.y).contains(&p.y)
    }

    /// Row-major iterator over every point in the range.
    #[inline]
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            idx: 0,
            len: self.len(),
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

// ---------------------------------------------------------------------------
// RangeIter
// ---------------------------------------------------------------------------

/// Row-major iterator over the points of a [`Range`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    idx: usize,
    len: usize,
}

impl Iterator for RangeIter {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        if self.idx >= self.len {
            return None;
        }
        let w = self.range.width() as usize;
        let offset = Point::new((self.idx % w) as i32, (self.idx / w) as i32);
        self.idx += 1;
        Some(self.range.min + offset)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.len - self.idx;
        (left, Some(left))
    }
}

impl ExactSizeIterator for RangeIter {}
