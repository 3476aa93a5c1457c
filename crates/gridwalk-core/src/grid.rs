//! The [`Grid`] type — a fixed-size rectangular field of walkable cells.
//!
//! Coordinates are 1-based: a `width × height` grid spans `(1, 1)` to
//! `(width, height)` inclusive. Out-of-range lookups answer `None` and
//! out-of-range mutations are no-ops; neighbor enumeration probes past the
//! border as a matter of course, so those are normal outcomes, not errors.

use std::fmt;

use crate::geom::{Point, Range, RangeIter};

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// One grid position: an immutable coordinate identity plus its walkability.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub pos: Point,
    pub walkable: bool,
}

// ---------------------------------------------------------------------------
// GridError
// ---------------------------------------------------------------------------

/// Errors that can occur when constructing a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Width or height was zero or negative.
    InvalidDimensions { width: i32, height: i32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "grid dimensions must be positive, got {width}x{height}")
            }
        }
    }
}

impl std::error::Error for GridError {}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A dense rectangular grid of [`Cell`]s with 1-based addressing.
///
/// The grid is plainly owned by its caller; searches borrow it immutably.
/// Only walkability changes after construction.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    bounds: Range,
    walkable: Vec<bool>,
}

impl Grid {
    /// Create a `width × height` grid with every cell walkable.
    ///
    /// Fails with [`GridError::InvalidDimensions`] if either dimension is
    /// zero or negative.
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let bounds = Range::new(1, 1, width + 1, height + 1);
        Ok(Self {
            walkable: vec![true; bounds.len()],
            bounds,
        })
    }

    /// The bounding range: `[(1, 1), (width + 1, height + 1))`.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Size of the grid as a `Point`.
    #[inline]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    /// Width.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Whether `p` is a cell of this grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Flat index of an in-range point: row-major over `(x - 1, y - 1)`.
    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        let x = (p.x - self.bounds.min.x) as usize;
        let y = (p.y - self.bounds.min.y) as usize;
        Some(y * self.bounds.width() as usize + x)
    }

    /// The cell at `p`, or `None` if `p` is out of range.
    pub fn at(&self, p: Point) -> Option<Cell> {
        self.index(p).map(|i| Cell {
            pos: p,
            walkable: self.walkable[i],
        })
    }

    /// Whether `p` is an in-range, walkable cell.
    ///
    /// Out-of-range points answer `false`, which makes this the natural
    /// candidate filter for searches.
    #[inline]
    pub fn is_walkable(&self, p: Point) -> bool {
        self.index(p).map(|i| self.walkable[i]).unwrap_or(false)
    }

    /// Set the walkability of the cell at `p`. Does nothing if `p` is out
    /// of range.
    pub fn set_walkable(&mut self, p: Point, walkable: bool) {
        if let Some(i) = self.index(p) {
            self.walkable[i] = walkable;
        }
    }

    /// Row-major iterator over every [`Cell`].
    pub fn iter(&self) -> GridIter<'_> {
        GridIter {
            grid: self,
            inner: self.bounds.iter(),
        }
    }
}

// ---------------------------------------------------------------------------
// GridIter
// ---------------------------------------------------------------------------

/// Iterator over the [`Cell`]s of a [`Grid`] in row-major order.
pub struct GridIter<'a> {
    grid: &'a Grid,
    inner: RangeIter,
}

impl Iterator for GridIter<'_> {
    type Item = Cell;

    #[inline]
    fn next(&mut self) -> Option<Cell> {
        self.inner.next().map(|p| Cell {
            pos: p,
            walkable: self.grid.is_walkable(p),
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for GridIter<'_> {}

impl<'a> IntoIterator for &'a Grid {
    type Item = Cell;
    type IntoIter = GridIter<'a>;

    fn into_iter(self) -> GridIter<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_non_positive_dimensions() {
        for (w, h) in [(0, 5), (5, 0), (-1, 5), (5, -3), (0, 0)] {
            let err = Grid::new(w, h).unwrap_err();
            assert_eq!(
                err,
                GridError::InvalidDimensions {
                    width: w,
                    height: h
                }
            );
        }
    }

    #[test]
    fn new_starts_all_walkable() {
        let g = Grid::new(4, 3).unwrap();
        assert_eq!(g.width(), 4);
        assert_eq!(g.height(), 3);
        assert_eq!(g.size(), Point::new(4, 3));
        assert!(g.iter().all(|c| c.walkable));
    }

    #[test]
    fn at_returns_identity_coordinates() {
        let g = Grid::new(7, 5).unwrap();
        for y in 1..=5 {
            for x in 1..=7 {
                let p = Point::new(x, y);
                let c = g.at(p).unwrap();
                assert_eq!(c.pos, p);
            }
        }
    }

    #[test]
    fn at_is_none_outside_the_grid() {
        let g = Grid::new(7, 5).unwrap();
        for p in [
            Point::new(0, 1),
            Point::new(1, 0),
            Point::new(8, 1),
            Point::new(1, 6),
            Point::new(-2, 3),
            Point::new(3, -2),
            Point::new(8, 6),
        ] {
            assert_eq!(g.at(p), None);
            assert!(!g.contains(p));
        }
    }

    #[test]
    fn set_walkable_toggles_and_is_idempotent() {
        let mut g = Grid::new(3, 3).unwrap();
        let p = Point::new(2, 2);
        g.set_walkable(p, false);
        assert!(!g.is_walkable(p));
        // Setting the same flag again changes nothing.
        g.set_walkable(p, false);
        assert!(!g.is_walkable(p));
        assert_eq!(g.iter().filter(|c| !c.walkable).count(), 1);
        g.set_walkable(p, true);
        assert!(g.is_walkable(p));
    }

    #[test]
    fn set_walkable_out_of_range_is_a_no_op() {
        let mut g = Grid::new(3, 3).unwrap();
        g.set_walkable(Point::new(0, 0), false);
        g.set_walkable(Point::new(4, 2), false);
        assert!(g.iter().all(|c| c.walkable));
    }

    #[test]
    fn is_walkable_is_false_out_of_range() {
        let g = Grid::new(2, 2).unwrap();
        assert!(g.is_walkable(Point::new(1, 1)));
        assert!(!g.is_walkable(Point::new(3, 1)));
        assert!(!g.is_walkable(Point::new(0, 2)));
    }

    #[test]
    fn iter_is_row_major_and_complete() {
        let mut g = Grid::new(3, 2).unwrap();
        g.set_walkable(Point::new(2, 1), false);
        let cells: Vec<_> = g.iter().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0].pos, Point::new(1, 1));
        assert_eq!(cells[1].pos, Point::new(2, 1));
        assert!(!cells[1].walkable);
        assert_eq!(cells[5].pos, Point::new(3, 2));
    }

    #[test]
    fn display_of_invalid_dimensions() {
        let err = Grid::new(0, -2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "grid dimensions must be positive, got 0x-2"
        );
    }
}
