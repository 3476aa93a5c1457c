use gridwalk_core::Point;

/// The eight neighbor offsets in selection order: orthogonals first (top,
/// right, bottom, left), then diagonals (top-right, right-bottom,
/// left-bottom, left-top). `y` grows down.
///
/// The order is load-bearing: candidates that tie on cost resolve to the
/// one listed earlier.
pub const NEIGHBOR_ORDER: [Point; 8] = [
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
    Point::new(1, -1),
    Point::new(1, 1),
    Point::new(-1, 1),
    Point::new(-1, -1),
];

/// Cached neighbor computation helper.
///
/// Enumerates the up to eight cells surrounding a grid point in
/// [`NEIGHBOR_ORDER`], filtered by a predicate, reusing one internal
/// buffer across queries.
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Return the neighbors of `p` in [`NEIGHBOR_ORDER`], keeping only
    /// those for which `keep` returns `true`. Relative order is preserved.
    pub fn ordered(&mut self, p: Point, keep: impl Fn(Point) -> bool) -> &[Point] {
        self.buf.clear();
        for d in NEIGHBOR_ORDER {
            let n = p + d;
            if keep(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }
}
