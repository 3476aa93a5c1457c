use gridwalk_core::{Point, Range};

use crate::neighbors::Neighbors;

/// The `g`/`h`/`f` record of a cell scored by the most recent greedy walk,
/// returned from [`Pathfinder::score_at`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellScore {
    /// Cost accumulated from the start to this cell.
    pub g: f32,
    /// Manhattan distance from this cell to the destination.
    pub h: i32,
    /// `g + h`.
    pub f: f32,
}

// ---------------------------------------------------------------------------
// Internal node records
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub(crate) struct WalkNode {
    pub(crate) g: f32,
    pub(crate) h: i32,
    pub(crate) f: f32,
    pub(crate) visited: bool,
    pub(crate) generation: u32,
}

#[derive(Clone)]
pub(crate) struct AstarNode {
    pub(crate) g: f32,
    pub(crate) f: f32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) open: bool,
}

impl Default for AstarNode {
    fn default() -> Self {
        Self {
            g: 0.0,
            f: 0.0,
            parent: usize::MAX,
            generation: 0,
            open: false,
        }
    }
}

/// Reference into the A* node array, ordered by `f` for use in `BinaryHeap`.
#[derive(Clone, Copy)]
pub(crate) struct HeapRef {
    pub(crate) idx: usize,
    pub(crate) f: f32,
}

impl PartialEq for HeapRef {
    fn eq(&self, other: &Self) -> bool {
        self.f.total_cmp(&other.f).is_eq()
    }
}

impl Eq for HeapRef {}

impl Ord for HeapRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first.
        other.f.total_cmp(&self.f)
    }
}

impl PartialOrd for HeapRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Pathfinder
// ---------------------------------------------------------------------------

/// Central coordinator for searches over a grid rectangle.
///
/// `Pathfinder` owns all per-run search state (the greedy walk's node
/// records, the A* node records, the neighbor scratch buffer) so that
/// repeated queries incur no allocations after the first use. Node records
/// are stamped with a generation counter bumped at the start of each run,
/// so re-running after grid mutation or with different endpoints needs no
/// reset pass and never observes stale state.
///
/// Concurrent searches need separate `Pathfinder` values; a search borrows
/// its grid immutably for the duration of one call.
pub struct Pathfinder {
    pub(crate) bounds: Range,
    pub(crate) width: usize,
    // Greedy walk records
    pub(crate) walk_nodes: Vec<WalkNode>,
    pub(crate) walk_generation: u32,
    // A* records
    pub(crate) astar_nodes: Vec<AstarNode>,
    pub(crate) astar_generation: u32,
    // Shared scratch for neighbor queries
    pub(crate) neighbors: Neighbors,
    pub(crate) step_limit: Option<usize>,
}

impl Pathfinder {
    /// Create a new `Pathfinder` for the given grid rectangle, typically
    /// [`Grid::bounds`](gridwalk_core::Grid::bounds).
    ///
    /// Generation counters start at 1 while node records start at 0, so
    /// [`visited`](Self::visited) and [`score_at`](Self::score_at) report
    /// nothing until a walk has actually run.
    pub fn new(bounds: Range) -> Self {
        let w = bounds.width().max(0) as usize;
        let len = bounds.len();
        Self {
            bounds,
            width: w,
            walk_nodes: vec![WalkNode::default(); len],
            walk_generation: 1,
            astar_nodes: vec![AstarNode::default(); len],
            astar_generation: 1,
            neighbors: Neighbors::new(),
            step_limit: None,
        }
    }

    /// Replace the underlying bounds, reallocating node arrays as needed.
    ///
    /// If the new size fits within existing capacity, the arrays are kept
    /// and only generation counters are bumped, so stale records are
    /// ignored without a reset pass. Otherwise the arrays are reallocated.
    pub fn set_bounds(&mut self, bounds: Range) {
        let new_len = bounds.len();
        let old_capacity = self.walk_nodes.len();
        self.bounds = bounds;
        self.width = bounds.width().max(0) as usize;

        if new_len <= old_capacity {
            self.walk_generation = self.walk_generation.wrapping_add(1);
            self.astar_generation = self.astar_generation.wrapping_add(1);
            return;
        }

        self.walk_nodes.clear();
        self.walk_nodes.resize(new_len, WalkNode::default());
        self.walk_generation = 1;

        self.astar_nodes.clear();
        self.astar_nodes.resize(new_len, AstarNode::default());
        self.astar_generation = 1;
    }

    /// The grid rectangle being searched.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Cap the number of waypoints one greedy walk may append, `None` for
    /// unlimited (the default). A walk that would exceed the cap stops with
    /// [`SearchOutcome::NotFound`](crate::SearchOutcome::NotFound) and the
    /// partial path; the destination counts like any other waypoint.
    pub fn set_step_limit(&mut self, limit: Option<usize>) {
        self.step_limit = limit;
    }

    /// The current step limit.
    #[inline]
    pub fn step_limit(&self) -> Option<usize> {
        self.step_limit
    }

    // -----------------------------------------------------------------------
    // Post-run queries
    // -----------------------------------------------------------------------

    /// Whether `p` was expanded by the most recent greedy walk.
    ///
    /// This is the walked route plus its starting cell; cells that were
    /// merely scored as candidates do not count. A* runs leave it
    /// untouched.
    pub fn visited(&self, p: Point) -> bool {
        self.idx(p).is_some_and(|i| {
            let n = &self.walk_nodes[i];
            n.generation == self.walk_generation && n.visited
        })
    }

    /// The cost record of `p` if the most recent greedy walk scored it,
    /// `None` otherwise.
    ///
    /// Covers every expanded or candidate cell of that walk; the starting
    /// cell reports the zero record it was seeded with.
    pub fn score_at(&self, p: Point) -> Option<CellScore> {
        let i = self.idx(p)?;
        let n = &self.walk_nodes[i];
        if n.generation != self.walk_generation {
            return None;
        }
        Some(CellScore {
            g: n.g,
            h: n.h,
            f: n.f,
        })
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of bounds.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        let x = (p.x - self.bounds.min.x) as usize;
        let y = (p.y - self.bounds.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.bounds.min.x;
        let y = (idx / self.width) as i32 + self.bounds.min.y;
        Point::new(x, y)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Pathfinder {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.bounds.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Pathfinder {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bounds = Range::deserialize(deserializer)?;
        Ok(Pathfinder::new(bounds))
    }
}
