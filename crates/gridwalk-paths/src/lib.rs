//! Greedy single-path search for walkability grids.
//!
//! This crate provides the search side of the *gridwalk* workspace:
//!
//! - **Greedy walk** ([`Pathfinder::greedy_path`]) — a committed,
//!   non-backtracking walker that always moves to the best-looking
//!   neighbor of its current cell and never revisits a cell. Fast and
//!   deterministic, but it can dead-end and report [`SearchOutcome::NotFound`]
//!   even when a path exists.
//! - **A\*** shortest-path search ([`Pathfinder::astar_path`]) — the
//!   frontier-based companion for callers that need the detour the greedy
//!   walk refuses to take.
//!
//! Both operate through [`Pathfinder`], which owns and reuses internal node
//! caches so that repeated queries incur zero allocations after warm-up.
//! Costs are 1.0 per orthogonal step and 1.4 per diagonal step; the greedy
//! walk steers by integer Manhattan distance and A\* by the octile
//! distance.

mod astar;
mod distance;
mod greedy;
mod neighbors;
mod pathfinder;

pub use distance::{chebyshev, manhattan, octile, step_cost};
pub use greedy::{GreedyPath, SearchOutcome};
pub use neighbors::{NEIGHBOR_ORDER, Neighbors};
pub use pathfinder::{CellScore, Pathfinder};
