//! **gridwalk-core** — Core grid types for single-path grid search.
//!
//! This crate provides the foundational types used across the *gridwalk*
//! workspace: geometry primitives and the walkability grid that searches
//! operate on. Coordinates are 1-based and `y` grows downward.

pub mod geom;
pub mod grid;

pub use geom::{Point, Range};
pub use grid::{Cell, Grid, GridError, GridIter};
