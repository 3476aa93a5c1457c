use std::collections::BinaryHeap;

use gridwalk_core::{Grid, Point};

use crate::Pathfinder;
use crate::distance::{octile, step_cost};
use crate::pathfinder::HeapRef;

impl Pathfinder {
    /// Compute the cheapest path from `from` to `to` using A*.
    ///
    /// The frontier-based companion to [`greedy_path`](Self::greedy_path):
    /// same grid, same neighbor order, same 1.0/1.4 step costs, but it
    /// keeps an open frontier and backtracks through it, so it finds the
    /// detour a committed walk dead-ends on. Returns the full path
    /// including both endpoints, or `None` if no path exists within the
    /// current bounds.
    pub fn astar_path(&mut self, grid: &Grid, from: Point, to: Point) -> Option<Vec<Point>> {
        let start_idx = self.idx(from)?;
        let goal_idx = self.idx(to)?;

        if start_idx == goal_idx {
            return Some(vec![from]);
        }

        // Bump generation to lazily invalidate all nodes.
        self.astar_generation = self.astar_generation.wrapping_add(1);
        let cur_gen = self.astar_generation;

        // Initialise the start node.
        {
            let node = &mut self.astar_nodes[start_idx];
            node.g = 0.0;
            node.f = octile(from, to);
            node.parent = usize::MAX;
            node.generation = cur_gen;
            node.open = true;
        }

        let mut open: BinaryHeap<HeapRef> = BinaryHeap::new();
        open.push(HeapRef {
            idx: start_idx,
            f: self.astar_nodes[start_idx].f,
        });

        let mut neighbors = std::mem::take(&mut self.neighbors);

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search false;
            };

            let ci = current.idx;

            // Skip stale entries.
            if self.astar_nodes[ci].generation != cur_gen || !self.astar_nodes[ci].open {
                continue;
            }

            if ci == goal_idx {
                break 'search true;
            }

            self.astar_nodes[ci].open = false;
            let current_g = self.astar_nodes[ci].g;
            let current_point = self.point(ci);

            let candidates = neighbors.ordered(current_point, |p| grid.is_walkable(p));
            for &np in candidates {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative_g = current_g + step_cost(current_point, np);

                let n = &mut self.astar_nodes[ni];
                if n.generation == cur_gen {
                    // Already relaxed this generation.
                    if tentative_g >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                }

                n.g = tentative_g;
                n.f = tentative_g + octile(np, to);
                n.parent = ci;
                n.open = true;

                open.push(HeapRef { idx: ni, f: n.f });
            }
        };

        self.neighbors = neighbors;

        if !found {
            return None;
        }

        // Reconstruct path.
        let mut path = Vec::new();
        let mut ci = goal_idx;
        while ci != usize::MAX {
            path.push(self.point(ci));
            ci = self.astar_nodes[ci].parent;
        }
        path.reverse();
        Some(path)
    }
}
