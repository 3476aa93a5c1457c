use gridwalk_core::{Grid, Point};

use crate::Pathfinder;
use crate::distance::{manhattan, step_cost};
use crate::pathfinder::WalkNode;

/// How a greedy walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchOutcome {
    /// The walk reached its destination.
    Found,
    /// The walk ran out of candidates or hit the step limit.
    NotFound,
}

/// The result of one greedy walk.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GreedyPath {
    /// The cells stepped to, in order. Excludes the start; ends with the
    /// destination when the walk found it, otherwise holds the partial
    /// route walked before giving up.
    pub waypoints: Vec<Point>,
    pub outcome: SearchOutcome,
    /// Accumulated step cost of `waypoints`.
    pub cost: f32,
}

impl GreedyPath {
    /// Whether the walk reached its destination.
    #[inline]
    pub fn found(&self) -> bool {
        self.outcome == SearchOutcome::Found
    }

    fn empty(outcome: SearchOutcome) -> Self {
        Self {
            waypoints: Vec::new(),
            outcome,
            cost: 0.0,
        }
    }
}

impl Pathfinder {
    /// Walk greedily from `from` toward `to` over the walkable cells of
    /// `grid`.
    ///
    /// The walk keeps a single current cell. Each step it scores the
    /// walkable, not yet visited neighbors of the current cell (`g` walked
    /// cost, `h` Manhattan distance to `to`, `f = g + h`), moves to the
    /// lowest-`f` candidate (ties fall to the earlier
    /// [`NEIGHBOR_ORDER`](crate::NEIGHBOR_ORDER) position) and never
    /// backtracks. It stops with [`SearchOutcome::Found`] when the chosen
    /// candidate is `to`, which is appended to the waypoints, or with
    /// [`SearchOutcome::NotFound`] once no candidate is left or the step
    /// limit is hit. A committed walker can dead-end short of a reachable
    /// destination; [`astar_path`](Self::astar_path) takes the detour
    /// instead.
    ///
    /// `from == to` (in bounds) is `Found` with no waypoints and no
    /// expansion. A `from` outside the bounds is `NotFound` with no
    /// waypoints. The walkability of `from` itself is not checked.
    pub fn greedy_path(&mut self, grid: &Grid, from: Point, to: Point) -> GreedyPath {
        // Every call invalidates the previous run's records, even when it
        // returns without walking.
        self.walk_generation = self.walk_generation.wrapping_add(1);

        let Some(mut ci) = self.idx(from) else {
            log::debug!("greedy walk rejected: start {} outside {:?}", from, self.bounds);
            return GreedyPath::empty(SearchOutcome::NotFound);
        };

        if from == to {
            log::debug!("greedy walk from {}: already at destination", from);
            return GreedyPath::empty(SearchOutcome::Found);
        }

        let cur_gen = self.walk_generation;
        log::debug!("greedy walk from {} to {}", from, to);

        let mut waypoints: Vec<Point> = Vec::new();
        let mut cost = 0.0_f32;
        let mut current = from;

        let mut neighbors = std::mem::take(&mut self.neighbors);

        let outcome = 'walk: loop {
            if let Some(limit) = self.step_limit {
                if waypoints.len() >= limit {
                    log::debug!("greedy walk stopped by step limit {} short of {}", limit, to);
                    break 'walk SearchOutcome::NotFound;
                }
            }

            // Mark the current cell expanded. Only the start can carry a
            // stale record here; every later current was scored as a
            // candidate first.
            {
                let n = &mut self.walk_nodes[ci];
                if n.generation != cur_gen {
                    *n = WalkNode::default();
                    n.generation = cur_gen;
                }
                n.visited = true;
            }

            let candidates = neighbors.ordered(current, |p| {
                grid.is_walkable(p)
                    && !self.idx(p).is_some_and(|i| {
                        let n = &self.walk_nodes[i];
                        n.generation == cur_gen && n.visited
                    })
            });

            // Score the candidates against the current cell and pick the
            // lowest f. The strict < keeps ties on the earlier enumeration
            // position. A frontier cell scored on an earlier step is
            // re-scored relative to the new current cell.
            let current_g = self.walk_nodes[ci].g;
            let mut best: Option<(usize, Point)> = None;
            let mut best_f = f32::INFINITY;
            for &np in candidates {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let g = current_g + step_cost(current, np);
                let h = manhattan(np, to);
                let f = g + h as f32;
                let n = &mut self.walk_nodes[ni];
                n.g = g;
                n.h = h;
                n.f = f;
                n.generation = cur_gen;
                n.visited = false;
                if f < best_f {
                    best_f = f;
                    best = Some((ni, np));
                }
            }

            let Some((ni, np)) = best else {
                log::debug!(
                    "greedy walk exhausted at {} after {} steps",
                    current,
                    waypoints.len()
                );
                break 'walk SearchOutcome::NotFound;
            };

            let (g, h) = {
                let n = &self.walk_nodes[ni];
                (n.g, n.h)
            };
            cost = g;
            waypoints.push(np);

            if h == 0 {
                log::debug!(
                    "greedy walk reached {} in {} steps (cost {:.1})",
                    to,
                    waypoints.len(),
                    cost
                );
                break 'walk SearchOutcome::Found;
            }

            log::trace!(
                "step {}: {} -> {} (f {:.1})",
                waypoints.len(),
                current,
                np,
                best_f
            );
            current = np;
            ci = ni;
        };

        self.neighbors = neighbors;

        GreedyPath {
            waypoints,
            outcome,
            cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::chebyshev;
    use gridwalk_core::Range;

    fn grid_with_walls(width: i32, height: i32, walls: &[(i32, i32)]) -> Grid {
        let mut g = Grid::new(width, height).unwrap();
        for &(x, y) in walls {
            g.set_walkable(Point::new(x, y), false);
        }
        g
    }

    fn points(coords: &[(i32, i32)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn diagonal_walk_across_an_open_grid() {
        let g = Grid::new(5, 5).unwrap();
        let mut pf = Pathfinder::new(g.bounds());
        let from = Point::new(1, 1);
        let to = Point::new(5, 5);

        let path = pf.greedy_path(&g, from, to);
        assert!(path.found());
        assert_eq!(path.waypoints, points(&[(2, 2), (3, 3), (4, 4), (5, 5)]));
        assert!((path.cost - 5.6).abs() < 1e-4);

        // Consecutive cells, start included, are always adjacent.
        let mut full = vec![from];
        full.extend(&path.waypoints);
        assert!(full.windows(2).all(|w| chebyshev(w[0], w[1]) == 1));
    }

    #[test]
    fn walk_with_no_candidates_fails_immediately() {
        let g = grid_with_walls(
            3,
            3,
            &[
                (1, 1),
                (2, 1),
                (3, 1),
                (1, 2),
                (3, 2),
                (1, 3),
                (2, 3),
                (3, 3),
            ],
        );
        let mut pf = Pathfinder::new(g.bounds());
        let center = Point::new(2, 2);

        let path = pf.greedy_path(&g, center, Point::new(3, 3));
        assert_eq!(path.outcome, SearchOutcome::NotFound);
        assert!(path.waypoints.is_empty());
        assert_eq!(path.cost, 0.0);
        assert!(pf.visited(center));
    }

    #[test]
    fn start_equals_end_is_found_without_expansion() {
        let g = Grid::new(4, 4).unwrap();
        let mut pf = Pathfinder::new(g.bounds());
        let p = Point::new(3, 2);

        let path = pf.greedy_path(&g, p, p);
        assert!(path.found());
        assert!(path.waypoints.is_empty());
        assert_eq!(path.cost, 0.0);
        assert!(!pf.visited(p));
        assert_eq!(pf.score_at(p), None);
    }

    #[test]
    fn dead_end_pocket_defeats_the_greedy_walk() {
        // Wall columns on both sides of x = 4 plus a cap at (4, 2) form a
        // corridor toward the destination that ends in a pocket.
        let walls = [
            (3, 2),
            (3, 3),
            (3, 4),
            (3, 5),
            (5, 2),
            (5, 3),
            (5, 4),
            (5, 5),
            (4, 2),
        ];
        let g = grid_with_walls(7, 7, &walls);
        let mut pf = Pathfinder::new(g.bounds());
        let from = Point::new(4, 6);
        let to = Point::new(4, 1);

        let path = pf.greedy_path(&g, from, to);
        assert_eq!(path.outcome, SearchOutcome::NotFound);
        assert_eq!(path.waypoints, points(&[(4, 5), (4, 4), (4, 3)]));

        // The frontier-based companion takes the detour around the walls.
        let detour = pf.astar_path(&g, from, to).unwrap();
        assert_eq!(detour.first(), Some(&from));
        assert_eq!(detour.last(), Some(&to));
        assert!(detour.windows(2).all(|w| chebyshev(w[0], w[1]) == 1));
        assert!(detour.iter().all(|&p| g.is_walkable(p)));
    }

    #[test]
    fn equal_cost_candidates_resolve_in_enumeration_order() {
        // From (2, 2) toward (4, 4) with (3, 3) walled, right (3, 2) and
        // bottom (2, 3) tie on f; right is listed first.
        let g = grid_with_walls(5, 5, &[(3, 3)]);
        let mut pf = Pathfinder::new(g.bounds());

        let path = pf.greedy_path(&g, Point::new(2, 2), Point::new(4, 4));
        assert!(path.found());
        assert_eq!(path.waypoints, points(&[(3, 2), (4, 3), (4, 4)]));
    }

    #[test]
    fn found_paths_end_with_the_destination() {
        let grids = [
            (Grid::new(5, 5).unwrap(), (1, 1), (5, 5)),
            (Grid::new(9, 3).unwrap(), (2, 2), (8, 2)),
            (grid_with_walls(6, 6, &[(3, 3), (4, 3)]), (2, 3), (6, 4)),
        ];
        for (g, from, to) in grids {
            let mut pf = Pathfinder::new(g.bounds());
            let to = Point::new(to.0, to.1);
            let path = pf.greedy_path(&g, Point::new(from.0, from.1), to);
            assert!(path.found());
            assert_eq!(path.waypoints.last(), Some(&to));
        }
    }

    #[test]
    fn step_limit_truncates_the_walk() {
        let g = Grid::new(10, 1).unwrap();
        let from = Point::new(1, 1);
        let to = Point::new(10, 1);
        let mut pf = Pathfinder::new(g.bounds());

        // Unlimited: nine waypoints down the corridor.
        let full = pf.greedy_path(&g, from, to);
        assert!(full.found());
        assert_eq!(full.waypoints.len(), 9);
        assert_eq!(full.cost, 9.0);

        // A limit that exactly covers the route still finds it.
        pf.set_step_limit(Some(9));
        assert!(pf.greedy_path(&g, from, to).found());

        // One short: the destination append would exceed the cap.
        pf.set_step_limit(Some(8));
        let trimmed = pf.greedy_path(&g, from, to);
        assert_eq!(trimmed.outcome, SearchOutcome::NotFound);
        assert_eq!(trimmed.waypoints.len(), 8);
        assert_eq!(trimmed.waypoints, full.waypoints[..8].to_vec());

        pf.set_step_limit(Some(4));
        let stub = pf.greedy_path(&g, from, to);
        assert_eq!(stub.outcome, SearchOutcome::NotFound);
        assert_eq!(stub.waypoints, full.waypoints[..4].to_vec());
        assert_eq!(stub.cost, 4.0);

        // A zero budget refuses to walk at all.
        pf.set_step_limit(Some(0));
        let none = pf.greedy_path(&g, from, to);
        assert_eq!(none.outcome, SearchOutcome::NotFound);
        assert!(none.waypoints.is_empty());

        pf.set_step_limit(None);
        assert!(pf.greedy_path(&g, from, to).found());
    }

    #[test]
    fn out_of_bounds_start_is_not_found() {
        let g = Grid::new(5, 5).unwrap();
        let mut pf = Pathfinder::new(g.bounds());

        for start in [Point::new(0, 3), Point::new(6, 1), Point::new(2, -4)] {
            let path = pf.greedy_path(&g, start, Point::new(3, 3));
            assert_eq!(path.outcome, SearchOutcome::NotFound);
            assert!(path.waypoints.is_empty());
        }

        // Equal endpoints outside the bounds are still a rejection.
        let oob = Point::new(9, 9);
        let path = pf.greedy_path(&g, oob, oob);
        assert_eq!(path.outcome, SearchOutcome::NotFound);
    }

    #[test]
    fn unreachable_destination_floods_until_exhaustion() {
        // The destination is walled, so h never reaches zero and the walk
        // wanders until every reachable cell is expanded.
        let g = grid_with_walls(3, 3, &[(3, 3)]);
        let mut pf = Pathfinder::new(g.bounds());
        let from = Point::new(1, 1);
        let to = Point::new(3, 3);

        let path = pf.greedy_path(&g, from, to);
        assert_eq!(path.outcome, SearchOutcome::NotFound);
        assert_eq!(
            path.waypoints,
            points(&[(2, 2), (3, 2), (2, 3), (1, 3), (1, 2), (2, 1), (3, 1)])
        );

        // All eight walkable cells were expanded; the wall was not.
        for c in g.iter() {
            assert_eq!(pf.visited(c.pos), c.walkable);
        }
    }

    #[test]
    fn frontier_cells_are_rescored_from_the_new_current() {
        let g = Grid::new(5, 5).unwrap();
        let mut pf = Pathfinder::new(g.bounds());
        pf.greedy_path(&g, Point::new(1, 1), Point::new(5, 5));

        // (2, 1) was first scored from (1, 1), then re-scored as a neighbor
        // of (2, 2); the record keeps the later scoring.
        let s = pf.score_at(Point::new(2, 1)).unwrap();
        assert!((s.g - 2.4).abs() < 1e-5);
        assert_eq!(s.h, 7);
        assert!((s.f - 9.4).abs() < 1e-5);
    }

    #[test]
    fn destination_is_scored_but_never_expanded() {
        let g = Grid::new(5, 5).unwrap();
        let mut pf = Pathfinder::new(g.bounds());
        let to = Point::new(5, 5);
        let path = pf.greedy_path(&g, Point::new(1, 1), to);
        assert!(path.found());

        // The walk stops on selecting the destination, so the destination
        // holds a score record without ever becoming the current cell.
        assert!(!pf.visited(to));
        let s = pf.score_at(to).unwrap();
        assert_eq!(s.h, 0);

        assert!(pf.visited(Point::new(1, 1)));
        assert!(pf.visited(Point::new(3, 3)));
    }

    #[test]
    fn rerun_after_grid_mutation_sees_fresh_state() {
        let mut g = Grid::new(5, 5).unwrap();
        let mut pf = Pathfinder::new(g.bounds());
        let from = Point::new(1, 1);
        let to = Point::new(5, 5);

        let open = pf.greedy_path(&g, from, to);
        assert_eq!(open.waypoints, points(&[(2, 2), (3, 3), (4, 4), (5, 5)]));

        // Wall the diagonal and re-run with no reset in between.
        g.set_walkable(Point::new(3, 3), false);
        let walled = pf.greedy_path(&g, from, to);
        assert!(walled.found());
        assert_eq!(
            walled.waypoints,
            points(&[(2, 2), (3, 2), (4, 3), (5, 4), (5, 5)])
        );
        assert!((walled.cost - 6.2).abs() < 1e-4);

        // Records of the first run are gone.
        assert!(!pf.visited(Point::new(3, 3)));
    }

    #[test]
    fn identical_runs_are_deterministic() {
        use rand::rngs::StdRng;
        use rand::{RngExt, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        let mut g = Grid::new(20, 20).unwrap();
        let from = Point::new(1, 1);
        let to = Point::new(20, 20);
        for p in g.bounds() {
            if p != from && p != to && rng.random_bool(0.3) {
                g.set_walkable(p, false);
            }
        }

        let mut pf = Pathfinder::new(g.bounds());
        let first = pf.greedy_path(&g, from, to);

        // Unrelated queries in between must not disturb the rerun.
        let _ = pf.astar_path(&g, to, from);
        let _ = pf.greedy_path(&g, Point::new(5, 5), Point::new(9, 2));

        let second = pf.greedy_path(&g, from, to);
        assert_eq!(first, second);

        // A fresh pathfinder agrees with the reused one.
        let third = Pathfinder::new(g.bounds()).greedy_path(&g, from, to);
        assert_eq!(first, third);
    }

    #[test]
    fn walk_stays_inside_the_search_bounds() {
        // The pathfinder covers only the top-left 5x5 region of the grid;
        // walkable cells beyond it are not representable and never entered.
        let g = Grid::new(10, 10).unwrap();
        let mut pf = Pathfinder::new(Range::new(1, 1, 6, 6));

        let inside = pf.greedy_path(&g, Point::new(1, 1), Point::new(5, 5));
        assert!(inside.found());

        let outside = pf.greedy_path(&g, Point::new(1, 1), Point::new(9, 9));
        assert_eq!(outside.outcome, SearchOutcome::NotFound);
        assert!(
            outside
                .waypoints
                .iter()
                .all(|&p| pf.bounds().contains(p))
        );
    }

    #[test]
    fn start_walkability_is_not_checked() {
        let g = grid_with_walls(5, 5, &[(1, 1)]);
        let mut pf = Pathfinder::new(g.bounds());

        let path = pf.greedy_path(&g, Point::new(1, 1), Point::new(5, 5));
        assert!(path.found());
        assert_eq!(path.waypoints, points(&[(2, 2), (3, 3), (4, 4), (5, 5)]));
    }
}
