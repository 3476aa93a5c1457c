//! Terminal demo of the greedy walk and its A* companion.
//!
//! Run: cargo run --bin greedy-walk
//! Set RUST_LOG=debug (or trace) to watch the walk decide.

use gridwalk_core::{Grid, GridError, Point};
use gridwalk_paths::{Pathfinder, SearchOutcome, step_cost};

/// Walls funneling the walk into a dead-end corridor on a 12x9 map.
const FUNNEL_WALLS: [(i32, i32); 9] = [
    (5, 3),
    (5, 4),
    (5, 5),
    (5, 6),
    (7, 3),
    (7, 4),
    (7, 5),
    (7, 6),
    (6, 3),
];

/// The classic 100x100 field with a handful of scattered walls.
const FIELD_WALLS: [(i32, i32); 6] = [
    (6, 1),
    (11, 11),
    (11, 12),
    (22, 85),
    (86, 13),
    (66, 41),
];

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), GridError> {
    funnel_demo()?;
    field_demo()
}

/// Small map where the greedy walk dead-ends while A* detours.
fn funnel_demo() -> Result<(), GridError> {
    let mut grid = Grid::new(12, 9)?;
    for &(x, y) in &FUNNEL_WALLS {
        grid.set_walkable(Point::new(x, y), false);
    }
    let from = Point::new(6, 7);
    let to = Point::new(6, 1);
    let mut pf = Pathfinder::new(grid.bounds());

    let walk = pf.greedy_path(&grid, from, to);
    println!("greedy walk {from} -> {to}: {}", describe(walk.outcome));
    println!(
        "  {} waypoints, cost {:.1}",
        walk.waypoints.len(),
        walk.cost
    );
    println!("{}", render(&grid, Some(&pf), &walk.waypoints, from, to));

    match pf.astar_path(&grid, from, to) {
        Some(path) => {
            println!(
                "a* detour: {} cells, cost {:.1}",
                path.len(),
                walked_cost(&path)
            );
            println!("{}", render(&grid, None, &path, from, to));
        }
        None => println!("a* detour: no path"),
    }
    Ok(())
}

/// The walk across a large, nearly open field.
fn field_demo() -> Result<(), GridError> {
    let mut grid = Grid::new(100, 100)?;
    for &(x, y) in &FIELD_WALLS {
        grid.set_walkable(Point::new(x, y), false);
    }
    let from = Point::new(1, 1);
    let to = Point::new(100, 100);
    let mut pf = Pathfinder::new(grid.bounds());

    let walk = pf.greedy_path(&grid, from, to);
    println!(
        "greedy walk {from} -> {to}: {}, {} waypoints, cost {:.1}",
        describe(walk.outcome),
        walk.waypoints.len(),
        walk.cost
    );

    match pf.astar_path(&grid, from, to) {
        Some(path) => println!(
            "a* companion: {} cells, cost {:.1}",
            path.len(),
            walked_cost(&path)
        ),
        None => println!("a* companion: no path"),
    }
    Ok(())
}

fn describe(outcome: SearchOutcome) -> &'static str {
    match outcome {
        SearchOutcome::Found => "found",
        SearchOutcome::NotFound => "not found",
    }
}

fn walked_cost(path: &[Point]) -> f32 {
    path.windows(2).map(|w| step_cost(w[0], w[1])).sum()
}

/// ASCII map: `#` wall, `S` start, `E` end, `*` route, `+` expanded, `.` open.
fn render(grid: &Grid, pf: Option<&Pathfinder>, route: &[Point], from: Point, to: Point) -> String {
    let mut out = String::new();
    for y in 1..=grid.height() {
        for x in 1..=grid.width() {
            let p = Point::new(x, y);
            let ch = if p == from {
                'S'
            } else if p == to {
                'E'
            } else if !grid.is_walkable(p) {
                '#'
            } else if route.contains(&p) {
                '*'
            } else if pf.is_some_and(|pf| pf.visited(p)) {
                '+'
            } else {
                '.'
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}
