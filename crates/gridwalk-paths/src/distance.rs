use gridwalk_core::Point;

/// Cost of one move between adjacent cells: 1.0 for an orthogonal step,
/// 1.4 for a diagonal one.
///
/// The diagonal constant is the literal `1.4`, not `sqrt(2)`.
#[inline]
pub fn step_cost(from: Point, to: Point) -> f32 {
    if from.x == to.x || from.y == to.y {
        1.0
    } else {
        1.4
    }
}

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Octile distance under the 1.0/1.4 cost model.
///
/// The cheapest conceivable eight-way walk between two points moves
/// diagonally along the shorter axis delta and straight for the rest, so
/// this never overestimates the walked cost and is the A* heuristic.
#[inline]
pub fn octile(a: Point, b: Point) -> f32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    let (min, max) = if dx < dy { (dx, dy) } else { (dy, dx) };
    (max - min) as f32 + 1.4 * min as f32
}
