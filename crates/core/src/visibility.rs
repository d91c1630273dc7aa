//! Field-of-view and line-of-sight calculations over a tile grid.
//! This module exists to keep sight rules deterministic and isolated from actors.
//! It does not own movement planning, targeting, or projectile collision.

use std::collections::BTreeSet;

use crate::grid::{Grid, Pos};

/// Every in-bounds tile within Chebyshev `radius` of `origin` whose line from the origin
/// is not interrupted by an opaque tile. The origin is always visible, and a wall that ends
/// a line is itself visible.
pub fn compute_visibility(grid: &Grid, origin: Pos, radius: u32) -> BTreeSet<Pos> {
    let mut visible = BTreeSet::from([origin]);
    let reach = i32::try_from(radius).unwrap_or(i32::MAX);

    let min_y = origin.y.saturating_sub(reach).max(0);
    let max_y = origin.y.saturating_add(reach).min(grid.height() as i32 - 1);
    let min_x = origin.x.saturating_sub(reach).max(0);
    let max_x = origin.x.saturating_add(reach).min(grid.width() as i32 - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let target = Pos { y, x };
            if target != origin && has_line_of_sight(grid, origin, target) {
                visible.insert(target);
            }
        }
    }
    visible
}

/// Walks the integer line from `origin` to `target`, stepping diagonally on exact ties and
/// otherwise along the axis with the smaller accumulated error. Only tiles strictly between
/// the endpoints can block; neither endpoint's own opacity matters.
pub fn has_line_of_sight(grid: &Grid, origin: Pos, target: Pos) -> bool {
    let dx = target.x - origin.x;
    let dy = target.y - origin.y;
    let sx = dx.signum();
    let sy = dy.signum();
    let total_dist_x = dx.abs();
    let total_dist_y = dy.abs();

    let mut x = origin.x;
    let mut y = origin.y;
    let mut current_step_x = 0;
    let mut current_step_y = 0;

    while current_step_x < total_dist_x || current_step_y < total_dist_y {
        let lhs = (1 + 2 * current_step_x) * total_dist_y;
        let rhs = (1 + 2 * current_step_y) * total_dist_x;

        if lhs == rhs {
            x += sx;
            y += sy;
            current_step_x += 1;
            current_step_y += 1;
        } else if lhs < rhs {
            x += sx;
            current_step_x += 1;
        } else {
            y += sy;
            current_step_y += 1;
        }

        if x == target.x && y == target.y {
            break;
        }
        if grid.is_opaque(Pos { y, x }) {
            return false;
        }
    }
    true
}
