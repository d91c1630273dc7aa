//! Deterministic step candidates toward, away from, and around a target.

use crate::grid::Pos;
use crate::world::World;

/// Direct candidates toward `goal`: the diagonal first, then the horizontal axis, then the
/// vertical axis. Aligned goals yield a single candidate.
pub(super) fn direct_candidates(from: Pos, goal: Pos) -> Vec<Pos> {
    let (dx, dy) = from.direction_to(goal);
    let mut candidates = Vec::with_capacity(3);
    if dx != 0 && dy != 0 {
        candidates.push(from.offset(dx, dy));
    }
    if dx != 0 {
        candidates.push(from.offset(dx, 0));
    }
    if dy != 0 {
        candidates.push(from.offset(0, dy));
    }
    candidates
}

/// The first open direct candidate that strictly closes the distance. A single-axis step off
/// the long axis leaves the Chebyshev distance unchanged, so it never qualifies.
pub(super) fn step_toward(world: &World, from: Pos, goal: Pos) -> Option<Pos> {
    let distance = from.chebyshev(goal);
    direct_candidates(from, goal)
        .into_iter()
        .find(|&pos| pos.chebyshev(goal) < distance && world.is_open(pos))
}

/// Like `step_toward`, but when no direct candidate works, takes the first neighbour in
/// clockwise order that still closes the distance.
pub(super) fn step_toward_persistent(world: &World, from: Pos, goal: Pos) -> Option<Pos> {
    step_toward(world, from, goal).or_else(|| {
        let distance = from.chebyshev(goal);
        from.neighbors8()
            .into_iter()
            .find(|&pos| pos.chebyshev(goal) < distance && world.is_open(pos))
    })
}

/// Mirrors the direct candidates away from `threat`, keeping only steps that open the gap.
pub(super) fn step_away(world: &World, from: Pos, threat: Pos) -> Option<Pos> {
    let distance = from.chebyshev(threat);
    let mirrored = Pos { y: 2 * from.y - threat.y, x: 2 * from.x - threat.x };
    direct_candidates(from, mirrored)
        .into_iter()
        .find(|&pos| pos.chebyshev(threat) > distance && world.is_open(pos))
}

/// Whether `target` lies on one of the eight lines through `from`, so a projectile launched
/// along `direction_to` passes over it.
pub(super) fn is_aligned(from: Pos, target: Pos) -> bool {
    let (dx, dy) = (from.x.abs_diff(target.x), from.y.abs_diff(target.y));
    dx == 0 || dy == 0 || dx == dy
}

/// How many single-axis steps a position is away from the nearest firing line to `target`.
fn misalignment(from: Pos, target: Pos) -> u32 {
    let (dx, dy) = (from.x.abs_diff(target.x), from.y.abs_diff(target.y));
    let (short, long) = (dx.min(dy), dx.max(dy));
    short.min(long - short)
}

/// An open neighbour at the same distance from `target` that is closer to a firing line,
/// preferring the best-aligned one and then clockwise order.
pub(super) fn step_into_line(world: &World, from: Pos, target: Pos) -> Option<Pos> {
    let distance = from.chebyshev(target);
    let current = misalignment(from, target);
    from.neighbors8()
        .into_iter()
        .filter(|&pos| pos.chebyshev(target) == distance && world.is_open(pos))
        .map(|pos| (pos, misalignment(pos, target)))
        .filter(|&(_, offset)| offset < current)
        .min_by_key(|&(_, offset)| offset)
        .map(|(pos, _)| pos)
}

/// The point `offset` tiles beside `target`, perpendicular to the line from `from`, on whichever
/// side is nearer to `from`. Ties go to the left of the line of approach.
pub(super) fn flank_point(from: Pos, target: Pos, offset: i32) -> Pos {
    let (dx, dy) = from.direction_to(target);
    let left = target.offset(dy * offset, -dx * offset);
    let right = target.offset(-dy * offset, dx * offset);
    if from.chebyshev(right) < from.chebyshev(left) { right } else { left }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_candidates_prefer_the_diagonal() {
        let from = Pos { y: 5, x: 5 };
        assert_eq!(
            direct_candidates(from, Pos { y: 8, x: 9 }),
            vec![Pos { y: 6, x: 6 }, Pos { y: 5, x: 6 }, Pos { y: 6, x: 5 }]
        );
        assert_eq!(direct_candidates(from, Pos { y: 1, x: 5 }), vec![Pos { y: 4, x: 5 }]);
        assert!(direct_candidates(from, from).is_empty());
    }

    #[test]
    fn alignment_covers_the_eight_lines_only() {
        let from = Pos { y: 4, x: 4 };
        assert!(is_aligned(from, Pos { y: 4, x: 12 }));
        assert!(is_aligned(from, Pos { y: 0, x: 4 }));
        assert!(is_aligned(from, Pos { y: 10, x: 10 }));
        assert!(!is_aligned(from, Pos { y: 9, x: 10 }));
        assert_eq!(misalignment(from, Pos { y: 9, x: 10 }), 1);
        assert_eq!(misalignment(from, Pos { y: 7, x: 10 }), 3);
    }

    #[test]
    fn flank_point_is_perpendicular_to_the_approach() {
        let target = Pos { y: 5, x: 10 };
        assert_eq!(flank_point(Pos { y: 5, x: 2 }, target, 2), Pos { y: 3, x: 10 }, "left of east");
        assert_eq!(flank_point(Pos { y: 3, x: 2 }, target, 2), Pos { y: 7, x: 8 }, "nearer side");
    }
}
