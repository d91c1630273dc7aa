//! Shared test fixtures for the unit test suites.
//! This module exists to avoid repeating grid and actor setup across many tests.
//! It does not own production gameplay logic.

use crate::actor::{Actor, EnemyKind, EntityId};
use crate::grid::{Grid, Pos, TileKind};
use crate::world::World;

pub(crate) fn walled_room(width: usize, height: usize) -> Grid {
    Grid::walled_room(width, height)
}

/// A one-tile corridor along row 5 with a wall plugged in at x = 6; the viewer stands at x = 3.
pub(crate) fn corridor_with_blocker() -> (Grid, Pos) {
    let mut grid = Grid::filled(11, 11, TileKind::Wall);
    for x in 1..10 {
        grid.set_tile(Pos { y: 5, x }, TileKind::Floor);
    }
    grid.set_tile(Pos { y: 5, x: 6 }, TileKind::Wall);
    (grid, Pos { y: 5, x: 3 })
}

pub(crate) fn open_world(width: usize, height: usize) -> World {
    World::new(walled_room(width, height), 7)
}

pub(crate) fn spawn_enemy(world: &mut World, kind: EnemyKind, pos: Pos) -> EntityId {
    world.spawn_actor(Actor::enemy(kind, pos))
}

/// A player who never dodges, so combat assertions do not depend on the RNG.
pub(crate) fn spawn_steady_player(world: &mut World, pos: Pos) -> EntityId {
    world.spawn_actor(Actor { evasion: 0, ..Actor::player(pos) })
}
