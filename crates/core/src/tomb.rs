//! Ordered multi-floor sessions and player transfer between floors.
//! This module exists so every floor of a tomb is generated once and kept for the session.
//! It does not own per-floor simulation; each floor is an independent `World`.

use log::debug;

use crate::actor::{Actor, EntityId};
use crate::config::TuningConfig;
use crate::grid::Pos;
use crate::mapgen::{MapGenerator, derive_level_seed};
use crate::world::World;

pub struct Tomb {
    seed: u64,
    floors: Vec<World>,
    current: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Down,
    Up,
}

impl Tomb {
    /// Generates depths `1..=floors` and places a fresh player on the first floor's arrival tile.
    /// A tomb always has at least one floor.
    pub fn generate(
        seed: u64,
        floors: u32,
        width: usize,
        height: usize,
        config: TuningConfig,
    ) -> Self {
        let generator = MapGenerator::new(config.generation.clone());
        let worlds: Vec<World> = (1..=floors.max(1))
            .map(|depth| {
                let level_seed = derive_level_seed(seed, depth);
                let level = generator.generate(depth, width, height, level_seed);
                World::from_level(&level, level_seed, config.clone())
            })
            .collect();

        let mut tomb = Self { seed, floors: worlds, current: 0 };
        let arrival = tomb.floors[0].arrival_tile();
        if let Some(pos) = arrival {
            tomb.floors[0].spawn_actor(Actor::player(pos));
        }
        debug!("tomb {seed:#x} generated with {} floors", tomb.floors.len());
        tomb
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    /// One-based depth of the active floor.
    pub fn depth(&self) -> u32 {
        self.current as u32 + 1
    }

    pub fn current(&self) -> &World {
        &self.floors[self.current]
    }

    pub fn current_mut(&mut self) -> &mut World {
        &mut self.floors[self.current]
    }

    /// Floor by one-based depth.
    pub fn floor(&self, depth: u32) -> Option<&World> {
        (depth as usize).checked_sub(1).and_then(|index| self.floors.get(index))
    }

    pub fn player_id(&self) -> Option<EntityId> {
        self.current().player_id()
    }

    /// Carries the player to the next floor, arriving on its up stairs.
    /// Returns `false` on the last floor or when there is no player to move.
    pub fn descend(&mut self) -> bool {
        self.transfer(Direction::Down)
    }

    /// Carries the player to the previous floor, arriving on its down stairs.
    /// Returns `false` on the first floor or when there is no player to move.
    pub fn ascend(&mut self) -> bool {
        self.transfer(Direction::Up)
    }

    fn transfer(&mut self, direction: Direction) -> bool {
        let target = match direction {
            Direction::Down if self.current + 1 < self.floors.len() => self.current + 1,
            Direction::Up if self.current > 0 => self.current - 1,
            _ => return false,
        };
        let Some(arrival) = self.arrival_on(target, direction) else {
            return false;
        };
        let Some(player) = self.current().player_id() else {
            return false;
        };
        let Some(actor) = self.floors[self.current].remove_actor(player) else {
            return false;
        };

        self.floors[target].spawn_actor(Actor { pos: arrival, ..actor });
        debug!("player moved from depth {} to depth {}", self.current + 1, target + 1);
        self.current = target;
        true
    }

    /// The opposite stairs on the target floor, nudged to an open neighbour if something is
    /// standing on them. `None` when the floor has nowhere to stand.
    fn arrival_on(&self, target: usize, direction: Direction) -> Option<Pos> {
        let world = &self.floors[target];
        let stairs = match direction {
            Direction::Down => world.stairs_up(),
            Direction::Up => world.stairs_down(),
        };
        let landing = stairs.or_else(|| world.arrival_tile())?;
        if world.actor_at(landing).is_none() {
            return Some(landing);
        }
        landing.neighbors8().into_iter().find(|&pos| world.is_open(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::TileKind;

    fn small_tomb(floors: u32) -> Tomb {
        Tomb::generate(0xC0FFEE, floors, 48, 24, TuningConfig::default())
    }

    #[test]
    fn player_starts_on_the_first_floor_arrival_tile() {
        let tomb = small_tomb(3);
        assert_eq!(tomb.floor_count(), 3);
        assert_eq!(tomb.depth(), 1);
        let player = tomb.current().player().map(|actor| actor.pos);
        assert!(player.is_some());
        assert_eq!(player, tomb.current().arrival_tile());
    }

    #[test]
    fn descend_and_ascend_stop_at_the_ends() {
        let mut tomb = small_tomb(2);
        assert!(!tomb.ascend());
        assert!(tomb.descend());
        assert_eq!(tomb.depth(), 2);
        assert!(tomb.floor(1).is_some_and(|floor| floor.player().is_none()));
        assert!(tomb.current().player().is_some());
        assert!(!tomb.descend());
        assert!(tomb.ascend());
        assert_eq!(tomb.depth(), 1);
        assert!(tomb.floor(0).is_none() && tomb.floor(3).is_none());
    }

    #[test]
    fn floors_keep_their_changes_across_visits() {
        let mut tomb = small_tomb(2);
        let grid = tomb.current().grid();
        let dug = grid
            .positions()
            .find(|&pos| grid.tile_at(pos) == TileKind::Wall && !grid.is_boundary(pos))
            .expect("a generated floor keeps interior walls");
        assert!(tomb.current_mut().grid_mut().dig(dug));
        let hp_before = tomb.current().player().map(|actor| actor.hp);

        assert!(tomb.descend());
        assert!(tomb.ascend());
        assert_eq!(tomb.current().grid().tile_at(dug), TileKind::Floor);
        assert_eq!(tomb.current().player().map(|actor| actor.hp), hp_before);
    }

    #[test]
    fn identical_seeds_build_identical_tombs() {
        let left = small_tomb(3);
        let right = small_tomb(3);
        for depth in 1..=3 {
            let left_hash = left.floor(depth).map(World::snapshot_hash);
            let right_hash = right.floor(depth).map(World::snapshot_hash);
            assert!(left_hash.is_some());
            assert_eq!(left_hash, right_hash, "depth {depth}");
        }
    }
}
