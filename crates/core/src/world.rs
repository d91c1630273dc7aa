//! One floor's live simulation state: terrain, actors, projectiles, RNG, and the event log.
//! This module exists to give tactics and projectiles a single explicit owner to mutate.
//! It does not own decision policy or projectile physics; those live in their own modules.

mod hash;

use std::collections::BTreeSet;
use std::mem;

use log::{debug, trace};
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use slotmap::SlotMap;

use crate::actor::{Actor, ActorKind, EntityId};
use crate::config::TuningConfig;
use crate::events::WorldEvent;
use crate::grid::{Grid, Pos};
use crate::mapgen::{Level, Room};
use crate::projectile::{self, Projectile, ProjectileId};
use crate::tactics;
use crate::visibility::compute_visibility;

/// A single floor in play.
///
/// Every operation mutates in place and assumes exclusive access. `World` may be moved
/// between threads, but none of its methods are safe to call concurrently without
/// external synchronization.
pub struct World {
    depth: u32,
    grid: Grid,
    rooms: Vec<Room>,
    stairs_up: Option<Pos>,
    stairs_down: Option<Pos>,
    pub(crate) actors: SlotMap<EntityId, Actor>,
    pub(crate) projectiles: SlotMap<ProjectileId, Projectile>,
    player: Option<EntityId>,
    pub(crate) events: Vec<WorldEvent>,
    pub(crate) rng: ChaCha8Rng,
    turn: u64,
    visible: BTreeSet<Pos>,
    config: TuningConfig,
}

impl World {
    pub fn new(grid: Grid, seed: u64) -> Self {
        Self::with_config(grid, seed, TuningConfig::default())
    }

    pub fn with_config(grid: Grid, seed: u64, config: TuningConfig) -> Self {
        Self {
            depth: 0,
            grid,
            rooms: Vec::new(),
            stairs_up: None,
            stairs_down: None,
            actors: SlotMap::with_key(),
            projectiles: SlotMap::with_key(),
            player: None,
            events: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            turn: 0,
            visible: BTreeSet::new(),
            config,
        }
    }

    /// Builds a floor from a generated level and populates its enemy spawns.
    /// The player is not placed; callers spawn or transfer one onto the arrival tile.
    pub fn from_level(level: &Level, seed: u64, config: TuningConfig) -> Self {
        let mut world = Self::with_config(level.grid.clone(), seed, config);
        world.depth = level.depth;
        world.rooms = level.rooms.clone();
        world.stairs_up = level.stairs_up;
        world.stairs_down = level.stairs_down;
        for spawn in &level.enemy_spawns {
            world.spawn_actor(Actor::enemy(spawn.kind, spawn.pos));
        }
        debug!(
            "world for depth {} ready with {} enemies",
            level.depth,
            world.actors.len()
        );
        world
    }

    /// Inserts an actor and returns its handle. A player actor becomes this floor's player.
    pub fn spawn_actor(&mut self, actor: Actor) -> EntityId {
        let is_player = actor.kind == ActorKind::Player;
        let id = self.actors.insert(actor);
        self.actors[id].id = id;
        if is_player {
            self.player = Some(id);
        }
        id
    }

    /// Takes an actor out of the floor without a death event, e.g. to carry it to another floor.
    pub fn remove_actor(&mut self, id: EntityId) -> Option<Actor> {
        if self.player == Some(id) {
            self.player = None;
        }
        self.actors.remove(id)
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn stairs_up(&self) -> Option<Pos> {
        self.stairs_up
    }

    pub fn stairs_down(&self) -> Option<Pos> {
        self.stairs_down
    }

    /// Stairs up, falling back to the first room center on floors generated without stairs.
    pub fn arrival_tile(&self) -> Option<Pos> {
        self.stairs_up.or_else(|| self.rooms.first().map(|room| room.center()))
    }

    pub fn config(&self) -> &TuningConfig {
        &self.config
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn player_id(&self) -> Option<EntityId> {
        self.player
    }

    pub fn player(&self) -> Option<&Actor> {
        self.player.and_then(|id| self.actors.get(id))
    }

    pub fn actor(&self, id: EntityId) -> Option<&Actor> {
        self.actors.get(id)
    }

    /// Actors in stable slot order.
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values()
    }

    pub fn actor_at(&self, pos: Pos) -> Option<EntityId> {
        self.actors.values().find(|actor| actor.is_alive() && actor.pos == pos).map(|actor| actor.id)
    }

    pub fn projectile(&self, id: ProjectileId) -> Option<&Projectile> {
        self.projectiles.get(id)
    }

    pub fn projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.values()
    }

    /// In bounds, passable, and not occupied by a living actor.
    pub fn is_open(&self, pos: Pos) -> bool {
        self.grid.is_passable(pos) && self.actor_at(pos).is_none()
    }

    /// Moves an actor one tile in any of the eight directions. Returns `false` and leaves the
    /// actor in place when the destination is not adjacent or not open.
    pub fn try_move(&mut self, id: EntityId, to: Pos) -> bool {
        let Some(from) = self.actors.get(id).map(|actor| actor.pos) else {
            return false;
        };
        if from.chebyshev(to) != 1 || !self.is_open(to) {
            trace!("{id:?} blocked moving {from:?} -> {to:?}");
            return false;
        }
        self.actors[id].pos = to;
        self.events.push(WorldEvent::ActorMoved { actor: id, from, to });
        true
    }

    /// Places an actor without adjacency or occupancy checks, as when arriving by stairs.
    pub fn place_actor(&mut self, id: EntityId, pos: Pos) -> bool {
        match self.actors.get_mut(id) {
            Some(actor) => {
                actor.pos = pos;
                true
            }
            None => false,
        }
    }

    /// Subtracts raw damage and removes the actor when its hp reaches zero.
    /// Returns `true` if the hit was lethal.
    pub fn apply_damage(&mut self, id: EntityId, amount: i32) -> bool {
        let Some(actor) = self.actors.get_mut(id) else {
            return false;
        };
        actor.hp -= amount;
        let pos = actor.pos;
        let died = !actor.is_alive();
        self.events.push(WorldEvent::ActorDamaged { actor: id, amount, pos });
        if died {
            self.remove_actor(id);
            self.events.push(WorldEvent::ActorDied { actor: id, pos });
            debug!("{id:?} died at {pos:?}");
        }
        died
    }

    /// Recomputes the player's field of view. A floor without a player sees nothing.
    pub fn refresh_visibility(&mut self) {
        self.visible = match self.player() {
            Some(player) => compute_visibility(&self.grid, player.pos, self.config.sight.radius),
            None => BTreeSet::new(),
        };
    }

    pub fn visible(&self) -> &BTreeSet<Pos> {
        &self.visible
    }

    /// Every enemy acts once, in a snapshot of the current actor order. Enemies killed earlier
    /// in the same pass are skipped.
    pub fn run_enemies(&mut self) {
        let order: Vec<EntityId> = self
            .actors
            .iter()
            .filter(|(_, actor)| actor.is_enemy())
            .map(|(id, _)| id)
            .collect();
        for id in order {
            if self.actors.get(id).is_some_and(Actor::is_alive) {
                tactics::act(self, id);
            }
        }
    }

    /// One full turn: visibility, then enemies, then one projectile step.
    pub fn run_turn(&mut self) {
        self.refresh_visibility();
        self.run_enemies();
        projectile::advance_all(self);
        self.turn += 1;
    }

    pub fn events(&self) -> &[WorldEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        mem::take(&mut self.events)
    }
}
