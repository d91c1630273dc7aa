//! Stable snapshot hashing for deterministic verification.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::World;
use crate::actor::ActorKind;
use crate::projectile::ProjectileKind;

fn actor_kind_code(kind: ActorKind) -> u8 {
    match kind {
        ActorKind::Player => 0,
        ActorKind::Enemy(enemy) => 1 + enemy as u8,
    }
}

impl World {
    /// Hashes terrain, actors, projectiles, and the turn counter. The event log is left out so
    /// draining it never changes the hash.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.turn);
        hasher.write_u32(self.depth);
        hasher.write_u64(self.grid.width() as u64);
        hasher.write_u64(self.grid.height() as u64);
        for tile in self.grid.tiles() {
            hasher.write_u8(*tile as u8);
        }

        hasher.write_u64(self.actors.len() as u64);
        for actor in self.actors.values() {
            hasher.write_u8(actor_kind_code(actor.kind));
            hasher.write_i32(actor.pos.x);
            hasher.write_i32(actor.pos.y);
            hasher.write_i32(actor.hp);
        }

        hasher.write_u64(self.projectiles.len() as u64);
        for projectile in self.projectiles.values() {
            hasher.write_i32(projectile.pos.x);
            hasher.write_i32(projectile.pos.y);
            hasher.write_i32(projectile.dir.0);
            hasher.write_i32(projectile.dir.1);
            hasher.write_u32(projectile.remaining_range);
            match projectile.kind {
                ProjectileKind::Bolt => hasher.write_u8(0),
                ProjectileKind::Grenade { blast_radius } => {
                    hasher.write_u8(1);
                    hasher.write_u32(blast_radius);
                }
            }
        }

        hasher.finish()
    }
}
