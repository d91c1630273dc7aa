//! Plain-data notifications emitted by the world for external collaborators to drain.

use serde::Serialize;

use crate::actor::EntityId;
use crate::grid::Pos;
use crate::projectile::ProjectileId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum WorldEvent {
    ActorMoved { actor: EntityId, from: Pos, to: Pos },
    ActorDamaged { actor: EntityId, amount: i32, pos: Pos },
    AttackEvaded { attacker: EntityId, defender: EntityId },
    ActorDied { actor: EntityId, pos: Pos },
    Explosion { center: Pos, radius: u32 },
    ProjectileCreated { projectile: ProjectileId, pos: Pos },
    ProjectileDestroyed { projectile: ProjectileId, pos: Pos },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_as_tagged_variants() {
        let event = WorldEvent::Explosion { center: Pos { y: 2, x: 3 }, radius: 1 };
        let json = serde_json::to_value(event).expect("event should serialize");
        assert_eq!(json["Explosion"]["radius"], 1);
        assert_eq!(json["Explosion"]["center"]["x"], 3);
    }
}
