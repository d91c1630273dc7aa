//! Straight-line projectile motion, collision, and grenade blast resolution.
//! This module exists to advance every live projectile exactly one tile per turn.
//! It does not own who fires, when, or at what; tactics decide that.

use log::trace;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::actor::EntityId;
use crate::events::WorldEvent;
use crate::grid::Pos;
use crate::world::World;

new_key_type! {
    pub struct ProjectileId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    Bolt,
    /// Explodes on any termination instead of striking a single actor.
    Grenade { blast_radius: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Projectile {
    pub id: ProjectileId,
    pub pos: Pos,
    /// `(dx, dy)`, each component in `-1..=1`.
    pub dir: (i32, i32),
    pub damage: i32,
    pub remaining_range: u32,
    /// Attribution only; the shooter may die while its shot is in flight.
    pub owner: Option<EntityId>,
    pub alive: bool,
    pub kind: ProjectileKind,
}

/// Launches a projectile from `origin` along the sign of `target - origin`.
/// Returns `None` when either point is off the grid or they coincide.
pub fn spawn(
    world: &mut World,
    origin: Pos,
    target: Pos,
    damage: i32,
    range: u32,
    kind: ProjectileKind,
    owner: Option<EntityId>,
) -> Option<ProjectileId> {
    if origin == target || !world.grid().in_bounds(origin) || !world.grid().in_bounds(target) {
        return None;
    }
    let projectile = Projectile {
        id: ProjectileId::default(),
        pos: origin,
        dir: origin.direction_to(target),
        damage,
        remaining_range: range,
        owner,
        alive: true,
        kind,
    };
    let id = world.projectiles.insert(projectile);
    world.projectiles[id].id = id;
    world.events.push(WorldEvent::ProjectileCreated { projectile: id, pos: origin });
    trace!("projectile {id:?} launched from {origin:?} toward {target:?}");
    Some(id)
}

/// Steps every live projectile once, in creation order, then drops the spent ones.
pub fn advance_all(world: &mut World) {
    let ids: Vec<ProjectileId> = world.projectiles.keys().collect();
    for id in ids {
        step(world, id);
    }
    world.projectiles.retain(|_, projectile| projectile.alive);
}

fn step(world: &mut World, id: ProjectileId) {
    let Some(projectile) = world.projectiles.get(id).filter(|projectile| projectile.alive) else {
        return;
    };
    let current = projectile.pos;
    let kind = projectile.kind;
    let damage = projectile.damage;

    if projectile.remaining_range == 0 {
        terminate(world, id, current, kind, damage);
        return;
    }

    let next = current.offset(projectile.dir.0, projectile.dir.1);
    if !world.grid().in_bounds(next) || world.grid().stops_projectiles(next) {
        trace!("projectile {id:?} hit terrain at {next:?}");
        terminate(world, id, current, kind, damage);
        return;
    }

    if let Some(victim) = world.actor_at(next) {
        trace!("projectile {id:?} struck {victim:?} at {next:?}");
        if let ProjectileKind::Bolt = kind {
            world.apply_damage(victim, damage);
        }
        terminate(world, id, next, kind, damage);
        return;
    }

    let Some(projectile) = world.projectiles.get_mut(id) else {
        return;
    };
    projectile.pos = next;
    projectile.remaining_range -= 1;
    if projectile.remaining_range == 0 {
        terminate(world, id, next, kind, damage);
    }
}

fn terminate(world: &mut World, id: ProjectileId, pos: Pos, kind: ProjectileKind, damage: i32) {
    if let Some(projectile) = world.projectiles.get_mut(id) {
        projectile.alive = false;
        projectile.pos = pos;
    }
    world.events.push(WorldEvent::ProjectileDestroyed { projectile: id, pos });
    if let ProjectileKind::Grenade { blast_radius } = kind {
        explode(world, pos, blast_radius, damage);
    }
}

/// Damages every living actor within Chebyshev `radius` of `center`, boundary included,
/// in stable actor order.
pub fn explode(world: &mut World, center: Pos, radius: u32, damage: i32) {
    world.events.push(WorldEvent::Explosion { center, radius });
    let caught: Vec<EntityId> = world
        .actors()
        .filter(|actor| actor.is_alive() && center.chebyshev(actor.pos) <= radius)
        .map(|actor| actor.id)
        .collect();
    trace!("explosion at {center:?} radius {radius} caught {} actors", caught.len());
    for id in caught {
        world.apply_damage(id, damage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{Actor, EnemyKind};
    use crate::grid::{Grid, TileKind};
    use crate::test_support::{open_world, spawn_enemy};

    fn destroyed_at(world: &World, id: ProjectileId) -> Option<Pos> {
        world.events().iter().find_map(|event| match *event {
            WorldEvent::ProjectileDestroyed { projectile, pos } if projectile == id => Some(pos),
            _ => None,
        })
    }

    #[test]
    fn spawn_rejects_degenerate_shots() {
        let mut world = open_world(10, 10);
        let inside = Pos { y: 5, x: 5 };
        let outside = Pos { y: 5, x: 10 };
        assert_eq!(spawn(&mut world, inside, inside, 1, 5, ProjectileKind::Bolt, None), None);
        assert_eq!(spawn(&mut world, inside, outside, 1, 5, ProjectileKind::Bolt, None), None);
        assert_eq!(spawn(&mut world, outside, inside, 1, 5, ProjectileKind::Bolt, None), None);
        assert_eq!(world.projectiles().count(), 0);
        assert!(world.events().is_empty());
    }

    #[test]
    fn direction_is_the_sign_of_the_offset() {
        let mut world = open_world(20, 20);
        let id = spawn(
            &mut world,
            Pos { y: 10, x: 10 },
            Pos { y: 3, x: 17 },
            1,
            5,
            ProjectileKind::Bolt,
            None,
        );
        let projectile = id.and_then(|id| world.projectile(id)).cloned();
        assert_eq!(projectile.map(|projectile| projectile.dir), Some((1, -1)));
    }

    #[test]
    fn bolt_stops_in_front_of_a_wall() {
        let mut world = World::new(Grid::from_ascii("#######\n#.....#\n#######"), 1);
        let id = spawn(
            &mut world,
            Pos { y: 1, x: 1 },
            Pos { y: 1, x: 5 },
            3,
            10,
            ProjectileKind::Bolt,
            None,
        )
        .expect("valid shot");
        for _ in 0..6 {
            advance_all(&mut world);
        }
        assert_eq!(destroyed_at(&world, id), Some(Pos { y: 1, x: 5 }));
        assert_eq!(world.projectiles().count(), 0);
    }

    #[test]
    fn shots_fly_over_rock_and_water_but_not_trees() {
        for (tile, passes) in [(TileKind::Rock, true), (TileKind::Water, true), (TileKind::Tree, false)] {
            let mut world = open_world(12, 5);
            world.grid_mut().set_tile(Pos { y: 2, x: 4 }, tile);
            let id = spawn(
                &mut world,
                Pos { y: 2, x: 2 },
                Pos { y: 2, x: 9 },
                1,
                4,
                ProjectileKind::Bolt,
                None,
            )
            .expect("valid shot");
            for _ in 0..4 {
                advance_all(&mut world);
            }
            let expected = if passes { Pos { y: 2, x: 6 } } else { Pos { y: 2, x: 3 } };
            assert_eq!(destroyed_at(&world, id), Some(expected), "{tile:?}");
        }
    }

    #[test]
    fn bolt_damages_the_first_actor_in_its_path() {
        let mut world = open_world(12, 5);
        let near = spawn_enemy(&mut world, EnemyKind::Skeleton, Pos { y: 2, x: 5 });
        let far = spawn_enemy(&mut world, EnemyKind::Skeleton, Pos { y: 2, x: 7 });
        let id = spawn(
            &mut world,
            Pos { y: 2, x: 2 },
            Pos { y: 2, x: 9 },
            4,
            8,
            ProjectileKind::Bolt,
            None,
        )
        .expect("valid shot");
        for _ in 0..3 {
            advance_all(&mut world);
        }
        assert_eq!(world.actor(near).map(|actor| actor.hp), Some(6));
        assert_eq!(world.actor(far).map(|actor| actor.hp), Some(10));
        assert_eq!(destroyed_at(&world, id), Some(Pos { y: 2, x: 5 }));
    }

    #[test]
    fn grenade_explodes_on_contact_without_a_separate_direct_hit() {
        let mut world = open_world(12, 5);
        let victim = spawn_enemy(&mut world, EnemyKind::Skeleton, Pos { y: 2, x: 4 });
        spawn(
            &mut world,
            Pos { y: 2, x: 2 },
            Pos { y: 2, x: 8 },
            3,
            6,
            ProjectileKind::Grenade { blast_radius: 1 },
            None,
        );
        advance_all(&mut world);
        advance_all(&mut world);
        assert_eq!(world.actor(victim).map(|actor| actor.hp), Some(7));
        assert!(world.events().contains(&WorldEvent::Explosion { center: Pos { y: 2, x: 4 }, radius: 1 }));
    }

    #[test]
    fn grenade_explodes_where_its_range_runs_out() {
        let mut world = open_world(12, 5);
        spawn(
            &mut world,
            Pos { y: 2, x: 2 },
            Pos { y: 2, x: 9 },
            3,
            2,
            ProjectileKind::Grenade { blast_radius: 2 },
            None,
        );
        advance_all(&mut world);
        advance_all(&mut world);
        assert!(world.events().contains(&WorldEvent::Explosion { center: Pos { y: 2, x: 4 }, radius: 2 }));
    }

    #[test]
    fn grenade_hitting_a_wall_or_tree_explodes_on_the_last_open_tile() {
        for obstacle in [TileKind::Wall, TileKind::Tree] {
            let mut world = open_world(12, 5);
            world.grid_mut().set_tile(Pos { y: 2, x: 6 }, obstacle);
            let beside = spawn_enemy(&mut world, EnemyKind::Skeleton, Pos { y: 1, x: 6 });
            let behind = spawn_enemy(&mut world, EnemyKind::Skeleton, Pos { y: 2, x: 7 });
            let id = spawn(
                &mut world,
                Pos { y: 2, x: 2 },
                Pos { y: 2, x: 9 },
                3,
                8,
                ProjectileKind::Grenade { blast_radius: 1 },
                None,
            )
            .expect("valid shot");
            for _ in 0..4 {
                advance_all(&mut world);
            }

            let center = Pos { y: 2, x: 5 };
            assert_eq!(destroyed_at(&world, id), Some(center), "{obstacle:?}");
            assert!(
                world.events().contains(&WorldEvent::Explosion { center, radius: 1 }),
                "{obstacle:?}"
            );
            assert_eq!(world.actor(beside).map(|actor| actor.hp), Some(7), "{obstacle:?}");
            assert_eq!(world.actor(behind).map(|actor| actor.hp), Some(10), "{obstacle:?}");
            assert_eq!(world.projectiles().count(), 0);
        }
    }

    #[test]
    fn explosions_kill_and_remove_actors() {
        let mut world = open_world(10, 10);
        let player = world.spawn_actor(Actor::player(Pos { y: 5, x: 5 }));
        let rat = spawn_enemy(&mut world, EnemyKind::Rat, Pos { y: 6, x: 6 });
        explode(&mut world, Pos { y: 5, x: 6 }, 1, 50);
        assert!(world.actor(player).is_none());
        assert!(world.actor(rat).is_none());
        let deaths = world
            .events()
            .iter()
            .filter(|event| matches!(event, WorldEvent::ActorDied { .. }))
            .count();
        assert_eq!(deaths, 2);
    }
}
