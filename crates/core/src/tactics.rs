//! Per-turn enemy decisions driven by a closed behavior enum.
//! This module exists to turn a world snapshot into one deterministic action per enemy.
//! It does not own movement legality or projectile flight; the world and projectiles do.

mod movement;

use log::trace;
use rand_chacha::rand_core::Rng;
use serde::Serialize;

use crate::actor::{Actor, Behavior, EntityId};
use crate::events::WorldEvent;
use crate::grid::Pos;
use crate::projectile;
use crate::visibility::has_line_of_sight;
use crate::world::World;

use movement::{
    flank_point, is_aligned, step_away, step_into_line, step_toward, step_toward_persistent,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Action {
    /// No hostile within alert range.
    Idle,
    /// Engaged but every useful step is blocked.
    Hold,
    Move { to: Pos },
    Melee { target: EntityId },
    Fire { target: EntityId, at: Pos },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeleeOutcome {
    Evaded,
    Hit { damage: i32, killed: bool },
}

/// What an enemy sees of its chosen target this turn.
struct Engagement<'a> {
    world: &'a World,
    actor: &'a Actor,
    target: &'a Actor,
    distance: u32,
}

impl Engagement<'_> {
    fn melee(&self) -> Action {
        Action::Melee { target: self.target.id }
    }

    fn toward(&self, goal: Pos) -> Option<Action> {
        step_toward(self.world, self.actor.pos, goal).map(|to| Action::Move { to })
    }

    /// A shot is possible when the actor carries a ranged attack, the target is within its range
    /// on one of the eight firing lines, and nothing opaque stands between them.
    fn fire(&self) -> Option<Action> {
        let ranged = self.actor.ranged?;
        (self.distance <= ranged.shot_range
            && is_aligned(self.actor.pos, self.target.pos)
            && has_line_of_sight(self.world.grid(), self.actor.pos, self.target.pos))
        .then_some(Action::Fire { target: self.target.id, at: self.target.pos })
    }

    /// Fire if possible, strike if adjacent, otherwise stand still.
    fn hold_ground(&self) -> Action {
        self.fire().unwrap_or(if self.distance <= 1 { self.melee() } else { Action::Hold })
    }
}

/// The nearest living hostile by Chebyshev distance; ties resolve by row-major position and
/// then by actor order.
fn select_target<'a>(world: &'a World, actor: &Actor) -> Option<(&'a Actor, u32)> {
    world
        .actors()
        .filter(|other| other.is_alive() && actor.faction.is_hostile_to(other.faction))
        .map(|other| (other, actor.pos.chebyshev(other.pos)))
        .min_by_key(|&(other, distance)| (distance, other.pos))
}

/// Chooses an action without changing the world.
pub fn decide(world: &World, id: EntityId) -> Action {
    let Some(actor) = world.actor(id).filter(|actor| actor.is_alive()) else {
        return Action::Idle;
    };
    let Some((target, distance)) = select_target(world, actor) else {
        return Action::Idle;
    };
    if distance > actor.alert_range {
        return Action::Idle;
    }

    let engagement = Engagement { world, actor, target, distance };
    match actor.behavior {
        Behavior::Standard => decide_standard(&engagement),
        Behavior::Aggressive => decide_aggressive(&engagement),
        Behavior::Ranged { preferred_range } => decide_ranged(&engagement, preferred_range),
        Behavior::Flanker => decide_flanker(&engagement),
    }
}

fn decide_standard(engagement: &Engagement<'_>) -> Action {
    if engagement.distance <= 1 {
        return engagement.melee();
    }
    engagement.toward(engagement.target.pos).unwrap_or(Action::Hold)
}

fn decide_aggressive(engagement: &Engagement<'_>) -> Action {
    if engagement.distance <= 1 {
        return engagement.melee();
    }
    step_toward_persistent(engagement.world, engagement.actor.pos, engagement.target.pos)
        .map_or(Action::Hold, |to| Action::Move { to })
}

fn decide_ranged(engagement: &Engagement<'_>, preferred_range: u32) -> Action {
    let distance = engagement.distance;
    if distance == preferred_range {
        if let Some(fire) = engagement.fire() {
            return fire;
        }
        // Off every firing line: slide sideways at the same range until a shot lines up.
        let (from, target) = (engagement.actor.pos, engagement.target.pos);
        if let Some(to) = step_into_line(engagement.world, from, target) {
            return Action::Move { to };
        }
    }
    let step = if distance < preferred_range {
        step_away(engagement.world, engagement.actor.pos, engagement.target.pos)
    } else {
        step_toward(engagement.world, engagement.actor.pos, engagement.target.pos)
    };
    step.map_or_else(|| engagement.hold_ground(), |to| Action::Move { to })
}

fn decide_flanker(engagement: &Engagement<'_>) -> Action {
    let tactics = &engagement.world.config().tactics;
    if engagement.distance <= tactics.flank_engage_distance {
        return decide_standard(engagement);
    }
    let flank = flank_point(engagement.actor.pos, engagement.target.pos, tactics.flank_offset);
    if flank != engagement.actor.pos
        && let Some(action) = engagement.toward(flank)
    {
        return action;
    }
    engagement.toward(engagement.target.pos).unwrap_or(Action::Hold)
}

/// Decides and then carries out the action. A move that turns out to be illegal degrades to
/// `Hold` and leaves the actor where it was.
pub fn act(world: &mut World, id: EntityId) -> Action {
    let action = decide(world, id);
    trace!("{id:?} decided {action:?}");
    match action {
        Action::Idle | Action::Hold => action,
        Action::Move { to } => {
            if world.try_move(id, to) {
                action
            } else {
                Action::Hold
            }
        }
        Action::Melee { target } => {
            resolve_melee(world, id, target);
            action
        }
        Action::Fire { at, .. } => {
            fire(world, id, at);
            action
        }
    }
}

fn fire(world: &mut World, shooter: EntityId, at: Pos) {
    let Some(actor) = world.actor(shooter) else {
        return;
    };
    let Some(ranged) = actor.ranged else {
        return;
    };
    let (origin, damage) = (actor.pos, actor.attack);
    projectile::spawn(world, origin, at, damage, ranged.shot_range, ranged.projectile, Some(shooter));
}

/// Rolls the defender's evasion against the world RNG, then deals `max(1, attack - defense)`.
/// Returns `None` when either side is missing.
pub fn resolve_melee(
    world: &mut World,
    attacker: EntityId,
    defender: EntityId,
) -> Option<MeleeOutcome> {
    let attack = world.actor(attacker)?.attack;
    let (defense, evasion) = {
        let target = world.actor(defender)?;
        (target.defense, target.evasion)
    };

    if world.rng.next_u64() % 100 < u64::from(evasion) {
        world.events.push(WorldEvent::AttackEvaded { attacker, defender });
        return Some(MeleeOutcome::Evaded);
    }

    let damage = (attack - defense).max(1);
    let killed = world.apply_damage(defender, damage);
    Some(MeleeOutcome::Hit { damage, killed })
}
