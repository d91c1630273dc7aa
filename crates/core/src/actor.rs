//! Actor shape shared by the player and enemies, plus the enemy kind table.
//! This module exists to keep enemy stats and behavior tags in one deterministic place.
//! It does not own turn order, targeting, or damage resolution.

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::grid::Pos;
use crate::projectile::ProjectileKind;

new_key_type! {
    pub struct EntityId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Faction {
    Hero,
    Monster,
}

impl Faction {
    pub fn is_hostile_to(self, other: Faction) -> bool {
        self != other
    }
}

/// Closed set of enemy decision procedures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Behavior {
    Aggressive,
    Ranged { preferred_range: u32 },
    Flanker,
    Standard,
}

impl Behavior {
    /// Parses a behavior tag. `sniper` is an alias for `ranged`; anything unknown is standard.
    pub fn from_tag(tag: &str, preferred_range: u32) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "aggressive" => Behavior::Aggressive,
            "ranged" | "sniper" => Behavior::Ranged { preferred_range },
            "flanker" => Behavior::Flanker,
            _ => Behavior::Standard,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangedAttack {
    pub shot_range: u32,
    pub projectile: ProjectileKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Rat,
    Skeleton,
    Ghoul,
    Archer,
    Sniper,
    Stalker,
    Bombardier,
    TombGuardian,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 8] = [
        EnemyKind::Rat,
        EnemyKind::Skeleton,
        EnemyKind::Ghoul,
        EnemyKind::Archer,
        EnemyKind::Sniper,
        EnemyKind::Stalker,
        EnemyKind::Bombardier,
        EnemyKind::TombGuardian,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    Player,
    Enemy(EnemyKind),
}

pub struct EnemyStats {
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub evasion: u8,
    pub alert_range: u32,
    pub behavior: Behavior,
    pub ranged: Option<RangedAttack>,
}

pub fn enemy_stats(kind: EnemyKind) -> EnemyStats {
    let bolt = |shot_range| Some(RangedAttack { shot_range, projectile: ProjectileKind::Bolt });
    match kind {
        EnemyKind::Rat => EnemyStats {
            hp: 4,
            attack: 2,
            defense: 0,
            evasion: 10,
            alert_range: 6,
            behavior: Behavior::Aggressive,
            ranged: None,
        },
        EnemyKind::Skeleton => EnemyStats {
            hp: 10,
            attack: 3,
            defense: 1,
            evasion: 5,
            alert_range: 7,
            behavior: Behavior::Standard,
            ranged: None,
        },
        EnemyKind::Ghoul => EnemyStats {
            hp: 14,
            attack: 4,
            defense: 1,
            evasion: 0,
            alert_range: 8,
            behavior: Behavior::Aggressive,
            ranged: None,
        },
        EnemyKind::Archer => EnemyStats {
            hp: 8,
            attack: 3,
            defense: 0,
            evasion: 10,
            alert_range: 9,
            behavior: Behavior::Ranged { preferred_range: 4 },
            ranged: bolt(8),
        },
        EnemyKind::Sniper => EnemyStats {
            hp: 6,
            attack: 5,
            defense: 0,
            evasion: 15,
            alert_range: 12,
            behavior: Behavior::Ranged { preferred_range: 6 },
            ranged: bolt(12),
        },
        EnemyKind::Stalker => EnemyStats {
            hp: 9,
            attack: 3,
            defense: 0,
            evasion: 20,
            alert_range: 10,
            behavior: Behavior::Flanker,
            ranged: None,
        },
        EnemyKind::Bombardier => EnemyStats {
            hp: 10,
            attack: 4,
            defense: 1,
            evasion: 5,
            alert_range: 9,
            behavior: Behavior::Ranged { preferred_range: 5 },
            ranged: Some(RangedAttack {
                shot_range: 6,
                projectile: ProjectileKind::Grenade { blast_radius: 1 },
            }),
        },
        EnemyKind::TombGuardian => EnemyStats {
            hp: 30,
            attack: 6,
            defense: 3,
            evasion: 0,
            alert_range: 6,
            behavior: Behavior::Standard,
            ranged: None,
        },
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: EntityId,
    pub kind: ActorKind,
    pub faction: Faction,
    pub pos: Pos,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
    /// Percent chance to dodge a melee blow.
    pub evasion: u8,
    pub behavior: Behavior,
    pub alert_range: u32,
    pub ranged: Option<RangedAttack>,
}

impl Actor {
    pub fn player(pos: Pos) -> Self {
        Self {
            id: EntityId::default(),
            kind: ActorKind::Player,
            faction: Faction::Hero,
            pos,
            hp: 30,
            max_hp: 30,
            attack: 5,
            defense: 1,
            evasion: 10,
            behavior: Behavior::Standard,
            alert_range: 0,
            ranged: None,
        }
    }

    pub fn enemy(kind: EnemyKind, pos: Pos) -> Self {
        let stats = enemy_stats(kind);
        Self {
            id: EntityId::default(),
            kind: ActorKind::Enemy(kind),
            faction: Faction::Monster,
            pos,
            hp: stats.hp,
            max_hp: stats.hp,
            attack: stats.attack,
            defense: stats.defense,
            evasion: stats.evasion,
            behavior: stats.behavior,
            alert_range: stats.alert_range,
            ranged: stats.ranged,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_enemy(&self) -> bool {
        matches!(self.kind, ActorKind::Enemy(_))
    }

    pub fn preferred_range(&self) -> Option<u32> {
        match self.behavior {
            Behavior::Ranged { preferred_range } => Some(preferred_range),
            _ => None,
        }
    }
}
