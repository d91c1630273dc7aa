//! Depth-scaled weight tables for items, enemies, and terrain features.

use crate::actor::EnemyKind;
use crate::grid::TileKind;

use super::model::ItemKind;

/// `(kind, base weight, extra weight per depth, first depth it may appear)`.
const ITEM_WEIGHTS: [(ItemKind, u32, u32, u32); 8] = [
    (ItemKind::Coins, 30, 0, 1),
    (ItemKind::Herb, 20, 0, 1),
    (ItemKind::Stone, 25, 0, 1),
    (ItemKind::IronOre, 10, 2, 1),
    (ItemKind::HealingDraught, 8, 1, 1),
    (ItemKind::Grenade, 2, 2, 2),
    (ItemKind::Gemstone, 1, 3, 3),
    (ItemKind::Relic, 0, 1, 4),
];

const ENEMY_WEIGHTS: [(EnemyKind, u32, u32, u32); 8] = [
    (EnemyKind::Rat, 30, 0, 1),
    (EnemyKind::Skeleton, 20, 2, 1),
    (EnemyKind::Archer, 8, 2, 1),
    (EnemyKind::Ghoul, 4, 3, 2),
    (EnemyKind::Stalker, 4, 3, 2),
    (EnemyKind::Sniper, 2, 2, 3),
    (EnemyKind::Bombardier, 2, 2, 3),
    (EnemyKind::TombGuardian, 0, 2, 4),
];

fn scaled<T: Copy>(table: &[(T, u32, u32, u32)], depth: u32) -> Vec<(T, u32)> {
    table
        .iter()
        .filter(|&&(_, _, _, first_depth)| depth >= first_depth)
        .map(|&(kind, base, per_depth, first_depth)| {
            (kind, base.saturating_add(per_depth.saturating_mul(depth - first_depth)))
        })
        .collect()
}

pub(super) fn item_weights(depth: u32) -> Vec<(ItemKind, u32)> {
    scaled(&ITEM_WEIGHTS, depth)
}

pub(super) fn enemy_weights(depth: u32) -> Vec<(EnemyKind, u32)> {
    scaled(&ENEMY_WEIGHTS, depth)
}

/// Shallow floors are wooded, deep floors are flooded; rock shows up everywhere.
pub(super) fn feature_weights(depth: u32) -> [(TileKind, u32); 3] {
    [
        (TileKind::Rock, 10),
        (TileKind::Tree, 12u32.saturating_sub(depth.saturating_mul(2))),
        (TileKind::Water, depth.saturating_mul(2).saturating_add(2)),
    ]
}

pub(super) fn feature_chance(base_percent: u32, depth: u32) -> u32 {
    base_percent.saturating_add(depth.saturating_sub(1).saturating_mul(5)).min(60)
}

pub(super) fn enemies_per_room(max_per_room: usize, depth: u32) -> usize {
    max_per_room.min(1 + (depth as usize) / 2)
}
