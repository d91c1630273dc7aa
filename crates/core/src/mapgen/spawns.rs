//! Terrain features, item scatter, and enemy placement inside carved rooms.

use std::collections::BTreeSet;

use crate::config::GenerationConfig;
use crate::grid::{Grid, Pos, TileKind};

use super::model::{EnemySpawn, ItemSpawn, Room};
use super::progression;
use super::seed::SeedStream;

pub(super) struct SpawnContext<'a> {
    pub(super) depth: u32,
    pub(super) config: &'a GenerationConfig,
    pub(super) rooms: &'a [Room],
}

fn random_room_tile(stream: &mut SeedStream, room: &Room) -> Pos {
    let x = stream.range(room.x, room.right());
    let y = stream.range(room.y, room.bottom());
    Pos { y: y as i32, x: x as i32 }
}

/// A feature may only sit on floor fully ringed by floor, so features never touch each other,
/// stairs, or corridor mouths, and 8-way movement can always step around one.
fn is_open_interior(grid: &Grid, pos: Pos) -> bool {
    grid.tile_at(pos) == TileKind::Floor
        && pos.neighbors8().iter().all(|&neighbor| grid.tile_at(neighbor) == TileKind::Floor)
}

pub(super) fn place_features(grid: &mut Grid, stream: &mut SeedStream, context: &SpawnContext<'_>) {
    let chance =
        progression::feature_chance(context.config.feature_chance_percent, context.depth);
    let weights = progression::feature_weights(context.depth);
    for room in context.rooms {
        if !stream.percent(chance) {
            continue;
        }
        let pos = random_room_tile(stream, room);
        let Some(kind) = stream.weighted(&weights) else {
            continue;
        };
        if is_open_interior(grid, pos) {
            grid.set_tile(pos, kind);
        }
    }
}

pub(super) fn scatter_items(
    grid: &mut Grid,
    stream: &mut SeedStream,
    context: &SpawnContext<'_>,
) -> Vec<ItemSpawn> {
    let weights = progression::item_weights(context.depth);
    let mut spawns = Vec::new();
    for room in context.rooms {
        let count = stream.range(0, context.config.max_items_per_room);
        for _ in 0..count {
            let pos = random_room_tile(stream, room);
            let Some(kind) = stream.weighted(&weights) else {
                continue;
            };
            if grid.tile_at(pos) != TileKind::Floor {
                continue;
            }
            grid.set_tile(pos, TileKind::Item);
            spawns.push(ItemSpawn { kind, pos });
        }
    }
    spawns
}

/// The first room is the arrival room and stays clear of enemies.
pub(super) fn place_enemies(
    grid: &Grid,
    stream: &mut SeedStream,
    context: &SpawnContext<'_>,
) -> Vec<EnemySpawn> {
    let weights = progression::enemy_weights(context.depth);
    let per_room = progression::enemies_per_room(context.config.max_enemies_per_room, context.depth);
    let mut occupied = BTreeSet::new();
    let mut spawns = Vec::new();
    for room in context.rooms.iter().skip(1) {
        let count = stream.range(0, per_room);
        for _ in 0..count {
            let pos = random_room_tile(stream, room);
            let Some(kind) = stream.weighted(&weights) else {
                continue;
            };
            if grid.tile_at(pos) != TileKind::Floor || !occupied.insert(pos) {
                continue;
            }
            spawns.push(EnemySpawn { kind, pos });
        }
    }
    spawns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carved(rooms: &[Room]) -> Grid {
        let mut grid = Grid::filled(30, 20, TileKind::Wall);
        for room in rooms {
            for pos in room.tiles() {
                grid.set_tile(pos, TileKind::Floor);
            }
        }
        grid
    }

    #[test]
    fn features_never_touch_each_other_or_non_floor() {
        let rooms = [Room { x: 2, y: 2, width: 8, height: 8 }];
        let config = GenerationConfig { feature_chance_percent: 100, ..Default::default() };
        let mut grid = carved(&rooms);
        let mut stream = SeedStream::new(5);
        let context = SpawnContext { depth: 3, config: &config, rooms: &rooms };
        for _ in 0..40 {
            place_features(&mut grid, &mut stream, &context);
        }

        let features: Vec<Pos> = grid
            .positions()
            .filter(|&pos| rooms[0].contains(pos) && grid.tile_at(pos) != TileKind::Floor)
            .collect();
        assert!(!features.is_empty(), "a guaranteed chance should place something");
        for &feature in &features {
            assert!(feature.neighbors8().iter().all(|n| !features.contains(n)));
            for neighbor in feature.neighbors8() {
                assert!(rooms[0].contains(neighbor), "feature {feature:?} touches the room edge");
            }
        }
    }

    #[test]
    fn items_replace_floor_only() {
        let rooms = [Room { x: 1, y: 1, width: 3, height: 3 }];
        let config = GenerationConfig { max_items_per_room: 9, ..Default::default() };
        let mut grid = carved(&rooms);
        let center = rooms[0].center();
        grid.set_tile(center, TileKind::StairsUp);

        let context = SpawnContext { depth: 2, config: &config, rooms: &rooms };
        let spawns = scatter_items(&mut grid, &mut SeedStream::new(77), &context);

        assert_eq!(grid.tile_at(center), TileKind::StairsUp);
        assert_eq!(grid.count(TileKind::Item), spawns.len());
        for spawn in &spawns {
            assert_eq!(grid.tile_at(spawn.pos), TileKind::Item);
        }
    }

    #[test]
    fn enemies_skip_the_arrival_room_and_never_stack() {
        let rooms = [
            Room { x: 1, y: 1, width: 5, height: 5 },
            Room { x: 10, y: 2, width: 6, height: 6 },
            Room { x: 20, y: 8, width: 6, height: 6 },
        ];
        let config = GenerationConfig { max_enemies_per_room: 6, ..Default::default() };
        let grid = carved(&rooms);
        for seed in 0..30 {
            let context = SpawnContext { depth: 9, config: &config, rooms: &rooms };
            let spawns = place_enemies(&grid, &mut SeedStream::new(seed), &context);
            let unique: BTreeSet<Pos> = spawns.iter().map(|spawn| spawn.pos).collect();
            assert_eq!(unique.len(), spawns.len());
            assert!(spawns.iter().all(|spawn| !rooms[0].contains(spawn.pos)));
        }
    }
}
