//! High-level level generation that composes layout, stairs, features, and spawns.

use log::debug;

use crate::config::GenerationConfig;
use crate::grid::{Grid, Pos, TileKind};

use super::layout::{carve_room, carve_room_corridors, place_rooms};
use super::model::{Level, Room};
use super::seed::SeedStream;
use super::spawns::{SpawnContext, place_enemies, place_features, scatter_items};

pub struct MapGenerator {
    config: GenerationConfig,
}

impl MapGenerator {
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    pub fn generate(&self, depth: u32, width: usize, height: usize, seed: u64) -> Level {
        let mut grid = Grid::filled(width, height, TileKind::Wall);
        let mut stream = SeedStream::new(seed);

        let rooms = place_rooms(&mut stream, &grid, &self.config);
        for room in &rooms {
            carve_room(&mut grid, room);
        }
        carve_room_corridors(&mut grid, &mut stream, &rooms);

        let (stairs_up, stairs_down) = stairs_positions(&rooms);
        if let (Some(up), Some(down)) = (stairs_up, stairs_down) {
            grid.set_tile(up, TileKind::StairsUp);
            grid.set_tile(down, TileKind::StairsDown);
        }

        let context = SpawnContext { depth, config: &self.config, rooms: &rooms };
        place_features(&mut grid, &mut stream, &context);
        let item_spawns = scatter_items(&mut grid, &mut stream, &context);
        let enemy_spawns = place_enemies(&grid, &mut stream, &context);

        debug!(
            "generated depth {depth} ({width}x{height}, seed {seed:#x}): {} rooms, {} items, {} enemies",
            rooms.len(),
            item_spawns.len(),
            enemy_spawns.len()
        );

        Level {
            depth,
            seed,
            grid,
            rooms,
            stairs_up,
            stairs_down,
            item_spawns,
            enemy_spawns,
        }
    }
}

fn stairs_positions(rooms: &[Room]) -> (Option<Pos>, Option<Pos>) {
    let (Some(first), Some(last)) = (rooms.first(), rooms.last()) else {
        return (None, None);
    };
    let up = first.center();
    if rooms.len() > 1 {
        return (Some(up), Some(last.center()));
    }
    (Some(up), Some(farthest_tile_in_room(first, up)))
}

/// Earliest tile in row-major order among those farthest from `from`.
fn farthest_tile_in_room(room: &Room, from: Pos) -> Pos {
    let mut best = from;
    let mut best_distance = 0;
    for pos in room.tiles() {
        let distance = from.chebyshev(pos);
        if distance > best_distance {
            best = pos;
            best_distance = distance;
        }
    }
    best
}
