//! Room placement and corridor carving logic for base map topology.

use log::trace;

use crate::config::GenerationConfig;
use crate::grid::{Grid, Pos, TileKind};

use super::model::Room;
use super::seed::SeedStream;

/// Makes one placement attempt per drawn slot. Rejected candidates are dropped, not retried,
/// so a crowded or tiny map may come back with fewer rooms, or none.
pub(super) fn place_rooms(
    stream: &mut SeedStream,
    grid: &Grid,
    config: &GenerationConfig,
) -> Vec<Room> {
    let width = grid.width();
    let height = grid.height();
    let attempts = stream.range(config.min_room_attempts, config.max_room_attempts);

    let mut rooms: Vec<Room> = Vec::new();
    for attempt in 0..attempts {
        let room_width = stream.range(config.min_room_size, config.max_room_size);
        let room_height = stream.range(config.min_room_size, config.max_room_size);
        if room_width + 2 >= width || room_height + 2 >= height {
            trace!("room attempt {attempt}: {room_width}x{room_height} does not fit");
            continue;
        }

        let max_x = width - room_width - 1;
        let max_y = height - room_height - 1;
        let x = stream.range(1, max_x);
        let y = stream.range(1, max_y);
        let candidate = Room { x, y, width: room_width, height: room_height };
        if rooms.iter().any(|existing| existing.touches_with_margin(&candidate)) {
            trace!("room attempt {attempt}: {candidate:?} overlaps an accepted room");
            continue;
        }
        rooms.push(candidate);
    }
    rooms
}

pub(super) fn carve_room(grid: &mut Grid, room: &Room) {
    for pos in room.tiles() {
        grid.set_tile(pos, TileKind::Floor);
    }
}

/// Joins each room to the next one in placement order through their centers.
pub(super) fn carve_room_corridors(grid: &mut Grid, stream: &mut SeedStream, rooms: &[Room]) {
    for pair in rooms.windows(2) {
        let horizontal_first = stream.next_u64() & 1 == 0;
        carve_l_shaped_corridor(grid, pair[0].center(), pair[1].center(), horizontal_first);
    }
}

fn carve_l_shaped_corridor(grid: &mut Grid, start: Pos, end: Pos, horizontal_first: bool) {
    if horizontal_first {
        carve_horizontal_line(grid, start.y, start.x, end.x);
        carve_vertical_line(grid, end.x, start.y, end.y);
    } else {
        carve_vertical_line(grid, start.x, start.y, end.y);
        carve_horizontal_line(grid, end.y, start.x, end.x);
    }
}

fn carve_horizontal_line(grid: &mut Grid, y: i32, left_x: i32, right_x: i32) {
    for x in left_x.min(right_x)..=left_x.max(right_x) {
        carve_interior(grid, Pos { y, x });
    }
}

fn carve_vertical_line(grid: &mut Grid, x: i32, top_y: i32, bottom_y: i32) {
    for y in top_y.min(bottom_y)..=top_y.max(bottom_y) {
        carve_interior(grid, Pos { y, x });
    }
}

fn carve_interior(grid: &mut Grid, pos: Pos) {
    if grid.in_bounds(pos) && !grid.is_boundary(pos) {
        grid.set_tile(pos, TileKind::Floor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_rooms_never_touch_and_stay_inside_the_border() {
        let config = GenerationConfig::default();
        for seed in 0..200_u64 {
            let grid = Grid::filled(60, 30, TileKind::Wall);
            let rooms = place_rooms(&mut SeedStream::new(seed), &grid, &config);
            assert!(rooms.len() <= config.max_room_attempts);
            for (index, room) in rooms.iter().enumerate() {
                assert!(room.x >= 1 && room.y >= 1);
                assert!(room.right() <= 58 && room.bottom() <= 28, "{room:?} hits the border");
                for other in &rooms[index + 1..] {
                    assert!(
                        !room.touches_with_margin(other),
                        "rooms must not overlap or touch: {room:?} vs {other:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn tiny_maps_yield_no_rooms() {
        let grid = Grid::filled(4, 4, TileKind::Wall);
        let rooms = place_rooms(&mut SeedStream::new(1), &grid, &GenerationConfig::default());
        assert!(rooms.is_empty());
    }

    #[test]
    fn l_shaped_corridor_connects_both_centers_without_touching_the_border() {
        let mut grid = Grid::filled(12, 8, TileKind::Wall);
        let start = Pos { y: 1, x: 1 };
        let end = Pos { y: 6, x: 10 };
        carve_l_shaped_corridor(&mut grid, start, end, true);

        assert_eq!(grid.tile_at(start), TileKind::Floor);
        assert_eq!(grid.tile_at(end), TileKind::Floor);
        assert_eq!(grid.tile_at(Pos { y: 1, x: 10 }), TileKind::Floor, "corner of the L");
        assert_eq!(grid.count(TileKind::Floor), 10 + 6 - 1);
        for pos in grid.positions().filter(|&pos| grid.is_boundary(pos)) {
            assert_eq!(grid.tile_at(pos), TileKind::Wall);
        }
    }
}
