//! Public data models for generated levels, rooms, and spawn placements.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::actor::EnemyKind;
use crate::grid::{Grid, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Room {
    pub fn right(self) -> usize {
        self.x + self.width - 1
    }

    pub fn bottom(self) -> usize {
        self.y + self.height - 1
    }

    pub fn center(self) -> Pos {
        Pos { y: (self.y + (self.height / 2)) as i32, x: (self.x + (self.width / 2)) as i32 }
    }

    pub fn expanded(self, margin: usize) -> Self {
        let expanded_x = self.x.saturating_sub(margin);
        let expanded_y = self.y.saturating_sub(margin);
        let expanded_right = self.right().saturating_add(margin);
        let expanded_bottom = self.bottom().saturating_add(margin);
        Self {
            x: expanded_x,
            y: expanded_y,
            width: expanded_right - expanded_x + 1,
            height: expanded_bottom - expanded_y + 1,
        }
    }

    pub fn intersects(self, other: &Self) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    /// True when the two rooms come within one tile of each other.
    pub fn touches_with_margin(self, other: &Self) -> bool {
        self.expanded(1).intersects(&other.expanded(1))
    }

    pub fn contains(self, pos: Pos) -> bool {
        if pos.x < 0 || pos.y < 0 {
            return false;
        }
        let px = pos.x as usize;
        let py = pos.y as usize;
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    /// Every tile of the room in row-major order.
    pub fn tiles(self) -> impl Iterator<Item = Pos> {
        (self.y..=self.bottom()).flat_map(move |y| {
            (self.x..=self.right()).map(move |x| Pos { y: y as i32, x: x as i32 })
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Coins,
    Herb,
    Stone,
    IronOre,
    Gemstone,
    HealingDraught,
    Grenade,
    Relic,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSpawn {
    pub kind: ItemKind,
    pub pos: Pos,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    pub pos: Pos,
}

/// One generated floor. A level with no rooms has no stairs; callers decide whether to re-roll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub depth: u32,
    pub seed: u64,
    pub grid: Grid,
    pub rooms: Vec<Room>,
    pub stairs_up: Option<Pos>,
    pub stairs_down: Option<Pos>,
    pub item_spawns: Vec<ItemSpawn>,
    pub enemy_spawns: Vec<EnemySpawn>,
}

impl Level {
    pub fn has_stairs(&self) -> bool {
        self.stairs_up.is_some() && self.stairs_down.is_some()
    }

    /// First room center, used as the arrival point when a floor lacks stairs.
    pub fn arrival_tile(&self) -> Option<Pos> {
        self.stairs_up.or_else(|| self.rooms.first().map(|room| room.center()))
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.depth.to_le_bytes());
        bytes.extend((self.grid.width() as u32).to_le_bytes());
        bytes.extend((self.grid.height() as u32).to_le_bytes());
        bytes.extend(self.grid.tiles().iter().map(|tile| tile.glyph() as u8));

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            for value in [room.x, room.y, room.width, room.height] {
                bytes.extend((value as u32).to_le_bytes());
            }
        }
        for stairs in [self.stairs_up, self.stairs_down] {
            match stairs {
                Some(pos) => {
                    bytes.push(1);
                    bytes.extend(pos.y.to_le_bytes());
                    bytes.extend(pos.x.to_le_bytes());
                }
                None => bytes.push(0),
            }
        }

        bytes.extend((self.item_spawns.len() as u32).to_le_bytes());
        for spawn in &self.item_spawns {
            bytes.push(spawn.kind as u8);
            bytes.extend(spawn.pos.y.to_le_bytes());
            bytes.extend(spawn.pos.x.to_le_bytes());
        }

        bytes.extend((self.enemy_spawns.len() as u32).to_le_bytes());
        for spawn in &self.enemy_spawns {
            bytes.push(spawn.kind as u8);
            bytes.extend(spawn.pos.y.to_le_bytes());
            bytes.extend(spawn.pos.x.to_le_bytes());
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_check_rejects_rooms_one_tile_apart() {
        let left = Room { x: 1, y: 1, width: 3, height: 3 };
        let gap_of_one = Room { x: 5, y: 1, width: 3, height: 3 };
        let gap_of_two = Room { x: 6, y: 1, width: 3, height: 3 };
        assert!(!left.intersects(&gap_of_one));
        assert!(left.touches_with_margin(&gap_of_one));
        assert!(!left.touches_with_margin(&gap_of_two));
    }

    #[test]
    fn room_tiles_cover_exactly_the_rectangle() {
        let room = Room { x: 2, y: 3, width: 4, height: 3 };
        let tiles: Vec<Pos> = room.tiles().collect();
        assert_eq!(tiles.len(), 12);
        assert!(tiles.iter().all(|&pos| room.contains(pos)));
        assert_eq!(room.center(), Pos { y: 4, x: 4 });
        assert!(!room.contains(Pos { y: -1, x: 2 }));
    }
}
