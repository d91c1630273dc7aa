//! Tile categories, grid coordinates, and the fixed-size tile grid.
//! This module exists so passability and opacity are queried by category, never by glyph.
//! It does not own generation, sight, or actor occupancy rules.

use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self { y: self.y + dy, x: self.x + dx }
    }

    /// `max(|dx|, |dy|)`: the metric used for sight radius, AI range, and blast radius.
    pub fn chebyshev(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Component-wise sign of `other - self`.
    pub fn direction_to(self, other: Pos) -> (i32, i32) {
        ((other.x - self.x).signum(), (other.y - self.y).signum())
    }

    /// The eight neighbours in a fixed clockwise order starting north.
    pub fn neighbors8(self) -> [Pos; 8] {
        [
            self.offset(0, -1),
            self.offset(1, -1),
            self.offset(1, 0),
            self.offset(1, 1),
            self.offset(0, 1),
            self.offset(-1, 1),
            self.offset(-1, 0),
            self.offset(-1, -1),
        ]
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TileKind {
    #[default]
    Wall,
    Floor,
    StairsUp,
    StairsDown,
    Item,
    Rock,
    Tree,
    Water,
    Door,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileProperties {
    pub glyph: char,
    pub passable: bool,
    pub opaque: bool,
    pub stops_projectiles: bool,
}

impl TileKind {
    pub const ALL: [TileKind; 9] = [
        TileKind::Wall,
        TileKind::Floor,
        TileKind::StairsUp,
        TileKind::StairsDown,
        TileKind::Item,
        TileKind::Rock,
        TileKind::Tree,
        TileKind::Water,
        TileKind::Door,
    ];

    pub const fn properties(self) -> TileProperties {
        const fn props(
            glyph: char,
            passable: bool,
            opaque: bool,
            stops_projectiles: bool,
        ) -> TileProperties {
            TileProperties { glyph, passable, opaque, stops_projectiles }
        }
        match self {
            TileKind::Wall => props('#', false, true, true),
            TileKind::Floor => props('.', true, false, false),
            TileKind::StairsUp => props('<', true, false, false),
            TileKind::StairsDown => props('>', true, false, false),
            TileKind::Item => props('!', true, false, false),
            // Boulders block sight but shots pass over them.
            TileKind::Rock => props('o', false, true, false),
            TileKind::Tree => props('T', false, true, true),
            TileKind::Water => props('~', false, false, false),
            TileKind::Door => props('+', true, false, false),
        }
    }

    pub const fn passable(self) -> bool {
        self.properties().passable
    }

    pub const fn opaque(self) -> bool {
        self.properties().opaque
    }

    pub const fn stops_projectiles(self) -> bool {
        self.properties().stops_projectiles
    }

    pub const fn glyph(self) -> char {
        self.properties().glyph
    }

    pub fn from_glyph(glyph: char) -> Option<TileKind> {
        Self::ALL.into_iter().find(|kind| kind.glyph() == glyph)
    }

    /// Tiles that a dig action can clear back to floor.
    pub const fn is_diggable(self) -> bool {
        matches!(self, TileKind::Wall | TileKind::Rock | TileKind::Tree)
    }
}

/// Fixed-size row-major tile storage. Out-of-bounds reads behave like wall.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
}

impl Grid {
    pub fn filled(width: usize, height: usize, tile: TileKind) -> Self {
        Self { width, height, tiles: vec![tile; width * height] }
    }

    /// Open floor enclosed by a one-tile wall border.
    pub fn walled_room(width: usize, height: usize) -> Self {
        let mut grid = Self::filled(width, height, TileKind::Floor);
        for pos in grid.positions().collect::<Vec<_>>() {
            if grid.is_boundary(pos) {
                grid.set_tile(pos, TileKind::Wall);
            }
        }
        grid
    }

    /// Parses rows of glyphs. Short rows are padded and unknown glyphs decode as wall.
    pub fn from_ascii(text: &str) -> Self {
        let rows: Vec<&str> =
            text.lines().map(str::trim).filter(|line| !line.is_empty()).collect();
        let height = rows.len();
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let mut grid = Self::filled(width, height, TileKind::Wall);
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                let tile = TileKind::from_glyph(glyph).unwrap_or(TileKind::Wall);
                grid.tiles[y * width + x] = tile;
            }
        }
        grid
    }

    pub fn to_ascii(&self) -> String {
        let mut text = String::with_capacity((self.width + 1) * self.height);
        for row in self.tiles.chunks(self.width.max(1)) {
            text.extend(row.iter().map(|tile| tile.glyph()));
            text.push('\n');
        }
        text
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn is_boundary(&self, pos: Pos) -> bool {
        self.in_bounds(pos)
            && (pos.x == 0
                || pos.y == 0
                || pos.x as usize == self.width - 1
                || pos.y as usize == self.height - 1)
    }

    pub fn get(&self, pos: Pos) -> Option<TileKind> {
        self.in_bounds(pos).then(|| self.tiles[self.index(pos)])
    }

    pub fn tile_at(&self, pos: Pos) -> TileKind {
        self.get(pos).unwrap_or(TileKind::Wall)
    }

    pub fn is_passable(&self, pos: Pos) -> bool {
        self.get(pos).is_some_and(TileKind::passable)
    }

    pub fn is_opaque(&self, pos: Pos) -> bool {
        self.tile_at(pos).opaque()
    }

    pub fn stops_projectiles(&self, pos: Pos) -> bool {
        self.tile_at(pos).stops_projectiles()
    }

    /// Writes a tile; out-of-bounds writes are ignored and report `false`.
    pub fn set_tile(&mut self, pos: Pos, tile: TileKind) -> bool {
        if !self.in_bounds(pos) {
            return false;
        }
        let idx = self.index(pos);
        self.tiles[idx] = tile;
        true
    }

    /// Clears a wall, rock, or tree to floor. The map border is never dug.
    pub fn dig(&mut self, pos: Pos) -> bool {
        if !self.in_bounds(pos) || self.is_boundary(pos) || !self.tile_at(pos).is_diggable() {
            return false;
        }
        self.set_tile(pos, TileKind::Floor)
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        let width = self.width;
        (0..self.width * self.height)
            .map(move |idx| Pos { y: (idx / width) as i32, x: (idx % width) as i32 })
    }

    pub fn count(&self, tile: TileKind) -> usize {
        self.tiles.iter().filter(|&&candidate| candidate == tile).count()
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}
