//! Plain-text map dumps for the command-line tools.

use crawl_core::mapgen::Level;
use crawl_core::{ActorKind, Grid, Pos, World};

const PLAYER_GLYPH: char = '@';
const ENEMY_GLYPH: char = 'e';
const PROJECTILE_GLYPH: char = '*';

fn glyph_rows(grid: &Grid) -> Vec<Vec<char>> {
    grid.to_ascii().lines().map(|line| line.chars().collect()).collect()
}

fn overlay(rows: &mut [Vec<char>], pos: Pos, glyph: char) {
    let (Ok(y), Ok(x)) = (usize::try_from(pos.y), usize::try_from(pos.x)) else {
        return;
    };
    if let Some(cell) = rows.get_mut(y).and_then(|row| row.get_mut(x)) {
        *cell = glyph;
    }
}

fn join_rows(rows: &[Vec<char>]) -> String {
    let mut text = String::new();
    for row in rows {
        text.extend(row.iter());
        text.push('\n');
    }
    text
}

pub fn render_level(level: &Level) -> String {
    let mut rows = glyph_rows(&level.grid);
    for spawn in &level.enemy_spawns {
        overlay(&mut rows, spawn.pos, ENEMY_GLYPH);
    }
    format!(
        "depth {} seed {:#018x} rooms {} items {} enemies {} fingerprint {:016x}\n{}",
        level.depth,
        level.seed,
        level.rooms.len(),
        level.item_spawns.len(),
        level.enemy_spawns.len(),
        level.fingerprint(),
        join_rows(&rows)
    )
}

pub fn render_world(world: &World) -> String {
    let mut rows = glyph_rows(world.grid());
    for projectile in world.projectiles() {
        overlay(&mut rows, projectile.pos, PROJECTILE_GLYPH);
    }
    for actor in world.actors() {
        let glyph = match actor.kind {
            ActorKind::Player => PLAYER_GLYPH,
            ActorKind::Enemy(_) => ENEMY_GLYPH,
        };
        overlay(&mut rows, actor.pos, glyph);
    }
    join_rows(&rows)
}
