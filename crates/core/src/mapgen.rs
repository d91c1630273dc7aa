//! Procedural level generation split into coherent submodules.

pub mod model;
pub mod progression;

mod generator;
mod layout;
mod seed;
mod spawns;

pub use generator::MapGenerator;
pub use model::{EnemySpawn, ItemKind, ItemSpawn, Level, Room};
pub use seed::derive_level_seed;

use crate::config::GenerationConfig;

/// Generates one floor with the default tuning.
pub fn generate_level(depth: u32, width: usize, height: usize, seed: u64) -> Level {
    MapGenerator::new(GenerationConfig::default()).generate(depth, width, height, seed)
}

#[cfg(test)]
mod tests {
    use super::{GenerationConfig, MapGenerator};

    #[test]
    fn generate_level_matches_map_generator_output() {
        let from_helper = super::generate_level(2, 48, 24, 123);
        let from_generator =
            MapGenerator::new(GenerationConfig::default()).generate(2, 48, 24, 123);

        assert_eq!(from_helper, from_generator);
    }

    #[test]
    fn deepest_possible_floor_still_generates() {
        let level = super::generate_level(u32::MAX, 40, 20, 1);
        assert_eq!(level.depth, u32::MAX);
        assert!(level.has_stairs());
    }
}
