pub mod actor;
pub mod config;
pub mod error;
pub mod events;
pub mod grid;
pub mod mapgen;
pub mod projectile;
pub mod tactics;
pub mod tomb;
pub mod visibility;
pub mod world;

#[cfg(test)]
mod test_support;

pub use actor::{Actor, ActorKind, Behavior, EnemyKind, EntityId, Faction};
pub use config::TuningConfig;
pub use error::{ConfigError, ConfigResult};
pub use events::WorldEvent;
pub use grid::{Grid, Pos, TileKind};
pub use mapgen::{Level, MapGenerator, generate_level};
pub use projectile::{Projectile, ProjectileId, ProjectileKind};
pub use tactics::Action;
pub use tomb::Tomb;
pub use visibility::{compute_visibility, has_line_of_sight};
pub use world::World;
