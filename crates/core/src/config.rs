//! Tuning knobs for generation, sight, and enemy tactics, loadable from TOML.
//!
//! Every section and field has a default, so a config file only needs to name the
//! values it overrides:
//!
//! ```toml
//! [generation]
//! max_room_attempts = 10
//!
//! [sight]
//! radius = 6
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Upper bound on room placement attempts per floor.
pub const MAX_ROOM_ATTEMPTS: usize = 10_000;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TuningConfig {
    pub generation: GenerationConfig,
    pub sight: SightConfig,
    pub tactics: TacticsConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    /// Room placement attempts are drawn from `min_room_attempts..=max_room_attempts`.
    pub min_room_attempts: usize,
    pub max_room_attempts: usize,
    /// Inclusive bounds for each side of a room.
    pub min_room_size: usize,
    pub max_room_size: usize,
    pub max_items_per_room: usize,
    pub max_enemies_per_room: usize,
    /// Base chance per room of a terrain feature; grows with depth.
    pub feature_chance_percent: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            min_room_attempts: 5,
            max_room_attempts: 8,
            min_room_size: 3,
            max_room_size: 8,
            max_items_per_room: 2,
            max_enemies_per_room: 2,
            feature_chance_percent: 25,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SightConfig {
    pub radius: u32,
}

impl Default for SightConfig {
    fn default() -> Self {
        Self { radius: 8 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TacticsConfig {
    /// Flankers switch to a direct approach at or below this distance.
    pub flank_engage_distance: u32,
    /// How far to the side of the target line a flanker aims.
    pub flank_offset: i32,
}

impl Default for TacticsConfig {
    fn default() -> Self {
        Self { flank_engage_distance: 2, flank_offset: 2 }
    }
}

impl TuningConfig {
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let generation = &self.generation;
        if generation.min_room_attempts > generation.max_room_attempts {
            return Err(invalid(
                "generation.min_room_attempts",
                format!(
                    "{} exceeds max_room_attempts {}",
                    generation.min_room_attempts, generation.max_room_attempts
                ),
            ));
        }
        if generation.max_room_attempts > MAX_ROOM_ATTEMPTS {
            return Err(invalid(
                "generation.max_room_attempts",
                format!("{} exceeds the cap of {MAX_ROOM_ATTEMPTS}", generation.max_room_attempts),
            ));
        }
        if generation.min_room_size < 3 {
            return Err(invalid(
                "generation.min_room_size",
                format!("{} is below the minimum of 3", generation.min_room_size),
            ));
        }
        if generation.min_room_size > generation.max_room_size {
            return Err(invalid(
                "generation.min_room_size",
                format!(
                    "{} exceeds max_room_size {}",
                    generation.min_room_size, generation.max_room_size
                ),
            ));
        }
        if generation.feature_chance_percent > 100 {
            return Err(invalid(
                "generation.feature_chance_percent",
                format!("{} is not a percentage", generation.feature_chance_percent),
            ));
        }
        if self.tactics.flank_offset <= 0 {
            return Err(invalid(
                "tactics.flank_offset",
                format!("{} must be positive", self.tactics.flank_offset),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_document_yields_defaults() {
        let config = TuningConfig::from_toml_str("").expect("empty config should parse");
        assert_eq!(config, TuningConfig::default());
    }

    #[test]
    fn partial_sections_override_only_named_fields() {
        let config = TuningConfig::from_toml_str(
            r#"
            [generation]
            max_room_attempts = 12

            [sight]
            radius = 5
            "#,
        )
        .expect("partial config should parse");
        assert_eq!(config.generation.max_room_attempts, 12);
        assert_eq!(config.generation.min_room_attempts, 5);
        assert_eq!(config.sight.radius, 5);
        assert_eq!(config.tactics, TacticsConfig::default());
    }

    #[test]
    fn rejects_inverted_room_size_bounds() {
        let err = TuningConfig::from_toml_str(
            r#"
            [generation]
            min_room_size = 9
            max_room_size = 4
            "#,
        )
        .expect_err("inverted bounds should fail validation");
        assert!(
            matches!(err, ConfigError::Invalid { field: "generation.min_room_size", .. }),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn rejects_runaway_room_attempts() {
        let err = TuningConfig::from_toml_str("[generation]\nmax_room_attempts = 1000000000\n")
            .expect_err("huge attempt counts should fail validation");
        assert!(
            matches!(err, ConfigError::Invalid { field: "generation.max_room_attempts", .. }),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = TuningConfig::from_toml_str("[sight]\nrange = 3\n")
            .expect_err("unknown key should be rejected");
        assert!(matches!(err, ConfigError::Parse(_)), "unexpected error: {err}");
    }

    #[test]
    fn loads_from_file_and_reports_missing_files() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("tuning.toml");
        fs::write(&path, "[tactics]\nflank_engage_distance = 3\n").expect("write config");

        let config = TuningConfig::load(&path).expect("config file should load");
        assert_eq!(config.tactics.flank_engage_distance, 3);

        let missing = dir.path().join("missing.toml");
        let err = TuningConfig::load(&missing).expect_err("missing file should error");
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
