//! Game configuration
//!
//! Every tunable of a session.  Defaults reproduce the reference layout; a
//! JSON file can override any subset of fields.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::Playfield;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV_VAR: &str = "SWEEP_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("playfield width must be positive, got {width}")]
    InvalidWidth { width: i32 },
    #[error("actor size {actor_size} does not fit a playfield {width} wide")]
    InvalidActorSize { actor_size: i32, width: i32 },
    #[error("tick period must be at least 1 ms")]
    ZeroTickPeriod,
    #[error("invalid formation layout: {reason}")]
    InvalidFormation { reason: &'static str },
}

/// Most enemies a single formation may hold.
pub const MAX_ENEMIES: usize = 10_000;

/// Grid the formation is laid out on at session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormationLayout {
    pub rows: usize,
    pub per_row: usize,
    pub origin_x: i32,
    pub origin_y: i32,
    pub spacing_x: i32,
    pub spacing_y: i32,
}

impl FormationLayout {
    pub fn enemy_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.per_row)
    }

    /// Reject grids with too many enemies or with a far corner outside the
    /// `i32` coordinate space.  Positions are linear in the grid index, so
    /// checking the origin and the far corner covers every enemy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let count = self
            .enemy_count()
            .filter(|&n| n <= MAX_ENEMIES)
            .ok_or(ConfigError::InvalidFormation {
                reason: "too many enemies",
            })?;
        if count == 0 {
            return Ok(());
        }

        let last_column = i32::try_from(self.per_row - 1).map_err(|_| {
            ConfigError::InvalidFormation {
                reason: "too many columns",
            }
        })?;
        let last_row = i32::try_from(self.rows - 1).map_err(|_| ConfigError::InvalidFormation {
            reason: "too many rows",
        })?;

        far_edge(self.origin_x, last_column, self.spacing_x).ok_or(
            ConfigError::InvalidFormation {
                reason: "rightmost column overflows",
            },
        )?;
        far_edge(self.origin_y, last_row, self.spacing_y).ok_or(
            ConfigError::InvalidFormation {
                reason: "bottom row overflows",
            },
        )?;
        Ok(())
    }
}

fn far_edge(origin: i32, index: i32, spacing: i32) -> Option<i32> {
    index.checked_mul(spacing)?.checked_add(origin)
}

impl Default for FormationLayout {
    fn default() -> Self {
        Self {
            rows: 2,
            per_row: 8,
            origin_x: 50,
            origin_y: 50,
            spacing_x: 60,
            spacing_y: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Playfield width in pixels.
    pub width: i32,
    /// Side of the square ship and enemy sprites.
    pub actor_size: i32,
    /// Ship step per directional input.
    pub move_distance: u16,
    /// Formation step per tick.
    pub enemy_speed: u16,
    /// Milliseconds between formation updates.
    pub tick_period_ms: u64,
    pub formation: FormationLayout,
    /// Host only: drive the ship with random input.
    pub demo: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 600,
            actor_size: 32,
            move_distance: 10,
            enemy_speed: 2,
            tick_period_ms: 50,
            formation: FormationLayout::default(),
            demo: false,
        }
    }
}

impl GameConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `SWEEP_CONFIG` when set, otherwise use the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.playfield()?;
        if self.tick_period_ms == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        self.formation.validate()
    }

    pub fn playfield(&self) -> Result<Playfield, ConfigError> {
        Playfield::new(self.width, self.actor_size)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }
}
