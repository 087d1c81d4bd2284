//! Data-driven game balance
//!
//! Every physics, geometry and layout knob lives in [`Tuning`]. Defaults
//! reproduce the handheld build; a JSON file can override any subset.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::settings::Settings;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// How jump presses map to jump impulses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JumpPolicy {
    /// Two presses within `window_ms` give the big jump, otherwise the small one
    DoubleTap { window_ms: u32 },
    /// Press gives the big jump; releasing while rising scales upward speed
    /// by `release_factor_pct` percent
    PressDuration { release_factor_pct: i32 },
}

impl Default for JumpPolicy {
    fn default() -> Self {
        JumpPolicy::DoubleTap {
            window_ms: DOUBLE_CLICK_MS,
        }
    }
}

/// Grid layout densities, each a fraction of the total cell count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Density {
    pub air_block_fraction: f32,
    pub ground_block_fraction: f32,
    pub pill_fraction: f32,
}

impl Default for Density {
    fn default() -> Self {
        Self {
            air_block_fraction: AIR_BLOCK_FRACTION,
            ground_block_fraction: GROUND_BLOCK_FRACTION,
            pill_fraction: PILL_FRACTION,
        }
    }
}

/// Game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Geometry ===
    pub screen_width: i32,
    pub screen_height: i32,
    pub tile_width: i32,
    pub num_tiles: i32,
    pub char_width: i32,
    pub char_height: i32,
    pub ground_y: i32,
    /// Screen x the character starts at (world x is the same, camera at 0)
    pub char_start_x: i32,

    // === Movement ===
    pub movement_speed: i32,

    // === Vertical physics ===
    pub gravity: i32,
    pub small_jump_velocity: i32,
    pub big_jump_velocity: i32,
    pub max_fall_speed: i32,
    /// Highest the character may rise above its resting height (None = uncapped)
    pub max_jump_height: Option<i32>,
    pub jump_policy: JumpPolicy,

    // === Collision grid ===
    pub grid_enabled: bool,
    pub cell_size: i32,
    pub grid_rows: usize,
    pub grid_cols: usize,
    pub density: Density,
    pub pill_reward: u32,

    /// Fixed layout seed (None = seeded per session by the caller)
    pub seed: Option<u64>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            tile_width: TILE_WIDTH,
            num_tiles: NUM_TILES,
            char_width: CHAR_WIDTH,
            char_height: CHAR_HEIGHT,
            ground_y: GROUND_Y,
            char_start_x: CHAR_START_X,

            movement_speed: MOVEMENT_SPEED,

            gravity: GRAVITY,
            small_jump_velocity: SMALL_JUMP_VELOCITY,
            big_jump_velocity: BIG_JUMP_VELOCITY,
            max_fall_speed: MAX_FALL_SPEED,
            max_jump_height: None,
            jump_policy: JumpPolicy::default(),

            grid_enabled: true,
            cell_size: CELL_SIZE,
            grid_rows: GRID_ROWS,
            grid_cols: GRID_COLS,
            density: Density::default(),
            pill_reward: PILL_REWARD,

            seed: None,
        }
    }
}

impl Tuning {
    /// Full scrollable width of the level
    #[inline]
    pub fn world_width(&self) -> i32 {
        self.tile_width * self.num_tiles
    }

    /// Rightmost world x the character may occupy
    #[inline]
    pub fn max_world_x(&self) -> i32 {
        self.world_width() - self.char_width
    }

    /// Rightmost screen x the character may occupy
    #[inline]
    pub fn max_screen_x(&self) -> i32 {
        self.screen_width - self.char_width
    }

    /// Largest camera offset
    #[inline]
    pub fn max_camera_x(&self) -> i32 {
        self.world_width() - self.screen_width
    }

    /// Screen x past which the camera scrolls instead of the character
    #[inline]
    pub fn scroll_threshold(&self) -> i32 {
        self.screen_width / 2
    }

    /// Resting y on the ground plane
    #[inline]
    pub fn ground_rest_y(&self) -> i32 {
        self.ground_y - self.char_height
    }

    /// Check configuration invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
            TuningError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.tile_width <= 0 || self.num_tiles <= 0 {
            return Err(invalid("tile_width", "tiles must have positive width and count"));
        }
        if self.world_width() < self.screen_width {
            return Err(invalid(
                "num_tiles",
                format!(
                    "world width {} is narrower than the screen ({})",
                    self.world_width(),
                    self.screen_width
                ),
            ));
        }
        if self.char_width <= 0 || self.char_width > self.screen_width {
            return Err(invalid("char_width", "character must fit on screen"));
        }
        if self.char_height <= 0 || self.ground_rest_y() < 0 {
            return Err(invalid("char_height", "character must fit above the ground line"));
        }
        if !(0..=self.max_screen_x()).contains(&self.char_start_x) {
            return Err(invalid("char_start_x", "start position is off screen"));
        }
        if self.movement_speed <= 0 {
            return Err(invalid("movement_speed", "must be positive"));
        }
        if self.scroll_threshold() > self.max_screen_x() {
            return Err(invalid(
                "char_width",
                format!(
                    "scroll threshold {} is past the last screen position {}",
                    self.scroll_threshold(),
                    self.max_screen_x()
                ),
            ));
        }
        let max_step = self
            .scroll_threshold()
            .min(self.max_screen_x() - self.scroll_threshold());
        if self.movement_speed > max_step {
            return Err(invalid(
                "movement_speed",
                format!(
                    "step must fit between the scroll threshold and the screen edge ({max_step})"
                ),
            ));
        }
        if self.gravity <= 0 || self.max_fall_speed <= 0 {
            return Err(invalid("gravity", "gravity and fall speed must be positive"));
        }
        if self.small_jump_velocity >= 0 || self.big_jump_velocity >= 0 {
            return Err(invalid("small_jump_velocity", "jump impulses must be upward (negative)"));
        }
        if let Some(cap) = self.max_jump_height {
            if cap < 0 {
                return Err(invalid("max_jump_height", "must not be negative"));
            }
        }
        if let JumpPolicy::PressDuration { release_factor_pct } = self.jump_policy {
            if !(0..=100).contains(&release_factor_pct) {
                return Err(invalid("jump_policy", "release factor must be 0-100 percent"));
            }
        }

        if self.grid_enabled {
            if self.cell_size <= 0 {
                return Err(invalid("cell_size", "must be positive"));
            }
            if self.grid_rows == 0 || self.grid_cols == 0 {
                return Err(invalid("grid_rows", "grid must have at least one cell"));
            }
            if self.max_fall_speed > self.cell_size {
                return Err(invalid(
                    "max_fall_speed",
                    format!(
                        "falls faster than one cell ({}) per tick would tunnel through blocks",
                        self.cell_size
                    ),
                ));
            }
            let d = self.density;
            for (field, value) in [
                ("density.air_block_fraction", d.air_block_fraction),
                ("density.ground_block_fraction", d.ground_block_fraction),
                ("density.pill_fraction", d.pill_fraction),
            ] {
                if !(0.0..=1.0).contains(&value) {
                    return Err(invalid(field, format!("{value} is outside [0, 1]")));
                }
            }
        }

        Ok(())
    }
}

/// Everything loadable from a config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub tuning: Tuning,
    pub settings: Settings,
}

impl GameConfig {
    /// Parse a JSON config; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load a config file, falling back to defaults if it can't be read
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default config");
            return Self::default();
        };
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using default config");
                Self::default()
            }
        }
    }
}
