//! Runtime configuration loaded from `star_catcher.toml`.
//!
//! Every field defaults to the matching value in [`crate::constants`], so a
//! file only needs the keys it wants to override.  A missing file is not an
//! error; a malformed one is reported and the caller falls back to defaults.

use std::path::Path;

use serde::Deserialize;

use crate::constants::*;
use crate::error::{GameError, GameResult};

pub const DEFAULT_CONFIG_PATH: &str = "star_catcher.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── World ────────────────────────────────────────────────────────────────
    pub world_width: f32,
    pub world_height: f32,
    pub gravity: f32,

    // ── Player ───────────────────────────────────────────────────────────────
    pub run_speed: f32,
    pub jump_velocity: f32,

    // ── Front-end ────────────────────────────────────────────────────────────
    pub frame_rate: u32,
    /// Fixed RNG seed.  `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub log_file: String,
    /// Where the best score is persisted between runs.  Empty disables it.
    pub score_file: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            gravity: GRAVITY_Y,
            run_speed: RUN_SPEED,
            jump_velocity: JUMP_VELOCITY,
            frame_rate: FRAME_RATE,
            seed: None,
            log_file: "star_catcher.log".to_string(),
            score_file: ".star_catcher_score".to_string(),
        }
    }
}

impl GameConfig {
    /// Seconds per rendered frame.
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frame_rate.max(1) as f32
    }

    pub fn validate(&self) -> GameResult<()> {
        if self.world_width <= 0.0 {
            return Err(GameError::InvalidConfig {
                name: "world_width",
                value: self.world_width,
                safe_range: "(0.0, ∞)",
            });
        }
        if self.world_height <= 0.0 {
            return Err(GameError::InvalidConfig {
                name: "world_height",
                value: self.world_height,
                safe_range: "(0.0, ∞)",
            });
        }
        if self.frame_rate == 0 || self.frame_rate > 240 {
            return Err(GameError::InvalidConfig {
                name: "frame_rate",
                value: self.frame_rate as f32,
                safe_range: "[1, 240]",
            });
        }
        Ok(())
    }
}

/// Parse a config from TOML text.  `origin` only labels errors.
pub fn parse_config(contents: &str, origin: &str) -> GameResult<GameConfig> {
    let config: GameConfig = toml::from_str(contents).map_err(|e| GameError::Config {
        path: origin.to_string(),
        message: e.to_string(),
    })?;
    config.validate()?;
    Ok(config)
}

/// Read `path`.  `Ok(None)` when the file does not exist.
pub fn load_config(path: impl AsRef<Path>) -> GameResult<Option<GameConfig>> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_config(&contents, &path.display().to_string()).map(Some),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
