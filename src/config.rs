//! Tunable game constants.
//!
//! Every size, speed and interval the simulation uses lives in [`Config`].
//! Defaults reproduce the classic Goose Game numbers; a JSON file may
//! override any subset of them.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config is not valid JSON")]
    Parse(#[from] serde_json::Error),
    #[error("fps must be greater than zero")]
    ZeroFps,
    #[error("{0} interval must be greater than zero")]
    ZeroInterval(&'static str),
    #[error("{0} size must be positive in both dimensions")]
    NonPositiveSize(&'static str),
    #[error("{0} does not fit inside the viewport")]
    DoesNotFit(&'static str),
    #[error("{0} speed range is inverted or negative")]
    BadSpeedRange(&'static str),
    #[error("the player needs at least one animation frame")]
    NoFrames,
    #[error("player speed must not be negative")]
    NegativePlayerSpeed,
    #[error("background speed must be in 0..{width} (viewport width)")]
    BadBackgroundSpeed { width: i32 },
}

/// Width and height in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

impl Size {
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }
}

/// Inclusive range a spawned entity's speed is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub viewport: Size,
    /// Fixed simulation rate, ticks per second.
    pub fps: u32,

    pub player_size: Size,
    pub enemy_size: Size,
    pub bonus_size: Size,

    /// Pixels per tick while a direction is held.
    pub player_speed: i32,
    /// Pixels per tick the background scrolls left.
    pub background_speed: i32,
    /// The player starts centered horizontally with its center this far
    /// above the bottom edge.
    pub player_start_lift: i32,

    pub enemy_interval_ms: u64,
    pub bonus_interval_ms: u64,
    pub animation_interval_ms: u64,

    pub enemy_speed: SpeedRange,
    pub bonus_speed: SpeedRange,

    /// Number of goose animation frames (`goose1.png` .. `gooseN.png`).
    pub player_frames: usize,

    pub highscore_file: PathBuf,
    pub assets_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viewport: Size::new(800, 600),
            fps: 60,

            player_size: Size::new(100, 60),
            enemy_size: Size::new(60, 40),
            bonus_size: Size::new(40, 40),

            player_speed: 10,
            background_speed: 3,
            player_start_lift: 70,

            enemy_interval_ms: 1500,
            bonus_interval_ms: 1500,
            animation_interval_ms: 125,

            enemy_speed: SpeedRange { min: 4, max: 6 },
            bonus_speed: SpeedRange { min: 4, max: 6 },

            player_frames: 5,

            highscore_file: PathBuf::from("highscore.txt"),
            assets_dir: PathBuf::from("assets"),
        }
    }
}

impl Config {
    /// Parse a (possibly partial) JSON config; missing fields keep defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        for (name, ms) in [
            ("enemy", self.enemy_interval_ms),
            ("bonus", self.bonus_interval_ms),
            ("animation", self.animation_interval_ms),
        ] {
            if ms == 0 {
                return Err(ConfigError::ZeroInterval(name));
            }
        }
        for (name, size) in [
            ("viewport", self.viewport),
            ("player", self.player_size),
            ("enemy", self.enemy_size),
            ("bonus", self.bonus_size),
        ] {
            if size.w <= 0 || size.h <= 0 {
                return Err(ConfigError::NonPositiveSize(name));
            }
        }
        for (name, size) in [
            ("player", self.player_size),
            ("enemy", self.enemy_size),
            ("bonus", self.bonus_size),
        ] {
            if size.w > self.viewport.w || size.h > self.viewport.h {
                return Err(ConfigError::DoesNotFit(name));
            }
        }
        for (name, range) in [("enemy", self.enemy_speed), ("bonus", self.bonus_speed)] {
            if range.min < 0 || range.min > range.max {
                return Err(ConfigError::BadSpeedRange(name));
            }
        }
        if self.player_frames == 0 {
            return Err(ConfigError::NoFrames);
        }
        if self.player_speed < 0 {
            return Err(ConfigError::NegativePlayerSpeed);
        }
        // The background is scaled to the viewport, so one step must stay
        // under one image width for the wrap to keep the pair on screen.
        if !(0..self.viewport.w).contains(&self.background_speed) {
            return Err(ConfigError::BadBackgroundSpeed {
                width: self.viewport.w,
            });
        }
        Ok(())
    }

    /// Simulated time that passes in one tick.
    pub fn tick_delta(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    pub fn enemy_interval(&self) -> Duration {
        Duration::from_millis(self.enemy_interval_ms)
    }

    pub fn bonus_interval(&self) -> Duration {
        Duration::from_millis(self.bonus_interval_ms)
    }

    pub fn animation_interval(&self) -> Duration {
        Duration::from_millis(self.animation_interval_ms)
    }
}
