//! Game configuration loaded from TOML. Every field has a default, so an empty
//! file (or no file at all) yields the standard 800×600 game.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::entities::{Screen, PLAYER_SIZE};

/// Looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "item_catcher.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    /// 0xRRGGBB
    pub background: u32,
    pub frame_millis: u64,
    pub player_speed: f32,
    pub item_spawn_chance: f64,
    pub enemy_spawn_chance: f64,
    pub manifest: PathBuf,
    pub log_file: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
            background: 0x1099bb,
            frame_millis: 16,
            player_speed: 5.0,
            item_spawn_chance: 0.02,
            enemy_spawn_chance: 0.01,
            manifest: PathBuf::from("assets/manifest.toml"),
            log_file: PathBuf::from("item_catcher.log"),
        }
    }
}

impl GameConfig {
    /// Load `path` if given, else [`DEFAULT_CONFIG_FILE`] if it exists, else
    /// the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = self.screen_width.is_finite() && self.screen_height.is_finite();
        if !(finite && self.screen_width >= PLAYER_SIZE && self.screen_height >= PLAYER_SIZE) {
            return Err(ConfigError::Invalid(format!(
                "screen must be finite and at least {PLAYER_SIZE}x{PLAYER_SIZE}, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        for (name, chance) in [
            ("item_spawn_chance", self.item_spawn_chance),
            ("enemy_spawn_chance", self.enemy_spawn_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be within [0, 1], got {chance}"
                )));
            }
        }
        if !(self.player_speed.is_finite() && self.player_speed >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "player_speed must be a finite non-negative number, got {}",
                self.player_speed
            )));
        }
        if self.frame_millis == 0 {
            return Err(ConfigError::Invalid("frame_millis must be positive".into()));
        }
        Ok(())
    }

    pub fn screen(&self) -> Screen {
        Screen {
            width: self.screen_width,
            height: self.screen_height,
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_millis)
    }
}
