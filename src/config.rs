//! Runtime configuration, read from `POINTCLICK_*` environment variables on top of defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{constants::DEFAULT_VIEWPORT, error::ConfigError};

pub const ENV_PREFIX: &str = "POINTCLICK_";
pub const DEFAULT_SAVE_PATH: &str = "save_slot_01.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where the single save document lives.
    pub save_path: PathBuf,
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Directory scanned for `*.png` assets; file stems name the animation frames and icons.
    pub assets_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            viewport_width: DEFAULT_VIEWPORT.x,
            viewport_height: DEFAULT_VIEWPORT.y,
            assets_dir: None,
        }
    }
}

impl Config {
    /// Loads the configuration from the process environment.
    pub fn load() -> Result<Config, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// Defaults overlaid with `POINTCLICK_`-prefixed environment variables.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn from_figment(figment: Figment) -> Result<Config, ConfigError> {
        let config: Config = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.viewport_width) || !positive(self.viewport_height) {
            return Err(ConfigError::InvalidViewport {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }
        if self.save_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptySavePath);
        }
        Ok(())
    }

    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }
}
