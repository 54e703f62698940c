//! Configuration management for chainbook

use crate::error::{ChainError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize)]
pub struct SessionConfig {
    /// Display name registered for the interactive session
    #[serde(default = "default_operator")]
    pub operator: String,
}

#[derive(Debug, Deserialize)]
pub struct DisplayConfig {
    /// Leading hash characters shown in block listings
    #[serde(default = "default_hash_preview")]
    pub hash_preview: usize,
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            operator: default_operator(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            hash_preview: default_hash_preview(),
            color: default_color(),
        }
    }
}

fn default_operator() -> String {
    "operator".to_string()
}

fn default_hash_preview() -> usize {
    12
}

fn default_color() -> bool {
    true
}

/// Load configuration from `config.toml` in the working directory,
/// falling back to defaults when the file is absent.
pub fn load_config() -> Result<Config> {
    load_config_from(Path::new("config.toml"))
}

/// Load configuration from an explicit path
pub fn load_config_from(path: &Path) -> Result<Config> {
    let config_str = fs::read_to_string(path).unwrap_or_default();
    let config: Config = if config_str.is_empty() {
        // Provide sane defaults when the file is absent
        Config::default()
    } else {
        toml::from_str(&config_str)?
    };

    // Validate critical values
    if config.session.operator.trim().is_empty() {
        return Err(ChainError::ConfigError(
            "session.operator must not be empty".to_string(),
        ));
    }

    if config.display.hash_preview < 4 {
        return Err(ChainError::ConfigError(
            "display.hash_preview must be at least 4".to_string(),
        ));
    }

    Ok(config)
}
