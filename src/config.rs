//! Configuration management for modman.
//!
//! Loads an optional TOML config file from the platform config directory.
//! A missing file is not an error; every field has a default.

use crate::error::{ModmanError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for modman.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Profile to enter on startup when none is given on the command line.
    #[serde(default)]
    pub default_profile: Option<String>,

    /// Directory holding the profile records.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Whether to use colored output.
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_color() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: None,
            data_dir: None,
            color: default_color(),
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    ///
    /// - Linux/macOS: `~/.config/modman/config.toml`
    /// - Windows: `%APPDATA%\modman\config.toml`
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ModmanError::state("Could not determine config directory")
        })?;
        Ok(config_dir.join("modman").join("config.toml"))
    }

    /// Loads configuration from the given file.
    ///
    /// A missing file yields the default configuration; a present but
    /// malformed file is an error.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| {
            ModmanError::validation(format!(
                "Invalid config file {}: {e}",
                path.display()
            ))
        })
    }
}
