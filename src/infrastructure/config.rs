// src/infrastructure/config.rs
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{APP_DIR_NAME, DEFAULT_EXCERPT_LENGTH};

/// TOML configuration for notekeep
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per collection
    #[default]
    File,
    /// Single SQLite database
    Sqlite,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Empty means the platform data directory
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DisplayConfig {
    #[serde(default = "default_excerpt_length")]
    pub excerpt_length: usize,
}

fn default_data_dir() -> String { String::new() }
fn default_excerpt_length() -> usize { DEFAULT_EXCERPT_LENGTH }

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: default_data_dir(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            excerpt_length: default_excerpt_length(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Load from `path`, or from the default location; a missing file yields defaults.
    ///
    /// An explicitly given path must exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()));
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!(?path, "Loading config");
                Self::load(&path)
            }
            _ => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Create default configuration file at path
    pub fn create_default(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    /// `<config dir>/notekeep/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join("config.toml"))
    }

    /// Directory holding the snapshots.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if !self.storage.data_dir.is_empty() {
            return Ok(PathBuf::from(&self.storage.data_dir));
        }
        let base = dirs::data_dir().context("Could not find data directory")?;
        Ok(base.join(APP_DIR_NAME))
    }
}
