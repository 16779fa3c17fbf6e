//! Configuration loader plus strongly typed settings structures.
//!
//! Settings live in `~/.recipeek/config.toml` (or `$RECIPEEK_DIR/config.toml`).
//! The default file is embedded at compile time and extracted on first run;
//! every key is optional and falls back to the embedded defaults.

use crate::core::recipes::DEFAULT_MIN_QUERY_CHARS;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// Embed default configuration file at compile time
const DEFAULT_CONFIG: &str = include_str!("../defaults/config.toml");

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "RECIPEEK_DIR";

/// Top-level configuration object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub images: ImageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub theme: ThemeMode,
    /// Wider terminals show list and details side by side
    #[serde(default = "default_two_column_min_width")]
    pub two_column_min_width: u16,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Non-empty queries shorter than this leave the visible list unchanged
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_width")]
    pub max_width: u32,
    #[serde(default = "default_max_height")]
    pub max_height: u32,
}

/// Light or dark palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

fn default_two_column_min_width() -> u16 {
    100
}

fn default_poll_interval_ms() -> u64 {
    16
}

fn default_min_query_chars() -> usize {
    DEFAULT_MIN_QUERY_CHARS
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_width() -> u32 {
    96
}

fn default_max_height() -> u32 {
    64
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            two_column_min_width: default_two_column_min_width(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_chars: default_min_query_chars(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_secs: default_timeout_secs(),
            max_width: default_max_width(),
            max_height: default_max_height(),
        }
    }
}

impl Config {
    /// Load config from the data directory, extracting the default file on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::extract_default(&config_path)?;
        Self::load_from_path(&config_path)
    }

    /// Load config from an explicit file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;
        let config = Self::from_toml(&contents)
            .context(format!("Failed to parse config file: {:?}", path))?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)?;
        if config.search.min_query_chars == 0 {
            tracing::warn!("search.min_query_chars = 0 is treated as 1");
            config.search.min_query_chars = 1;
        }
        Ok(config)
    }

    /// The embedded default configuration
    #[cfg(test)]
    pub fn embedded_default() -> Result<Self> {
        Self::from_toml(DEFAULT_CONFIG).context("Embedded default config is invalid")
    }

    /// Write the embedded default config if no file exists yet (idempotent)
    fn extract_default(path: &Path) -> Result<()> {
        if path.exists() {
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create config directory: {:?}", parent))?;
        }
        fs::write(path, DEFAULT_CONFIG)
            .context(format!("Failed to write default config: {:?}", path))?;
        tracing::info!("Wrote default config to {:?}", path);
        Ok(())
    }

    /// Get the base recipeek directory (~/.recipeek/)
    /// Can be overridden with RECIPEEK_DIR environment variable
    pub fn base_dir() -> Result<PathBuf> {
        if let Ok(custom_dir) = std::env::var(DATA_DIR_ENV) {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".recipeek"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config.toml"))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("recipeek.log"))
    }
}
