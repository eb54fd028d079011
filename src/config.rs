//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\mubi-parser\config.toml
//! - macOS: ~/Library/Application Support/mubi-parser/config.toml
//! - Linux: ~/.config/mubi-parser/config.toml
//!
//! The config file is human-readable and editable. Command-line flags and
//! the `OMDB_API_KEY` environment variable override what it says.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::pipeline::PipelineConfig;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials
    pub credentials: Credentials,

    /// File locations
    pub paths: PathsConfig,

    /// Acquisition pacing
    pub pipeline: PipelineSettings,
}

/// API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// OMDb API key; IMDb ratings are skipped without one
    pub omdb_api_key: Option<String>,
}

/// File locations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory of the film cache (default: OS data directory)
    pub data_dir: Option<PathBuf>,

    /// Directory of `mubi.log` (default: the data directory)
    pub log_dir: Option<PathBuf>,
}

/// Acquisition pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Seconds to wait before each MUBI film page request
    pub mubi_sleep_secs: u64,

    /// Milliseconds to wait before each film's OMDb lookups
    pub omdb_sleep_ms: u64,

    /// Serve a cache refreshed today without any request
    pub reuse_same_day_cache: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            mubi_sleep_secs: 3,
            omdb_sleep_ms: 200,
            reuse_same_day_cache: true,
        }
    }
}

impl Config {
    /// OMDb API key, if one is set and non-empty
    pub fn omdb_api_key(&self) -> Option<&str> {
        self.credentials
            .omdb_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Directory holding the film cache
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.paths.data_dir.clone().or_else(crate::cache::data_dir)
    }

    /// Directory holding the log file
    pub fn log_dir(&self) -> Option<PathBuf> {
        self.paths.log_dir.clone().or_else(|| self.data_dir())
    }

    /// Pipeline tuning derived from these settings
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            detail_delay: Duration::from_secs(self.pipeline.mubi_sleep_secs),
            rating_delay: Duration::from_millis(self.pipeline.omdb_sleep_ms),
            reuse_same_day_cache: self.pipeline.reuse_same_day_cache,
            ..Default::default()
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mubi-parser"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Read configuration from the default location
///
/// A missing file is not an error and yields the defaults.
pub fn read() -> Result<Config, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    read_from(&path)
}

/// Read configuration from `path`
pub fn read_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let contents =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
}

/// Save configuration to the default location
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)?;
    Ok(path)
}

/// Save configuration to `path`
///
/// Creates the parent directory if it doesn't exist.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
