//! Configuration module for the SD import tool
//!
//! Supports loading configuration from a TOML file.
//! Configuration is stored in a standard location:
//! - Linux/macOS: ~/.config/sd_import_tool/config.toml
//!
//! Every value has a sensible default, so the tool runs without any config
//! file at all; command-line flags override file values.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Application name used for config directory
const APP_NAME: &str = "sd_import_tool";

/// Default config file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors that can occur while loading or writing configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    ConfigDirNotFound,

    #[error("Failed to read config file {0}: {1}")]
    ReadError(PathBuf, String),

    #[error("Failed to parse config file {0}: {1}")]
    ParseError(PathBuf, String),

    #[error("Failed to write config file {0}: {1}")]
    WriteError(PathBuf, String),
}

/// Get the standard configuration directory for the application.
pub fn get_config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config").join(APP_NAME))
}

/// Get the standard configuration file path.
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Mount-related settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MountConfig {
    /// Local mount point used when the card is not already mounted
    pub mount_point: PathBuf,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            mount_point: PathBuf::from("/mnt/sdcard"),
        }
    }
}

/// Remote archive settings for the rsync stage
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// SSH user on the remote host
    pub user: String,
    /// Remote host to rsync to
    pub host: String,
    /// Remote directory to import into
    pub dir: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            user: "tyler".to_string(),
            host: "proxmox".to_string(),
            dir: "/main/plex/library/personal/imports/".to_string(),
        }
    }
}

/// Trip clustering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TripConfig {
    /// Day gap threshold to start a new trip
    pub threshold_days: i64,
}

impl Default for TripConfig {
    fn default() -> Self {
        Self { threshold_days: 2 }
    }
}

/// Reverse-geocoding settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    /// Whether to attempt GPS-based trip naming at all
    pub enabled: bool,
    /// Reverse-geocoding endpoint (Nominatim-compatible `reverse` API)
    pub endpoint: String,
    /// Request timeout in seconds for each lookup
    pub timeout_secs: u64,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://nominatim.openstreetmap.org/reverse".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mount: MountConfig,
    pub remote: RemoteConfig,
    pub trips: TripConfig,
    pub geocoding: GeocodingConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a specific file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e.to_string()))?;
        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))
    }

    /// Load configuration from the standard location.
    ///
    /// Returns the default configuration when no config file exists.
    pub fn load_default() -> Result<Self, ConfigError> {
        match get_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Generate the default configuration file contents
    pub fn generate_default_config() -> String {
        let body = toml::to_string_pretty(&Config::default())
            .unwrap_or_default();
        format!("# sd_import_tool configuration\n# All values are optional; missing keys fall back to these defaults.\n\n{}", body)
    }
}
