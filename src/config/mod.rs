//! Configuration management for artgrid.
//!
//! This module handles locating and loading the user's TOML configuration.
//! A missing file is not an error: defaults are used instead.

mod settings;

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use settings::{Settings, DEFAULT_API_URL};

/// Environment variable that overrides the configuration file location.
pub const CONFIG_ENV_VAR: &str = "ARTGRID_CONFIG";

/// Configuration file name inside the config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    /// The configuration file could not be read.
    #[error("failed to read configuration file: {0}")]
    ReadError(#[source] io::Error),

    /// The configuration file is not valid TOML for our schema.
    #[error("failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A configuration value is invalid.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The full configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Application settings.
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    /// Load the configuration from the resolved path.
    ///
    /// See [`Config::resolve_path`] for how the path is chosen.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_path(explicit)?;
        Self::load_from(&path)
    }

    /// Load the configuration from a specific file.
    ///
    /// Returns the default configuration if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Validate the loaded values.
    pub fn validate(&self) -> Result<()> {
        self.settings.validate()
    }

    /// Resolve the configuration file path.
    ///
    /// An explicit path wins, then the `ARTGRID_CONFIG` environment variable,
    /// then `<config dir>/artgrid/config.toml`.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }

        Self::default_path()
    }

    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("artgrid").join(CONFIG_FILE_NAME))
    }
}
