//! Configuration management for rqw.
//!
//! The configuration lives in `~/.config/rqw/config.json` and is read once at
//! startup.

mod settings;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

pub use settings::Config;

/// Directory under the home directory holding the config file.
const CONFIG_DIR: &str = ".config/rqw";

/// Config file name.
const CONFIG_FILE: &str = "config.json";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The home directory could not be determined.
    #[error("could not determine home directory")]
    NoConfigDir,

    /// The config file could not be read.
    #[error("error opening config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON or lacks required fields.
    #[error("error decoding config file: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The config parsed but holds unusable values.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

impl Config {
    /// Default location of the config file.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(home.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load the configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load and validate the configuration at `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading configuration");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;

        info!(query_id = config.query_id, "Configuration loaded");
        Ok(config)
    }
}
