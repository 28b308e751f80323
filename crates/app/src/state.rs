use std::{fs, path::PathBuf};

use common::prelude::EngineConfig;
use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "sealpost";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Contents of the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Settings handed to the protection engine
    #[serde(default)]
    pub engine: EngineConfig,
}

impl AppConfig {
    /// Default config file location (~/.sealpost/config.toml)
    pub fn default_path() -> Result<PathBuf, StateError> {
        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)).join(CONFIG_FILE_NAME))
    }

    /// Load the config file
    ///
    /// An explicit path must exist. Without one the default location is
    /// used when present, and defaults apply otherwise.
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let path = match custom_path {
            Some(path) => {
                if !path.exists() {
                    return Err(StateError::MissingFile(path));
                }
                path
            }
            None => match Self::default_path() {
                Ok(path) if path.exists() => path,
                _ => {
                    tracing::debug!("no config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        tracing::debug!(path = %path.display(), "loading config");
        let config_toml = fs::read_to_string(&path)?;
        Ok(toml::from_str(&config_toml)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("config file not found: {0}")]
    MissingFile(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}
