//! Receiver configuration file
//!
//! Stores which receiver provider is active and how phrases become UIDs, so
//! `rxbind bind` can be run without repeating flags.

use rxbind_core::{ProviderConfig, RxProvider, SerialRxProvider, UidMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Directory name under the platform config dir
const CONFIG_DIR: &str = "rxbind";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File I/O error: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    InvalidFormat(#[from] serde_json::Error),

    #[error("No config directory available on this platform")]
    NoConfigDir,
}

/// Persisted receiver configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RxConfig {
    /// Active receiver provider and serial protocol
    pub provider: ProviderConfig,
    /// How bind phrases are turned into UIDs
    pub mode: UidMode,
}

impl RxConfig {
    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Apply command-line overrides on top of the file values
    pub fn with_overrides(
        mut self,
        rx_provider: Option<RxProvider>,
        serial_provider: Option<SerialRxProvider>,
        mode: Option<UidMode>,
    ) -> Self {
        if let Some(rx_provider) = rx_provider {
            self.provider.rx_provider = rx_provider;
        }
        if let Some(serial_provider) = serial_provider {
            self.provider.serial_provider = serial_provider;
        }
        if let Some(mode) = mode {
            self.mode = mode;
        }
        self
    }
}

/// Default config file location (`<config dir>/rxbind/config.json`)
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
        .ok_or(ConfigError::NoConfigDir)
}
