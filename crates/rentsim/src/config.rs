//! Client configuration stored as `{data_dir}/config.yaml`

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::util::io::atomic_write;

pub const CONFIG_FILE: &str = "config.yaml";

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3001";

/// Quiet period before an input change triggers a simulation
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("failed to serialize config: {0}")]
    Serialize(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the market-data service
    pub server_url: String,
    pub debounce_ms: u64,
    /// Read the built-in tables instead of calling the service
    pub offline: bool,
    /// Where exported reports go; the current directory when unset
    pub report_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            offline: false,
            report_dir: None,
        }
    }
}

impl ClientConfig {
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Load the config file; a missing file yields the defaults.
    pub fn load(data_dir: &Path) -> Result<Self, ConfigError> {
        let path = Self::path(data_dir);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        serde_saphyr::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load the config file, falling back to defaults if it is missing or broken.
    pub fn load_or_default(data_dir: &Path) -> Self {
        match Self::load(data_dir) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config file: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) -> Result<(), ConfigError> {
        let yaml =
            serde_saphyr::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        atomic_write(&Self::path(data_dir), &yaml)?;
        Ok(())
    }
}
