//! Client configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{PlanboardError, PlanboardResult};

static DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// `~/.config/planboard`, or the platform equivalent.
pub fn config_dir() -> PlanboardResult<PathBuf> {
    Ok(dirs::config_dir()
        .ok_or_else(|| PlanboardError::Config("Could not determine config directory".into()))?
        .join("planboard"))
}

/// Configuration at ~/.config/planboard/config.toml
///
/// Display preferences live next to it in preferences.toml instead.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the events server; `/api/events` is appended.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            server_url: default_server_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ClientConfig {
    pub fn config_path() -> PlanboardResult<PathBuf> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing a commented template first
    /// if nothing is there yet.
    pub fn load() -> PlanboardResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> PlanboardResult<Self> {
        let config: ClientConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| PlanboardError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PlanboardError::Config(e.to_string()))?;

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> PlanboardResult<()> {
        let contents = format!(
            "\
# planboard configuration

# Events server (the API lives under /api/events):
# server_url = \"{}\"

# Seconds to wait for the server before giving up:
# request_timeout_secs = {}
",
            DEFAULT_SERVER_URL, DEFAULT_REQUEST_TIMEOUT_SECS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PlanboardError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| PlanboardError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
