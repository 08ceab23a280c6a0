//! Runner configuration, stored as JSON in ~/.lane-runner/config.json.

use crate::core::constants::DEFAULT_LOADING_GRACE_MS;
use crate::error::ConfigError;
use crate::reward::RewardPolicy;
use crate::utils::persistence;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "config.json";
const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub api_base_url: String,
    pub user_id: Option<String>,
    pub auth_token: Option<String>,
    /// Use the in-process backend instead of the REST API.
    pub offline: bool,
    pub rewards: RewardPolicy,
    /// Pause after a successful cosmetics fetch before play starts.
    pub loading_grace_ms: u64,
    pub log_level: String,
    /// Fixed RNG seed for reproducible obstacle spawns.
    pub seed: Option<u64>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_id: None,
            auth_token: None,
            offline: false,
            rewards: RewardPolicy::default(),
            loading_grace_ms: DEFAULT_LOADING_GRACE_MS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            seed: None,
        }
    }
}

impl RunnerConfig {
    pub fn default_path() -> std::io::Result<PathBuf> {
        persistence::data_path(CONFIG_FILE)
    }

    /// Load from the default location. Missing or invalid files give defaults.
    pub fn load() -> Self {
        match Self::default_path() {
            Ok(path) => persistence::load_json_or_default(&path),
            Err(_) => Self::default(),
        }
    }

    /// Load from `path`, reporting what went wrong.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        persistence::save_json(path, self).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn loading_grace(&self) -> Duration {
        Duration::from_millis(self.loading_grace_ms)
    }

    /// Credentials are present, so the REST backend can be used.
    pub fn has_credentials(&self) -> bool {
        self.user_id.is_some() && self.auth_token.is_some()
    }
}
