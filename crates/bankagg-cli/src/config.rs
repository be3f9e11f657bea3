//! CLI configuration.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the remote banking API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the JSON file holding session state between invocations.
    #[serde(default = "default_session_file")]
    pub session_file: String,
}

fn default_base_url() -> String {
    "https://localhost:7250/api".to_string()
}

fn default_session_file() -> String {
    ".bankagg-session.json".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            session_file: default_session_file(),
        }
    }
}

impl AppConfig {
    /// Load configuration: explicit path > `BANKAGG_CONFIG` env var >
    /// `config/default.toml`, falling back to defaults when no file
    /// exists.
    pub fn load(path: Option<&str>) -> AppResult<Self> {
        let path = path
            .map(str::to_string)
            .or_else(|| std::env::var("BANKAGG_CONFIG").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if Path::new(&path).exists() {
            Self::from_file(&path)
        } else {
            tracing::warn!(%path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content).map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }
}
