//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::repository::errors::{RepositoryError, RepositoryResult};

/// Selects where the backend API is reached.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// API served from the configured `api_origin`.
    Development,
    /// API served under `public_origin`, the origin the UI is published at.
    Production,
}

impl Default for BuildMode {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            BuildMode::Development
        } else {
            BuildMode::Production
        }
    }
}

fn default_date_format() -> String {
    "%-m/%-d/%Y".to_string()
}

fn default_api_origin() -> String {
    "http://localhost:5000".to_string()
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    /// Signs the flash-message cookie; at least 64 bytes.
    pub secret: String,
    #[serde(default = "default_api_origin")]
    pub api_origin: String,
    /// Public origin of this UI, used as the API origin in production.
    #[serde(default)]
    pub public_origin: Option<String>,
    #[serde(default)]
    pub build_mode: Option<BuildMode>,
    /// strftime pattern used to display dates.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl ServerConfig {
    pub fn build_mode(&self) -> BuildMode {
        self.build_mode.unwrap_or_default()
    }

    /// Origin prefixed to every `/api/...` path.
    ///
    /// This server has no `/api` routes of its own, so production requires
    /// `public_origin`.
    pub fn api_base_url(&self) -> RepositoryResult<String> {
        match self.build_mode() {
            BuildMode::Development => Ok(self.api_origin.clone()),
            BuildMode::Production => self.public_origin.clone().ok_or_else(|| {
                RepositoryError::Config(
                    "public_origin must be set when build_mode is production".to_string(),
                )
            }),
        }
    }
}
