//! Process-wide credentials for the remote board service.
//!
//! Loaded once at startup from `config.json` and shared read-only with
//! every request.

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::error::{BurndownError, BurndownResult};

/// Default credentials file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "./config.json";

/// Default remote service base URL.
pub const DEFAULT_DOMAIN: &str = "https://api.trello.com/";

/// API key and token forwarded on every outbound request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Credentials {
    pub app_key: String,
    pub api_token: String,
    #[serde(default = "default_domain")]
    pub domain: String,
}

fn default_domain() -> String {
    DEFAULT_DOMAIN.to_string()
}

impl Credentials {
    /// Parse credentials from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> BurndownResult<Self> {
        let credentials: Credentials = serde_json::from_slice(bytes)?;
        if credentials.app_key.is_empty() || credentials.api_token.is_empty() {
            return Err(BurndownError::config("AppKey and ApiToken must not be empty"));
        }
        Ok(credentials)
    }

    /// Read and parse the credentials file at `path`.
    pub fn load(path: &Path) -> BurndownResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            BurndownError::config(format!("Cannot read from config file {}: {}", path.display(), e))
        })?;
        let credentials = Self::from_slice(&bytes)?;
        debug!(path = %path.display(), domain = %credentials.domain, "Loaded credentials");
        Ok(credentials)
    }
}
