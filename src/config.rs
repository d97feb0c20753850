//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is read first when present.

use crate::services::moves::DEFAULT_BASE_URL;
use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Moves API base URL
    pub moves_api_url: String,
    /// Memcached address (`host:port`); the in-memory store is used when unset
    pub memcache_addr: Option<String>,
    /// Access token for command-line exports (issued by the OAuth flow)
    pub access_token: Option<String>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            moves_api_url: DEFAULT_BASE_URL.to_string(),
            memcache_addr: None,
            access_token: Some("test_access_token".to_string()),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let moves_api_url = env::var("MOVES_API_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        if !moves_api_url.starts_with("http://") && !moves_api_url.starts_with("https://") {
            return Err(ConfigError::Invalid("MOVES_API_URL", moves_api_url));
        }

        Ok(Self {
            moves_api_url,
            memcache_addr: non_empty_var("MEMCACHE_ADDR"),
            access_token: non_empty_var("MOVES_ACCESS_TOKEN"),
        })
    }

    /// The access token, required for exports.
    pub fn require_access_token(&self) -> Result<&str, ConfigError> {
        self.access_token
            .as_deref()
            .ok_or(ConfigError::Missing("MOVES_ACCESS_TOKEN"))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
