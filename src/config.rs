//! Backend endpoint configuration.
//!
//! The dashboard talks to one backend. Its base URL comes from the
//! `WATCHTOWER_API_URL` environment variable, falling back to the local
//! development default.

use std::env;

/// Environment variable that supplies the backend base URL.
pub const API_URL_ENV: &str = "WATCHTOWER_API_URL";

/// Backend address used when the environment does not say otherwise.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Resolved backend endpoint configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without a trailing slash, e.g. `http://localhost:8000`.
    pub base_url: String,
}

impl ApiConfig {
    /// Resolve from the process environment.
    pub fn from_env() -> Self {
        let config = Self::from_value(env::var(API_URL_ENV).ok());
        log::debug!("Backend base URL resolved to {}", config.base_url);
        config
    }

    /// Build from an explicit base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::from_value(Some(base_url.into()))
    }

    fn from_value(value: Option<String>) -> Self {
        let raw = value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self {
            base_url: raw.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_value(None)
    }
}
