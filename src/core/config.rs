//! Client configuration from the environment.

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Default backend base URL (the helper backend's `/api` prefix).
pub const DEFAULT_API_URL: &str = "http://localhost:8888/api";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct Config {
    /// Backend API base URL, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout for backend calls.
    pub request_timeout: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("CODEPAL_API_URL must start with http:// or https:// (got \"{0}\")")]
    InvalidBaseUrl(String),
    #[error("CODEPAL_TIMEOUT_SECS must be a positive integer (got \"{0}\")")]
    InvalidTimeout(String),
}

/// Load configuration from environment variables, with defaults for local use.
pub fn load() -> Result<Config, ConfigError> {
    let base_url = env::var("CODEPAL_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let base_url = base_url.trim_end_matches('/').to_string();
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ConfigError::InvalidBaseUrl(base_url));
    }

    let request_timeout = match env::var("CODEPAL_TIMEOUT_SECS") {
        Ok(raw) => {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
            if secs == 0 {
                return Err(ConfigError::InvalidTimeout(raw));
            }
            Duration::from_secs(secs)
        }
        Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    };

    Ok(Config {
        base_url,
        request_timeout,
    })
}
