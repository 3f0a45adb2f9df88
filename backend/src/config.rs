//! Relay configuration, read from the process environment.
//!
//! `main.rs` loads an optional `.env` file first (via `dotenvy`), so local
//! development can keep the API key out of the shell. Every setting has a
//! default except the API key; a missing key is reported but does not stop the
//! server, remote calls then fail with authorization errors.

use crate::error::RelayError;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.cloud.llamaindex.ai";
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["https://www.tigzig.com", "https://tigzig.com"];

/// All runtime settings of the relay.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    /// Bearer credential for the remote parsing API (`LLAMA_API_KEY`).
    pub api_key: Option<String>,
    /// Root of the remote parsing API, without trailing slash.
    pub api_base_url: String,
    /// Origins allowed to call the relay from a browser.
    pub allowed_origins: Vec<String>,
    /// Upper bound for every remote call.
    pub remote_timeout: Duration,
    /// Number of sessions whose job is remembered at once.
    pub max_tracked_jobs: usize,
    /// Issue the session cookie as `Secure; SameSite=None`.
    pub cookie_secure: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        RelayConfig {
            host: "0.0.0.0".to_string(),
            port: 5000,
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
            remote_timeout: Duration::from_secs(120),
            max_tracked_jobs: 1024,
            cookie_secure: false,
        }
    }
}

impl RelayConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, RelayError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RelayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = RelayConfig::default();

        let allowed_origins = match get("ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.allowed_origins,
        };

        Ok(RelayConfig {
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", get("PORT"), defaults.port)?,
            api_key: get("LLAMA_API_KEY"),
            api_base_url: get("LLAMA_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            allowed_origins,
            remote_timeout: Duration::from_secs(parse_or(
                "REMOTE_TIMEOUT_SECS",
                get("REMOTE_TIMEOUT_SECS"),
                defaults.remote_timeout.as_secs(),
            )?),
            max_tracked_jobs: parse_or(
                "MAX_TRACKED_JOBS",
                get("MAX_TRACKED_JOBS"),
                defaults.max_tracked_jobs,
            )?
            .max(1),
            cookie_secure: parse_or("COOKIE_SECURE", get("COOKIE_SECURE"), defaults.cookie_secure)?,
        })
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T, RelayError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value
            .parse()
            .map_err(|e| RelayError::InvalidConfig(format!("{key}={value:?}: {e}"))),
        None => Ok(default),
    }
}
