//! Configuration system
//!
//! Environment-driven configuration for the explorer. The backend base URL
//! is mandatory; timeouts and the cache database path have defaults.

use crate::{ExplorerError, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the backend base URL (required)
pub const BACKEND_BASE_URL_VAR: &str = "BITCAML_BACKEND_BASE_URL";
/// Optional override for the wallet-attribute fetch deadline, in milliseconds
pub const WALLET_TIMEOUT_VAR: &str = "BITCAML_WALLET_TIMEOUT_MS";
/// Optional override for the connection-list fetch deadline, in milliseconds
pub const CONNECTIONS_TIMEOUT_VAR: &str = "BITCAML_CONNECTIONS_TIMEOUT_MS";

const DEFAULT_WALLET_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_CONNECTIONS_TIMEOUT_MS: u64 = 5_000;

/// Explorer configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the wallet-data backend, e.g. `http://localhost:8000`
    pub backend_base_url: String,

    /// Deadline for `GET /wallet/{address}` requests
    pub wallet_timeout: Duration,

    /// Deadline for `GET /connected-wallets/{address}` requests
    pub connections_timeout: Duration,

    /// Path to the session cache database
    pub cache_path: PathBuf,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// A missing backend base URL is a fatal startup error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// The seam exists so tests never touch process-global environment state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let backend_base_url = lookup(BACKEND_BASE_URL_VAR).ok_or_else(|| {
            ExplorerError::Config(format!(
                "{} is not defined in the environment",
                BACKEND_BASE_URL_VAR
            ))
        })?;

        let wallet_timeout = Duration::from_millis(parse_timeout(
            WALLET_TIMEOUT_VAR,
            lookup(WALLET_TIMEOUT_VAR),
            DEFAULT_WALLET_TIMEOUT_MS,
        )?);
        let connections_timeout = Duration::from_millis(parse_timeout(
            CONNECTIONS_TIMEOUT_VAR,
            lookup(CONNECTIONS_TIMEOUT_VAR),
            DEFAULT_CONNECTIONS_TIMEOUT_MS,
        )?);

        Ok(Self {
            backend_base_url: backend_base_url.trim_end_matches('/').to_string(),
            wallet_timeout,
            connections_timeout,
            cache_path: default_cache_path(),
        })
    }
}

/// Default cache database location, consistent across platforms
pub fn default_cache_path() -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(".config");
    path.push("bitcaml");
    path.push("cache.db");
    path
}

fn parse_timeout(var: &str, raw: Option<String>, default_ms: u64) -> Result<u64> {
    match raw {
        Some(raw) => raw.parse::<u64>().map_err(|_| {
            ExplorerError::Config(format!("{} must be an integer, got {:?}", var, raw))
        }),
        None => Ok(default_ms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_base_url_is_fatal() {
        let err = Config::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, ExplorerError::Config(_)));
    }

    #[test]
    fn test_defaults_and_url_normalization() {
        let config = Config::from_lookup(|var| {
            (var == BACKEND_BASE_URL_VAR).then(|| "http://localhost:8000/".to_string())
        })
        .unwrap();

        // Trailing slash is normalized away
        assert_eq!(config.backend_base_url, "http://localhost:8000");
        assert_eq!(config.wallet_timeout, Duration::from_millis(10_000));
        assert_eq!(config.connections_timeout, Duration::from_millis(5_000));
    }

    #[test]
    fn test_timeout_overrides() {
        let config = Config::from_lookup(|var| match var {
            BACKEND_BASE_URL_VAR => Some("http://api.example".to_string()),
            WALLET_TIMEOUT_VAR => Some("2500".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.wallet_timeout, Duration::from_millis(2_500));
        assert_eq!(config.connections_timeout, Duration::from_millis(5_000));
    }

    #[test]
    fn test_bad_timeout_override() {
        let err = Config::from_lookup(|var| match var {
            BACKEND_BASE_URL_VAR => Some("http://api.example".to_string()),
            CONNECTIONS_TIMEOUT_VAR => Some("soon".to_string()),
            _ => None,
        })
        .unwrap_err();

        assert!(matches!(err, ExplorerError::Config(_)));
    }

    #[test]
    fn test_default_cache_path_under_config_dir() {
        let path = default_cache_path();
        assert!(path.ends_with("bitcaml/cache.db"));
    }
}
