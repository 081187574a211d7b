//! Backend API client
//!
//! Bounded-time reads against the wallet-data backend. Every request carries
//! its own deadline; reqwest cancels the in-flight request and releases its
//! resources when the deadline passes, on success and failure paths alike.
//! No call is retried automatically.

use crate::config::Config;
use crate::wallet::{ConnectionSet, WalletRecord};
use crate::{ExplorerError, Result};
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Read access to the wallet-data backend.
///
/// Implemented by [`BackendClient`]; tests substitute a counting mock to
/// verify the cache-aside path touches the network at most once.
#[async_trait]
pub trait WalletApi: Send + Sync {
    /// Fetch the statistical attributes of a single wallet
    async fn fetch_wallet(&self, address: &str) -> Result<WalletRecord>;

    /// Fetch the inbound/outbound connections of a single wallet
    async fn fetch_connections(&self, address: &str) -> Result<ConnectionSet>;
}

/// HTTP client for the wallet-data backend
#[derive(Debug)]
pub struct BackendClient {
    http: Client,
    base_url: String,
    wallet_timeout: Duration,
    connections_timeout: Duration,
}

impl BackendClient {
    /// Create a new backend client from the explorer configuration.
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .default_headers({
                let mut headers = header::HeaderMap::new();
                headers.insert(
                    header::USER_AGENT,
                    header::HeaderValue::from_static("bitcaml/0.3"),
                );
                headers.insert(
                    header::CONTENT_TYPE,
                    header::HeaderValue::from_static("application/json"),
                );
                headers
            })
            .build()
            .map_err(|e| ExplorerError::Other(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.backend_base_url.clone(),
            wallet_timeout: config.wallet_timeout,
            connections_timeout: config.connections_timeout,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, deadline: Duration) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        let deadline_ms = deadline.as_millis() as u64;
        debug!(%url, deadline_ms, "Backend GET");

        let response = self
            .http
            .get(&url)
            .timeout(deadline)
            .send()
            .await
            .map_err(|e| ExplorerError::from_request(e, deadline_ms))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExplorerError::from_status(status));
        }

        // Decode-and-validate at the boundary: a payload that does not match
        // the typed shape is a failed request, not a half-built value.
        response
            .json::<T>()
            .await
            .map_err(|e| ExplorerError::from_request(e, deadline_ms))
    }
}

#[async_trait]
impl WalletApi for BackendClient {
    async fn fetch_wallet(&self, address: &str) -> Result<WalletRecord> {
        self.get_json(&format!("wallet/{address}"), self.wallet_timeout)
            .await
    }

    async fn fetch_connections(&self, address: &str) -> Result<ConnectionSet> {
        self.get_json(
            &format!("connected-wallets/{address}"),
            self.connections_timeout,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_config(base_url: &str) -> Config {
        Config {
            backend_base_url: base_url.to_string(),
            wallet_timeout: Duration::from_millis(10_000),
            connections_timeout: Duration::from_millis(5_000),
            cache_path: PathBuf::from("unused"),
        }
    }

    #[test]
    fn test_client_creation() {
        let client = BackendClient::new(&test_config("http://localhost:8000")).unwrap();
        assert_eq!(client.base_url, "http://localhost:8000");
        assert_eq!(client.wallet_timeout, Duration::from_millis(10_000));
        assert_eq!(client.connections_timeout, Duration::from_millis(5_000));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_request_failed() {
        // Nothing listens on this port; the connect error must surface as
        // RequestFailed, not Timeout.
        let client = BackendClient::new(&test_config("http://127.0.0.1:1")).unwrap();
        let err = client.fetch_wallet("addr-a").await.unwrap_err();
        assert!(matches!(err, ExplorerError::RequestFailed(_)));
    }
}
