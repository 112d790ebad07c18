//! HTTP client for the TSETMC market-watch endpoint.
//!
//! # Example
//!
//! ```ignore
//! use tse_options_tsetmc::{parse_market_watch, TsetmcClient, TsetmcClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = TsetmcClient::new(TsetmcClientConfig::default())?;
//!     let body = client.market_watch().await?;
//!     let records = parse_market_watch(&body)?;
//!     println!("Fetched {} rows", records.len());
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tse_options_core::config::{FeedConfig, MARKET_WATCH_URL};
use tse_options_core::FeedSource;

use crate::error::{FeedError, Result};

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the TSETMC client.
#[derive(Debug, Clone)]
pub struct TsetmcClientConfig {
    /// Full market-watch URL.
    pub url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for TsetmcClientConfig {
    fn default() -> Self {
        Self {
            url: MARKET_WATCH_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

impl From<&FeedConfig> for TsetmcClientConfig {
    fn from(feed: &FeedConfig) -> Self {
        Self {
            url: feed.url.clone(),
            timeout_secs: feed.timeout_secs,
        }
    }
}

impl TsetmcClientConfig {
    /// Sets the URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

// =============================================================================
// TsetmcClient
// =============================================================================

/// Market-watch HTTP client.
pub struct TsetmcClient {
    config: TsetmcClientConfig,
    http: Client,
}

impl std::fmt::Debug for TsetmcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TsetmcClient")
            .field("url", &self.config.url)
            .field("timeout_secs", &self.config.timeout_secs)
            .finish_non_exhaustive()
    }
}

impl TsetmcClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    /// Returns error if the URL is empty or the HTTP client cannot be built.
    pub fn new(config: TsetmcClientConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(FeedError::Configuration("feed url cannot be empty".to_string()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FeedError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, http })
    }

    /// Returns the configured URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Fetches the raw market-watch body.
    ///
    /// # Errors
    /// Returns a transport error on timeout, connection failure, or non-2xx status.
    pub async fn market_watch(&self) -> Result<String> {
        tracing::debug!("GET {}", self.config.url);

        let response = self.http.get(&self.config.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(FeedError::api(status.as_u16(), text));
        }

        let body = response.text().await?;
        tracing::debug!(bytes = body.len(), "Received market-watch body");

        Ok(body)
    }
}

#[async_trait]
impl FeedSource for TsetmcClient {
    async fn fetch(&self) -> anyhow::Result<String> {
        Ok(self.market_watch().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // ==================== Config Tests ====================

    #[test]
    fn test_client_config_default() {
        let config = TsetmcClientConfig::default();
        assert_eq!(config.url, MARKET_WATCH_URL);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_client_config_builder() {
        let config = TsetmcClientConfig::default()
            .with_url("http://localhost:9000/feed")
            .with_timeout_secs(3);

        assert_eq!(config.url, "http://localhost:9000/feed");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn test_client_config_from_feed_config() {
        let feed = FeedConfig {
            url: "http://example.test/mw".to_string(),
            timeout_secs: 4,
        };
        let config = TsetmcClientConfig::from(&feed);
        assert_eq!(config.url, "http://example.test/mw");
        assert_eq!(config.timeout_secs, 4);
    }

    #[test]
    fn test_empty_url_rejected() {
        let err = TsetmcClient::new(TsetmcClientConfig::default().with_url("  ")).unwrap_err();
        assert!(matches!(err, FeedError::Configuration(_)));
    }

    // ==================== Mock Server Tests ====================

    #[tokio::test]
    async fn test_market_watch_returns_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tsev2/data/MarketWatchPlus.aspx"))
            .respond_with(ResponseTemplate::new(200).set_body_string("a@b@c,d;e"))
            .mount(&mock_server)
            .await;

        let url = format!("{}/tsev2/data/MarketWatchPlus.aspx", mock_server.uri());
        let client = TsetmcClient::new(TsetmcClientConfig::default().with_url(url)).unwrap();

        let body = client.market_watch().await.unwrap();
        assert_eq!(body, "a@b@c,d;e");

        let via_trait = client.fetch().await.unwrap();
        assert_eq!(via_trait, body);
    }

    #[tokio::test]
    async fn test_server_error_is_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&mock_server)
            .await;

        let client =
            TsetmcClient::new(TsetmcClientConfig::default().with_url(mock_server.uri())).unwrap();

        let err = client.market_watch().await.unwrap_err();
        assert!(matches!(
            err,
            FeedError::Api {
                status_code: 503,
                ..
            }
        ));
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let client = TsetmcClient::new(
            TsetmcClientConfig::default()
                .with_url(mock_server.uri())
                .with_timeout_secs(1),
        )
        .unwrap();

        let err = client.market_watch().await.unwrap_err();
        assert!(matches!(err, FeedError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Port 9 (discard) on localhost is almost never listening.
        let client = TsetmcClient::new(
            TsetmcClientConfig::default().with_url("http://127.0.0.1:9/feed"),
        )
        .unwrap();

        let err = client.market_watch().await.unwrap_err();
        assert!(err.is_transport());
    }
}
