//! HTTP client for the station feed endpoint, built on [`reqwest`].

use std::time::Duration;

use crate::messages::{parse_feed, StationRecord};

/// Client bound to a single feed URL.
#[derive(Debug, Clone)]
pub struct StationFeedClient {
    client: reqwest::Client,
    feed_url: String,
}

/// Errors from fetching or decoding the station feed.
#[derive(Debug, thiserror::Error)]
pub enum StationFeedError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The feed answered with a non-2xx status code.
    #[error("Station feed error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The body was not a recognizable station list.
    #[error("Malformed station feed: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl StationFeedClient {
    /// Create a client whose every request is bounded by `timeout`.
    pub fn new(feed_url: String, timeout: Duration) -> Result<Self, StationFeedError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("brandpanel/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, feed_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, feed_url: String) -> Self {
        Self { client, feed_url }
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    /// Fetch and parse the full station list.
    pub async fn fetch_stations(&self) -> Result<Vec<StationRecord>, StationFeedError> {
        let response = self
            .client
            .get(&self.feed_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StationFeedError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        let stations = parse_feed(&body)?;
        tracing::debug!(count = stations.len(), "Fetched station feed");
        Ok(stations)
    }
}
