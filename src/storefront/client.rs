//! HTTP client for the storefront listing page using wreq for TLS fingerprint emulation.

use crate::config::StorefrontConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};
use wreq::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use wreq::Client;
use wreq_util::Emulation;

/// Source of listing page HTML - enables mocking for tests.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetches the listing page and returns the HTML body.
    async fn fetch_listing(&self) -> Result<String>;
}

/// Storefront HTTP client.
pub struct StorefrontClient {
    client: Client,
    listing_url: String,
    headers: HeaderMap,
}

impl StorefrontClient {
    /// Creates a new client for the configured storefront.
    pub fn new(config: &StorefrontConfig) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build storefront HTTP client")?;

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .with_context(|| format!("Invalid user agent: {:?}", config.user_agent))?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("fi-FI,fi;q=0.9,en;q=0.8"));

        Ok(Self { client, listing_url: config.listing_url(), headers })
    }
}

#[async_trait]
impl ListingSource for StorefrontClient {
    async fn fetch_listing(&self) -> Result<String> {
        info!("Fetching listing page");
        debug!("GET {}", self.listing_url);

        // `headers` replaces the emulation's values; `header` would append a second one
        let response = self
            .client
            .get(&self.listing_url)
            .emulation(Emulation::Chrome131)
            .headers(self.headers.clone())
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            anyhow::bail!("Listing request failed with status: {}", status);
        }

        response.text().await.context("Failed to read response body")
    }
}
