//! HTTP client for the MLIT site.

use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

/// Trait for page fetching - enables mocking for tests.
///
/// Page identifiers are relative to the site root (the original search
/// query string, or an `href` lifted from a next-page link); no retry or
/// backoff exists at this layer and any failure is fatal to the current
/// operation.
#[async_trait]
pub trait PageFetch: Send + Sync {
    /// Fetches one page by its relative identifier and returns the raw HTML.
    async fn fetch_page(&self, page: &str) -> Result<String>;
}

/// HTTP client for the MLIT defect database.
pub struct MlitClient {
    client: reqwest::Client,
    base_url: String,
}

impl MlitClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, None)
    }

    /// Creates a new client with an optional custom base URL (for testing).
    pub fn with_base_url(config: &Config, base_url: Option<String>) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10));

        // Configure proxy if specified
        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = reqwest::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self { client, base_url: base_url.unwrap_or_else(|| config.base_url.clone()) })
    }

    /// Returns the base URL pages are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl PageFetch for MlitClient {
    async fn fetch_page(&self, page: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, page);

        info!("GET {}", url);

        let response = self.client.get(&url).send().await.context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            anyhow::bail!("Request failed with status: {}", status);
        }

        response.text().await.context("Failed to read response body")
    }
}
