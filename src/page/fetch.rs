// src/page/fetch.rs
// =============================================================================
// This module downloads article pages and turns them into PageLinks.
//
// Key functionality:
// - PageFetcher: the trait the path finder talks to (so tests can swap in
//   an in-memory graph instead of the network)
// - HttpFetcher: the real implementation, one HTTP GET per page
// - Any network failure or non-2xx status becomes a FetchError; the caller
//   decides what to do with it (the search just skips the page)
//
// Rust concepts:
// - Traits + async_trait: async methods callable through &dyn PageFetcher
// - Builder pattern: reqwest::Client::builder()
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::links::{extract_article_links, PageLinks};
use crate::error::FetchError;

/// Something that can list the article links of a page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `page_url` and returns its article links with their sentences.
    async fn fetch_links(&self, page_url: &str) -> Result<PageLinks, FetchError>;
}

/// Settings for [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Site origin that "/wiki/..." links are resolved against
    pub origin: Url,
    /// Path prefix that marks article links
    pub article_prefix: String,
    /// Per-request timeout
    pub timeout: Duration,
    pub user_agent: String,
}

impl FetchConfig {
    pub fn new(origin: Url) -> Self {
        Self {
            origin,
            article_prefix: "/wiki/".to_string(),
            timeout: Duration::from_secs(10),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Fetches pages over HTTP with one shared client (connection pooling).
pub struct HttpFetcher {
    client: Client,
    config: FetchConfig,
}

impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, config })
    }

    // Fetches a web page and returns its HTML content
    async fn fetch_page(&self, page_url: &str) -> Result<String, FetchError> {
        let url = Url::parse(page_url).map_err(|e| FetchError::InvalidUrl {
            url: page_url.to_string(),
            reason: e.to_string(),
        })?;

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: page_url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_links(&self, page_url: &str) -> Result<PageLinks, FetchError> {
        let html = self.fetch_page(page_url).await?;
        let links = extract_article_links(&html, &self.config.origin, &self.config.article_prefix);

        if links.is_empty() {
            debug!(url = page_url, "page has no article links");
        } else {
            debug!(url = page_url, count = links.len(), "extracted article links");
        }

        Ok(links)
    }
}
