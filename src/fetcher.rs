//! HTTP fetcher for downloading threat feeds.

use anyhow::{Context, Result};
use reqwest::Client;
use std::net::Ipv4Addr;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::FeedSource;
use crate::error::FetchError;
use crate::parser;
use crate::utils::format_count;

/// Maximum size per feed download (10 MB). The largest known feed is well
/// under 2 MB, so this provides ample margin.
const MAX_FEED_SIZE: usize = 10 * 1024 * 1024;

/// Maximum concurrent HTTP requests to feed servers.
const MAX_CONCURRENT_FETCHES: usize = 4;

/// The result of one source's fetch-and-parse, tagged with the source name.
///
/// A failed fetch is carried as `Err` so the aggregator can log and skip the
/// source; it never aborts the other sources.
#[derive(Debug)]
pub struct SourceOutcome {
    pub name: String,
    pub result: Result<Vec<Ipv4Addr>, FetchError>,
}

/// HTTP client for fetching feeds.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Create a new fetcher with the configured per-request timeout.
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(format!("phalanx/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }

    /// Fetch and parse a single feed. One GET, no retries.
    pub async fn fetch_feed(&self, source: &FeedSource) -> SourceOutcome {
        info!("Fetching {}...", source.name);

        let result = match self.fetch_text(&source.url).await {
            Ok(body) => {
                let addrs = parser::parse(source.format, &body);
                info!("Fetched {} - {} addresses", source.name, format_count(addrs.len()));
                Ok(addrs)
            }
            Err(e) => Err(e),
        };

        SourceOutcome {
            name: source.name.clone(),
            result,
        }
    }

    /// Fetch all feeds concurrently with limited parallelism.
    ///
    /// Each fetch is isolated: a source's failure is captured in its own
    /// [`SourceOutcome`] and cannot affect another source's result.
    pub async fn fetch_feeds(&self, sources: &[&FeedSource]) -> Vec<SourceOutcome> {
        use futures::stream::{self, StreamExt};

        stream::iter(sources.iter().map(|source| self.fetch_feed(source)))
            .buffer_unordered(MAX_CONCURRENT_FETCHES)
            .collect()
            .await
    }

    /// Perform the GET and return the body, enforcing the size cap.
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        // Check Content-Length before downloading when the server provides it
        if let Some(content_length) = response.content_length() {
            if content_length as usize > MAX_FEED_SIZE {
                return Err(FetchError::TooLarge(content_length as usize, MAX_FEED_SIZE));
            }
        }

        let body = response.text().await?;

        if body.len() > MAX_FEED_SIZE {
            return Err(FetchError::TooLarge(body.len(), MAX_FEED_SIZE));
        }

        debug!("Downloaded {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

// Default is intentionally not implemented for Fetcher because new() can
// fail and we want explicit error handling.
