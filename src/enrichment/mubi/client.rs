//! MUBI HTTP client
//!
//! Fetches the "Now Showing" page and individual film pages. MUBI has no
//! public API for this, so both are scraped; see [`super::extract`].
//!
//! Callers are expected to pace detail requests (the pipeline sleeps between
//! them), MUBI throttles aggressive clients.

use super::extract;
use crate::enrichment::domain::{EnrichmentError, ListingRecord};
use crate::model::FilmDetail;

/// MUBI web client
pub struct MubiClient {
    http_client: reqwest::Client,
    base_url: String,
}

/// User agent string sent with every request
const USER_AGENT: &str = concat!(
    "MubiParser/",
    env!("CARGO_PKG_VERSION"),
    " (+https://mubi.com/showing)"
);

/// Path of the listing page relative to the base URL
const SHOWING_PATH: &str = "/showing";

impl MubiClient {
    /// Create a new client
    pub fn new() -> Self {
        Self::with_base_url("https://mubi.com")
    }

    /// Create a client against a different host (mirrors, tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch and parse the listing page
    ///
    /// A page without any film tile is reported as a parse error: it means
    /// the markup changed, and an empty listing must never overwrite the cache.
    pub async fn fetch_listing(&self) -> Result<Vec<ListingRecord>, EnrichmentError> {
        let url = format!("{}{}", self.base_url, SHOWING_PATH);
        let body = self.get_page(&url).await?;

        let records = extract::parse_listing(&body, &self.base_url);
        if records.is_empty() {
            return Err(EnrichmentError::Parse(format!(
                "no films found on {url}"
            )));
        }

        tracing::debug!("Listing page has {} films", records.len());
        Ok(records)
    }

    /// Fetch and parse one film page
    pub async fn fetch_detail(&self, link: &str) -> Result<FilmDetail, EnrichmentError> {
        let body = self.get_page(link).await?;
        Ok(extract::parse_detail(&body))
    }

    /// GET a page and return its body
    async fn get_page(&self, url: &str) -> Result<String, EnrichmentError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(EnrichmentError::NoMatches);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(EnrichmentError::RateLimited);
        }

        if !status.is_success() {
            return Err(EnrichmentError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .text()
            .await
            .map_err(|e| EnrichmentError::Parse(e.to_string()))
    }
}

impl Default for MubiClient {
    fn default() -> Self {
        Self::new()
    }
}
