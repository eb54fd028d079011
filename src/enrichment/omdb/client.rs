//! OMDb HTTP client
//!
//! Handles communication with the OMDb web service.
//! See: https://www.omdbapi.com/
//!
//! ## API Quirks
//!
//! OMDb answers "not found" and "invalid key" with HTTP 200 and a JSON body
//! whose `Response` is `"False"`. Status codes are still checked for proxies
//! and the daily request limit (HTTP 401 on the free tier).

use super::{adapter, dto};
use crate::enrichment::domain::{EnrichmentError, RatingQuery, RatingResponse};

/// OMDb API client
pub struct OmdbClient {
    api_key: String,
    http_client: reqwest::Client,
    base_url: String,
}

impl OmdbClient {
    /// Create a new client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, "https://www.omdbapi.com/")
    }

    /// Create a client against a different endpoint
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            api_key: api_key.into(),
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Search a film by title and year
    ///
    /// The director is not sent; callers compare it against the answer.
    pub async fn lookup(&self, query: &RatingQuery) -> Result<RatingResponse, EnrichmentError> {
        let response = self.send_search_request(query).await?;
        adapter::to_rating(response)
    }

    fn search_url(&self, query: &RatingQuery) -> String {
        format!(
            "{}?t={}&y={}&type=movie&apikey={}",
            self.base_url,
            urlencoding::encode(&query.title),
            query.year,
            urlencoding::encode(&self.api_key)
        )
    }

    /// Send the HTTP request and parse the response
    async fn send_search_request(
        &self,
        query: &RatingQuery,
    ) -> Result<dto::SearchResponse, EnrichmentError> {
        let response = self
            .http_client
            .get(self.search_url(query))
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(EnrichmentError::RateLimited);
        }

        if !status.is_success() {
            // OMDb reports key problems as JSON even on error statuses
            if let Ok(body) = response.json::<dto::SearchResponse>().await
                && let Some(error) = body.error
            {
                return Err(EnrichmentError::ApiError(error));
            }
            return Err(EnrichmentError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json::<dto::SearchResponse>()
            .await
            .map_err(|e| EnrichmentError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OmdbClient::new("secret");
        assert_eq!(client.base_url, "https://www.omdbapi.com/");
        assert_eq!(client.api_key, "secret");
    }

    #[test]
    fn test_search_url_encodes_title() {
        let client = OmdbClient::with_base_url("k&y", "http://localhost:8080/");
        let url = client.search_url(&RatingQuery::new("Three Colours: Blue", "K", 1993));

        assert_eq!(
            url,
            "http://localhost:8080/?t=Three%20Colours%3A%20Blue&y=1993&type=movie&apikey=k%26y"
        );
    }
}
