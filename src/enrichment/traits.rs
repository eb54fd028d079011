//! Trait definitions for external sources.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses [`MubiClient`](super::mubi::MubiClient) and
//! [`OmdbClient`](super::omdb::OmdbClient), while tests substitute the mock
//! implementations below.
//!
//! # Example
//!
//! ```ignore
//! use mubi_parser::enrichment::traits::RatingSource;
//!
//! async fn rate<R: RatingSource + ?Sized>(source: &R, q: &RatingQuery) {
//!     let response = source.query(q).await?;
//! }
//! ```

use async_trait::async_trait;

use super::domain::{EnrichmentError, ListingRecord, RatingQuery, RatingResponse};
use crate::model::FilmDetail;

/// Provider of the catalog listing and per-film detail pages.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the current listing page.
    async fn list(&self) -> Result<Vec<ListingRecord>, EnrichmentError>;

    /// Fetch the detail page of one film.
    async fn detail(&self, link: &str) -> Result<FilmDetail, EnrichmentError>;
}

/// Provider of secondary ratings.
#[async_trait]
pub trait RatingSource: Send + Sync {
    /// Look up a rating by title, director and year.
    async fn query(&self, query: &RatingQuery) -> Result<RatingResponse, EnrichmentError>;
}

// Implement traits for real clients

#[async_trait]
impl ContentSource for super::mubi::MubiClient {
    async fn list(&self) -> Result<Vec<ListingRecord>, EnrichmentError> {
        self.fetch_listing().await
    }

    async fn detail(&self, link: &str) -> Result<FilmDetail, EnrichmentError> {
        self.fetch_detail(link).await
    }
}

#[async_trait]
impl RatingSource for super::omdb::OmdbClient {
    async fn query(&self, query: &RatingQuery) -> Result<RatingResponse, EnrichmentError> {
        self.lookup(query).await
    }
}

/// Mock sources for testing.
///
/// Both mocks record the calls they receive so tests can assert on the
/// order and number of network requests the pipeline would have made.
#[cfg(test)]
pub mod mocks {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;

    /// Mock content source serving a fixed listing and detail pages.
    #[derive(Default)]
    pub struct MockContent {
        /// Listing to return
        pub listing: Vec<ListingRecord>,
        /// Error to return from `list` (takes precedence over listing)
        pub list_error: Option<EnrichmentError>,
        /// Detail pages by link; unknown links fail with `NoMatches`
        pub details: HashMap<String, FilmDetail>,
        /// Artificial latency of each detail request
        pub detail_latency: Duration,
        /// Links requested via `detail`, in order
        pub detail_calls: Mutex<Vec<String>>,
    }

    impl MockContent {
        /// Create a mock serving the given listing with no detail pages.
        pub fn with_listing(listing: Vec<ListingRecord>) -> Self {
            Self {
                listing,
                ..Default::default()
            }
        }

        /// Create a mock whose listing request fails.
        pub fn with_list_error(error: EnrichmentError) -> Self {
            Self {
                list_error: Some(error),
                ..Default::default()
            }
        }

        /// Add a detail page.
        pub fn with_detail(mut self, link: &str, detail: FilmDetail) -> Self {
            self.details.insert(link.to_string(), detail);
            self
        }

        /// Number of detail requests made so far.
        pub fn detail_count(&self) -> usize {
            self.detail_calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ContentSource for MockContent {
        async fn list(&self) -> Result<Vec<ListingRecord>, EnrichmentError> {
            if let Some(ref err) = self.list_error {
                return Err(err.clone());
            }
            Ok(self.listing.clone())
        }

        async fn detail(&self, link: &str) -> Result<FilmDetail, EnrichmentError> {
            self.detail_calls.lock().unwrap().push(link.to_string());
            if !self.detail_latency.is_zero() {
                tokio::time::sleep(self.detail_latency).await;
            }
            self.details
                .get(link)
                .cloned()
                .ok_or(EnrichmentError::NoMatches)
        }
    }

    /// Mock rating source answering from a table of known queries.
    #[derive(Default)]
    pub struct MockRatings {
        /// Responses by query; unknown queries fail with `NoMatches`
        pub responses: Vec<(RatingQuery, RatingResponse)>,
        /// Queries received, in order
        pub calls: Mutex<Vec<RatingQuery>>,
        /// Artificial latency of each query
        pub latency: Duration,
    }

    impl MockRatings {
        /// Create a mock that never finds anything.
        pub fn no_matches() -> Self {
            Self::default()
        }

        /// Answer `query` with the given rating, votes and responded director.
        pub fn respond(
            mut self,
            query: RatingQuery,
            rating: f64,
            votes: &str,
            director: &str,
        ) -> Self {
            self.responses.push((
                query,
                RatingResponse {
                    rating,
                    votes: votes.to_string(),
                    director: director.to_string(),
                },
            ));
            self
        }

        /// Queries received so far.
        pub fn received(&self) -> Vec<RatingQuery> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RatingSource for MockRatings {
        async fn query(&self, query: &RatingQuery) -> Result<RatingResponse, EnrichmentError> {
            self.calls.lock().unwrap().push(query.clone());
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            self.responses
                .iter()
                .find(|(q, _)| q == query)
                .map(|(_, r)| r.clone())
                .ok_or(EnrichmentError::NoMatches)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_content_list_error() {
            let mock = MockContent::with_list_error(EnrichmentError::Network("down".to_string()));
            let result = mock.list().await;
            assert!(matches!(result, Err(EnrichmentError::Network(_))));
        }

        #[tokio::test]
        async fn test_mock_content_records_detail_calls() {
            let mock = MockContent::default().with_detail("https://mubi.com/films/a", FilmDetail::default());

            assert!(mock.detail("https://mubi.com/films/a").await.is_ok());
            assert!(mock.detail("https://mubi.com/films/b").await.is_err());
            assert_eq!(mock.detail_count(), 2);
        }

        #[tokio::test]
        async fn test_mock_ratings_answers_known_query() {
            let q = RatingQuery::new("Stalker", "Andrei Tarkovsky", 1979);
            let mock = MockRatings::no_matches().respond(q.clone(), 8.1, "140,000", "Andrei Tarkovsky");

            let response = mock.query(&q).await.unwrap();
            assert_eq!(response.rating, 8.1);
            assert!(
                mock.query(&RatingQuery::new("Solaris", "Andrei Tarkovsky", 1972))
                    .await
                    .is_err()
            );
            assert_eq!(mock.received().len(), 2);
        }
    }
}
