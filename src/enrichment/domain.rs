//! Internal domain models for listing, detail, and rating lookups.
//!
//! These types are OUR types - they don't change when MUBI's markup or the
//! OMDb response shape changes. Clients convert what they receive into them.

/// One film tile as found on the listing page, before any interpretation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingRecord {
    pub title: String,
    pub director: String,
    /// Raw "Country, Year" text
    pub country_and_year: String,
    /// Absolute link to the film page, if the tile had one
    pub link: Option<String>,
    /// Raw remaining-time label, e.g. "5 days left" or "Film of the day"
    pub days_label: String,
}

/// A secondary rating lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingQuery {
    pub title: String,
    pub director: String,
    pub year: i32,
}

impl RatingQuery {
    pub fn new(title: impl Into<String>, director: impl Into<String>, year: i32) -> Self {
        Self {
            title: title.into(),
            director: director.into(),
            year,
        }
    }
}

/// What the rating source answered for a query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingResponse {
    /// Average rating; 0.0 when the source had none
    pub rating: f64,
    /// Vote count as formatted by the source, e.g. "105,230"
    pub votes: String,
    /// Director of the film the source matched
    pub director: String,
}

/// Errors that can occur while talking to a content or rating source
#[derive(Debug, Clone, thiserror::Error)]
pub enum EnrichmentError {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("No matches found")]
    NoMatches,

    #[error("Rate limited - try again later")]
    RateLimited,
}
