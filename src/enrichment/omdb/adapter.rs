//! Adapter layer: Convert OMDb DTOs to domain models
//!
//! This is the ONLY place where OMDb DTO types are converted to domain types.

use super::dto;
use crate::enrichment::domain::{EnrichmentError, RatingResponse};

/// Message OMDb uses when a title search has no result
const NOT_FOUND: &str = "Movie not found!";

/// Convert a title search response to a rating
///
/// A found film without a usable rating ("N/A") gets a rating of 0.0.
pub fn to_rating(response: dto::SearchResponse) -> Result<RatingResponse, EnrichmentError> {
    if response.response != "True" {
        return match response.error {
            Some(msg) if msg == NOT_FOUND => Err(EnrichmentError::NoMatches),
            Some(msg) => Err(EnrichmentError::ApiError(msg)),
            None => Err(EnrichmentError::ApiError("Unknown error".to_string())),
        };
    }

    let rating = response
        .imdb_rating
        .as_deref()
        .map(parse_rating)
        .unwrap_or(0.0);

    Ok(RatingResponse {
        rating,
        votes: response.imdb_votes.unwrap_or_default(),
        director: response.director.unwrap_or_default(),
    })
}

fn parse_rating(text: &str) -> f64 {
    text.trim().parse().unwrap_or_else(|_| {
        tracing::debug!("Could not parse IMDb rating {:?} as a number", text);
        0.0
    })
}
