//! Secondary rating resolution with an ordered fallback search.
//!
//! The rating source is searched by title and year only, so a response is
//! accepted only when its director matches the one we asked about. Titles and
//! years on MUBI often differ slightly from OMDb's, hence the fallbacks.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::domain::{EnrichmentError, RatingQuery, RatingResponse};
use super::normalize::normalize_name;
use super::traits::RatingSource;
use crate::model::Film;

/// One step of the fallback search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    /// Title, director and year as listed
    Exact,
    /// Alternative title
    AltTitle,
    /// One year earlier
    YearBefore,
    /// One year later
    YearAfter,
    /// Director name without diacritics
    NormalizedDirector,
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Attempt::Exact => "exact",
            Attempt::AltTitle => "alt title",
            Attempt::YearBefore => "year - 1",
            Attempt::YearAfter => "year + 1",
            Attempt::NormalizedDirector => "normalized director",
        };
        f.write_str(name)
    }
}

/// Build the queries to try for a film, in order.
///
/// The alternative title is only tried when the film has one.
pub fn candidate_queries(film: &Film) -> Vec<(Attempt, RatingQuery)> {
    let mut queries = Vec::with_capacity(5);
    queries.push((
        Attempt::Exact,
        RatingQuery::new(&film.title, &film.director, film.year),
    ));
    if !film.alt_title.is_empty() {
        queries.push((
            Attempt::AltTitle,
            RatingQuery::new(&film.alt_title, &film.director, film.year),
        ));
    }
    queries.push((
        Attempt::YearBefore,
        RatingQuery::new(&film.title, &film.director, film.year.saturating_sub(1)),
    ));
    queries.push((
        Attempt::YearAfter,
        RatingQuery::new(&film.title, &film.director, film.year.saturating_add(1)),
    ));
    queries.push((
        Attempt::NormalizedDirector,
        RatingQuery::new(&film.title, normalize_name(&film.director), film.year),
    ));
    queries
}

/// Resolves ratings against a [`RatingSource`], counting every query sent.
pub struct RatingResolver {
    source: Arc<dyn RatingSource>,
    calls: AtomicUsize,
}

impl RatingResolver {
    pub fn new(source: Arc<dyn RatingSource>) -> Self {
        Self {
            source,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of queries sent to the source so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    /// Run the fallback search for a film.
    ///
    /// Returns the first response whose director equals the query's director,
    /// or `NoMatches` when every attempt failed or named another director.
    pub async fn resolve(&self, film: &Film) -> Result<RatingResponse, EnrichmentError> {
        for (attempt, query) in candidate_queries(film) {
            self.calls.fetch_add(1, Ordering::Relaxed);

            match self.source.query(&query).await {
                Ok(response) if response.director == query.director => {
                    tracing::debug!(
                        "{}: rating {} found ({} attempt)",
                        film.title,
                        response.rating,
                        attempt
                    );
                    return Ok(response);
                }
                Ok(response) => {
                    tracing::debug!(
                        "{}: wrong director {:?}, expected {:?} ({} attempt)",
                        film.title,
                        response.director,
                        query.director,
                        attempt
                    );
                }
                Err(e) => {
                    tracing::debug!("{}: {} ({} attempt)", film.title, e, attempt);
                }
            }
        }

        Err(EnrichmentError::NoMatches)
    }

    /// Resolve and store the rating on the film.
    ///
    /// When nothing matches, the rating fields are left untouched.
    pub async fn enrich(&self, film: &mut Film) {
        match self.resolve(film).await {
            Ok(response) => {
                film.imdb_rating = response.rating;
                film.imdb_ratings_num = response.votes;
            }
            Err(e) => {
                tracing::warn!("{}: no IMDb rating: {}", film.title, e);
            }
        }
    }
}
