//! Test utilities and fixtures for mubi-parser tests.
//!
//! This module provides film and listing fixtures and an in-memory cache
//! store to reduce boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use mubi_parser::test_utils::{film, listing_record, MemoryCache};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let cache = MemoryCache::with_films(vec![film("Stalker", "Andrei Tarkovsky", 30)]);
//!     // ... test logic
//! }
//! ```

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::cache::{CacheError, CacheStore};
use crate::enrichment::ListingRecord;
use crate::model::{Film, FilmDetail};

/// Link a fixture film is served under.
pub fn link_for(title: &str) -> String {
    let slug: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();
    format!("https://mubi.com/films/{slug}")
}

/// Creates a fully populated film as the pipeline would cache it.
///
/// Customize using struct update syntax:
///
/// ```ignore
/// let f = Film { imdb_rating: 7.5, ..film("Title", "Director", 12) };
/// ```
pub fn film(title: &str, director: &str, days: u32) -> Film {
    Film {
        title: title.to_string(),
        director: director.to_string(),
        country: "France".to_string(),
        year: 2000,
        genre: "Drama".to_string(),
        mins: 100,
        mubi_link: link_for(title),
        mubi_rating: 7.0,
        mubi_ratings_num: "1,000".to_string(),
        days,
        ..Default::default()
    }
}

/// Creates a listing tile for a film released in France in 2000.
pub fn listing_record(title: &str, director: &str, days_label: &str) -> ListingRecord {
    ListingRecord {
        title: title.to_string(),
        director: director.to_string(),
        country_and_year: "France, 2000".to_string(),
        link: Some(link_for(title)),
        days_label: days_label.to_string(),
    }
}

/// Creates a detail page result.
pub fn detail(genre: &str, mins: u32, rating: f64) -> FilmDetail {
    FilmDetail {
        genre: genre.to_string(),
        alt_title: String::new(),
        mins: Some(mins),
        rating,
        ratings_num: "2,500".to_string(),
    }
}

/// In-memory cache store.
///
/// Starts empty (loading fails as if the file did not exist) unless created
/// with [`MemoryCache::with_films`].
#[derive(Default)]
pub struct MemoryCache {
    films: Mutex<Option<Vec<Film>>>,
    fail_save: bool,
    saves: AtomicUsize,
}

impl MemoryCache {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_films(films: Vec<Film>) -> Self {
        Self {
            films: Mutex::new(Some(films)),
            ..Default::default()
        }
    }

    /// Make every save fail.
    pub fn failing_save(mut self) -> Self {
        self.fail_save = true;
        self
    }

    /// The currently stored collection.
    pub fn stored(&self) -> Option<Vec<Film>> {
        self.films.lock().unwrap().clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl CacheStore for MemoryCache {
    fn load(&self) -> Result<Vec<Film>, CacheError> {
        self.films.lock().unwrap().clone().ok_or_else(|| {
            CacheError::Read(
                "memory".into(),
                std::io::Error::from(std::io::ErrorKind::NotFound),
            )
        })
    }

    fn save(&self, films: &[Film]) -> Result<(), CacheError> {
        if self.fail_save {
            return Err(CacheError::Write(
                "memory".into(),
                std::io::Error::other("disk full"),
            ));
        }
        *self.films.lock().unwrap() = Some(films.to_vec());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_for() {
        assert_eq!(link_for("Three Colours: Blue"), "https://mubi.com/films/three-colours--blue");
    }

    #[test]
    fn test_memory_cache() {
        let cache = MemoryCache::empty();
        assert!(cache.load().is_err());

        cache.save(&[film("A", "B", 1)]).unwrap();
        assert_eq!(cache.load().unwrap().len(), 1);
        assert_eq!(cache.save_count(), 1);

        let failing = MemoryCache::empty().failing_save();
        assert!(failing.save(&[]).is_err());
        assert_eq!(failing.stored(), None);
    }
}
