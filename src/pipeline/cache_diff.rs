//! Cache-diff stage: routes films already known from the last run around
//! the network-bound stages.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::{forward, receive};
use crate::model::{Film, FilmKey};

/// Index of the previous run's films by identity.
pub struct CacheIndex {
    films: HashMap<FilmKey, Film>,
}

impl CacheIndex {
    pub fn new(cached: Vec<Film>) -> Self {
        Self {
            films: cached.into_iter().map(|f| (f.key(), f)).collect(),
        }
    }

    /// An index that matches nothing, so every film is treated as new.
    pub fn empty() -> Self {
        Self {
            films: HashMap::new(),
        }
    }

    /// The cached version of `fresh`, carrying the fresh days left.
    ///
    /// The cached appearance date is kept; a cached film without one takes
    /// the fresh film's.
    pub fn reuse(&self, fresh: &Film) -> Option<Film> {
        let cached = self.films.get(&fresh.key())?;
        let mut film = cached.clone();
        film.days = fresh.days;
        if film.appeared.is_none() {
            film.appeared = fresh.appeared;
        }
        Some(film)
    }
}

/// Send cached films to `reused` and unknown ones to `new`.
pub async fn run(
    index: CacheIndex,
    mut input: mpsc::Receiver<Film>,
    new: mpsc::Sender<Film>,
    reused: mpsc::Sender<Film>,
    token: CancellationToken,
) {
    while let Some(film) = receive(&mut input, &token).await {
        let sent = match index.reuse(&film) {
            Some(cached) => {
                tracing::debug!("{}: using cached data", cached.title);
                forward(&reused, cached, &token).await
            }
            None => {
                tracing::debug!("{}: not found in cached data", film.title);
                forward(&new, film, &token).await
            }
        };
        if !sent {
            return;
        }
    }
}
