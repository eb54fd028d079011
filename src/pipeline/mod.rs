//! Catalog acquisition pipeline.
//!
//! Fetches the listing, reuses what the previous run already knows, enriches
//! the rest and caches the result:
//!
//! ```text
//! listing ─▶ cache diff ─┬─▶ details ─▶ ratings ─┬─▶ merge ─▶ cache
//!                        └──────── reused ───────┘
//! ```
//!
//! Every stage is a tokio task connected to the next by a bounded channel.
//! One [`CancellationToken`] stops all of them; each send, receive, delay and
//! network call observes it.

pub mod cache_diff;
pub mod listing;
pub mod merge;

mod details;
mod ratings;

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::cache::{CacheError, CacheStore};
use crate::enrichment::{ContentSource, EnrichmentError, RatingResolver, RatingSource};
use crate::model::{Film, MAX_FILMS, SortKey, is_from_today};

use cache_diff::CacheIndex;

/// Pipeline tuning.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Pause before each detail page request
    pub detail_delay: Duration,
    /// Pause before each film's rating lookups
    ///
    /// Paid once per film, not per query: the fallback queries of one film
    /// go out back to back.
    pub rating_delay: Duration,
    /// Capacity of the channels between stages
    pub capacity: usize,
    /// Serve the cache without any request when it is from today
    pub reuse_same_day_cache: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            detail_delay: Duration::from_secs(3),
            rating_delay: Duration::from_millis(200),
            capacity: MAX_FILMS as usize,
            reuse_same_day_cache: true,
        }
    }
}

/// Errors that abort a pipeline run
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Could not fetch the listing: {0}")]
    Listing(#[from] EnrichmentError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Cancelled")]
    Cancelled,

    #[error("Pipeline worker failed: {0}")]
    Worker(String),
}

/// Acquires the current catalog.
pub struct Pipeline {
    content: Arc<dyn ContentSource>,
    ratings: Option<Arc<dyn RatingSource>>,
    cache: Arc<dyn CacheStore>,
    config: PipelineConfig,
    cancel: CancellationToken,
}

impl Pipeline {
    /// Create a pipeline.
    ///
    /// `ratings` is `None` when no OMDb API key is configured; IMDb ratings
    /// are then left empty.
    pub fn new(
        content: Arc<dyn ContentSource>,
        ratings: Option<Arc<dyn RatingSource>>,
        cache: Arc<dyn CacheStore>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            content,
            ratings,
            cache,
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Token that cancels every current and future run of this pipeline.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Acquire the complete collection.
    ///
    /// With `refresh` the cache is ignored and every film is enriched anew.
    /// Otherwise films found in the cache skip the network-bound stages, and
    /// a cache whose newest film appeared today is returned as is.
    ///
    /// The result is sorted by days left, newest first, and saved to the
    /// cache. Dropping the returned future stops all stage tasks.
    pub async fn acquire(&self, refresh: bool) -> Result<Vec<Film>, PipelineError> {
        let token = self.cancel.child_token();
        let _guard = token.clone().drop_guard();
        if token.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }

        let today = Local::now().date_naive();

        let cached = if refresh {
            None
        } else {
            let cache = self.cache.clone();
            match tokio::task::spawn_blocking(move || cache.load())
                .await
                .map_err(|e| PipelineError::Worker(e.to_string()))?
            {
                Ok(films) => Some(films),
                Err(e) => {
                    tracing::warn!("{}. Could not read cached data, reading from web", e);
                    None
                }
            }
        };

        if self.config.reuse_same_day_cache
            && let Some(films) = &cached
            && is_from_today(films, today)
        {
            tracing::info!("Cached data is from today, skipping the network");
            return Ok(films.clone());
        }

        let records = tokio::select! {
            biased;
            _ = token.cancelled() => return Err(PipelineError::Cancelled),
            listed = self.content.list() => listed?,
        };
        tracing::info!("Listing has {} films", records.len());

        let index = cached.map(CacheIndex::new).unwrap_or_else(CacheIndex::empty);
        let resolver = self
            .ratings
            .clone()
            .map(|source| Arc::new(RatingResolver::new(source)));

        let capacity = self.config.capacity.max(1);
        let (listed_tx, listed_rx) = mpsc::channel(capacity);
        let (new_tx, new_rx) = mpsc::channel(capacity);
        let (reused_tx, reused_rx) = mpsc::channel(capacity);
        let (detailed_tx, detailed_rx) = mpsc::channel(capacity);
        let (rated_tx, rated_rx) = mpsc::channel(capacity);

        let workers = [
            tokio::spawn(listing::run(records, today, listed_tx, token.clone())),
            tokio::spawn(cache_diff::run(
                index,
                listed_rx,
                new_tx,
                reused_tx,
                token.clone(),
            )),
            tokio::spawn(details::run(
                self.content.clone(),
                self.config.detail_delay,
                new_rx,
                detailed_tx,
                token.clone(),
            )),
            tokio::spawn(ratings::run(
                resolver.clone(),
                self.config.rating_delay,
                detailed_rx,
                rated_tx,
                token.clone(),
            )),
        ];

        let merged = merge::collect(rated_rx, reused_rx, &token).await;

        for worker in workers {
            worker
                .await
                .map_err(|e| PipelineError::Worker(e.to_string()))?;
        }

        if let Some(resolver) = &resolver {
            tracing::info!("OMDb API called {} times", resolver.calls());
        }

        let Some(mut films) = merged else {
            tracing::info!("Pipeline cancelled");
            return Err(PipelineError::Cancelled);
        };

        SortKey::default().apply(&mut films);
        let cache = self.cache.clone();
        let films = tokio::task::spawn_blocking(move || cache.save(&films).map(|()| films))
            .await
            .map_err(|e| PipelineError::Worker(e.to_string()))??;
        Ok(films)
    }
}

/// Send a film downstream. Returns `false` when cancelled or the receiver is gone.
async fn forward(tx: &mpsc::Sender<Film>, film: Film, token: &CancellationToken) -> bool {
    tokio::select! {
        biased;
        _ = token.cancelled() => false,
        sent = tx.send(film) => sent.is_ok(),
    }
}

/// Receive the next film, or `None` when the sender is done or cancelled.
async fn receive(rx: &mut mpsc::Receiver<Film>, token: &CancellationToken) -> Option<Film> {
    tokio::select! {
        biased;
        _ = token.cancelled() => None,
        film = rx.recv() => film,
    }
}

/// Wait `delay`. Returns `false` when cancelled first.
async fn pause(delay: Duration, token: &CancellationToken) -> bool {
    if delay.is_zero() {
        return !token.is_cancelled();
    }
    tokio::select! {
        biased;
        _ = token.cancelled() => false,
        _ = tokio::time::sleep(delay) => true,
    }
}
