//! Rating stage: resolves the IMDb rating of each new film.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::{forward, pause, receive};
use crate::enrichment::RatingResolver;
use crate::model::Film;

/// Resolve ratings of every incoming film.
///
/// Without a resolver (no API key) films pass through untouched and no
/// request is made.
pub async fn run(
    resolver: Option<Arc<RatingResolver>>,
    delay: Duration,
    mut input: mpsc::Receiver<Film>,
    out: mpsc::Sender<Film>,
    token: CancellationToken,
) {
    if resolver.is_none() {
        tracing::info!("No OMDb API key, skipping IMDb ratings");
    }

    while let Some(mut film) = receive(&mut input, &token).await {
        if let Some(resolver) = &resolver {
            if !pause(delay, &token).await {
                return;
            }
            tokio::select! {
                biased;
                _ = token.cancelled() => return,
                _ = resolver.enrich(&mut film) => {}
            }
        }

        if !forward(&out, film, &token).await {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::RatingQuery;
    use crate::enrichment::traits::mocks::MockRatings;
    use crate::test_utils::film;

    #[tokio::test]
    async fn test_run_without_resolver_passes_through() {
        let (in_tx, in_rx) = mpsc::channel(2);
        let (out_tx, mut out_rx) = mpsc::channel(2);
        in_tx.send(film("A", "B", 3)).await.unwrap();
        drop(in_tx);

        run(None, Duration::ZERO, in_rx, out_tx, CancellationToken::new()).await;

        let passed = out_rx.recv().await.unwrap();
        assert_eq!(passed.imdb_rating, 0.0);
        assert!(out_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_run_sets_rating() {
        let source = Arc::new(MockRatings::no_matches().respond(
            RatingQuery::new("A", "B", 2000),
            6.6,
            "321",
            "B",
        ));
        let resolver = Arc::new(RatingResolver::new(source));
        let (in_tx, in_rx) = mpsc::channel(2);
        let (out_tx, mut out_rx) = mpsc::channel(2);
        in_tx.send(film("A", "B", 3)).await.unwrap();
        drop(in_tx);

        run(
            Some(resolver.clone()),
            Duration::ZERO,
            in_rx,
            out_tx,
            CancellationToken::new(),
        )
        .await;

        let rated = out_rx.recv().await.unwrap();
        assert_eq!(rated.imdb_rating, 6.6);
        assert_eq!(rated.imdb_ratings_num, "321");
        assert_eq!(resolver.calls(), 1);
    }
}
