//! Detail stage: fetches each new film's page, paced by a fixed delay.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::{forward, pause, receive};
use crate::enrichment::ContentSource;
use crate::model::Film;

/// Fill in detail fields of every incoming film.
///
/// A failed fetch is logged and the film is forwarded unchanged.
pub async fn run(
    source: Arc<dyn ContentSource>,
    delay: Duration,
    mut input: mpsc::Receiver<Film>,
    out: mpsc::Sender<Film>,
    token: CancellationToken,
) {
    while let Some(mut film) = receive(&mut input, &token).await {
        if !pause(delay, &token).await {
            return;
        }

        let fetched = tokio::select! {
            biased;
            _ = token.cancelled() => return,
            fetched = source.detail(&film.mubi_link) => fetched,
        };

        match fetched {
            Ok(detail) => {
                tracing::debug!("{}: details fetched", film.title);
                film.apply_detail(detail);
            }
            Err(e) => tracing::warn!("{}: could not fetch details: {}", film.title, e),
        }

        if !forward(&out, film, &token).await {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::traits::mocks::MockContent;
    use crate::test_utils::{detail, film, link_for};

    #[tokio::test]
    async fn test_run_applies_details_and_keeps_failures() {
        let source = Arc::new(MockContent::default().with_detail(&link_for("Found"), detail("Horror", 95, 6.4)));
        let (in_tx, in_rx) = mpsc::channel(4);
        let (out_tx, mut out_rx) = mpsc::channel(4);

        let bare = |title: &str| Film {
            genre: String::new(),
            mubi_rating: 0.0,
            ..film(title, "D", 5)
        };
        in_tx.send(bare("Found")).await.unwrap();
        in_tx.send(bare("Missing")).await.unwrap();
        drop(in_tx);

        run(source.clone(), Duration::ZERO, in_rx, out_tx, CancellationToken::new()).await;

        let found = out_rx.recv().await.unwrap();
        assert_eq!(found.genre, "Horror");
        assert_eq!(found.mins, 95);
        assert_eq!(found.mubi_rating, 6.4);

        let missing = out_rx.recv().await.unwrap();
        assert_eq!(missing.title, "Missing");
        assert!(missing.genre.is_empty());

        assert!(out_rx.recv().await.is_none());
        assert_eq!(source.detail_count(), 2);
    }

    #[tokio::test]
    async fn test_cancel_interrupts_delay() {
        let source = Arc::new(MockContent::default());
        let (in_tx, in_rx) = mpsc::channel(1);
        let (out_tx, mut out_rx) = mpsc::channel(1);
        in_tx.send(film("Slow", "D", 5)).await.unwrap();

        let token = CancellationToken::new();
        let worker = tokio::spawn(run(
            source.clone(),
            Duration::from_secs(3600),
            in_rx,
            out_tx,
            token.clone(),
        ));
        token.cancel();

        tokio::time::timeout(Duration::from_secs(5), worker)
            .await
            .expect("worker should stop promptly")
            .unwrap();
        assert!(out_rx.recv().await.is_none());
        assert_eq!(source.detail_count(), 0);
    }
}
