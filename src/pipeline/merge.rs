//! Merge stage: fans the enriched and reused branches into one collection.

use std::collections::HashSet;
use std::pin::pin;

use futures::{Stream, StreamExt, stream};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::model::Film;

/// Convert a channel receiver to a stream
fn receiver_stream(rx: mpsc::Receiver<Film>) -> impl Stream<Item = Film> {
    stream::unfold(rx, |mut rx| async move { rx.recv().await.map(|film| (film, rx)) })
}

/// Collect films from both branches until both are closed.
///
/// Whichever branch has a film ready is read first, so the result has no
/// particular order. A second film with an already collected identity is
/// dropped. Returns `None` when cancelled.
pub async fn collect(
    enriched: mpsc::Receiver<Film>,
    reused: mpsc::Receiver<Film>,
    token: &CancellationToken,
) -> Option<Vec<Film>> {
    let mut merged = pin!(stream::select(
        receiver_stream(enriched),
        receiver_stream(reused)
    ));
    let mut seen = HashSet::new();
    let mut films = Vec::new();

    loop {
        let next = tokio::select! {
            biased;
            _ = token.cancelled() => return None,
            next = merged.next() => next,
        };

        match next {
            Some(film) if seen.insert(film.key()) => films.push(film),
            Some(film) => tracing::warn!("{}: duplicate film dropped", film.title),
            None => return Some(films),
        }
    }
}
