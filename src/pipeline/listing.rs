//! Listing stage: turns raw listing tiles into films.

use chrono::NaiveDate;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::forward;
use crate::enrichment::ListingRecord;
use crate::model::{Film, MAX_FILMS};

const FILM_OF_THE_DAY: &str = "Film of the day";
const EXPIRING: &str = "Expiring at midnight";

/// Parse a remaining-time label into days left, clamped to `[1, max]`.
///
/// "Film of the day" is the newest film (`max`), "Expiring at midnight" the
/// oldest (1); anything else must start with a number ("5 days left").
pub fn parse_days_label(label: &str, max: u32) -> Option<u32> {
    let label = label.trim();
    if label.eq_ignore_ascii_case(FILM_OF_THE_DAY) {
        return Some(max);
    }
    if label.eq_ignore_ascii_case(EXPIRING) {
        return Some(1);
    }
    label
        .split_whitespace()
        .next()?
        .parse::<u32>()
        .ok()
        .map(|days| days.clamp(1, max))
}

/// Split "Country, Year" text.
///
/// The country is the first segment and the year the last, so a
/// co-production "France, Poland, 1993" yields ("France", 1993).
fn split_country_and_year(text: &str) -> (String, Option<i32>) {
    let mut parts = text.split(',').map(str::trim);
    let country = parts.next().unwrap_or_default().to_string();
    let year = parts.next_back().and_then(|y| y.parse().ok());
    (country, year)
}

/// Build a film from a listing tile.
///
/// `position` is the tile's index on the page, used as the days fallback
/// when the label is unreadable. Returns `None` for tiles without a link.
pub fn to_film(record: ListingRecord, position: usize, retrieved: NaiveDate) -> Option<Film> {
    let Some(link) = record.link else {
        tracing::warn!("{}: link for film details could not be found", record.title);
        return None;
    };

    let days = parse_days_label(&record.days_label, MAX_FILMS).unwrap_or_else(|| {
        let fallback = positional_days(position);
        tracing::warn!(
            "{}: unreadable days label {:?}, assuming {}",
            record.title,
            record.days_label,
            fallback
        );
        fallback
    });

    let (country, year) = split_country_and_year(&record.country_and_year);
    if year.is_none() {
        tracing::debug!(
            "{}: no year in {:?}",
            record.title,
            record.country_and_year
        );
    }

    let mut film = Film {
        title: record.title,
        director: record.director,
        country,
        year: year.unwrap_or_default(),
        mubi_link: link,
        days,
        ..Default::default()
    };
    film.abbreviate_country();
    film.set_appeared(retrieved);
    Some(film)
}

/// Days left implied by a tile's position on a well-formed page.
fn positional_days(position: usize) -> u32 {
    let position = u32::try_from(position).unwrap_or(MAX_FILMS);
    MAX_FILMS.saturating_sub(position).clamp(1, MAX_FILMS)
}

/// Emit a film for every usable listing tile, at most `MAX_FILMS`.
pub async fn run(
    records: Vec<ListingRecord>,
    retrieved: NaiveDate,
    out: mpsc::Sender<Film>,
    token: CancellationToken,
) {
    let films = records
        .into_iter()
        .take(MAX_FILMS as usize)
        .enumerate()
        .filter_map(|(position, record)| to_film(record, position, retrieved));

    for film in films {
        if !forward(&out, film, &token).await {
            return;
        }
    }
}
