//! MUBI markup extraction
//!
//! Converts the "Now Showing" listing page and film detail pages into domain
//! types. Selectors track MUBI's current class names; when MUBI changes its
//! markup, this is the only file that should need updating.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::enrichment::domain::ListingRecord;
use crate::model::FilmDetail;

// Listing page
static FILM_TILE: LazyLock<Selector> =
    LazyLock::new(|| selector(".full-width-tile--now-showing, .showing-page-hero-tile"));
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| selector(".full-width-tile__title, .showing-page-hero-tile__title"));
static LINK: LazyLock<Selector> =
    LazyLock::new(|| selector(".full-width-tile__link, .showing-page-hero-tile__link"));
static DAYS_LEFT: LazyLock<Selector> = LazyLock::new(|| {
    selector(".showing-page-hero-tile__fotd-label, .full-width-tile__days-left")
});
static DIRECTOR: LazyLock<Selector> = LazyLock::new(|| selector("[itemprop=name]"));
static COUNTRY_AND_YEAR: LazyLock<Selector> =
    LazyLock::new(|| selector(".now-showing-tile-director-year__year-country"));

// Film page
static GENRE: LazyLock<Selector> = LazyLock::new(|| selector(".film-show__genres"));
static ALT_TITLE: LazyLock<Selector> = LazyLock::new(|| selector(".film-show__titles__title-alt"));
static RATING: LazyLock<Selector> = LazyLock::new(|| selector(".average-rating__overall"));
static RATINGS_NUM: LazyLock<Selector> = LazyLock::new(|| selector(".average-rating__total"));
static MINS: LazyLock<Selector> = LazyLock::new(|| selector("[itemprop=duration]"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid CSS")
}

/// Text content of the first element matching `sel` below `root`, trimmed.
fn first_text(root: ElementRef<'_>, sel: &Selector) -> String {
    root.select(sel)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Extract every film tile from the listing page.
///
/// Relative links are resolved against `base_url`.
pub fn parse_listing(html: &str, base_url: &str) -> Vec<ListingRecord> {
    let doc = Html::parse_document(html);

    doc.select(&FILM_TILE)
        .map(|tile| ListingRecord {
            title: first_text(tile, &TITLE),
            director: first_text(tile, &DIRECTOR),
            country_and_year: first_text(tile, &COUNTRY_AND_YEAR),
            link: tile
                .select(&LINK)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(|href| absolute_link(base_url, href)),
            days_label: first_text(tile, &DAYS_LEFT),
        })
        .collect()
}

/// Extract descriptive fields from a film page.
///
/// Unparsable numbers are logged; the rating falls back to 0.0 and the
/// running time to `None`.
pub fn parse_detail(html: &str) -> FilmDetail {
    let doc = Html::parse_document(html);
    let root = doc.root_element();

    let rating_text = first_text(root, &RATING);
    let rating = rating_text.parse::<f64>().unwrap_or_else(|e| {
        tracing::debug!("Unparsable MUBI rating {:?}: {}", rating_text, e);
        0.0
    });

    let mins_text = first_text(root, &MINS);
    let mins = match mins_text.parse::<u32>() {
        Ok(mins) => Some(mins),
        Err(e) => {
            tracing::debug!("Unparsable running time {:?}: {}", mins_text, e);
            None
        }
    };

    FilmDetail {
        genre: first_text(root, &GENRE),
        alt_title: first_text(root, &ALT_TITLE),
        mins,
        rating,
        ratings_num: ratings_count(&first_text(root, &RATINGS_NUM)),
    }
}

/// Strip the "Ratings" label around the count, e.g. "12,345 Ratings" -> "12,345".
fn ratings_count(raw: &str) -> String {
    raw.trim_matches(|c: char| "Ratings\n".contains(c))
        .trim()
        .to_string()
}

fn absolute_link(base_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!("{}{}", base_url.trim_end_matches('/'), href)
    }
}
