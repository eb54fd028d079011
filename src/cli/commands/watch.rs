//! Open a film's MUBI page in the default browser.

use super::open_cache;
use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::{Error, Result, ResultExt};
use crate::model::{Film, find_by_days};

/// Open the cached film with `days` days left
pub fn cmd_watch(config: &Config, days: u32) -> Result<()> {
    let films = open_cache(config)?
        .load()
        .with_context("reading cached films")?;
    let film = film_to_watch(days, &films)?;

    println!("Opening {} ({})", film.title, film.mubi_link);
    webbrowser::open(&film.mubi_link).map_err(|e| Error::browser(e.to_string()))
}

fn film_to_watch(days: u32, films: &[Film]) -> Result<&Film> {
    let film = find_by_days(days, films)
        .ok_or_else(|| Error::not_found(format!("film with {days} days left")))?;
    if film.mubi_link.is_empty() {
        return Err(Error::not_found(format!("link of {}", film.title)));
    }
    Ok(film)
}
