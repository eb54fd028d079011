//! Core data model for the film catalog.
//!
//! Defines [`Film`], one entry of the "Now Showing" catalog, together with the
//! helpers the pipeline and the CLI use on collections of films.
//!
//! # Cache file format
//!
//! A film serializes to the JSON object stored in `mubi.json`. Field names are
//! kept stable for compatibility with caches written by earlier versions:
//! numbers are encoded as strings (`"year": "1979"`), and the reader also
//! accepts bare JSON numbers.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of films available on the catalog at any time.
pub const MAX_FILMS: u32 = 30;

/// A film on the catalog.
///
/// `title` and `director` form the identity used to match a freshly listed
/// film against the cached collection (see [`Film::key`]).
///
/// The IMDb fields stay at zero/empty until a rating is resolved. A zero
/// `imdb_rating` therefore means either "not resolved" or "resolved as 0.0";
/// the two are not distinguished.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub title: String,
    pub director: String,
    pub country: String,
    #[serde(with = "string_number")]
    pub year: i32,
    pub genre: String,
    #[serde(with = "string_number")]
    pub mins: u32,
    #[serde(rename = "alt title")]
    pub alt_title: String,
    #[serde(rename = "MUBI link")]
    pub mubi_link: String,
    #[serde(rename = "MUBI rating", with = "string_number")]
    pub mubi_rating: f64,
    #[serde(rename = "MUBI ratings num")]
    pub mubi_ratings_num: String,
    #[serde(rename = "IMDB rating", with = "string_number")]
    pub imdb_rating: f64,
    #[serde(rename = "IMDB ratings num")]
    pub imdb_ratings_num: String,
    /// Days left on the catalog; the pipeline's priority index.
    #[serde(with = "string_number")]
    pub days: u32,
    /// Date the film joined the catalog, derived from `days` at listing time.
    #[serde(default, with = "appeared_date", skip_serializing_if = "Option::is_none")]
    pub appeared: Option<NaiveDate>,
}

/// Identity of a film within one collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilmKey {
    pub title: String,
    pub director: String,
}

/// Descriptive fields fetched from a film's detail page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilmDetail {
    pub genre: String,
    pub alt_title: String,
    /// Running time; `None` when the page did not expose a parsable value
    pub mins: Option<u32>,
    pub rating: f64,
    pub ratings_num: String,
}

impl Film {
    /// Identity key used for cache matching and de-duplication.
    pub fn key(&self) -> FilmKey {
        FilmKey {
            title: self.title.clone(),
            director: self.director.clone(),
        }
    }

    /// Abbreviate long names of selected countries.
    pub fn abbreviate_country(&mut self) {
        let short = match self.country.as_str() {
            "United States" => "USA",
            "United Kingdom" => "UK",
            "Soviet Union" => "USSR",
            "South Africa" => "RSA",
            _ => return,
        };
        self.country = short.to_string();
    }

    /// Copy detail page fields into this film.
    ///
    /// An absent running time leaves `mins` untouched.
    pub fn apply_detail(&mut self, detail: FilmDetail) {
        self.genre = detail.genre;
        self.alt_title = detail.alt_title;
        if let Some(mins) = detail.mins {
            self.mins = mins;
        }
        self.mubi_rating = detail.rating;
        self.mubi_ratings_num = detail.ratings_num;
    }

    /// Derive the appearance date from `days` and the listing retrieval date.
    ///
    /// A film with `MAX_FILMS` days left appeared on the retrieval date itself.
    pub fn set_appeared(&mut self, retrieved: NaiveDate) {
        let back = MAX_FILMS.saturating_sub(self.days.min(MAX_FILMS));
        self.appeared = retrieved.checked_sub_days(Days::new(u64::from(back)));
    }
}

/// Find the film with the given number of days left.
pub fn find_by_days(days: u32, films: &[Film]) -> Option<&Film> {
    films.iter().find(|f| f.days == days)
}

/// Whether the newest film of a cached collection appeared on `today`.
///
/// A collection whose film-of-the-day was listed today cannot have changed
/// since, so it can be served without touching the network.
pub fn is_from_today(films: &[Film], today: NaiveDate) -> bool {
    find_by_days(MAX_FILMS, films)
        .and_then(|f| f.appeared)
        .is_some_and(|d| d == today)
}

// ============================================================================
// Sorting
// ============================================================================

/// Column a film collection can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Days,
    Mubi,
    Imdb,
    Mins,
    Year,
}

/// Sort order requested on the command line, e.g. `imdb` or `year-`.
///
/// Films are sorted in descending order; a trailing `-` reverses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortKey {
    pub field: SortField,
    pub reversed: bool,
}

impl SortKey {
    /// Sort films in place.
    pub fn apply(&self, films: &mut [Film]) {
        let cmp: fn(&Film, &Film) -> Ordering = match self.field {
            SortField::Days => |a, b| b.days.cmp(&a.days),
            SortField::Mubi => |a, b| b.mubi_rating.total_cmp(&a.mubi_rating),
            SortField::Imdb => |a, b| b.imdb_rating.total_cmp(&a.imdb_rating),
            SortField::Mins => |a, b| b.mins.cmp(&a.mins),
            SortField::Year => |a, b| b.year.cmp(&a.year),
        };
        films.sort_by(cmp);
        if self.reversed {
            films.reverse();
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, reversed) = match s.strip_suffix('-') {
            Some(name) => (name, true),
            None => (s, false),
        };
        let field = match name {
            "days" => SortField::Days,
            "mubi" => SortField::Mubi,
            "imdb" => SortField::Imdb,
            "mins" => SortField::Mins,
            "year" => SortField::Year,
            other => {
                return Err(format!(
                    "undefined sort parameter '{other}', expected one of: days, mubi, imdb, mins, year"
                ));
            }
        };
        Ok(Self { field, reversed })
    }
}

// ============================================================================
// Serde helpers
// ============================================================================

/// Numbers stored as JSON strings, e.g. `"year": "1979"`.
///
/// Deserialization also accepts a bare JSON number.
mod string_number {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer, Serializer, de};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let text = match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s,
            Raw::Int(n) => n.to_string(),
            Raw::Float(f) => f.to_string(),
        };
        text.trim()
            .parse()
            .map_err(|e| de::Error::custom(format!("invalid number {text:?}: {e}")))
    }
}

/// `YYYY-M-D` dates without zero padding; an empty string means "absent".
mod appeared_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de};

    const WRITE_FORMAT: &str = "%Y-%-m-%-d";
    const READ_FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.collect_str(&date.format(WRITE_FORMAT)),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let text = String::deserialize(deserializer)?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(text.trim(), READ_FORMAT)
            .map(Some)
            .map_err(|e| de::Error::custom(format!("invalid date {text:?}: {e}")))
    }
}
