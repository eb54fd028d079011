//! OMDb API Data Transfer Objects
//!
//! These types match what the OMDb title search returns.
//! DO NOT use these types outside the omdb module - convert to domain types.
//!
//! Only the fields we read are declared; serde ignores the rest.

use serde::{Deserialize, Serialize};

/// Title search response (`?t=...`)
///
/// On failure OMDb still answers HTTP 200 with `Response: "False"` and an
/// `Error` message, so every field except `Response` may be absent.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchResponse {
    /// "True" or "False"
    #[serde(rename = "Response")]
    pub response: String,
    /// Error message when `response` is "False"
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
    /// Rating as text, e.g. "7.9" or "N/A"
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
    /// Vote count as text, e.g. "105,230"
    #[serde(rename = "imdbVotes", default)]
    pub imdb_votes: Option<String>,
    /// Comma separated director names
    #[serde(rename = "Director", default)]
    pub director: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_found() {
        let json = r#"{
            "Title": "Three Colors: Blue",
            "Year": "1993",
            "Director": "Krzysztof Kieslowski",
            "imdbRating": "7.9",
            "imdbVotes": "105,230",
            "imdbID": "tt0108394",
            "Type": "movie",
            "Response": "True"
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.response, "True");
        assert_eq!(response.imdb_rating.as_deref(), Some("7.9"));
        assert_eq!(response.imdb_votes.as_deref(), Some("105,230"));
        assert_eq!(response.director.as_deref(), Some("Krzysztof Kieslowski"));
        assert!(response.error.is_none());
    }

    #[test]
    fn test_parse_not_found() {
        let json = r#"{"Response":"False","Error":"Movie not found!"}"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.response, "False");
        assert_eq!(response.error.as_deref(), Some("Movie not found!"));
        assert!(response.imdb_rating.is_none());
    }
}
