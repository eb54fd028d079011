//! OMDb API integration
//!
//! Provides the secondary (IMDb) rating of a film, looked up by title,
//! director and year. Requires an API key.
//!
//! API docs: https://www.omdbapi.com/

pub mod dto;
mod adapter;
mod client;

pub use adapter::to_rating;
pub use client::OmdbClient;
