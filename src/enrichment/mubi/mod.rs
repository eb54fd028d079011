//! MUBI "Now Showing" integration
//!
//! Scrapes the catalog listing and the per-film pages. There is no API;
//! the client fetches HTML and `extract` turns it into domain types.

mod client;
pub mod extract;

pub use client::MubiClient;
