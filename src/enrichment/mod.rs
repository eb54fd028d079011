//! Film enrichment - fetches listing, detail and rating data from external services.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Internal types the pipeline works with
//! - **API DTOs** (`omdb/dto.rs`) - Exact API response shapes
//! - **Adapters / extractors** - Convert DTOs and HTML to domain models
//! - **Clients** - HTTP clients for MUBI and OMDb
//! - **Traits** (`traits.rs`) - Seams the pipeline depends on, mockable in tests
//! - **Rating** - The ordered fallback search for secondary ratings
//!
//! # Usage
//!
//! ```ignore
//! use enrichment::{MubiClient, OmdbClient, RatingResolver};
//!
//! let mubi = MubiClient::new();
//! let listing = mubi.fetch_listing().await?;
//!
//! let resolver = RatingResolver::new(Arc::new(OmdbClient::new(api_key)));
//! resolver.enrich(&mut film).await;
//! ```

pub mod domain;
pub mod mubi;
pub mod normalize;
pub mod omdb;
pub mod rating;
pub mod traits;

pub use domain::{EnrichmentError, ListingRecord, RatingQuery, RatingResponse};
pub use mubi::MubiClient;
pub use normalize::normalize_name;
pub use omdb::OmdbClient;
pub use rating::RatingResolver;
pub use traits::{ContentSource, RatingSource};
