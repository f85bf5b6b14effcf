//! Simplecast API integration
//!
//! # Architecture
//!
//! - **Domain models** (`domain.rs`) - Our types: `Podcast`, `Episode`, `Season`
//! - **API DTOs** (`dto.rs`) - Exact API response shapes
//! - **Adapter** (`adapter.rs`) - Converts DTOs to domain models
//! - **Client** (`client.rs`) - Authenticated HTTP client
//!
//! Domain records become camelCased node fields via `to_fields()`.
//!
//! # Usage
//!
//! ```ignore
//! use simplecast_source::simplecast::{SimplecastClient, FetchLimit};
//!
//! let client = SimplecastClient::new(token, podcast_id)?;
//! let (podcast, episodes) = tokio::join!(
//!     client.fetch_podcast(),
//!     client.fetch_episodes(FetchLimit::default()),
//! );
//! ```

mod adapter;
mod client;
pub mod domain;
pub mod dto;

pub use client::{BASE_URL, ClientOptions, DEFAULT_TIMEOUT, SimplecastClient, join_url, unslash};
pub use domain::{
    ClientError, DEFAULT_FETCH_LIMIT, Episode, FALLBACK_FETCH_LIMIT, FetchError, FetchLimit,
    FetchOutcome, Podcast, Season,
};
