//! Trait definitions for the sourcing seams.
//!
//! `PodcastApi` abstracts the Simplecast client so the service can be
//! tested with mocks. `NodeSink`, `SchemaRegistrar` and `ImageLinker` are
//! the capabilities a host runtime lends to the plugin.
//!
//! # Example
//!
//! ```ignore
//! use simplecast_source::source::{NodeSink, SourceService};
//!
//! struct HostStore { ... }
//! impl NodeSink for HostStore { ... }
//!
//! let report = service.source_nodes(&mut store, Some(&linker)).await;
//! ```

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::node::Node;
use super::schema::TypeDefinition;
use crate::simplecast::{Episode, FetchError, FetchLimit, Podcast, Season};

/// Errors raised by host-side collaborators
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HostError {
    #[error("Node creation failed: {0}")]
    Sink(String),

    #[error("Schema registration failed: {0}")]
    Schema(String),

    #[error("Image attachment failed: {0}")]
    Image(String),
}

/// Status recorded after a sourcing run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginStatus {
    pub last_fetched: DateTime<Utc>,
}

/// A downloaded image, ready to become a file node
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAsset {
    pub node_id: String,
    pub url: String,
    pub path: PathBuf,
    pub mime_type: String,
    pub size: u64,
}

/// Read access to the podcast API.
///
/// Implement this trait to create mock implementations for testing.
#[async_trait]
pub trait PodcastApi: Send + Sync {
    fn podcast_id(&self) -> &str;

    async fn fetch_podcast(&self) -> Result<Podcast, FetchError>;

    /// Full podcast payload, keys camelCased, nothing filtered
    async fn fetch_show_info(&self) -> Result<Value, FetchError>;

    async fn fetch_episode(&self, episode_id: &str) -> Result<Episode, FetchError>;

    async fn fetch_episodes(&self, limit: FetchLimit) -> Result<Vec<Episode>, FetchError>;

    async fn fetch_seasons(&self, limit: FetchLimit) -> Result<Vec<Season>, FetchError>;
}

/// Receives nodes for the host's content graph
pub trait NodeSink: Send {
    fn create_node(&mut self, node: Node) -> Result<(), HostError>;

    /// Record plugin status after a run
    fn set_status(&mut self, _status: PluginStatus) {}
}

/// Registers type definitions with the host schema
pub trait SchemaRegistrar {
    fn create_types(&mut self, types: &[TypeDefinition]) -> Result<(), HostError>;
}

/// Fetches a remote image and makes it linkable from a node
#[async_trait]
pub trait ImageLinker: Send + Sync {
    async fn link(&self, parent_id: &str, url: &str) -> Result<ImageAsset, HostError>;
}

#[async_trait]
impl PodcastApi for crate::simplecast::SimplecastClient {
    fn podcast_id(&self) -> &str {
        self.podcast_id()
    }

    async fn fetch_podcast(&self) -> Result<Podcast, FetchError> {
        self.fetch_podcast().await
    }

    async fn fetch_show_info(&self) -> Result<Value, FetchError> {
        self.fetch_show_info().await
    }

    async fn fetch_episode(&self, episode_id: &str) -> Result<Episode, FetchError> {
        self.fetch_episode(episode_id).await
    }

    async fn fetch_episodes(&self, limit: FetchLimit) -> Result<Vec<Episode>, FetchError> {
        self.fetch_episodes(limit).await
    }

    async fn fetch_seasons(&self, limit: FetchLimit) -> Result<Vec<Season>, FetchError> {
        self.fetch_seasons(limit).await
    }
}
