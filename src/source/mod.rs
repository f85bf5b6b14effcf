//! Content-graph sourcing
//!
//! Turns Simplecast records into typed nodes for a host content graph.
//!
//! # Architecture
//!
//! - **Nodes** (`node.rs`) - Node shape, ids and content digests
//! - **Schema** (`schema.rs`) - Type definitions with `@link` fields
//! - **Traits** (`traits.rs`) - API and host seams (`PodcastApi`, `NodeSink`, ...)
//! - **Images** (`images.rs`) - Cached image downloads for file nodes
//! - **Sinks** (`sinks.rs`) - In-memory host collaborators
//! - **Service** (`service.rs`) - Orchestrates a run

mod images;
pub mod node;
pub mod schema;
mod service;
mod sinks;
pub mod traits;

pub use images::CachedImageLinker;
pub use node::{Node, NodeFactory, NodeKind};
pub use schema::{SeasonLink, TypeDefinition, type_definitions};
pub use service::{FetchSummary, FetchedData, SourceOptions, SourceReport, SourceService};
pub use sinks::{MemorySink, SdlRegistrar};
pub use traits::{
    HostError, ImageAsset, ImageLinker, NodeSink, PluginStatus, PodcastApi, SchemaRegistrar,
};
