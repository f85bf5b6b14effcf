//! Sourcing service - orchestrates a full run
//!
//! 1. Fetch podcast, episodes and seasons concurrently
//! 2. Degrade any failed fetch to "no data" (logged, never fatal)
//! 3. Build nodes for whatever arrived
//! 4. Optionally attach images
//! 5. Hand nodes to the sink and record plugin status

use std::collections::HashSet;

use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;
use serde_json::Value;

use super::node::{
    IMAGE_LINK_FIELD, Node, NodeFactory, NodeKind, PODCAST_LINK_FIELD, SEASON_LINK_FIELD,
};
use super::schema::{SeasonLink, type_definitions};
use super::traits::{HostError, ImageLinker, NodeSink, PluginStatus, PodcastApi, SchemaRegistrar};
use crate::simplecast::{Episode, FetchLimit, FetchOutcome, Podcast, Season};

/// Options for a sourcing run
#[derive(Debug, Clone)]
pub struct SourceOptions {
    /// Page size for episode and season fetches
    pub fetch_limit: FetchLimit,
    /// How records reference each other
    pub season_link: SeasonLink,
    /// Whether to download and link images
    pub attach_images: bool,
    /// Prefix for node type names
    pub type_prefix: String,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            fetch_limit: FetchLimit::default(),
            season_link: SeasonLink::Key,
            attach_images: true,
            type_prefix: "Simplecast".to_string(),
        }
    }
}

/// Results of the three concurrent fetches
#[derive(Debug, Clone)]
pub struct FetchedData {
    pub podcast: FetchOutcome<Podcast>,
    pub episodes: FetchOutcome<Vec<Episode>>,
    pub seasons: FetchOutcome<Vec<Season>>,
}

/// What happened to one fetch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchSummary {
    pub fetched: bool,
    pub count: usize,
    pub error: Option<String>,
}

impl FetchSummary {
    fn from_outcome<T>(outcome: &FetchOutcome<T>, count: impl Fn(&T) -> usize) -> Self {
        match outcome {
            FetchOutcome::Fetched(value) => Self {
                fetched: true,
                count: count(value),
                error: None,
            },
            FetchOutcome::Degraded(e) => Self {
                fetched: false,
                count: 0,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Summary of a sourcing run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceReport {
    pub podcast: FetchSummary,
    pub episodes: FetchSummary,
    pub seasons: FetchSummary,
    pub nodes_created: usize,
    pub images_linked: usize,
    pub image_failures: usize,
    pub sink_failures: usize,
}

impl SourceReport {
    /// True if every fetch succeeded
    pub fn is_complete(&self) -> bool {
        self.podcast.fetched && self.episodes.fetched && self.seasons.fetched
    }
}

/// Service that turns Simplecast data into content-graph nodes
pub struct SourceService<A: PodcastApi> {
    api: A,
    factory: NodeFactory,
    options: SourceOptions,
}

impl<A: PodcastApi> SourceService<A> {
    pub fn new(api: A, options: SourceOptions) -> Self {
        Self {
            factory: NodeFactory::new(options.type_prefix.clone()),
            api,
            options,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn factory(&self) -> &NodeFactory {
        &self.factory
    }

    /// Run all three fetches concurrently.
    ///
    /// A failure in one never cancels the others; it becomes a
    /// [`FetchOutcome::Degraded`] with the reason.
    pub async fn fetch_all(&self) -> FetchedData {
        let limit = self.options.fetch_limit;
        let (podcast, episodes, seasons) = tokio::join!(
            self.api.fetch_podcast(),
            self.api.fetch_episodes(limit),
            self.api.fetch_seasons(limit),
        );

        FetchedData {
            podcast: FetchOutcome::from_result("podcast", podcast),
            episodes: FetchOutcome::from_result("episodes", episodes),
            seasons: FetchOutcome::from_result("seasons", seasons),
        }
    }

    /// Build nodes for everything that was fetched: podcast, episodes, seasons
    pub fn build_nodes(&self, data: &FetchedData) -> Vec<Node> {
        let mut nodes = Vec::new();
        let reference = self.options.season_link == SeasonLink::Reference;

        if let FetchOutcome::Fetched(ref podcast) = data.podcast {
            nodes.push(self.factory.create(NodeKind::Podcast, podcast.to_fields()));
        }

        let seasons: &[Season] = match data.seasons {
            FetchOutcome::Fetched(ref seasons) => seasons,
            FetchOutcome::Degraded(_) => &[],
        };

        if let FetchOutcome::Fetched(ref episodes) = data.episodes {
            for episode in episodes {
                let mut fields = episode.to_fields();
                if reference {
                    let podcast_id = episode
                        .podcast_id
                        .as_deref()
                        .unwrap_or_else(|| self.api.podcast_id());
                    fields.insert(
                        PODCAST_LINK_FIELD.to_string(),
                        Value::String(self.factory.node_id(NodeKind::Podcast, podcast_id)),
                    );
                    if let Some(season) = episode
                        .season_number
                        .and_then(|n| seasons.iter().find(|s| s.number == n))
                    {
                        fields.insert(
                            SEASON_LINK_FIELD.to_string(),
                            Value::String(self.factory.node_id(NodeKind::Season, &season.id)),
                        );
                    }
                }
                nodes.push(self.factory.create(NodeKind::Episode, fields));
            }
        }

        for season in seasons {
            let mut fields = season.to_fields();
            if reference {
                fields.insert(
                    PODCAST_LINK_FIELD.to_string(),
                    Value::String(self.factory.node_id(NodeKind::Podcast, &season.podcast_id)),
                );
            }
            nodes.push(self.factory.create(NodeKind::Season, fields));
        }

        nodes
    }

    /// Download images for podcast and episode nodes and link them.
    ///
    /// Returns the file nodes to create (one per distinct image) and the
    /// number of failed links. Nodes whose image fails keep no link.
    pub async fn attach_images(
        &self,
        nodes: &mut [Node],
        linker: &dyn ImageLinker,
    ) -> (Vec<Node>, usize) {
        let image_types: Vec<String> = [NodeKind::Podcast, NodeKind::Season, NodeKind::Episode]
            .into_iter()
            .filter(|kind| kind.has_image())
            .map(|kind| self.factory.type_name(kind))
            .collect();

        let jobs = nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| image_types.iter().any(|t| t == node.node_type()))
            .filter_map(|(index, node)| {
                let url = node.str_field("imageUrl")?.to_string();
                let parent_id = node.id.clone();
                Some(async move { (index, linker.link(&parent_id, &url).await) })
            });

        let results = join_all(jobs).await;

        let mut files = Vec::new();
        let mut seen = HashSet::new();
        let mut failures = 0;
        for (index, result) in results {
            match result {
                Ok(asset) => {
                    let node = &mut nodes[index];
                    node.set_field(IMAGE_LINK_FIELD, Value::String(asset.node_id.clone()));
                    if seen.insert(asset.node_id.clone()) {
                        files.push(Node::file(&asset, &node.id));
                    }
                }
                Err(e) => {
                    tracing::warn!("Image for {} not linked: {}", nodes[index].id, e);
                    failures += 1;
                }
            }
        }

        (files, failures)
    }

    /// Run a full sourcing pass into `sink`.
    ///
    /// Never fails: fetch, image and sink errors are logged and counted in
    /// the returned report.
    pub async fn source_nodes<S: NodeSink + ?Sized>(
        &self,
        sink: &mut S,
        linker: Option<&dyn ImageLinker>,
    ) -> SourceReport {
        let data = self.fetch_all().await;
        let mut nodes = self.build_nodes(&data);

        let (files, image_failures) = match linker {
            Some(linker) if self.options.attach_images => {
                self.attach_images(&mut nodes, linker).await
            }
            _ => (Vec::new(), 0),
        };
        let images_linked = nodes
            .iter()
            .filter(|n| n.fields.contains_key(IMAGE_LINK_FIELD))
            .count();

        let mut nodes_created = 0;
        let mut sink_failures = 0;
        for node in nodes.into_iter().chain(files) {
            let id = node.id.clone();
            match sink.create_node(node) {
                Ok(()) => nodes_created += 1,
                Err(e) => {
                    tracing::warn!("Failed to create node {}: {}", id, e);
                    sink_failures += 1;
                }
            }
        }

        sink.set_status(PluginStatus {
            last_fetched: Utc::now(),
        });

        let report = SourceReport {
            podcast: FetchSummary::from_outcome(&data.podcast, |_| 1),
            episodes: FetchSummary::from_outcome(&data.episodes, Vec::len),
            seasons: FetchSummary::from_outcome(&data.seasons, Vec::len),
            nodes_created,
            images_linked,
            image_failures,
            sink_failures,
        };

        tracing::info!(
            "Sourced {} nodes ({} episodes, {} seasons, {} images)",
            report.nodes_created,
            report.episodes.count,
            report.seasons.count,
            report.images_linked
        );

        report
    }

    /// Register node type definitions with the host schema
    pub fn customize_schema<R: SchemaRegistrar + ?Sized>(
        &self,
        registrar: &mut R,
    ) -> Result<(), HostError> {
        registrar.create_types(&type_definitions(&self.factory, self.options.season_link))
    }
}
