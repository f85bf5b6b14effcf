//! Content-graph nodes built from Simplecast records.
//!
//! Node shape follows what content graphs expect from a source plugin:
//! a stable `id`, `parent`/`children` links, an `internal` block with the
//! type name and a content digest, and the record's own fields flattened
//! alongside.

use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::casing;
use crate::source::traits::ImageAsset;

/// Field that links a record node to its image file node
pub const IMAGE_LINK_FIELD: &str = "image___NODE";

/// Field that links an episode to its season node (reference mode)
pub const SEASON_LINK_FIELD: &str = "season___NODE";

/// Field that links a season or episode to its podcast node (reference mode)
pub const PODCAST_LINK_FIELD: &str = "podcast___NODE";

/// Type name of image file nodes
pub const FILE_TYPE: &str = "File";

/// Kinds of record this plugin sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Podcast,
    Season,
    Episode,
}

impl NodeKind {
    /// Type name without the plugin prefix
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Podcast => "Podcast",
            NodeKind::Season => "Season",
            NodeKind::Episode => "PodcastEpisode",
        }
    }

    /// Whether records of this kind carry an image to attach
    pub fn has_image(self) -> bool {
        matches!(self, NodeKind::Podcast | NodeKind::Episode)
    }
}

/// Bookkeeping the host needs for every node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Internal {
    #[serde(rename = "type")]
    pub node_type: String,
    pub content_digest: String,
}

/// A typed, identified record handed to a [`NodeSink`](crate::source::NodeSink)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: String,
    pub parent: Option<String>,
    pub children: Vec<String>,
    pub internal: Internal,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Node {
    pub fn node_type(&self) -> &str {
        &self.internal.node_type
    }

    /// A string field, if present and non-empty
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Set a field and refresh the content digest
    pub fn set_field(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
        self.internal.content_digest = content_digest(&self.fields);
    }

    /// File node for a downloaded image, parented to `parent_id`
    pub fn file(asset: &ImageAsset, parent_id: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("url".to_string(), Value::String(asset.url.clone()));
        fields.insert(
            "absolutePath".to_string(),
            Value::String(asset.path.to_string_lossy().into_owned()),
        );
        fields.insert("mediaType".to_string(), Value::String(asset.mime_type.clone()));
        fields.insert("size".to_string(), Value::from(asset.size));

        Self {
            id: asset.node_id.clone(),
            parent: Some(parent_id.to_string()),
            children: Vec::new(),
            internal: Internal {
                node_type: FILE_TYPE.to_string(),
                content_digest: content_digest(&fields),
            },
            fields,
        }
    }
}

/// Builds nodes with a consistent type prefix and id scheme
#[derive(Debug, Clone)]
pub struct NodeFactory {
    type_prefix: String,
}

impl NodeFactory {
    pub fn new(type_prefix: impl Into<String>) -> Self {
        Self {
            type_prefix: type_prefix.into(),
        }
    }

    pub fn type_prefix(&self) -> &str {
        &self.type_prefix
    }

    /// Full type name, e.g. `SimplecastPodcastEpisode`
    pub fn type_name(&self, kind: NodeKind) -> String {
        format!("{}{}", self.type_prefix, kind.name())
    }

    /// Stable node id for a remote record
    pub fn node_id(&self, kind: NodeKind, remote_id: &str) -> String {
        format!("{}__{}__{}", self.type_prefix, kind.name(), remote_id)
    }

    /// Field that keeps the remote id, e.g. `simplecastId`
    pub fn remote_id_field(&self) -> String {
        casing::to_camel_case(&format!("{}_id", self.type_prefix.to_lowercase()))
    }

    /// Build a node from camelCased record fields.
    ///
    /// The record's `id` is replaced by the node id; the remote id moves to
    /// [`remote_id_field`](Self::remote_id_field).
    pub fn create(&self, kind: NodeKind, mut fields: Map<String, Value>) -> Node {
        let remote_id = match fields.shift_remove("id") {
            Some(Value::String(id)) => id,
            Some(other) => other.to_string(),
            None => String::new(),
        };

        fields.insert(self.remote_id_field(), Value::String(remote_id.clone()));

        Node {
            id: self.node_id(kind, &remote_id),
            parent: None,
            children: Vec::new(),
            internal: Internal {
                node_type: self.type_name(kind),
                content_digest: content_digest(&fields),
            },
            fields,
        }
    }
}

impl Default for NodeFactory {
    fn default() -> Self {
        Self::new("Simplecast")
    }
}

/// SHA-256 hex digest of the serialized fields
pub fn content_digest(fields: &Map<String, Value>) -> String {
    let bytes = serde_json::to_vec(fields).unwrap_or_default();
    Sha256::digest(&bytes)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
