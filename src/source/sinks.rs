//! In-memory host collaborators.
//!
//! Used by the CLI to collect a run's output, and handy for embedding the
//! plugin where the host wants a plain list of nodes.

use serde::Serialize;

use super::node::Node;
use super::schema::{self, TypeDefinition};
use super::traits::{HostError, NodeSink, PluginStatus, SchemaRegistrar};

/// Collects nodes and the last plugin status
#[derive(Debug, Default, Serialize)]
pub struct MemorySink {
    pub nodes: Vec<Node>,
    pub status: Option<PluginStatus>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes of a given type, in creation order
    pub fn nodes_of_type<'a>(&'a self, node_type: &'a str) -> impl Iterator<Item = &'a Node> {
        self.nodes.iter().filter(move |n| n.node_type() == node_type)
    }

    pub fn find(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

impl NodeSink for MemorySink {
    fn create_node(&mut self, node: Node) -> Result<(), HostError> {
        if self.nodes.iter().any(|n| n.id == node.id) {
            return Err(HostError::Sink(format!("duplicate node id {}", node.id)));
        }
        self.nodes.push(node);
        Ok(())
    }

    fn set_status(&mut self, status: PluginStatus) {
        self.status = Some(status);
    }
}

/// Collects registered type definitions
#[derive(Debug, Default)]
pub struct SdlRegistrar {
    pub types: Vec<TypeDefinition>,
}

impl SdlRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything registered so far, as one SDL document
    pub fn sdl(&self) -> String {
        schema::to_sdl(&self.types)
    }
}

impl SchemaRegistrar for SdlRegistrar {
    fn create_types(&mut self, types: &[TypeDefinition]) -> Result<(), HostError> {
        for ty in types {
            if self.types.iter().any(|t| t.name == ty.name) {
                return Err(HostError::Schema(format!("type {} already defined", ty.name)));
            }
        }
        self.types.extend_from_slice(types);
        Ok(())
    }
}
