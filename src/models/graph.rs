//! Graph container and metadata.

use serde::{Deserialize, Serialize};

use super::link::GraphLink;
use super::node::{GraphNode, NodeType};

/// Graph-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphMetadata {
    /// Id of the root asset.
    pub root_id: String,
    /// Total number of nodes in this graph. The legacy payload called this
    /// field `depth`, but it always held a node count, never a hop depth;
    /// renamed here to say what it is.
    pub node_count: usize,
}

/// A complete relationship graph snapshot.
///
/// Node order is root first, then ancestors, derivatives, related and
/// disputed entries in their upstream order. The builder, filter engine and
/// highlight engine each produce a fresh value; a snapshot is never mutated
/// once handed out, so concurrent readers always see consistent state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
    pub metadata: GraphMetadata,
}

impl GraphData {
    /// Looks up a node by id.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// The single root node, when the graph is non-empty.
    pub fn root(&self) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.node_type == NodeType::Root)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
