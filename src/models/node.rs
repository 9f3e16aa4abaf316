//! Node model for the relationship graph.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Relationship category of a node relative to the root asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Root,
    Ancestor,
    Derivative,
    Sibling,
    Related,
    Disputed,
    Collaborator,
}

impl NodeType {
    /// Every node type, in display order.
    pub const ALL: [NodeType; 7] = [
        NodeType::Root,
        NodeType::Ancestor,
        NodeType::Derivative,
        NodeType::Sibling,
        NodeType::Related,
        NodeType::Disputed,
        NodeType::Collaborator,
    ];
}

/// Direction of a relationship relative to the root asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationDirection {
    Inbound,
    Outbound,
    #[default]
    Bidirectional,
}

/// Relationship payload attached to a node, plus renderer-owned layout slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_type: Option<String>,
    /// Hop count from the root node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<RelationDirection>,
    /// Layout coordinate owned by the renderer; the engine never reads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Layout coordinate owned by the renderer; the engine never reads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
}

/// A node in the relationship graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Asset id, unique within a graph.
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<NodeData>,
    /// Visual emphasis flag, written by the filter and highlight engines.
    #[serde(default)]
    pub highlighted: bool,
    /// Render opacity in 0..1; only the highlight engine lowers it.
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

fn default_opacity() -> f32 {
    1.0
}

impl GraphNode {
    /// Creates a node with default visual state and no relationship payload.
    pub fn new(id: impl Into<String>, node_type: NodeType, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type,
            title: title.into(),
            description: None,
            image: None,
            created_at: None,
            data: None,
            highlighted: false,
            opacity: 1.0,
        }
    }

    /// Hop distance from the root, when known.
    pub fn distance(&self) -> Option<u32> {
        self.data.as_ref().and_then(|d| d.distance)
    }

    /// Upstream relationship type, when known.
    pub fn relationship_type(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.relationship_type.as_deref())
    }
}
