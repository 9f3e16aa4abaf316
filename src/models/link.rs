//! Link model for the relationship graph.

use serde::{Deserialize, Serialize};

use super::node::GraphNode;

/// Kind of a relationship edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkType {
    DerivesFrom,
    DerivedBy,
    CommonAncestor,
    Related,
}

impl LinkType {
    /// Every link type, in display order.
    pub const ALL: [LinkType; 4] = [
        LinkType::DerivesFrom,
        LinkType::DerivedBy,
        LinkType::CommonAncestor,
        LinkType::Related,
    ];
}

/// A link endpoint: a bare node id, or a node object as embedded by layout
/// libraries once positions are assigned. Engines resolve either shape
/// through [`id`](LinkEndpoint::id) and never branch on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkEndpoint {
    Id(String),
    Node(Box<GraphNode>),
}

impl LinkEndpoint {
    /// The node id this endpoint refers to.
    pub fn id(&self) -> &str {
        match self {
            LinkEndpoint::Id(id) => id,
            LinkEndpoint::Node(node) => &node.id,
        }
    }
}

impl From<&str> for LinkEndpoint {
    fn from(id: &str) -> Self {
        LinkEndpoint::Id(id.to_string())
    }
}

impl From<String> for LinkEndpoint {
    fn from(id: String) -> Self {
        LinkEndpoint::Id(id)
    }
}

/// Extra payload attached to a link.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_type: Option<String>,
}

/// An edge between two nodes, directed source → target for pathing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphLink {
    pub id: String,
    pub source: LinkEndpoint,
    pub target: LinkEndpoint,
    #[serde(rename = "type")]
    pub link_type: LinkType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<LinkData>,
    /// Visual emphasis flag, written by the highlight engine.
    #[serde(default)]
    pub highlighted: bool,
}

impl GraphLink {
    /// Creates a link with default visual state.
    pub fn new(
        id: impl Into<String>,
        source: impl Into<LinkEndpoint>,
        target: impl Into<LinkEndpoint>,
        link_type: LinkType,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            link_type,
            data: None,
            highlighted: false,
        }
    }

    /// Value identity of this link.
    pub fn key(&self) -> LinkKey {
        LinkKey::from(self)
    }
}

/// Value identity of a link: endpoint ids plus type. Highlight matching and
/// the stored highlighted path compare links by this, never by reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkKey {
    pub source: String,
    pub target: String,
    pub link_type: LinkType,
}

impl From<&GraphLink> for LinkKey {
    fn from(link: &GraphLink) -> Self {
        Self {
            source: link.source.id().to_string(),
            target: link.target.id().to_string(),
            link_type: link.link_type,
        }
    }
}
