//! Raw relationship payload from the upstream asset-data service.
//!
//! Deserialization is lenient on purpose: every list and optional field
//! defaults, and a missing title becomes `"Unknown IP asset"`. A partially
//! malformed upstream payload degrades to documented defaults instead of
//! failing the whole graph.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::node::RelationDirection;

/// Title substituted when the upstream omits one.
pub const UNKNOWN_TITLE: &str = "Unknown IP asset";

fn unknown_title() -> String {
    UNKNOWN_TITLE.to_string()
}

fn default_distance() -> u32 {
    1
}

/// The asset the relationship lists are centered on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootAsset {
    pub asset_id: String,
    #[serde(default = "unknown_title")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// One entry of an ancestor/derivative/related/disputed list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedAsset {
    pub asset_id: String,
    #[serde(default = "unknown_title")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_id: Option<String>,
    #[serde(default)]
    pub direction: RelationDirection,
    /// Hop count from the root asset.
    #[serde(default = "default_distance")]
    pub distance: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl RelatedAsset {
    /// Minimal entry for tests and fixtures.
    pub fn new(asset_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            asset_id: asset_id.into(),
            title: title.into(),
            description: None,
            image: None,
            relationship_type: None,
            relationship_id: None,
            direction: RelationDirection::default(),
            distance: 1,
            created_at: None,
        }
    }
}

/// Full response of `fetch_relationships` for one asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipResponse {
    pub root: RootAsset,
    #[serde(default)]
    pub ancestors: Vec<RelatedAsset>,
    #[serde(default)]
    pub derivatives: Vec<RelatedAsset>,
    #[serde(default)]
    pub related: Vec<RelatedAsset>,
    #[serde(default)]
    pub disputed: Vec<RelatedAsset>,
    /// Opaque upstream metadata, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl RelationshipResponse {
    /// Response with a root and no relationships.
    pub fn for_root(asset_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            root: RootAsset {
                asset_id: asset_id.into(),
                title: title.into(),
                description: None,
                image: None,
                created_at: None,
            },
            ancestors: Vec::new(),
            derivatives: Vec::new(),
            related: Vec::new(),
            disputed: Vec::new(),
            metadata: None,
        }
    }
}
