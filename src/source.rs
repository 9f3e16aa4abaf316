//! Upstream asset-data collaborator boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::RelationshipResponse;

/// Errors from the upstream relationship service.
///
/// The orchestrator surfaces every variant the same way: one retryable,
/// human-readable message in the view state. Callers never branch on the
/// kind.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("rate limited by upstream")]
    RateLimited,

    #[error("upstream returned status {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("malformed payload: {0}")]
    Malformed(String),
}

/// Options of a relationship fetch; part of the response cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchOptions {
    pub max_depth: u32,
    pub include_disputes: bool,
    pub include_siblings: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_depth: 3,
            include_disputes: false,
            include_siblings: false,
        }
    }
}

/// The abstract upstream service the orchestrator pulls raw relationship
/// data from. Implementations wrap whatever transport the host application
/// uses; this crate only ever sees the parsed response.
#[async_trait]
pub trait RelationshipSource: Send + Sync {
    /// Fetches the relationship lists for one asset.
    async fn fetch_relationships(
        &self,
        asset_id: &str,
        options: &FetchOptions,
    ) -> Result<RelationshipResponse, SourceError>;
}
