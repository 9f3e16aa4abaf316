//! Application context providing dependency injection root.

use std::sync::Arc;

use crate::config::Config;
use crate::di::Context as ContextDerive;
use crate::services::GraphCache;
use crate::source::RelationshipSource;
use crate::store::ViewStateStore;

/// Root application context for dependency injection.
///
/// Holds the shared collaborators of the graph pipeline; `#[derive(Context)]`
/// generates `FromRef` implementations for each field, so services resolve
/// their dependencies at compile time. The view-state store lives here
/// instead of a process global, so tests and embedders get isolated
/// instances.
#[derive(ContextDerive, Clone)]
pub struct Context {
    /// Upstream relationship service.
    pub source: Arc<dyn RelationshipSource>,
    /// Shared view state.
    pub store: ViewStateStore,
    /// Response cache and request ordering.
    pub cache: GraphCache,
    /// Application configuration.
    pub config: Arc<Config>,
}

impl Context {
    /// Creates a context with a fresh store and cache.
    pub fn new(source: Arc<dyn RelationshipSource>, config: Config) -> Self {
        let cache = GraphCache::new(config.cache.ttl());
        Self {
            source,
            store: ViewStateStore::new(),
            cache,
            config: Arc::new(config),
        }
    }
}
