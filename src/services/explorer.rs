//! Data orchestration: fetch, build, filter, highlight, store sync.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;

use crate::config::Config;
use crate::context::Context;
use crate::di::FromContext;
use crate::error::AppError;
use crate::graph::{
    apply_filters, build_graph, create_highlighted_graph, find_node_neighbors, find_path,
    find_relationship_path, NodeNeighbors, RelationshipPath,
};
use crate::models::{GraphData, GraphLink, LinkKey};
use crate::services::cache::{CacheKey, GraphCache};
use crate::source::{FetchOptions, RelationshipSource};
use crate::store::ViewStateStore;

/// Orchestrates the fetch → build → filter → highlight pipeline around the
/// shared view state.
///
/// All graph computation is synchronous; only the upstream fetch suspends.
/// Every stage produces a fresh snapshot, so a consumer holding an older
/// graph keeps seeing a consistent value while a newer one is prepared.
#[derive(FromContext, Clone)]
pub struct ExplorerService {
    source: Arc<dyn RelationshipSource>,
    store: ViewStateStore,
    cache: GraphCache,
    config: Arc<Config>,
}

impl ExplorerService {
    /// Loads the relationship graph for `asset_id` and makes it current.
    ///
    /// The store's loading flag brackets the fetch. On success the built
    /// graph becomes the current snapshot, the error clears, `last_updated`
    /// advances and the selection highlight is recomputed. On failure one
    /// human-readable message lands in the store and the previous snapshot
    /// stays on screen. Either way, a load that was superseded by a newer
    /// one leaves the state untouched when it settles.
    pub async fn load_graph(
        &self,
        asset_id: &str,
        options: Option<FetchOptions>,
    ) -> Result<Arc<GraphData>, AppError> {
        let options = options.unwrap_or_else(|| self.config.fetch.options());
        let generation = self.cache.begin_request();
        self.store.set_loading(true);
        tracing::debug!(asset_id, generation, "loading relationship graph");

        let key = CacheKey {
            asset_id: asset_id.to_string(),
            options,
        };
        match self.cache.fetch(self.source.clone(), key).await {
            Ok(response) => {
                let graph = Arc::new(build_graph(&response));
                if self.cache.try_commit(generation) {
                    self.store.set_loading(false);
                    self.store.clear_error();
                    self.store.touch_updated(Utc::now());
                    self.cache.set_current(asset_id.to_string(), graph.clone());
                    self.sync_selection_highlight(&graph);
                    tracing::info!(
                        asset_id,
                        nodes = graph.nodes.len(),
                        links = graph.links.len(),
                        "relationship graph ready"
                    );
                } else {
                    tracing::debug!(asset_id, generation, "dropping superseded load");
                }
                Ok(graph)
            }
            Err(err) => {
                if self.cache.try_commit(generation) {
                    // the previous successful graph stays on screen
                    self.store.set_loading(false);
                    self.store
                        .set_error(format!("Failed to load relationships: {err}"));
                    tracing::warn!(asset_id, error = %err, "relationship fetch failed");
                }
                Err(AppError::Fetch(err.to_string()))
            }
        }
    }

    /// The current unfiltered graph, if any load has succeeded.
    pub fn current_graph(&self) -> Option<Arc<GraphData>> {
        self.cache.current_graph()
    }

    /// The renderer-facing view: the current graph through the active
    /// filters, with highlight state applied when a path or node highlight
    /// is set.
    pub fn graph_view(&self) -> Option<GraphData> {
        let graph = self.cache.current_graph()?;
        let state = self.store.snapshot();
        let filtered = apply_filters(&graph, &state.filters);

        let prefs = &state.view_preferences;
        if prefs.highlighted_path.is_none() && prefs.highlighted_node.is_none() {
            return Some(filtered);
        }

        let mut node_ids: HashSet<String> = HashSet::new();
        if let Some(node_id) = &prefs.highlighted_node {
            node_ids.insert(node_id.clone());
        }
        let link_keys = prefs.highlighted_path.clone().unwrap_or_default();
        for link_key in &link_keys {
            node_ids.insert(link_key.source.clone());
            node_ids.insert(link_key.target.clone());
        }
        if prefs.highlighted_path.is_some() {
            if let Some(selected) = &state.selected_node {
                node_ids.insert(selected.clone());
            }
        }

        Some(create_highlighted_graph(&filtered, &node_ids, Some(&link_keys)))
    }

    /// Updates the selection and recomputes the root → selection highlight.
    pub fn select_node(&self, node_id: Option<&str>) {
        self.store.set_selected_node(node_id.map(str::to_string));
        match self.cache.current_graph() {
            Some(graph) => self.sync_selection_highlight(&graph),
            None => self.store.highlight_path(None),
        }
    }

    /// Teardown hook for the consuming view. Clears the transient
    /// highlights so they cannot leak into the next mount.
    pub fn clear_view_highlights(&self) {
        self.store.highlight_path(None);
        self.store.highlight_node(None);
    }

    /// Ad-hoc path query over the current snapshot.
    pub fn path_between(&self, source_id: &str, target_id: &str) -> Option<Vec<GraphLink>> {
        let graph = self.cache.current_graph()?;
        find_path(&graph, source_id, target_id)
    }

    /// Ad-hoc neighborhood query over the current snapshot.
    pub fn neighbors_of(&self, node_id: &str) -> NodeNeighbors {
        match self.cache.current_graph() {
            Some(graph) => find_node_neighbors(&graph, node_id),
            None => NodeNeighbors::default(),
        }
    }

    /// Describes the relationship between two nodes of the current snapshot.
    pub fn relationship_between(
        &self,
        source_id: &str,
        target_id: &str,
    ) -> Option<RelationshipPath> {
        let graph = self.cache.current_graph()?;
        Some(find_relationship_path(&graph, source_id, target_id))
    }

    /// A selection that is present and not the root gets the root → node
    /// path highlighted; anything else clears the path.
    fn sync_selection_highlight(&self, graph: &GraphData) {
        let root_id = graph.metadata.root_id.clone();
        let path = self
            .store
            .selected_node()
            .filter(|id| *id != root_id)
            .and_then(|id| find_path(graph, &root_id, &id));

        match path {
            Some(links) => {
                let keys: Vec<LinkKey> = links.iter().map(LinkKey::from).collect();
                self.store.highlight_path(Some(keys));
            }
            None => self.store.highlight_path(None),
        }
    }
}
