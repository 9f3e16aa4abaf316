//! End-to-end tests for the fetch → build → filter → highlight pipeline.
//!
//! A scripted in-memory source stands in for the upstream asset-data
//! service; everything else is the real stack wired through the DI context.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use ipgraph::config::Config;
use ipgraph::context::Context;
use ipgraph::debounce::Debouncer;
use ipgraph::models::{NodeType, RelatedAsset, RelationshipResponse};
use ipgraph::services::ExplorerService;
use ipgraph::source::{FetchOptions, RelationshipSource, SourceError};
use ipgraph::FromRef;

/// A small catalog: one root with an ancestor, two derivatives and a
/// related asset, plus a disputed entry when requested.
struct CatalogSource {
    calls: AtomicUsize,
    fail_next: AtomicBool,
}

impl CatalogSource {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail_next: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl RelationshipSource for CatalogSource {
    async fn fetch_relationships(
        &self,
        asset_id: &str,
        options: &FetchOptions,
    ) -> Result<RelationshipResponse, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(SourceError::Upstream {
                status: 503,
                message: "catalog unavailable".to_string(),
            });
        }

        let mut response = RelationshipResponse::for_root(asset_id, "Mecha Samurai");
        let mut ancestor = RelatedAsset::new("anc1", "Original Character");
        ancestor.relationship_type = Some("adaptation".to_string());
        response.ancestors.push(ancestor);

        let mut deriv1 = RelatedAsset::new("deriv1", "Derivative 1");
        deriv1.relationship_type = Some("remix".to_string());
        response.derivatives.push(deriv1);
        response
            .derivatives
            .push(RelatedAsset::new("deriv2", "Derivative 2"));

        let mut related = RelatedAsset::new("rel1", "Related Artwork");
        related.distance = 3;
        response.related.push(related);

        if options.include_disputes {
            response
                .disputed
                .push(RelatedAsset::new("disp1", "Contested Copy"));
        }
        Ok(response)
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("ipgraph=debug")
        .try_init();
}

fn explorer() -> (ExplorerService, Arc<CatalogSource>, Context) {
    init_tracing();
    let source = CatalogSource::new();
    let ctx = Context::new(source.clone(), Config::default());
    (ExplorerService::from_ref(&ctx), source, ctx)
}

#[tokio::test]
async fn pipeline_builds_filters_and_highlights() {
    let (service, _, ctx) = explorer();

    let graph = service.load_graph("root1", None).await.expect("load");
    assert_eq!(graph.nodes.len(), 5);
    assert_eq!(graph.metadata.node_count, 5);
    assert_eq!(
        graph.root().expect("root present").node_type,
        NodeType::Root
    );

    // narrow the view to derivatives, then search, then select
    ctx.store.update_filters(|filters| {
        filters.node_types = vec![NodeType::Root, NodeType::Derivative];
    });
    let view = service.graph_view().expect("view");
    assert!(view.node("rel1").is_none());
    assert!(view.node("anc1").is_none());
    assert_eq!(view.nodes.len(), 3);

    ctx.store
        .update_filters(|filters| filters.search_query = "Derivative 1".to_string());
    let view = service.graph_view().expect("view");
    let ids: Vec<&str> = view.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, ["root1", "deriv1"]);
    assert!(view.node("deriv1").expect("match kept").highlighted);

    ctx.store.reset_filters();
    service.select_node(Some("deriv2"));
    let view = service.graph_view().expect("view");
    assert!(view.node("deriv2").expect("selected").highlighted);
    assert!(view.node("rel1").expect("off-path").opacity < 1.0);
    assert!(view
        .links
        .iter()
        .any(|l| l.highlighted && l.target.id() == "deriv2"));
}

#[tokio::test]
async fn fetch_options_change_the_cache_key_and_the_graph() {
    let (service, source, _ctx) = explorer();

    service.load_graph("root1", None).await.expect("load");
    let without_disputes = service.current_graph().expect("current");
    assert!(without_disputes.node("disp1").is_none());

    let options = FetchOptions {
        include_disputes: true,
        ..FetchOptions::default()
    };
    service
        .load_graph("root1", Some(options))
        .await
        .expect("load");
    let with_disputes = service.current_graph().expect("current");
    let disputed = with_disputes.node("disp1").expect("disputed present");
    assert_eq!(disputed.node_type, NodeType::Disputed);

    // two distinct keys, two upstream calls, then a cache hit
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    service.load_graph("root1", None).await.expect("load");
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn failure_then_retry_recovers_cleanly() {
    let (service, source, ctx) = explorer();

    service.load_graph("root1", None).await.expect("load");
    let first_updated = ctx.store.snapshot().last_updated.expect("set");

    source.fail_next.store(true, Ordering::SeqCst);
    let options = FetchOptions {
        max_depth: 5,
        ..FetchOptions::default()
    };
    let failed = service.load_graph("root1", Some(options.clone())).await;
    assert!(failed.is_err());

    let state = ctx.store.snapshot();
    assert!(state
        .error
        .as_deref()
        .expect("error surfaced")
        .contains("Failed to load relationships"));
    // the prior graph is still complete and displayed
    let current = service.current_graph().expect("retained");
    assert_eq!(current.nodes.len(), 5);

    service
        .load_graph("root1", Some(options))
        .await
        .expect("retry succeeds");
    let state = ctx.store.snapshot();
    assert!(state.error.is_none());
    assert!(!state.is_loading);
    assert!(state.last_updated.expect("set") >= first_updated);
}

#[tokio::test]
async fn store_reset_restores_the_documented_defaults() {
    let (service, _, ctx) = explorer();
    service.load_graph("root1", None).await.expect("load");

    ctx.store.update_filters(|filters| {
        filters.search_query = "derivative".to_string();
        filters.max_distance = Some(1);
    });
    ctx.store.set_zoom_level(0.4);
    service.select_node(Some("deriv1"));

    ctx.store.reset();
    let state = ctx.store.snapshot();
    assert!(state.filters.search_query.is_empty());
    assert!(state.filters.max_distance.is_none());
    assert_eq!(state.zoom_level, 1.0);
    assert!(state.selected_node.is_none());
    assert!(state.view_preferences.highlighted_path.is_none());

    // the graph itself is untouched by a view reset
    assert!(service.current_graph().is_some());
}

#[tokio::test(start_paused = true)]
async fn debounced_filter_input_collapses_to_one_store_write() {
    let (service, _, ctx) = explorer();
    service.load_graph("root1", None).await.expect("load");

    let debouncer = Debouncer::new(ctx.config.ui.debounce());
    let mut watcher = ctx.store.subscribe();
    let before = *watcher.borrow_and_update();

    // four keystrokes inside one quiet window become a single store write
    for query in ["D", "De", "Der", "Deri"] {
        let store = ctx.store.clone();
        let query = query.to_string();
        debouncer.call(move || {
            store.update_filters(|filters| filters.search_query = query);
        });
        tokio::time::advance(Duration::from_millis(40)).await;
    }
    tokio::time::advance(Duration::from_millis(200)).await;
    tokio::task::yield_now().await;

    assert_eq!(*watcher.borrow_and_update(), before + 1);
    assert_eq!(ctx.store.filters().search_query, "Deri");

    // the engine itself stayed synchronous: the view reflects the write
    let view = service.graph_view().expect("view");
    assert!(view.node("deriv1").is_some());
    assert!(view.node("rel1").is_none());
}

#[tokio::test]
async fn relationship_queries_serve_the_ui() {
    let (service, _, _ctx) = explorer();
    service.load_graph("root1", None).await.expect("load");

    let rel = service
        .relationship_between("root1", "deriv1")
        .expect("loaded");
    assert_eq!(rel.distance, 1);
    assert!(rel.description.contains("Direct relationship"));

    let same = service
        .relationship_between("deriv1", "deriv1")
        .expect("loaded");
    assert_eq!(same.description, "Same IP");

    // star graph: no forward path between two derivatives
    let none = service
        .relationship_between("deriv1", "deriv2")
        .expect("loaded");
    assert_eq!(none.description, "No relationship found");
    assert!(none.path.is_none());

    let neighbors = service.neighbors_of("root1");
    assert_eq!(neighbors.nodes.len(), 4);
    assert_eq!(neighbors.links.len(), 4);
}
