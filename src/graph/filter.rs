//! Filter engine reducing a graph to the subset matching view criteria.

use std::collections::HashSet;

use crate::models::{GraphData, GraphMetadata, GraphNode, NodeType};
use crate::store::FilterState;

/// Applies the active filters to a graph snapshot, producing a new one.
///
/// The root node always survives, no matter which criteria are active. With
/// a non-empty search query the query is decisive for every other node: a
/// node is kept iff its title, description or id contains the query
/// case-insensitively, and each match is marked highlighted, so a search
/// hit shows up even when its type is filtered out. Without a query, the
/// type, distance and relationship-type criteria apply. A link survives only
/// when both endpoints survive and its type is allowed. Ordering of
/// survivors is preserved and the input is never mutated.
pub fn apply_filters(graph: &GraphData, filters: &FilterState) -> GraphData {
    let query = filters.search_query.trim().to_lowercase();

    let mut nodes: Vec<GraphNode> = Vec::new();
    for node in &graph.nodes {
        if node.node_type == NodeType::Root {
            nodes.push(node.clone());
            continue;
        }

        if !query.is_empty() {
            if matches_search(node, &query) {
                let mut node = node.clone();
                node.highlighted = true;
                nodes.push(node);
            }
            continue;
        }

        if !filters.node_types.contains(&node.node_type) {
            continue;
        }
        if let Some(max) = filters.max_distance {
            if !node.distance().is_some_and(|d| d <= max) {
                continue;
            }
        }
        if let Some(allowed) = &filters.relationship_types {
            match node.relationship_type() {
                Some(rt) if allowed.iter().any(|a| a == rt) => {}
                _ => continue,
            }
        }
        nodes.push(node.clone());
    }

    let retained: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let links = graph
        .links
        .iter()
        .filter(|link| {
            filters.link_types.contains(&link.link_type)
                && retained.contains(link.source.id())
                && retained.contains(link.target.id())
        })
        .cloned()
        .collect();

    let node_count = nodes.len();
    GraphData {
        nodes,
        links,
        metadata: GraphMetadata {
            root_id: graph.metadata.root_id.clone(),
            node_count,
        },
    }
}

fn matches_search(node: &GraphNode, query: &str) -> bool {
    node.title.to_lowercase().contains(query)
        || node
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(query))
        || node.id.to_lowercase().contains(query)
}
