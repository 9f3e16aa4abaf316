//! Highlight engine deriving visual emphasis for a node and link selection.

use std::collections::HashSet;

use crate::models::{GraphData, LinkKey};

/// Opacity applied to nodes outside the highlighted set.
pub const DIMMED_OPACITY: f32 = 0.3;

/// Produces a copy of the graph with highlight state applied.
///
/// Nodes in `highlighted_nodes` get `highlighted = true` at full opacity;
/// every other node is dimmed to [`DIMMED_OPACITY`]. Links are matched by
/// [`LinkKey`] value (source id, target id and type), never by reference.
/// Re-applying the same selection converges to the same result, and an
/// empty graph passes through unchanged.
pub fn create_highlighted_graph(
    graph: &GraphData,
    highlighted_nodes: &HashSet<String>,
    highlighted_links: Option<&[LinkKey]>,
) -> GraphData {
    let nodes = graph
        .nodes
        .iter()
        .map(|node| {
            let mut node = node.clone();
            if highlighted_nodes.contains(&node.id) {
                node.highlighted = true;
                node.opacity = 1.0;
            } else {
                node.highlighted = false;
                node.opacity = DIMMED_OPACITY;
            }
            node
        })
        .collect();

    let links = graph
        .links
        .iter()
        .map(|link| {
            let key = LinkKey::from(link);
            let mut link = link.clone();
            link.highlighted =
                highlighted_links.is_some_and(|keys| keys.iter().any(|k| *k == key));
            link
        })
        .collect();

    GraphData {
        nodes,
        links,
        metadata: graph.metadata.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GraphLink, GraphMetadata, GraphNode, LinkType, NodeType};

    fn star_graph() -> GraphData {
        let nodes = vec![
            GraphNode::new("root1", NodeType::Root, "Root Asset"),
            GraphNode::new("deriv1", NodeType::Derivative, "Derivative 1"),
            GraphNode::new("rel1", NodeType::Related, "Related 1"),
        ];
        let links = vec![
            GraphLink::new("l1", "root1", "deriv1", LinkType::DerivedBy),
            GraphLink::new("l2", "root1", "rel1", LinkType::Related),
        ];
        GraphData {
            metadata: GraphMetadata {
                root_id: "root1".to_string(),
                node_count: nodes.len(),
            },
            nodes,
            links,
        }
    }

    #[test]
    fn selected_nodes_keep_full_opacity_rest_dim() {
        let graph = star_graph();
        let selected: HashSet<String> = ["root1", "deriv1"].iter().map(|s| s.to_string()).collect();
        let highlighted = create_highlighted_graph(&graph, &selected, None);

        let root = highlighted.node("root1").unwrap();
        assert!(root.highlighted);
        assert_eq!(root.opacity, 1.0);

        let rel = highlighted.node("rel1").unwrap();
        assert!(!rel.highlighted);
        assert_eq!(rel.opacity, DIMMED_OPACITY);
    }

    #[test]
    fn links_match_by_value_not_reference() {
        let graph = star_graph();
        // a key built independently of the stored link instance
        let keys = vec![LinkKey {
            source: "root1".to_string(),
            target: "deriv1".to_string(),
            link_type: LinkType::DerivedBy,
        }];
        let highlighted = create_highlighted_graph(&graph, &HashSet::new(), Some(&keys));

        assert!(highlighted.links[0].highlighted);
        assert!(!highlighted.links[1].highlighted);
    }

    #[test]
    fn mismatched_link_type_does_not_match() {
        let graph = star_graph();
        let keys = vec![LinkKey {
            source: "root1".to_string(),
            target: "deriv1".to_string(),
            link_type: LinkType::Related,
        }];
        let highlighted = create_highlighted_graph(&graph, &HashSet::new(), Some(&keys));
        assert!(!highlighted.links[0].highlighted);
    }

    #[test]
    fn reapplication_is_idempotent() {
        let graph = star_graph();
        let selected: HashSet<String> = ["deriv1".to_string()].into_iter().collect();
        let keys = vec![graph.links[0].key()];

        let once = create_highlighted_graph(&graph, &selected, Some(&keys));
        let twice = create_highlighted_graph(&once, &selected, Some(&keys));
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_graph_passes_through() {
        let graph = GraphData::default();
        let highlighted = create_highlighted_graph(&graph, &HashSet::new(), None);
        assert!(highlighted.nodes.is_empty());
        assert!(highlighted.links.is_empty());
    }

    #[test]
    fn input_graph_is_untouched() {
        let graph = star_graph();
        let selected: HashSet<String> = ["deriv1".to_string()].into_iter().collect();
        let _ = create_highlighted_graph(&graph, &selected, None);

        assert!(graph.nodes.iter().all(|n| !n.highlighted));
        assert!(graph.nodes.iter().all(|n| n.opacity == 1.0));
    }
}
