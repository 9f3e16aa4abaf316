//! Breadth-first path queries over the relationship graph.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::models::{GraphData, GraphLink, GraphNode};

/// Nodes and links adjacent to a single node, in either direction.
#[derive(Debug, Clone, Default)]
pub struct NodeNeighbors {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

/// Path query result with a display description.
#[derive(Debug, Clone)]
pub struct RelationshipPath {
    /// Links from source to target; `None` when no forward path exists,
    /// empty when source and target are the same node.
    pub path: Option<Vec<GraphLink>>,
    /// Nodes strictly between source and target, in traversal order.
    pub intermediate_nodes: Vec<GraphNode>,
    pub description: String,
    /// Number of links on the path; 0 when there is none.
    pub distance: u32,
}

/// Finds the shortest link sequence from `source_id` to `target_id`.
///
/// Traversal follows a link only from its source endpoint toward its target;
/// reverse reachability is deliberately not considered. When several forward
/// links leave a node they are expanded in link-list order, which makes the
/// result deterministic. Returns an empty sequence when the two ids are the
/// same and `None` when the target cannot be reached.
pub fn find_path(graph: &GraphData, source_id: &str, target_id: &str) -> Option<Vec<GraphLink>> {
    if source_id == target_id {
        return Some(Vec::new());
    }
    if graph.node(source_id).is_none() || graph.node(target_id).is_none() {
        return None;
    }

    // discovered_by[node id] = index of the link that reached it
    let mut discovered_by: HashMap<&str, usize> = HashMap::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();

    visited.insert(source_id);
    queue.push_back(source_id);

    while let Some(current) = queue.pop_front() {
        for (idx, link) in graph.links.iter().enumerate() {
            if link.source.id() != current {
                continue;
            }
            let next = link.target.id();
            if !visited.insert(next) {
                continue;
            }
            discovered_by.insert(next, idx);
            if next == target_id {
                return Some(reconstruct(graph, &discovered_by, source_id, target_id));
            }
            queue.push_back(next);
        }
    }

    None
}

fn reconstruct(
    graph: &GraphData,
    discovered_by: &HashMap<&str, usize>,
    source_id: &str,
    target_id: &str,
) -> Vec<GraphLink> {
    let mut path = Vec::new();
    let mut current = target_id;
    while current != source_id {
        let Some(&idx) = discovered_by.get(current) else {
            break;
        };
        path.push(graph.links[idx].clone());
        current = graph.links[idx].source.id();
    }
    path.reverse();
    path
}

/// All nodes and links touching `node_id` as either endpoint.
///
/// Unlike [`find_path`] this ignores direction. An unknown id yields an
/// empty result rather than an error.
pub fn find_node_neighbors(graph: &GraphData, node_id: &str) -> NodeNeighbors {
    let mut neighbor_ids: Vec<&str> = Vec::new();
    let mut links = Vec::new();

    for link in &graph.links {
        let (source, target) = (link.source.id(), link.target.id());
        if source != node_id && target != node_id {
            continue;
        }
        links.push(link.clone());
        let other = if source == node_id { target } else { source };
        if !neighbor_ids.contains(&other) {
            neighbor_ids.push(other);
        }
    }

    let nodes = neighbor_ids
        .iter()
        .filter_map(|id| graph.node(id).cloned())
        .collect();

    NodeNeighbors { nodes, links }
}

/// Describes the relationship between two nodes for display.
pub fn find_relationship_path(
    graph: &GraphData,
    source_id: &str,
    target_id: &str,
) -> RelationshipPath {
    if source_id == target_id {
        return RelationshipPath {
            path: Some(Vec::new()),
            intermediate_nodes: Vec::new(),
            description: "Same IP".to_string(),
            distance: 0,
        };
    }

    let Some(path) = find_path(graph, source_id, target_id) else {
        return RelationshipPath {
            path: None,
            intermediate_nodes: Vec::new(),
            description: "No relationship found".to_string(),
            distance: 0,
        };
    };

    let source_title = title_or_id(graph, source_id);
    let target_title = title_or_id(graph, target_id);
    let distance = path.len() as u32;

    if path.len() == 1 {
        return RelationshipPath {
            path: Some(path),
            intermediate_nodes: Vec::new(),
            description: format!("Direct relationship between {source_title} and {target_title}"),
            distance,
        };
    }

    let intermediate_nodes: Vec<GraphNode> = path[..path.len() - 1]
        .iter()
        .filter_map(|link| graph.node(link.target.id()).cloned())
        .collect();
    let hops = intermediate_nodes.len();
    let plural = if hops == 1 { "" } else { "s" };

    RelationshipPath {
        path: Some(path),
        intermediate_nodes,
        description: format!(
            "{source_title} connects to {target_title} through {hops} intermediate asset{plural}"
        ),
        distance,
    }
}

fn title_or_id(graph: &GraphData, id: &str) -> String {
    match graph.node(id) {
        Some(node) if !node.title.is_empty() => node.title.clone(),
        _ => id.to_string(),
    }
}
