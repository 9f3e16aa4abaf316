//! Builds a typed graph from a raw relationship response.

use std::collections::HashMap;

use crate::models::{
    GraphData, GraphLink, GraphMetadata, GraphNode, LinkData, LinkEndpoint, LinkType, NodeData,
    NodeType, RelatedAsset, RelationshipResponse,
};

/// Converts an upstream relationship response into a graph snapshot.
///
/// The root asset becomes the single `ROOT` node, followed by one node and
/// one link per ancestor, derivative, related and disputed entry, in list
/// order. Every link originates at the root: root → ancestor is typed
/// `DERIVES_FROM` (the root derives from its ancestor), root → derivative
/// `DERIVED_BY`, root → related/disputed `RELATED`. When the upstream reuses
/// an id across lists, the later entry wins and replaces the earlier node in
/// place, keeping the first occurrence's position.
pub fn build_graph(response: &RelationshipResponse) -> GraphData {
    let root_id = response.root.asset_id.clone();

    let mut nodes: Vec<GraphNode> = Vec::new();
    let mut links: Vec<GraphLink> = Vec::new();
    let mut node_index: HashMap<String, usize> = HashMap::new();
    let mut link_index: HashMap<String, usize> = HashMap::new();

    node_index.insert(root_id.clone(), 0);
    nodes.push(GraphNode {
        id: root_id.clone(),
        node_type: NodeType::Root,
        title: response.root.title.clone(),
        description: response.root.description.clone(),
        image: response.root.image.clone(),
        created_at: response.root.created_at,
        data: None,
        highlighted: false,
        opacity: 1.0,
    });

    let lists: [(&[RelatedAsset], NodeType, LinkType); 4] = [
        (
            response.ancestors.as_slice(),
            NodeType::Ancestor,
            LinkType::DerivesFrom,
        ),
        (
            response.derivatives.as_slice(),
            NodeType::Derivative,
            LinkType::DerivedBy,
        ),
        (response.related.as_slice(), NodeType::Related, LinkType::Related),
        (response.disputed.as_slice(), NodeType::Disputed, LinkType::Related),
    ];

    for (entries, node_type, link_type) in lists {
        for entry in entries {
            // An entry reusing the root id would demote the only ROOT node.
            if entry.asset_id == root_id {
                continue;
            }

            let node = node_for_entry(entry, node_type);
            match node_index.get(&entry.asset_id) {
                Some(&at) => nodes[at] = node,
                None => {
                    node_index.insert(entry.asset_id.clone(), nodes.len());
                    nodes.push(node);
                }
            }

            let link = link_for_entry(entry, &root_id, link_type);
            match link_index.get(&link.id) {
                Some(&at) => links[at] = link,
                None => {
                    link_index.insert(link.id.clone(), links.len());
                    links.push(link);
                }
            }
        }
    }

    let node_count = nodes.len();
    GraphData {
        nodes,
        links,
        metadata: GraphMetadata { root_id, node_count },
    }
}

fn node_for_entry(entry: &RelatedAsset, node_type: NodeType) -> GraphNode {
    GraphNode {
        id: entry.asset_id.clone(),
        node_type,
        title: entry.title.clone(),
        description: entry.description.clone(),
        image: entry.image.clone(),
        created_at: entry.created_at,
        data: Some(NodeData {
            relationship_type: entry.relationship_type.clone(),
            distance: Some(entry.distance),
            direction: Some(entry.direction),
            x: None,
            y: None,
        }),
        highlighted: false,
        opacity: 1.0,
    }
}

fn link_for_entry(entry: &RelatedAsset, root_id: &str, link_type: LinkType) -> GraphLink {
    let id = entry
        .relationship_id
        .clone()
        .unwrap_or_else(|| format!("{root_id}->{}", entry.asset_id));

    GraphLink {
        id,
        source: LinkEndpoint::Id(root_id.to_string()),
        target: LinkEndpoint::Id(entry.asset_id.clone()),
        link_type,
        data: entry
            .relationship_type
            .clone()
            .map(|relationship_type| LinkData {
                relationship_type: Some(relationship_type),
            }),
        highlighted: false,
    }
}
