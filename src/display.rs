//! Visual constants and display helpers for nodes and links.

use crate::models::{GraphLink, GraphNode, LinkType, NodeType};

// =============================================================================
// Node Colors
// =============================================================================

/// Root asset color (Gold).
pub const COLOR_ROOT: &str = "#FFD700";
/// Ancestor node color (Blue).
pub const COLOR_ANCESTOR: &str = "#4A90D9";
/// Derivative node color (Green).
pub const COLOR_DERIVATIVE: &str = "#5CB85C";
/// Sibling node color (Teal).
pub const COLOR_SIBLING: &str = "#17BECF";
/// Related node color (Purple).
pub const COLOR_RELATED: &str = "#9467BD";
/// Disputed node color (Red).
pub const COLOR_DISPUTED: &str = "#D9534F";
/// Collaborator node color (Orange).
pub const COLOR_COLLABORATOR: &str = "#FF7F0E";

// =============================================================================
// Link Colors by Type
// =============================================================================

/// DERIVES_FROM link color (Brown).
pub const COLOR_DERIVES_FROM: &str = "#8C564B";
/// DERIVED_BY link color (Dark green).
pub const COLOR_DERIVED_BY: &str = "#2CA02C";
/// COMMON_ANCESTOR link color (Gray).
pub const COLOR_COMMON_ANCESTOR: &str = "#7F7F7F";
/// RELATED link color (Light gray).
pub const COLOR_LINK_RELATED: &str = "#B0B0B0";

/// Shared emphasis color; overrides any type-based color when highlighted.
pub const COLOR_HIGHLIGHT: &str = "#FF4081";

// =============================================================================
// Labels
// =============================================================================

/// Default label length bound.
pub const DEFAULT_LABEL_LENGTH: usize = 20;

const ELLIPSIS: &str = "...";
const ID_LABEL_CHARS: usize = 8;

/// Display color for a node.
pub fn node_color(node: &GraphNode, highlighted: bool) -> &'static str {
    if highlighted {
        return COLOR_HIGHLIGHT;
    }
    match node.node_type {
        NodeType::Root => COLOR_ROOT,
        NodeType::Ancestor => COLOR_ANCESTOR,
        NodeType::Derivative => COLOR_DERIVATIVE,
        NodeType::Sibling => COLOR_SIBLING,
        NodeType::Related => COLOR_RELATED,
        NodeType::Disputed => COLOR_DISPUTED,
        NodeType::Collaborator => COLOR_COLLABORATOR,
    }
}

/// Display color for a link.
pub fn link_color(link: &GraphLink, highlighted: bool) -> &'static str {
    if highlighted {
        return COLOR_HIGHLIGHT;
    }
    match link.link_type {
        LinkType::DerivesFrom => COLOR_DERIVES_FROM,
        LinkType::DerivedBy => COLOR_DERIVED_BY,
        LinkType::CommonAncestor => COLOR_COMMON_ANCESTOR,
        LinkType::Related => COLOR_LINK_RELATED,
    }
}

/// Bounded display label for a node.
///
/// The title is returned verbatim when it fits in `max_length` characters;
/// otherwise the first `max_length` characters plus an ellipsis, so the
/// result exceeds the bound by the ellipsis width and callers rely on that.
/// A node without a title falls back to the first 8 characters of its id
/// plus an ellipsis. Counts characters, not bytes.
pub fn node_label(node: &GraphNode, max_length: usize) -> String {
    if node.title.is_empty() {
        let prefix: String = node.id.chars().take(ID_LABEL_CHARS).collect();
        return format!("{prefix}{ELLIPSIS}");
    }
    if node.title.chars().count() <= max_length {
        return node.title.clone();
    }
    let truncated: String = node.title.chars().take(max_length).collect();
    format!("{truncated}{ELLIPSIS}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GraphLink, GraphNode, LinkType, NodeType};

    #[test]
    fn node_colors_are_fixed_per_type() {
        let root = GraphNode::new("r", NodeType::Root, "Root");
        let disputed = GraphNode::new("d", NodeType::Disputed, "Disputed");
        assert_eq!(node_color(&root, false), COLOR_ROOT);
        assert_eq!(node_color(&disputed, false), COLOR_DISPUTED);
    }

    #[test]
    fn highlight_overrides_any_type_color() {
        let root = GraphNode::new("r", NodeType::Root, "Root");
        let link = GraphLink::new("l", "a", "b", LinkType::Related);
        assert_eq!(node_color(&root, true), COLOR_HIGHLIGHT);
        assert_eq!(link_color(&link, true), COLOR_HIGHLIGHT);
    }

    #[test]
    fn short_title_is_verbatim() {
        let node = GraphNode::new("n1", NodeType::Related, "Short title");
        assert_eq!(node_label(&node, 20), "Short title");
    }

    #[test]
    fn long_title_truncates_past_the_bound_by_the_ellipsis() {
        let node = GraphNode::new(
            "n1",
            NodeType::Related,
            "This is a very long title that should be truncated",
        );
        let label = node_label(&node, 15);
        assert_eq!(label, "This is a very ...");
        assert_eq!(label.chars().count(), 18);
    }

    #[test]
    fn missing_title_falls_back_to_id_prefix() {
        let node = GraphNode::new("a1b2c3d4e5f6g7h8", NodeType::Related, "");
        assert_eq!(node_label(&node, 20), "a1b2c3d4...");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let node = GraphNode::new("n1", NodeType::Related, "héllo wörld, a lönger title");
        let label = node_label(&node, 5);
        assert_eq!(label, "héllo...");
    }
}
