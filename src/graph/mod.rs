//! Graph construction and query engines.
//!
//! Everything here is synchronous and pure: each function takes a graph
//! snapshot and produces a fresh value, leaving the input untouched.

mod builder;
mod filter;
mod highlight;
mod path;

pub use builder::build_graph;
pub use filter::apply_filters;
pub use highlight::{create_highlighted_graph, DIMMED_OPACITY};
pub use path::{
    find_node_neighbors, find_path, find_relationship_path, NodeNeighbors, RelationshipPath,
};
