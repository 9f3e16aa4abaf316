//! Domain models for the relationship graph.

mod graph;
mod link;
mod node;
mod response;

pub use graph::{GraphData, GraphMetadata};
pub use link::{GraphLink, LinkData, LinkEndpoint, LinkKey, LinkType};
pub use node::{GraphNode, NodeData, NodeType, RelationDirection};
pub use response::{RelatedAsset, RelationshipResponse, RootAsset, UNKNOWN_TITLE};
