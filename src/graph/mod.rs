//! Knowledge graph model and store.

pub mod color;
pub mod seed;
mod store;
mod types;

pub use store::GraphStore;
pub use types::{GraphData, GraphEdge, GraphNode, NodePatch, NodeType};
