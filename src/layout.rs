//! Radial diagram layout: one node per record on a circle, chained by edges.

mod edges;
mod engine;
mod placement;
mod types;

pub use edges::chain_edges;
pub use engine::LayoutEngine;
pub use placement::circle_position;
pub use types::{Diagram, DiagramEdge, DiagramNode, NodeData, NodeKind, Position};
