//! Diagram output structures.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Node shape tag used by renderers and the interchange export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "PK")]
    Pk,
    #[serde(rename = "FK")]
    Fk,
    #[default]
    Normal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub label: String,
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramNode {
    pub id: String,
    pub data: NodeData,
    pub position: Position,
}

impl DiagramNode {
    pub fn label(&self) -> &str {
        &self.data.label
    }

    pub fn kind(&self) -> NodeKind {
        self.data.kind
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// Nodes addressed by id, in placement order, plus the edge chain.
///
/// Serialized as `{ "nodes": [...], "edges": [...] }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "DiagramWire", into = "DiagramWire")]
pub struct Diagram {
    pub nodes: IndexMap<String, DiagramNode>,
    pub edges: Vec<DiagramEdge>,
}

#[derive(Serialize, Deserialize)]
struct DiagramWire {
    #[serde(default)]
    nodes: Vec<DiagramNode>,
    #[serde(default)]
    edges: Vec<DiagramEdge>,
}

impl From<DiagramWire> for Diagram {
    fn from(wire: DiagramWire) -> Self {
        Self {
            nodes: wire.nodes.into_iter().map(|n| (n.id.clone(), n)).collect(),
            edges: wire.edges,
        }
    }
}

impl From<Diagram> for DiagramWire {
    fn from(diagram: Diagram) -> Self {
        Self {
            nodes: diagram.nodes.into_values().collect(),
            edges: diagram.edges,
        }
    }
}

impl Diagram {
    pub fn node(&self, id: &str) -> Option<&DiagramNode> {
        self.nodes.get(id)
    }

    /// Move one node. Labels, edges, and every other node stay as they are.
    /// Returns `false` when no node has `node_id`.
    pub fn on_node_drag_stop(&mut self, node_id: &str, position: Position) -> bool {
        match self.nodes.get_mut(node_id) {
            Some(node) => {
                node.position = position;
                true
            }
            None => {
                debug!("drag stop for unknown node {node_id}");
                false
            }
        }
    }
}
