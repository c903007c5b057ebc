//! Layout engine core implementation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fields::FieldNames;
use crate::ir::{DetailLevel, GraphIR};
use crate::record::Record;

use super::edges::chain_edges;
use super::placement::place_nodes;
use super::types::{Diagram, Position};

/// Layout engine configuration and computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutEngine {
    pub radius: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self {
            radius: 200.0,
            center_x: 250.0,
            center_y: 250.0,
        }
    }
}

impl LayoutEngine {
    pub fn center(&self) -> Position {
        Position {
            x: self.center_x,
            y: self.center_y,
        }
    }

    /// Compute layout for the given graph.
    pub fn layout(&self, ir: &GraphIR) -> Diagram {
        // Phase 1: Node placement
        let nodes = place_nodes(ir, self.radius, self.center());

        // Phase 2: Edge chain in placement order
        let ids: Vec<&str> = nodes.keys().map(String::as_str).collect();
        let edges = chain_edges(&ids);

        debug!(nodes = nodes.len(), edges = edges.len(), "diagram laid out");
        Diagram { nodes, edges }
    }

    /// Records straight to a diagram with every field annotated.
    pub fn layout_records(&self, records: &[Record], fields: &FieldNames) -> Diagram {
        self.layout(&GraphIR::from_records(records, fields, DetailLevel::All))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::NodeKind;
    use crate::record::parse;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn students(n: usize) -> Vec<Record> {
        let mut rows = vec![vec!["id".to_string(), "Nama".to_string()]];
        for i in 0..n {
            rows.push(vec![i.to_string(), format!("Mahasiswa {i}")]);
        }
        parse(&rows)
    }

    #[test]
    fn test_node_and_edge_counts() {
        let engine = LayoutEngine::default();
        let fields = FieldNames::default();
        for n in 0..6 {
            let diagram = engine.layout_records(&students(n), &fields);
            assert_eq!(diagram.nodes.len(), n);
            assert_eq!(diagram.edges.len(), n.saturating_sub(1));
        }
    }

    #[test]
    fn test_circular_placement() {
        let diagram = LayoutEngine::default().layout_records(&students(4), &FieldNames::default());

        let first = diagram.node("1").unwrap().position;
        let third = diagram.node("3").unwrap().position;
        assert!(close(first.x, 450.0) && close(first.y, 250.0));
        assert!(close(third.x, 50.0) && close(third.y, 250.0));
    }

    #[test]
    fn test_labels_and_kind() {
        let records = parse(&grid(&[&["id", "Nama", "IPK"], &["9", "Ayu", "3.2"]]));
        let diagram = LayoutEngine::default().layout_records(&records, &FieldNames::default());
        let node = diagram.node("1").unwrap();

        assert_eq!(node.label(), "Ayu\nid: Number (PK)\nNama: String\nIPK: Number");
        assert_eq!(node.kind(), NodeKind::Pk);
    }

    #[test]
    fn test_edges_follow_index_order() {
        let diagram = LayoutEngine::default().layout_records(&students(3), &FieldNames::default());
        let pairs: Vec<(&str, &str)> = diagram
            .edges
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect();
        assert_eq!(pairs, vec![("1", "2"), ("2", "3")]);
    }

    #[test]
    fn test_drag_moves_only_target_node() {
        let mut diagram = LayoutEngine::default().layout_records(&students(3), &FieldNames::default());
        let before = diagram.clone();

        assert!(diagram.on_node_drag_stop("2", Position { x: 10.0, y: 20.0 }));
        assert_eq!(diagram.node("2").unwrap().position, Position { x: 10.0, y: 20.0 });
        assert_eq!(diagram.node("2").unwrap().data, before.node("2").unwrap().data);
        assert_eq!(diagram.node("1"), before.node("1"));
        assert_eq!(diagram.node("3"), before.node("3"));
        assert_eq!(diagram.edges, before.edges);
    }

    #[test]
    fn test_drag_unknown_node_is_noop() {
        let mut diagram = LayoutEngine::default().layout_records(&students(2), &FieldNames::default());
        let before = diagram.clone();
        assert!(!diagram.on_node_drag_stop("99", Position::default()));
        assert_eq!(diagram, before);
    }

    #[test]
    fn test_custom_radius() {
        let engine = LayoutEngine {
            radius: 100.0,
            center_x: 0.0,
            center_y: 0.0,
        };
        let diagram = engine.layout_records(&students(2), &FieldNames::default());
        let second = diagram.node("2").unwrap().position;
        assert!(close(second.x, -100.0) && close(second.y, 0.0));
    }

    #[test]
    fn test_json_shape() {
        let diagram = LayoutEngine::default().layout_records(&students(2), &FieldNames::default());
        let json = serde_json::to_value(&diagram).unwrap();

        assert_eq!(json["nodes"][0]["id"], "1");
        assert_eq!(json["nodes"][0]["data"]["type"], "PK");
        assert!(json["nodes"][1]["position"]["x"].is_number());
        assert_eq!(json["edges"][0]["id"], "e1-2");

        let back: Diagram = serde_json::from_value(json).unwrap();
        assert_eq!(back, diagram);
    }
}
