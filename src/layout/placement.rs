//! Radial node placement.

use std::f64::consts::PI;

use indexmap::IndexMap;

use crate::ir::{EntityIR, GraphIR};

use super::types::{DiagramNode, NodeData, NodeKind, Position};

/// Position of node `index` of `count` on a circle: `θ = 2π·index/count`.
pub fn circle_position(index: usize, count: usize, radius: f64, center: Position) -> Position {
    let theta = if count == 0 {
        0.0
    } else {
        2.0 * PI * index as f64 / count as f64
    };
    Position {
        x: center.x + radius * theta.cos(),
        y: center.y + radius * theta.sin(),
    }
}

fn node_kind(entity: &EntityIR) -> NodeKind {
    if entity.has_pk() {
        NodeKind::Pk
    } else if entity.has_fk() {
        NodeKind::Fk
    } else {
        NodeKind::Normal
    }
}

/// One node per entity, keyed by entity id, in entity order.
pub fn place_nodes(ir: &GraphIR, radius: f64, center: Position) -> IndexMap<String, DiagramNode> {
    let count = ir.entities.len();
    ir.entities
        .iter()
        .enumerate()
        .map(|(i, entity)| {
            let node = DiagramNode {
                id: entity.id.clone(),
                data: NodeData {
                    label: entity.label(),
                    kind: node_kind(entity),
                },
                position: circle_position(i, count, radius, center),
            };
            (entity.id.clone(), node)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Position = Position { x: 250.0, y: 250.0 };

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_quarter_turns() {
        let p0 = circle_position(0, 4, 200.0, CENTER);
        let p1 = circle_position(1, 4, 200.0, CENTER);
        let p2 = circle_position(2, 4, 200.0, CENTER);

        assert!(close(p0.x, 450.0) && close(p0.y, 250.0));
        assert!(close(p1.x, 250.0) && close(p1.y, 450.0));
        assert!(close(p2.x, 50.0) && close(p2.y, 250.0));
    }

    #[test]
    fn test_single_node_at_angle_zero() {
        let p = circle_position(0, 1, 200.0, CENTER);
        assert!(close(p.x, 450.0) && close(p.y, 250.0));
    }
}
