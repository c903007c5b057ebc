//! Serializer for converting a diagram to draw.io (mxGraph) XML.

use std::fmt::Write;

use crate::layout::{Diagram, DiagramEdge, DiagramNode, NodeKind};
use crate::measure::TextMetrics;

const EDGE_STYLE: &str = "edgeStyle=orthogonalEdgeStyle;rounded=0;orthogonal=1;exitX=0.5;exitY=0.5;entryX=0.5;entryY=0.5;";

fn node_style(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Pk => "shape=box;fillColor=#FFD700;",
        NodeKind::Fk => "shape=ellipse;fillColor=#ADD8E6;",
        NodeKind::Normal => "shape=rounded;fillColor=#FFFFFF;",
    }
}

/// Serialize nodes and edges to a `.drawio` document.
pub fn to_interchange_xml<'a>(
    nodes: impl IntoIterator<Item = &'a DiagramNode>,
    edges: &[DiagramEdge],
) -> String {
    let metrics = TextMetrics::default();
    let mut xml = String::new();

    writeln!(xml, r#"<?xml version="1.0" encoding="UTF-8"?>"#).unwrap();
    writeln!(xml, r#"<mxfile host="app.diagrams.net">"#).unwrap();
    writeln!(xml, r#"  <diagram name="Page-1" id="sheetlens-diagram">"#).unwrap();
    writeln!(
        xml,
        r#"    <mxGraphModel dx="787" dy="522" grid="1" gridSize="10" guides="1" tooltips="1" connect="1" arrows="1" fold="1" page="1" pageScale="1" pageWidth="827" pageHeight="1169" math="0" shadow="0">"#
    )
    .unwrap();
    writeln!(xml, "      <root>").unwrap();
    writeln!(xml, r#"        <mxCell id="0" />"#).unwrap();
    writeln!(xml, r#"        <mxCell id="1" parent="0" />"#).unwrap();

    for node in nodes {
        let (w, h) = metrics.label_size(node.label());
        writeln!(
            xml,
            r#"        <mxCell id="n{}" value="{}" style="{}whiteSpace=wrap;html=1;" vertex="1" parent="1">"#,
            escape_attr(&node.id),
            escape_attr(node.label()),
            node_style(node.kind())
        )
        .unwrap();
        writeln!(
            xml,
            r#"          <mxGeometry x="{}" y="{}" width="{}" height="{}" as="geometry" />"#,
            node.position.x, node.position.y, w, h
        )
        .unwrap();
        writeln!(xml, "        </mxCell>").unwrap();
    }

    for edge in edges {
        writeln!(
            xml,
            r#"        <mxCell id="{}" style="{}" edge="1" parent="1" source="n{}" target="n{}">"#,
            escape_attr(&edge.id),
            EDGE_STYLE,
            escape_attr(&edge.source),
            escape_attr(&edge.target)
        )
        .unwrap();
        writeln!(xml, r#"          <mxGeometry relative="1" as="geometry" />"#).unwrap();
        writeln!(xml, "        </mxCell>").unwrap();
    }

    writeln!(xml, "      </root>").unwrap();
    writeln!(xml, "    </mxGraphModel>").unwrap();
    writeln!(xml, "  </diagram>").unwrap();
    writeln!(xml, "</mxfile>").unwrap();

    xml
}

impl Diagram {
    pub fn to_interchange_xml(&self) -> String {
        to_interchange_xml(self.nodes.values(), &self.edges)
    }
}

/// Escape for a double-quoted attribute; newlines become `&#xa;`.
fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\n', "&#xa;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldNames;
    use crate::layout::LayoutEngine;
    use crate::record::parse;

    fn diagram(rows: &[&[&str]]) -> Diagram {
        let grid: Vec<Vec<String>> = rows
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect();
        LayoutEngine::default().layout_records(&parse(&grid), &FieldNames::default())
    }

    #[test]
    fn test_document_frame() {
        let xml = diagram(&[&["Nama"]]).to_interchange_xml();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains("<mxGraphModel"));
        assert!(xml.trim_end().ends_with("</mxfile>"));
        assert!(!xml.contains("vertex=\"1\""));
    }

    #[test]
    fn test_nodes_and_edges() {
        let xml = diagram(&[&["id", "Nama"], &["1", "Ayu"], &["2", "Budi"]]).to_interchange_xml();

        assert_eq!(xml.matches("vertex=\"1\"").count(), 2);
        assert_eq!(xml.matches("edge=\"1\"").count(), 1);
        assert!(xml.contains(r#"source="n1" target="n2""#));
        assert!(xml.contains("shape=box;fillColor=#FFD700;"));
        assert!(xml.contains("Ayu&#xa;id: Number (PK)&#xa;Nama: String"));
    }

    #[test]
    fn test_normal_shape_without_pk() {
        let xml = diagram(&[&["Nama"], &["Ayu"]]).to_interchange_xml();
        assert!(xml.contains("shape=rounded;fillColor=#FFFFFF;"));
    }

    #[test]
    fn test_escapes_markup() {
        let xml = diagram(&[&["Nama"], &["<Ayu & \"Budi\">"]]).to_interchange_xml();
        assert!(xml.contains("&lt;Ayu &amp; &quot;Budi&quot;&gt;"));
        assert!(!xml.contains("<Ayu"));
    }
}
