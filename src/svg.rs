use crate::layout::{Diagram, DiagramNode, NodeKind};
use crate::measure::TextMetrics;
use std::collections::HashMap;
use std::fmt::Write;

/// Snapshot of a diagram as a standalone SVG document.
pub struct SvgRenderer {
    metrics: TextMetrics,
    margin: f64,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            metrics: TextMetrics::default(),
            margin: 40.0,
        }
    }
}

struct NodeBox {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl NodeBox {
    fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

impl SvgRenderer {
    pub fn render(&self, diagram: &Diagram) -> String {
        let boxes: HashMap<&str, NodeBox> = diagram
            .nodes
            .values()
            .map(|n| {
                let (w, h) = self.metrics.label_size(n.label());
                let b = NodeBox {
                    x: n.position.x,
                    y: n.position.y,
                    w,
                    h,
                };
                (n.id.as_str(), b)
            })
            .collect();

        let (min_x, min_y, max_x, max_y) = boxes.values().fold(
            (f64::MAX, f64::MAX, f64::MIN, f64::MIN),
            |(x0, y0, x1, y1), b| (x0.min(b.x), y0.min(b.y), x1.max(b.x + b.w), y1.max(b.y + b.h)),
        );
        let (min_x, min_y, max_x, max_y) = if boxes.is_empty() {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            (min_x, min_y, max_x, max_y)
        };

        let vx = min_x - self.margin;
        let vy = min_y - self.margin;
        let width = max_x - min_x + self.margin * 2.0;
        let height = max_y - min_y + self.margin * 2.0;

        let mut svg = String::new();

        writeln!(
            &mut svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
            width, height, vx, vy, width, height
        )
        .unwrap();

        // Style
        writeln!(
            &mut svg,
            r#"<style>
  .entity-bg {{ fill: #fff; }}
  .entity-header {{ fill: #e0e0e0; }}
  .entity-header.pk {{ fill: #ffd700; }}
  .entity-header.fk {{ fill: #add8e6; }}
  .entity-border {{ fill: none; stroke: #333; stroke-width: 1.5; }}
  .entity-name {{ font-family: monospace; font-size: 14px; font-weight: bold; }}
  .column-text {{ font-family: monospace; font-size: 12px; }}
  .pk {{ font-weight: bold; }}
  .edge {{ stroke: #666; stroke-width: 1.5; fill: none; }}
</style>"#
        )
        .unwrap();

        // Render edges first (behind nodes)
        for edge in &diagram.edges {
            if let (Some(from), Some(to)) = (
                boxes.get(edge.source.as_str()),
                boxes.get(edge.target.as_str()),
            ) {
                let (x1, y1) = from.center();
                let (x2, y2) = to.center();
                writeln!(
                    &mut svg,
                    r#"<line class="edge" x1="{}" y1="{}" x2="{}" y2="{}" />"#,
                    x1, y1, x2, y2
                )
                .unwrap();
            }
        }

        for node in diagram.nodes.values() {
            if let Some(b) = boxes.get(node.id.as_str()) {
                self.render_node(&mut svg, node, b);
            }
        }

        writeln!(&mut svg, "</svg>").unwrap();
        svg
    }

    fn render_node(&self, svg: &mut String, node: &DiagramNode, b: &NodeBox) {
        let header_h = self.metrics.header_height();
        let mut lines = node.label().lines();
        let name = lines.next().unwrap_or_default();
        let columns: Vec<&str> = lines.collect();

        let header_class = match node.kind() {
            NodeKind::Pk => "entity-header pk",
            NodeKind::Fk => "entity-header fk",
            NodeKind::Normal => "entity-header",
        };

        writeln!(
            svg,
            r#"<rect class="entity-bg" x="{}" y="{}" width="{}" height="{}" rx="4" />"#,
            b.x, b.y, b.w, b.h
        )
        .unwrap();

        let fill_h = if columns.is_empty() { b.h } else { header_h };
        writeln!(
            svg,
            r#"<rect class="{}" x="{}" y="{}" width="{}" height="{}" rx="4" />"#,
            header_class, b.x, b.y, b.w, fill_h
        )
        .unwrap();

        writeln!(
            svg,
            r#"<text class="entity-name" x="{}" y="{}" text-anchor="middle">{}</text>"#,
            b.x + b.w / 2.0,
            b.y + header_h / 2.0 + 5.0,
            escape_xml(name)
        )
        .unwrap();

        if !columns.is_empty() {
            writeln!(
                svg,
                r##"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="#333" stroke-width="1" />"##,
                b.x,
                b.y + header_h,
                b.x + b.w,
                b.y + header_h
            )
            .unwrap();

            let mut col_y = b.y + header_h + self.metrics.padding_y + self.metrics.line_height * 0.7;
            for col in columns {
                let class = if col.ends_with("(PK)") {
                    "column-text pk"
                } else {
                    "column-text"
                };
                writeln!(
                    svg,
                    r#"<text class="{}" x="{}" y="{}">{}</text>"#,
                    class,
                    b.x + self.metrics.padding_x,
                    col_y,
                    escape_xml(col)
                )
                .unwrap();
                col_y += self.metrics.line_height;
            }
        }

        writeln!(
            svg,
            r#"<rect class="entity-border" x="{}" y="{}" width="{}" height="{}" rx="4" />"#,
            b.x, b.y, b.w, b.h
        )
        .unwrap();
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
