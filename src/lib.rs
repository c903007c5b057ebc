//! Spreadsheet rows to chart series and record diagrams.
//!
//! Every operation works on an in-memory grid (`string[][]`, header row
//! first). The `wasm_bindgen` exports below take and return JSON strings.

pub mod aggregate;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod fields;
pub mod infer;
pub mod ir;
pub mod layout;
pub mod measure;
pub mod period;
pub mod record;
pub mod registry;
pub mod serializer;
pub mod source;
pub mod svg;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use config::EngineConfig;
use error::EngineError;
use ir::{DetailLevel, GraphIR};
use layout::{Diagram, Position};
use record::RawGrid;
use svg::SvgRenderer;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

fn read_grid(grid: &str) -> Result<RawGrid, EngineError> {
    serde_json::from_str(grid).map_err(EngineError::Input)
}

fn read_diagram(diagram: &str) -> Result<Diagram, EngineError> {
    serde_json::from_str(diagram).map_err(EngineError::Input)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

/// Build a diagram from grid JSON with the configured layout and detail level.
pub fn diagram_from_grid(
    grid: &str,
    config: &EngineConfig,
    detail: DetailLevel,
) -> Result<Diagram, EngineError> {
    let records = record::parse(&read_grid(grid)?);
    let ir = GraphIR::from_records(&records, &config.fields, detail);
    Ok(config.layout.layout(&ir))
}

/// Grid JSON to record JSON (objects keyed by header).
#[wasm_bindgen(js_name = "parseGrid")]
pub fn parse_grid(grid: &str) -> Result<String, String> {
    let raw = read_grid(grid).map_err(|e| e.to_string())?;
    to_json(&record::parse(&raw))
}

/// Table column definitions for a grid.
#[wasm_bindgen(js_name = "tableColumns")]
pub fn table_columns(grid: &str) -> Result<String, String> {
    let raw = read_grid(grid).map_err(|e| e.to_string())?;
    to_json(&record::columns(&raw))
}

/// Every dashboard chart slot for a grid.
#[wasm_bindgen(js_name = "dashboardCharts")]
pub fn dashboard_charts(
    grid: &str,
    config: Option<String>,
    selected: Option<Vec<String>>,
) -> Result<String, String> {
    let config = EngineConfig::from_optional_json(config.as_deref()).map_err(|e| e.to_string())?;
    let raw = read_grid(grid).map_err(|e| e.to_string())?;
    let records = record::parse(&raw);
    let selected = selected.unwrap_or_default();

    let charts = dashboard::build(&records, &config, &selected)
        .map_err(|e| EngineError::from(e).to_string())?;
    to_json(&charts)
}

/// Per-day graduate series inside one `Month Year` bucket.
#[wasm_bindgen(js_name = "graduationDetails")]
pub fn graduation_details(
    grid: &str,
    bucket: &str,
    config: Option<String>,
) -> Result<String, String> {
    let config = EngineConfig::from_optional_json(config.as_deref()).map_err(|e| e.to_string())?;
    let raw = read_grid(grid).map_err(|e| e.to_string())?;
    let records = record::parse(&raw);

    let series = dashboard::graduation_details_series(&records, &config, bucket)
        .map_err(|e| EngineError::from(e).to_string())?;
    to_json(&series)
}

/// Saved-link activity per month from a `spreadsheetLinks` JSON list.
#[wasm_bindgen(js_name = "linkActivity")]
pub fn link_activity(links: &str) -> Result<String, String> {
    let links: Vec<registry::SheetLink> =
        serde_json::from_str(links).map_err(|e| EngineError::Input(e).to_string())?;
    to_json(&registry::link_activity_by_month(&links))
}

/// Radial diagram JSON (`{ nodes, edges }`) for a grid.
#[wasm_bindgen(js_name = "erdLayout")]
pub fn erd_layout(
    grid: &str,
    config: Option<String>,
    detail: Option<String>,
) -> Result<String, String> {
    let config = EngineConfig::from_optional_json(config.as_deref()).map_err(|e| e.to_string())?;
    let detail_level = detail
        .as_deref()
        .and_then(DetailLevel::from_str)
        .unwrap_or_default();

    let diagram = diagram_from_grid(grid, &config, detail_level).map_err(|e| e.to_string())?;
    to_json(&diagram)
}

/// Move one node of a diagram; unknown ids leave it unchanged.
/// Non-finite coordinates are rejected.
#[wasm_bindgen(js_name = "erdMoveNode")]
pub fn erd_move_node(diagram: &str, node_id: &str, x: f64, y: f64) -> Result<String, String> {
    if !(x.is_finite() && y.is_finite()) {
        return Err(format!("Invalid position for {node_id}: ({x}, {y})"));
    }
    let mut diagram = read_diagram(diagram).map_err(|e| e.to_string())?;
    diagram.on_node_drag_stop(node_id, Position { x, y });
    to_json(&diagram)
}

/// draw.io XML for a diagram.
#[wasm_bindgen(js_name = "erdToDrawio")]
pub fn erd_to_drawio(diagram: &str) -> Result<String, String> {
    let diagram = read_diagram(diagram).map_err(|e| e.to_string())?;
    Ok(diagram.to_interchange_xml())
}

/// Static SVG snapshot of a diagram.
#[wasm_bindgen(js_name = "erdToSvg")]
pub fn erd_to_svg(diagram: &str) -> Result<String, String> {
    let diagram = read_diagram(diagram).map_err(|e| e.to_string())?;
    Ok(SvgRenderer::default().render(&diagram))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRID: &str = r#"[
        ["id", "Nama", "IPK", "Tanggal Lulus"],
        ["1", "Ayu", "3.6", "01/03/2024"],
        ["2", "Budi", "2.4", "15/03/2024"],
        ["3", "Citra", "1.8", "bad"]
    ]"#;

    #[test]
    fn test_parse_grid_json() {
        let json = parse_grid(GRID).unwrap();
        let records: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1]["Nama"], "Budi");
    }

    #[test]
    fn test_invalid_grid() {
        let err = parse_grid("{}").unwrap_err();
        assert!(err.starts_with("Invalid input"));
    }

    #[test]
    fn test_table_columns_json() {
        let json = table_columns(GRID).unwrap();
        assert!(json.contains(r#"{"header":"Nama","accessor":"Nama"}"#));
    }

    #[test]
    fn test_dashboard_charts_json() {
        let json = dashboard_charts(GRID, None, Some(vec!["Ayu".to_string()])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["graduation"]["labels"][0], "March 2024");
        assert_eq!(value["studentGpa"]["datasets"][0]["data"][0], 3.6);
    }

    #[test]
    fn test_dashboard_charts_strict_dates() {
        let err = dashboard_charts(GRID, Some(r#"{"dates":"strict"}"#.to_string()), None).unwrap_err();
        assert!(err.starts_with("Date error"));
    }

    #[test]
    fn test_graduation_details_json() {
        let json = graduation_details(GRID, "March 2024", None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["labels"][1], "15 March 2024");
    }

    #[test]
    fn test_erd_pipeline() {
        let layout = erd_layout(GRID, Some(r#"{"layout":{"radius":100}}"#.to_string()), None).unwrap();
        let diagram: Diagram = serde_json::from_str(&layout).unwrap();
        assert_eq!(diagram.nodes.len(), 3);
        assert_eq!(diagram.edges.len(), 2);
        assert_eq!(diagram.nodes["1"].position, Position { x: 350.0, y: 250.0 });

        let moved = erd_move_node(&layout, "2", 10.0, 20.0).unwrap();
        let moved: Diagram = serde_json::from_str(&moved).unwrap();
        assert_eq!(moved.nodes["2"].position, Position { x: 10.0, y: 20.0 });
        assert_eq!(moved.edges, diagram.edges);

        let xml = erd_to_drawio(&layout).unwrap();
        assert!(xml.contains("<mxfile"));

        let svg = erd_to_svg(&layout).unwrap();
        assert!(svg.starts_with("<svg"));
    }

    #[test]
    fn test_erd_move_node_rejects_non_finite() {
        let layout = erd_layout(GRID, None, None).unwrap();
        assert!(erd_move_node(&layout, "1", f64::NAN, 0.0).is_err());
        assert!(erd_move_node(&layout, "1", 0.0, f64::INFINITY).is_err());

        let moved = erd_move_node(&layout, "1", -5.5, 0.0).unwrap();
        assert!(erd_to_svg(&moved).is_ok());
    }

    #[test]
    fn test_link_activity_json() {
        let links = r#"[{
            "id": "x",
            "link": "https://docs.google.com/spreadsheets/d/abc/edit",
            "spreadsheetId": "abc",
            "range": "Sheet1",
            "created_at": "2024-05-01T08:00:00.000Z",
            "updated_at": "2024-06-01T08:00:00.000Z"
        }]"#;
        let json = link_activity(links).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["labels"], serde_json::json!(["May", "June"]));
    }
}
