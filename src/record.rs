//! Grid to record parsing and table-view helpers.

use indexmap::IndexMap;
use serde::Serialize;

/// Header row first, then data rows, exactly as the sheet source returns them.
pub type RawGrid = Vec<Vec<String>>;

/// One data row keyed by the exact header strings, in header order.
pub type Record = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub header: String,
    pub accessor: String,
}

/// Parse a raw grid into records.
///
/// Rows are normalized to the header width: missing trailing cells become
/// empty strings and extra cells are dropped. A grid with no data rows yields
/// no records.
pub fn parse(grid: &[Vec<String>]) -> Vec<Record> {
    let Some((headers, rows)) = grid.split_first() else {
        return Vec::new();
    };

    rows.iter()
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .map(|(i, header)| (header.clone(), row.get(i).cloned().unwrap_or_default()))
                .collect()
        })
        .collect()
}

/// Table columns, one per header, each accessed by its own header string.
pub fn columns(grid: &[Vec<String>]) -> Vec<Column> {
    grid.first()
        .map(|headers| {
            headers
                .iter()
                .map(|h| Column {
                    header: h.clone(),
                    accessor: h.clone(),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Keep records where any cell contains `query`, ignoring case.
pub fn filter_records<'a>(records: &'a [Record], query: &str) -> Vec<&'a Record> {
    let needle = query.trim().to_lowercase();
    records
        .iter()
        .filter(|r| needle.is_empty() || r.values().any(|v| v.to_lowercase().contains(&needle)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> RawGrid {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_parse_empty_grid() {
        assert!(parse(&[]).is_empty());
    }

    #[test]
    fn test_parse_header_only() {
        let g = grid(&[&["Nama", "NIM"]]);
        assert!(parse(&g).is_empty());
    }

    #[test]
    fn test_parse_keys_cells_by_header() {
        let g = grid(&[
            &["Nama", "NIM", "IPK"],
            &["Ayu", "2101", "3.5"],
            &["Budi", "2202", "2.9"],
        ]);
        let records = parse(&g);

        assert_eq!(records.len(), 2);
        for (i, record) in records.iter().enumerate() {
            for (j, header) in g[0].iter().enumerate() {
                assert_eq!(record[header], g[i + 1][j]);
            }
        }
        let keys: Vec<&String> = records[0].keys().collect();
        assert_eq!(keys, vec!["Nama", "NIM", "IPK"]);
    }

    #[test]
    fn test_parse_ragged_rows() {
        let g = grid(&[&["a", "b", "c"], &["1"], &["1", "2", "3", "4"]]);
        let records = parse(&g);

        assert_eq!(records[0]["b"], "");
        assert_eq!(records[0]["c"], "");
        assert_eq!(records[1].len(), 3);
        assert_eq!(records[1]["c"], "3");
    }

    #[test]
    fn test_columns_follow_headers() {
        let g = grid(&[&["Nama", "Status"], &["Ayu", "aktif"]]);
        let cols = columns(&g);

        assert_eq!(cols.len(), 2);
        assert_eq!(cols[1].header, "Status");
        assert_eq!(cols[1].accessor, "Status");
        assert!(columns(&[]).is_empty());
    }

    #[test]
    fn test_filter_records_case_insensitive() {
        let g = grid(&[&["Nama", "Prodi"], &["Ayu", "Informatika"], &["Budi", "Hukum"]]);
        let records = parse(&g);

        let hits = filter_records(&records, "INFORM");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["Nama"], "Ayu");
        assert_eq!(filter_records(&records, "  ").len(), 2);
    }
}
