//! Sheet sources: where raw grids come from.
//!
//! The engine itself never does I/O; a [`SheetSource`] is handed a spreadsheet
//! id and an A1 range and returns the grid the Sheets `values` endpoint would.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::record::RawGrid;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid range: {0}")]
    InvalidRange(String),
    #[error("No sheet found for {0}")]
    NotFound(String),
}

pub trait SheetSource {
    fn fetch(&self, spreadsheet_id: &str, range: &str) -> Result<RawGrid, SourceError>;
}

static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]+)(\d+)?(?::([A-Za-z]+)(\d+)?)?$").expect("range pattern is valid")
});

/// A parsed A1 range such as `Sheet1!A1:D100`, `A:C`, or `Sheet1`.
///
/// Rows and columns are zero-based and inclusive; `None` means "to the end".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellRange {
    pub sheet: Option<String>,
    pub first_col: usize,
    pub first_row: usize,
    pub last_col: Option<usize>,
    pub last_row: Option<usize>,
}

fn column_index(letters: &str, range: &str) -> Result<usize, SourceError> {
    letters
        .chars()
        .try_fold(0usize, |acc, c| {
            acc.checked_mul(26)?
                .checked_add(c.to_ascii_uppercase() as usize - 'A' as usize + 1)
        })
        .map(|n| n - 1)
        .ok_or_else(|| SourceError::InvalidRange(range.to_string()))
}

fn row_index(digits: &str, range: &str) -> Result<usize, SourceError> {
    match digits.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(SourceError::InvalidRange(range.to_string())),
    }
}

impl CellRange {
    pub fn parse(range: &str) -> Result<Self, SourceError> {
        let range = range.trim();
        if range.is_empty() {
            return Ok(Self::default());
        }

        // Without `!`, only a `from:to` span is read as cells; `Sheet1` is a sheet name.
        let (sheet, cells) = match range.rsplit_once('!') {
            Some((sheet, cells)) => (Some(sheet.trim_matches('\'').to_string()), cells),
            None if range.contains(':') => (None, range),
            None => {
                return Ok(Self {
                    sheet: Some(range.to_string()),
                    ..Self::default()
                });
            }
        };

        let caps = RANGE_RE
            .captures(cells)
            .ok_or_else(|| SourceError::InvalidRange(range.to_string()))?;

        let first_col = column_index(&caps[1], range)?;
        let first_row = caps
            .get(2)
            .map(|m| row_index(m.as_str(), range))
            .transpose()?
            .unwrap_or(0);

        let (last_col, last_row) = match caps.get(3) {
            Some(end_col) => (
                Some(column_index(end_col.as_str(), range)?),
                caps.get(4).map(|m| row_index(m.as_str(), range)).transpose()?,
            ),
            // A single cell selects just itself.
            None if caps.get(2).is_some() => (Some(first_col), Some(first_row)),
            None => (Some(first_col), None),
        };

        if last_col.is_some_and(|c| c < first_col) || last_row.is_some_and(|r| r < first_row) {
            return Err(SourceError::InvalidRange(range.to_string()));
        }

        Ok(Self {
            sheet,
            first_col,
            first_row,
            last_col,
            last_row,
        })
    }

    /// The part of `grid` this range selects. Cells beyond the grid are not invented.
    pub fn crop(&self, grid: &[Vec<String>]) -> RawGrid {
        let rows = grid.iter().skip(self.first_row);
        let take_rows = self
            .last_row
            .map(|last| (last - self.first_row).saturating_add(1))
            .unwrap_or(usize::MAX);

        rows.take(take_rows)
            .map(|row| {
                let end = self
                    .last_col
                    .map(|last| last.saturating_add(1).min(row.len()))
                    .unwrap_or(row.len());
                row.get(self.first_col.min(end)..end)
                    .map(<[String]>::to_vec)
                    .unwrap_or_default()
            })
            .collect()
    }
}

/// Read a grid from a `.json` (`string[][]`) or `.csv` file.
pub fn load_grid(path: &Path) -> Result<RawGrid, SourceError> {
    debug!("loading grid from {}", path.display());
    let io_err = |source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    };

    if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("json")) {
        let text = std::fs::read_to_string(path).map_err(io_err)?;
        return Ok(serde_json::from_str(&text)?);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    let mut grid = RawGrid::new();
    for row in reader.records() {
        grid.push(row?.iter().map(str::to_string).collect());
    }
    Ok(grid)
}

/// Sheets stored as `<dir>/<spreadsheet_id>.json` or `<dir>/<spreadsheet_id>.csv`.
pub struct FileSource {
    dir: PathBuf,
}

impl FileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SheetSource for FileSource {
    fn fetch(&self, spreadsheet_id: &str, range: &str) -> Result<RawGrid, SourceError> {
        let range = CellRange::parse(range)?;
        let path = ["json", "csv"]
            .iter()
            .map(|ext| self.dir.join(format!("{spreadsheet_id}.{ext}")))
            .find(|p| p.exists())
            .ok_or_else(|| SourceError::NotFound(spreadsheet_id.to_string()))?;

        let grid = load_grid(&path)?;
        Ok(range.crop(&grid))
    }
}
