//! Grid data model types
//!
//! A grid is a ragged list of rows. Reads past the end of a row (or past the
//! last row) yield the empty string, so callers never have to bounds-check.

use serde::Serialize;

/// Field separator for the tab-delimited format
pub const TAB: char = '\t';

/// A single row of cell strings
pub type Row = Vec<String>;

/// Position of a cell in the grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CellAddress {
    pub row: usize,
    pub col: usize,
}

impl CellAddress {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Line ending convention of a source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
    Cr,
}

impl LineEnding {
    /// The literal line break
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
            LineEnding::Cr => "\r",
        }
    }

    /// Detect the convention from the first line break in `text`
    ///
    /// Text without any line break reports `Lf`.
    pub fn detect(text: &str) -> Self {
        let bytes = text.as_bytes();
        for (i, b) in bytes.iter().enumerate() {
            match b {
                b'\n' => return LineEnding::Lf,
                b'\r' => {
                    return if bytes.get(i + 1) == Some(&b'\n') {
                        LineEnding::CrLf
                    } else {
                        LineEnding::Cr
                    };
                }
                _ => {}
            }
        }
        LineEnding::Lf
    }
}

/// In-memory ragged grid of cell strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Row>,
}

impl Grid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grid from owned rows
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Convenience constructor for tests and literals
    pub fn from_strs(rows: &[&[&str]]) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell value, or `""` when the address is past the data
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Whether the cell physically exists (not just padding by convention)
    pub fn has_cell(&self, row: usize, col: usize) -> bool {
        self.rows.get(row).is_some_and(|r| col < r.len())
    }

    pub fn row(&self, row: usize) -> Option<&Row> {
        self.rows.get(row)
    }

    /// Length of a row, 0 when the row does not exist
    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Values of one column across the given row range, padded with `""`
    pub fn column_values(&self, col: usize, rows: std::ops::Range<usize>) -> Vec<&str> {
        rows.map(|r| self.cell(r, col)).collect()
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Row> {
        &mut self.rows
    }
}
