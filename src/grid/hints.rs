//! Per-column presentation hints
//!
//! Type, display width and palette color for each column. These feed the
//! render surface only; nothing here is persisted.

use serde::Serialize;

use super::column_type::{estimate, ColumnType};
use super::model::Grid;

/// Upper bound for a column's display width in characters
pub const MAX_COLUMN_WIDTH: usize = 100;

const DARK_PALETTE: [&str; 12] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8", "#F7DC6F",
    "#BB8FCE", "#85C1E9", "#82E0AA", "#F8C471",
];

const LIGHT_PALETTE: [&str; 12] = [
    "#C0392B", "#138D75", "#2980B9", "#27AE60", "#F39C12", "#8E44AD", "#16A085", "#D35400",
    "#7D3C98", "#1F618D", "#239B56", "#CA6F1E",
];

/// Hints for one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnHints {
    pub column_type: ColumnType,
    /// Longest cell in characters, capped at [`MAX_COLUMN_WIDTH`]
    pub width: usize,
    pub color: &'static str,
}

/// Palette color for a column, cycling every 12 columns
pub fn column_color(index: usize, dark: bool) -> &'static str {
    let palette = if dark { &DARK_PALETTE } else { &LIGHT_PALETTE };
    palette[index % palette.len()]
}

/// Maximum cell width in characters for each column
pub fn column_widths(grid: &Grid) -> Vec<usize> {
    let mut widths = vec![0; grid.column_count()];
    for row in grid.rows() {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(cell.chars().count());
        }
    }
    widths
}

/// Compute hints for every column
///
/// Types are estimated over the body only when the first row is a header.
pub fn compute_column_hints(grid: &Grid, has_header: bool, dark: bool) -> Vec<ColumnHints> {
    let body_start = usize::from(has_header).min(grid.row_count());
    let widths = column_widths(grid);

    widths
        .into_iter()
        .enumerate()
        .map(|(col, width)| {
            let values = grid.column_values(col, body_start..grid.row_count());
            ColumnHints {
                column_type: estimate(&values),
                width: width.min(MAX_COLUMN_WIDTH),
                color: column_color(col, dark),
            }
        })
        .collect()
}
