//! Cell-level comparison between a base grid and a working grid
//!
//! Rows and cells are matched by index only; there is no alignment or move
//! detection. Every cell of the union of both shapes gets a status, and the
//! accept operations copy base content into the working grid so that a
//! re-diff reports the copied cells as `Same`.

use serde::Serialize;

use crate::grid::{assign_cell, Grid};

/// Status of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiffStatus {
    Same,
    Modified,
    /// Present in base, missing from working
    BaseOnly,
    /// Present in working, missing from base
    ModOnly,
}

/// Which grids contain a row index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowPresence {
    Both,
    BaseOnly,
    WorkingOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffCell {
    pub column: usize,
    pub base: String,
    pub working: String,
    pub status: DiffStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRow {
    pub row: usize,
    pub cells: Vec<DiffCell>,
    pub status: DiffStatus,
    pub presence: RowPresence,
}

impl DiffRow {
    pub fn is_changed(&self) -> bool {
        self.status != DiffStatus::Same
    }

    /// Status of one column, `Same` past the compared width
    pub fn cell_status(&self, column: usize) -> DiffStatus {
        self.cells
            .get(column)
            .map_or(DiffStatus::Same, |cell| cell.status)
    }
}

/// Compare two grids cell by cell
pub fn diff(base: &Grid, working: &Grid) -> Vec<DiffRow> {
    let row_total = base.row_count().max(working.row_count());

    (0..row_total)
        .map(|r| {
            let in_base = r < base.row_count();
            let in_working = r < working.row_count();
            let base_len = base.row_len(r);
            let working_len = working.row_len(r);

            let cells: Vec<DiffCell> = (0..base_len.max(working_len))
                .map(|c| {
                    let base_value = base.cell(r, c);
                    let working_value = working.cell(r, c);
                    let status = if !in_working || c >= working_len {
                        DiffStatus::BaseOnly
                    } else if !in_base || c >= base_len {
                        DiffStatus::ModOnly
                    } else if base_value != working_value {
                        DiffStatus::Modified
                    } else {
                        DiffStatus::Same
                    };
                    DiffCell {
                        column: c,
                        base: base_value.to_string(),
                        working: working_value.to_string(),
                        status,
                    }
                })
                .collect();

            let presence = match (in_base, in_working) {
                (true, true) => RowPresence::Both,
                (true, false) => RowPresence::BaseOnly,
                _ => RowPresence::WorkingOnly,
            };

            let status = if cells.iter().all(|c| c.status == DiffStatus::Same) {
                DiffStatus::Same
            } else {
                match presence {
                    RowPresence::BaseOnly => DiffStatus::BaseOnly,
                    RowPresence::WorkingOnly => DiffStatus::ModOnly,
                    RowPresence::Both => DiffStatus::Modified,
                }
            };

            DiffRow {
                row: r,
                cells,
                status,
                presence,
            }
        })
        .collect()
}

/// Copy one base cell into the working grid
///
/// Returns the working grid unchanged when the base cell does not exist.
pub fn accept_cell(working: &Grid, base: &Grid, row: usize, col: usize) -> Grid {
    if !base.has_cell(row, col) {
        return working.clone();
    }
    let mut next = working.clone();
    assign_cell(&mut next, row, col, base.cell(row, col));
    next
}

/// Replace a working row with a copy of the base row
///
/// The whole row is overwritten, including trailing working-only cells.
/// Returns the working grid unchanged when `row` is past the base grid.
pub fn accept_row(working: &Grid, base: &Grid, row: usize) -> Grid {
    let Some(base_row) = base.row(row) else {
        return working.clone();
    };
    let mut next = working.clone();
    let rows = next.rows_mut();
    while rows.len() <= row {
        rows.push(Vec::new());
    }
    rows[row] = base_row.clone();
    next
}

/// Counts of changed rows and cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub changed_rows: usize,
    pub modified_cells: usize,
    pub base_only_cells: usize,
    pub mod_only_cells: usize,
}

impl DiffSummary {
    pub fn from_rows(rows: &[DiffRow]) -> Self {
        let mut summary = Self::default();
        for row in rows {
            if row.is_changed() {
                summary.changed_rows += 1;
            }
            for cell in &row.cells {
                match cell.status {
                    DiffStatus::Same => {}
                    DiffStatus::Modified => summary.modified_cells += 1,
                    DiffStatus::BaseOnly => summary.base_only_cells += 1,
                    DiffStatus::ModOnly => summary.mod_only_cells += 1,
                }
            }
        }
        summary
    }

    pub fn is_clean(&self) -> bool {
        self.changed_rows == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statuses(row: &DiffRow) -> Vec<DiffStatus> {
        row.cells.iter().map(|c| c.status).collect()
    }

    #[test]
    fn test_diff_extra_working_row() {
        let base = Grid::from_strs(&[&["1", "2"]]);
        let working = Grid::from_strs(&[&["1", "2"], &["3", "4"]]);
        let rows = diff(&base, &working);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].status, DiffStatus::Same);
        assert_eq!(rows[1].status, DiffStatus::ModOnly);
        assert_eq!(rows[1].presence, RowPresence::WorkingOnly);
        assert_eq!(statuses(&rows[1]), vec![DiffStatus::ModOnly; 2]);
    }

    #[test]
    fn test_diff_missing_working_row() {
        let base = Grid::from_strs(&[&["a"], &["b", "c"]]);
        let working = Grid::from_strs(&[&["a"]]);
        let rows = diff(&base, &working);

        assert_eq!(rows[1].status, DiffStatus::BaseOnly);
        assert_eq!(rows[1].presence, RowPresence::BaseOnly);
        assert_eq!(statuses(&rows[1]), vec![DiffStatus::BaseOnly; 2]);
    }

    #[test]
    fn test_diff_ragged_cells() {
        let base = Grid::from_strs(&[&["a", "b", "c"]]);
        let working = Grid::from_strs(&[&["a", "x"]]);
        let rows = diff(&base, &working);

        assert_eq!(
            statuses(&rows[0]),
            vec![DiffStatus::Same, DiffStatus::Modified, DiffStatus::BaseOnly]
        );
        assert_eq!(rows[0].status, DiffStatus::Modified);
        assert_eq!(rows[0].cells[2].base, "c");
        assert_eq!(rows[0].cells[2].working, "");

        let rows = diff(&working, &base);
        assert_eq!(rows[0].cell_status(2), DiffStatus::ModOnly);
    }

    #[test]
    fn test_diff_self_identity() {
        let grid = Grid::from_strs(&[&["h1", "h2"], &["x"], &[], &["", "y", "z"]]);
        for row in diff(&grid, &grid) {
            assert_eq!(row.status, DiffStatus::Same);
            assert!(row.cells.iter().all(|c| c.status == DiffStatus::Same));
        }
    }

    #[test]
    fn test_accept_cell_converges() {
        let base = Grid::from_strs(&[&["a", "b"], &["c", "d", "e"]]);
        let working = Grid::from_strs(&[&["a", "B"]]);

        for (row, col) in [(0, 1), (1, 2), (1, 0)] {
            let accepted = accept_cell(&working, &base, row, col);
            let rows = diff(&base, &accepted);
            assert_eq!(rows[row].cell_status(col), DiffStatus::Same);
        }
    }

    #[test]
    fn test_accept_cell_missing_base_cell_is_noop() {
        let base = Grid::from_strs(&[&["a"]]);
        let working = Grid::from_strs(&[&["a", "extra"]]);

        assert_eq!(accept_cell(&working, &base, 0, 1), working);
        assert_eq!(accept_cell(&working, &base, 4, 0), working);
    }

    #[test]
    fn test_accept_row_overwrites_whole_row() {
        let base = Grid::from_strs(&[&["a", "b"], &["c"]]);
        let working = Grid::from_strs(&[&["a", "x", "trailing"]]);

        let accepted = accept_row(&working, &base, 0);
        assert_eq!(accepted.row(0), base.row(0));
        assert!(!diff(&base, &accepted)[0].is_changed());

        let grown = accept_row(&working, &base, 1);
        assert_eq!(grown.row_count(), 2);
        assert_eq!(diff(&base, &grown)[1].status, DiffStatus::Same);
    }

    #[test]
    fn test_accept_row_past_base_is_noop() {
        let base = Grid::from_strs(&[&["a"]]);
        let working = Grid::from_strs(&[&["a"], &["b"]]);
        assert_eq!(accept_row(&working, &base, 1), working);
    }

    #[test]
    fn test_diff_summary() {
        let base = Grid::from_strs(&[&["a", "b"], &["c"]]);
        let working = Grid::from_strs(&[&["a", "x"], &["c", "new"], &["z"]]);
        let summary = DiffSummary::from_rows(&diff(&base, &working));

        assert_eq!(summary.changed_rows, 3);
        assert_eq!(summary.modified_cells, 1);
        assert_eq!(summary.mod_only_cells, 2);
        assert_eq!(summary.base_only_cells, 0);
        assert!(!summary.is_clean());
    }
}
