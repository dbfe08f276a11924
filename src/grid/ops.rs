//! Structural grid mutations
//!
//! Every operation takes a snapshot and returns a new one. Out-of-range
//! indices pad the grid instead of failing; deletes past the end are no-ops.

use super::model::{Grid, Row};

/// Assign a cell, growing rows and cells as needed
pub fn set_cell(grid: &Grid, row: usize, col: usize, value: &str) -> Grid {
    let mut next = grid.clone();
    assign_cell(&mut next, row, col, value);
    next
}

/// In-place grow-and-assign shared with the diff accept operations
pub(crate) fn assign_cell(grid: &mut Grid, row: usize, col: usize, value: &str) {
    let rows = grid.rows_mut();
    while rows.len() <= row {
        rows.push(Row::new());
    }
    let cells = &mut rows[row];
    while cells.len() <= col {
        cells.push(String::new());
    }
    cells[col] = value.to_string();
}

/// Insert one empty cell at `index` in every row
///
/// Short rows are padded to `index` first, so the new column lines up.
pub fn insert_column(grid: &Grid, index: usize) -> Grid {
    let mut next = grid.clone();
    for row in next.rows_mut().iter_mut() {
        while row.len() < index {
            row.push(String::new());
        }
        row.insert(index, String::new());
    }
    next
}

/// Remove the cell at `index` from every row long enough to have one
pub fn delete_column(grid: &Grid, index: usize) -> Grid {
    let mut next = grid.clone();
    for row in next.rows_mut().iter_mut() {
        if index < row.len() {
            row.remove(index);
        }
    }
    next
}

/// Insert a row of empty cells at `index`
///
/// The new row is as wide as the widest existing row, and at least one cell
/// wide. When `index` is past the end, the grid is padded with rows of the
/// same width first. An empty grid counts as one empty line, the way the
/// empty text reads in an editor, so the inserted row is visible once
/// serialized.
pub fn insert_row(grid: &Grid, index: usize) -> Grid {
    let width = grid.column_count().max(1);
    let mut next = grid.clone();
    let rows = next.rows_mut();
    if rows.is_empty() {
        rows.push(vec![String::new()]);
    }
    while rows.len() < index {
        rows.push(vec![String::new(); width]);
    }
    rows.insert(index, vec![String::new(); width]);
    next
}

/// Remove the row at `index` if present
pub fn delete_row(grid: &Grid, index: usize) -> Grid {
    let mut next = grid.clone();
    let rows = next.rows_mut();
    if index < rows.len() {
        rows.remove(index);
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_cell_existing() {
        let grid = Grid::from_strs(&[&["a", "b"]]);
        let next = set_cell(&grid, 0, 1, "updated");

        assert_eq!(next.cell(0, 1), "updated");
        assert_eq!(grid.cell(0, 1), "b");
    }

    #[test]
    fn test_set_cell_grows_rows_and_cells() {
        let grid = Grid::from_strs(&[&["a"]]);
        let next = set_cell(&grid, 2, 3, "x");

        assert_eq!(next.row_count(), 3);
        assert_eq!(next.row_len(1), 0);
        assert_eq!(next.row_len(2), 4);
        assert_eq!(next.cell(2, 3), "x");
    }

    #[test]
    fn test_insert_column_pads_short_rows() {
        let grid = Grid::from_strs(&[&["a", "b"], &["c"]]);
        let next = insert_column(&grid, 1);

        assert_eq!(next, Grid::from_strs(&[&["a", "", "b"], &["c", ""]]));
    }

    #[test]
    fn test_insert_column_past_end() {
        let grid = Grid::from_strs(&[&["a"], &[]]);
        let next = insert_column(&grid, 3);

        assert_eq!(next, Grid::from_strs(&[&["a", "", "", ""], &["", "", "", ""]]));
    }

    #[test]
    fn test_delete_column_skips_short_rows() {
        let grid = Grid::from_strs(&[&["a", "b", "c"], &["d"]]);
        let next = delete_column(&grid, 1);

        assert_eq!(next, Grid::from_strs(&[&["a", "c"], &["d"]]));
    }

    #[test]
    fn test_delete_column_out_of_range_is_noop() {
        let grid = Grid::from_strs(&[&["a", "b"], &["c"]]);
        assert_eq!(delete_column(&grid, 5), grid);
    }

    #[test]
    fn test_insert_row_uses_max_width() {
        let grid = Grid::from_strs(&[&["a", "b", "c"], &["d"]]);
        let next = insert_row(&grid, 1);

        assert_eq!(next.row_count(), 3);
        assert_eq!(next.row(1), Some(&vec![String::new(); 3]));
        assert_eq!(next.cell(2, 0), "d");
    }

    #[test]
    fn test_insert_row_past_end_pads() {
        let grid = Grid::from_strs(&[&["a", "b"]]);
        let next = insert_row(&grid, 3);

        assert_eq!(next.row_count(), 4);
        for r in 1..4 {
            assert_eq!(next.row_len(r), 2);
        }
    }

    #[test]
    fn test_insert_row_into_empty_grid() {
        let next = insert_row(&Grid::new(), 0);

        assert_eq!(next, Grid::from_strs(&[&[""], &[""]]));
        assert_eq!(crate::grid::serialize(&next, crate::grid::TAB), "\n");
        assert_eq!(insert_row(&Grid::new(), 2).row_count(), 3);
    }

    #[test]
    fn test_delete_row() {
        let grid = Grid::from_strs(&[&["a"], &["b"], &["c"]]);

        assert_eq!(delete_row(&grid, 1), Grid::from_strs(&[&["a"], &["c"]]));
        assert_eq!(delete_row(&grid, 3), grid);
    }

    #[test]
    fn test_padding_monotonicity() {
        let grid = Grid::from_strs(&[&["a", "b"], &["c"], &[]]);

        let wider = insert_column(&grid, 1);
        for r in 0..grid.row_count() {
            assert!(wider.row_len(r) >= grid.row_len(r));
        }

        let taller = insert_row(&grid, 0);
        assert!(taller.row_count() > grid.row_count());
        assert!(taller.column_count() >= grid.column_count());
    }
}
