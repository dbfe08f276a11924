//! Selection ranges and their rectangular closure

use crate::grid::{CellAddress, Grid};

/// How anchor and focus expand into a selected set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Bounded rectangle between anchor and focus
    Cell,
    /// Full rows between anchor and focus
    Row,
    /// Full columns between anchor and focus
    Column,
    /// Every addressable cell
    All,
}

/// Addressable size of the grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridExtent {
    pub rows: usize,
    pub cols: usize,
}

impl GridExtent {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn of(grid: &Grid) -> Self {
        Self::new(grid.row_count(), grid.column_count())
    }

    pub fn contains(&self, addr: CellAddress) -> bool {
        addr.row < self.rows && addr.col < self.cols
    }

    /// One step from `from` in the given delta, if it stays inside
    pub fn step(&self, from: CellAddress, delta: (isize, isize)) -> Option<CellAddress> {
        let row = from.row.checked_add_signed(delta.0)?;
        let col = from.col.checked_add_signed(delta.1)?;
        let next = CellAddress::new(row, col);
        self.contains(next).then_some(next)
    }
}

/// Inclusive rectangle of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub top: usize,
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
}

impl CellRect {
    /// Rectangle spanned by two corners, in any order
    pub fn spanning(a: CellAddress, b: CellAddress) -> Self {
        Self {
            top: a.row.min(b.row),
            left: a.col.min(b.col),
            bottom: a.row.max(b.row),
            right: a.col.max(b.col),
        }
    }

    pub fn contains(&self, addr: CellAddress) -> bool {
        (self.top..=self.bottom).contains(&addr.row) && (self.left..=self.right).contains(&addr.col)
    }

    pub fn cell_count(&self) -> usize {
        (self.bottom - self.top + 1) * (self.right - self.left + 1)
    }

    /// Cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = CellAddress> + '_ {
        (self.top..=self.bottom)
            .flat_map(move |r| (self.left..=self.right).map(move |c| CellAddress::new(r, c)))
    }
}

/// Anchor, focus and mode of the current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    pub anchor: CellAddress,
    pub focus: CellAddress,
    pub mode: SelectionMode,
}

impl SelectionRange {
    /// A single cell
    pub fn cell(addr: CellAddress) -> Self {
        Self {
            anchor: addr,
            focus: addr,
            mode: SelectionMode::Cell,
        }
    }

    pub fn new(anchor: CellAddress, focus: CellAddress, mode: SelectionMode) -> Self {
        Self {
            anchor,
            focus,
            mode,
        }
    }

    /// The selected rectangle, or `None` when it covers no addressable cell
    ///
    /// Cell-mode rectangles are not clipped to the extent: the anchor and
    /// focus always come from addressable cells.
    pub fn bounds(&self, extent: GridExtent) -> Option<CellRect> {
        let last_row = extent.rows.checked_sub(1);
        let last_col = extent.cols.checked_sub(1);

        match self.mode {
            SelectionMode::Cell => Some(CellRect::spanning(self.anchor, self.focus)),
            SelectionMode::Row => Some(CellRect {
                top: self.anchor.row.min(self.focus.row),
                bottom: self.anchor.row.max(self.focus.row),
                left: 0,
                right: last_col?,
            }),
            SelectionMode::Column => Some(CellRect {
                top: 0,
                bottom: last_row?,
                left: self.anchor.col.min(self.focus.col),
                right: self.anchor.col.max(self.focus.col),
            }),
            SelectionMode::All => Some(CellRect {
                top: 0,
                left: 0,
                bottom: last_row?,
                right: last_col?,
            }),
        }
    }

    pub fn contains(&self, addr: CellAddress, extent: GridExtent) -> bool {
        self.bounds(extent).is_some_and(|rect| rect.contains(addr))
    }

    /// Whether exactly one cell is selected
    pub fn is_single_cell(&self, extent: GridExtent) -> bool {
        self.bounds(extent).is_some_and(|rect| rect.cell_count() == 1)
    }
}
