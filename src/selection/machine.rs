//! Pointer and keyboard driven selection state machine
//!
//! The machine only knows cell addresses. Rendering asks it what is
//! selected; writes come back out as [`CellEdit`] values for the document
//! model to apply.

use crate::grid::{CellAddress, Grid};
use crate::input::{Direction, KeyCode, Keystroke, PointerEvent, PointerTarget};

use super::edit::CellEditState;
use super::range::{GridExtent, SelectionMode, SelectionRange};

/// A committed cell value leaving the selection model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEdit {
    pub position: CellAddress,
    pub old_value: String,
    pub new_value: String,
}

/// Interaction state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// No drag in progress, zero or more cells highlighted
    #[default]
    Idle,
    /// Pointer held down, extending in the given mode
    Dragging(SelectionMode),
    /// A single cell is being edited
    Editing(CellEditState),
}

#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    state: SelectionState,
    range: Option<SelectionRange>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn range(&self) -> Option<&SelectionRange> {
        self.range.as_ref()
    }

    pub fn anchor(&self) -> Option<CellAddress> {
        self.range.map(|r| r.anchor)
    }

    pub fn editing(&self) -> Option<&CellEditState> {
        match &self.state {
            SelectionState::Editing(edit) => Some(edit),
            _ => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing().is_some()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SelectionState::Dragging(_))
    }

    pub fn is_selected(&self, addr: CellAddress, extent: GridExtent) -> bool {
        self.range.is_some_and(|r| r.contains(addr, extent))
    }

    /// Selected cells in row-major order
    pub fn selected_cells(&self, extent: GridExtent) -> Vec<CellAddress> {
        self.range
            .and_then(|r| r.bounds(extent))
            .map(|rect| rect.cells().collect())
            .unwrap_or_default()
    }

    /// Replace the selection with one cell, leaving any drag or edit
    pub fn select_cell(&mut self, addr: CellAddress) {
        self.state = SelectionState::Idle;
        self.range = Some(SelectionRange::cell(addr));
    }

    pub fn select_all(&mut self) {
        let anchor = self.anchor().unwrap_or_default();
        self.range = Some(SelectionRange::new(anchor, anchor, SelectionMode::All));
        self.state = SelectionState::Idle;
    }

    pub fn clear(&mut self) {
        self.range = None;
        self.state = SelectionState::Idle;
    }

    /// Drop the selection if the grid shrank underneath it
    pub fn clamp_to(&mut self, extent: GridExtent) {
        if let SelectionState::Editing(edit) = &self.state {
            if !extent.contains(edit.position) {
                self.state = SelectionState::Idle;
            }
        }
        if let Some(range) = self.range {
            let stale = range.mode != SelectionMode::All
                && (!extent.contains(range.anchor) || !extent.contains(range.focus));
            if stale {
                self.range = None;
            }
        }
    }

    /// Feed a pointer event
    ///
    /// A press while editing commits the edit first, which is returned.
    pub fn handle_pointer(&mut self, event: PointerEvent, grid: &Grid) -> Option<CellEdit> {
        match event {
            PointerEvent::Down { target, mods } => {
                let committed = self.finish_edit(true);
                self.pointer_down(target, mods.shift());
                committed
            }
            PointerEvent::Move { target } => {
                self.pointer_move(target, GridExtent::of(grid));
                None
            }
            PointerEvent::Up => {
                if let SelectionState::Dragging(mode) = self.state {
                    if let Some(range) = self.range.as_mut() {
                        if mode == SelectionMode::Cell && range.anchor == range.focus {
                            *range = SelectionRange::cell(range.anchor);
                        }
                    }
                    self.state = SelectionState::Idle;
                    tracing::debug!(range = ?self.range, "drag ended");
                }
                None
            }
        }
    }

    fn pointer_down(&mut self, target: PointerTarget, shift: bool) {
        if target == PointerTarget::Corner {
            self.select_all();
            return;
        }

        if shift {
            if let (Some(anchor), Some(addr)) = (self.anchor(), target_cell(target)) {
                self.range = Some(SelectionRange::new(anchor, addr, SelectionMode::Cell));
                self.state = SelectionState::Idle;
                return;
            }
        }

        let (addr, mode) = match target {
            PointerTarget::Cell(addr) => (addr, SelectionMode::Cell),
            PointerTarget::ColumnHeader(col) => (CellAddress::new(0, col), SelectionMode::Column),
            PointerTarget::RowGutter(row) => (CellAddress::new(row, 0), SelectionMode::Row),
            PointerTarget::Corner => return,
        };
        self.range = Some(SelectionRange::new(addr, addr, mode));
        self.state = SelectionState::Dragging(mode);
    }

    fn pointer_move(&mut self, target: PointerTarget, extent: GridExtent) {
        let SelectionState::Dragging(mode) = self.state else {
            return;
        };
        let Some(range) = self.range.as_mut() else {
            return;
        };

        let focus = match (mode, target) {
            (SelectionMode::Row, PointerTarget::Cell(addr)) => Some(CellAddress::new(addr.row, 0)),
            (SelectionMode::Row, PointerTarget::RowGutter(row)) => Some(CellAddress::new(row, 0)),
            (SelectionMode::Column, PointerTarget::Cell(addr)) => Some(CellAddress::new(0, addr.col)),
            (SelectionMode::Column, PointerTarget::ColumnHeader(col)) => {
                Some(CellAddress::new(0, col))
            }
            (SelectionMode::Cell, target) => target_cell(target),
            _ => None,
        };

        // Targets past the grid extent (e.g. padding cells) are ignored
        if let Some(focus) = focus {
            let inside = match mode {
                SelectionMode::Row => focus.row < extent.rows,
                SelectionMode::Column => focus.col < extent.cols,
                _ => extent.contains(focus),
            };
            if inside {
                range.focus = focus;
            }
        }
    }

    /// Feed a keystroke
    ///
    /// Returns the cell write produced by committing an edit, if any.
    pub fn handle_key(&mut self, stroke: Keystroke, grid: &Grid) -> Option<CellEdit> {
        let extent = GridExtent::of(grid);
        match self.state {
            SelectionState::Editing(_) => self.editing_key(stroke, grid, extent),
            SelectionState::Dragging(_) => None,
            SelectionState::Idle => {
                self.idle_key(stroke, grid, extent);
                None
            }
        }
    }

    fn idle_key(&mut self, stroke: Keystroke, grid: &Grid, extent: GridExtent) {
        let mods = stroke.mods;

        if mods.has_cmd() && matches!(stroke.key, KeyCode::Char('a') | KeyCode::Char('A')) {
            self.select_all();
            return;
        }

        match stroke.key {
            KeyCode::Escape => self.clear(),
            KeyCode::Arrow(dir) if mods.shift() => self.extend(dir, extent),
            KeyCode::Arrow(dir) if mods.is_empty() => self.step(dir, extent),
            KeyCode::Enter if mods.is_empty() => {
                if let Some(addr) = self.single_cell(extent) {
                    self.start_edit(CellEditState::new(addr, grid.cell(addr.row, addr.col).into()));
                }
            }
            _ => {
                if let Some(ch) = stroke.printable() {
                    if let Some(addr) = self.single_cell(extent) {
                        let original = grid.cell(addr.row, addr.col).to_string();
                        self.start_edit(CellEditState::with_char(addr, original, ch));
                    }
                }
            }
        }
    }

    fn single_cell(&self, extent: GridExtent) -> Option<CellAddress> {
        let range = self.range?;
        let rect = range.bounds(extent)?;
        (rect.cell_count() == 1 && extent.contains(CellAddress::new(rect.top, rect.left)))
            .then(|| CellAddress::new(rect.top, rect.left))
    }

    fn step(&mut self, dir: Direction, extent: GridExtent) {
        let Some(anchor) = self.anchor() else {
            return;
        };
        if let Some(next) = extent.step(anchor, dir.delta()) {
            self.range = Some(SelectionRange::cell(next));
        }
    }

    fn extend(&mut self, dir: Direction, extent: GridExtent) {
        let Some(range) = self.range else {
            return;
        };
        if let Some(focus) = extent.step(range.focus, dir.delta()) {
            self.range = Some(SelectionRange::new(range.anchor, focus, SelectionMode::Cell));
        }
    }

    fn start_edit(&mut self, edit: CellEditState) {
        tracing::debug!(row = edit.position.row, col = edit.position.col, "editing cell");
        self.range = Some(SelectionRange::cell(edit.position));
        self.state = SelectionState::Editing(edit);
    }

    fn editing_key(&mut self, stroke: Keystroke, grid: &Grid, extent: GridExtent) -> Option<CellEdit> {
        let SelectionState::Editing(edit) = &mut self.state else {
            return None;
        };
        let position = edit.position;

        let next = match stroke.key {
            KeyCode::Enter => Some(extent.step(position, (1, 0))),
            KeyCode::Tab if stroke.mods.shift() => Some(extent.step(position, (0, -1))),
            KeyCode::Tab => Some(extent.step(position, (0, 1))),
            KeyCode::Escape => {
                self.finish_edit(false);
                return None;
            }
            KeyCode::Backspace => {
                edit.delete_backward();
                None
            }
            KeyCode::Delete => {
                edit.delete_forward();
                None
            }
            KeyCode::Arrow(Direction::Left) => {
                edit.cursor_left();
                None
            }
            KeyCode::Arrow(Direction::Right) => {
                edit.cursor_right();
                None
            }
            KeyCode::Home => {
                edit.cursor_home();
                None
            }
            KeyCode::End => {
                edit.cursor_end();
                None
            }
            _ => {
                if let Some(ch) = stroke.printable() {
                    edit.insert_char(ch);
                }
                None
            }
        };

        let target = next?;
        let committed = self.finish_edit(true);
        if let Some(addr) = target {
            self.start_edit(CellEditState::new(addr, grid.cell(addr.row, addr.col).into()));
        }
        committed
    }

    /// Focus left the grid: commit any edit, end any drag
    pub fn focus_lost(&mut self) -> Option<CellEdit> {
        if self.is_dragging() {
            self.state = SelectionState::Idle;
        }
        self.finish_edit(true)
    }

    /// Leave editing; an unchanged or discarded edit produces no write
    fn finish_edit(&mut self, commit: bool) -> Option<CellEdit> {
        if !self.is_editing() {
            return None;
        }
        let SelectionState::Editing(edit) = std::mem::take(&mut self.state) else {
            return None;
        };
        self.range = Some(SelectionRange::cell(edit.position));

        if !commit || !edit.is_modified() {
            return None;
        }
        let position = edit.position;
        let old_value = edit.original.clone();
        Some(CellEdit {
            position,
            old_value,
            new_value: edit.into_buffer(),
        })
    }

    /// Selection's bounding rectangle as comma/newline text
    ///
    /// Gaps inside the rectangle come out as empty strings.
    pub fn copy_text(&self, grid: &Grid) -> Option<String> {
        let rect = self.range?.bounds(GridExtent::of(grid))?;
        let text = (rect.top..=rect.bottom)
            .map(|r| {
                (rect.left..=rect.right)
                    .map(|c| grid.cell(r, c))
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join("\n");
        Some(text)
    }
}

fn target_cell(target: PointerTarget) -> Option<CellAddress> {
    match target {
        PointerTarget::Cell(addr) => Some(addr),
        PointerTarget::ColumnHeader(col) => Some(CellAddress::new(0, col)),
        PointerTarget::RowGutter(_) | PointerTarget::Corner => None,
    }
}
