//! Document mutations
//!
//! Each mutation computes the next grid and hands its text to the session.
//! The view's own grid only changes once the session reports the write back.

use crate::commands::{Cmd, DocumentEdit};
use crate::grid::{
    delete_column, delete_row, insert_column, insert_row, locate_cell, replace_range,
    sanitize_cell_value, set_cell, sort_rows, Grid,
};
use crate::messages::DocumentMsg;
use crate::state::GridView;

pub fn update_document(view: &mut GridView, msg: DocumentMsg) -> Option<Cmd> {
    match msg {
        DocumentMsg::SetCell { row, col, value } => write_cell(view, row, col, &value),
        DocumentMsg::InsertRow(index) => rewrite(view, insert_row(&view.grid, index), "insert row"),
        DocumentMsg::DeleteRow(index) => {
            if index >= view.grid.row_count() {
                return None;
            }
            rewrite(view, delete_row(&view.grid, index), "delete row")
        }
        DocumentMsg::InsertColumn(index) => {
            rewrite(view, insert_column(&view.grid, index), "insert column")
        }
        DocumentMsg::DeleteColumn(index) => {
            if index >= view.grid.column_count() {
                return None;
            }
            rewrite(view, delete_column(&view.grid, index), "delete column")
        }
        DocumentMsg::Sort { column, ascending } => {
            let sorted = sort_rows(&view.grid, column, ascending, view.has_header());
            rewrite(view, sorted, "sort")
        }
        DocumentMsg::Save => Some(Cmd::Save),
        DocumentMsg::Written(text) => {
            view.reload(text);
            Some(Cmd::Redraw)
        }
        DocumentMsg::ExternalChange(text) => {
            if text == view.text {
                tracing::debug!("external change with identical text, skipped");
                return None;
            }
            tracing::info!("reloading after external change");
            view.reload(text);
            Some(Cmd::Redraw)
        }
    }
}

/// Write one cell, preferring a targeted replacement of just that span
///
/// The targeted form is only offered when the cell already exists in the
/// text and replacing its span yields exactly the full rewrite.
pub fn write_cell(view: &GridView, row: usize, col: usize, value: &str) -> Option<Cmd> {
    let value = sanitize_cell_value(value, view.separator);
    let exists = view.grid.has_cell(row, col);
    if exists && view.grid.cell(row, col) == value {
        return None;
    }

    let next = set_cell(&view.grid, row, col, &value);
    let full_text = view.serialize(&next);

    let targeted = if exists {
        locate_cell(&view.text, view.separator, row, col).filter(|range| {
            replace_range(&view.text, *range, &value).as_deref() == Some(full_text.as_str())
        })
    } else {
        None
    };

    Some(Cmd::ApplyEdit(DocumentEdit {
        targeted: targeted.map(|range| (range, value)),
        full_text,
        label: "set cell",
    }))
}

/// Replace the whole document with `next`
pub(super) fn rewrite(view: &GridView, next: Grid, label: &'static str) -> Option<Cmd> {
    let full_text = view.serialize(&next);
    if full_text == view.text {
        return None;
    }
    Some(Cmd::ApplyEdit(DocumentEdit::full(full_text, label)))
}
