//! Pointer and keyboard interaction

use crate::commands::Cmd;
use crate::input::{KeyCode, Keystroke};
use crate::messages::{SelectionMsg, ViewMsg};
use crate::selection::CellEdit;
use crate::state::GridView;

use super::document::write_cell;
use super::view::update_view;

pub fn update_selection(view: &mut GridView, msg: SelectionMsg) -> Option<Cmd> {
    match msg {
        SelectionMsg::Pointer(event) => {
            let committed = view.selection.handle_pointer(event, &view.grid);
            commit(view, committed)
        }
        SelectionMsg::Key(stroke) => {
            if let Some(cmd) = shortcut(view, stroke) {
                return Some(cmd);
            }
            let committed = view.selection.handle_key(stroke, &view.grid);
            commit(view, committed)
        }
        SelectionMsg::FocusLost => {
            let committed = view.selection.focus_lost();
            commit(view, committed)
        }
        SelectionMsg::Copy => copy(view),
    }
}

fn copy(view: &GridView) -> Option<Cmd> {
    view.selection.copy_text(&view.grid).map(Cmd::WriteClipboard)
}

/// Host-level shortcuts, only outside of cell editing
fn shortcut(view: &mut GridView, stroke: Keystroke) -> Option<Cmd> {
    if view.selection.is_editing() || !stroke.mods.has_cmd() {
        return None;
    }
    match stroke.key {
        KeyCode::Char('c') | KeyCode::Char('C') => Some(copy(view).unwrap_or_default()),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Cmd::Save),
        KeyCode::Char('g') | KeyCode::Char('G') => {
            let msg = if stroke.mods.shift() {
                ViewMsg::FindPrev
            } else {
                ViewMsg::FindNext
            };
            Some(update_view(view, msg).unwrap_or_default())
        }
        _ => None,
    }
}

fn commit(view: &mut GridView, committed: Option<CellEdit>) -> Option<Cmd> {
    let Some(edit) = committed else {
        return Some(Cmd::Redraw);
    };
    tracing::debug!(
        row = edit.position.row,
        col = edit.position.col,
        old = %edit.old_value,
        "cell edit committed"
    );
    let write = write_cell(view, edit.position.row, edit.position.col, &edit.new_value);
    Some(Cmd::batch(vec![write.unwrap_or_default(), Cmd::Redraw]))
}
