//! Diff mode: base loading and accept operations

use crate::commands::Cmd;
use crate::diff::{accept_cell, accept_row};
use crate::messages::DiffMsg;
use crate::state::GridView;

use super::document::rewrite;

pub fn update_diff(view: &mut GridView, msg: DiffMsg) -> Option<Cmd> {
    match msg {
        DiffMsg::Open(path) => {
            view.status = Some(format!("Loading {}", path.display()));
            Some(Cmd::LoadBase(path))
        }
        DiffMsg::BaseLoaded { path, grid } => {
            tracing::info!(path = %path.display(), rows = grid.row_count(), "base loaded");
            view.set_base(path, grid);
            view.status = view.diff_summary().map(|s| {
                if s.is_clean() {
                    "No differences".to_string()
                } else {
                    format!("{} rows differ", s.changed_rows)
                }
            });
            Some(Cmd::Redraw)
        }
        DiffMsg::Exit => {
            view.clear_base();
            view.status = None;
            Some(Cmd::Redraw)
        }
        DiffMsg::AcceptCell { row, col } => {
            let Some(base) = view.base.as_ref() else {
                return Some(no_base(view));
            };
            let next = accept_cell(&view.grid, &base.grid, row, col);
            rewrite(view, next, "accept cell")
        }
        DiffMsg::AcceptRow(row) => {
            let Some(base) = view.base.as_ref() else {
                return Some(no_base(view));
            };
            let next = accept_row(&view.grid, &base.grid, row);
            rewrite(view, next, "accept row")
        }
    }
}

fn no_base(view: &mut GridView) -> Cmd {
    let msg = "No base file loaded".to_string();
    view.status = Some(msg.clone());
    Cmd::Notify(msg)
}
