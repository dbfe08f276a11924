//! Row feed, find and settings

use crate::commands::Cmd;
use crate::feed::DEFAULT_MARGIN;
use crate::grid::CellAddress;
use crate::messages::ViewMsg;
use crate::state::GridView;

pub fn update_view(view: &mut GridView, msg: ViewMsg) -> Option<Cmd> {
    match msg {
        ViewMsg::LoadMoreRows { last_visible_row } => {
            if !view.feed.needs_more(last_visible_row, DEFAULT_MARGIN) {
                return None;
            }
            let chunk = view.feed.next()?;
            view.loaded_rows = chunk.end_row();
            Some(Cmd::Redraw)
        }
        ViewMsg::Find(query) => {
            view.find.search(&view.grid, &query);
            reveal_match(view, view.find.current())
        }
        ViewMsg::FindNext => {
            let found = view.find.next();
            reveal_match(view, found)
        }
        ViewMsg::FindPrev => {
            let found = view.find.previous();
            reveal_match(view, found)
        }
        ViewMsg::Toggle(toggle) => {
            let on = view.settings.toggle(toggle);
            view.refresh_layout();
            view.status = Some(format!(
                "{}: {}",
                toggle.label(),
                if on { "on" } else { "off" }
            ));
            Some(Cmd::batch(vec![
                Cmd::PersistSettings(view.settings.clone()),
                Cmd::Redraw,
            ]))
        }
        ViewMsg::SettingsChanged(settings) => {
            if settings == view.settings {
                return None;
            }
            view.settings = settings;
            view.refresh_layout();
            Some(Cmd::Redraw)
        }
        ViewMsg::ThemeChanged { dark } => {
            if dark == view.dark {
                return None;
            }
            view.dark = dark;
            view.refresh_layout();
            Some(Cmd::Redraw)
        }
        ViewMsg::Status(text) => {
            view.status = Some(text);
            Some(Cmd::Redraw)
        }
    }
}

/// Select the active match and make sure its row is materialized
fn reveal_match(view: &mut GridView, found: Option<CellAddress>) -> Option<Cmd> {
    if let Some(addr) = found {
        view.selection.select_cell(addr);
        view.ensure_loaded(addr.row);
    }
    view.status = view.find.status();
    Some(Cmd::Redraw)
}
