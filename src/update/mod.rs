//! Update functions for the Elm-style architecture
//!
//! All state transformations of a [`GridView`] flow through [`update`]. It is
//! pure: side effects come back as a [`Cmd`] for the session to execute.

mod diff;
mod document;
mod selection;
mod view;

use crate::commands::Cmd;
use crate::messages::{GridMsg, SelectionMsg};
use crate::state::GridView;

#[cfg(debug_assertions)]
use crate::tracing::SelectionSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use diff::update_diff;
pub use document::{update_document, write_cell};
pub use selection::update_selection;
pub use view::update_view;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
#[inline]
pub fn update(view: &mut GridView, msg: GridMsg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(view, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(view, msg)
    }
}

fn update_inner(view: &mut GridView, msg: GridMsg) -> Option<Cmd> {
    match msg {
        // A disabled view shows plain text; grid interaction is ignored
        GridMsg::Selection(_) if !view.settings.enabled => None,
        GridMsg::Selection(m) => update_selection(view, m),
        GridMsg::Document(m) => update_document(view, m),
        GridMsg::Diff(m) => update_diff(view, m),
        GridMsg::View(m) => update_view(view, m),
    }
}

#[cfg(debug_assertions)]
fn update_traced(view: &mut GridView, msg: GridMsg) -> Option<Cmd> {
    // Pointer moves arrive at frame rate
    let is_noisy = matches!(
        &msg,
        GridMsg::Selection(SelectionMsg::Pointer(crate::input::PointerEvent::Move { .. }))
    );

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = SelectionSnapshot::from_view(view);
    let result = update_inner(view, msg);
    let after = SelectionSnapshot::from_view(view);

    if let Some(diff) = before.diff(&after) {
        debug!(target: "selection", %diff, "state changed");
    }

    result
}

/// Display name for a message, truncated for long payloads
#[cfg(debug_assertions)]
fn msg_type_name(msg: &GridMsg) -> String {
    let full = format!("{:?}", msg);
    if full.len() > 80 {
        let cut = full
            .char_indices()
            .nth(77)
            .map_or(full.len(), |(i, _)| i);
        format!("{}...", &full[..cut])
    } else {
        full
    }
}
