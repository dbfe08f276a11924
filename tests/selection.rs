//! Selection state machine driven through `update`

mod common;

use common::*;
use tsvgrid::commands::Cmd;
use tsvgrid::input::{Direction, KeyCode, Modifiers, PointerEvent, PointerTarget};
use tsvgrid::messages::SelectionMsg;
use tsvgrid::selection::{SelectionMode, SelectionState};
use tsvgrid::update::update;

// ========================================================================
// Pointer
// ========================================================================

#[test]
fn test_click_selects_single_cell() {
    let mut view = test_view(FRUIT);
    click(&mut view, 2, 1);

    let range = view.selection.range().copied().unwrap();
    assert_eq!(range.anchor, addr(2, 1));
    assert_eq!(range.focus, addr(2, 1));
    assert_eq!(range.mode, SelectionMode::Cell);
    assert!(matches!(view.selection.state(), SelectionState::Idle));
}

#[test]
fn test_drag_stays_inside_extent() {
    let mut view = test_view(FRUIT);
    update(&mut view, down(1, 0));
    assert!(view.selection.is_dragging());

    update(&mut view, move_to(2, 2));
    update(&mut view, move_to(9, 9));
    update(&mut view, up());

    let range = view.selection.range().copied().unwrap();
    assert_eq!(range.focus, addr(2, 2));
    assert_eq!(view.selection.selected_cells(view.extent()).len(), 6);
}

#[test]
fn test_shift_click_extends_from_anchor() {
    let mut view = test_view(FRUIT);
    click(&mut view, 1, 1);
    update(&mut view, shift_down(3, 2));
    update(&mut view, up());

    let range = view.selection.range().copied().unwrap();
    assert_eq!(range.anchor, addr(1, 1));
    assert_eq!(range.focus, addr(3, 2));
    assert!(view.selection.is_selected(addr(2, 2), view.extent()));
    assert!(!view.selection.is_selected(addr(2, 0), view.extent()));
}

#[test]
fn test_gutter_selects_whole_rows() {
    let mut view = test_view(FRUIT);
    update(
        &mut view,
        SelectionMsg::Pointer(PointerEvent::Down {
            target: PointerTarget::RowGutter(1),
            mods: Modifiers::NONE,
        })
        .into(),
    );
    update(
        &mut view,
        SelectionMsg::Pointer(PointerEvent::Move {
            target: PointerTarget::RowGutter(2),
        })
        .into(),
    );
    update(&mut view, up());

    assert_eq!(view.selection.range().unwrap().mode, SelectionMode::Row);
    assert_eq!(view.selection.selected_cells(view.extent()).len(), 6);
}

#[test]
fn test_corner_selects_all() {
    let mut view = test_view(FRUIT);
    update(
        &mut view,
        SelectionMsg::Pointer(PointerEvent::Down {
            target: PointerTarget::Corner,
            mods: Modifiers::NONE,
        })
        .into(),
    );
    assert_eq!(view.selection.range().unwrap().mode, SelectionMode::All);
    assert_eq!(view.selection.selected_cells(view.extent()).len(), 12);
}

// ========================================================================
// Keyboard
// ========================================================================

#[test]
fn test_arrows_move_and_stop_at_edges() {
    let mut view = test_view(FRUIT);
    click(&mut view, 0, 0);

    update(&mut view, key(KeyCode::Arrow(Direction::Up)));
    assert_eq!(view.selection.anchor(), Some(addr(0, 0)));

    update(&mut view, key(KeyCode::Arrow(Direction::Down)));
    update(&mut view, key(KeyCode::Arrow(Direction::Right)));
    assert_eq!(view.selection.anchor(), Some(addr(1, 1)));

    for _ in 0..5 {
        update(&mut view, key(KeyCode::Arrow(Direction::Right)));
    }
    assert_eq!(view.selection.anchor(), Some(addr(1, 2)));
}

#[test]
fn test_shift_arrow_grows_range() {
    let mut view = test_view(FRUIT);
    click(&mut view, 1, 0);
    update(&mut view, key_with(KeyCode::Arrow(Direction::Down), Modifiers::SHIFT));
    update(&mut view, key_with(KeyCode::Arrow(Direction::Right), Modifiers::SHIFT));

    let range = view.selection.range().copied().unwrap();
    assert_eq!(range.anchor, addr(1, 0));
    assert_eq!(range.focus, addr(2, 1));
}

#[test]
fn test_escape_clears_selection() {
    let mut view = test_view(FRUIT);
    click(&mut view, 1, 0);
    update(&mut view, key(KeyCode::Escape));
    assert!(view.selection.range().is_none());
}

#[test]
fn test_cmd_a_selects_all() {
    let mut view = test_view(FRUIT);
    click(&mut view, 2, 2);
    update(&mut view, key_with(KeyCode::Char('a'), cmd()));
    assert_eq!(view.selection.range().unwrap().mode, SelectionMode::All);
}

// ========================================================================
// Editing
// ========================================================================

#[test]
fn test_typing_starts_edit_with_replacement_buffer() {
    let mut view = test_view(FRUIT);
    click(&mut view, 1, 0);
    for msg in type_text("kiwi") {
        update(&mut view, msg);
    }

    let edit = view.selection.editing().unwrap();
    assert_eq!(edit.position, addr(1, 0));
    assert_eq!(edit.buffer(), "kiwi");
    assert_eq!(edit.original, "apple");
}

#[test]
fn test_enter_commits_and_moves_down() {
    let mut view = test_view(FRUIT);
    click(&mut view, 1, 0);
    for msg in type_text("kiwi") {
        update(&mut view, msg);
    }

    let cmd = update(&mut view, key(KeyCode::Enter)).unwrap();
    let Cmd::Batch(cmds) = cmd else {
        panic!("expected a batch, got {cmd:?}");
    };
    let edit = cmds
        .iter()
        .find_map(|c| match c {
            Cmd::ApplyEdit(edit) => Some(edit.clone()),
            _ => None,
        })
        .unwrap();
    assert!(edit.full_text.starts_with("name\tqty\tprice\nkiwi\t3\t1.5\n"));

    // The bare view only changes once the host re-reads the text
    assert_eq!(view.grid.cell(1, 0), "apple");
    assert_eq!(view.selection.editing().unwrap().position, addr(2, 0));
}

#[test]
fn test_tab_and_shift_tab_move_across() {
    let mut view = test_view(FRUIT);
    click(&mut view, 1, 1);
    update(&mut view, key(KeyCode::Enter));

    update(&mut view, key(KeyCode::Tab));
    assert_eq!(view.selection.editing().unwrap().position, addr(1, 2));

    update(&mut view, key_with(KeyCode::Tab, Modifiers::SHIFT));
    update(&mut view, key_with(KeyCode::Tab, Modifiers::SHIFT));
    assert_eq!(view.selection.editing().unwrap().position, addr(1, 0));
}

#[test]
fn test_unchanged_edit_produces_no_write() {
    let mut view = test_view(FRUIT);
    click(&mut view, 1, 0);
    update(&mut view, key(KeyCode::Enter));

    let cmd = update(&mut view, key(KeyCode::Enter));
    assert_eq!(cmd, Some(Cmd::Redraw));
}

#[test]
fn test_escape_discards_edit() {
    let mut view = test_view(FRUIT);
    click(&mut view, 3, 0);
    for msg in type_text("nope") {
        update(&mut view, msg);
    }
    let cmd = update(&mut view, key(KeyCode::Escape));

    assert_eq!(cmd, Some(Cmd::Redraw));
    assert!(!view.selection.is_editing());
    assert_eq!(view.selection.anchor(), Some(addr(3, 0)));
}

#[test]
fn test_click_elsewhere_commits_edit() {
    let mut view = test_view(FRUIT);
    click(&mut view, 2, 1);
    for msg in type_text("11") {
        update(&mut view, msg);
    }

    let cmd = update(&mut view, down(0, 0)).unwrap();
    assert!(matches!(cmd, Cmd::Batch(ref cmds) if cmds.iter().any(|c| matches!(c, Cmd::ApplyEdit(_)))));
    assert!(view.selection.is_dragging());
}

#[test]
fn test_shortcuts_ignored_while_editing() {
    let mut view = test_view(FRUIT);
    click(&mut view, 1, 0);
    update(&mut view, key(KeyCode::Enter));

    let cmd = update(&mut view, key_with(KeyCode::Char('s'), cmd()));
    assert_ne!(cmd, Some(Cmd::Save));
    assert!(view.selection.is_editing());
}

#[test]
fn test_selection_dropped_when_grid_shrinks() {
    let mut view = test_view(FRUIT);
    click(&mut view, 3, 2);
    view.reload("name\tqty".to_string());
    assert!(view.selection.range().is_none());
}
