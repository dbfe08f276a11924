//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::path::Path;

use tsvgrid::config::GridConfig;
use tsvgrid::grid::CellAddress;
use tsvgrid::host::{FsReferenceLoader, MemoryClipboard, MemoryDocument, Session};
use tsvgrid::input::{KeyCode, Keystroke, Modifiers, PointerEvent, PointerTarget};
use tsvgrid::messages::{GridMsg, SelectionMsg};
use tsvgrid::state::GridView;
use tsvgrid::update::update;

pub type MemorySession = Session<MemoryDocument, FsReferenceLoader, MemoryClipboard>;

/// Fruit inventory with a header row
pub const FRUIT: &str = "name\tqty\tprice\napple\t3\t1.5\npear\t10\t0.75\nfig\t1\t2";

/// A session over an in-memory document
pub fn memory_session(text: &str) -> MemorySession {
    Session::open(
        MemoryDocument::new(text),
        FsReferenceLoader::new(),
        MemoryClipboard::default(),
        GridConfig::default(),
    )
}

/// A session whose base files resolve relative to `root`
pub fn memory_session_with_root(text: &str, root: &Path) -> MemorySession {
    Session::open(
        MemoryDocument::new(text),
        FsReferenceLoader::with_root(root),
        MemoryClipboard::default(),
        GridConfig::default(),
    )
}

pub fn test_view(text: &str) -> GridView {
    GridView::new(text.to_string(), GridConfig::default())
}

pub fn addr(row: usize, col: usize) -> CellAddress {
    CellAddress::new(row, col)
}

/// The platform command modifier (Cmd on macOS, Ctrl elsewhere)
pub fn cmd() -> Modifiers {
    if cfg!(target_os = "macos") {
        Modifiers::META
    } else {
        Modifiers::CTRL
    }
}

pub fn down(row: usize, col: usize) -> GridMsg {
    SelectionMsg::Pointer(PointerEvent::Down {
        target: PointerTarget::Cell(addr(row, col)),
        mods: Modifiers::NONE,
    })
    .into()
}

pub fn shift_down(row: usize, col: usize) -> GridMsg {
    SelectionMsg::Pointer(PointerEvent::Down {
        target: PointerTarget::Cell(addr(row, col)),
        mods: Modifiers::SHIFT,
    })
    .into()
}

pub fn move_to(row: usize, col: usize) -> GridMsg {
    SelectionMsg::Pointer(PointerEvent::Move {
        target: PointerTarget::Cell(addr(row, col)),
    })
    .into()
}

pub fn up() -> GridMsg {
    SelectionMsg::Pointer(PointerEvent::Up).into()
}

pub fn key(code: KeyCode) -> GridMsg {
    SelectionMsg::Key(Keystroke::key(code)).into()
}

pub fn key_with(code: KeyCode, mods: Modifiers) -> GridMsg {
    SelectionMsg::Key(Keystroke::new(code, mods)).into()
}

pub fn type_text(text: &str) -> Vec<GridMsg> {
    text.chars().map(|c| key(KeyCode::Char(c))).collect()
}

/// Click a cell in a bare view (no session)
pub fn click(view: &mut GridView, row: usize, col: usize) {
    update(view, down(row, col));
    update(view, up());
}
