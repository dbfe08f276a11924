//! Message types for the Elm-style architecture
//!
//! All state changes to a [`crate::state::GridView`] flow through these types.

use std::path::PathBuf;

use crate::config::{GridConfig, Toggle};
use crate::grid::Grid;
use crate::input::{Keystroke, PointerEvent};

/// Pointer, keyboard and clipboard interaction with the grid
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionMsg {
    Pointer(PointerEvent),
    Key(Keystroke),
    /// The grid lost input focus (commits an in-progress edit)
    FocusLost,
    /// Copy the current selection to the clipboard
    Copy,
}

/// Document mutations and document lifecycle
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentMsg {
    SetCell { row: usize, col: usize, value: String },
    InsertRow(usize),
    DeleteRow(usize),
    InsertColumn(usize),
    DeleteColumn(usize),
    Sort { column: usize, ascending: bool },
    Save,
    /// Document text after a successful write
    Written(String),
    /// Document text after a change made outside this view
    ExternalChange(String),
}

/// Comparison against a base file
#[derive(Debug, Clone, PartialEq)]
pub enum DiffMsg {
    /// Load a base file and enter diff mode
    Open(PathBuf),
    BaseLoaded { path: PathBuf, grid: Grid },
    /// Leave diff mode
    Exit,
    /// Copy one base cell into the working grid
    AcceptCell { row: usize, col: usize },
    /// Copy one base row into the working grid
    AcceptRow(usize),
}

/// Presentation state: row feed, find, settings
#[derive(Debug, Clone, PartialEq)]
pub enum ViewMsg {
    /// The surface scrolled; fetch more rows if near the end
    LoadMoreRows { last_visible_row: usize },
    Find(String),
    FindNext,
    FindPrev,
    Toggle(Toggle),
    /// Settings changed in another view
    SettingsChanged(GridConfig),
    ThemeChanged { dark: bool },
    Status(String),
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum GridMsg {
    Selection(SelectionMsg),
    Document(DocumentMsg),
    Diff(DiffMsg),
    View(ViewMsg),
}

impl From<SelectionMsg> for GridMsg {
    fn from(msg: SelectionMsg) -> Self {
        GridMsg::Selection(msg)
    }
}

impl From<DocumentMsg> for GridMsg {
    fn from(msg: DocumentMsg) -> Self {
        GridMsg::Document(msg)
    }
}

impl From<DiffMsg> for GridMsg {
    fn from(msg: DiffMsg) -> Self {
        GridMsg::Diff(msg)
    }
}

impl From<ViewMsg> for GridMsg {
    fn from(msg: ViewMsg) -> Self {
        GridMsg::View(msg)
    }
}
