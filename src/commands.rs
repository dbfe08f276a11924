//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.
//! The [`crate::host::Session`] runtime executes them.

use std::path::PathBuf;

use crate::config::GridConfig;
use crate::grid::TextRange;

/// A write to the document text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEdit {
    /// Single-cell replacement to try first, when it provably yields `full_text`
    pub targeted: Option<(TextRange, String)>,
    /// The complete new document text
    pub full_text: String,
    /// Short description for logs
    pub label: &'static str,
}

impl DocumentEdit {
    pub fn full(full_text: String, label: &'static str) -> Self {
        Self {
            targeted: None,
            full_text,
            label,
        }
    }
}

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Request a redraw of the grid
    Redraw,
    /// Write to the document, then re-read it
    ApplyEdit(DocumentEdit),
    /// Save the document
    Save,
    /// Put text on the clipboard
    WriteClipboard(String),
    /// Load a base file for diff mode
    LoadBase(PathBuf),
    /// Show a message to the user
    Notify(String),
    /// Persist settings and broadcast them to every registered view
    PersistSettings(GridConfig),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands, dropping no-ops
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut cmds: Vec<Cmd> = cmds.into_iter().filter(|c| *c != Cmd::None).collect();
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.remove(0),
            _ => Cmd::Batch(cmds),
        }
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            // The re-read after a write triggers its own redraw
            Cmd::ApplyEdit(_) => false,
            Cmd::Save => false,
            Cmd::WriteClipboard(_) => false,
            Cmd::LoadBase(_) => false,
            Cmd::Notify(_) => true,
            Cmd::PersistSettings(_) => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }
}
