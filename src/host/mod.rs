//! Host collaborators and the session runtime
//!
//! The grid core never performs I/O. A [`Session`] owns one
//! [`crate::state::GridView`] plus the collaborators it needs, and executes
//! the commands that `update` returns:
//!
//! ```text
//! GridMsg ──update──▶ Cmd ──Session──▶ Persistence / Clipboard / ReferenceLoader
//!    ▲                                        │
//!    └──────────── Written / BaseLoaded ──────┘
//! ```

mod clipboard;
mod document;
mod gate;
mod reference;
mod registry;
mod session;
mod watcher;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::grid::{Grid, TextRange};

pub use clipboard::{MemoryClipboard, SystemClipboard};
pub use document::{FileDocument, MemoryDocument};
pub use gate::{ChangeNotifier, MutationGate, MutationToken};
pub use reference::FsReferenceLoader;
pub use registry::{ViewId, ViewRegistry};
pub use session::Session;
pub use watcher::DocumentWatcher;

/// Failures at the boundary between the grid and its host
#[derive(Debug, Error)]
pub enum HostError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
    #[error("the document rejected the edit")]
    Rejected,
    #[error("another edit is still in flight")]
    Busy,
    #[error("{} has unsaved changes", .0.display())]
    UnsavedChanges(PathBuf),
    #[error("file watcher error: {0}")]
    Watcher(#[from] notify::Error),
}

impl HostError {
    /// Map an I/O error, keeping not-found distinct
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            HostError::NotFound(path.to_path_buf())
        } else {
            HostError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// The document text store
pub trait Persistence {
    fn full_text(&self) -> String;

    /// Replace a span of the text; `false` when the span does not exist or
    /// the store refuses the edit
    fn replace_range(&mut self, range: TextRange, new_text: &str) -> bool;

    fn save(&mut self) -> bool;

    /// Pick up changes made outside this process
    fn reload(&mut self) -> Result<(), HostError> {
        Ok(())
    }
}

/// Loads the base grid for diff mode
pub trait ReferenceLoader {
    fn load_base_grid(&self, path: &Path) -> Result<Grid, HostError>;
}

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), HostError>;
}

impl<C: Clipboard + ?Sized> Clipboard for Box<C> {
    fn write_text(&mut self, text: &str) -> Result<(), HostError> {
        (**self).write_text(text)
    }
}
