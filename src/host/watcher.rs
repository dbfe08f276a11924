//! External change detection for an open document
//!
//! Watches the document's directory (editors often replace files by rename)
//! and reports debounced changes to the document path only.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use notify_debouncer_mini::{new_debouncer, DebouncedEvent, DebouncedEventKind, Debouncer};

use super::HostError;

type DebounceResult = Result<Vec<DebouncedEvent>, notify::Error>;

pub struct DocumentWatcher {
    /// The debouncer handles watching and event coalescing
    _debouncer: Debouncer<notify::RecommendedWatcher>,
    rx: Receiver<DebounceResult>,
    path: PathBuf,
}

impl std::fmt::Debug for DocumentWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentWatcher")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl DocumentWatcher {
    /// Start watching `path`, coalescing bursts within `debounce`
    pub fn new(path: &Path, debounce: Duration) -> Result<Self, HostError> {
        let path = path
            .canonicalize()
            .map_err(|e| HostError::io(path, e))?;
        let dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();

        let (tx, rx) = mpsc::channel();
        let mut debouncer = new_debouncer(debounce, tx)?;
        debouncer
            .watcher()
            .watch(&dir, notify::RecursiveMode::NonRecursive)?;

        tracing::info!(
            "Started document watcher for {} ({} ms debounce)",
            path.display(),
            debounce.as_millis()
        );

        Ok(Self {
            _debouncer: debouncer,
            rx,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drain pending events (non-blocking); true if the document changed
    pub fn poll_changed(&self) -> bool {
        let mut changed = false;
        while let Ok(result) = self.rx.try_recv() {
            changed |= self.is_relevant(result);
        }
        changed
    }

    /// Block up to `timeout` for the next change to the document
    pub fn wait_changed(&self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(result) => self.is_relevant(result) | self.poll_changed(),
            Err(_) => false,
        }
    }

    fn is_relevant(&self, result: DebounceResult) -> bool {
        match result {
            Ok(events) => events.iter().any(|event| {
                // Continuous events during active writes are skipped
                !matches!(event.kind, DebouncedEventKind::AnyContinuous)
                    && event.path == self.path
            }),
            Err(e) => {
                tracing::warn!("Document watcher error: {:?}", e);
                false
            }
        }
    }
}
