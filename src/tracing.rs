//! Logging setup and debug diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=selection=debug` - selection state transitions only
//! - `RUST_LOG=tsvgrid::host=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/tsvgrid/logs/tsvgrid.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::selection::{SelectionMode, SelectionState};
use crate::state::GridView;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`). File logging writes
/// to `~/.config/tsvgrid/logs/tsvgrid.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console goes to stderr so command output stays clean
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(
                logs_dir,
                crate::config_paths::LOG_FILE_PREFIX,
            );
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of selection state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSnapshot {
    pub phase: &'static str,
    pub mode: Option<SelectionMode>,
    pub anchor: Option<(usize, usize)>,
    pub focus: Option<(usize, usize)>,
}

impl SelectionSnapshot {
    pub fn from_view(view: &GridView) -> Self {
        let selection = &view.selection;
        let phase = match selection.state() {
            SelectionState::Idle => "idle",
            SelectionState::Dragging(_) => "dragging",
            SelectionState::Editing(_) => "editing",
        };
        let range = selection.range();
        Self {
            phase,
            mode: range.map(|r| r.mode),
            anchor: range.map(|r| (r.anchor.row, r.anchor.col)),
            focus: range.map(|r| (r.focus.row, r.focus.col)),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &SelectionSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.phase != other.phase {
            changes.push(format!("{} → {}", self.phase, other.phase));
        }
        if self.mode != other.mode {
            changes.push(format!("mode {:?} → {:?}", self.mode, other.mode));
        }
        if self.anchor != other.anchor {
            changes.push(format!("anchor {:?} → {:?}", self.anchor, other.anchor));
        }
        if self.focus != other.focus {
            changes.push(format!("focus {:?} → {:?}", self.focus, other.focus));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
