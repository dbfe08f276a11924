//! Command execution for one grid view

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use super::{
    ChangeNotifier, Clipboard, HostError, MutationGate, Persistence, ReferenceLoader, ViewId,
    ViewRegistry,
};
use crate::commands::{Cmd, DocumentEdit};
use crate::config::GridConfig;
use crate::grid::TextRange;
use crate::messages::{DiffMsg, DocumentMsg, GridMsg, ViewMsg};
use crate::state::GridView;
use crate::update::update;

struct Attachment {
    registry: ViewRegistry,
    id: ViewId,
    inbox: Receiver<GridMsg>,
}

/// Runtime for one view: dispatches messages and executes their commands
///
/// Messages produced while executing a command (the re-read after a write,
/// a loaded base grid) are handled in the same [`Session::dispatch`] call.
pub struct Session<P, L, C> {
    view: GridView,
    persistence: P,
    loader: L,
    clipboard: C,
    gate: MutationGate,
    notifier: ChangeNotifier,
    changes: Receiver<()>,
    attachment: Option<Attachment>,
    settings_path: Option<PathBuf>,
    notices: Vec<String>,
    needs_redraw: bool,
}

impl<P: Persistence, L: ReferenceLoader, C: Clipboard> Session<P, L, C> {
    /// Open a view over the current text of `persistence`
    pub fn open(persistence: P, loader: L, clipboard: C, settings: GridConfig) -> Self {
        let view = GridView::new(persistence.full_text(), settings);
        let gate = MutationGate::new();
        let (notifier, changes) = gate.change_channel();
        Self {
            view,
            persistence,
            loader,
            clipboard,
            gate,
            notifier,
            changes,
            attachment: None,
            settings_path: None,
            notices: Vec::new(),
            needs_redraw: true,
        }
    }

    /// Persist toggled settings to `path`
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    /// Join a registry so settings changes reach the other views
    pub fn attach(mut self, registry: &ViewRegistry) -> Self {
        let (id, inbox) = registry.register();
        self.attachment = Some(Attachment {
            registry: registry.clone(),
            id,
            inbox,
        });
        self
    }

    pub fn view(&self) -> &GridView {
        &self.view
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn persistence_mut(&mut self) -> &mut P {
        &mut self.persistence
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn gate_mut(&mut self) -> &mut MutationGate {
        &mut self.gate
    }

    /// Handle for reporting external changes; closed while a write is in flight
    pub fn change_notifier(&self) -> ChangeNotifier {
        self.notifier.clone()
    }

    pub fn view_id(&self) -> Option<ViewId> {
        self.attachment.as_ref().map(|a| a.id)
    }

    /// Messages shown to the user since the last call
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    /// Whether anything changed since the last call
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Handle a message and everything it leads to
    pub fn dispatch(&mut self, msg: impl Into<GridMsg>) {
        let mut queue = VecDeque::from([msg.into()]);
        while let Some(msg) = queue.pop_front() {
            if let Some(cmd) = update(&mut self.view, msg) {
                self.execute(cmd, &mut queue);
            }
        }
    }

    /// Handle messages broadcast by other views
    pub fn pump(&mut self) -> usize {
        let pending: Vec<GridMsg> = match &self.attachment {
            Some(attachment) => attachment.inbox.try_iter().collect(),
            None => return 0,
        };
        let count = pending.len();
        for msg in pending {
            self.dispatch(msg);
        }
        count
    }

    /// React to a change made outside this view
    ///
    /// Dropped (not queued) while a mutation is in flight.
    pub fn external_change(&mut self) {
        if self.gate.is_busy() {
            tracing::debug!("external change dropped: mutation in flight");
            return;
        }
        if let Err(e) = self.persistence.reload() {
            self.notify(format!("Not reloaded: {}", e));
            return;
        }
        let text = self.persistence.full_text();
        self.dispatch(DocumentMsg::ExternalChange(text));
    }

    /// Reload once if any change notification came through
    ///
    /// Several pending notifications collapse into one reload.
    pub fn poll_changes(&mut self) -> bool {
        if self.changes.try_iter().count() == 0 {
            return false;
        }
        self.external_change();
        true
    }

    fn execute(&mut self, cmd: Cmd, queue: &mut VecDeque<GridMsg>) {
        if cmd.needs_redraw() {
            self.needs_redraw = true;
        }
        match cmd {
            Cmd::None | Cmd::Redraw => {}
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.execute(cmd, queue);
                }
            }
            Cmd::ApplyEdit(edit) => match self.apply(edit) {
                Ok(text) => queue.push_back(DocumentMsg::Written(text).into()),
                Err(e) => self.notify(format!("Edit failed: {}", e)),
            },
            Cmd::Save => {
                if !self.persistence.save() {
                    self.notify("Save failed".to_string());
                }
            }
            Cmd::WriteClipboard(text) => {
                if let Err(e) = self.clipboard.write_text(&text) {
                    self.notify(e.to_string());
                }
            }
            Cmd::LoadBase(path) => match self.loader.load_base_grid(&path) {
                Ok(grid) => queue.push_back(DiffMsg::BaseLoaded { path, grid }.into()),
                Err(e) => {
                    let message = format!("Cannot open base file: {}", e);
                    self.notify(message.clone());
                    queue.push_back(ViewMsg::Status(message).into());
                }
            },
            Cmd::Notify(message) => self.notify(message),
            Cmd::PersistSettings(settings) => self.persist_settings(settings),
        }
    }

    /// Write to the document: targeted first, full replace as fallback
    ///
    /// Returns the re-read text. On total failure the document and the view
    /// are left as they were.
    fn apply(&mut self, edit: DocumentEdit) -> Result<String, HostError> {
        let token = self.gate.begin().ok_or(HostError::Busy)?;

        let mut applied = false;
        if let Some((range, text)) = &edit.targeted {
            applied = self.persistence.replace_range(*range, text);
            if applied {
                tracing::info!(label = edit.label, "targeted edit applied");
            } else {
                tracing::debug!(label = edit.label, "targeted edit rejected, rewriting");
            }
        }
        if !applied {
            let whole = TextRange::whole(&self.persistence.full_text());
            applied = self.persistence.replace_range(whole, &edit.full_text);
            if applied {
                tracing::info!(label = edit.label, "document rewritten");
            }
        }

        self.gate.end(token);
        if applied {
            Ok(self.persistence.full_text())
        } else {
            Err(HostError::Rejected)
        }
    }

    fn persist_settings(&mut self, settings: GridConfig) {
        if let Some(path) = &self.settings_path {
            if let Err(e) = settings.save_to(path) {
                self.notify(e);
            }
        }
        if let Some(attachment) = &self.attachment {
            let msg = GridMsg::View(ViewMsg::SettingsChanged(settings));
            let reached = attachment.registry.broadcast(&msg, Some(attachment.id));
            tracing::debug!(reached, "settings broadcast");
        }
    }

    fn notify(&mut self, message: String) {
        tracing::warn!("{}", message);
        self.notices.push(message);
        self.needs_redraw = true;
    }
}

impl<P, L, C> Drop for Session<P, L, C> {
    fn drop(&mut self) {
        if let Some(attachment) = &self.attachment {
            attachment.registry.unregister(attachment.id);
        }
    }
}
