//! Single in-flight mutation guard

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

/// Proof that a mutation is in flight
///
/// Not `Clone`: exactly one exists per open mutation, and it must be handed
/// back to [`MutationGate::end`].
#[must_use = "a mutation token must be returned to MutationGate::end"]
#[derive(Debug)]
pub struct MutationToken {
    _private: (),
}

/// Admits at most one mutation at a time
#[derive(Debug, Default)]
pub struct MutationGate {
    busy: Arc<AtomicBool>,
}

impl MutationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a mutation, or `None` while another is in flight
    pub fn begin(&mut self) -> Option<MutationToken> {
        if self.busy.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some(MutationToken { _private: () })
    }

    pub fn end(&mut self, token: MutationToken) {
        let MutationToken { _private: () } = token;
        self.busy.store(false, Ordering::Release);
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// A notifier for external changes that is closed while a mutation is in
    /// flight, and the receiving end of what it lets through
    pub fn change_channel(&self) -> (ChangeNotifier, Receiver<()>) {
        let (tx, rx) = mpsc::channel();
        let notifier = ChangeNotifier {
            busy: Arc::clone(&self.busy),
            tx,
        };
        (notifier, rx)
    }
}

/// Reports that the document changed outside the view
///
/// Cloneable and `Send`, for use from watcher threads or from inside a
/// persistence layer. Notifications raised while the gate is busy are
/// dropped, not queued.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    busy: Arc<AtomicBool>,
    tx: Sender<()>,
}

impl ChangeNotifier {
    /// Returns whether the notification was delivered
    pub fn notify(&self) -> bool {
        if self.busy.load(Ordering::Acquire) {
            tracing::debug!("external change dropped: mutation in flight");
            return false;
        }
        self.tx.send(()).is_ok()
    }
}
