//! Registry of open grid views
//!
//! Settings toggled in one view are broadcast to every registered view as a
//! [`GridMsg`] on its channel.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

use crate::messages::GridMsg;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(u64);

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    views: HashMap<ViewId, Sender<GridMsg>>,
}

/// Shared handle to the set of open views
///
/// Cloning the handle shares the same registry.
#[derive(Debug, Clone, Default)]
pub struct ViewRegistry {
    inner: Arc<Mutex<Inner>>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add a view, returning its id and the receiving end of its channel
    pub fn register(&self) -> (ViewId, Receiver<GridMsg>) {
        let (tx, rx) = mpsc::channel();
        let mut inner = self.lock();
        let id = ViewId(inner.next_id);
        inner.next_id += 1;
        inner.views.insert(id, tx);
        tracing::debug!(view = id.0, "view registered");
        (id, rx)
    }

    pub fn unregister(&self, id: ViewId) {
        if self.lock().views.remove(&id).is_some() {
            tracing::debug!(view = id.0, "view unregistered");
        }
    }

    pub fn len(&self) -> usize {
        self.lock().views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Send `msg` to every view except `origin`
    ///
    /// Views whose receiver was dropped are removed. Returns the number of
    /// views reached.
    pub fn broadcast(&self, msg: &GridMsg, origin: Option<ViewId>) -> usize {
        let mut inner = self.lock();
        let mut dead = Vec::new();
        let mut sent = 0;

        for (id, tx) in &inner.views {
            if Some(*id) == origin {
                continue;
            }
            if tx.send(msg.clone()).is_ok() {
                sent += 1;
            } else {
                dead.push(*id);
            }
        }
        for id in dead {
            inner.views.remove(&id);
        }
        sent
    }
}
