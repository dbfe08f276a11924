//! Clipboard collaborators

use super::{Clipboard, HostError};

/// The system clipboard, opened on first use
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("open", &self.inner.is_some())
            .finish()
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), HostError> {
        let clipboard = match self.inner.as_mut() {
            Some(clipboard) => clipboard,
            None => {
                let clipboard =
                    arboard::Clipboard::new().map_err(|e| HostError::Clipboard(e.to_string()))?;
                self.inner.insert(clipboard)
            }
        };
        clipboard
            .set_text(text)
            .map_err(|e| HostError::Clipboard(e.to_string()))?;
        tracing::debug!(chars = text.chars().count(), "copied to clipboard");
        Ok(())
    }
}

/// Clipboard that keeps the last text in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), HostError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
