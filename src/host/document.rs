//! Document stores: a rope-backed file and an in-memory text

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use ropey::{Rope, RopeSlice};

use super::{HostError, Persistence};
use crate::grid::{replace_range, TextRange};

/// Chars taken by the line break at the end of a rope line
fn line_break_len(line: RopeSlice<'_>) -> usize {
    let n = line.len_chars();
    match (n.checked_sub(2).map(|i| line.char(i)), n.checked_sub(1).map(|i| line.char(i))) {
        (Some('\r'), Some('\n')) => 2,
        (_, Some('\n' | '\r')) => 1,
        _ => 0,
    }
}

/// A tab-delimited file held in a rope
///
/// Edits apply to the rope; [`Persistence::save`] writes it back to disk.
/// The rope is built with CR line support only, so its lines match
/// [`crate::grid::split_lines`].
#[derive(Debug)]
pub struct FileDocument {
    path: PathBuf,
    buffer: Rope,
    is_modified: bool,
    /// Incremented on each edit
    revision: u64,
}

impl FileDocument {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, HostError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| HostError::io(&path, e))?;
        tracing::info!(path = %path.display(), bytes = content.len(), "opened document");
        Ok(Self {
            path,
            buffer: Rope::from(content),
            is_modified: false,
            revision: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Char index of a line/column position, if it exists
    fn char_index(&self, line: usize, col: usize) -> Option<usize> {
        if line >= self.buffer.len_lines() {
            return None;
        }
        let slice = self.buffer.line(line);
        let content = slice.len_chars() - line_break_len(slice);
        (col <= content).then(|| self.buffer.line_to_char(line) + col)
    }
}

impl Persistence for FileDocument {
    fn full_text(&self) -> String {
        self.buffer.to_string()
    }

    fn replace_range(&mut self, range: TextRange, new_text: &str) -> bool {
        let (Some(start), Some(end)) = (
            self.char_index(range.start_line, range.start_col),
            self.char_index(range.end_line, range.end_col),
        ) else {
            return false;
        };
        if start > end {
            return false;
        }

        self.buffer.remove(start..end);
        self.buffer.insert(start, new_text);
        self.is_modified = true;
        self.revision += 1;
        true
    }

    fn save(&mut self) -> bool {
        let written = File::create(&self.path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            self.buffer.write_to(&mut writer)?;
            writer.flush()
        });
        match written {
            Ok(()) => {
                self.is_modified = false;
                tracing::info!(path = %self.path.display(), "saved document");
                true
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "save failed: {}", e);
                false
            }
        }
    }

    fn reload(&mut self) -> Result<(), HostError> {
        if self.is_modified {
            return Err(HostError::UnsavedChanges(self.path.clone()));
        }
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| HostError::io(&self.path, e))?;
        self.buffer = Rope::from(content);
        self.revision += 1;
        Ok(())
    }
}

/// A document that lives only in memory
///
/// The flags let a host (or a test) refuse targeted edits, all edits, or
/// saves.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    pub text: String,
    pub reject_targeted: bool,
    pub reject_all: bool,
    pub fail_save: bool,
    pub saves: usize,
    /// Every accepted edit, in order
    pub edits: Vec<(TextRange, String)>,
}

impl MemoryDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

impl Persistence for MemoryDocument {
    fn full_text(&self) -> String {
        self.text.clone()
    }

    fn replace_range(&mut self, range: TextRange, new_text: &str) -> bool {
        if self.reject_all || (self.reject_targeted && range != TextRange::whole(&self.text)) {
            return false;
        }
        match replace_range(&self.text, range, new_text) {
            Some(next) => {
                self.text = next;
                self.edits.push((range, new_text.to_string()));
                true
            }
            None => false,
        }
    }

    fn save(&mut self) -> bool {
        if self.fail_save {
            return false;
        }
        self.saves += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_with(text: &str) -> (tempfile::TempDir, FileDocument) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.tsv");
        std::fs::write(&path, text).unwrap();
        let doc = FileDocument::open(&path).unwrap();
        (dir, doc)
    }

    #[test]
    fn test_open_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileDocument::open(dir.path().join("nope.tsv")).unwrap_err();
        assert!(matches!(err, HostError::NotFound(_)));
    }

    #[test]
    fn test_replace_single_line_span() {
        let (_dir, mut doc) = file_with("a\tb\r\nc\td");
        assert!(doc.replace_range(TextRange::on_line(1, 2, 3), "zz"));
        assert_eq!(doc.full_text(), "a\tb\r\nc\tzz");
        assert!(doc.is_modified());
    }

    #[test]
    fn test_replace_rejects_positions_past_line_end() {
        let (_dir, mut doc) = file_with("ab\ncd");
        assert!(!doc.replace_range(TextRange::on_line(0, 0, 3), "x"));
        assert!(!doc.replace_range(TextRange::on_line(2, 0, 0), "x"));
        assert_eq!(doc.revision(), 0);
    }

    #[test]
    fn test_whole_replace_and_save() {
        let (_dir, mut doc) = file_with("old\n");
        let whole = TextRange::whole(&doc.full_text());
        assert!(doc.replace_range(whole, "new\ttext"));
        assert!(doc.save());
        assert!(!doc.is_modified());
        assert_eq!(std::fs::read_to_string(doc.path()).unwrap(), "new\ttext");
    }

    #[test]
    fn test_reload_refuses_unsaved_changes() {
        let (_dir, mut doc) = file_with("a");
        std::fs::write(doc.path(), "b").unwrap();
        doc.reload().unwrap();
        assert_eq!(doc.full_text(), "b");

        doc.replace_range(TextRange::on_line(0, 0, 1), "c");
        assert!(matches!(doc.reload(), Err(HostError::UnsavedChanges(_))));
    }

    #[test]
    fn test_memory_document_rejection_flags() {
        let mut doc = MemoryDocument::new("a\tb");
        doc.reject_targeted = true;
        assert!(!doc.replace_range(TextRange::on_line(0, 0, 1), "x"));
        assert!(doc.replace_range(TextRange::whole("a\tb"), "x\tb"));
        assert_eq!(doc.text, "x\tb");

        doc.reject_all = true;
        assert!(!doc.replace_range(TextRange::whole("x\tb"), "y"));
    }
}
