//! Base file loading for diff mode

use std::path::{Path, PathBuf};

use super::{HostError, ReferenceLoader};
use crate::grid::{parse, Grid, TAB};

/// Loads base grids from the filesystem
///
/// Relative paths resolve against `root` when one is set.
#[derive(Debug, Clone)]
pub struct FsReferenceLoader {
    root: Option<PathBuf>,
    separator: char,
}

impl Default for FsReferenceLoader {
    fn default() -> Self {
        Self {
            root: None,
            separator: TAB,
        }
    }
}

impl FsReferenceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            ..Self::default()
        }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl ReferenceLoader for FsReferenceLoader {
    fn load_base_grid(&self, path: &Path) -> Result<Grid, HostError> {
        let path = self.resolve(path);
        let text = std::fs::read_to_string(&path).map_err(|e| HostError::io(&path, e))?;
        Ok(parse(&text, self.separator))
    }
}
