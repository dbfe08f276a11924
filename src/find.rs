//! Find-in-grid state

use crate::grid::{CellAddress, Grid};

/// Matches for the current query and which one is active
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindState {
    query: String,
    matches: Vec<CellAddress>,
    active: Option<usize>,
}

impl FindState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every cell containing `query`, ignoring case, row-major
    ///
    /// An empty query clears the state. The first match becomes active.
    pub fn search(&mut self, grid: &Grid, query: &str) {
        self.query = query.to_string();
        self.matches.clear();
        self.active = None;
        if query.is_empty() {
            return;
        }

        let needle = query.to_lowercase();
        for (r, row) in grid.rows().iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if cell.to_lowercase().contains(&needle) {
                    self.matches.push(CellAddress::new(r, c));
                }
            }
        }
        if !self.matches.is_empty() {
            self.active = Some(0);
        }
        tracing::debug!(query, matches = self.matches.len(), "find");
    }

    /// Re-run the current query against a changed grid
    pub fn refresh(&mut self, grid: &Grid) {
        let previous = self.active;
        let query = std::mem::take(&mut self.query);
        self.search(grid, &query);
        if let (Some(i), false) = (previous, self.matches.is_empty()) {
            self.active = Some(i.min(self.matches.len() - 1));
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self) -> &[CellAddress] {
        &self.matches
    }

    pub fn is_match(&self, addr: CellAddress) -> bool {
        self.matches.binary_search(&addr).is_ok()
    }

    pub fn current(&self) -> Option<CellAddress> {
        self.active.map(|i| self.matches[i])
    }

    /// Advance to the next match, wrapping to the first
    pub fn next(&mut self) -> Option<CellAddress> {
        let n = self.matches.len();
        if n == 0 {
            return None;
        }
        self.active = Some(self.active.map_or(0, |i| (i + 1) % n));
        self.current()
    }

    /// Step back to the previous match, wrapping to the last
    pub fn previous(&mut self) -> Option<CellAddress> {
        let n = self.matches.len();
        if n == 0 {
            return None;
        }
        self.active = Some(self.active.map_or(n - 1, |i| (i + n - 1) % n));
        self.current()
    }

    /// "i of n", or "No matches" for a non-empty query
    pub fn status(&self) -> Option<String> {
        if self.query.is_empty() {
            return None;
        }
        match self.active {
            Some(i) => Some(format!("{} of {}", i + 1, self.matches.len())),
            None => Some("No matches".to_string()),
        }
    }
}
