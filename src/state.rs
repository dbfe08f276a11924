//! Grid view state
//!
//! A [`GridView`] owns the parsed grid of one document plus everything
//! derived from it. The document text is the source of truth: after every
//! write the view re-parses what the persistence layer reports, and all
//! derived state (diff, hints, find matches, row feed) is rebuilt in the
//! same step.

use std::path::PathBuf;

use crate::config::GridConfig;
use crate::diff::{diff, DiffRow, DiffSummary};
use crate::feed::{VirtualRowFeed, CHUNK_SIZE};
use crate::find::FindState;
use crate::grid::{compute_column_hints, parse, serialize_with, ColumnHints, Grid, LineEnding, TAB};
use crate::selection::{GridExtent, SelectionModel};

/// Base grid for diff mode
#[derive(Debug, Clone)]
pub struct BaseDocument {
    pub path: PathBuf,
    pub grid: Grid,
    pub rows: Vec<DiffRow>,
}

#[derive(Debug)]
pub struct GridView {
    /// Document text as last read from persistence
    pub text: String,
    pub separator: char,
    pub line_ending: LineEnding,
    pub grid: Grid,
    pub base: Option<BaseDocument>,
    pub selection: SelectionModel,
    pub feed: VirtualRowFeed,
    /// Absolute index one past the last materialized row
    pub loaded_rows: usize,
    pub hints: Vec<ColumnHints>,
    pub find: FindState,
    pub settings: GridConfig,
    pub dark: bool,
    /// Last user-facing message
    pub status: Option<String>,
}

impl GridView {
    /// A tab-separated view of `text`
    pub fn new(text: String, settings: GridConfig) -> Self {
        Self::with_separator(text, TAB, settings)
    }

    pub fn with_separator(text: String, separator: char, settings: GridConfig) -> Self {
        let mut view = Self {
            text: String::new(),
            separator,
            line_ending: LineEnding::default(),
            grid: Grid::new(),
            base: None,
            selection: SelectionModel::new(),
            feed: VirtualRowFeed::exhausted(),
            loaded_rows: 0,
            hints: Vec::new(),
            find: FindState::new(),
            settings,
            dark: true,
            status: None,
        };
        view.reload(text);
        view
    }

    /// Re-parse `text` and rebuild everything derived from it
    pub fn reload(&mut self, text: String) {
        self.line_ending = LineEnding::detect(&text);
        self.grid = parse(&text, self.separator);
        self.text = text;
        tracing::debug!(
            rows = self.grid.row_count(),
            cols = self.grid.column_count(),
            "document parsed"
        );
        self.selection.clamp_to(self.extent());
        self.find.refresh(&self.grid);
        self.refresh_diff();
        self.refresh_layout();
    }

    /// Serialize a grid the way this document is written
    pub fn serialize(&self, grid: &Grid) -> String {
        serialize_with(grid, self.separator, self.line_ending)
    }

    pub fn extent(&self) -> GridExtent {
        GridExtent::of(&self.grid)
    }

    pub fn has_header(&self) -> bool {
        self.settings.treat_first_row_as_header && !self.grid.is_empty()
    }

    /// Index of the first body row
    pub fn body_start(&self) -> usize {
        usize::from(self.has_header())
    }

    pub fn in_diff_mode(&self) -> bool {
        self.base.is_some()
    }

    pub fn diff_rows(&self) -> &[DiffRow] {
        self.base.as_ref().map_or(&[], |b| b.rows.as_slice())
    }

    pub fn diff_summary(&self) -> Option<DiffSummary> {
        self.base.as_ref().map(|b| DiffSummary::from_rows(&b.rows))
    }

    pub fn set_base(&mut self, path: PathBuf, grid: Grid) {
        self.base = Some(BaseDocument {
            path,
            grid,
            rows: Vec::new(),
        });
        self.refresh_diff();
    }

    pub fn clear_base(&mut self) {
        self.base = None;
    }

    pub fn refresh_diff(&mut self) {
        if let Some(base) = self.base.as_mut() {
            base.rows = diff(&base.grid, &self.grid);
        }
    }

    /// Rebuild hints and the row feed, keeping already materialized rows
    pub fn refresh_layout(&mut self) {
        self.hints = compute_column_hints(&self.grid, self.has_header(), self.dark);

        let keep = self.loaded_rows;
        let (first, feed) =
            VirtualRowFeed::new(self.body_start(), self.grid.row_count(), CHUNK_SIZE);
        self.feed = feed;
        self.loaded_rows = first.end_row();
        self.ensure_loaded(keep.saturating_sub(1));
    }

    /// Pull chunks until `row` is materialized or the feed runs dry
    pub fn ensure_loaded(&mut self, row: usize) {
        while row >= self.loaded_rows {
            match self.feed.next() {
                Some(chunk) => self.loaded_rows = chunk.end_row(),
                None => break,
            }
        }
    }

    /// Rows the surface should currently render
    pub fn visible_row_count(&self) -> usize {
        self.loaded_rows.min(self.grid.row_count())
    }
}
