//! Incremental row delivery for large grids
//!
//! The first chunk is handed out eagerly; the rest are consumed strictly
//! forward as the view scrolls toward the end of what it has.

use std::ops::Range;

use crate::grid::{Grid, Row};

/// Rows per chunk
pub const CHUNK_SIZE: usize = 1000;

/// Rows to keep in reserve below the viewport before asking for more
pub const DEFAULT_MARGIN: usize = 50;

/// A contiguous run of absolute row indices
///
/// Chunks do not own rows; [`RowChunk::rows`] borrows them from the grid
/// they were cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowChunk {
    pub start_row: usize,
    len: usize,
}

impl RowChunk {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Absolute index one past the last row
    pub fn end_row(&self) -> usize {
        self.start_row + self.len
    }

    pub fn range(&self) -> Range<usize> {
        self.start_row..self.end_row()
    }

    /// The chunk's rows in `grid`, cut short if the grid has fewer
    pub fn rows<'g>(&self, grid: &'g Grid) -> &'g [Row] {
        let all = grid.rows();
        let end = self.end_row().min(all.len());
        all.get(self.start_row..end).unwrap_or(&[])
    }
}

/// Forward-only source of the row ranges past the first chunk
#[derive(Debug, Clone)]
pub struct VirtualRowFeed {
    next_row: usize,
    end_row: usize,
    chunk_size: usize,
}

impl VirtualRowFeed {
    /// Split rows `start_index..end_index` into the eager first chunk and a
    /// feed for the rest
    ///
    /// `start_index` is 1 when a header row was taken off the front. A zero
    /// chunk size is treated as 1.
    pub fn new(start_index: usize, end_index: usize, chunk_size: usize) -> (RowChunk, Self) {
        let chunk_size = chunk_size.max(1);
        let end_row = end_index.max(start_index);
        let first = RowChunk {
            start_row: start_index,
            len: chunk_size.min(end_row - start_index),
        };
        let feed = Self {
            next_row: first.end_row(),
            end_row,
            chunk_size,
        };
        (first, feed)
    }

    /// A feed with nothing left to give
    pub fn exhausted() -> Self {
        Self {
            next_row: 0,
            end_row: 0,
            chunk_size: CHUNK_SIZE,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.next_row >= self.end_row
    }

    /// Rows not yet handed out
    pub fn remaining(&self) -> usize {
        self.end_row.saturating_sub(self.next_row)
    }

    /// Absolute index of the next row to be delivered
    pub fn next_row(&self) -> usize {
        self.next_row
    }

    /// Whether the view is close enough to the end of materialized rows
    pub fn needs_more(&self, last_visible_row: usize, margin: usize) -> bool {
        !self.is_exhausted() && last_visible_row.saturating_add(margin) >= self.next_row
    }
}

impl Iterator for VirtualRowFeed {
    type Item = RowChunk;

    fn next(&mut self) -> Option<RowChunk> {
        if self.is_exhausted() {
            return None;
        }
        let chunk = RowChunk {
            start_row: self.next_row,
            len: self.chunk_size.min(self.remaining()),
        };
        self.next_row = chunk.end_row();
        tracing::debug!(start = chunk.start_row, len = chunk.len(), "row chunk delivered");
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining().div_ceil(self.chunk_size);
        (n, Some(n))
    }
}
