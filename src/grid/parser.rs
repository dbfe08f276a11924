//! Tab-delimited text parsing and serialization
//!
//! The format is literal: no quoting, no escaping. A separator inside a cell
//! is indistinguishable from a delimiter, which is why cell text written by the
//! editor goes through [`sanitize_cell_value`] first.

use super::model::{Grid, LineEnding, Row};

/// A span of raw text addressed by line and character column
///
/// Columns count `char`s, not bytes. The end is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl TextRange {
    /// A span contained in a single line
    pub fn on_line(line: usize, start_col: usize, end_col: usize) -> Self {
        Self {
            start_line: line,
            start_col,
            end_line: line,
            end_col,
        }
    }

    /// The span covering all of `text`
    pub fn whole(text: &str) -> Self {
        let lines = split_lines(text);
        let last = lines.len() - 1;
        Self {
            start_line: 0,
            start_col: 0,
            end_line: last,
            end_col: lines[last].chars().count(),
        }
    }
}

/// Byte spans of each line, line breaks excluded
fn line_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                spans.push((start, i));
                start = i + 1;
            }
            b'\r' => {
                spans.push((start, i));
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    spans.push((start, text.len()));
    spans
}

/// Split text into lines on `\r\n`, `\n` or `\r`
///
/// A trailing line break produces a final empty line, so that joining the
/// result with a single break reproduces the input.
pub fn split_lines(text: &str) -> Vec<&str> {
    line_spans(text)
        .into_iter()
        .map(|(start, end)| &text[start..end])
        .collect()
}

fn position_offset(text: &str, spans: &[(usize, usize)], line: usize, col: usize) -> Option<usize> {
    let &(start, end) = spans.get(line)?;
    let content = &text[start..end];
    if col == content.chars().count() {
        return Some(end);
    }
    content.char_indices().nth(col).map(|(i, _)| start + i)
}

/// Byte offsets of both ends of `range` in `text`
///
/// `None` when either end does not exist or the range is reversed.
pub fn range_offsets(text: &str, range: TextRange) -> Option<(usize, usize)> {
    let spans = line_spans(text);
    let start = position_offset(text, &spans, range.start_line, range.start_col)?;
    let end = position_offset(text, &spans, range.end_line, range.end_col)?;
    (start <= end).then_some((start, end))
}

/// Replace the span `range` of `text`
pub fn replace_range(text: &str, range: TextRange, new_text: &str) -> Option<String> {
    let (start, end) = range_offsets(text, range)?;
    let mut out = String::with_capacity(text.len() - (end - start) + new_text.len());
    out.push_str(&text[..start]);
    out.push_str(new_text);
    out.push_str(&text[end..]);
    Some(out)
}

/// Parse delimited text into a grid
///
/// Never fails. Empty input yields an empty grid.
pub fn parse(text: &str, separator: char) -> Grid {
    if text.is_empty() {
        return Grid::new();
    }

    let rows: Vec<Row> = split_lines(text)
        .into_iter()
        .map(|line| line.split(separator).map(str::to_string).collect())
        .collect();

    Grid::from_rows(rows)
}

/// Serialize a grid with `\n` line breaks
pub fn serialize(grid: &Grid, separator: char) -> String {
    serialize_with(grid, separator, LineEnding::Lf)
}

/// Serialize a grid with an explicit line ending
pub fn serialize_with(grid: &Grid, separator: char, line_ending: LineEnding) -> String {
    let sep = separator.to_string();
    grid.rows()
        .iter()
        .map(|row| row.join(&sep))
        .collect::<Vec<_>>()
        .join(line_ending.as_str())
}

/// Locate the raw-text span of a single existing cell
///
/// Returns `None` when the row or the cell does not exist in `text`; callers
/// fall back to a full rewrite in that case.
pub fn locate_cell(text: &str, separator: char, row: usize, col: usize) -> Option<TextRange> {
    if text.is_empty() {
        return None;
    }

    let line = *split_lines(text).get(row)?;
    let mut start_col = 0;

    for (idx, cell) in line.split(separator).enumerate() {
        let width = cell.chars().count();
        if idx == col {
            return Some(TextRange::on_line(row, start_col, start_col + width));
        }
        start_col += width + 1;
    }

    None
}

/// Make a value safe to store in a single cell
///
/// Separators and line breaks would split the cell on the next parse, so they
/// are replaced with a space.
pub fn sanitize_cell_value(value: &str, separator: char) -> String {
    value
        .chars()
        .map(|c| {
            if c == separator || c == '\n' || c == '\r' {
                ' '
            } else {
                c
            }
        })
        .collect()
}
