//! Row sorting by a single column

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::column_type::parse_decimal;
use super::model::{Grid, Row};

/// Sort key for one cell
///
/// Empty cells order first, then numbers, then text. Two numbers compare
/// numerically; text compares by its base letters (case and accents folded)
/// and falls back to the lowercased value to break ties.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Empty,
    Number(f64),
    Text { base: String, folded: String },
}

impl SortKey {
    fn from_cell(value: &str) -> Self {
        if value.is_empty() {
            return SortKey::Empty;
        }
        match parse_decimal(value) {
            Some(n) => SortKey::Number(n),
            None => SortKey::Text {
                base: base_letters(value),
                folded: value.to_lowercase(),
            },
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Empty => 0,
            SortKey::Number(_) => 1,
            SortKey::Text { .. } => 2,
        }
    }

    fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (
                SortKey::Text { base: a, folded: fa },
                SortKey::Text { base: b, folded: fb },
            ) => a.cmp(b).then_with(|| fa.cmp(fb)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Lowercased text with combining marks removed after canonical decomposition
fn base_letters(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Compare two cell values the way [`sort_rows`] does
pub fn compare_cells(a: &str, b: &str) -> Ordering {
    SortKey::from_cell(a).compare(&SortKey::from_cell(b))
}

/// Sort rows by `column`, keeping the header row pinned when requested
///
/// The sort is stable in both directions: rows with equal keys keep their
/// relative order. Missing cells sort as the empty string.
pub fn sort_rows(grid: &Grid, column: usize, ascending: bool, has_header: bool) -> Grid {
    let mut rows = grid.clone().into_rows();
    let header: Option<Row> = if has_header && !rows.is_empty() {
        Some(rows.remove(0))
    } else {
        None
    };

    let mut keyed: Vec<(SortKey, Row)> = rows
        .into_iter()
        .map(|row| {
            let key = SortKey::from_cell(row.get(column).map(String::as_str).unwrap_or(""));
            (key, row)
        })
        .collect();

    keyed.sort_by(|(a, _), (b, _)| {
        let ord = a.compare(b);
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });

    let mut sorted: Vec<Row> = Vec::with_capacity(keyed.len() + 1);
    sorted.extend(header);
    sorted.extend(keyed.into_iter().map(|(_, row)| row));

    Grid::from_rows(sorted)
}
