//! Plain-text grid rendering
//!
//! Renders a [`GridView`] for a terminal:
//! - Column letters (A, B, C, ...) with the estimated column type
//! - Optional row number gutter
//! - Header row separated from the body
//! - Diff markers per row in diff mode
//! - Per-column ANSI colors from the column palette

use crate::diff::{DiffRow, DiffStatus};
use crate::grid::{parse_decimal, CellAddress};
use crate::state::GridView;

/// Convert column index to letter(s): 0->A, 1->B, ..., 25->Z, 26->AA, etc.
pub fn column_to_letters(col: usize) -> String {
    let mut result = String::new();
    let mut n = col;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

/// Check if a string looks like a number (for right-alignment)
pub fn is_number(s: &str) -> bool {
    parse_decimal(s).is_some()
}

/// Truncate text with ellipsis if too long
pub fn truncate_text(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 1 {
        s.chars().take(max_chars).collect()
    } else {
        let mut result: String = s.chars().take(max_chars - 1).collect();
        result.push('…');
        result
    }
}

/// ANSI truecolor foreground for a `#rrggbb` color
pub fn ansi_fg(hex: &str) -> Option<String> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(format!("\x1b[38;2;{};{};{}m", channel(0)?, channel(2)?, channel(4)?))
}

const RESET: &str = "\x1b[0m";
const REVERSE: &str = "\x1b[7m";

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Emit ANSI colors
    pub color: bool,
    /// Render at most this many rows of the materialized range
    pub max_rows: Option<usize>,
}

/// Marker for a row's diff status
fn diff_marker(row: Option<&DiffRow>) -> char {
    match row.map(|r| r.status) {
        None | Some(DiffStatus::Same) => ' ',
        Some(DiffStatus::Modified) => '~',
        Some(DiffStatus::BaseOnly) => '-',
        Some(DiffStatus::ModOnly) => '+',
    }
}

fn pad(text: &str, width: usize, right_align: bool) -> String {
    let len = text.chars().count();
    let fill = " ".repeat(width.saturating_sub(len));
    if right_align {
        format!("{fill}{text}")
    } else {
        format!("{text}{fill}")
    }
}

/// Render the materialized rows of `view` as a text table
///
/// A disabled view renders its raw text unchanged.
pub fn render_grid(view: &GridView, options: RenderOptions) -> String {
    if !view.settings.enabled {
        return view.text.clone();
    }

    let grid = &view.grid;
    let cols = grid.column_count();
    let gap = " ".repeat(view.settings.cell_padding.max(1));
    let diff_rows = view.diff_rows();
    let in_diff = view.in_diff_mode();
    let total_rows = if in_diff {
        grid.row_count().max(diff_rows.len())
    } else {
        grid.row_count()
    };
    let shown = view
        .visible_row_count()
        .max(if in_diff { total_rows } else { 0 })
        .min(options.max_rows.unwrap_or(usize::MAX));

    let widths: Vec<usize> = (0..cols)
        .map(|c| {
            let hint = view.hints.get(c);
            let letters = column_to_letters(c).chars().count();
            let type_tag = hint.map_or(0, |h| h.column_type.as_str().len() + 3);
            hint.map_or(1, |h| h.width).max(letters + type_tag).max(1)
        })
        .collect();
    let gutter = if view.settings.add_serial_index {
        total_rows.max(1).to_string().len()
    } else {
        0
    };

    let mut out = String::new();
    let prefix = |marker: char, number: Option<usize>| -> String {
        let mut p = String::new();
        if in_diff {
            p.push(marker);
            p.push(' ');
        }
        if gutter > 0 {
            let label = number.map(|n| n.to_string()).unwrap_or_default();
            p.push_str(&pad(&label, gutter, true));
            p.push_str(&gap);
        }
        p
    };

    // Column letters with their estimated types
    let mut line = prefix(' ', None);
    let labels: Vec<String> = (0..cols)
        .map(|c| {
            let label = match view.hints.get(c) {
                Some(h) => format!("{} ({})", column_to_letters(c), h.column_type),
                None => column_to_letters(c),
            };
            pad(&label, widths[c], false)
        })
        .collect();
    line.push_str(&labels.join(&gap));
    out.push_str(line.trim_end());
    out.push('\n');

    for r in 0..shown {
        let diff_row = diff_rows.get(r);
        let number = r.checked_sub(view.body_start()).map(|n| n + 1);
        let is_header = view.has_header() && r == 0;
        let mut line = prefix(diff_marker(diff_row), if is_header { None } else { number });

        let cells: Vec<String> = (0..cols)
            .map(|c| {
                let text = match diff_row.map(|d| d.cell_status(c)) {
                    Some(DiffStatus::BaseOnly) => diff_row
                        .and_then(|d| d.cells.get(c))
                        .map(|cell| format!("[{}]", cell.base))
                        .unwrap_or_default(),
                    _ => grid.cell(r, c).to_string(),
                };
                let text = truncate_text(&text, widths[c]);
                let cell = pad(&text, widths[c], !is_header && is_number(&text));
                if !options.color {
                    return cell;
                }
                let is_match = view.find.is_match(CellAddress::new(r, c));
                let color = view.hints.get(c).and_then(|h| ansi_fg(h.color));
                match (is_match, color) {
                    (true, _) => format!("{REVERSE}{cell}{RESET}"),
                    (false, Some(fg)) => format!("{fg}{cell}{RESET}"),
                    (false, None) => cell,
                }
            })
            .collect();
        line.push_str(&cells.join(&gap));
        out.push_str(line.trim_end());
        out.push('\n');

        if is_header {
            let rule_width: usize =
                widths.iter().sum::<usize>() + gap.len() * cols.saturating_sub(1);
            let mut rule = prefix(' ', None);
            rule.push_str(&"─".repeat(rule_width));
            out.push_str(rule.trim_end());
            out.push('\n');
        }
    }

    let remaining = total_rows.saturating_sub(shown);
    if remaining > 0 {
        out.push_str(&format!("… {} more rows\n", remaining));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::grid::Grid;
    use std::path::PathBuf;

    fn view(text: &str) -> GridView {
        GridView::new(text.to_string(), GridConfig::default())
    }

    #[test]
    fn test_column_letters() {
        assert_eq!(column_to_letters(0), "A");
        assert_eq!(column_to_letters(25), "Z");
        assert_eq!(column_to_letters(26), "AA");
        assert_eq!(column_to_letters(701), "ZZ");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("hello", 10), "hello");
        assert_eq!(truncate_text("hello", 4), "hel…");
        assert_eq!(truncate_text("hello", 1), "h");
    }

    #[test]
    fn test_ansi_fg() {
        assert_eq!(ansi_fg("#ff0080").as_deref(), Some("\x1b[38;2;255;0;128m"));
        assert_eq!(ansi_fg("ff0080"), None);
        assert_eq!(ansi_fg("#fff"), None);
    }

    #[test]
    fn test_render_header_and_alignment() {
        let out = render_grid(&view("name\tqty\napple\t3\nfig\t12"), RenderOptions::default());
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("A (string)"));
        assert!(lines[0].contains("B (integer)"));
        assert!(lines[1].starts_with("name"));
        assert!(lines[2].starts_with('─'));
        assert!(lines[3].starts_with("apple"));
        assert!(lines[3].ends_with(" 3"));
        assert!(lines[4].ends_with("12"));
    }

    #[test]
    fn test_serial_index_gutter() {
        let mut v = view("h\na\nb");
        v.settings.add_serial_index = true;
        let out = render_grid(&v, RenderOptions::default());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[3].trim_start(), "1    a");
        assert_eq!(lines[4].trim_start(), "2    b");
    }

    #[test]
    fn test_diff_markers() {
        let mut v = view("k\tv\n1\tx\n2\ty");
        v.set_base(
            PathBuf::from("base.tsv"),
            Grid::from_strs(&[&["k", "v"], &["1", "changed"]]),
        );
        let out = render_grid(&v, RenderOptions::default());
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[3].starts_with('~'));
        assert!(lines[4].starts_with('+'));
    }

    #[test]
    fn test_disabled_renders_raw_text() {
        let mut v = view("a\tb");
        v.settings.enabled = false;
        assert_eq!(render_grid(&v, RenderOptions::default()), "a\tb");
    }

    #[test]
    fn test_max_rows_reports_remainder() {
        let out = render_grid(
            &view("h\n1\n2\n3"),
            RenderOptions {
                color: false,
                max_rows: Some(2),
            },
        );
        assert!(out.ends_with("… 2 more rows\n"));
    }
}
