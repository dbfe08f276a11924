//! Tab-delimited grid model
//!
//! Parsing, serialization and structural mutation of a ragged grid of cell
//! strings, plus per-column type estimation.
//!
//! # Architecture
//!
//! Every mutation is a pure function from one [`Grid`] snapshot to the next.
//! The host re-parses the document text after each write, so a grid is never
//! patched in place across calls.
//!
//! ```text
//! text ──parse──▶ Grid ──ops/sort──▶ Grid' ──serialize──▶ text'
//!                  │
//!                  └──▶ ColumnHints (type, width, color)
//! ```

mod column_type;
mod hints;
mod model;
mod ops;
mod parser;
mod sort;

pub use column_type::{estimate, is_date, parse_decimal, parse_number, ColumnType};
pub use hints::{column_color, column_widths, compute_column_hints, ColumnHints, MAX_COLUMN_WIDTH};
pub(crate) use ops::assign_cell;
pub use model::{CellAddress, Grid, LineEnding, Row, TAB};
pub use ops::{delete_column, delete_row, insert_column, insert_row, set_cell};
pub use parser::{
    locate_cell, parse, range_offsets, replace_range, sanitize_cell_value, serialize, serialize_with,
    split_lines, TextRange,
};
pub use sort::{compare_cells, sort_rows};
