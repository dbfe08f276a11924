//! Range selection and in-cell editing
//!
//! [`SelectionModel`] is a pure state machine over cell addresses. It is
//! driven by [`crate::input`] events and never touches the document; cell
//! writes leave it as [`CellEdit`] values.

mod edit;
mod machine;
mod range;

pub use edit::CellEditState;
pub use machine::{CellEdit, SelectionModel, SelectionState};
pub use range::{CellRect, GridExtent, SelectionMode, SelectionRange};
