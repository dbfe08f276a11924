//! tsvgrid - tab-separated files as an editable grid
//!
//! The core (`grid`, `diff`, `selection`, `feed`, `find`) is pure and
//! synchronous. A [`state::GridView`] holds one document's derived state and
//! changes only through [`update::update`], Elm style; the [`host::Session`]
//! runtime executes the returned [`Cmd`]s against a document store, a
//! clipboard and a base-file loader.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod diff;
pub mod feed;
pub mod find;
pub mod grid;
pub mod host;
pub mod input;
pub mod messages;
pub mod render;
pub mod selection;
pub mod state;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::GridConfig;
pub use grid::{CellAddress, Grid};
pub use messages::GridMsg;
pub use state::GridView;
