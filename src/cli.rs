//! Command-line argument parsing
//!
//! `tsvgrid <FILE> [COMMAND]`; with no command the grid is shown.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::Toggle;
use crate::grid::CellAddress;

/// View and edit tab-separated files as a grid
#[derive(Parser, Debug)]
#[command(name = "tsvgrid", version, about = "View and edit tab-separated files as a grid")]
pub struct CliArgs {
    /// The tab-separated file to open
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Base file to compare against (diff mode)
    #[arg(long, global = true, value_name = "PATH")]
    pub base: Option<PathBuf>,

    /// Treat the first row as data, not a header
    #[arg(long, global = true)]
    pub no_header: bool,

    /// Print machine-readable JSON where supported
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the grid
    Show {
        /// Print every row instead of the first chunk
        #[arg(long)]
        all: bool,
        /// Colorize columns
        #[arg(long)]
        color: bool,
        /// Show row numbers
        #[arg(long)]
        serial: bool,
    },
    /// Print the estimated type of each column
    Types,
    /// Set a cell (0-based row and column)
    Set { row: usize, col: usize, value: String },
    /// Insert an empty row before ROW
    InsertRow { row: usize },
    DeleteRow { row: usize },
    /// Insert an empty column before COL
    InsertColumn { col: usize },
    DeleteColumn { col: usize },
    /// Sort body rows by a column
    Sort {
        col: usize,
        #[arg(long)]
        desc: bool,
    },
    /// Compare against --base
    Diff,
    /// Copy a base cell into the file
    AcceptCell { row: usize, col: usize },
    /// Copy a base row into the file
    AcceptRow { row: usize },
    /// List cells containing QUERY (case-insensitive)
    Find { query: String },
    /// Copy a range to the clipboard, e.g. `copy 1:0 3:2`
    Copy {
        #[arg(value_parser = parse_address)]
        from: CellAddress,
        #[arg(value_parser = parse_address)]
        to: Option<CellAddress>,
        /// Print instead of using the system clipboard
        #[arg(long)]
        stdout: bool,
    },
    /// Flip a persisted setting
    Toggle { setting: SettingArg },
    /// Reload and print the grid whenever the file changes
    Watch,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingArg {
    Enabled,
    Header,
    SerialIndex,
}

impl From<SettingArg> for Toggle {
    fn from(arg: SettingArg) -> Self {
        match arg {
            SettingArg::Enabled => Toggle::Enabled,
            SettingArg::Header => Toggle::Header,
            SettingArg::SerialIndex => Toggle::SerialIndex,
        }
    }
}

/// Parse `ROW:COL`
pub fn parse_address(s: &str) -> Result<CellAddress, String> {
    let (row, col) = s
        .split_once(':')
        .ok_or_else(|| format!("expected ROW:COL, got '{}'", s))?;
    let row = row
        .trim()
        .parse()
        .map_err(|_| format!("invalid row in '{}'", s))?;
    let col = col
        .trim()
        .parse()
        .map_err(|_| format!("invalid column in '{}'", s))?;
    Ok(CellAddress::new(row, col))
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub file: PathBuf,
    pub base: Option<PathBuf>,
    pub no_header: bool,
    pub json: bool,
    pub command: Command,
}

impl CliArgs {
    /// Validate and convert parsed CLI args
    pub fn into_config(self) -> Result<RunConfig, String> {
        let command = self.command.unwrap_or(Command::Show {
            all: false,
            color: false,
            serial: false,
        });

        let needs_base = matches!(
            command,
            Command::Diff | Command::AcceptCell { .. } | Command::AcceptRow { .. }
        );
        if needs_base && self.base.is_none() {
            return Err("this command needs --base <PATH>".to_string());
        }

        Ok(RunConfig {
            file: self.file,
            base: self.base,
            no_header: self.no_header,
            json: self.json,
            command,
        })
    }
}
