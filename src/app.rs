//! Command-line runner
//!
//! Opens a file in a [`Session`] and drives it with the same messages an
//! interactive surface would send.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::cli::{Command, RunConfig};
use crate::config::GridConfig;
use crate::diff::DiffRow;
use crate::grid::{CellAddress, ColumnType};
use crate::host::{
    Clipboard, DocumentWatcher, FileDocument, FsReferenceLoader, MemoryClipboard, Session,
    SystemClipboard,
};
use crate::input::{Modifiers, PointerEvent, PointerTarget};
use crate::messages::{DiffMsg, DocumentMsg, GridMsg, SelectionMsg, ViewMsg};
use crate::render::{column_to_letters, render_grid, RenderOptions};

type CliSession = Session<FileDocument, FsReferenceLoader, Box<dyn Clipboard>>;

#[derive(Serialize)]
struct ColumnReport {
    column: usize,
    letter: String,
    #[serde(rename = "type")]
    column_type: ColumnType,
    width: usize,
}

#[derive(Serialize)]
struct MatchReport<'a> {
    row: usize,
    col: usize,
    value: &'a str,
}

#[derive(Serialize)]
struct DiffReport<'a> {
    summary: crate::diff::DiffSummary,
    rows: Vec<&'a DiffRow>,
}

/// Run one command against `config.file`, writing output to `out`
pub fn run(config: RunConfig, mut settings: GridConfig, out: &mut impl Write) -> Result<()> {
    let RunConfig {
        file,
        base,
        no_header,
        json,
        command,
    } = config;

    if no_header {
        settings.treat_first_row_as_header = false;
    }
    if let Command::Show { serial: true, .. } = command {
        settings.add_serial_index = true;
    }

    let document = FileDocument::open(&file)
        .with_context(|| format!("Failed to open {}", file.display()))?;
    let loader = match file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => FsReferenceLoader::with_root(dir),
        _ => FsReferenceLoader::new(),
    };
    let clipboard: Box<dyn Clipboard> = match command {
        Command::Copy { stdout: false, .. } => Box::new(SystemClipboard::new()),
        _ => Box::new(MemoryClipboard::default()),
    };

    let mut session = Session::open(document, loader, clipboard, settings.clone());
    if let Some(path) = crate::config_paths::config_file() {
        session = session.with_settings_path(path);
    }

    if let Some(base) = base {
        session.dispatch(DiffMsg::Open(base));
        check_notices(&mut session)?;
    }

    match command {
        Command::Show { all, color, .. } => {
            if all {
                load_all_rows(&mut session);
            }
            let options = RenderOptions {
                color,
                max_rows: None,
            };
            write!(out, "{}", render_grid(session.view(), options))?;
        }
        Command::Types => print_types(&session, json, out)?,
        Command::Set { row, col, value } => {
            mutate(&mut session, DocumentMsg::SetCell { row, col, value })?
        }
        Command::InsertRow { row } => mutate(&mut session, DocumentMsg::InsertRow(row))?,
        Command::DeleteRow { row } => mutate(&mut session, DocumentMsg::DeleteRow(row))?,
        Command::InsertColumn { col } => mutate(&mut session, DocumentMsg::InsertColumn(col))?,
        Command::DeleteColumn { col } => mutate(&mut session, DocumentMsg::DeleteColumn(col))?,
        Command::Sort { col, desc } => mutate(
            &mut session,
            DocumentMsg::Sort {
                column: col,
                ascending: !desc,
            },
        )?,
        Command::Diff => print_diff(&session, json, out)?,
        Command::AcceptCell { row, col } => {
            mutate(&mut session, DiffMsg::AcceptCell { row, col })?;
            print_diff(&session, json, out)?;
        }
        Command::AcceptRow { row } => {
            mutate(&mut session, DiffMsg::AcceptRow(row))?;
            print_diff(&session, json, out)?;
        }
        Command::Find { query } => {
            session.dispatch(ViewMsg::Find(query));
            print_matches(&session, json, out)?;
        }
        Command::Copy { from, to, stdout } => {
            select_range(&mut session, from, to.unwrap_or(from));
            if stdout {
                let view = session.view();
                if let Some(text) = view.selection.copy_text(&view.grid) {
                    writeln!(out, "{}", text)?;
                }
            } else {
                session.dispatch(SelectionMsg::Copy);
                check_notices(&mut session)?;
            }
        }
        Command::Toggle { setting } => {
            session.dispatch(ViewMsg::Toggle(setting.into()));
            check_notices(&mut session)?;
            if let Some(status) = &session.view().status {
                writeln!(out, "{}", status)?;
            }
        }
        Command::Watch => watch(&mut session, &file, &settings, out)?,
    }

    Ok(())
}

/// Apply a mutation and save, failing if the session reported a problem
fn mutate(session: &mut CliSession, msg: impl Into<GridMsg>) -> Result<()> {
    session.dispatch(msg);
    check_notices(session)?;
    session.dispatch(DocumentMsg::Save);
    check_notices(session)
}

fn check_notices(session: &mut CliSession) -> Result<()> {
    let notices = session.take_notices();
    if notices.is_empty() {
        Ok(())
    } else {
        bail!(notices.join("; "))
    }
}

fn load_all_rows(session: &mut CliSession) {
    while !session.view().feed.is_exhausted() {
        let last_visible_row = session.view().loaded_rows;
        session.dispatch(ViewMsg::LoadMoreRows { last_visible_row });
    }
}

/// Drag-select from `from` to `to`, the way a pointer would
fn select_range(session: &mut CliSession, from: CellAddress, to: CellAddress) {
    session.dispatch(SelectionMsg::Pointer(PointerEvent::Down {
        target: PointerTarget::Cell(from),
        mods: Modifiers::NONE,
    }));
    session.dispatch(SelectionMsg::Pointer(PointerEvent::Move {
        target: PointerTarget::Cell(to),
    }));
    session.dispatch(SelectionMsg::Pointer(PointerEvent::Up));
}

fn print_types(session: &CliSession, json: bool, out: &mut impl Write) -> Result<()> {
    let reports: Vec<ColumnReport> = session
        .view()
        .hints
        .iter()
        .enumerate()
        .map(|(column, hint)| ColumnReport {
            column,
            letter: column_to_letters(column),
            column_type: hint.column_type,
            width: hint.width,
        })
        .collect();

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&reports)?)?;
    } else {
        for report in &reports {
            writeln!(out, "{}\t{}", report.letter, report.column_type)?;
        }
    }
    Ok(())
}

fn print_diff(session: &CliSession, json: bool, out: &mut impl Write) -> Result<()> {
    let view = session.view();
    let Some(summary) = view.diff_summary() else {
        bail!("no base file loaded");
    };
    let rows: Vec<&DiffRow> = view.diff_rows().iter().filter(|r| r.is_changed()).collect();

    if json {
        let report = DiffReport { summary, rows };
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    writeln!(
        out,
        "{} changed rows: {} modified, {} base-only, {} added cells",
        summary.changed_rows, summary.modified_cells, summary.base_only_cells, summary.mod_only_cells
    )?;
    for row in rows {
        let cells: Vec<String> = row
            .cells
            .iter()
            .filter(|c| c.status != crate::diff::DiffStatus::Same)
            .map(|c| format!("{}: {:?} -> {:?}", column_to_letters(c.column), c.base, c.working))
            .collect();
        writeln!(out, "row {}: {}", row.row, cells.join(", "))?;
    }
    Ok(())
}

fn print_matches(session: &CliSession, json: bool, out: &mut impl Write) -> Result<()> {
    let view = session.view();
    let matches: Vec<MatchReport> = view
        .find
        .matches()
        .iter()
        .map(|addr| MatchReport {
            row: addr.row,
            col: addr.col,
            value: view.grid.cell(addr.row, addr.col),
        })
        .collect();

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&matches)?)?;
    } else {
        for m in &matches {
            writeln!(out, "{}:{}\t{}", m.row, m.col, m.value)?;
        }
        if let Some(status) = view.find.status() {
            writeln!(out, "{}", status)?;
        }
    }
    Ok(())
}

fn watch(
    session: &mut CliSession,
    file: &Path,
    settings: &GridConfig,
    out: &mut impl Write,
) -> Result<()> {
    let watcher = DocumentWatcher::new(
        file,
        Duration::from_millis(settings.reload_debounce_ms),
    )
    .context("Failed to start file watcher")?;

    write!(out, "{}", render_grid(session.view(), RenderOptions::default()))?;
    out.flush()?;
    session.take_redraw();

    let notifier = session.change_notifier();
    loop {
        if watcher.wait_changed(Duration::from_secs(1)) {
            notifier.notify();
        }
        if !session.poll_changes() {
            continue;
        }
        for notice in session.take_notices() {
            writeln!(out, "{}", notice)?;
        }
        if session.take_redraw() {
            write!(out, "{}", render_grid(session.view(), RenderOptions::default()))?;
            out.flush()?;
        }
    }
}
