//! The command-line runner against real files

mod common;

use std::fs;
use std::path::{Path, PathBuf};

use common::FRUIT;
use tempfile::TempDir;
use tsvgrid::app::run;
use tsvgrid::cli::{Command, RunConfig};
use tsvgrid::config::GridConfig;
use tsvgrid::grid::CellAddress;

fn write_file(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

fn config(file: &Path, command: Command) -> RunConfig {
    RunConfig {
        file: file.to_path_buf(),
        base: None,
        no_header: false,
        json: false,
        command,
    }
}

fn run_to_string(config: RunConfig) -> anyhow::Result<String> {
    let mut out = Vec::new();
    run(config, GridConfig::default(), &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn test_set_writes_file() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "fruit.tsv", FRUIT);

    run_to_string(config(
        &file,
        Command::Set {
            row: 2,
            col: 1,
            value: "12".to_string(),
        },
    ))
    .unwrap();

    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "name\tqty\tprice\napple\t3\t1.5\npear\t12\t0.75\nfig\t1\t2"
    );
}

#[test]
fn test_sort_keeps_crlf_line_endings() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "people.tsv", "Name\tAge\r\nJohn\t25\r\nJane\t30");

    run_to_string(config(&file, Command::Sort { col: 1, desc: true })).unwrap();

    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "Name\tAge\r\nJane\t30\r\nJohn\t25"
    );
}

#[test]
fn test_types_as_json() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "fruit.tsv", FRUIT);

    let mut cfg = config(&file, Command::Types);
    cfg.json = true;
    let out = run_to_string(cfg).unwrap();

    let reports: serde_json::Value = serde_json::from_str(&out).unwrap();
    let types: Vec<&str> = reports
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["type"].as_str().unwrap())
        .collect();
    assert_eq!(types, ["string", "integer", "float"]);
    assert_eq!(reports[2]["letter"], "C");
}

#[test]
fn test_find_lists_matches() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "fruit.tsv", FRUIT);

    let out = run_to_string(config(
        &file,
        Command::Find {
            query: "PE".to_string(),
        },
    ))
    .unwrap();

    assert!(out.contains("2:0\tpear"));
    assert!(!out.contains("apple"));
}

#[test]
fn test_copy_to_stdout() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "fruit.tsv", FRUIT);

    let out = run_to_string(config(
        &file,
        Command::Copy {
            from: CellAddress::new(1, 1),
            to: Some(CellAddress::new(2, 2)),
            stdout: true,
        },
    ))
    .unwrap();

    assert_eq!(out, "3,1.5\n10,0.75\n");
}

#[test]
fn test_diff_against_base() {
    let dir = TempDir::new().unwrap();
    let base = write_file(&dir, "base.tsv", FRUIT);
    let file = write_file(
        &dir,
        "fruit.tsv",
        "name\tqty\tprice\napple\t4\t1.5\npear\t10\t0.75\nfig\t1\t2",
    );

    let mut cfg = config(&file, Command::Diff);
    cfg.base = Some(base);
    let out = run_to_string(cfg).unwrap();

    assert!(out.starts_with("1 changed rows: 1 modified"));
    assert!(out.contains("row 1: B: \"3\" -> \"4\""));
}

#[test]
fn test_accept_cell_restores_base_value() {
    let dir = TempDir::new().unwrap();
    let base = write_file(&dir, "base.tsv", FRUIT);
    let file = write_file(
        &dir,
        "fruit.tsv",
        "name\tqty\tprice\napple\t4\t1.5\npear\t10\t0.75\nfig\t1\t2",
    );

    let mut cfg = config(&file, Command::AcceptCell { row: 1, col: 1 });
    cfg.base = Some(base);
    let out = run_to_string(cfg).unwrap();

    assert!(out.starts_with("0 changed rows"));
    assert_eq!(fs::read_to_string(&file).unwrap(), FRUIT);
}

#[test]
fn test_missing_base_is_an_error() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "fruit.tsv", FRUIT);

    let mut cfg = config(&file, Command::Diff);
    cfg.base = Some(dir.path().join("nope.tsv"));
    let err = run_to_string(cfg).unwrap_err();

    assert!(err.to_string().contains("Cannot open base file"));
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = run_to_string(config(&dir.path().join("absent.tsv"), Command::Types)).unwrap_err();
    assert!(err.to_string().contains("Failed to open"));
}
