//! Corruption recovery tests for the bmi binary.
//!
//! These tests verify the history reader tolerates:
//! - Malformed rows
//! - Partial writes
//! - Files written without a header

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write as IoWrite;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("bmi"))
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn history_json(data_dir: &std::path::Path) -> Vec<f64> {
    let output = cli()
        .arg("history")
        .arg("--json")
        .arg("--data-dir")
        .arg(data_dir)
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_malformed_rows_skipped() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    fs::write(
        data_dir.join("bmi_data.csv"),
        "date,weight,height_ft,age,bmi,category\n\
         2024-01-01T09:00:00,70.0,5.9,30,21.6,Normal weight\n\
         2024-01-02T09:00:00,70.0,5.9,30,not-a-number,Normal weight\n\
         garbage\n",
    )
    .expect("Failed to write history");

    assert_eq!(history_json(data_dir), vec![21.6]);
}

#[test]
fn test_partial_last_row() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    let path = data_dir.join("bmi_data.csv");

    // Valid row followed by a truncated one (simulating a crash during write)
    let mut file = fs::File::create(&path).unwrap();
    writeln!(file, "2024-01-01T09:00:00,70.0,5.9,30,21.6,Normal weight").unwrap();
    write!(file, "2024-01-02T09:00:00,71.0,5.9").unwrap();
    drop(file);

    assert_eq!(history_json(data_dir), vec![21.6]);

    cli()
        .arg("history")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("#1"))
        .stdout(predicate::str::contains("#2").not());
}

#[test]
fn test_append_after_corruption() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    let path = data_dir.join("bmi_data.csv");

    fs::write(&path, "{ not csv at all }\n").unwrap();

    cli()
        .arg("calc")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--weight")
        .arg("70")
        .arg("--height")
        .arg("5.9")
        .arg("--age")
        .arg("30")
        .assert()
        .success();

    // Existing file keeps its contents and gets no header
    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("{ not csv at all }\n"));
    assert!(!contents.contains("date,weight"));
    assert_eq!(history_json(data_dir), vec![21.6]);
}

#[test]
fn test_empty_history_file() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    fs::write(data_dir.join("bmi_data.csv"), "").unwrap();

    assert!(history_json(data_dir).is_empty());
}
