use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

mod common;

#[test]
fn test_header_only_input() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.csv");
    common::write_activity_csv(&path, &[]).unwrap();

    let mut cmd = Command::new(cargo_bin!("timesheet-invoicer"));
    cmd.arg("summary").arg(&path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "project,hours,amount,deduction,payable\ntotal,0.00,,,0.00",
        ))
        .stderr(predicate::str::contains("Dropped malformed rows").not());

    let mut cmd = Command::new(cargo_bin!("timesheet-invoicer"));
    cmd.arg("invoice").arg(&path).arg("--out-dir").arg(dir.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No projects to invoice"));
}

#[test]
fn test_extreme_decimal_precision() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("precision.csv");
    common::write_activity_csv(
        &path,
        &[
            ["P1", "Alice", "Coding", "", "0.005"],
            ["P1", "Alice", "Coding", "", "0.005"],
        ],
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("timesheet-invoicer"));
    cmd.arg("summary").arg(&path).args(["--rate", "Alice=1000"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("P1,0.01,10.00,0.00,10.00"));
}

#[test]
fn test_large_figures() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("large.csv");
    common::write_activity_csv(&path, &[["P1", "Alice", "Coding", "", "100000"]]).unwrap();

    let mut cmd = Command::new(cargo_bin!("timesheet-invoicer"));
    cmd.arg("summary").arg(&path).args(["--rate", "Alice=999999.99"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("P1,100000.00,99999999000.00,0.00,99999999000.00"));
}

#[test]
fn test_oversized_hours_are_dropped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("oversized.csv");
    common::write_activity_csv(
        &path,
        &[
            ["P1", "Alice", "x", "", "50000000000000000000000000000"],
            ["P1", "Alice", "y", "", "50000000000000000000000000000"],
            ["P1", "Alice", "z", "", "2"],
        ],
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("timesheet-invoicer"));
    cmd.arg("summary").arg(&path).args(["--rate", "Alice=10"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("P1,2.00,20.00,0.00,20.00"))
        .stderr(predicate::str::contains("Dropped malformed rows"));
}

#[test]
fn test_long_activity_text_paginates() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("long.csv");
    let activity = "Reviewed and refactored the reporting pipeline ".repeat(6);
    let rows: Vec<[&str; 5]> = (0..40)
        .map(|_| ["P1", "Alice", activity.as_str(), "", "1"])
        .collect();
    common::write_activity_csv(&path, &rows).unwrap();

    let mut cmd = Command::new(cargo_bin!("timesheet-invoicer"));
    cmd.arg("invoice")
        .arg(&path)
        .args(["--month", "2025-01", "--format", "json"])
        .arg("--out-dir")
        .arg(dir.path());
    cmd.assert().success();

    let text = std::fs::read_to_string(dir.path().join("p1-2025-01.json")).unwrap();
    let document: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(document["pages"].as_array().unwrap().len() > 2);
}
