use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

mod common;

#[test]
fn test_malformed_rows_are_dropped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("robustness.csv");
    common::write_activity_csv(
        &path,
        &[
            // Valid
            ["P1", "Alice", "Coding", "", "1.0"],
            // Missing worker
            ["P1", "", "Coding", "", "1.0"],
            // Hours not a number
            ["P1", "Alice", "Coding", "", "lots"],
            // Negative hours
            ["P1", "Alice", "Coding", "", "-2"],
            // Valid again
            ["P1", "Alice", "Review", "", "2.0"],
        ],
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("timesheet-invoicer"));
    cmd.arg("summary").arg(&path).args(["--rate", "Alice=10"]);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Dropped malformed rows"))
        .stdout(predicate::str::contains("P1,3.00,30.00,0.00,30.00"));
}

#[test]
fn test_short_rows_are_dropped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("short.csv");
    std::fs::write(
        &path,
        "project,workers,activity,duration,hours\nP1,Alice,Coding\nP1,Alice,Coding,,1.5\n",
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("timesheet-invoicer"));
    cmd.arg("summary").arg(&path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("P1,1.50,0.00,0.00,0.00"));
}

#[test]
fn test_missing_input_names_the_file() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.csv");
    common::write_activity_csv(&good, &[["P1", "Alice", "Coding", "", "1.0"]]).unwrap();

    let mut cmd = Command::new(cargo_bin!("timesheet-invoicer"));
    cmd.arg("invoice")
        .arg(&good)
        .arg("missing.csv")
        .arg("--out-dir")
        .arg(dir.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("missing.csv"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_invalid_month() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("month.csv");
    common::write_activity_csv(&path, &[["P1", "Alice", "Coding", "", "1.0"]]).unwrap();

    let mut cmd = Command::new(cargo_bin!("timesheet-invoicer"));
    cmd.arg("invoice").arg(&path).args(["--month", "January"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("January"));
}

#[test]
fn test_invalid_assignment() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rate.csv");
    common::write_activity_csv(&path, &[["P1", "Alice", "Coding", "", "1.0"]]).unwrap();

    let mut cmd = Command::new(cargo_bin!("timesheet-invoicer"));
    cmd.arg("summary").arg(&path).args(["--rate", "Alice"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("NAME=VALUE"));
}

#[test]
fn test_unparseable_adjustments_count_as_zero() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("adjust.csv");
    common::write_activity_csv(&path, &[["P1", "Alice", "Coding", "", "2.0"]]).unwrap();

    let mut cmd = Command::new(cargo_bin!("timesheet-invoicer"));
    cmd.arg("summary")
        .arg(&path)
        .args(["--rate", "Alice=ten", "--deduct", "P1=abc", "--hours", "Alice=0"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("P1,2.00,0.00,0.00,0.00"))
        .stdout(predicate::str::contains("Alice,2.00,2.00,0.00,0.00,0.00"));
}
