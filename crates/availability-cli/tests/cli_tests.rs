//! Integration tests for the `beats-availability` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the expand, check,
//! apply, show and overlaps subcommands through the actual binary, including stdin
//! input, file I/O, exit codes and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn cli() -> Command {
    Command::cargo_bin("beats-availability").unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// expand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn expand_range_from_file() {
    let output = cli()
        .args(["expand", "-i", fixture("clean_range.json").as_str()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let slots: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let dates: Vec<&str> = slots
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2025-06-01", "2025-06-02", "2025-06-03"]);
}

#[test]
fn expand_recurring_from_stdin() {
    let input = std::fs::read_to_string(fixture("recurring.json")).unwrap();

    cli()
        .arg("expand")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""monday""#))
        .stdout(predicate::str::contains(r#""wednesday""#))
        .stdout(predicate::str::contains(r#""recurringEndDate": "2025-12-31""#));
}

#[test]
fn expand_rejects_inverted_times() {
    cli()
        .arg("expand")
        .write_stdin(r#"{"startTime":"17:00","endTime":"09:00","mode":"single","date":"2025-06-01"}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("End time must be after start time"));
}

// ─────────────────────────────────────────────────────────────────────────────
// check
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_reports_conflict_and_exits_nonzero() {
    cli()
        .args([
            "check",
            "-c",
            fixture("calendar.json").as_str(),
            "-i",
            fixture("conflicting_single.json").as_str(),
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Conflict on Saturday, June 28, 2025: 14:00-16:00 overlaps with existing 15:00-17:00",
        ));
}

#[test]
fn check_clean_proposal_succeeds() {
    cli()
        .args([
            "check",
            "-c",
            fixture("calendar.json").as_str(),
            "-i",
            fixture("clean_range.json").as_str(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No conflicts (3 slot(s) ready to save)"));
}

#[test]
fn check_json_output_tags_findings() {
    let output = cli()
        .args([
            "check",
            "-c",
            fixture("calendar.json").as_str(),
            "-i",
            fixture("recurring.json").as_str(),
            "--json",
        ])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let evaluation: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let report = evaluation["report"].as_array().unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report[0]["kind"], "conflict");
    assert_eq!(
        report[0]["message"],
        "Conflict on Monday: 18:00-22:00 overlaps with existing 20:00-23:00"
    );
}

#[test]
fn check_missing_calendar_file_fails() {
    cli()
        .args(["check", "-c", "/nonexistent/calendar.json", "-i", fixture("clean_range.json").as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// apply
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn apply_merges_clean_proposal() {
    let output = cli()
        .args([
            "apply",
            "-c",
            fixture("calendar.json").as_str(),
            "-i",
            fixture("clean_range.json").as_str(),
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let calendar: serde_json::Value = serde_json::from_slice(&output).unwrap();
    for key in ["2025-06-01", "2025-06-02", "2025-06-03", "2025-06-28", "monday"] {
        assert!(calendar.get(key).is_some(), "missing {key}");
    }
    assert_eq!(calendar["2025-06-02"][0]["startTime"], "09:00");
}

#[test]
fn apply_refuses_conflicting_proposal() {
    cli()
        .args([
            "apply",
            "-c",
            fixture("calendar.json").as_str(),
            "-i",
            fixture("conflicting_single.json").as_str(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Refusing to save"));
}

#[test]
fn apply_refuses_incomplete_proposal() {
    cli()
        .args(["apply", "-c", fixture("calendar.json").as_str()])
        .write_stdin(r#"{"startTime":"09:00","endTime":"10:00","mode":"recurring","recurringDays":[]}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to save"));
}

#[test]
fn apply_writes_output_file() {
    let output_path = std::env::temp_dir().join("beats-availability-apply-ok.json");
    let _ = std::fs::remove_file(&output_path);

    cli()
        .args([
            "apply",
            "-c",
            fixture("calendar.json").as_str(),
            "-i",
            fixture("clean_range.json").as_str(),
        ])
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success();

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let calendar: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert!(calendar.get("2025-06-01").is_some());
}

#[test]
fn apply_conflict_writes_no_output_file() {
    let output_path = std::env::temp_dir().join("beats-availability-apply-conflict.json");
    let _ = std::fs::remove_file(&output_path);

    cli()
        .args([
            "apply",
            "-c",
            fixture("calendar.json").as_str(),
            "-i",
            fixture("recurring.json").as_str(),
        ])
        .arg("-o")
        .arg(&output_path)
        .assert()
        .failure();

    assert!(!output_path.exists());
}

// ─────────────────────────────────────────────────────────────────────────────
// show
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn show_lists_dates_then_weekdays() {
    cli()
        .args(["show", "-c", fixture("calendar.json").as_str()])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "2025-06-28: 15:00-17:00\nmonday: 20:00-23:00\n",
        ));
}

#[test]
fn show_merges_aliased_keys() {
    cli()
        .args(["show", "-c", fixture("calendar_aliased.json").as_str()])
        .assert()
        .success()
        .stdout(predicate::str::diff("monday: 14:00-16:00, 20:00-22:00\n"));
}

#[test]
fn show_rejects_inverted_stored_window() {
    cli()
        .args(["show", "-c", fixture("calendar_inverted.json").as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse calendar JSON"));
}

// ─────────────────────────────────────────────────────────────────────────────
// overlaps
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn overlaps_strict_overlap() {
    cli()
        .args(["overlaps", "09:00", "10:00", "09:30", "10:30"])
        .assert()
        .success()
        .stdout(predicate::str::diff("true\n"));
}

#[test]
fn overlaps_touching_boundary() {
    cli()
        .args(["overlaps", "09:00", "10:00", "10:00", "11:00"])
        .assert()
        .success()
        .stdout(predicate::str::diff("false\n"));
}

#[test]
fn overlaps_rejects_bad_time() {
    cli()
        .args(["overlaps", "9am", "10:00", "10:00", "11:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid time: 9am"));
}
