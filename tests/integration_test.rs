//! Integration tests for the pass checker CLI.
//!
//! These tests run the actual binary against the fixtures in `tests/data`,
//! using the cached station and fare tables so no network access is needed.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

/// Get path to test data file
fn test_data_path(filename: &str) -> String {
    format!("tests/data/{}", filename)
}

/// Command preloaded with the fixture caches
fn checker(input_file: &str) -> Command {
    let mut cmd = Command::cargo_bin("pass-checker").unwrap();
    cmd.arg(test_data_path(input_file))
        .arg("--stations")
        .arg(test_data_path("station_codes.json"))
        .arg("--fares")
        .arg(test_data_path("rail_fares.json"))
        .env_remove("WMATA_API_KEY");
    cmd
}

// March fixture: regular fares 16.25 (6.00 + 2.25 + 6.00 + 2.00),
// adjustments 0.50.

#[test]
fn test_pass_that_saved_money() {
    checker("usage_march.csv")
        .arg("15.00")
        .assert()
        .success()
        .stdout(predicate::str::contains("You have saved $0.75 with your pass!"));
}

#[test]
fn test_pass_that_fell_short() {
    checker("usage_march.csv")
        .arg("20")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "You have not broken even with the pass. You need to spend at least $4.25 more to break even.",
        ));
}

#[test]
fn test_hypothetical_limit_saves() {
    checker("usage_march.csv")
        .args(["10.00", "--limit", "6.00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("You would save $6.25 with that pass!"));
}

#[test]
fn test_hypothetical_limit_falls_short() {
    // Both 6.00 rides exceed a 2.25 limit by 3.75: 10.00 + 7.50 = 17.50.
    checker("usage_march.csv")
        .args(["10.00", "--limit", "2.25"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "You would not break even with that pass. You'd need to spend at least $1.25 more to break even.",
        ));
}

#[test]
fn test_show_rides_lists_each_ride() {
    let assert = checker("usage_march.csv")
        .args(["15.00", "--show-rides"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    let ride_lines: Vec<&str> = stdout
        .lines()
        .filter(|l| l.starts_with("Metrorail") || l.starts_with("Metrobus"))
        .collect();
    assert_eq!(ride_lines.len(), 4);
    assert!(ride_lines[0].starts_with("Metrorail A15 -> A01 (peak)"));
    assert!(ride_lines[1].starts_with("Metrobus Route 70"));
    assert!(ride_lines[3].starts_with("Metrorail A03 -> B01 (off-peak)"));
    assert!(stdout.contains("Regular fares: $16.25  Spent: $15.50"));
}

#[test]
fn test_higher_bus_fare_changes_verdict() {
    checker("usage_march.csv")
        .args(["15.00", "--bus-fare", "3.00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("You have saved $1.50 with your pass!"));
}

#[test]
fn test_missing_column_error() {
    checker("usage_missing_column.csv")
        .arg("64")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Missing required column: Exit Location"));
}

#[test]
fn test_unpriced_station_pair_error() {
    checker("usage_unpriced_pair.csv")
        .arg("64")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No fare found for ride from B03 to A01"));
}

#[test]
fn test_bad_timestamp_error() {
    checker("usage_bad_time.csv")
        .arg("64")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timestamp '2025-03-11 08:45'"));
}

#[test]
fn test_missing_file_error() {
    checker("nonexistent.csv")
        .arg("64")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_missing_cost_argument() {
    let mut cmd = Command::cargo_bin("pass-checker").unwrap();
    cmd.arg(test_data_path("usage_march.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("COST"));
}

#[test]
fn test_missing_cache_without_api_key() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("usage.csv");
    fs::copy(test_data_path("usage_march.csv"), &input).unwrap();

    let mut cmd = Command::cargo_bin("pass-checker").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("WMATA_API_KEY")
        .arg(&input)
        .arg("64")
        .assert()
        .failure()
        .stderr(predicate::str::contains("WMATA_API_KEY is not set"));
}

#[test]
fn test_caches_in_working_directory_are_default() {
    let dir = tempdir().unwrap();
    fs::copy(
        test_data_path("station_codes.json"),
        dir.path().join("station_codes.json"),
    )
    .unwrap();
    fs::copy(
        test_data_path("rail_fares.json"),
        dir.path().join("rail_fares.json"),
    )
    .unwrap();
    let input = dir.path().join("usage.csv");
    fs::copy(test_data_path("usage_march.csv"), &input).unwrap();

    let mut cmd = Command::cargo_bin("pass-checker").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("WMATA_API_KEY")
        .arg(&input)
        .arg("15.00")
        .assert()
        .success()
        .stdout(predicate::str::contains("You have saved $0.75"));
}
