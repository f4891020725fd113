//! Integration tests for the sophie CLI binary.
//!
//! These tests verify the CLI behavior by running the actual binary
//! and checking its output streams and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;

/// Returns a Command configured to run the sophie CLI binary.
fn sophie_cmd() -> Command {
    let mut cmd = Command::cargo_bin("sophie").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Generation Tests
// ============================================================================

#[test]
fn cli_compact_seed_zero() {
    sophie_cmd()
        .args(["4", "0", "--preset", "compact"])
        .assert()
        .success()
        .stdout("0.00\n0.11\n0.58\n0.74\n");
}

#[test]
fn cli_reference_seed_12345() {
    let assert = sophie_cmd().args(["20", "12345"]).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 20);
    assert_eq!(lines[0], "0.000000000015468");
    assert_eq!(lines[1], "0.972599673465219");
    assert_eq!(lines[19], "0.429865046177530");
}

#[test]
fn cli_reports_search_on_stderr() {
    sophie_cmd()
        .args(["1", "12345"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Looking for a Sophie-Germain safe prime q >= 64645534306",
        ))
        .stderr(predicate::str::contains(
            "Found a Sophie-Germain safe prime q = 64645534379",
        ));
}

#[test]
fn cli_stdout_has_exact_line_format() {
    sophie_cmd()
        .args(["5", "7"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"\A(0\.[0-9]{15}\n){5}\z").unwrap());
}

#[test]
fn cli_zero_observations() {
    sophie_cmd()
        .args(["0", "3"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn cli_short_preset_flag() {
    sophie_cmd()
        .args(["-p", "compact", "2", "15"])
        .assert()
        .success()
        .stdout("0.00\n0.01\n");
}

#[test]
fn cli_is_deterministic() {
    let first = sophie_cmd().args(["50", "42"]).output().unwrap();
    let second = sophie_cmd().args(["50", "42"]).output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn cli_quiet_log_level_keeps_stdout() {
    sophie_cmd()
        .args(["2", "0", "--preset", "compact", "--log-level", "error"])
        .assert()
        .success()
        .stdout("0.00\n0.11\n")
        .stderr(predicate::str::contains("Found").not());
}

// ============================================================================
// Validation Tests
// ============================================================================

#[test]
fn cli_seed_out_of_range() {
    sophie_cmd()
        .args(["4", "16", "--preset", "compact"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("seed=16"))
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn cli_reference_seed_out_of_range() {
    sophie_cmd()
        .args(["1", "65536"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("(where seed <= 65535)"));
}

#[test]
fn cli_observations_out_of_range() {
    sophie_cmd()
        .args(["256", "0", "--preset", "compact"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("num_observations=256"))
        .stderr(predicate::str::contains("(where num_observations <= 255)"));
}

#[test]
fn cli_value_wider_than_word() {
    sophie_cmd()
        .args(["70000", "0", "--preset", "compact"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("compact"));
}

#[test]
fn cli_no_arguments() {
    sophie_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn cli_missing_seed() {
    sophie_cmd()
        .arg("10")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn cli_too_many_arguments() {
    sophie_cmd().args(["1", "2", "3"]).assert().failure();
}

#[test]
fn cli_malformed_numbers() {
    for args in [["abc", "1"], ["12x", "1"], ["1", "1.5"], ["-1", "1"]] {
        sophie_cmd()
            .args(args)
            .assert()
            .failure()
            .stdout(predicate::str::is_empty());
    }
}

#[test]
fn cli_invalid_preset_shows_error() {
    sophie_cmd()
        .args(["1", "1", "--preset", "huge"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn cli_reference_gap_outlier_fails() {
    // seed 5287 needs an offset of 21013, beyond GAP_MAX = 17904
    sophie_cmd()
        .args(["3", "5287"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("q = 64519188887"))
        .stderr(predicate::str::contains("GAP_MAX is too small"));
}

// ============================================================================
// Survey Subcommand Tests
// ============================================================================

#[test]
fn cli_survey_compact() {
    sophie_cmd()
        .args(["survey", "--preset", "compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeds checked        : 16"))
        .stdout(predicate::str::contains("Widest offset        : 608 (seed 14)"))
        .stdout(predicate::str::contains("Violations           : 0"))
        .stdout(predicate::str::contains("Global Status: Success"));
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn cli_help_displays() {
    sophie_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sophie-Germain"))
        .stdout(predicate::str::contains("--preset"))
        .stdout(predicate::str::contains("survey"));
}

#[test]
fn cli_version_displays() {
    sophie_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sophie"));
}
