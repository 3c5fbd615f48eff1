//! Integration tests for basic CLI behavior.
//!
//! Tests that the binary exists, accepts standard flags, and each subcommand
//! responds to `--help` with appropriate text. Nothing here talks to a real
//! instrument.

#![allow(deprecated)] // cargo_bin deprecation — replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: get a Command for the `scopegrab` binary.
fn scopegrab() -> Command {
    Command::cargo_bin("scopegrab").expect("binary 'scopegrab' should be built")
}

// ─── Top-level flags ─────────────────────────────────────────────────────────

#[test]
fn help_flag_shows_usage() {
    scopegrab()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: scopegrab"))
        .stdout(predicate::str::contains("screen"))
        .stdout(predicate::str::contains("waveform"))
        .stdout(predicate::str::contains("identify"));
}

#[test]
fn version_flag_shows_semver() {
    scopegrab()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^scopegrab \d+\.\d+\.\d+\n$").unwrap());
}

#[test]
fn no_args_shows_error_and_usage() {
    scopegrab()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: scopegrab"));
}

#[test]
fn invalid_subcommand_fails() {
    scopegrab()
        .arg("this-is-not-a-real-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

// ─── Subcommand help ─────────────────────────────────────────────────────────

#[test]
fn screen_help_lists_annotation_options() {
    scopegrab()
        .args(["screen", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--note"))
        .stdout(predicate::str::contains("--label1"))
        .stdout(predicate::str::contains("--label4"))
        .stdout(predicate::str::contains("--raw"))
        .stdout(predicate::str::contains("--any-model"));
}

#[test]
fn screen_help_lists_formats() {
    scopegrab()
        .args(["screen", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("png"))
        .stdout(predicate::str::contains("bmp"))
        .stdout(predicate::str::contains("jpeg"));
}

#[test]
fn waveform_help_shows_usage() {
    scopegrab()
        .args(["waveform", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: scopegrab waveform"));
}

#[test]
fn identify_help_shows_usage() {
    scopegrab()
        .args(["identify", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: scopegrab identify"));
}

#[test]
fn screen_rejects_unknown_format() {
    scopegrab()
        .args(["screen", "scope.lan", "-t", "gif"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
