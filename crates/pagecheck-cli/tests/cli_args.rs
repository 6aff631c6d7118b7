use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("pagecheck")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("audit"))
        .stdout(predicate::str::contains("verify"))
        .stdout(predicate::str::contains("shots"));
}

#[test]
fn test_audit_help_lists_run_flags() {
    Command::cargo_bin("pagecheck")
        .unwrap()
        .args(["audit", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--url"))
        .stdout(predicate::str::contains("--desktop"))
        .stdout(predicate::str::contains("--settle-ms"))
        .stdout(predicate::str::contains("--chrome-path"));
}

#[test]
fn test_missing_subcommand_fails() {
    Command::cargo_bin("pagecheck")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_invalid_viewport_is_rejected() {
    // Bad viewport is caught during config building, before any browser
    // launch is attempted
    Command::cargo_bin("pagecheck")
        .unwrap()
        .args(["audit", "--desktop", "verywide"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("WIDTHxHEIGHT"));
}

#[test]
fn test_invalid_url_is_rejected() {
    Command::cargo_bin("pagecheck")
        .unwrap()
        .args(["verify", "--url", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid base URL"));
}
