//! CLI-surface tests for both binaries: `--help`/usage text, required
//! arguments, and the exit code conventions from the CLI surface spec
//! (`0` on success, `1` on a startup/argument error).

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn binary(name: &str) -> Command {
    #[allow(deprecated)]
    Command::cargo_bin(name).unwrap_or_else(|e| panic!("failed to locate {name}: {e}"))
}

#[test]
fn client_help_lists_usage_and_succeeds() {
    binary("mftp")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("mftp"));
}

#[test]
fn client_without_a_hostname_fails_with_usage_on_stderr() {
    binary("mftp")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn client_rejects_an_unknown_flag() {
    binary("mftp").args(["--bogus", "example.com"]).assert().failure();
}

#[test]
fn client_reports_a_connection_failure_as_exit_code_one() {
    // Nothing listens on the fixed control port in the test sandbox, so the
    // connection attempt fails immediately instead of hanging; no stdin is
    // needed since the failure happens before the interactive loop starts.
    binary("mftp")
        .arg("127.0.0.1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("could not connect"));
}

#[test]
fn daemon_help_lists_usage_and_succeeds() {
    binary("mftpd")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("mftpd"));
}

#[test]
fn daemon_rejects_positional_arguments() {
    binary("mftpd")
        .arg("extra-argument")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn daemon_rejects_an_unknown_flag() {
    binary("mftpd").arg("--bogus").assert().failure();
}
