//! Full sessions with the synthetic backend, driven over stdin

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn camrec(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("camrec").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("RUST_LOG")
        .args(["--backend", "synthetic"]);
    cmd
}

#[test]
fn status_then_quit() {
    let home = TempDir::new().unwrap();
    camrec(&home)
        .write_stdin("status\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"recorder\": \"idle\""))
        .stdout(predicate::str::contains("\"can_play\": false"));
}

#[test]
fn end_of_input_quits() {
    let home = TempDir::new().unwrap();
    camrec(&home).write_stdin("").assert().success();
}

#[test]
fn help_and_unknown_controls() {
    let home = TempDir::new().unwrap();
    camrec(&home)
        .write_stdin("help\nrewind\nseek\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("seek <seconds>"))
        .stderr(predicate::str::contains("Unknown control \"rewind\""))
        .stderr(predicate::str::contains("seek needs a position"));
}

#[test]
fn snapshot_prints_url() {
    let home = TempDir::new().unwrap();
    camrec(&home)
        .write_stdin("snap\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("snapshot ready: blob:camrec/"));
}

#[test]
fn banner_reports_backend() {
    let home = TempDir::new().unwrap();
    camrec(&home)
        .args(["--width", "640", "--height", "480"])
        .write_stdin("quit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("via synthetic (640x480)"));
}
