//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;

fn voicepost() -> Command {
    Command::cargo_bin("voicepost").expect("binary exists")
}

#[test]
fn help_shows_about() {
    voicepost()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("transcription service"))
        .stdout(predicate::str::contains("--max-duration"));
}

#[test]
fn version_flag_works() {
    voicepost()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("voicepost"));
}

#[test]
fn invalid_max_duration_is_usage_error() {
    voicepost()
        .args(["-m", "nonsense"])
        .env("HOME", "/nonexistent")
        .env("XDG_CONFIG_HOME", "/nonexistent")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid"));
}

#[test]
fn config_path_prints_toml_location() {
    voicepost()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_subcommand_requires_action() {
    voicepost().arg("config").assert().failure();
}
