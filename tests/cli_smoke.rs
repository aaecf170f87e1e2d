#![allow(clippy::unwrap_used)]
//! CLI smoke tests to verify basic command functionality.
//!
//! These tests ensure that the CLI binary starts correctly and
//! responds to basic commands without crashing. None of them reach the
//! network: credentials are cleared and the config dir is a temp dir.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn lingua(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lingua").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("GOOGLE_TRANSLATE_API_KEY")
        .env_remove("OPENAI_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_displays_usage() {
    let home = TempDir::new().unwrap();
    lingua(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("detects, summarizes and translates"))
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("detect"))
        .stdout(predicate::str::contains("summarize"))
        .stdout(predicate::str::contains("--verbose"));
}

#[test]
fn test_version_displays_version() {
    let home = TempDir::new().unwrap();
    lingua(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_languages_list() {
    let home = TempDir::new().unwrap();
    lingua(&home)
        .arg("languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("en"))
        .stdout(predicate::str::contains("Portuguese"))
        .stdout(predicate::str::contains("Turkish"))
        .stdout(predicate::str::contains("fr"));
}

#[test]
fn test_invalid_language_code() {
    let home = TempDir::new().unwrap();
    lingua(&home)
        .args(["translate", "--to", "invalid_lang_xyz"])
        .write_stdin("hello")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid language code"));
}

#[test]
fn test_chat_help() {
    let home = TempDir::new().unwrap();
    lingua(&home)
        .args(["chat", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--to"))
        .stdout(predicate::str::contains("--model"))
        .stdout(predicate::str::contains("--timeout-ms"));
}

#[test]
fn test_detect_without_credentials_names_missing_keys() {
    let home = TempDir::new().unwrap();
    lingua(&home)
        .arg("detect")
        .write_stdin("Bonjour tout le monde")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required credentials"))
        .stderr(predicate::str::contains("GOOGLE_TRANSLATE_API_KEY"))
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
}

#[test]
fn test_detect_rejects_blank_input() {
    let home = TempDir::new().unwrap();
    lingua(&home)
        .arg("detect")
        .write_stdin("   \n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input is empty"));
}

#[test]
fn test_configure_show_masks_keys() {
    let home = TempDir::new().unwrap();
    lingua(&home)
        .args(["configure", "--show"])
        .env("OPENAI_API_KEY", "sk-very-secret")
        .assert()
        .success()
        .stdout(predicate::str::contains("OPENAI_API_KEY"))
        .stdout(predicate::str::contains("(set)"))
        .stdout(predicate::str::contains("(not set)"))
        .stdout(predicate::str::contains("sk-very-secret").not());
}

#[test]
fn test_broken_config_file_is_reported() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("lingua");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "[lingua\nto = ").unwrap();

    lingua(&home)
        .args(["configure", "--show"])
        .assert()
        .failure();
}
