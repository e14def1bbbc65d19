use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("doorman")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("signup"))
        .stdout(predicate::str::contains("logout"))
        .stdout(predicate::str::contains("whoami"))
        .stdout(predicate::str::contains("reset"));
}

#[test]
fn test_config_help_shows_subcommands() {
    cargo_bin_cmd!("doorman")
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("doorman")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}

#[test]
fn test_config_path_honors_doorman_home() {
    let dir = tempfile::TempDir::new().unwrap();
    cargo_bin_cmd!("doorman")
        .args(["config", "path"])
        .env("DOORMAN_HOME", dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_writes_template() {
    let dir = tempfile::TempDir::new().unwrap();
    cargo_bin_cmd!("doorman")
        .args(["config", "init"])
        .env("DOORMAN_HOME", dir.path())
        .assert()
        .success();

    let contents = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(contents.contains("provider_url"));
}
