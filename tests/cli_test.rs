use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_version_prints_package_version() {
    Command::cargo_bin("setup-workstation")
        .unwrap()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("setup-workstation")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("now"));
}

#[test]
fn test_generate_writes_config() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("ws").join("workstation.yaml");

    Command::cargo_bin("setup-workstation")
        .unwrap()
        .env("HOME", temp.path())
        .arg("generate")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote default configuration"));

    let contents = fs::read_to_string(&config).unwrap();
    assert!(contents.contains("hashicorp/tap/terraform"));
    assert!(contents.contains("azure-functions-core-tools@4"));
}

#[test]
fn test_generate_refuses_to_overwrite() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("workstation.yaml");
    fs::write(&config, "on_failure: abort\n").unwrap();

    Command::cargo_bin("setup-workstation")
        .unwrap()
        .arg("generate")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    assert_eq!(fs::read_to_string(&config).unwrap(), "on_failure: abort\n");
}

#[test]
fn test_malformed_config_fails_before_provisioning() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("workstation.yaml");
    fs::write(&config, "on_failure: [oops").unwrap();

    Command::cargo_bin("setup-workstation")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"))
        .stderr(predicate::str::contains("Provisioning workstation").not());
}
