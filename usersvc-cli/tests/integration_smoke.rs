//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("usersvc").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("usersvc").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--database-url"))
        .stdout(predicate::str::contains("--allow-origin"))
        .stdout(predicate::str::contains("--in-memory"));
}

#[test]
fn test_migrate_help() {
    let mut cmd = Command::cargo_bin("usersvc").unwrap();
    cmd.arg("migrate").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Database URL"));
}

#[test]
fn test_migrate_without_database_fails() {
    let mut cmd = Command::cargo_bin("usersvc").unwrap();
    cmd.current_dir(std::env::temp_dir())
        .env_remove("DATABASE_URL")
        .env_remove("DB_USER")
        .env_remove("DB_NAME")
        .arg("migrate");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Database not configured"));
}

#[test]
fn test_invalid_bind_address() {
    let mut cmd = Command::cargo_bin("usersvc").unwrap();
    cmd.args(["serve", "--in-memory", "--bind", "not-an-address"]);

    cmd.assert().failure();
}
