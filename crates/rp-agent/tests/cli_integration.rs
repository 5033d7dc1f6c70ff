//! Command-line behavior of the `rich-presence` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn agent() -> Command {
    let mut cmd = Command::cargo_bin("rich-presence").unwrap();
    cmd.env_remove("DISCORD_CLIENT_ID").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_options() {
    agent()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("rich presence"))
        .stdout(predicate::str::contains("--client-id"))
        .stdout(predicate::str::contains("--interval"))
        .stdout(predicate::str::contains("--connect-attempts"));
}

#[test]
fn test_version() {
    agent()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_rejecting_implausible_client_id_aborts() {
    let dir = TempDir::new().unwrap();

    agent()
        .args(["--client-id", "not-an-id", "--config"])
        .arg(dir.path().join("missing.toml"))
        .write_stdin("n\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Continue anyway? (y/N)"))
        .stderr(predicate::str::contains("Aborted"));
}

#[test]
fn test_empty_prompt_answer_fails() {
    let dir = TempDir::new().unwrap();

    agent()
        .arg("--config")
        .arg(dir.path().join("missing.toml"))
        .write_stdin("\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Client ID cannot be empty"));
}

#[cfg(unix)]
#[test]
fn test_no_running_app_reports_connect_failure() {
    let runtime = TempDir::new().unwrap();
    let config = TempDir::new().unwrap();

    agent()
        .env("XDG_RUNTIME_DIR", runtime.path())
        .args(["--client-id", "123456789012345678", "--config"])
        .arg(config.path().join("missing.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Troubleshooting"))
        .stderr(predicate::str::contains("Failed to connect"));
}

#[cfg(unix)]
#[test]
fn test_client_id_from_config_file() {
    let runtime = TempDir::new().unwrap();
    let config = TempDir::new().unwrap();
    let path = config.path().join("config.toml");
    std::fs::write(&path, "client_id = \"123456789012345678\"\nconnect_timeout = 1\n").unwrap();

    // No prompt: stdin is empty, so reaching the connect step proves the file was used
    agent()
        .env("XDG_RUNTIME_DIR", runtime.path())
        .arg("--config")
        .arg(&path)
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to connect"));
}

#[test]
fn test_unusable_backoff_config_is_rejected() {
    let config = TempDir::new().unwrap();
    let path = config.path().join("config.toml");
    std::fs::write(&path, "connect_attempts = 3\n[backoff]\njitter = nan\n").unwrap();

    agent()
        .args(["--client-id", "123456789012345678", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"))
        .stderr(predicate::str::contains("backoff.jitter"));
}
