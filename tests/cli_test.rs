//! Integration tests for the `ballets` binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

/// A command isolated from the user's home config and cache.
fn ballets(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("ballets"));
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("BALLETS_API_URL")
        .env_remove("BALLETS_CACHE_DIR")
        .env_remove("RUST_LOG")
        .args(["--no-color", "--cache-dir"])
        .arg(home.path().join("cache"));
    cmd
}

/// A server that fails every request, forcing the offline catalog.
fn failing_api() -> MockServer {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET);
        then.status(500);
    });
    server
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("ballets"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("performance schedules"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("ballets"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_requires_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("ballets"));
    cmd.assert().failure();
    Ok(())
}

#[test]
fn cli_rejects_bad_today() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    ballets(&home)
        .args(["--today", "June 2nd", "companies"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));
    Ok(())
}

#[test]
fn company_falls_back_when_api_fails() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let server = failing_api();

    ballets(&home)
        .args(["--today", "2025-06-02", "--api-url"])
        .arg(server.url("/api"))
        .args(["company", "royal_ballet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The Royal Ballet"))
        .stdout(predicate::str::contains("Romeo and Juliet"));
    Ok(())
}

#[test]
fn company_without_id_fails() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let server = failing_api();

    ballets(&home)
        .arg("--api-url")
        .arg(server.url("/api"))
        .arg("company")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Company ID is required"));
    Ok(())
}

#[test]
fn unknown_company_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let server = failing_api();

    ballets(&home)
        .arg("--api-url")
        .arg(server.url("/api"))
        .args(["company", "no_such_company"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not found"));
    Ok(())
}

#[test]
fn company_json_uses_api_data() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/companies/test_co");
        then.status(200)
            .json_body(json!({"id": "test_co", "name": "Test Company"}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/companies/test_co/performances");
        then.status(200).json_body(json!({"data": [
            {"id": "spring", "title": "Spring Gala", "startDate": "2025-05-30", "endDate": "2025-06-05"}
        ]}));
    });

    ballets(&home)
        .args(["--today", "2025-06-02", "--api-url"])
        .arg(server.url("/api"))
        .args(["company", "test_co", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Test Company\""))
        .stdout(predicate::str::contains("\"Spring Gala\""));
    Ok(())
}

#[test]
fn search_json_offline() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let server = failing_api();

    ballets(&home)
        .arg("--api-url")
        .arg(server.url("/api"))
        .args(["search", "giselle", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pob_giselle"));
    Ok(())
}

#[test]
fn cache_stats_on_fresh_dir() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;

    ballets(&home)
        .args(["cache", "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total entries: 0"));
    Ok(())
}

#[test]
fn cache_clear_with_force() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;

    ballets(&home)
        .args(["cache", "clear", "--force"])
        .assert()
        .success();
    Ok(())
}

#[test]
fn invalid_config_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let config = home.path().join("broken.yml");
    std::fs::write(&config, "request_timeout_secs: 0\n")?;

    ballets(&home)
        .arg("--config")
        .arg(&config)
        .args(["cache", "stats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
    Ok(())
}
