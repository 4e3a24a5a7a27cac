//! Integration tests driving the binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

/// A command isolated from the user's config and history.
fn nullsh(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("nullsh"));
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("NULLSH_DAEMON")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    nullsh(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("torrent daemon"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    nullsh(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn one_shot_help_lists_commands() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    nullsh(&home)
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("help    displays this text"))
        .stdout(predicate::str::contains("resume  Resume torrents."))
        .stdout(predicate::str::contains("<command> --help"));
    Ok(())
}

#[test]
fn one_shot_unknown_command_fails() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    nullsh(&home)
        .arg("frobnicate")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("unknown command: frobnicate"));
    Ok(())
}

#[test]
fn one_shot_command_help_is_not_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    nullsh(&home)
        .args(["rm", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--remove-data"));
    Ok(())
}

#[test]
fn one_shot_exit_succeeds() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    nullsh(&home).arg("exit").assert().success();
    Ok(())
}

#[test]
fn one_shot_info_talks_to_daemon() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    let session = server.mock(|when, then| {
        when.method(POST)
            .path("/json")
            .body_includes("core.get_session_state");
        then.status(200)
            .json_body(json!([{"jsonrpc": "2.0", "id": 0, "result": ["abc"]}]));
    });
    let status = server.mock(|when, then| {
        when.method(POST)
            .path("/json")
            .body_includes("core.get_torrents_status");
        then.status(200).json_body(json!([{
            "jsonrpc": "2.0",
            "id": 0,
            "result": {"abc": {"name": "debian.iso", "state": "Seeding", "progress": 100.0}}
        }]));
    });

    let home = TempDir::new()?;
    nullsh(&home)
        .args(["--daemon", &server.url("/json"), "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("debian.iso"))
        .stdout(predicate::str::contains("Seeding"));

    session.assert_calls(1);
    status.assert_calls(1);
    Ok(())
}

#[test]
fn unreachable_daemon_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    nullsh(&home)
        .args(["--daemon", "http://127.0.0.1:1/json", "pause", "abc"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("daemon unreachable"));
    Ok(())
}

#[test]
fn invalid_config_exits_with_2() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let path = home.path().join("bad.yml");
    fs::write(&path, "daemon:\n  url: ftp://nowhere\n")?;

    nullsh(&home)
        .arg("--config")
        .arg(&path)
        .arg("help")
        .assert()
        .code(2);
    Ok(())
}

#[test]
fn missing_explicit_config_exits_with_2() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    nullsh(&home)
        .args(["--config", "/definitely/not/here.yml", "help"])
        .assert()
        .code(2);
    Ok(())
}

#[test]
fn interactive_session_reads_until_exit() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    nullsh(&home)
        .write_stdin("help\nbogus\nexit\nhelp info\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("displays this text"))
        .stdout(predicate::str::contains("unknown command: bogus"))
        .stdout(predicate::str::contains("With no ids, every torrent").not());
    Ok(())
}
