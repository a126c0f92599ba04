#![allow(dead_code)]

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create an isolated directory holding copies of the named fixtures.
///
/// The returned `TempDir` doubles as HOME for `cli_with_home()`, so no real
/// `~/.talkmap.yaml` leaks into a test. Returns (TempDir, conversations dir).
pub fn setup_conversations(fixtures: &[&str]) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("conversations");
    std::fs::create_dir_all(&dir).unwrap();

    for fixture in fixtures {
        std::fs::copy(fixture_path(fixture), dir.join(fixture)).unwrap();
    }

    (tmp, dir)
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/conversations")
        .join(name)
}

/// Build a CLI command with HOME overridden to the temp directory.
#[allow(deprecated)]
pub fn cli_with_home(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("talkmap").unwrap();
    cmd.env("HOME", tmp.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Run `talkmap graph --format json` and return the `graph` object.
pub fn graph_json(tmp: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = cli_with_home(tmp)
        .arg("graph")
        .args(args)
        .args(["--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value =
        serde_json::from_slice(&output).expect("stdout should be valid JSON");
    json["graph"].clone()
}
