//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn docs_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/docs")
}

/// Run from an empty directory so no workspace config is picked up
fn ahk_docs(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ahk-docs").unwrap();
    cmd.current_dir(dir.path())
        .env("RUST_LOG", "off")
        .args(["--docs-root", docs_dir().to_str().unwrap()]);
    cmd
}

#[test]
fn test_url_command() {
    let dir = TempDir::new().unwrap();
    ahk_docs(&dir)
        .args(["--browse-root", "https://www.autohotkey.com/docs", "url", "WinSet"])
        .assert()
        .success()
        .stdout("https://www.autohotkey.com/docs/commands/WinSet.htm\n");
}

#[test]
fn test_url_variable_json() {
    let dir = TempDir::new().unwrap();
    ahk_docs(&dir)
        .args([
            "--browse-root",
            "https://www.autohotkey.com/docs",
            "--format",
            "json",
            "url",
            "A_LineNumber",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\"https://www.autohotkey.com/docs/Variables.htm#LineNumber\"",
        ));
}

#[test]
fn test_url_unknown_symbol() {
    let dir = TempDir::new().unwrap();
    ahk_docs(&dir)
        .args(["url", "1+1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No documentation for"));
}

#[test]
fn test_doc_command() {
    let dir = TempDir::new().unwrap();
    ahk_docs(&dir)
        .args(["doc", "WinSet"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<title>WinSet - Syntax &amp; Usage | AutoHotkey</title>",
        ));
}

#[test]
fn test_doc_json() {
    let dir = TempDir::new().unwrap();
    ahk_docs(&dir)
        .args(["--format", "json", "doc", "A_LineNumber"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"description_html\""))
        .stdout(predicate::str::contains("currently executing line"));
}

#[test]
fn test_doc_missing_page() {
    let dir = TempDir::new().unwrap();
    ahk_docs(&dir)
        .args(["doc", "WinMove"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_link_command() {
    let dir = TempDir::new().unwrap();
    ahk_docs(&dir)
        .args(["link", "WinTitle", "--context", "WinSet"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<title>WinTitle &amp; Last Found Window | AutoHotkey</title>",
        ));
}

#[test]
fn test_link_anchor_rejected() {
    let dir = TempDir::new().unwrap();
    ahk_docs(&dir)
        .args(["link", "#Remarks", "--context", "WinSet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a documentation page link"));
}

#[test]
fn test_check_link() {
    let dir = TempDir::new().unwrap();
    ahk_docs(&dir)
        .args(["check-link", "WinTitle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("internal: true"))
        .stdout(predicate::str::contains("fetchable: true"));

    ahk_docs(&dir)
        .args(["check-link", "https://www.autohotkey.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("internal: false"))
        .stdout(predicate::str::contains("fetchable: false"));
}

#[test]
fn test_hover_from_file() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("script.ahk");
    fs::write(&script, "#NoEnv\nWinSet, AlwaysOnTop, On, A\n").unwrap();

    ahk_docs(&dir)
        .args(["hover", script.to_str().unwrap(), "2", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Makes a variety of changes"));
}

#[test]
fn test_hover_from_stdin() {
    let dir = TempDir::new().unwrap();
    ahk_docs(&dir)
        .args(["hover", "-", "1", "10"])
        .write_stdin("MsgBox % A_LineNumber")
        .assert()
        .success()
        .stdout(predicate::str::contains("currently executing line"));
}

#[test]
fn test_hover_on_whitespace() {
    let dir = TempDir::new().unwrap();
    ahk_docs(&dir)
        .args(["hover", "-", "1", "8"])
        .write_stdin("MsgBox   hi")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_literal_command() {
    let dir = TempDir::new().unwrap();
    ahk_docs(&dir)
        .args(["--format", "json", "literal", "\"\""])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"slot\": \"value\""))
        .stdout(predicate::str::contains("\"start\": 1"));
}

#[test]
fn test_literal_not_a_literal() {
    let dir = TempDir::new().unwrap();
    ahk_docs(&dir)
        .args(["literal", "WinSet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a literal"));
}

#[test]
fn test_config_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.yaml");
    fs::write(&config, "browse_root: https://example.test/ahk\n").unwrap();

    ahk_docs(&dir)
        .args(["--config", config.to_str().unwrap(), "url", "WinSet"])
        .assert()
        .success()
        .stdout("https://example.test/ahk/commands/WinSet.htm\n");
}

#[test]
fn test_workspace_config_is_picked_up() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("ahk-docs.yaml"),
        "browse_root: https://mirror.test/docs/\n",
    )
    .unwrap();

    ahk_docs(&dir)
        .args(["url", "A_Index"])
        .assert()
        .success()
        .stdout("https://mirror.test/docs/Variables.htm#Index\n");
}

#[test]
fn test_invalid_config_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bad.yaml");
    fs::write(&config, "fetch: [1, 2]").unwrap();

    ahk_docs(&dir)
        .args(["--config", config.to_str().unwrap(), "url", "WinSet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
