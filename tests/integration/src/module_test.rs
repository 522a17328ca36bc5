//! End-to-end tests for the hiera binary module
//!
//! Each test runs the real `hiera` module binary against a stub lookup
//! script that records its argument vector and replays canned output.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use hiera_module::MODULE_ARGS_KEY;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

/// Write a stub lookup executable that records `"$@"` (one argument
/// per line) and prints the given stdout text.
fn write_stub(dir: &Path, stdout: &str, exit_code: i32) -> (PathBuf, PathBuf) {
    let record = dir.join("recorded-args.txt");
    let stub = dir.join("fake-hiera");
    fs::write(
        &stub,
        format!(
            "#!/bin/sh\nprintf '%s\\n' \"$@\" > '{}'\nprintf '{}'\nexit {}\n",
            record.display(),
            stdout,
            exit_code
        ),
    )
    .unwrap();
    fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();
    (stub, record)
}

/// Write the framework-side args file for one module invocation.
fn write_args_file(dir: &Path, params: Value) -> PathBuf {
    let path = dir.join("args.json");
    fs::write(&path, json!({ (MODULE_ARGS_KEY): params }).to_string()).unwrap();
    path
}

fn run_module(args_file: &Path) -> (Value, bool) {
    let output = Command::cargo_bin("hiera")
        .unwrap()
        .arg(args_file)
        .output()
        .unwrap();
    let payload: Value = serde_json::from_slice(&output.stdout).unwrap();
    (payload, output.status.success())
}

#[test]
fn test_full_lookup_publishes_fact() {
    let temp = TempDir::new().unwrap();
    let (stub, record) = write_stub(temp.path(), "a\\nb\\nc\\n", 0);
    let args_file = write_args_file(
        temp.path(),
        json!({
            "key": "proxy::array_multi",
            "fact": "var_array_multi",
            "path": stub,
            "source": "/etc/hiera.yaml",
            "context": {"environment": "production", "fqdn": "puppet01.localdomain"},
        }),
    );

    let (payload, ok) = run_module(&args_file);

    assert!(ok);
    assert_eq!(payload["changed"], json!(false));
    assert_eq!(payload["ansible_facts"], json!({"var_array_multi": "a\nb\nc"}));
    assert_eq!(payload["rc"], json!(0));

    let argv = fs::read_to_string(record).unwrap();
    assert_eq!(
        argv.lines().collect::<Vec<_>>(),
        vec![
            "-c",
            "/etc/hiera.yaml",
            "proxy::array_multi",
            "environment=production",
            "fqdn=puppet01.localdomain",
        ]
    );
}

#[test]
fn test_bare_key_lookup() {
    let temp = TempDir::new().unwrap();
    let (stub, record) = write_stub(temp.path(), "value\\n", 0);
    let args_file = write_args_file(temp.path(), json!({"key": "line", "path": stub}));

    let (payload, ok) = run_module(&args_file);

    assert!(ok);
    assert_eq!(payload["ansible_facts"], json!({"line": "value"}));
    assert_eq!(payload["fact"], json!("line"));

    let argv = fs::read_to_string(record).unwrap();
    assert_eq!(argv.lines().collect::<Vec<_>>(), vec!["line"]);
}

#[test]
fn test_missing_key_fails_without_spawning() {
    let temp = TempDir::new().unwrap();
    let (stub, record) = write_stub(temp.path(), "never\\n", 0);
    let args_file = write_args_file(temp.path(), json!({"path": stub, "fact": "var"}));

    let (payload, ok) = run_module(&args_file);

    assert!(!ok);
    assert_eq!(payload["failed"], json!(true));
    assert!(!payload["msg"].as_str().unwrap().is_empty());
    assert!(payload.get("ansible_facts").is_none());
    // Validation happens before any subprocess; the stub never ran.
    assert!(!record.exists());
}

#[test]
fn test_nonexistent_executable_fails() {
    let temp = TempDir::new().unwrap();
    let args_file = write_args_file(
        temp.path(),
        json!({"key": "line", "path": temp.path().join("no-such-hiera")}),
    );

    let (payload, ok) = run_module(&args_file);

    assert!(!ok);
    assert_eq!(payload["failed"], json!(true));
    let msg = payload["msg"].as_str().unwrap();
    assert!(msg.contains("no-such-hiera"));
    assert!(payload.get("ansible_facts").is_none());
}

#[test]
fn test_nonzero_exit_still_publishes_fact() {
    let temp = TempDir::new().unwrap();
    let (stub, _record) = write_stub(temp.path(), "nil\\n", 1);
    let args_file = write_args_file(temp.path(), json!({"key": "missing::key", "path": stub}));

    let (payload, ok) = run_module(&args_file);

    assert!(ok);
    assert_eq!(payload["ansible_facts"], json!({"missing::key": "nil"}));
    assert_eq!(payload["rc"], json!(1));
}

#[test]
fn test_missing_args_file_argument() {
    let output = Command::cargo_bin("hiera").unwrap().output().unwrap();
    assert!(!output.status.success());

    let payload: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(payload["failed"], json!(true));
}

#[test]
fn test_malformed_args_document() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("args.json");
    fs::write(&path, "not json").unwrap();

    Command::cargo_bin("hiera")
        .unwrap()
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"failed\":true"));
}
