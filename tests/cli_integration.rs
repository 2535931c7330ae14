//! Command-line interface tests
//!
//! Every subcommand prints step output as JSON on stdout; diagnostics and
//! diffs go to stderr.

use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn patchflow(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_patchflow"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run patchflow")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}

fn setup_workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("app.py"),
        "def greet(name):\n    return f\"hi {name}\"\n\n\ndef part(name):\n    return name\n",
    )
    .unwrap();
    fs::write(dir.path().join("notes.txt"), "line 1\nline 2\nline 3\n").unwrap();
    dir
}

#[test]
fn test_cli_help() {
    let output = patchflow(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["extract", "comment-contexts", "modify", "modify-once", "read-file"] {
        assert!(stdout.contains(command), "help is missing {command}");
    }
}

#[test]
fn test_cli_extract_functions() {
    let dir = setup_workspace();
    let output = patchflow(&["extract", "--base-path", path_arg(dir.path()), "-g", "FUNCTION"]);
    let json = stdout_json(&output);

    let records = json["files_to_patch"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[0]["uri"].as_str().unwrap().ends_with("app.py"));
    assert_eq!(records[0]["startLine"], 0);
    assert_eq!(records[0]["endLine"], 2);
    assert_eq!(records[1]["startLine"], 4);
    assert_eq!(records[1]["affectedCode"], "def part(name):\n    return name\n");
}

#[test]
fn test_cli_extract_full_file() {
    let dir = setup_workspace();
    let output = patchflow(&["extract", "--base-path", path_arg(dir.path()), "-g", "full_file"]);
    let json = stdout_json(&output);
    assert_eq!(json["files_to_patch"].as_array().unwrap().len(), 2);
}

#[test]
fn test_cli_comment_contexts() {
    let dir = setup_workspace();
    let output = patchflow(&["comment-contexts", "--base-path", path_arg(dir.path())]);
    let json = stdout_json(&output);

    let records = json["files_to_patch"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["startLine"], 1);
    assert_eq!(records[0]["endLine"], 1);
    assert!(records[0]["commentFormat"].as_str().unwrap().contains("\"\"\""));
}

#[test]
fn test_cli_modify_from_inputs_file() {
    let dir = setup_workspace();
    let target = dir.path().join("notes.txt");
    let inputs = dir.path().join("inputs.json");
    fs::write(
        &inputs,
        json!({
            "files_to_patch": [{"uri": target, "startLine": 1, "endLine": 2}],
            "extracted_responses": [{"patch": "new line", "reason": "typo"}]
        })
        .to_string(),
    )
    .unwrap();

    let output = patchflow(&["modify", "--inputs", path_arg(&inputs), "--diff"]);
    let json = stdout_json(&output);

    let modified = json["modified_code_files"].as_array().unwrap();
    assert_eq!(modified.len(), 1);
    assert_eq!(modified[0]["reason"], "typo");
    assert_eq!(fs::read_to_string(&target).unwrap(), "line 1\nnew line\nline 3\n");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("@@ -1,3 +1,3 @@"));
    assert!(stderr.contains("-line 2"));
    assert!(stderr.contains("+new line"));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("+new line"));
}

#[test]
fn test_cli_modify_nothing_to_do() {
    let dir = setup_workspace();
    let inputs = dir.path().join("inputs.json");
    fs::write(&inputs, r#"{"files_to_patch": [], "extracted_responses": []}"#).unwrap();

    let output = patchflow(&["modify", "--inputs", path_arg(&inputs)]);
    let json = stdout_json(&output);
    assert_eq!(json["modified_code_files"], json!([]));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Skipped"));
}

#[test]
fn test_cli_modify_once() {
    let dir = setup_workspace();
    let target = dir.path().join("notes.txt");
    let output = patchflow(&[
        "modify-once",
        "--file-path",
        path_arg(&target),
        "--start-line",
        "0",
        "--end-line",
        "1",
        "--new-code",
        "first",
    ]);
    let json = stdout_json(&output);

    assert_eq!(json["start_line"], 0);
    assert_eq!(json["patch"], "first");
    assert_eq!(fs::read_to_string(&target).unwrap(), "first\nline 2\nline 3\n");
}

#[test]
fn test_cli_modify_once_without_code_is_skipped() {
    let dir = setup_workspace();
    let target = dir.path().join("notes.txt");
    let output = patchflow(&["modify-once", "--file-path", path_arg(&target)]);
    let json = stdout_json(&output);

    assert_eq!(json, json!({}));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No patch provided"));
    assert_eq!(fs::read_to_string(&target).unwrap(), "line 1\nline 2\nline 3\n");
}

#[test]
fn test_cli_read_file() {
    let dir = setup_workspace();
    let target = dir.path().join("notes.txt");
    let output = patchflow(&["read-file", "-f", path_arg(&target)]);
    let json = stdout_json(&output);
    assert_eq!(json["file_content"], "line 1\nline 2\nline 3\n");
}

#[test]
fn test_cli_missing_inputs_fail() {
    let output = patchflow(&["modify"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing required data"));
    assert!(stderr.contains("files_to_patch"));
}

#[test]
fn test_cli_rejects_inverted_range() {
    let dir = setup_workspace();
    let target = dir.path().join("notes.txt");
    let output = patchflow(&[
        "modify-once",
        "--file-path",
        path_arg(&target),
        "--start-line",
        "2",
        "--end-line",
        "1",
        "--new-code",
        "x",
    ]);
    assert!(!output.status.success());
    assert_eq!(fs::read_to_string(&target).unwrap(), "line 1\nline 2\nline 3\n");
}
