//! End-to-end tests for the `filestate` binary.

use super::test_utils::write_file;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(home: &Path, args: &[&std::ffi::OsStr]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_filestate"))
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env_remove("FILESTATE_LOG")
        .arg("--workspace")
        .arg(home)
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_state_json_then_check() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let input = write_file(root, "input.txt", b"first");

    let output = run(
        root,
        &["state".as_ref(), "--format".as_ref(), "json".as_ref(), input.as_os_str()],
    );
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let key = input.to_string_lossy().to_string();
    assert_eq!(snapshot["states"][&key]["variant"], "file");

    let snapshot_path = root.join("snapshot.json");
    fs::write(&snapshot_path, &output.stdout).unwrap();

    let check = run(root, &["check".as_ref(), snapshot_path.as_os_str()]);
    assert_eq!(check.status.code(), Some(0));

    fs::write(&input, b"second").unwrap();
    let check = run(root, &["check".as_ref(), snapshot_path.as_os_str()]);
    assert_eq!(check.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&check.stdout).contains("out of date"));
}

#[test]
fn test_state_text_for_directory_and_missing() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let missing = root.join("missing.txt");

    let output = run(
        root,
        &["state".as_ref(), root.as_os_str(), missing.as_os_str()],
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("directory"));
    assert!(stdout.contains("missing"));
}

#[test]
fn test_invalid_chunk_size_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    let output = run(
        root,
        &["--chunk-size".as_ref(), "1".as_ref(), "state".as_ref(), root.as_os_str()],
    );
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("chunk_size"));
}

#[test]
fn test_unreadable_snapshot_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let output = run(
        root,
        &["check".as_ref(), root.join("absent.json").as_os_str()],
    );
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("absent.json"));
}

#[test]
fn test_check_of_recorded_errors_exits_out_of_date() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let input = write_file(root, "input.txt", b"readable");

    let snapshot = serde_json::json!({
        "states": {},
        "errors": { (input.to_string_lossy().to_string()): "Permission denied" }
    });
    let snapshot_path = root.join("snapshot.json");
    fs::write(&snapshot_path, snapshot.to_string()).unwrap();

    let check = run(root, &["check".as_ref(), snapshot_path.as_os_str()]);
    assert_eq!(check.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&check.stdout).contains("1 of 1 path(s) out of date"));
}

#[cfg(unix)]
#[test]
fn test_state_json_with_non_utf8_path_exits_with_error() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let path = root.join(OsStr::from_bytes(b"bad\xff.txt"));

    let output = run(
        root,
        &["state".as_ref(), "--format".as_ref(), "json".as_ref(), path.as_os_str()],
    );
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to encode snapshot"));
}
