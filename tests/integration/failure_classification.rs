//! Failures must surface as classified errors, never as `Missing` or a
//! partial regular-file state.

#[cfg(unix)]
use super::test_utils::write_file;
#[cfg(unix)]
use filestate::{ErrorKind, StateError};
use filestate::{FileStateProvider, HashedFileStateProvider};
#[cfg(unix)]
use std::fs;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
#[cfg(unix)]
use tempfile::TempDir;

/// True when permission bits are not enforced for this process (e.g. root)
#[cfg(unix)]
fn permissions_ignored(path: &std::path::Path) -> bool {
    fs::File::open(path).is_ok()
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_permission_denied() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(temp_dir.path(), "secret.txt", b"classified");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();

    if permissions_ignored(&path) {
        return;
    }

    let err = HashedFileStateProvider::new().get_state(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    assert!(err.to_string().contains("secret.txt"));

    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
}

#[cfg(unix)]
#[test]
fn test_untraversable_parent_is_not_missing() {
    let temp_dir = TempDir::new().unwrap();
    let locked = temp_dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    let inner = write_file(&locked, "inner.txt", b"behind a wall");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    if permissions_ignored(&inner) {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = HashedFileStateProvider::new().get_state(&inner);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    match result {
        Err(StateError::PermissionDenied { path, .. }) => assert_eq!(path, inner),
        other => panic!("expected PermissionDenied, got {:?}", other),
    }
}

/// Reading /proc/self/mem at offset 0 fails with EIO part-way through a
/// stat-says-regular-file read.
#[cfg(target_os = "linux")]
#[test]
fn test_read_failure_mid_stream_is_io_error() {
    let path = std::path::Path::new("/proc/self/mem");
    let result = HashedFileStateProvider::new().get_state(path);
    match result {
        Err(e) => assert_eq!(e.kind(), ErrorKind::Io, "{}", e),
        Ok(state) => panic!("expected an I/O failure, got {}", state),
    }
}

#[cfg(unix)]
#[test]
fn test_fifo_is_unsupported_type() {
    let temp_dir = TempDir::new().unwrap();
    let fifo = temp_dir.path().join("pipe");
    let status = std::process::Command::new("mkfifo").arg(&fifo).status();
    if !matches!(status, Ok(s) if s.success()) {
        return;
    }

    let err = HashedFileStateProvider::new().get_state(&fifo).unwrap_err();
    assert!(matches!(
        err,
        StateError::UnsupportedType {
            kind: filestate::SpecialKind::Fifo,
            ..
        }
    ));
}

#[test]
fn test_relative_missing_path() {
    let state = HashedFileStateProvider::new()
        .get_state(std::path::Path::new("definitely/not/a/real/path.txt"))
        .unwrap();
    assert!(state.is_missing());
}
