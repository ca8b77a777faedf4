//! Observable behavior of the hashed file state provider

use super::test_utils::{fixed_time, set_mtime, write_file};
use filestate::hasher::{DigestConfig, BLAKE3_EMPTY, MIN_CHUNK_SIZE, SHA256_EMPTY};
use filestate::{
    DigestAlgorithm, FileState, FileStateProvider, HashedFileStateProvider, ProviderConfig,
    StateChange, Timestamp,
};
use std::fs;
use tempfile::TempDir;

fn provider() -> HashedFileStateProvider {
    HashedFileStateProvider::new()
}

#[test]
fn test_nonexistent_path_is_missing() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("never").join("created.txt");
    assert_eq!(provider().get_state(&path).unwrap(), FileState::Missing);
}

#[test]
fn test_missing_regardless_of_history() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(temp_dir.path(), "short_lived.txt", b"here for now");
    assert!(provider().get_state(&path).unwrap().is_file());

    fs::remove_file(&path).unwrap();
    assert_eq!(provider().get_state(&path).unwrap(), FileState::Missing);
}

#[test]
fn test_directory_ignores_children() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("src");
    fs::create_dir(&dir).unwrap();

    let before = provider().get_state(&dir).unwrap();
    write_file(&dir, "new_child.rs", b"fn main() {}");
    fs::create_dir(dir.join("nested")).unwrap();
    let after = provider().get_state(&dir).unwrap();

    assert_eq!(before, FileState::Directory);
    assert_eq!(before, after);
    assert!(after.digest().is_none());
}

#[test]
fn test_unmodified_file_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(temp_dir.path(), "stable.txt", b"stable content");

    let first = provider().get_state(&path).unwrap();
    let second = provider().get_state(&path).unwrap();
    assert_eq!(first, second);
    assert!(FileState::compare(&first, &second).is_up_to_date());
}

#[test]
fn test_content_change_with_fixed_timestamp() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(temp_dir.path(), "edited.txt", b"version one");
    set_mtime(&path, 1_600_000_000);
    let before = provider().get_state(&path).unwrap();

    fs::write(&path, b"version two").unwrap();
    set_mtime(&path, 1_600_000_000);
    let after = provider().get_state(&path).unwrap();

    assert_eq!(before.timestamp(), after.timestamp());
    assert_ne!(before.digest(), after.digest());
    assert_ne!(before, after);
    assert_eq!(
        FileState::compare(&before, &after),
        StateChange::Modified {
            content_changed: true,
            timestamp_changed: false
        }
    );
}

#[test]
fn test_touch_changes_state_but_not_digest() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(temp_dir.path(), "touched.txt", b"same bytes");
    set_mtime(&path, 1_600_000_000);
    let before = provider().get_state(&path).unwrap();

    set_mtime(&path, 1_600_000_100);
    let after = provider().get_state(&path).unwrap();

    assert_eq!(before.digest(), after.digest());
    assert_ne!(before.timestamp(), after.timestamp());
    assert_ne!(before, after);
    assert_eq!(
        after.timestamp(),
        Some(Timestamp::from_system_time(fixed_time(1_600_000_100)))
    );
}

#[test]
fn test_identical_content_identical_digest() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_file(temp_dir.path(), "a.bin", b"shared payload");
    let b = write_file(temp_dir.path(), "b.bin", b"shared payload");

    let state_a = provider().get_state(&a).unwrap();
    let state_b = provider().get_state(&b).unwrap();
    assert_eq!(state_a.digest(), state_b.digest());
}

#[test]
fn test_zero_length_file_golden_digest() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(temp_dir.path(), "empty", b"");

    let state = provider().get_state(&path).unwrap();
    assert_eq!(state.digest().unwrap().to_hex(), BLAKE3_EMPTY);

    let sha = HashedFileStateProvider::with_config(ProviderConfig {
        digest: DigestConfig {
            algorithm: DigestAlgorithm::Sha256,
            ..DigestConfig::default()
        },
        ..ProviderConfig::default()
    });
    assert_eq!(
        sha.get_state(&path).unwrap().digest().unwrap().to_hex(),
        SHA256_EMPTY
    );
}

#[test]
fn test_large_file_streams_with_small_chunks() {
    let temp_dir = TempDir::new().unwrap();
    let content: Vec<u8> = (0..5_000_000u32)
        .map(|i| (i.wrapping_mul(31) % 256) as u8)
        .collect();
    let path = write_file(temp_dir.path(), "large.bin", &content);

    let small_chunks = HashedFileStateProvider::with_config(ProviderConfig {
        digest: DigestConfig {
            algorithm: DigestAlgorithm::Blake3,
            chunk_size: MIN_CHUNK_SIZE,
        },
        ..ProviderConfig::default()
    });
    let state = small_chunks.get_state(&path).unwrap();
    assert_eq!(
        state.digest().unwrap().as_bytes(),
        blake3::hash(&content).as_bytes()
    );
    assert_eq!(state, provider().get_state(&path).unwrap());
}
