//! File state providers
//!
//! [`FileStateProvider`] is the query capability handed to build engines.
//! [`HashedFileStateProvider`] answers it by stat-ing the path and, for regular
//! files, streaming the content through a [`DigestEngine`].
//!
//! Inspection is a single best-effort pass. The file may change between the
//! stat and the read; callers that need stronger guarantees must re-verify or
//! lock externally. No call retries on failure.

use crate::error::{classify_io_error, is_not_found, SpecialKind, StateError};
use crate::hasher::{DigestConfig, DigestEngine};
use crate::state::FileState;
use crate::types::Timestamp;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, FileType, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use tracing::{debug, warn};

/// Capability to observe the state of one path
pub trait FileStateProvider: Send + Sync {
    fn get_state(&self, path: &Path) -> Result<FileState, StateError>;
}

impl<T: FileStateProvider + ?Sized> FileStateProvider for &T {
    fn get_state(&self, path: &Path) -> Result<FileState, StateError> {
        (**self).get_state(path)
    }
}

impl<T: FileStateProvider + ?Sized> FileStateProvider for Box<T> {
    fn get_state(&self, path: &Path) -> Result<FileState, StateError> {
        (**self).get_state(path)
    }
}

impl<T: FileStateProvider + ?Sized> FileStateProvider for Arc<T> {
    fn get_state(&self, path: &Path) -> Result<FileState, StateError> {
        (**self).get_state(path)
    }
}

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderConfig {
    #[serde(default)]
    pub digest: DigestConfig,

    /// Resolve symlinks to their targets (default: true). When false, a
    /// symlink is reported as an unsupported type.
    #[serde(default = "default_true")]
    pub follow_symlinks: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            digest: DigestConfig::default(),
            follow_symlinks: default_true(),
        }
    }
}

/// Stat-then-digest provider. Holds only immutable configuration.
#[derive(Debug, Clone)]
pub struct HashedFileStateProvider {
    engine: DigestEngine,
    follow_symlinks: bool,
}

impl Default for HashedFileStateProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl HashedFileStateProvider {
    pub fn new() -> Self {
        Self::with_config(ProviderConfig::default())
    }

    pub fn with_config(config: ProviderConfig) -> Self {
        Self {
            engine: DigestEngine::new(config.digest),
            follow_symlinks: config.follow_symlinks,
        }
    }

    pub fn engine(&self) -> &DigestEngine {
        &self.engine
    }

    /// Stat `path`. `Ok(None)` means nothing exists there.
    fn inspect(&self, path: &Path) -> Result<Option<Metadata>, StateError> {
        let result = if self.follow_symlinks {
            fs::metadata(path)
        } else {
            fs::symlink_metadata(path)
        };

        match result {
            Ok(metadata) => Ok(Some(metadata)),
            Err(e) if is_not_found(&e) => {
                // A dangling link exists as an entry even though its target does not.
                if self.follow_symlinks {
                    if let Ok(link) = fs::symlink_metadata(path) {
                        if link.file_type().is_symlink() {
                            return Err(StateError::unsupported(path, SpecialKind::BrokenSymlink));
                        }
                    }
                }
                Ok(None)
            }
            Err(e) => Err(classify_io_error(path, e)),
        }
    }

    fn hash_regular_file(&self, path: &Path) -> Result<FileState, StateError> {
        let file = File::open(path).map_err(|e| classify_io_error(path, e))?;

        // Read the timestamp from the open handle so it describes the same
        // inode the digest is computed over.
        let metadata = file.metadata().map_err(|e| classify_io_error(path, e))?;
        ensure_still_regular(path, &metadata)?;
        let modified = metadata.modified().map_err(|e| classify_io_error(path, e))?;

        let digest = self
            .engine
            .digest_reader(&file)
            .map_err(|e| classify_io_error(path, e))?;

        Ok(FileState::RegularFile {
            timestamp: Timestamp::from_system_time(modified),
            digest,
        })
    }
}

impl FileStateProvider for HashedFileStateProvider {
    fn get_state(&self, path: &Path) -> Result<FileState, StateError> {
        let result = match self.inspect(path) {
            Ok(None) => Ok(FileState::Missing),
            Ok(Some(metadata)) if metadata.is_dir() => Ok(FileState::Directory),
            Ok(Some(metadata)) if metadata.is_file() => self.hash_regular_file(path),
            Ok(Some(metadata)) => Err(StateError::unsupported(
                path,
                special_kind(&metadata.file_type()),
            )),
            Err(e) => Err(e),
        };

        match &result {
            Ok(state) => debug!(path = %path.display(), state = %state.kind(), "File state observed"),
            Err(e) => warn!(path = %path.display(), kind = ?e.kind(), error = %e, "File state unavailable"),
        }
        result
    }
}

/// Check that the opened handle is still a regular file.
///
/// A path replaced by a directory after the stat is an I/O failure rather than
/// `Directory`: the single pass observed two different entries.
fn ensure_still_regular(path: &Path, metadata: &Metadata) -> Result<(), StateError> {
    if metadata.is_file() {
        return Ok(());
    }
    if metadata.is_dir() {
        return Err(StateError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::Other,
                "replaced by a directory during inspection",
            ),
        });
    }
    Err(StateError::unsupported(path, special_kind(&metadata.file_type())))
}

/// Name the type of a path that is neither a regular file nor a directory
fn special_kind(file_type: &FileType) -> SpecialKind {
    if file_type.is_symlink() {
        return SpecialKind::Symlink;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::FileTypeExt;
        if file_type.is_fifo() {
            return SpecialKind::Fifo;
        }
        if file_type.is_socket() {
            return SpecialKind::Socket;
        }
        if file_type.is_block_device() {
            return SpecialKind::BlockDevice;
        }
        if file_type.is_char_device() {
            return SpecialKind::CharDevice;
        }
    }

    SpecialKind::Unknown
}

/// Query independent paths concurrently on scoped worker threads, at most one
/// per available CPU.
///
/// Results are returned in input order; one path failing does not affect the
/// others.
pub fn get_states<P>(
    provider: &P,
    paths: &[PathBuf],
) -> Vec<(PathBuf, Result<FileState, StateError>)>
where
    P: FileStateProvider + ?Sized,
{
    if paths.is_empty() {
        return Vec::new();
    }

    let workers = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(paths.len());
    let per_worker = paths.len().div_ceil(workers);

    thread::scope(|scope| {
        let handles: Vec<_> = paths
            .chunks(per_worker)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|path| (path.clone(), provider.get_state(path)))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
            .collect()
    })
}
