//! File state values and snapshot comparison
//!
//! A [`FileState`] is an immutable observation of one path. Two regular-file
//! states are equal only when both the modification timestamp and the content
//! digest match: a touched but unedited file is a different state.

use crate::types::{Digest, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Observed state of a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileState {
    /// Nothing exists at the path
    Missing,
    /// The path is a directory; its children are not part of the state
    Directory,
    /// The path is a regular file
    RegularFile { timestamp: Timestamp, digest: Digest },
}

/// Variant tag of a [`FileState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateKind {
    Missing,
    Directory,
    File,
}

impl StateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateKind::Missing => "missing",
            StateKind::Directory => "directory",
            StateKind::File => "file",
        }
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FileState {
    pub fn regular_file(timestamp: Timestamp, digest: Digest) -> Self {
        FileState::RegularFile { timestamp, digest }
    }

    pub fn kind(&self) -> StateKind {
        match self {
            FileState::Missing => StateKind::Missing,
            FileState::Directory => StateKind::Directory,
            FileState::RegularFile { .. } => StateKind::File,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FileState::Missing)
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, FileState::Directory)
    }

    pub fn is_file(&self) -> bool {
        matches!(self, FileState::RegularFile { .. })
    }

    /// Modification timestamp, present only for regular files
    pub fn timestamp(&self) -> Option<Timestamp> {
        match self {
            FileState::RegularFile { timestamp, .. } => Some(*timestamp),
            _ => None,
        }
    }

    /// Content digest, present only for regular files
    pub fn digest(&self) -> Option<Digest> {
        match self {
            FileState::RegularFile { digest, .. } => Some(*digest),
            _ => None,
        }
    }

    /// Classify how `current` differs from `previous`.
    pub fn compare(previous: &FileState, current: &FileState) -> StateChange {
        use FileState::*;

        match (previous, current) {
            (Missing, Missing) | (Directory, Directory) => StateChange::Unchanged,
            (Missing, _) => StateChange::Created,
            (_, Missing) => StateChange::Removed,
            (
                RegularFile {
                    timestamp: t1,
                    digest: d1,
                },
                RegularFile {
                    timestamp: t2,
                    digest: d2,
                },
            ) => {
                if t1 == t2 && d1 == d2 {
                    StateChange::Unchanged
                } else {
                    StateChange::Modified {
                        content_changed: d1 != d2,
                        timestamp_changed: t1 != t2,
                    }
                }
            }
            _ => StateChange::KindChanged {
                from: previous.kind(),
                to: current.kind(),
            },
        }
    }
}

impl fmt::Display for FileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileState::Missing => f.write_str("missing"),
            FileState::Directory => f.write_str("directory"),
            FileState::RegularFile { timestamp, digest } => {
                write!(f, "file (modified {}, digest {})", timestamp, digest)
            }
        }
    }
}

/// Outcome of an up-to-date check between two observations of one path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    Unchanged,
    Created,
    Removed,
    KindChanged { from: StateKind, to: StateKind },
    Modified {
        content_changed: bool,
        timestamp_changed: bool,
    },
}

impl StateChange {
    /// True only when dependent work can be skipped
    pub fn is_up_to_date(&self) -> bool {
        matches!(self, StateChange::Unchanged)
    }
}

impl fmt::Display for StateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateChange::Unchanged => f.write_str("unchanged"),
            StateChange::Created => f.write_str("created"),
            StateChange::Removed => f.write_str("removed"),
            StateChange::KindChanged { from, to } => write!(f, "{} -> {}", from, to),
            StateChange::Modified {
                content_changed: true,
                ..
            } => f.write_str("content modified"),
            StateChange::Modified { .. } => f.write_str("touched"),
        }
    }
}
