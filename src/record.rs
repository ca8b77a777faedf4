//! Serializable form of a [`FileState`] for external snapshot stores.
//!
//! Shape: `{ variant: missing | directory | file, timestamp: i64, digest: hex? }`.
//! The timestamp is nanoseconds since the Unix epoch and is `0` for
//! non-file variants. `digest` is always written (as `null` when absent) so the
//! same struct also round-trips through non-self-describing binary encodings.

use crate::error::RecordError;
use crate::state::{FileState, StateKind};
use crate::types::{Digest, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStateRecord {
    pub variant: StateKind,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub digest: Option<String>,
}

impl From<FileState> for FileStateRecord {
    fn from(state: FileState) -> Self {
        match state {
            FileState::Missing => FileStateRecord {
                variant: StateKind::Missing,
                timestamp: 0,
                digest: None,
            },
            FileState::Directory => FileStateRecord {
                variant: StateKind::Directory,
                timestamp: 0,
                digest: None,
            },
            FileState::RegularFile { timestamp, digest } => FileStateRecord {
                variant: StateKind::File,
                timestamp: timestamp.as_nanos(),
                digest: Some(digest.to_hex()),
            },
        }
    }
}

impl TryFrom<FileStateRecord> for FileState {
    type Error = RecordError;

    fn try_from(record: FileStateRecord) -> Result<Self, Self::Error> {
        match (record.variant, record.digest) {
            (StateKind::Missing, None) => Ok(FileState::Missing),
            (StateKind::Directory, None) => Ok(FileState::Directory),
            (StateKind::File, Some(hex)) => Ok(FileState::RegularFile {
                timestamp: Timestamp::from_nanos(record.timestamp),
                digest: Digest::from_hex(&hex)?,
            }),
            (StateKind::File, None) => Err(RecordError::MissingDigest),
            (kind, Some(_)) => Err(RecordError::UnexpectedDigest(kind.as_str())),
        }
    }
}

impl FileStateRecord {
    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, RecordError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecordError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
