//! Filestate: File State Fingerprinting
//!
//! Determines whether a path is missing, a directory, or a regular file with a
//! streamed content digest, so build tools can tell whether an input changed
//! since a prior observation.
//!
//! ```no_run
//! use filestate::{FileStateProvider, HashedFileStateProvider};
//! use std::path::Path;
//!
//! let provider = HashedFileStateProvider::new();
//! let before = provider.get_state(Path::new("build.rs"))?;
//! let after = provider.get_state(Path::new("build.rs"))?;
//! assert!(filestate::FileState::compare(&before, &after).is_up_to_date());
//! # Ok::<(), filestate::StateError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod hasher;
pub mod logging;
pub mod provider;
pub mod record;
pub mod state;
pub mod types;

pub use error::{ErrorKind, SpecialKind, StateError};
pub use hasher::{DigestAlgorithm, DigestEngine};
pub use provider::{get_states, FileStateProvider, HashedFileStateProvider, ProviderConfig};
pub use record::FileStateRecord;
pub use state::{FileState, StateChange, StateKind};
pub use types::{Digest, Timestamp};
