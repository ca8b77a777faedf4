//! CLI route: run context and command dispatch.

use crate::cli::output::CommandOutput;
use crate::cli::parse::{Commands, OutputFormat};
use crate::cli::presentation::{format_changes_text, format_states_json, format_states_text};
use crate::config::FilestateConfig;
use crate::error::CliError;
use crate::provider::{get_states, FileStateProvider, HashedFileStateProvider};
use crate::record::FileStateRecord;
use crate::state::{FileState, StateChange};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::info;

/// JSON document written by `state --format json` and read by `check`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub states: BTreeMap<PathBuf, FileStateRecord>,
    /// Paths whose state could not be determined, with the error message
    #[serde(default)]
    pub errors: BTreeMap<PathBuf, String>,
}

/// Result of re-checking one snapshot entry
#[derive(Debug)]
pub struct CheckEntry {
    pub path: PathBuf,
    /// Recorded state, or the error recorded in place of one
    pub previous: Result<FileState, String>,
    pub outcome: CheckOutcome,
}

/// What re-observing a snapshot path found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Compared(StateChange),
    /// Observable now, but no state was recorded for it
    Unrecorded(FileState),
    Failed(String),
}

impl CheckOutcome {
    pub fn is_up_to_date(&self) -> bool {
        matches!(self, CheckOutcome::Compared(change) if change.is_up_to_date())
    }
}

/// Runtime context for CLI execution
pub struct RunContext {
    provider: HashedFileStateProvider,
    color: bool,
}

impl RunContext {
    pub fn new(config: &FilestateConfig) -> Self {
        Self {
            provider: HashedFileStateProvider::with_config(config.provider_config()),
            color: config.logging.color && std::io::stdout().is_terminal(),
        }
    }

    pub fn execute(&self, command: &Commands) -> Result<CommandOutput, CliError> {
        match command {
            Commands::State { paths, format } => self.state(paths, *format),
            Commands::Check { snapshot } => self.check(snapshot),
        }
    }

    fn state(&self, paths: &[PathBuf], format: OutputFormat) -> Result<CommandOutput, CliError> {
        let results = get_states(&self.provider, paths);
        let success = results.iter().all(|(_, r)| r.is_ok());
        info!(paths = results.len(), success, "State command finished");

        let text = match format {
            OutputFormat::Text => format_states_text(&results),
            OutputFormat::Json => format_states_json(&snapshot_from_results(&results))?,
        };
        Ok(CommandOutput { text, success })
    }

    fn check(&self, snapshot_path: &Path) -> Result<CommandOutput, CliError> {
        let snapshot = load_snapshot(snapshot_path)?;
        let entries = self.check_snapshot(&snapshot)?;

        let success = entries.iter().all(|e| e.outcome.is_up_to_date());
        info!(paths = entries.len(), success, "Check command finished");

        Ok(CommandOutput {
            text: format_changes_text(&entries, self.color),
            success,
        })
    }

    /// Re-observe every path in the snapshot and classify the change.
    ///
    /// Paths recorded as errors are re-queried too; they are never up to date.
    pub fn check_snapshot(&self, snapshot: &Snapshot) -> Result<Vec<CheckEntry>, CliError> {
        let mut entries = Vec::with_capacity(snapshot.states.len() + snapshot.errors.len());

        for (path, record) in &snapshot.states {
            let previous =
                FileState::try_from(record.clone()).map_err(|source| CliError::Record {
                    path: path.clone(),
                    source,
                })?;
            let outcome = match self.provider.get_state(path) {
                Ok(current) => CheckOutcome::Compared(FileState::compare(&previous, &current)),
                Err(e) => CheckOutcome::Failed(e.to_string()),
            };
            entries.push(CheckEntry {
                path: path.clone(),
                previous: Ok(previous),
                outcome,
            });
        }

        for (path, recorded) in &snapshot.errors {
            let outcome = match self.provider.get_state(path) {
                Ok(current) => CheckOutcome::Unrecorded(current),
                Err(e) => CheckOutcome::Failed(e.to_string()),
            };
            entries.push(CheckEntry {
                path: path.clone(),
                previous: Err(recorded.clone()),
                outcome,
            });
        }

        Ok(entries)
    }
}

/// Build a snapshot document from provider results
pub fn snapshot_from_results(
    results: &[(PathBuf, Result<FileState, crate::error::StateError>)],
) -> Snapshot {
    let mut snapshot = Snapshot::default();
    for (path, result) in results {
        match result {
            Ok(state) => {
                snapshot
                    .states
                    .insert(path.clone(), FileStateRecord::from(*state));
            }
            Err(e) => {
                snapshot.errors.insert(path.clone(), e.to_string());
            }
        }
    }
    snapshot
}

fn load_snapshot(path: &Path) -> Result<Snapshot, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::SnapshotRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CliError::SnapshotParse {
        path: path.to_path_buf(),
        source,
    })
}
