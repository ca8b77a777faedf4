//! CLI presentation: text tables and JSON documents for command results.

use crate::cli::route::{CheckEntry, CheckOutcome, Snapshot};
use crate::error::{CliError, StateError};
use crate::state::{FileState, StateChange};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::path::PathBuf;

/// One row per path: kind, modification time, digest (or the error)
pub fn format_states_text(results: &[(PathBuf, Result<FileState, StateError>)]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Path", "State", "Modified", "Digest"]);

    for (path, result) in results {
        let path = path.display().to_string();
        match result {
            Ok(state) => {
                let modified = state
                    .timestamp()
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "-".to_string());
                let digest = state
                    .digest()
                    .map(|d| d.to_hex())
                    .unwrap_or_else(|| "-".to_string());
                table.add_row(vec![path, state.kind().to_string(), modified, digest]);
            }
            Err(e) => {
                table.add_row(vec![path, "error".to_string(), "-".to_string(), e.to_string()]);
            }
        }
    }

    table.to_string()
}

/// Pretty JSON snapshot document. Fails when a path has no UTF-8 form.
pub fn format_states_json(snapshot: &Snapshot) -> Result<String, CliError> {
    serde_json::to_string_pretty(snapshot).map_err(CliError::SnapshotEncode)
}

/// One row per checked path with its change
pub fn format_changes_text(entries: &[CheckEntry], color: bool) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Path", "Recorded", "Change"]);

    for entry in entries {
        let recorded = match &entry.previous {
            Ok(state) => state.kind().to_string(),
            Err(_) => "error".to_string(),
        };
        let change = match &entry.outcome {
            CheckOutcome::Compared(change) => paint_change(change, color),
            CheckOutcome::Unrecorded(current) => {
                let label = format!("not recorded (now {})", current.kind());
                if color {
                    format!("{}", label.yellow())
                } else {
                    label
                }
            }
            CheckOutcome::Failed(message) if color => {
                format!("{}", format!("error: {}", message).red())
            }
            CheckOutcome::Failed(message) => format!("error: {}", message),
        };
        table.add_row(vec![entry.path.display().to_string(), recorded, change]);
    }

    let changed = entries
        .iter()
        .filter(|e| !e.outcome.is_up_to_date())
        .count();
    format!("{}\n{} of {} path(s) out of date", table, changed, entries.len())
}

fn paint_change(change: &StateChange, color: bool) -> String {
    let label = change.to_string();
    if !color {
        return label;
    }
    if change.is_up_to_date() {
        format!("{}", label.green())
    } else {
        format!("{}", label.yellow())
    }
}
