//! CLI domain: parse, route, output, and presentation only.
//! All inspection goes through the library provider.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::{map_error, CommandOutput};
pub use parse::{Cli, Commands, OutputFormat};
pub use presentation::{format_changes_text, format_states_json, format_states_text};
pub use route::{CheckEntry, CheckOutcome, RunContext, Snapshot};
