//! CLI output: command results and error mapping to the CLI surface.

use crate::error::CliError;

/// Rendered command output. `success` is false when any path failed or,
/// for `check`, when anything changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub success: bool,
}

/// Map CLI errors to a string for stderr.
pub fn map_error(e: &CliError) -> String {
    let mut message = e.to_string();
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        let detail = cause.to_string();
        if !message.contains(&detail) {
            message.push_str(": ");
            message.push_str(&detail);
        }
        source = cause.source();
    }
    message
}
