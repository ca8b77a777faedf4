//! CLI parse: clap types for filestate. No behavior; definitions only.

use crate::hasher::DigestAlgorithm;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// filestate - observe file states for up-to-date checks
#[derive(Parser, Debug)]
#[command(name = "filestate")]
#[command(about = "Report whether paths are missing, directories, or files with a content digest")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root used to locate filestate.toml
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Digest algorithm (blake3, sha256)
    #[arg(long)]
    pub algorithm: Option<DigestAlgorithm>,

    /// Read buffer size in bytes
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Report symlinks as unsupported instead of following them
    #[arg(long)]
    pub no_follow_symlinks: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the current state of each path
    State {
        /// Paths to inspect
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Compare paths against a JSON snapshot written by `state --format json`
    Check {
        /// Snapshot file
        snapshot: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
