//! filestate CLI Binary
//!
//! Command-line front end for the file state provider.

use anyhow::Context;
use clap::Parser;
use filestate::cli::{map_error, Cli, RunContext};
use filestate::config::{ConfigLoader, FilestateConfig};
use filestate::logging::init_logging;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:#}", e);
            process::exit(2);
        }
    };

    if let Err(e) = init_logging(Some(&config.logging)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(2);
    }

    info!(algorithm = %config.digest.algorithm, "filestate starting");

    let context = RunContext::new(&config);
    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output.text);
            if !output.success {
                process::exit(1);
            }
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(2);
        }
    }
}

/// Resolve configuration: file/env layers first, then CLI flags on top.
fn load_config(cli: &Cli) -> anyhow::Result<FilestateConfig> {
    let mut config = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ConfigLoader::load(&cli.workspace)
            .with_context(|| format!("loading configuration for {}", cli.workspace.display()))?,
    };

    apply_cli_overrides(cli, &mut config);
    config.validate().context("invalid command-line options")?;
    Ok(config)
}

fn apply_cli_overrides(cli: &Cli, config: &mut FilestateConfig) {
    if let Some(algorithm) = cli.algorithm {
        config.digest.algorithm = algorithm;
    }
    if let Some(chunk_size) = cli.chunk_size {
        config.digest.chunk_size = chunk_size;
    }
    if cli.no_follow_symlinks {
        config.inspection.follow_symlinks = false;
    }

    let logging = &mut config.logging;
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        logging.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        logging.file = Some(file.clone());
    }
}
