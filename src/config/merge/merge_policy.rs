//! Merge rules: defaults, override order, conflict handling.

use crate::hasher::DEFAULT_CHUNK_SIZE;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("digest.algorithm", "blake3")?
        .set_default("digest.chunk_size", DEFAULT_CHUNK_SIZE as u64)?
        .set_default("inspection.follow_symlinks", true)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}
