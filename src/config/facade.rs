//! Configuration loading facade: assembles sources in precedence order and
//! deserializes the result.

use super::merge::merge_policy;
use super::sources::{env_vars, global_file, workspace_file};
use super::FilestateConfig;
use crate::error::ConfigError;
use config::File;
use std::path::Path;
use tracing::debug;

/// Loads [`FilestateConfig`] from layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace
    /// `filestate.toml`, `FILESTATE__*` environment variables.
    pub fn load(workspace_root: &Path) -> Result<FilestateConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = env_vars::add_to_builder(builder);

        let config: FilestateConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        debug!(workspace = %workspace_root.display(), "Configuration loaded");
        Ok(config)
    }

    /// Load configuration from one explicit file (defaults and environment
    /// still apply; global and workspace files are skipped).
    pub fn load_from_file(path: &Path) -> Result<FilestateConfig, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::Invalid(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true));
        let builder = env_vars::add_to_builder(builder);

        let config: FilestateConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
