//! Configuration System
//!
//! Layered configuration for the digest engine, path inspection and logging.
//! Files are TOML; every key can be overridden from the environment.

use crate::error::ConfigError;
use crate::hasher::DigestConfig;
use crate::logging::LoggingConfig;
use crate::provider::ProviderConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;
pub use sources::workspace_file::{workspace_config_path, WORKSPACE_CONFIG_FILE};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilestateConfig {
    #[serde(default)]
    pub digest: DigestConfig,

    #[serde(default)]
    pub inspection: InspectionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Path inspection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectionConfig {
    /// Resolve symlinks before inspecting (default: true)
    #[serde(default = "default_true")]
    pub follow_symlinks: bool,
}

fn default_true() -> bool {
    true
}

impl Default for InspectionConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: default_true(),
        }
    }
}

impl FilestateConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.digest
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("digest: {}", e)))
    }

    /// Provider settings derived from this configuration
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            digest: self.digest.clone(),
            follow_symlinks: self.inspection.follow_symlinks,
        }
    }

    /// Render as TOML, e.g. to seed a workspace `filestate.toml`
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}
