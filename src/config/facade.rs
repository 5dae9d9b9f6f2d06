//! Config loader: assembles sources in precedence order and deserializes.

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::ChangeGenConfig;
use crate::error::ConfigError;
use config::File;
use std::path::{Path, PathBuf};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace
    /// `config/config.toml`, workspace `config/{CHANGEGEN_ENV}.toml`, environment.
    pub fn load(workspace_root: &Path) -> Result<ChangeGenConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);

        let config: ChangeGenConfig = builder.build()?.try_deserialize()?;
        Self::validated(config)
    }

    /// Load configuration from a single file, ignoring other sources
    pub fn load_from_file(path: &Path) -> Result<ChangeGenConfig, ConfigError> {
        let config: ChangeGenConfig = merge_policy::builder_with_defaults()?
            .add_source(File::from(path))
            .build()?
            .try_deserialize()?;
        Self::validated(config)
    }

    /// Path of the global config file, if HOME or XDG_CONFIG_HOME is set
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    /// Built-in defaults
    pub fn default() -> ChangeGenConfig {
        ChangeGenConfig::default()
    }

    fn validated(config: ChangeGenConfig) -> Result<ChangeGenConfig, ConfigError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ConfigError::Invalid(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}
