//! Configuration System
//!
//! Layered configuration for the dispatcher: defaults, then the global config
//! file, then workspace config files, then `CHANGEGEN__*` environment variables.

use crate::diff::DiffOutputControl;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeGenConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Default diff output options handed to generators
    #[serde(default)]
    pub diff: DiffOutputControl,

    /// Generator discovery settings
    #[serde(default)]
    pub generators: GeneratorsConfig,
}

/// Generator discovery settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorsConfig {
    /// Descriptor names to skip when building a registry from discovery
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl GeneratorsConfig {
    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled.iter().any(|disabled| disabled == name)
    }

    pub fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for name in &self.disabled {
            if name.trim().is_empty() {
                return Err("Disabled generator name cannot be empty".to_string());
            }
            if !seen.insert(name.as_str()) {
                return Err(format!("Generator '{}' is disabled more than once", name));
            }
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Logging(String),
    Generators(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
            ValidationError::Generators(msg) => write!(f, "Generators: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ChangeGenConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }
        if let Err(e) = self.generators.validate() {
            errors.push(ValidationError::Generators(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
