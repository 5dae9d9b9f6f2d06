//! Error types for change generator dispatch.

use thiserror::Error;

/// Fatal errors raised while building a generator registry from discovery.
///
/// A registry is only ever handed out fully built; any of these aborts construction.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("Generator discovery failed: {0}")]
    Discovery(String),

    #[error("Failed to instantiate generator '{generator}': {source}")]
    Instantiation {
        generator: String,
        #[source]
        source: anyhow::Error,
    },
}

/// A generator failed while producing changes.
///
/// The underlying cause is opaque to the dispatcher and is carried through untouched.
#[derive(Debug, Error)]
#[error("Generator '{generator}' failed: {source}")]
pub struct GeneratorError {
    pub generator: String,
    #[source]
    pub source: anyhow::Error,
}

impl GeneratorError {
    pub fn new(generator: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self {
            generator: generator.into(),
            source: source.into(),
        }
    }
}

/// Configuration and logging setup errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

/// Umbrella error for callers that do not need to distinguish the layers.
#[derive(Debug, Error)]
pub enum ChangeGenError {
    #[error(transparent)]
    Init(#[from] InitError),

    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T, E = ChangeGenError> = std::result::Result<T, E>;
