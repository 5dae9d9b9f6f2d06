//! Changegen: change generator dispatch
//!
//! Selects, orders, and runs pluggable change generators that turn the
//! differences between two schema snapshots (missing, unexpected, or changed
//! objects) into migration changes, and reports the cross-type ordering hints
//! those generators declare.

pub mod change;
pub mod config;
pub mod diff;
pub mod discovery;
pub mod error;
pub mod factory;
pub mod generator;
pub mod logging;
pub mod structure;
pub mod types;

pub use change::{Change, Changes};
pub use diff::{DiffOutputControl, Difference, ObjectDifferences};
pub use discovery::{GeneratorDescriptor, GeneratorSource, InventorySource, StaticCatalog};
pub use error::{ChangeGenError, ConfigError, GeneratorError, InitError, Result};
pub use factory::ChangeGeneratorFactory;
pub use generator::{
    Capability, ChainStep, ChangeGenerator, ChangedObjectChangeGenerator, GeneratorRegistry,
    GeneratorType, MissingObjectChangeGenerator, UnexpectedObjectChangeGenerator,
};
pub use structure::DatabaseObject;
pub use types::{Database, ObjectType};

// Re-export inventory so generator crates can submit descriptors without a direct dependency
pub use inventory;
