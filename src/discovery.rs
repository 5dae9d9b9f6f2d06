//! Generator discovery: where the registry's initial generators come from.
//!
//! Two sources are provided. [`StaticCatalog`] is an explicit startup table
//! handed in by the caller. [`InventorySource`] collects every
//! [`GeneratorDescriptor`] submitted with `inventory::submit!` anywhere in the
//! final binary, so downstream crates can contribute generators without touching
//! a central list:
//!
//! ```ignore
//! changegen::inventory::submit! {
//!     changegen::GeneratorDescriptor::new("create-table", || Ok(std::sync::Arc::new(CreateTable)))
//! }
//! ```

use crate::error::InitError;
use crate::generator::ChangeGenerator;
use std::fmt;
use std::sync::Arc;

/// Constructor for one generator implementation
pub type GeneratorConstructor = fn() -> anyhow::Result<Arc<dyn ChangeGenerator>>;

/// Registration entry: a stable name and how to build the generator.
#[derive(Clone, Copy)]
pub struct GeneratorDescriptor {
    /// Name used for logging and for `generators.disabled` in configuration
    pub name: &'static str,
    pub construct: GeneratorConstructor,
}

impl GeneratorDescriptor {
    pub const fn new(name: &'static str, construct: GeneratorConstructor) -> Self {
        Self { name, construct }
    }
}

impl fmt::Debug for GeneratorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

inventory::collect!(GeneratorDescriptor);

/// Supplies the generator implementations a registry is built from.
pub trait GeneratorSource: Send + Sync {
    /// Descriptors in the order they should be registered
    fn discover(&self) -> Result<Vec<GeneratorDescriptor>, InitError>;
}

/// Explicit registration table
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    descriptors: Vec<GeneratorDescriptor>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, construct: GeneratorConstructor) -> Self {
        self.descriptors.push(GeneratorDescriptor::new(name, construct));
        self
    }

    pub fn push(&mut self, descriptor: GeneratorDescriptor) {
        self.descriptors.push(descriptor);
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl FromIterator<GeneratorDescriptor> for StaticCatalog {
    fn from_iter<I: IntoIterator<Item = GeneratorDescriptor>>(iter: I) -> Self {
        Self {
            descriptors: iter.into_iter().collect(),
        }
    }
}

impl GeneratorSource for StaticCatalog {
    fn discover(&self) -> Result<Vec<GeneratorDescriptor>, InitError> {
        Ok(self.descriptors.clone())
    }
}

/// Link-time registrations collected through `inventory`.
///
/// Link order is not stable, so descriptors are returned sorted by name to keep
/// registration order (and therefore tie-breaks) reproducible between runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct InventorySource;

impl GeneratorSource for InventorySource {
    fn discover(&self) -> Result<Vec<GeneratorDescriptor>, InitError> {
        let mut descriptors: Vec<GeneratorDescriptor> = inventory::iter::<GeneratorDescriptor>
            .into_iter()
            .copied()
            .collect();
        descriptors.sort_by(|a, b| a.name.cmp(b.name));
        Ok(descriptors)
    }
}

/// Get a submitted descriptor by name.
pub fn find_registered(name: &str) -> Option<&'static GeneratorDescriptor> {
    inventory::iter::<GeneratorDescriptor>
        .into_iter()
        .find(|descriptor| descriptor.name == name)
}
