//! Generator registry: the set of generator instances available for dispatch.

use crate::config::GeneratorsConfig;
use crate::discovery::GeneratorSource;
use crate::error::InitError;
use crate::generator::priority::PriorityComparator;
use crate::generator::traits::{Capability, ChangeGenerator, GeneratorType};
use crate::types::{Database, ObjectType};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A generator together with the sequence number it was registered under.
///
/// The sequence number is unique within a registry and is the tie-break when two
/// generators report the same priority.
#[derive(Clone)]
pub struct RegisteredGenerator {
    generator: Arc<dyn ChangeGenerator>,
    sequence: u64,
}

impl RegisteredGenerator {
    pub fn generator(&self) -> &Arc<dyn ChangeGenerator> {
        &self.generator
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn name(&self) -> &str {
        self.generator.name()
    }

    /// Whether this entry holds exactly the given instance
    pub fn is(&self, generator: &Arc<dyn ChangeGenerator>) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.generator), Arc::as_ptr(generator))
    }
}

impl fmt::Debug for RegisteredGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredGenerator")
            .field("name", &self.generator.name())
            .field("type", &self.generator.generator_type().type_name())
            .field("sequence", &self.sequence)
            .finish()
    }
}

/// Registry of generator instances
///
/// Kept in registration order. No deduplication is performed: registering the
/// same implementation twice yields two independent candidates.
#[derive(Debug, Default)]
pub struct GeneratorRegistry {
    generators: Vec<RegisteredGenerator>,
    next_sequence: u64,
}

impl GeneratorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a discovery source.
    ///
    /// Any discovery or constructor failure aborts the whole build; callers never
    /// see a registry holding only some of the discovered generators.
    pub fn from_source(
        source: &dyn GeneratorSource,
        config: &GeneratorsConfig,
    ) -> Result<Self, InitError> {
        let descriptors = source.discover()?;
        let mut registry = Self::new();

        for descriptor in descriptors {
            if config.is_disabled(descriptor.name) {
                debug!(generator = descriptor.name, "Skipping disabled generator");
                continue;
            }
            let generator = (descriptor.construct)().map_err(|err| InitError::Instantiation {
                generator: descriptor.name.to_string(),
                source: err,
            })?;
            registry.register(generator);
        }

        debug!(count = registry.len(), "Generator registry built from discovery");
        Ok(registry)
    }

    /// Register a generator instance
    pub fn register(&mut self, generator: Arc<dyn ChangeGenerator>) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        debug!(generator = generator.name(), sequence, "Registered generator");
        self.generators.push(RegisteredGenerator {
            generator,
            sequence,
        });
    }

    /// Remove the first entry holding this exact instance.
    ///
    /// Returns false when the instance was not registered.
    pub fn unregister(&mut self, generator: &Arc<dyn ChangeGenerator>) -> bool {
        match self.generators.iter().position(|entry| entry.is(generator)) {
            Some(index) => {
                let removed = self.generators.remove(index);
                debug!(
                    generator = removed.name(),
                    sequence = removed.sequence,
                    "Unregistered generator"
                );
                true
            }
            None => false,
        }
    }

    /// Remove the most recently registered instance of the given concrete type.
    ///
    /// Returns false, and leaves the registry untouched, when no instance matches.
    pub fn unregister_type(&mut self, generator_type: GeneratorType) -> bool {
        let target = self
            .generators
            .iter()
            .rev()
            .find(|entry| entry.generator.generator_type() == generator_type)
            .map(|entry| entry.generator.clone());

        match target {
            Some(generator) => self.unregister(&generator),
            None => {
                debug!(
                    generator_type = generator_type.type_name(),
                    "No registered generator of type; nothing to unregister"
                );
                false
            }
        }
    }

    /// Generators that support `capability` and apply to `object_type` on
    /// `database`, highest priority first.
    pub fn select_candidates(
        &self,
        capability: Capability,
        object_type: ObjectType,
        database: &Database,
    ) -> Vec<RegisteredGenerator> {
        order_candidates(self.snapshot(), capability, object_type, database)
    }

    /// Copy of every entry in registration order.
    ///
    /// Runs no generator code, so it is safe to take under a lock.
    pub fn snapshot(&self) -> Vec<RegisteredGenerator> {
        self.generators.clone()
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Entries in registration order
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredGenerator> {
        self.generators.iter()
    }

    /// Concrete type names in registration order
    pub fn type_names(&self) -> Vec<&'static str> {
        self.generators
            .iter()
            .map(|entry| entry.generator.generator_type().type_name())
            .collect()
    }
}

/// Filter `entries` down to the candidates for one query and sort them by
/// [`PriorityComparator`].
///
/// Calls into generator code (`supports`, `priority`); callers holding the
/// registry lock must release it first.
pub fn order_candidates(
    entries: Vec<RegisteredGenerator>,
    capability: Capability,
    object_type: ObjectType,
    database: &Database,
) -> Vec<RegisteredGenerator> {
    let mut candidates: Vec<RegisteredGenerator> = entries
        .into_iter()
        .filter(|entry| {
            entry.generator.supports(capability)
                && entry.generator.priority(object_type, database) > 0
        })
        .collect();

    let comparator = PriorityComparator::new(object_type, database);
    candidates.sort_by(|a, b| comparator.compare(a, b));
    candidates
}
