//! Change generator factory: the context object that owns a registry and turns
//! missing, unexpected, and changed objects into changes.
//!
//! There is no process-wide instance. Hosts build a factory from a discovery
//! source, share it (it is `Send + Sync`), and call [`ChangeGeneratorFactory::reset`]
//! or build a new one when they need a pristine registry.

use crate::change::Changes;
use crate::config::GeneratorsConfig;
use crate::diff::{DiffOutputControl, ObjectDifferences};
use crate::discovery::{GeneratorSource, InventorySource, StaticCatalog};
use crate::error::{GeneratorError, InitError};
use crate::generator::registry::order_candidates;
use crate::generator::{
    Capability, ChangeGenerator, ChangeGeneratorChain, GeneratorRegistry, GeneratorType,
    RegisteredGenerator,
};
use crate::structure::DatabaseObject;
use crate::types::{Database, ObjectType};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

pub struct ChangeGeneratorFactory {
    registry: RwLock<GeneratorRegistry>,
    source: Arc<dyn GeneratorSource>,
    config: GeneratorsConfig,
}

impl ChangeGeneratorFactory {
    /// Build a factory from a discovery source with default generator settings
    pub fn new(source: Arc<dyn GeneratorSource>) -> Result<Self, InitError> {
        Self::with_config(source, GeneratorsConfig::default())
    }

    /// Build a factory from a discovery source.
    ///
    /// Discovery failures are fatal: no factory is returned.
    pub fn with_config(
        source: Arc<dyn GeneratorSource>,
        config: GeneratorsConfig,
    ) -> Result<Self, InitError> {
        let registry = GeneratorRegistry::from_source(source.as_ref(), &config)?;
        Ok(Self {
            registry: RwLock::new(registry),
            source,
            config,
        })
    }

    /// Build a factory from every generator submitted through `inventory`
    pub fn discover(config: GeneratorsConfig) -> Result<Self, InitError> {
        Self::with_config(Arc::new(InventorySource), config)
    }

    /// Factory with no discovered generators; everything is registered by hand
    pub fn empty() -> Self {
        Self {
            registry: RwLock::new(GeneratorRegistry::new()),
            source: Arc::new(StaticCatalog::new()),
            config: GeneratorsConfig::default(),
        }
    }

    pub fn register(&self, generator: Arc<dyn ChangeGenerator>) {
        self.registry.write().register(generator);
    }

    pub fn unregister(&self, generator: &Arc<dyn ChangeGenerator>) -> bool {
        self.registry.write().unregister(generator)
    }

    pub fn unregister_type(&self, generator_type: GeneratorType) -> bool {
        self.registry.write().unregister_type(generator_type)
    }

    /// Discard the current registry, manual registrations included, and rebuild
    /// it from the discovery source.
    ///
    /// The new registry is built before the old one is replaced; on failure the
    /// current registry stays in place.
    pub fn reset(&self) -> Result<(), InitError> {
        let fresh = GeneratorRegistry::from_source(self.source.as_ref(), &self.config)?;
        *self.registry.write() = fresh;
        debug!("Generator registry reset from discovery");
        Ok(())
    }

    /// Ordered candidate set for one query.
    ///
    /// The read lock is only held while copying the entries. Filtering and
    /// sorting call `priority` outside the lock, so a generator may call back
    /// into the factory.
    pub fn candidates(
        &self,
        capability: Capability,
        object_type: ObjectType,
        database: &Database,
    ) -> Vec<RegisteredGenerator> {
        let entries = self.registry.read().snapshot();
        order_candidates(entries, capability, object_type, database)
    }

    /// Registered generator type names in registration order
    pub fn registered_types(&self) -> Vec<&'static str> {
        self.registry.read().type_names()
    }

    pub fn len(&self) -> usize {
        self.registry.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.read().is_empty()
    }

    fn create_chain(
        &self,
        capability: Capability,
        object_type: ObjectType,
        database: &Database,
    ) -> Option<ChangeGeneratorChain> {
        let candidates = self.candidates(capability, object_type, database);
        if candidates.is_empty() {
            debug!(%capability, %object_type, database = %database, "No generator applies");
            return None;
        }
        Some(ChangeGeneratorChain::new(candidates))
    }

    /// Changes that create `missing` in the comparison database.
    ///
    /// `Ok(None)` means no generator applies to this object.
    pub fn fix_missing(
        &self,
        missing: &dyn DatabaseObject,
        control: &DiffOutputControl,
        reference: &Database,
        comparison: &Database,
    ) -> Result<Option<Changes>, GeneratorError> {
        match self.create_chain(Capability::Missing, missing.object_type(), reference) {
            Some(mut chain) => chain
                .fix_missing(missing, control, reference, comparison)
                .map(Some),
            None => Ok(None),
        }
    }

    /// Changes that remove `unexpected` from the comparison database.
    ///
    /// `Ok(None)` means no generator applies to this object.
    pub fn fix_unexpected(
        &self,
        unexpected: &dyn DatabaseObject,
        control: &DiffOutputControl,
        reference: &Database,
        comparison: &Database,
    ) -> Result<Option<Changes>, GeneratorError> {
        match self.create_chain(Capability::Unexpected, unexpected.object_type(), reference) {
            Some(mut chain) => chain
                .fix_unexpected(unexpected, control, reference, comparison)
                .map(Some),
            None => Ok(None),
        }
    }

    /// Changes that align `changed` with the reference definition.
    ///
    /// `Ok(None)` means no generator applies to this object.
    pub fn fix_changed(
        &self,
        changed: &dyn DatabaseObject,
        differences: &ObjectDifferences,
        control: &DiffOutputControl,
        reference: &Database,
        comparison: &Database,
    ) -> Result<Option<Changes>, GeneratorError> {
        match self.create_chain(Capability::Changed, changed.object_type(), reference) {
            Some(mut chain) => chain
                .fix_changed(changed, differences, control, reference, comparison)
                .map(Some),
            None => Ok(None),
        }
    }

    /// Object types that must be processed before `object_type`, across every
    /// capability and applicable generator.
    pub fn run_after_types(&self, object_type: ObjectType, database: &Database) -> HashSet<ObjectType> {
        self.collect_ordering(object_type, database, |generator| generator.run_after_types())
    }

    /// Object types that must be processed after `object_type`, across every
    /// capability and applicable generator.
    pub fn run_before_types(&self, object_type: ObjectType, database: &Database) -> HashSet<ObjectType> {
        self.collect_ordering(object_type, database, |generator| generator.run_before_types())
    }

    fn collect_ordering<F>(
        &self,
        object_type: ObjectType,
        database: &Database,
        hints: F,
    ) -> HashSet<ObjectType>
    where
        F: Fn(&dyn ChangeGenerator) -> &[ObjectType],
    {
        let mut types = HashSet::new();
        for capability in Capability::ALL {
            for candidate in self.candidates(capability, object_type, database) {
                types.extend(hints(&**candidate.generator()).iter().copied());
            }
        }
        types
    }
}

impl Default for ChangeGeneratorFactory {
    fn default() -> Self {
        Self::empty()
    }
}
