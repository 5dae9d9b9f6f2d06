//! Generator contracts: capability markers, the base generator trait, and the
//! per-capability entry points the chain calls into.

use crate::change::Changes;
use crate::diff::{DiffOutputControl, ObjectDifferences};
use crate::structure::DatabaseObject;
use crate::types::{Database, ObjectType};
use std::any::TypeId;
use std::fmt;

/// Which kind of corrective action a generator can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Object exists in the reference snapshot but not in the comparison
    Missing,
    /// Object exists in the comparison snapshot but not in the reference
    Unexpected,
    /// Object exists in both with differing attributes
    Changed,
}

impl Capability {
    pub const ALL: [Capability; 3] = [
        Capability::Missing,
        Capability::Unexpected,
        Capability::Changed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Missing => "missing",
            Capability::Unexpected => "unexpected",
            Capability::Changed => "changed",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concrete type identity of a generator implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeneratorType {
    id: TypeId,
    name: &'static str,
}

impl GeneratorType {
    pub fn of<G: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<G>(),
            name: std::any::type_name::<G>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.name
    }

    /// Last path segment of the type name, without generic arguments
    pub fn short_name(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        base.rsplit("::").next().unwrap_or(base)
    }
}

/// Outcome of one generator invocation inside a chain.
#[derive(Debug)]
pub enum ChainStep {
    /// Keep the changes and let lower priority generators run too
    Continue(Changes),
    /// Keep the changes and stop the chain here
    Halt(Changes),
}

impl ChainStep {
    /// Nothing to contribute; pass to the next generator.
    pub fn skip() -> Self {
        ChainStep::Continue(Vec::new())
    }

    pub fn is_halt(&self) -> bool {
        matches!(self, ChainStep::Halt(_))
    }

    pub fn into_changes(self) -> Changes {
        match self {
            ChainStep::Continue(changes) | ChainStep::Halt(changes) => changes,
        }
    }
}

/// A pluggable strategy that turns one kind of schema difference into changes.
///
/// Implementations opt into capabilities by overriding the matching `as_*`
/// accessor to return `Some(self)` and implementing the capability trait.
pub trait ChangeGenerator: Send + Sync + 'static {
    /// How strongly this generator wants to handle `object_type` on `database`.
    /// Zero or below means it does not apply.
    fn priority(&self, object_type: ObjectType, database: &Database) -> i32;

    /// Object types whose changes must be generated before this generator's
    fn run_after_types(&self) -> &[ObjectType] {
        &[]
    }

    /// Object types whose changes must be generated after this generator's
    fn run_before_types(&self) -> &[ObjectType] {
        &[]
    }

    fn as_missing(&self) -> Option<&dyn MissingObjectChangeGenerator> {
        None
    }

    fn as_unexpected(&self) -> Option<&dyn UnexpectedObjectChangeGenerator> {
        None
    }

    fn as_changed(&self) -> Option<&dyn ChangedObjectChangeGenerator> {
        None
    }

    fn generator_type(&self) -> GeneratorType {
        GeneratorType::of::<Self>()
    }

    fn name(&self) -> &str {
        self.generator_type().short_name()
    }

    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Missing => self.as_missing().is_some(),
            Capability::Unexpected => self.as_unexpected().is_some(),
            Capability::Changed => self.as_changed().is_some(),
        }
    }
}

/// Produces changes that create an object missing from the comparison database.
pub trait MissingObjectChangeGenerator: ChangeGenerator {
    fn fix_missing(
        &self,
        missing: &dyn DatabaseObject,
        control: &DiffOutputControl,
        reference: &Database,
        comparison: &Database,
    ) -> anyhow::Result<ChainStep>;
}

/// Produces changes that remove an object only the comparison database has.
pub trait UnexpectedObjectChangeGenerator: ChangeGenerator {
    fn fix_unexpected(
        &self,
        unexpected: &dyn DatabaseObject,
        control: &DiffOutputControl,
        reference: &Database,
        comparison: &Database,
    ) -> anyhow::Result<ChainStep>;
}

/// Produces changes that bring a differing object in line with the reference.
pub trait ChangedObjectChangeGenerator: ChangeGenerator {
    fn fix_changed(
        &self,
        changed: &dyn DatabaseObject,
        differences: &ObjectDifferences,
        control: &DiffOutputControl,
        reference: &Database,
        comparison: &Database,
    ) -> anyhow::Result<ChainStep>;
}
