//! Single-pass execution over an ordered candidate set.

use crate::change::Changes;
use crate::diff::{DiffOutputControl, ObjectDifferences};
use crate::error::GeneratorError;
use crate::generator::registry::RegisteredGenerator;
use crate::generator::traits::{Capability, ChainStep, ChangeGenerator};
use crate::structure::DatabaseObject;
use crate::types::Database;
use tracing::{trace, warn};

/// Lifecycle of a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainState {
    Created,
    Running,
    Exhausted,
}

/// Cursor over one priority-ordered candidate set.
///
/// Built for a single request and consumed once; a second call on an exhausted
/// chain produces no changes.
#[derive(Debug)]
pub struct ChangeGeneratorChain {
    generators: Vec<RegisteredGenerator>,
    cursor: usize,
    state: ChainState,
}

impl ChangeGeneratorChain {
    pub fn new(generators: Vec<RegisteredGenerator>) -> Self {
        Self {
            generators,
            cursor: 0,
            state: ChainState::Created,
        }
    }

    pub fn state(&self) -> ChainState {
        self.state
    }

    /// Generators not yet invoked
    pub fn remaining(&self) -> usize {
        self.generators.len().saturating_sub(self.cursor)
    }

    pub fn fix_missing(
        &mut self,
        missing: &dyn DatabaseObject,
        control: &DiffOutputControl,
        reference: &Database,
        comparison: &Database,
    ) -> Result<Changes, GeneratorError> {
        self.run(Capability::Missing, |generator| {
            generator
                .as_missing()
                .map(|g| g.fix_missing(missing, control, reference, comparison))
        })
    }

    pub fn fix_unexpected(
        &mut self,
        unexpected: &dyn DatabaseObject,
        control: &DiffOutputControl,
        reference: &Database,
        comparison: &Database,
    ) -> Result<Changes, GeneratorError> {
        self.run(Capability::Unexpected, |generator| {
            generator
                .as_unexpected()
                .map(|g| g.fix_unexpected(unexpected, control, reference, comparison))
        })
    }

    pub fn fix_changed(
        &mut self,
        changed: &dyn DatabaseObject,
        differences: &ObjectDifferences,
        control: &DiffOutputControl,
        reference: &Database,
        comparison: &Database,
    ) -> Result<Changes, GeneratorError> {
        self.run(Capability::Changed, |generator| {
            generator
                .as_changed()
                .map(|g| g.fix_changed(changed, differences, control, reference, comparison))
        })
    }

    fn run<F>(&mut self, capability: Capability, mut invoke: F) -> Result<Changes, GeneratorError>
    where
        F: FnMut(&dyn ChangeGenerator) -> Option<anyhow::Result<ChainStep>>,
    {
        let mut changes = Changes::new();
        if self.state == ChainState::Exhausted {
            return Ok(changes);
        }
        self.state = ChainState::Running;

        while let Some(entry) = self.generators.get(self.cursor) {
            self.cursor += 1;
            let generator: &dyn ChangeGenerator = &**entry.generator();

            // Candidates are filtered by capability up front; anything else is skipped.
            let Some(result) = invoke(generator) else {
                continue;
            };

            match result {
                Ok(step) => {
                    let halt = step.is_halt();
                    let produced = step.into_changes();
                    trace!(
                        generator = entry.name(),
                        %capability,
                        produced = produced.len(),
                        halt,
                        "Generator invoked"
                    );
                    changes.extend(produced);
                    if halt {
                        break;
                    }
                }
                Err(err) => {
                    warn!(
                        generator = entry.name(),
                        %capability,
                        error = %err,
                        "Generator failed; aborting chain"
                    );
                    let error = GeneratorError::new(entry.name(), err);
                    self.exhaust();
                    return Err(error);
                }
            }
        }

        self.exhaust();
        Ok(changes)
    }

    fn exhaust(&mut self) {
        self.cursor = self.generators.len();
        self.state = ChainState::Exhausted;
    }
}
