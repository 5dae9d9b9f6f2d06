//! Candidate ordering for one (object type, database) query.

use crate::generator::registry::RegisteredGenerator;
use crate::types::{Database, ObjectType};
use std::cmp::Ordering;

/// Orders generators by descending priority, then by registration sequence.
///
/// Sequence numbers are unique per registry, so two distinct entries never
/// compare equal and none can be lost when sorting.
pub struct PriorityComparator<'a> {
    object_type: ObjectType,
    database: &'a Database,
}

impl<'a> PriorityComparator<'a> {
    pub fn new(object_type: ObjectType, database: &'a Database) -> Self {
        Self {
            object_type,
            database,
        }
    }

    pub fn compare(&self, a: &RegisteredGenerator, b: &RegisteredGenerator) -> Ordering {
        let a_priority = a.generator().priority(self.object_type, self.database);
        let b_priority = b.generator().priority(self.object_type, self.database);

        b_priority
            .cmp(&a_priority)
            .then_with(|| a.sequence().cmp(&b.sequence()))
    }
}
