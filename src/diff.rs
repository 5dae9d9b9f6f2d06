//! Diff payloads passed through to generators.
//!
//! The dispatcher never inspects these; they exist so generators receive the same
//! output options and difference details the diff subsystem produced.

use crate::types::ObjectType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Options controlling how detected differences become changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOutputControl {
    /// Qualify generated changes with the catalog name
    #[serde(default)]
    pub include_catalog: bool,

    /// Qualify generated changes with the schema name
    #[serde(default = "default_true")]
    pub include_schema: bool,

    /// Carry tablespace clauses through to generated changes
    #[serde(default)]
    pub include_tablespace: bool,

    /// Context expression to stamp on generated changesets
    #[serde(default)]
    pub context: Option<String>,

    /// Labels to stamp on generated changesets
    #[serde(default)]
    pub labels: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl Default for DiffOutputControl {
    fn default() -> Self {
        Self {
            include_catalog: false,
            include_schema: default_true(),
            include_tablespace: false,
            context: None,
            labels: Vec::new(),
        }
    }
}

/// One field that differs between reference and comparison snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difference {
    pub field: String,
    pub reference_value: Option<String>,
    pub compared_value: Option<String>,
}

/// All field differences detected for one changed object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDifferences {
    object_type: ObjectType,
    differences: BTreeMap<String, Difference>,
}

impl ObjectDifferences {
    pub fn new(object_type: ObjectType) -> Self {
        Self {
            object_type,
            differences: BTreeMap::new(),
        }
    }

    /// Record a difference; a later entry for the same field replaces the earlier one
    pub fn add_difference(
        &mut self,
        field: impl Into<String>,
        reference_value: Option<String>,
        compared_value: Option<String>,
    ) {
        let field = field.into();
        self.differences.insert(
            field.clone(),
            Difference {
                field,
                reference_value,
                compared_value,
            },
        );
    }

    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    pub fn get(&self, field: &str) -> Option<&Difference> {
        self.differences.get(field)
    }

    pub fn is_different(&self, field: &str) -> bool {
        self.differences.contains_key(field)
    }

    pub fn has_differences(&self) -> bool {
        !self.differences.is_empty()
    }

    /// Differences ordered by field name
    pub fn differences(&self) -> impl Iterator<Item = &Difference> {
        self.differences.values()
    }
}
