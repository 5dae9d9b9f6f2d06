//! Core shared types: object type tags and database descriptors.

use std::fmt;

/// Runtime tag for a concrete database object type.
///
/// Generators match on these tags the same way the snapshot subsystem labels the
/// objects it captures. Extensions can mint their own with [`ObjectType::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectType(&'static str);

impl ObjectType {
    pub const CATALOG: ObjectType = ObjectType("catalog");
    pub const SCHEMA: ObjectType = ObjectType("schema");
    pub const TABLE: ObjectType = ObjectType("table");
    pub const VIEW: ObjectType = ObjectType("view");
    pub const COLUMN: ObjectType = ObjectType("column");
    pub const PRIMARY_KEY: ObjectType = ObjectType("primaryKey");
    pub const FOREIGN_KEY: ObjectType = ObjectType("foreignKey");
    pub const INDEX: ObjectType = ObjectType("index");
    pub const UNIQUE_CONSTRAINT: ObjectType = ObjectType("uniqueConstraint");
    pub const SEQUENCE: ObjectType = ObjectType("sequence");

    pub const fn new(name: &'static str) -> Self {
        ObjectType(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Short name used by [`Database::any`].
pub const ANY_DATABASE: &str = "any";

/// Descriptor of the database a generator is asked to target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Database {
    short_name: String,
    product_version: Option<String>,
}

impl Database {
    pub fn new(short_name: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            product_version: None,
        }
    }

    /// Wildcard database for generators that do not care about the vendor
    pub fn any() -> Self {
        Self::new(ANY_DATABASE)
    }

    pub fn with_product_version(mut self, version: impl Into<String>) -> Self {
        self.product_version = Some(version.into());
        self
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn product_version(&self) -> Option<&str> {
        self.product_version.as_deref()
    }

    pub fn is_any(&self) -> bool {
        self.is(ANY_DATABASE)
    }

    /// Case-insensitive vendor check.
    pub fn is(&self, short_name: &str) -> bool {
        self.short_name.eq_ignore_ascii_case(short_name)
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.product_version {
            Some(version) => write!(f, "{} {}", self.short_name, version),
            None => f.write_str(&self.short_name),
        }
    }
}
