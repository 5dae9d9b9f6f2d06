//! Database object model handed to generators.
//!
//! The snapshot subsystem owns the real object graph; this module defines the
//! trait generators dispatch on plus a small set of concrete objects that cover
//! the common structural types.

use crate::types::ObjectType;
use std::any::Any;
use std::fmt::Debug;

/// A captured database object that may be missing, unexpected, or changed.
pub trait DatabaseObject: Debug + Send + Sync {
    /// Runtime type tag used to select generators
    fn object_type(&self) -> ObjectType;

    fn name(&self) -> &str;

    /// Allows generators to downcast to the concrete object they handle.
    fn as_any(&self) -> &dyn Any;
}

impl<'a> dyn DatabaseObject + 'a {
    pub fn downcast_ref<T: DatabaseObject + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

macro_rules! database_object {
    ($ty:ident, $tag:expr) => {
        impl DatabaseObject for $ty {
            fn object_type(&self) -> ObjectType {
                $tag
            }

            fn name(&self) -> &str {
                &self.name
            }

            fn as_any(&self) -> &dyn Any {
                self
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub name: String,
    pub catalog: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub schema: Option<String>,
    pub columns: Vec<Column>,
    pub remarks: Option<String>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
            columns: Vec::new(),
            remarks: None,
        }
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub name: String,
    pub schema: Option<String>,
    pub definition: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub relation: String,
    pub data_type: String,
    pub nullable: bool,
    pub default_value: Option<String>,
}

impl Column {
    pub fn new(relation: impl Into<String>, name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            relation: relation.into(),
            data_type: data_type.into(),
            nullable: true,
            default_value: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    pub name: String,
    pub table: String,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub name: String,
    pub table: String,
    pub columns: Vec<String>,
    pub referenced_table: String,
    pub referenced_columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    pub name: String,
    pub table: String,
    pub columns: Vec<String>,
    pub unique: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueConstraint {
    pub name: String,
    pub table: String,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub name: String,
    pub schema: Option<String>,
    pub start_value: Option<i64>,
    pub increment_by: Option<i64>,
}

database_object!(Catalog, ObjectType::CATALOG);
database_object!(Schema, ObjectType::SCHEMA);
database_object!(Table, ObjectType::TABLE);
database_object!(View, ObjectType::VIEW);
database_object!(Column, ObjectType::COLUMN);
database_object!(PrimaryKey, ObjectType::PRIMARY_KEY);
database_object!(ForeignKey, ObjectType::FOREIGN_KEY);
database_object!(Index, ObjectType::INDEX);
database_object!(UniqueConstraint, ObjectType::UNIQUE_CONSTRAINT);
database_object!(Sequence, ObjectType::SEQUENCE);
