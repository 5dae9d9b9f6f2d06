//! Candidate selection: filtering by capability, type, database, and priority ordering.

use std::sync::Arc;

use changegen::{Capability, ChangeGeneratorFactory, Database, ObjectType};

use crate::integration::test_utils::Scripted;

fn names(factory: &ChangeGeneratorFactory, capability: Capability, object_type: ObjectType, db: &Database) -> Vec<String> {
    factory
        .candidates(capability, object_type, db)
        .iter()
        .map(|c| c.name().to_string())
        .collect()
}

#[test]
fn zero_priority_generator_is_excluded() {
    let factory = ChangeGeneratorFactory::empty();
    factory.register(Arc::new(Scripted::new("g1", 10)));
    factory.register(Arc::new(Scripted::new("g2", 5)));
    factory.register(Arc::new(Scripted::new("g3", 0)));

    let db = Database::any();
    assert_eq!(
        names(&factory, Capability::Missing, ObjectType::TABLE, &db),
        vec!["g1", "g2"]
    );
}

#[test]
fn candidates_are_sorted_by_descending_priority_regardless_of_registration_order() {
    let factory = ChangeGeneratorFactory::empty();
    factory.register(Arc::new(Scripted::new("low", 1)));
    factory.register(Arc::new(Scripted::new("high", 50)));
    factory.register(Arc::new(Scripted::new("mid", 20)));
    factory.register(Arc::new(Scripted::new("negative", -3)));

    let db = Database::any();
    assert_eq!(
        names(&factory, Capability::Missing, ObjectType::TABLE, &db),
        vec!["high", "mid", "low"]
    );
}

#[test]
fn equal_priorities_keep_both_generators_in_registration_order() {
    let factory = ChangeGeneratorFactory::empty();
    factory.register(Arc::new(Scripted::new("first", 7)));
    factory.register(Arc::new(Scripted::new("second", 7)));
    factory.register(Arc::new(Scripted::new("third", 7)));

    let db = Database::any();
    let first_query = names(&factory, Capability::Missing, ObjectType::TABLE, &db);
    let second_query = names(&factory, Capability::Missing, ObjectType::TABLE, &db);

    assert_eq!(first_query, vec!["first", "second", "third"]);
    assert_eq!(first_query, second_query);
}

#[test]
fn capability_filters_candidates() {
    let factory = ChangeGeneratorFactory::empty();
    factory.register(Arc::new(Scripted::new("creates", 5)));
    factory.register(Arc::new(
        Scripted::new("drops", 5).capabilities(&[Capability::Unexpected]),
    ));
    factory.register(Arc::new(
        Scripted::new("alters", 5).capabilities(&[Capability::Changed, Capability::Unexpected]),
    ));

    let db = Database::any();
    assert_eq!(names(&factory, Capability::Missing, ObjectType::TABLE, &db), vec!["creates"]);
    assert_eq!(
        names(&factory, Capability::Unexpected, ObjectType::TABLE, &db),
        vec!["drops", "alters"]
    );
    assert_eq!(names(&factory, Capability::Changed, ObjectType::TABLE, &db), vec!["alters"]);
}

#[test]
fn object_type_and_database_filter_candidates() {
    let factory = ChangeGeneratorFactory::empty();
    factory.register(Arc::new(Scripted::new("generic-table", 1)));
    factory.register(Arc::new(Scripted::new("pg-table", 5).only_on("postgresql")));
    factory.register(Arc::new(Scripted::new("column", 3).for_type(ObjectType::COLUMN)));

    let postgres = Database::new("postgresql");
    let mysql = Database::new("mysql");

    assert_eq!(
        names(&factory, Capability::Missing, ObjectType::TABLE, &postgres),
        vec!["pg-table", "generic-table"]
    );
    assert_eq!(
        names(&factory, Capability::Missing, ObjectType::TABLE, &mysql),
        vec!["generic-table"]
    );
    assert_eq!(
        names(&factory, Capability::Missing, ObjectType::COLUMN, &mysql),
        vec!["column"]
    );
    assert!(names(&factory, Capability::Missing, ObjectType::INDEX, &mysql).is_empty());
}
