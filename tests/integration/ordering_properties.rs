//! Property-based tests for candidate ordering

use std::collections::HashSet;
use std::sync::Arc;

use changegen::{Capability, ChangeGeneratorFactory, Database, ObjectType};
use proptest::prelude::*;

use crate::integration::test_utils::Scripted;

const LABELS: [&str; 12] = [
    "g00", "g01", "g02", "g03", "g04", "g05", "g06", "g07", "g08", "g09", "g10", "g11",
];

const HINTS: [ObjectType; 5] = [
    ObjectType::SCHEMA,
    ObjectType::TABLE,
    ObjectType::COLUMN,
    ObjectType::INDEX,
    ObjectType::SEQUENCE,
];

fn factory_with(priorities: &[i32]) -> ChangeGeneratorFactory {
    let factory = ChangeGeneratorFactory::empty();
    for (label, priority) in LABELS.iter().zip(priorities) {
        factory.register(Arc::new(Scripted::new(*label, *priority)));
    }
    factory
}

/// Candidates are exactly the positive-priority generators, highest first,
/// ties in registration order
#[test]
fn test_candidate_order_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&prop::collection::vec(-5i32..20, 0..12), |priorities| {
            let factory = factory_with(&priorities);

            let mut expected: Vec<(usize, i32)> = priorities
                .iter()
                .copied()
                .enumerate()
                .filter(|(_, priority)| *priority > 0)
                .collect();
            expected.sort_by(|a, b| b.1.cmp(&a.1));
            let expected: Vec<&str> = expected.iter().map(|(i, _)| LABELS[*i]).collect();

            let candidates = factory.candidates(Capability::Missing, ObjectType::TABLE, &Database::any());
            let actual: Vec<&str> = candidates.iter().map(|c| c.name()).collect();
            prop_assert_eq!(actual, expected);

            // Sequences strictly increase among equal priorities
            for pair in candidates.windows(2) {
                let a = pair[0].generator().priority(ObjectType::TABLE, &Database::any());
                let b = pair[1].generator().priority(ObjectType::TABLE, &Database::any());
                prop_assert!(a > b || (a == b && pair[0].sequence() < pair[1].sequence()));
            }

            Ok(())
        })
        .unwrap();
}

/// Ordering hints are a set: registration order never changes the answer
#[test]
fn test_ordering_hints_independent_of_registration_order() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let hint = prop::sample::subsequence(HINTS.to_vec(), 0..=HINTS.len());
    let generators = prop::collection::vec((1i32..10, hint), 1..8);

    runner
        .run(&(generators, any::<prop::sample::Index>()), |(entries, rotation)| {
            let build = |order: &[usize]| {
                let factory = ChangeGeneratorFactory::empty();
                for &i in order {
                    let (priority, after) = &entries[i];
                    factory.register(Arc::new(Scripted::new(LABELS[i], *priority).after(after)));
                }
                factory
            };

            let forward: Vec<usize> = (0..entries.len()).collect();
            let mut rotated = forward.clone();
            rotated.rotate_left(rotation.index(entries.len()));

            let db = Database::any();
            let expected: HashSet<ObjectType> =
                entries.iter().flat_map(|(_, after)| after.iter().copied()).collect();
            prop_assert_eq!(build(&forward).run_after_types(ObjectType::TABLE, &db), expected.clone());
            prop_assert_eq!(build(&rotated).run_after_types(ObjectType::TABLE, &db), expected);

            Ok(())
        })
        .unwrap();
}
