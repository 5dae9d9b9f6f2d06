//! Building factories from discovery sources.

use std::sync::Arc;

use changegen::config::GeneratorsConfig;
use changegen::structure::Table;
use changegen::{
    ChangeGenerator, ChangeGeneratorFactory, Database, DiffOutputControl, GeneratorDescriptor,
    GeneratorSource, InitError, InventorySource, StaticCatalog,
};

use crate::integration::test_utils::{producers, Scripted};

fn build_inventory_table() -> anyhow::Result<Arc<dyn ChangeGenerator>> {
    Ok(Arc::new(Scripted::new("inventory-table", 4)))
}

changegen::inventory::submit! {
    GeneratorDescriptor::new("inventory-table", build_inventory_table)
}

fn failing() -> anyhow::Result<Arc<dyn ChangeGenerator>> {
    Err(anyhow::anyhow!("missing driver metadata"))
}

struct BrokenSource;

impl GeneratorSource for BrokenSource {
    fn discover(&self) -> Result<Vec<GeneratorDescriptor>, InitError> {
        Err(InitError::Discovery("plugin directory unreadable".to_string()))
    }
}

#[test]
fn static_catalog_registers_in_declared_order() {
    let catalog = StaticCatalog::new()
        .with("a", || Ok(Arc::new(Scripted::new("a", 2))))
        .with("b", || Ok(Arc::new(Scripted::new("b", 2))));
    let factory = ChangeGeneratorFactory::new(Arc::new(catalog)).unwrap();

    let db = Database::any();
    let changes = factory
        .fix_missing(&Table::new("t"), &DiffOutputControl::default(), &db, &db)
        .unwrap()
        .unwrap();
    assert_eq!(producers(&changes), vec!["a", "b"]);
}

#[test]
fn failing_constructor_aborts_construction() {
    let catalog = StaticCatalog::new()
        .with("ok", || Ok(Arc::new(Scripted::new("ok", 1))))
        .with("broken", failing);

    let err = match ChangeGeneratorFactory::new(Arc::new(catalog)) {
        Ok(_) => panic!("construction should fail"),
        Err(err) => err,
    };
    match err {
        InitError::Instantiation { generator, source } => {
            assert_eq!(generator, "broken");
            assert_eq!(source.to_string(), "missing driver metadata");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn failing_source_aborts_construction() {
    let result = ChangeGeneratorFactory::new(Arc::new(BrokenSource));
    assert!(matches!(result, Err(InitError::Discovery(_))));
}

#[test]
fn disabled_generators_are_skipped() {
    let catalog = StaticCatalog::new()
        .with("keep", || Ok(Arc::new(Scripted::new("keep", 1))))
        .with("broken", failing);
    let config = GeneratorsConfig {
        disabled: vec!["broken".to_string()],
    };

    let factory = ChangeGeneratorFactory::with_config(Arc::new(catalog), config).unwrap();
    assert_eq!(factory.len(), 1);
}

#[test]
fn inventory_submissions_are_discovered() {
    let descriptors = InventorySource.discover().unwrap();
    assert!(descriptors.iter().any(|d| d.name == "inventory-table"));

    let factory = ChangeGeneratorFactory::discover(GeneratorsConfig::default()).unwrap();
    let db = Database::any();
    let changes = factory
        .fix_missing(&Table::new("t"), &DiffOutputControl::default(), &db, &db)
        .unwrap()
        .unwrap();
    assert_eq!(producers(&changes), vec!["inventory-table"]);
}

#[test]
fn reset_keeps_registry_when_rediscovery_fails() {
    use std::sync::atomic::{AtomicBool, Ordering};

    struct FlakySource {
        fail: AtomicBool,
    }

    impl GeneratorSource for FlakySource {
        fn discover(&self) -> Result<Vec<GeneratorDescriptor>, InitError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(InitError::Discovery("gone".to_string()));
            }
            Ok(vec![GeneratorDescriptor::new("flaky", || {
                Ok(Arc::new(Scripted::new("flaky", 1)))
            })])
        }
    }

    let source = Arc::new(FlakySource {
        fail: AtomicBool::new(false),
    });
    let factory = ChangeGeneratorFactory::new(source.clone()).unwrap();
    factory.register(Arc::new(Scripted::new("manual", 2)));

    source.fail.store(true, Ordering::SeqCst);
    assert!(factory.reset().is_err());
    assert_eq!(factory.len(), 2);
}
