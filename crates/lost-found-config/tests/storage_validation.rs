//! Storage config validation tests for lost-found-config.
// crates/lost-found-config/tests/storage_validation.rs
// =============================================================================
// Module: Storage Config Validation Tests
// Description: Validate item store backend constraints.
// Purpose: Ensure store configuration is unambiguous before the server starts.
// =============================================================================

use std::path::PathBuf;

use lost_found_config::ItemStoreType;

mod common;

use common::assert_invalid;

type TestResult = Result<(), String>;

#[test]
fn item_store_memory_rejects_path() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.item_store.store_type = ItemStoreType::Memory;
    config.item_store.path = Some(PathBuf::from("items.db"));
    assert_invalid(config.validate(), "memory item_store must not set path")?;
    Ok(())
}

#[test]
fn item_store_sqlite_requires_path() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.item_store.store_type = ItemStoreType::Sqlite;
    config.item_store.path = None;
    assert_invalid(config.validate(), "sqlite item_store requires path")?;
    Ok(())
}

#[test]
fn item_store_sqlite_rejects_overlong_component() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.item_store.store_type = ItemStoreType::Sqlite;
    config.item_store.path = Some(PathBuf::from(format!("data/{}.db", "a".repeat(300))));
    assert_invalid(config.validate(), "item_store.path path component too long")?;
    Ok(())
}
