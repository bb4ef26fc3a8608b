// crates/lost-found-store-sqlite/src/lib.rs
// ============================================================================
// Module: SQLite Item Store
// Description: Durable ItemStore backend using SQLite.
// Purpose: Provide persistent storage for lost and found reports.
// Dependencies: lost-found-core, rusqlite
// ============================================================================

//! ## Overview
//! This crate provides a SQLite-backed [`ItemStore`] implementation. Items live
//! in a single table keyed by an autoincrement identifier; the schema version
//! is recorded in a metadata table and checked on open.
//!
//! [`ItemStore`]: lost_found_core::ItemStore

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::DEFAULT_BUSY_TIMEOUT_MS;
pub use store::SqliteItemStore;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteStoreMode;
pub use store::SqliteSyncMode;
