// crates/lost-found-core/src/interfaces/mod.rs
// ============================================================================
// Module: Lost & Found Interfaces
// Description: Backend-agnostic persistence interface for items.
// Purpose: Let the transport run against any store without knowing its engine.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! [`ItemStore`] is the narrow insert/update/list contract the HTTP layer
//! consumes. Implementations own their isolation guarantees; callers assume
//! only that a single insert or a single update-by-id is atomic.
//!
//! Security posture: store errors may carry engine detail and must not be
//! forwarded to clients verbatim.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::Item;
use crate::core::ItemId;
use crate::core::ItemStatus;
use crate::core::NewItem;

// ============================================================================
// SECTION: Item Store
// ============================================================================

/// Item store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("item store io error: {0}")]
    Io(String),
    /// Store data is corrupted or fails integrity checks.
    #[error("item store corruption: {0}")]
    Corrupt(String),
    /// Store data version is incompatible.
    #[error("item store version mismatch: {0}")]
    VersionMismatch(String),
    /// Request or stored data is invalid.
    #[error("item store invalid data: {0}")]
    Invalid(String),
    /// No item exists with the requested identifier.
    #[error("item not found: {0}")]
    NotFound(ItemId),
    /// Store reported an error.
    #[error("item store error: {0}")]
    Store(String),
}

/// Persistence interface for lost and found items.
pub trait ItemStore {
    /// Persists a new item with status `ACTIVE` and a store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the item cannot be committed. Nothing is
    /// stored on error.
    fn insert(&self, item: &NewItem) -> Result<Item, StoreError>;

    /// Sets the status of an existing item.
    ///
    /// The update is unconditional: the prior status is not checked, so
    /// claiming an already claimed item succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no item has `id`,
    /// [`StoreError::Invalid`] when `status` would move an item backward, or
    /// another [`StoreError`] when the update fails.
    fn update_status(&self, id: ItemId, status: ItemStatus) -> Result<(), StoreError>;

    /// Returns every stored item, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when items cannot be read.
    fn list(&self) -> Result<Vec<Item>, StoreError>;

    /// Checks whether the store is ready to serve requests.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unavailable.
    fn readiness(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Rejects status updates that would move an item backward.
///
/// Items are created `ACTIVE`, so the only assignable status is `CLAIMED`.
///
/// # Errors
///
/// Returns [`StoreError::Invalid`] for [`ItemStatus::Active`].
pub fn ensure_assignable_status(status: ItemStatus) -> Result<(), StoreError> {
    match status {
        ItemStatus::Claimed => Ok(()),
        ItemStatus::Active => {
            Err(StoreError::Invalid("status may not move back to ACTIVE".to_string()))
        }
    }
}
