// crates/lost-found-core/src/runtime/store.rs
// ============================================================================
// Module: Lost & Found In-Memory Store
// Description: In-memory item store and a shared store wrapper.
// Purpose: Provide a store implementation without external deps.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! [`InMemoryItemStore`] backs the default `memory` configuration and the
//! unit tests. Contents are lost when the process exits. [`SharedItemStore`]
//! erases the backend type so the server can hold any store behind one type.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use crate::core::Item;
use crate::core::ItemId;
use crate::core::ItemStatus;
use crate::core::NewItem;
use crate::core::Timestamp;
use crate::interfaces::ItemStore;
use crate::interfaces::StoreError;
use crate::interfaces::ensure_assignable_status;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// Mutable contents of the in-memory store.
#[derive(Debug, Default)]
struct InMemoryState {
    /// Items keyed by identifier.
    items: BTreeMap<ItemId, Item>,
    /// Last identifier handed out; ids start at 1.
    last_id: i64,
}

/// In-memory item store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryItemStore {
    /// Store contents protected by a mutex.
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryItemStore {
    /// Creates an empty in-memory item store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the store contents.
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, InMemoryState>, StoreError> {
        self.state.lock().map_err(|_| StoreError::Store("item store mutex poisoned".to_string()))
    }
}

impl ItemStore for InMemoryItemStore {
    fn insert(&self, item: &NewItem) -> Result<Item, StoreError> {
        let mut guard = self.lock()?;
        let next = guard
            .last_id
            .checked_add(1)
            .ok_or_else(|| StoreError::Store("item id space exhausted".to_string()))?;
        let id = ItemId::new(next);
        let stored = Item::from_new(id, item, Timestamp::now());
        guard.items.insert(id, stored.clone());
        guard.last_id = next;
        drop(guard);
        Ok(stored)
    }

    fn update_status(&self, id: ItemId, status: ItemStatus) -> Result<(), StoreError> {
        ensure_assignable_status(status)?;
        let mut guard = self.lock()?;
        let item = guard.items.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        item.status = status;
        drop(guard);
        Ok(())
    }

    fn list(&self) -> Result<Vec<Item>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.items.values().rev().cloned().collect())
    }
}

// ============================================================================
// SECTION: Shared Store
// ============================================================================

/// Shared item store backed by an `Arc` trait object.
#[derive(Clone)]
pub struct SharedItemStore {
    /// Inner store implementation.
    inner: Arc<dyn ItemStore + Send + Sync>,
}

impl SharedItemStore {
    /// Wraps an item store in a shared, clonable wrapper.
    #[must_use]
    pub fn from_store(store: impl ItemStore + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }
}

impl ItemStore for SharedItemStore {
    fn insert(&self, item: &NewItem) -> Result<Item, StoreError> {
        self.inner.insert(item)
    }

    fn update_status(&self, id: ItemId, status: ItemStatus) -> Result<(), StoreError> {
        self.inner.update_status(id, status)
    }

    fn list(&self) -> Result<Vec<Item>, StoreError> {
        self.inner.list()
    }

    fn readiness(&self) -> Result<(), StoreError> {
        self.inner.readiness()
    }
}
