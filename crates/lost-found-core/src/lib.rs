// crates/lost-found-core/src/lib.rs
// ============================================================================
// Module: Lost & Found Core Library
// Description: Public API surface for the Lost & Found core.
// Purpose: Expose domain types, store interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Lost & Found core defines the item registry domain: item records, the
//! one-way status lifecycle, submission validation, and the persistence
//! interface consumed by the transport. It performs no I/O of its own and
//! integrates with storage backends through [`ItemStore`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::ItemStore;
pub use interfaces::StoreError;
pub use interfaces::ensure_assignable_status;
pub use runtime::InMemoryItemStore;
pub use runtime::SharedItemStore;
