// crates/lost-found-core/src/runtime/mod.rs
// ============================================================================
// Module: Lost & Found Runtime
// Description: Runtime helpers that implement core interfaces.
// Purpose: Provide the in-memory store and the shared store wrapper.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime helpers are small adapters over [`crate::interfaces`] used by the
//! server and by tests.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::InMemoryItemStore;
pub use store::SharedItemStore;
