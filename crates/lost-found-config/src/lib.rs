// crates/lost-found-config/src/lib.rs
// ============================================================================
// Module: Lost & Found Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for lost-found.toml semantics.
// Dependencies: lost-found-store-sqlite, serde, toml, url
// ============================================================================

//! ## Overview
//! `lost-found-config` defines the configuration model for the item registry
//! service: listener settings, the browser origin allowed by CORS, request
//! audit output, and the item store backend. Validation is strict and fails
//! closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
