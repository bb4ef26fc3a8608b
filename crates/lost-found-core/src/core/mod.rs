// crates/lost-found-core/src/core/mod.rs
// ============================================================================
// Module: Lost & Found Core Types
// Description: Canonical item records and submission validation.
// Purpose: Provide stable, serializable types shared by stores and transports.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Core types are the single source of truth for the item wire shape. Stores
//! produce [`Item`] values and the HTTP layer serializes them unchanged.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod item;
pub mod submission;
pub mod timestamp;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use item::Item;
pub use item::ItemId;
pub use item::ItemStatus;
pub use item::NewItem;
pub use submission::FIELD_CONTACT_NAME;
pub use submission::FIELD_CONTACT_PHONE;
pub use submission::FIELD_DESCRIPTION;
pub use submission::FIELD_ID;
pub use submission::FIELD_LOCATION;
pub use submission::FIELD_TITLE;
pub use submission::FIELD_TYPE;
pub use submission::SubmissionError;
pub use submission::parse_item_id;
pub use timestamp::Timestamp;
pub use timestamp::TimestampError;
