// crates/lost-found-core/src/core/submission.rs
// ============================================================================
// Module: Lost & Found Submissions
// Description: Validation of decoded form fields into domain values.
// Purpose: Keep create and claim input rules independent of the transport.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! The transport decodes request bodies into a field map and hands it here.
//! Validation is all-or-nothing: a submission either yields a [`NewItem`]
//! or an error, and nothing reaches the store on failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::item::ItemId;
use crate::core::item::NewItem;

// ============================================================================
// SECTION: Field Names
// ============================================================================

/// Form field carrying the item title.
pub const FIELD_TITLE: &str = "title";
/// Form field carrying the description.
pub const FIELD_DESCRIPTION: &str = "description";
/// Form field carrying the report kind.
pub const FIELD_TYPE: &str = "type";
/// Form field carrying the location.
pub const FIELD_LOCATION: &str = "location";
/// Form field carrying the contact name.
pub const FIELD_CONTACT_NAME: &str = "contactName";
/// Form field carrying the contact phone.
pub const FIELD_CONTACT_PHONE: &str = "contactPhone";
/// Form field carrying the item identifier on claim.
pub const FIELD_ID: &str = "id";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Client input validation failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// One or more required fields are absent or blank.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingRequiredFields(Vec<&'static str>),
    /// The item identifier is absent, not an integer, or out of range.
    #[error("invalid item id")]
    InvalidItemId,
}

// ============================================================================
// SECTION: Validation
// ============================================================================

impl NewItem {
    /// Builds a validated submission from decoded form fields.
    ///
    /// Absent fields are treated as empty. `description` and `location` are
    /// optional.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::MissingRequiredFields`] when any of `title`,
    /// `type`, `contactName`, or `contactPhone` is blank.
    pub fn from_fields(fields: &BTreeMap<String, String>) -> Result<Self, SubmissionError> {
        let field = |name: &str| fields.get(name).map_or("", String::as_str);
        Self::new(
            field(FIELD_TITLE),
            field(FIELD_DESCRIPTION),
            field(FIELD_TYPE),
            field(FIELD_LOCATION),
            field(FIELD_CONTACT_NAME),
            field(FIELD_CONTACT_PHONE),
        )
    }
}

/// Parses the claim identifier.
///
/// The value is not trimmed: `" 7"` is rejected. An optional leading sign is
/// accepted. Claim identifiers are limited to the 32-bit signed range; larger
/// values are rejected as invalid input rather than looked up.
///
/// # Errors
///
/// Returns [`SubmissionError::InvalidItemId`] when the value is absent or is
/// not a base-10 integer in the 32-bit signed range.
pub fn parse_item_id(raw: Option<&str>) -> Result<ItemId, SubmissionError> {
    raw.and_then(|value| value.parse::<i32>().ok())
        .map(|value| ItemId::new(i64::from(value)))
        .ok_or(SubmissionError::InvalidItemId)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
