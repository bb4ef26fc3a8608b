// crates/lost-found-core/src/core/item.rs
// ============================================================================
// Module: Lost & Found Items
// Description: Item records, identifiers, and the status lifecycle.
// Purpose: Define the single persisted entity and its JSON wire shape.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! An item is one lost or found report. Identifiers are assigned by the store
//! exactly once; status starts at [`ItemStatus::Active`] and may only move to
//! [`ItemStatus::Claimed`].
//!
//! The serialized field names (`id`, `title`, `description`, `type`,
//! `location`, `contactName`, `contactPhone`, `status`, `dateReported`) are
//! consumed directly by the browser front-end.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::submission::FIELD_CONTACT_NAME;
use crate::core::submission::FIELD_CONTACT_PHONE;
use crate::core::submission::FIELD_TITLE;
use crate::core::submission::FIELD_TYPE;
use crate::core::submission::SubmissionError;
use crate::core::timestamp::Timestamp;

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Store-assigned item identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    /// Creates a new item identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Status
// ============================================================================

/// Item lifecycle status.
///
/// # Invariants
/// - Transitions are one-way: `Active` to `Claimed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    /// Item is open and awaiting its owner.
    Active,
    /// Item has been returned to its owner.
    Claimed,
}

impl ItemStatus {
    /// Returns the persisted and wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Claimed => "CLAIMED",
        }
    }

    /// Parses a persisted label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "ACTIVE" => Some(Self::Active),
            "CLAIMED" => Some(Self::Claimed),
            _ => None,
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: New Items
// ============================================================================

/// Validated submission ready to be persisted.
///
/// # Invariants
/// - Every field is trimmed of leading and trailing characters at or below
///   U+0020 (ASCII controls and space). Other Unicode spaces are kept.
/// - `title`, `item_type`, `contact_name`, and `contact_phone` are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    /// Short item title.
    title: String,
    /// Free-form description; may be empty.
    description: String,
    /// Report kind (conventionally `LOST` or `FOUND`, not enforced).
    item_type: String,
    /// Where the item was lost or found; may be empty.
    location: String,
    /// Reporter name.
    contact_name: String,
    /// Reporter phone number.
    contact_phone: String,
}

impl NewItem {
    /// Builds a validated submission from raw field values.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::MissingRequiredFields`] naming every required
    /// field that is empty after trimming.
    pub fn new(
        title: &str,
        description: &str,
        item_type: &str,
        location: &str,
        contact_name: &str,
        contact_phone: &str,
    ) -> Result<Self, SubmissionError> {
        let item = Self {
            title: trim_field(title).to_string(),
            description: trim_field(description).to_string(),
            item_type: trim_field(item_type).to_string(),
            location: trim_field(location).to_string(),
            contact_name: trim_field(contact_name).to_string(),
            contact_phone: trim_field(contact_phone).to_string(),
        };
        let missing: Vec<&'static str> = [
            (FIELD_TITLE, item.title.as_str()),
            (FIELD_TYPE, item.item_type.as_str()),
            (FIELD_CONTACT_NAME, item.contact_name.as_str()),
            (FIELD_CONTACT_PHONE, item.contact_phone.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();
        if !missing.is_empty() {
            return Err(SubmissionError::MissingRequiredFields(missing));
        }
        Ok(item)
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the report kind.
    #[must_use]
    pub fn item_type(&self) -> &str {
        &self.item_type
    }

    /// Returns the location.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns the contact name.
    #[must_use]
    pub fn contact_name(&self) -> &str {
        &self.contact_name
    }

    /// Returns the contact phone number.
    #[must_use]
    pub fn contact_phone(&self) -> &str {
        &self.contact_phone
    }
}

/// Strips leading and trailing characters at or below U+0020.
fn trim_field(value: &str) -> &str {
    value.trim_matches(|ch: char| ch <= ' ')
}

// ============================================================================
// SECTION: Persisted Items
// ============================================================================

/// Persisted item record as returned by stores and listed over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Store-assigned identifier.
    pub id: ItemId,
    /// Short item title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Report kind.
    #[serde(rename = "type")]
    pub item_type: String,
    /// Where the item was lost or found.
    pub location: String,
    /// Reporter name.
    pub contact_name: String,
    /// Reporter phone number.
    pub contact_phone: String,
    /// Lifecycle status.
    pub status: ItemStatus,
    /// When the report was stored.
    pub date_reported: Timestamp,
}

impl Item {
    /// Builds a freshly stored record from a validated submission.
    #[must_use]
    pub fn from_new(id: ItemId, item: &NewItem, date_reported: Timestamp) -> Self {
        Self {
            id,
            title: item.title.clone(),
            description: item.description.clone(),
            item_type: item.item_type.clone(),
            location: item.location.clone(),
            contact_name: item.contact_name.clone(),
            contact_phone: item.contact_phone.clone(),
            status: ItemStatus::Active,
            date_reported,
        }
    }
}
