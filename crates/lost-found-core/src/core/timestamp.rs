// crates/lost-found-core/src/core/timestamp.rs
// ============================================================================
// Module: Lost & Found Timestamps
// Description: Report timestamps attached to persisted items.
// Purpose: Provide a single RFC 3339 representation for storage and the wire.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Items carry the moment they were reported. Stores stamp the value at
//! insertion time; the wire and the `SQLite` backend both use RFC 3339 text in
//! UTC with whole-second precision.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Timestamp conversion failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// Input text is not a valid RFC 3339 timestamp.
    #[error("invalid rfc3339 timestamp: {0}")]
    Parse(String),
    /// Value cannot be rendered as RFC 3339.
    #[error("timestamp format error: {0}")]
    Format(String),
}

// ============================================================================
// SECTION: Time Values
// ============================================================================

/// Report timestamp for an item.
///
/// # Invariants
/// - Always normalized to UTC.
/// - Sub-second precision is dropped when stamped by [`Timestamp::now`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(#[serde(with = "time::serde::rfc3339")] OffsetDateTime);

impl Timestamp {
    /// Returns the current wall-clock time in UTC, truncated to whole seconds.
    #[must_use]
    pub fn now() -> Self {
        let now = OffsetDateTime::now_utc();
        Self(now.replace_nanosecond(0).unwrap_or(now))
    }

    /// Wraps an existing date-time, normalizing it to UTC.
    #[must_use]
    pub fn from_datetime(value: OffsetDateTime) -> Self {
        Self(value.to_offset(time::UtcOffset::UTC))
    }

    /// Parses RFC 3339 text.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError::Parse`] when the text is not RFC 3339.
    pub fn parse_rfc3339(value: &str) -> Result<Self, TimestampError> {
        OffsetDateTime::parse(value, &Rfc3339)
            .map(Self::from_datetime)
            .map_err(|err| TimestampError::Parse(err.to_string()))
    }

    /// Renders the timestamp as RFC 3339 text.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError::Format`] when the year is outside the RFC 3339 range.
    pub fn to_rfc3339(&self) -> Result<String, TimestampError> {
        self.0.format(&Rfc3339).map_err(|err| TimestampError::Format(err.to_string()))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_rfc3339() {
            Ok(text) => f.write_str(&text),
            Err(_) => self.0.fmt(f),
        }
    }
}
