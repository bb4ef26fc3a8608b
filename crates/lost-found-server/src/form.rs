// crates/lost-found-server/src/form.rs
// ============================================================================
// Module: Form Decoding
// Description: Tolerant decoding of URL-encoded request bodies.
// Purpose: Turn raw body bytes into a field map without failing the request.
// Dependencies: url
// ============================================================================

//! ## Overview
//! Bodies are split on `&` and each pair on its first `=`. Keys and values
//! are percent-decoded with `+` read as a space. Pairs that cannot be decoded
//! are skipped rather than rejected:
//! - pairs without `=`
//! - pairs containing a `%` not followed by two hex digits
//!
//! When a key repeats, the last value wins. Invalid UTF-8 is replaced with
//! U+FFFD.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use url::form_urlencoded;

// ============================================================================
// SECTION: Decoding
// ============================================================================

/// Decodes a URL-encoded body into a field map.
#[must_use]
pub fn parse_form(body: &[u8]) -> BTreeMap<String, String> {
    let text = String::from_utf8_lossy(body);
    let mut fields = BTreeMap::new();
    for pair in text.split('&') {
        if !pair.contains('=') || !has_valid_escapes(pair) {
            continue;
        }
        if let Some((key, value)) = form_urlencoded::parse(pair.as_bytes()).next() {
            fields.insert(key.into_owned(), value.into_owned());
        }
    }
    fields
}

/// Returns true when every `%` starts a two-digit hex escape.
fn has_valid_escapes(pair: &str) -> bool {
    let bytes = pair.as_bytes();
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index] == b'%' {
            let escape = bytes.get(index + 1..index + 3);
            if !escape.is_some_and(|digits| digits.iter().all(u8::is_ascii_hexdigit)) {
                return false;
            }
            index += 3;
        } else {
            index += 1;
        }
    }
    true
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
