// crates/lost-found-server/src/form/tests.rs
// ============================================================================
// Module: Form Decoding Tests
// Description: Unit tests for tolerant URL-encoded body decoding.
// Purpose: Pin skip-on-malformed behavior and percent decoding rules.
// Dependencies: lost-found-server, proptest
// ============================================================================

//! ## Overview
//! Exercises [`parse_form`] directly, independent of the HTTP transport.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use proptest::prelude::*;

use super::parse_form;

#[test]
fn decodes_simple_pairs() {
    let fields = parse_form(b"title=Wallet&type=LOST&contactName=Jane&contactPhone=555-0100");
    assert_eq!(fields.len(), 4);
    assert_eq!(fields["title"], "Wallet");
    assert_eq!(fields["contactPhone"], "555-0100");
}

#[test]
fn empty_body_yields_no_fields() {
    assert!(parse_form(b"").is_empty());
}

#[test]
fn plus_and_percent_escapes_are_decoded() {
    let fields = parse_form(b"title=Blue+Umbrella&location=Room%20101&note=caf%C3%A9");
    assert_eq!(fields["title"], "Blue Umbrella");
    assert_eq!(fields["location"], "Room 101");
    assert_eq!(fields["note"], "caf\u{e9}");
}

#[test]
fn keys_are_decoded() {
    let fields = parse_form(b"contact%4Eame=Jane");
    assert_eq!(fields["contactName"], "Jane");
}

#[test]
fn value_may_contain_equals_sign() {
    let fields = parse_form(b"description=a=b=c");
    assert_eq!(fields["description"], "a=b=c");
}

#[test]
fn pairs_without_equals_are_skipped() {
    let fields = parse_form(b"flag&title=Wallet&&");
    assert_eq!(fields.len(), 1);
    assert_eq!(fields["title"], "Wallet");
}

#[test]
fn malformed_escapes_skip_only_their_pair() {
    let fields = parse_form(b"title=100%&type=LOST&location=%zz&description=%4");
    assert_eq!(fields.len(), 1);
    assert_eq!(fields["type"], "LOST");
}

#[test]
fn empty_values_are_kept() {
    let fields = parse_form(b"title=&type=LOST");
    assert_eq!(fields["title"], "");
}

#[test]
fn last_repeated_key_wins() {
    let fields = parse_form(b"id=1&id=2");
    assert_eq!(fields["id"], "2");
}

#[test]
fn invalid_utf8_is_replaced() {
    let fields = parse_form(b"title=\xff&type=%FF");
    assert_eq!(fields["title"], "\u{fffd}");
    assert_eq!(fields["type"], "\u{fffd}");
}

proptest! {
    #[test]
    fn never_panics_on_arbitrary_bytes(body in proptest::collection::vec(any::<u8>(), 0..256)) {
        let _ = parse_form(&body);
    }

    #[test]
    fn encoded_values_decode_back(value in "\\PC{0,32}") {
        let encoded: String = url::form_urlencoded::byte_serialize(value.as_bytes()).collect();
        let body = format!("title={encoded}");
        let fields = parse_form(body.as_bytes());
        prop_assert_eq!(fields.get("title").map(String::as_str), Some(value.as_str()));
    }
}
