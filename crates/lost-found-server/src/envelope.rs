// crates/lost-found-server/src/envelope.rs
// ============================================================================
// Module: Response Envelope
// Description: JSON payloads, framing, and cross-origin headers.
// Purpose: Give every response the same content type and CORS headers.
// Dependencies: axum, serde, serde_json
// ============================================================================

//! ## Overview
//! Every response leaving the server, including 404, 405, and 413, carries
//! the three fixed cross-origin headers produced by [`CorsPolicy`]. JSON
//! bodies are sent with an explicit `Content-Length`; preflight and
//! method-rejection responses have no body.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::body::Body;
use axum::extract::Request;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::http::header::ACCESS_CONTROL_ALLOW_HEADERS;
use axum::http::header::ACCESS_CONTROL_ALLOW_METHODS;
use axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
use axum::http::header::CONTENT_LENGTH;
use axum::http::header::CONTENT_TYPE;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Content type for every JSON response.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
/// Methods advertised to browsers.
const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
/// Request headers advertised to browsers.
const ALLOWED_HEADERS: &str = "Content-Type";

/// Ping success message.
pub(crate) const MSG_ALIVE: &str = "Lost & Found backend is alive";
/// Create success message.
pub(crate) const MSG_ITEM_SAVED: &str = "Item saved successfully";
/// Create validation failure message.
pub(crate) const MSG_MISSING_FIELDS: &str = "Missing required fields";
/// Create persistence failure message.
pub(crate) const MSG_SAVE_FAILED: &str = "Failed to save item";
/// Claim success message.
pub(crate) const MSG_ITEM_CLAIMED: &str = "Item marked as claimed";
/// Claim validation failure message.
pub(crate) const MSG_INVALID_ID: &str = "Invalid item id";
/// Claim persistence failure message.
pub(crate) const MSG_CLAIM_FAILED: &str = "Failed to update item status";
/// List persistence failure message.
pub(crate) const MSG_LOAD_FAILED: &str = "Failed to load items";
/// Oversized body message.
pub(crate) const MSG_BODY_TOO_LARGE: &str = "Request body too large";
/// Unreadable body message.
pub(crate) const MSG_BODY_UNREADABLE: &str = "Invalid request body";

// ============================================================================
// SECTION: Payloads
// ============================================================================

/// Health check payload.
#[derive(Debug, Serialize)]
pub(crate) struct PingPayload {
    /// Fixed liveness status.
    pub status: &'static str,
    /// Human-readable message.
    pub message: &'static str,
}

/// Acknowledgment payload for create, claim, and failures.
#[derive(Debug, Serialize)]
pub(crate) struct AckPayload {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Human-readable message.
    pub message: &'static str,
}

// ============================================================================
// SECTION: CORS
// ============================================================================

/// Cross-origin headers applied to every response.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    /// Value for `Access-Control-Allow-Origin`.
    allowed_origin: HeaderValue,
}

impl CorsPolicy {
    /// Builds a policy permitting a single origin.
    ///
    /// # Errors
    ///
    /// Returns the rejected origin when it is not a valid header value.
    pub fn for_origin(origin: &str) -> Result<Self, String> {
        HeaderValue::from_str(origin)
            .map(|allowed_origin| Self {
                allowed_origin,
            })
            .map_err(|_| format!("invalid cors origin: {origin}"))
    }

    /// Writes the three CORS headers, replacing any existing values.
    pub fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allowed_origin.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOWED_METHODS));
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOWED_HEADERS));
    }
}

/// Middleware that stamps the CORS headers onto every response.
pub(crate) async fn apply_cors(
    State(policy): State<CorsPolicy>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    policy.apply(response.headers_mut());
    response
}

// ============================================================================
// SECTION: Responses
// ============================================================================

/// Serializes `payload` as a JSON response with an explicit length.
pub(crate) fn json_response<T: Serialize>(status: StatusCode, payload: &T) -> Response {
    let Ok(bytes) = serde_json::to_vec(payload) else {
        return empty_response(StatusCode::INTERNAL_SERVER_ERROR);
    };
    let length = HeaderValue::from(bytes.len());
    let mut response = (status, Body::from(bytes)).into_response();
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    headers.insert(CONTENT_LENGTH, length);
    response
}

/// Builds a `{"success": .., "message": ..}` response.
pub(crate) fn ack_response(status: StatusCode, message: &'static str) -> Response {
    json_response(
        status,
        &AckPayload {
            success: status.is_success(),
            message,
        },
    )
}

/// Builds a response with no body.
pub(crate) fn empty_response(status: StatusCode) -> Response {
    (status, Body::empty()).into_response()
}
