// crates/lost-found-server/src/audit.rs
// ============================================================================
// Module: Request Audit Logging
// Description: Structured audit events for HTTP request handling.
// Purpose: Emit one JSON line per request without hard dependencies.
// Dependencies: axum, serde, serde_json
// ============================================================================

//! ## Overview
//! This module defines the per-request audit payload and the sinks that
//! receive it. Events carry request metadata only; bodies and contact
//! details never reach the audit log.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Instant;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use axum::extract::ConnectInfo;
use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Request outcome classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestOutcome {
    /// 1xx, 2xx, and 3xx responses.
    Ok,
    /// 4xx responses.
    ClientError,
    /// 5xx responses.
    ServerError,
}

impl RequestOutcome {
    /// Classifies a response status.
    #[must_use]
    pub fn from_status(status: StatusCode) -> Self {
        if status.is_server_error() {
            Self::ServerError
        } else if status.is_client_error() {
            Self::ClientError
        } else {
            Self::Ok
        }
    }
}

/// HTTP request audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct RequestAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// HTTP method.
    pub method: String,
    /// Request path without query.
    pub path: String,
    /// Response status code.
    pub status: u16,
    /// Request outcome.
    pub outcome: RequestOutcome,
    /// Handling time in milliseconds.
    pub duration_ms: u64,
    /// Peer IP address when available.
    pub peer_ip: Option<String>,
}

/// Inputs for building a [`RequestAuditEvent`].
#[derive(Debug, Clone)]
pub struct RequestAuditEventParams {
    /// HTTP method.
    pub method: String,
    /// Request path without query.
    pub path: String,
    /// Response status.
    pub status: StatusCode,
    /// Handling time in milliseconds.
    pub duration_ms: u64,
    /// Peer IP address when available.
    pub peer_ip: Option<String>,
}

impl RequestAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: RequestAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "item_request",
            timestamp_ms,
            method: params.method,
            path: params.path,
            status: params.status.as_u16(),
            outcome: RequestOutcome::from_status(params.status),
            duration_ms: params.duration_ms,
            peer_ip: params.peer_ip,
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for request events.
pub trait AuditSink: Send + Sync {
    /// Records a request audit event.
    fn record(&self, event: &RequestAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record(&self, event: &RequestAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for FileAuditSink {
    fn record(&self, event: &RequestAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &RequestAuditEvent) {}
}

// ============================================================================
// SECTION: Middleware
// ============================================================================

/// Middleware that records one audit event per request.
pub(crate) async fn audit_request(
    State(sink): State<Arc<dyn AuditSink>>,
    request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let peer_ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(peer)| peer.ip().to_string());
    let response = next.run(request).await;
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    sink.record(&RequestAuditEvent::new(RequestAuditEventParams {
        method,
        path,
        status: response.status(),
        duration_ms,
        peer_ip,
    }));
    response
}
