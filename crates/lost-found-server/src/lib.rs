// crates/lost-found-server/src/lib.rs
// ============================================================================
// Module: Lost & Found Server Library
// Description: HTTP transport for the lost and found item registry.
// Purpose: Expose ping, list, create, and claim operations over HTTP.
// Dependencies: lost-found-core, lost-found-config, axum, tokio
// ============================================================================

//! ## Overview
//! The server maps three fixed paths onto the item registry operations and
//! wraps every response in the same cross-origin envelope. Request bodies are
//! form encoded; responses are JSON. Persistence is injected through
//! [`lost_found_core::SharedItemStore`], so handlers run unchanged against the
//! in-memory or `SQLite` backend.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod envelope;
pub mod form;
pub mod server;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditSink;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::RequestAuditEvent;
pub use audit::StderrAuditSink;
pub use envelope::CorsPolicy;
pub use envelope::JSON_CONTENT_TYPE;
pub use form::parse_form;
pub use server::ItemServer;
pub use server::ServerError;
pub use server::build_item_store;
