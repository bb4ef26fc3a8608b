// crates/lost-found-server/src/server.rs
// ============================================================================
// Module: Item Registry Server
// Description: HTTP routing and handlers for the item registry.
// Purpose: Serve ping, list, create, and claim over a fixed routing table.
// Dependencies: lost-found-core, lost-found-config, axum, tokio, tracing
// ============================================================================

//! ## Overview
//! [`ItemServer`] builds its routing table once from configuration and hands
//! it to the listener. Three paths are routable:
//!
//! | Path | Methods |
//! |---|---|
//! | `/api/ping` | `GET` |
//! | `/api/items` | `GET`, `POST` |
//! | `/api/items/claim` | `POST` |
//!
//! `OPTIONS` on any of them is answered as a preflight (204, no body) without
//! reaching a handler. Any other method on a known path is 405 and unknown
//! paths are 404, both with empty bodies. Client-visible failures carry fixed
//! messages; store error detail goes to the log only.
//! Security posture: request bodies are untrusted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::future::Future;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::Response;
use axum::routing::MethodRouter;
use axum::routing::get;
use axum::routing::post;
use http_body_util::LengthLimitError;
use lost_found_config::ItemStoreType;
use lost_found_config::LostFoundConfig;
use lost_found_core::FIELD_ID;
use lost_found_core::InMemoryItemStore;
use lost_found_core::ItemStatus;
use lost_found_core::ItemStore;
use lost_found_core::NewItem;
use lost_found_core::SharedItemStore;
use lost_found_core::StoreError;
use lost_found_core::parse_item_id;
use lost_found_store_sqlite::SqliteItemStore;
use tokio::net::TcpListener;

use crate::audit::AuditSink;
use crate::audit::FileAuditSink;
use crate::audit::NoopAuditSink;
use crate::audit::StderrAuditSink;
use crate::audit::audit_request;
use crate::envelope::CorsPolicy;
use crate::envelope::MSG_ALIVE;
use crate::envelope::MSG_BODY_TOO_LARGE;
use crate::envelope::MSG_BODY_UNREADABLE;
use crate::envelope::MSG_CLAIM_FAILED;
use crate::envelope::MSG_INVALID_ID;
use crate::envelope::MSG_ITEM_CLAIMED;
use crate::envelope::MSG_ITEM_SAVED;
use crate::envelope::MSG_LOAD_FAILED;
use crate::envelope::MSG_MISSING_FIELDS;
use crate::envelope::MSG_SAVE_FAILED;
use crate::envelope::PingPayload;
use crate::envelope::ack_response;
use crate::envelope::apply_cors;
use crate::envelope::empty_response;
use crate::envelope::json_response;
use crate::form::parse_form;

// ============================================================================
// SECTION: Routes
// ============================================================================

/// Health check path.
pub const PING_PATH: &str = "/api/ping";
/// Item collection path.
pub const ITEMS_PATH: &str = "/api/items";
/// Item claim path.
pub const CLAIM_PATH: &str = "/api/items/claim";

// ============================================================================
// SECTION: Item Server
// ============================================================================

/// Item registry HTTP server.
pub struct ItemServer {
    /// Listener address from configuration.
    bind: SocketAddr,
    /// Shared handler state.
    state: Arc<ServerState>,
}

impl ItemServer {
    /// Builds a server from configuration, opening the configured store.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when configuration is invalid or the store or
    /// audit sink cannot be opened.
    pub fn from_config(mut config: LostFoundConfig) -> Result<Self, ServerError> {
        config.validate().map_err(|err| ServerError::Config(err.to_string()))?;
        let store = build_item_store(&config)?;
        Self::with_store(&config, store)
    }

    /// Builds a server from configuration around an existing store.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when the bind address, CORS origin, or audit
    /// sink is invalid.
    pub fn with_store(
        config: &LostFoundConfig,
        store: SharedItemStore,
    ) -> Result<Self, ServerError> {
        let bind = config.server.bind_addr().map_err(|err| ServerError::Config(err.to_string()))?;
        let cors = CorsPolicy::for_origin(&config.server.cors.allowed_origin)
            .map_err(ServerError::Config)?;
        let audit = build_audit_sink(config)?;
        Ok(Self {
            bind,
            state: Arc::new(ServerState {
                store,
                cors,
                max_body_bytes: config.server.max_body_bytes,
                audit,
            }),
        })
    }

    /// Returns the configured listener address.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind
    }

    /// Returns the routing table for this server.
    #[must_use]
    pub fn router(&self) -> Router {
        build_router(Arc::clone(&self.state))
    }

    /// Binds the configured address and serves until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Transport`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        let listener = TcpListener::bind(self.bind)
            .await
            .map_err(|err| ServerError::Transport(format!("http bind failed: {err}")))?;
        self.serve_listener(listener, shutdown_signal()).await
    }

    /// Serves on an already bound listener until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Transport`] when serving fails.
    pub async fn serve_listener<F>(
        self,
        listener: TcpListener,
        shutdown: F,
    ) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local = listener
            .local_addr()
            .map_err(|err| ServerError::Transport(format!("listener address unavailable: {err}")))?;
        if let Err(err) = self.state.store.readiness() {
            tracing::warn!(error = %err, "item store not ready at startup");
        }
        tracing::info!(%local, "lost & found backend listening");
        let app = self.router();
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|err| ServerError::Transport(format!("http server failed: {err}")))?;
        tracing::info!("lost & found backend stopped");
        Ok(())
    }
}

/// Builds the item store from configuration.
///
/// # Errors
///
/// Returns [`ServerError`] when the sqlite backend lacks a path or cannot be
/// opened.
pub fn build_item_store(config: &LostFoundConfig) -> Result<SharedItemStore, ServerError> {
    let store = match config.item_store.store_type {
        ItemStoreType::Memory => SharedItemStore::from_store(InMemoryItemStore::new()),
        ItemStoreType::Sqlite => {
            let sqlite_config = config.item_store.sqlite_config().ok_or_else(|| {
                ServerError::Config("sqlite item_store requires path".to_string())
            })?;
            let store = SqliteItemStore::new(sqlite_config)
                .map_err(|err| ServerError::Init(err.to_string()))?;
            SharedItemStore::from_store(store)
        }
    };
    Ok(store)
}

/// Builds the audit sink from configuration.
fn build_audit_sink(config: &LostFoundConfig) -> Result<Arc<dyn AuditSink>, ServerError> {
    let audit = &config.server.audit;
    if !audit.enabled {
        return Ok(Arc::new(NoopAuditSink));
    }
    match audit.path.as_deref() {
        Some(path) => {
            let sink = FileAuditSink::new(Path::new(path.trim()))
                .map_err(|err| ServerError::Init(format!("audit log open failed: {err}")))?;
            Ok(Arc::new(sink))
        }
        None => Ok(Arc::new(StderrAuditSink)),
    }
}

/// Resolves when the process receives Ctrl-C.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "ctrl-c handler unavailable; serving until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

// ============================================================================
// SECTION: Routing Table
// ============================================================================

/// Shared state for HTTP handlers.
struct ServerState {
    /// Item persistence.
    store: SharedItemStore,
    /// Cross-origin headers for every response.
    cors: CorsPolicy,
    /// Maximum allowed request body size.
    max_body_bytes: usize,
    /// Request audit sink.
    audit: Arc<dyn AuditSink>,
}

/// Builds the fixed routing table.
fn build_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route(PING_PATH, known_path(get(handle_ping).head(handle_method_not_allowed)))
        .route(
            ITEMS_PATH,
            known_path(
                get(handle_list_items).post(handle_create_item).head(handle_method_not_allowed),
            ),
        )
        .route(CLAIM_PATH, known_path(post(handle_claim_item)))
        .fallback(handle_not_found)
        .layer(middleware::from_fn_with_state(state.cors.clone(), apply_cors))
        .layer(middleware::from_fn_with_state(Arc::clone(&state.audit), audit_request))
        .with_state(state)
}

/// Adds preflight and method-rejection handling to a known path.
fn known_path(methods: MethodRouter<Arc<ServerState>>) -> MethodRouter<Arc<ServerState>> {
    methods.options(handle_preflight).fallback(handle_method_not_allowed)
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Handles `GET /api/ping`.
async fn handle_ping() -> Response {
    json_response(
        StatusCode::OK,
        &PingPayload {
            status: "ok",
            message: MSG_ALIVE,
        },
    )
}

/// Handles `GET /api/items`.
async fn handle_list_items(State(state): State<Arc<ServerState>>) -> Response {
    match with_blocking(|| state.store.list()) {
        Ok(items) => json_response(StatusCode::OK, &items),
        Err(err) => {
            tracing::error!(error = %err, "failed to load items");
            ack_response(StatusCode::INTERNAL_SERVER_ERROR, MSG_LOAD_FAILED)
        }
    }
}

/// Handles `POST /api/items`.
async fn handle_create_item(State(state): State<Arc<ServerState>>, body: Body) -> Response {
    let fields = match read_form(&state, body).await {
        Ok(fields) => fields,
        Err(response) => return response,
    };
    let item = match NewItem::from_fields(&fields) {
        Ok(item) => item,
        Err(err) => {
            tracing::debug!(error = %err, "rejected item submission");
            return ack_response(StatusCode::BAD_REQUEST, MSG_MISSING_FIELDS);
        }
    };
    match with_blocking(|| state.store.insert(&item)) {
        Ok(stored) => {
            tracing::info!(item_id = %stored.id, "item saved");
            ack_response(StatusCode::CREATED, MSG_ITEM_SAVED)
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to save item");
            ack_response(StatusCode::INTERNAL_SERVER_ERROR, MSG_SAVE_FAILED)
        }
    }
}

/// Handles `POST /api/items/claim`.
async fn handle_claim_item(State(state): State<Arc<ServerState>>, body: Body) -> Response {
    let fields = match read_form(&state, body).await {
        Ok(fields) => fields,
        Err(response) => return response,
    };
    let Ok(id) = parse_item_id(fields.get(FIELD_ID).map(String::as_str)) else {
        return ack_response(StatusCode::BAD_REQUEST, MSG_INVALID_ID);
    };
    match with_blocking(|| state.store.update_status(id, ItemStatus::Claimed)) {
        Ok(()) => {
            tracing::info!(item_id = %id, "item claimed");
            ack_response(StatusCode::OK, MSG_ITEM_CLAIMED)
        }
        Err(StoreError::NotFound(missing)) => {
            tracing::warn!(item_id = %missing, "claim target not found");
            ack_response(StatusCode::INTERNAL_SERVER_ERROR, MSG_CLAIM_FAILED)
        }
        Err(err) => {
            tracing::error!(item_id = %id, error = %err, "failed to update item status");
            ack_response(StatusCode::INTERNAL_SERVER_ERROR, MSG_CLAIM_FAILED)
        }
    }
}

/// Answers a cross-origin preflight.
async fn handle_preflight() -> Response {
    empty_response(StatusCode::NO_CONTENT)
}

/// Rejects an unsupported method on a known path.
async fn handle_method_not_allowed() -> Response {
    empty_response(StatusCode::METHOD_NOT_ALLOWED)
}

/// Rejects an unknown path.
async fn handle_not_found() -> Response {
    empty_response(StatusCode::NOT_FOUND)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads and decodes a form body within the configured size limit.
async fn read_form(
    state: &ServerState,
    body: Body,
) -> Result<std::collections::BTreeMap<String, String>, Response> {
    match axum::body::to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => Ok(parse_form(&bytes)),
        Err(err) => {
            let source = err.into_inner();
            if source.downcast_ref::<LengthLimitError>().is_some() {
                Err(ack_response(StatusCode::PAYLOAD_TOO_LARGE, MSG_BODY_TOO_LARGE))
            } else {
                tracing::debug!(error = %source, "request body read failed");
                Err(ack_response(StatusCode::BAD_REQUEST, MSG_BODY_UNREADABLE))
            }
        }
    }
}

/// Runs a store call, shifting to a blocking context when available.
fn with_blocking<T>(call: impl FnOnce() -> T) -> T {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == tokio::runtime::RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(call)
        }
        _ => call(),
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Item server errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================
