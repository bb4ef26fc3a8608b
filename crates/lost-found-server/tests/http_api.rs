// crates/lost-found-server/tests/http_api.rs
// ============================================================================
// Module: HTTP API Tests
// Description: End-to-end tests for the item registry over real sockets.
// Purpose: Exercise ping, list, create, claim, and the envelope via reqwest.
// Dependencies: lost-found-server, reqwest, tokio
// ============================================================================

//! ## Overview
//! Each test binds an ephemeral port, serves the registry until a shutdown
//! signal fires, and drives it with a plain HTTP client.

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

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;

use lost_found_config::ItemStoreType;
use lost_found_config::LostFoundConfig;
use lost_found_core::InMemoryItemStore;
use lost_found_core::SharedItemStore;
use lost_found_server::ItemServer;
use lost_found_server::build_item_store;
use reqwest::Method;
use serde_json::Value;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

// ============================================================================
// SECTION: Harness
// ============================================================================

const FORM: &str = "application/x-www-form-urlencoded";
const ORIGIN: &str = "http://localhost:5173";

/// Running server with its shutdown trigger.
struct TestServer {
    base: String,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl TestServer {
    async fn start_with(config: &LostFoundConfig, store: SharedItemStore) -> Self {
        let server = ItemServer::with_store(config, store).unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            server
                .serve_listener(listener, async {
                    rx.await.ok();
                })
                .await
                .unwrap();
        });
        Self {
            base: format!("http://{addr}"),
            shutdown: Some(tx),
            task,
        }
    }

    async fn start() -> Self {
        Self::start_with(&quiet_config(), SharedItemStore::from_store(InMemoryItemStore::new()))
            .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.task.await.unwrap();
    }
}

fn quiet_config() -> LostFoundConfig {
    let mut config = LostFoundConfig::default();
    config.server.audit.enabled = false;
    config
}

async fn send(method: Method, url: &str, body: &str) -> reqwest::Response {
    reqwest::Client::new()
        .request(method, url)
        .header(reqwest::header::CONTENT_TYPE, FORM)
        .body(body.to_string())
        .send()
        .await
        .unwrap()
}

async fn json_body(response: reqwest::Response) -> Value {
    let text = response.text().await.unwrap();
    serde_json::from_str(&text).unwrap()
}

async fn list(server: &TestServer) -> Vec<Value> {
    let response = send(Method::GET, &server.url("/api/items"), "").await;
    assert_eq!(response.status(), 200);
    json_body(response).await.as_array().unwrap().clone()
}

fn assert_envelope(response: &reqwest::Response) {
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], ORIGIN);
    assert_eq!(headers["access-control-allow-methods"], "GET, POST, OPTIONS");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
}

const WALLET: &str = "title=Wallet&description=Brown+leather&type=LOST&location=Library&\
                      contactName=Jane&contactPhone=555-0100";

// ============================================================================
// SECTION: Ping
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn ping_reports_alive() {
    let server = TestServer::start().await;
    let response = send(Method::GET, &server.url("/api/ping"), "").await;
    assert_eq!(response.status(), 200);
    assert_envelope(&response);
    assert_eq!(response.headers()["content-type"], "application/json; charset=utf-8");
    assert_eq!(
        json_body(response).await,
        json!({"status": "ok", "message": "Lost & Found backend is alive"})
    );
    server.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn ping_ignores_query_string() {
    let server = TestServer::start().await;
    let response = send(Method::GET, &server.url("/api/ping?x=1"), "").await;
    assert_eq!(response.status(), 200);
    server.stop().await;
}

// ============================================================================
// SECTION: Items
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn empty_registry_lists_empty_array() {
    let server = TestServer::start().await;
    let response = send(Method::GET, &server.url("/api/items"), "").await;
    assert_eq!(response.status(), 200);
    assert_envelope(&response);
    assert_eq!(response.text().await.unwrap(), "[]");
    server.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn report_then_list_returns_the_item() {
    let server = TestServer::start().await;
    let response = send(Method::POST, &server.url("/api/items"), WALLET).await;
    assert_eq!(response.status(), 201);
    assert_envelope(&response);
    assert_eq!(
        json_body(response).await,
        json!({"success": true, "message": "Item saved successfully"})
    );

    let items = list(&server).await;
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item["title"], "Wallet");
    assert_eq!(item["description"], "Brown leather");
    assert_eq!(item["type"], "LOST");
    assert_eq!(item["location"], "Library");
    assert_eq!(item["contactName"], "Jane");
    assert_eq!(item["contactPhone"], "555-0100");
    assert_eq!(item["status"], "ACTIVE");
    server.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn list_is_newest_first_with_increasing_ids() {
    let server = TestServer::start().await;
    for title in ["Keys", "Umbrella", "Phone"] {
        let body = format!("title={title}&type=FOUND&contactName=Sam&contactPhone=1");
        assert_eq!(send(Method::POST, &server.url("/api/items"), &body).await.status(), 201);
    }
    let items = list(&server).await;
    let titles: Vec<&str> = items.iter().map(|item| item["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Phone", "Umbrella", "Keys"]);
    let ids: Vec<i64> = items.iter().map(|item| item["id"].as_i64().unwrap()).collect();
    assert!(ids.windows(2).all(|pair| pair[0] > pair[1]));
    server.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn values_are_trimmed_and_percent_decoded() {
    let server = TestServer::start().await;
    let body = "title=%20%20Blue%20Scarf%20&type=FOUND&contactName=Ana&contactPhone=+555%2B1+";
    assert_eq!(send(Method::POST, &server.url("/api/items"), body).await.status(), 201);
    let items = list(&server).await;
    assert_eq!(items[0]["title"], "Blue Scarf");
    assert_eq!(items[0]["contactPhone"], "555+1");
    assert_eq!(items[0]["description"], "");
    assert_eq!(items[0]["location"], "");
    server.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_required_field_is_rejected() {
    let server = TestServer::start().await;
    let bodies = [
        "type=LOST&contactName=Jane&contactPhone=1",
        "title=Wallet&contactName=Jane&contactPhone=1",
        "title=Wallet&type=LOST&contactPhone=1",
        "title=Wallet&type=LOST&contactName=Jane&contactPhone=%20",
        "",
    ];
    for body in bodies {
        let response = send(Method::POST, &server.url("/api/items"), body).await;
        assert_eq!(response.status(), 400, "{body:?}");
        assert_envelope(&response);
        assert_eq!(
            json_body(response).await,
            json!({"success": false, "message": "Missing required fields"})
        );
    }
    assert!(list(&server).await.is_empty());
    server.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn oversized_body_is_rejected() {
    let mut config = quiet_config();
    config.server.max_body_bytes = 64;
    let server =
        TestServer::start_with(&config, SharedItemStore::from_store(InMemoryItemStore::new()))
            .await;
    let body = format!("title={}&type=LOST&contactName=Jane&contactPhone=1", "x".repeat(128));
    let response = send(Method::POST, &server.url("/api/items"), &body).await;
    assert_eq!(response.status(), 413);
    assert_eq!(
        json_body(response).await,
        json!({"success": false, "message": "Request body too large"})
    );
    assert!(list(&server).await.is_empty());
    server.stop().await;
}

// ============================================================================
// SECTION: Claim
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn claim_marks_only_the_target_item() {
    let server = TestServer::start().await;
    send(Method::POST, &server.url("/api/items"), WALLET).await;
    send(Method::POST, &server.url("/api/items"), WALLET).await;
    let items = list(&server).await;
    let target = items[1]["id"].as_i64().unwrap();

    let response =
        send(Method::POST, &server.url("/api/items/claim"), &format!("id={target}")).await;
    assert_eq!(response.status(), 200);
    assert_envelope(&response);
    assert_eq!(
        json_body(response).await,
        json!({"success": true, "message": "Item marked as claimed"})
    );

    let items = list(&server).await;
    for item in &items {
        let expected = if item["id"].as_i64() == Some(target) { "CLAIMED" } else { "ACTIVE" };
        assert_eq!(item["status"], expected);
    }
    server.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn claim_with_non_numeric_id_is_rejected() {
    let server = TestServer::start().await;
    send(Method::POST, &server.url("/api/items"), WALLET).await;
    for body in ["id=abc", "id=", "", "id=1.5"] {
        let response = send(Method::POST, &server.url("/api/items/claim"), body).await;
        assert_eq!(response.status(), 400, "{body:?}");
        assert_eq!(
            json_body(response).await,
            json!({"success": false, "message": "Invalid item id"})
        );
    }
    assert_eq!(list(&server).await[0]["status"], "ACTIVE");
    server.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn claim_of_unknown_item_fails() {
    let server = TestServer::start().await;
    let response = send(Method::POST, &server.url("/api/items/claim"), "id=4242").await;
    assert_eq!(response.status(), 500);
    assert_envelope(&response);
    assert_eq!(
        json_body(response).await,
        json!({"success": false, "message": "Failed to update item status"})
    );
    server.stop().await;
}

// ============================================================================
// SECTION: Envelope
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn preflight_returns_no_content_without_side_effects() {
    let server = TestServer::start().await;
    for path in ["/api/ping", "/api/items", "/api/items/claim"] {
        let response = send(Method::OPTIONS, &server.url(path), WALLET).await;
        assert_eq!(response.status(), 204, "{path}");
        assert_envelope(&response);
        assert!(response.text().await.unwrap().is_empty());
    }
    assert!(list(&server).await.is_empty());
    server.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn wrong_method_on_known_path_is_405() {
    let server = TestServer::start().await;
    let cases = [
        (Method::DELETE, "/api/items"),
        (Method::PUT, "/api/items"),
        (Method::GET, "/api/items/claim"),
        (Method::POST, "/api/ping"),
    ];
    for (method, path) in cases {
        let response = send(method.clone(), &server.url(path), "").await;
        assert_eq!(response.status(), 405, "{method} {path}");
        assert_envelope(&response);
    }
    server.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_path_is_404() {
    let server = TestServer::start().await;
    let response = send(Method::GET, &server.url("/api/unknown"), "").await;
    assert_eq!(response.status(), 404);
    assert_envelope(&response);
    server.stop().await;
}

// ============================================================================
// SECTION: Persistence
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn sqlite_backend_persists_across_restarts() {
    let temp = tempfile::TempDir::new().unwrap();
    let mut config = quiet_config();
    config.item_store.store_type = ItemStoreType::Sqlite;
    config.item_store.path = Some(temp.path().join("items.db"));

    let server = TestServer::start_with(&config, build_item_store(&config).unwrap()).await;
    assert_eq!(send(Method::POST, &server.url("/api/items"), WALLET).await.status(), 201);
    assert_eq!(send(Method::POST, &server.url("/api/items/claim"), "id=1").await.status(), 200);
    server.stop().await;

    let server = TestServer::start_with(&config, build_item_store(&config).unwrap()).await;
    let items = list(&server).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Wallet");
    assert_eq!(items[0]["status"], "CLAIMED");
    server.stop().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn audit_log_records_one_line_per_request() {
    let temp = tempfile::TempDir::new().unwrap();
    let audit_path = temp.path().join("audit.log");
    let mut config = LostFoundConfig::default();
    config.server.audit.path = Some(audit_path.display().to_string());

    let server =
        TestServer::start_with(&config, SharedItemStore::from_store(InMemoryItemStore::new()))
            .await;
    send(Method::GET, &server.url("/api/ping"), "").await;
    send(Method::POST, &server.url("/api/items/claim"), "id=x").await;
    server.stop().await;

    let contents = std::fs::read_to_string(&audit_path).unwrap();
    let events: Vec<Value> =
        contents.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["event"], "item_request");
    assert_eq!(events[0]["path"], "/api/ping");
    assert_eq!(events[0]["status"], 200);
    assert_eq!(events[0]["outcome"], "ok");
    assert_eq!(events[1]["status"], 400);
    assert_eq!(events[1]["outcome"], "client_error");
    assert_eq!(events[1]["peer_ip"], "127.0.0.1");
}
