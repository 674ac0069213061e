//! Diagram endpoint tests.
//!
//! Exercise the routes the editor page uses:
//! - POST /api/diagrams
//! - GET /api/diagrams
//! - GET /api/diagrams/search/{query}
//! - GET /api/diagrams/recent
//! - GET /api/diagrams/{id}
//! - PUT /api/diagrams/{id}
//! - DELETE /api/diagrams/{id}

use axum::http::StatusCode;
use axum_test::{TestResponse, TestServer};
use mermaid_studio::routes::{create_app_state, create_router};
use mermaid_studio::storage::{DiagramStore, SqliteDiagramStore};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

async fn create_test_server() -> (TempDir, TestServer) {
    let temp_dir = tempfile::tempdir().unwrap();
    let store = SqliteDiagramStore::connect_path(&temp_dir.path().join("diagrams.db"), 2)
        .await
        .unwrap();
    store.initialize().await.unwrap();

    let router = create_router(create_app_state(Arc::new(store)));
    (temp_dir, TestServer::new(router).unwrap())
}

/// Drop the diagrams table behind the server's back through a separate pool.
async fn drop_diagrams_table(dir: &TempDir) {
    let url = format!("sqlite://{}", dir.path().join("diagrams.db").display());
    let pool = sqlx::SqlitePool::connect(&url).await.unwrap();
    sqlx::query("DROP TABLE diagrams").execute(&pool).await.unwrap();
    pool.close().await;
}

fn assert_server_error(response: &TestResponse) {
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["status"], 500);
    assert!(!body["error"].as_str().unwrap().is_empty());
}

async fn create_diagram(server: &TestServer, title: &str, tags: Option<&str>) -> Value {
    let response = server
        .post("/api/diagrams")
        .json(&json!({"title": title, "content": "graph TD; A-->B", "tags": tags}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json()
}

async fn tick() {
    tokio::time::sleep(Duration::from_millis(5)).await;
}

fn titles(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|d| d["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_create_returns_full_record() {
    let (_dir, server) = create_test_server().await;

    let body = create_diagram(&server, "Flow1", Some("demo")).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["title"], "Flow1");
    assert_eq!(body["content"], "graph TD; A-->B");
    assert_eq!(body["tags"], "demo");
    assert_eq!(body["created_at"], body["updated_at"]);
}

#[tokio::test]
async fn test_create_without_tags() {
    let (_dir, server) = create_test_server().await;

    let response = server
        .post("/api/diagrams")
        .json(&json!({"title": "Plain", "content": "graph TD"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert!(body["tags"].is_null());
}

#[tokio::test]
async fn test_create_rejects_empty_title() {
    let (_dir, server) = create_test_server().await;

    let response = server
        .post("/api/diagrams")
        .json(&json!({"title": "", "content": "graph TD"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["status"], 422);

    // Nothing reached the store
    let list: Value = server.get("/api/diagrams").await.json();
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_rejects_missing_content() {
    let (_dir, server) = create_test_server().await;

    let response = server
        .post("/api/diagrams")
        .json(&json!({"title": "No content"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["status"], 422);
    assert!(body["error"].as_str().unwrap().contains("content"));
}

#[tokio::test]
async fn test_create_rejects_malformed_json() {
    let (_dir, server) = create_test_server().await;

    let response = server
        .post("/api/diagrams")
        .content_type("application/json")
        .bytes("{\"title\": ".into())
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_create_accepts_whitespace_title() {
    let (_dir, server) = create_test_server().await;

    let response = server
        .post("/api/diagrams")
        .json(&json!({"title": "  ", "content": "graph TD"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["title"], "  ");
}

#[tokio::test]
async fn test_list_orders_most_recent_first() {
    let (_dir, server) = create_test_server().await;

    let a = create_diagram(&server, "A", None).await;
    tick().await;
    create_diagram(&server, "B", None).await;

    let body: Value = server.get("/api/diagrams").await.json();
    assert_eq!(titles(&body), vec!["B", "A"]);

    tick().await;
    let response = server
        .put(&format!("/api/diagrams/{}", a["id"]))
        .json(&json!({"title": "A", "content": "graph LR"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = server.get("/api/diagrams").await.json();
    assert_eq!(titles(&body), vec!["A", "B"]);
}

#[tokio::test]
async fn test_get_by_id() {
    let (_dir, server) = create_test_server().await;

    let created = create_diagram(&server, "Lookup", Some("x")).await;
    let response = server.get(&format!("/api/diagrams/{}", created["id"])).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body, created);
}

#[tokio::test]
async fn test_get_missing_returns_404() {
    let (_dir, server) = create_test_server().await;

    let response = server.get("/api/diagrams/99").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "Diagram not found");
}

#[tokio::test]
async fn test_non_numeric_id_rejected() {
    let (_dir, server) = create_test_server().await;

    let response = server.get("/api/diagrams/abc").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_returns_updated_record() {
    let (_dir, server) = create_test_server().await;

    let created = create_diagram(&server, "Flow1", Some("demo")).await;
    tick().await;

    let response = server
        .put(&format!("/api/diagrams/{}", created["id"]))
        .json(&json!({"title": "Flow1b", "content": "graph TD; A-->C"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["id"], created["id"]);
    assert_eq!(body["title"], "Flow1b");
    assert_eq!(body["content"], "graph TD; A-->C");
    assert!(body["tags"].is_null());
    assert_eq!(body["created_at"], created["created_at"]);
    assert_ne!(body["updated_at"], created["updated_at"]);
}

#[tokio::test]
async fn test_update_missing_returns_404() {
    let (_dir, server) = create_test_server().await;

    let response = server
        .put("/api/diagrams/5")
        .json(&json!({"title": "Ghost", "content": "graph TD"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_rejects_empty_title() {
    let (_dir, server) = create_test_server().await;

    let created = create_diagram(&server, "Keep", None).await;
    let response = server
        .put(&format!("/api/diagrams/{}", created["id"]))
        .json(&json!({"title": "", "content": "graph TD"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = server
        .get(&format!("/api/diagrams/{}", created["id"]))
        .await
        .json();
    assert_eq!(body["title"], "Keep");
}

#[tokio::test]
async fn test_delete_then_404() {
    let (_dir, server) = create_test_server().await;

    let created = create_diagram(&server, "Doomed", None).await;
    let path = format!("/api/diagrams/{}", created["id"]);

    let response = server.delete(&path).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body, json!({"success": true}));

    assert_eq!(server.get(&path).await.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(server.delete(&path).await.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recent_empty_store_returns_404() {
    let (_dir, server) = create_test_server().await;

    let response = server.get("/api/diagrams/recent").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recent_is_not_shadowed_by_id_route() {
    let (_dir, server) = create_test_server().await;

    let first = create_diagram(&server, "First", None).await;
    tick().await;
    create_diagram(&server, "Second", None).await;

    let body: Value = server.get("/api/diagrams/recent").await.json();
    assert_eq!(body["title"], "Second");

    tick().await;
    server
        .put(&format!("/api/diagrams/{}", first["id"]))
        .json(&json!({"title": "First", "content": "graph LR"}))
        .await;

    let body: Value = server.get("/api/diagrams/recent").await.json();
    assert_eq!(body["title"], "First");
}

#[tokio::test]
async fn test_search_by_title_and_tags() {
    let (_dir, server) = create_test_server().await;

    create_diagram(&server, "foo chart", None).await;
    tick().await;
    create_diagram(&server, "Tagged", Some("foo,bar")).await;
    tick().await;
    create_diagram(&server, "Unrelated", Some("bar")).await;

    let response = server.get("/api/diagrams/search/foo").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(titles(&body), vec!["Tagged", "foo chart"]);
}

#[tokio::test]
async fn test_search_no_matches_returns_empty() {
    let (_dir, server) = create_test_server().await;

    create_diagram(&server, "Something", None).await;
    let response = server.get("/api/diagrams/search/zzz").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_decodes_path_segment() {
    let (_dir, server) = create_test_server().await;

    create_diagram(&server, "Order flow", None).await;
    create_diagram(&server, "Orders", None).await;

    let body: Value = server.get("/api/diagrams/search/order%20flow").await.json();
    assert_eq!(titles(&body), vec!["Order flow"]);
}

#[tokio::test]
async fn test_storage_failure_returns_500() {
    let (dir, server) = create_test_server().await;
    let created = create_diagram(&server, "Before", None).await;

    drop_diagrams_table(&dir).await;

    assert_server_error(&server.get("/api/diagrams").await);
    assert_server_error(&server.get("/api/diagrams/search/x").await);
    assert_server_error(&server.get(&format!("/api/diagrams/{}", created["id"])).await);
    assert_server_error(&server.get("/api/diagrams/recent").await);
    assert_server_error(
        &server
            .post("/api/diagrams")
            .json(&json!({"title": "After", "content": "graph TD"}))
            .await,
    );
    assert_server_error(
        &server
            .put(&format!("/api/diagrams/{}", created["id"]))
            .json(&json!({"title": "After", "content": "graph TD"}))
            .await,
    );
    assert_server_error(&server.delete(&format!("/api/diagrams/{}", created["id"])).await);

    let body: Value = server.get("/api/diagrams").await.json();
    assert!(body["error"].as_str().unwrap().contains("no such table"));
}

#[tokio::test]
async fn test_concrete_scenario() {
    let (_dir, server) = create_test_server().await;

    let created = create_diagram(&server, "Flow1", Some("demo")).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["created_at"], created["updated_at"]);

    tick().await;
    let response = server
        .put("/api/diagrams/1")
        .json(&json!({"title": "Flow1b", "content": "graph TD; A-->C"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let fetched: Value = server.get("/api/diagrams/1").await.json();
    assert_eq!(fetched["title"], "Flow1b");
    assert_ne!(fetched["updated_at"], fetched["created_at"]);

    assert_eq!(server.delete("/api/diagrams/1").await.status_code(), StatusCode::OK);
    assert_eq!(
        server.get("/api/diagrams/1").await.status_code(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        server.delete("/api/diagrams/1").await.status_code(),
        StatusCode::NOT_FOUND
    );
}
