//! Page shell and health routes.

use axum::{
    extract::State,
    response::{Html, Json},
};
use serde_json::{Value, json};
use tracing::warn;

use super::app_state::AppState;

/// Served when the configured template cannot be read.
const FALLBACK_SHELL: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Local Mermaid Studio</title>
    <style>
        body { font-family: sans-serif; padding: 2rem; max-width: 800px; margin: 0 auto; }
        .code { background: #f5f5f5; padding: 0.5rem; border-radius: 4px; font-family: monospace; }
    </style>
</head>
<body>
    <h1>Local Mermaid Studio</h1>
    <p>The API is running, but no page template was found.</p>
    <p>Set <span class="code">INDEX_TEMPLATE</span> to the editor's index.html.</p>
    <h2>API Endpoints</h2>
    <ul>
        <li><a href="/api/diagrams">/api/diagrams</a> - Stored diagrams</li>
        <li><a href="/api/openapi.json">/api/openapi.json</a> - OpenAPI document</li>
        <li><a href="/health">/health</a> - Health check</li>
    </ul>
</body>
</html>
"#;

/// GET / - Serve the editor page shell
pub async fn index(State(state): State<AppState>) -> Html<String> {
    match tokio::fs::read_to_string(&state.index_template).await {
        Ok(html) => Html(html),
        Err(e) => {
            warn!(
                "Page template {:?} unavailable ({}), serving fallback shell",
                state.index_template, e
            );
            Html(FALLBACK_SHELL.to_string())
        }
    }
}

/// GET /health - Liveness check
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "mermaid-studio",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
