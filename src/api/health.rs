use axum::response::Json;
use serde_json::{Value, json};

/// Liveness probe for the OAuth callback listener.
pub async fn health() -> Json<Value> {
    Json(json!({
        "service": "oauth-callback",
        "status": "ok",
        "client": format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
    }))
}
