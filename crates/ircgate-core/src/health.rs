use axum::Json;
use serde_json::{Value, json};

/// `GET /healthz`: process liveness.
pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `GET /readyz`: readiness to take traffic. Services that need a deeper
/// check (database ping, warm caches) mount their own handler instead.
pub async fn readyz() -> Json<Value> {
    Json(json!({ "status": "ready" }))
}
