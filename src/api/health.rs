//! Health endpoints

use axum::Json;
use serde_json::{Value, json};

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn live_check() -> Json<Value> {
    Json(json!({ "status": "alive" }))
}
