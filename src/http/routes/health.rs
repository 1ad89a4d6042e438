use crate::libs::messages::Message;
use axum::Json;
use serde_json::{json, Value};

/// Liveness check. Never touches the database.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": Message::HealthCheckOk.to_string(),
    }))
}
