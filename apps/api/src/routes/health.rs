use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version, and where the skill catalog came from.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let source = state.analyzer.catalog_source();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-parser",
        "catalog": if source.is_fallback() { "fallback" } else { "provider" },
        "providerConnected": source.provider().is_some(),
    }))
}
