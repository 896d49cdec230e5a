use ops_hub::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - Component status and hub counters
pub async fn health(State(state): State<AppState>) -> Response {
    let running = state.hub.is_running();

    let health = json!({
        "status": if running { "healthy" } else { "stopping" },
        "version": env!("CARGO_PKG_VERSION"),
        "components": {
            "event_hub": if running { "operational" } else { "stopped" },
            "auth": state.validator.scheme(),
        },
        "hub": state.hub.stats(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(health)).into_response()
}

/// GET /live - Liveness probe
pub async fn liveness() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - Readiness probe; not ready once shutdown has begun
pub async fn readiness(State(state): State<AppState>) -> Response {
    if state.hub.is_running() && !state.shutdown.is_shutdown() {
        (StatusCode::OK, "Ready").into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "Not ready").into_response()
    }
}
