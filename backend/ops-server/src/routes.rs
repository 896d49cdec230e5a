use crate::{admin, health};

use ops_hub::AppState;

use std::time::Duration;

use axum::{
    BoxError, Router,
    error_handling::HandleErrorLayer,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceBuilder;
use tower::timeout::{TimeoutLayer, error::Elapsed};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
///
/// `request_timeout` bounds the time to a response head; event stream
/// bodies keep flowing after the head is sent.
pub fn build_router(
    state: AppState,
    metrics: Option<PrometheusHandle>,
    request_timeout: Duration,
) -> Router {
    Router::new()
        // Live event stream
        .route("/events", get(ops_hub::handler))
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        .route("/metrics", get(move || render_metrics(metrics.clone())))
        // Admin endpoints
        .route("/admin/events", post(admin::publish_handler))
        .route("/admin/shutdown", post(admin::shutdown_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// GET /metrics - Prometheus text exposition
async fn render_metrics(handle: Option<PrometheusHandle>) -> axum::response::Response {
    match handle {
        Some(handle) => handle.render().into_response(),
        None => (StatusCode::NOT_FOUND, "Metrics recorder not installed").into_response(),
    }
}

async fn handle_middleware_error(error: BoxError) -> (StatusCode, String) {
    if error.is::<Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "Request timed out".to_string())
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Unhandled internal error: {error}"),
        )
    }
}
