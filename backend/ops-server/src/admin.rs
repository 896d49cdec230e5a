//! Administrative endpoints, authenticated with `Authorization: Bearer`.

use ops_hub::{AppState, EventKind, HubError, HubEvent};

use std::panic::Location;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use error_location::ErrorLocation;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kinds only the hub itself may emit
const RESERVED_KINDS: [&str; 2] = [EventKind::CONNECTED, EventKind::PING];

#[derive(Debug, Deserialize)]
pub struct PublishRequest {
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
}

#[derive(Debug, Serialize)]
pub struct AdminResponse {
    pub status: String,
    pub message: String,
}

/// POST /admin/events - Publish an event to every connected stream
pub async fn publish_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<PublishRequest>,
) -> Result<(StatusCode, Json<AdminResponse>), HubError> {
    let claims = state.authorize(&headers)?;

    if RESERVED_KINDS.contains(&request.kind.as_str()) {
        return Err(HubError::InvalidKind {
            kind: request.kind,
            reason: "reserved for the hub".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let event = HubEvent::new(&request.kind, &request.payload)?;
    info!("Admin publish of '{}' by {}", event.kind(), claims.sub);
    state.hub.publish(event);

    Ok((
        StatusCode::ACCEPTED,
        Json(AdminResponse {
            status: "accepted".to_string(),
            message: format!("Event '{}' queued", request.kind),
        }),
    ))
}

/// POST /admin/shutdown - Begin graceful shutdown
pub async fn shutdown_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, HubError> {
    let claims = state.authorize(&headers)?;

    info!("Graceful shutdown requested via HTTP by {}", claims.sub);
    state.shutdown.shutdown();

    Ok(StatusCode::ACCEPTED)
}
