use crate::{ChannelWriter, EventHub, HubError, Result as HubResult, ShutdownCoordinator, open_stream};

use ops_auth::{Claims, TokenValidator};

use std::panic::Location;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use log::warn;
use serde::Deserialize;

/// Shared application state for the stream endpoint and admin routes
#[derive(Clone)]
pub struct AppState {
    pub hub: EventHub,
    pub validator: Arc<dyn TokenValidator>,
    pub shutdown: ShutdownCoordinator,
}

#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    pub token: Option<String>,
}

impl AppState {
    /// Validate the `Authorization: Bearer` header (admin routes)
    #[track_caller]
    pub fn authorize(&self, headers: &HeaderMap) -> HubResult<Claims> {
        let token = extract_bearer_token(headers)?;

        self.validator.validate(token).map_err(|e| {
            warn!("Bearer token rejected: {e}");
            HubError::Unauthorized {
                message: format!("Token rejected ({})", e.error_code()),
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }
}

/// GET /events?token= - Server-Sent Events stream
pub async fn handler(State(state): State<AppState>, Query(query): Query<StreamQuery>) -> Response {
    let (writer, body) = ChannelWriter::new();

    match open_stream(
        &state.hub,
        state.validator.as_ref(),
        query.token.as_deref(),
        writer,
    ) {
        Ok(session) => {
            tokio::spawn(session.run());
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/event-stream"),
                    (header::CACHE_CONTROL, "no-cache"),
                    (header::CONNECTION, "keep-alive"),
                ],
                body,
            )
                .into_response()
        }
        Err(e) => {
            warn!("Stream request rejected: {e}");
            e.into_response()
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
#[track_caller]
pub fn extract_bearer_token(headers: &HeaderMap) -> HubResult<&str> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| HubError::Unauthorized {
            message: "Missing Authorization header".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

    match auth_header.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(HubError::Unauthorized {
            message: "Expected 'Bearer <token>' authorization".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}
