use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HubError {
    #[error("Invalid event kind '{kind}': {reason} {location}")]
    InvalidKind {
        kind: String,
        reason: String,
        location: ErrorLocation,
    },

    #[error("Payload encode failed: {source} {location}")]
    PayloadEncode {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    #[error("Response writer does not support incremental flushing {location}")]
    FlushUnsupported { location: ErrorLocation },

    #[error("Stream closed: {reason} {location}")]
    StreamClosed {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Event hub is not running {location}")]
    HubStopped { location: ErrorLocation },
}

impl HubError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidKind { .. } => "INVALID_KIND",
            Self::PayloadEncode { .. } => "ENCODE_ERROR",
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::FlushUnsupported { .. } => "STREAMING_UNSUPPORTED",
            Self::StreamClosed { .. } => "STREAM_CLOSED",
            Self::HubStopped { .. } => "HUB_STOPPED",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::InvalidKind { .. } | Self::PayloadEncode { .. } => StatusCode::BAD_REQUEST,
            Self::HubStopped { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::FlushUnsupported { .. } | Self::StreamClosed { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Client-facing message, without the source location.
    fn public_message(&self) -> String {
        match self {
            Self::InvalidKind { kind, reason, .. } => {
                format!("Invalid event kind '{kind}': {reason}")
            }
            Self::PayloadEncode { source, .. } => format!("Payload encode failed: {source}"),
            Self::Unauthorized { message, .. } => message.clone(),
            Self::FlushUnsupported { .. } => "Streaming unsupported".to_string(),
            Self::StreamClosed { reason, .. } => format!("Stream closed: {reason}"),
            Self::HubStopped { .. } => "Event hub is not running".to_string(),
        }
    }
}

impl IntoResponse for HubError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({
            "error": {
                "code": self.error_code(),
                "message": self.public_message(),
            }
        });

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, HubError>;
