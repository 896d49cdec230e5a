use crate::{HubError, Result as HubResult, SubscriberId};

use std::fmt;
use std::panic::Location;

use error_location::ErrorLocation;
use serde::Serialize;
use serde_json::{Value, json};

/// Longest accepted event kind, in bytes
pub const MAX_KIND_LENGTH: usize = 64;

/// Event name written on the `event:` line of a frame.
///
/// Non-empty, at most [`MAX_KIND_LENGTH`] bytes, and free of the characters
/// that would break SSE framing (`\n`, `\r`, `:`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EventKind(String);

impl EventKind {
    pub const ACK: &'static str = "ack";
    pub const ALERT: &'static str = "alert";
    pub const CONNECTED: &'static str = "connected";
    pub const HEALTH: &'static str = "health";
    pub const PING: &'static str = "ping";

    #[track_caller]
    pub fn parse(kind: impl Into<String>) -> HubResult<Self> {
        let kind = kind.into();

        let reason = if kind.is_empty() {
            Some("kind cannot be empty".to_string())
        } else if kind.len() > MAX_KIND_LENGTH {
            Some(format!("kind exceeds {MAX_KIND_LENGTH} bytes"))
        } else if kind.contains(['\n', '\r']) {
            Some("kind cannot contain line breaks".to_string())
        } else if kind.contains(':') {
            Some("kind cannot contain ':'".to_string())
        } else {
            None
        };

        match reason {
            Some(reason) => Err(HubError::InvalidKind {
                kind,
                reason,
                location: ErrorLocation::from(Location::caller()),
            }),
            None => Ok(Self(kind)),
        }
    }

    // Only for the built-in constants above.
    fn known(kind: &'static str) -> Self {
        Self(kind.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable `{kind, payload}` record fanned out by the hub
#[derive(Debug, Clone, PartialEq)]
pub struct HubEvent {
    kind: EventKind,
    payload: Value,
}

impl HubEvent {
    /// Build an event of any kind; unknown kinds are forwarded verbatim.
    #[track_caller]
    pub fn new<T: Serialize + ?Sized>(kind: &str, payload: &T) -> HubResult<Self> {
        let kind = EventKind::parse(kind)?;
        let payload = serde_json::to_value(payload).map_err(|e| HubError::PayloadEncode {
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self { kind, payload })
    }

    pub fn from_parts(kind: EventKind, payload: Value) -> Self {
        Self { kind, payload }
    }

    /// Payload is the alert record as given
    #[track_caller]
    pub fn alert<T: Serialize + ?Sized>(alert: &T) -> HubResult<Self> {
        Self::new(EventKind::ALERT, alert)
    }

    pub fn ack(alert_id: i64) -> Self {
        Self::from_parts(EventKind::known(EventKind::ACK), json!({ "alert_id": alert_id }))
    }

    pub fn ping(timestamp: i64) -> Self {
        Self::from_parts(EventKind::known(EventKind::PING), json!({ "timestamp": timestamp }))
    }

    pub fn health(app_id: i64, status: &str) -> Self {
        Self::from_parts(
            EventKind::known(EventKind::HEALTH),
            json!({ "app_id": app_id, "status": status }),
        )
    }

    pub fn connected(client_id: &SubscriberId, timestamp: i64) -> Self {
        Self::from_parts(
            EventKind::known(EventKind::CONNECTED),
            json!({ "client_id": client_id.as_str(), "timestamp": timestamp }),
        )
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }
}
