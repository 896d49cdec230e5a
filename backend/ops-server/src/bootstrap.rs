use crate::error::{Result as ServerErrorResult, ServerError};

use ops_auth::{JwtValidator, OpenTokenValidator, TokenValidator};
use ops_config::{AuthConfig, EventStreamConfig};
use ops_hub::HubConfig;

use std::panic::Location;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use error_location::ErrorLocation;
use log::{info, warn};

/// Pick the token validator for the configured auth mode.
///
/// Expects a config that passed `Config::validate`.
#[track_caller]
pub fn build_validator(
    auth: &AuthConfig,
    config_dir: &Path,
) -> ServerErrorResult<Arc<dyn TokenValidator>> {
    if !auth.enabled {
        warn!("Authentication DISABLED - any non-empty stream token is accepted");
        return Ok(Arc::new(OpenTokenValidator::new()));
    }

    if let Some(ref secret) = auth.jwt_secret {
        info!("JWT: HS256 authentication enabled");
        return Ok(Arc::new(JwtValidator::with_hs256(secret.as_bytes())));
    }

    match auth.jwt_public_key_path {
        Some(ref key_path) => {
            let full_path = config_dir.join(key_path);
            let public_key =
                std::fs::read_to_string(&full_path).map_err(|e| ServerError::JwtKeyFile {
                    path: full_path.display().to_string(),
                    source: e,
                    location: ErrorLocation::from(Location::caller()),
                })?;
            info!("JWT: RS256 authentication enabled");
            Ok(Arc::new(JwtValidator::with_rs256(&public_key)?))
        }
        None => Err(ops_config::ConfigError::invalid(
            ops_config::ConfigSection::Auth,
            "auth.enabled requires auth.jwt_secret or auth.jwt_public_key_path",
        )
        .into()),
    }
}

pub fn hub_config(event_stream: &EventStreamConfig) -> HubConfig {
    HubConfig {
        mailbox_capacity: event_stream.mailbox_capacity,
        broadcast_capacity: event_stream.broadcast_capacity,
        heartbeat_interval: Duration::from_secs(event_stream.heartbeat_interval_secs),
        id_prefix: event_stream.id_prefix.clone(),
    }
}
