use crate::{AuthError, Claims, Result as AuthErrorResult, TokenValidator};

use std::panic::Location;

use error_location::ErrorLocation;

const ANONYMOUS_SUBJECT: &str = "anonymous";

/// Accepts any non-empty token. Used when `auth.enabled` is false
/// (local/desktop deployments).
#[derive(Debug, Clone, Default)]
pub struct OpenTokenValidator;

impl OpenTokenValidator {
    pub fn new() -> Self {
        Self
    }
}

impl TokenValidator for OpenTokenValidator {
    #[track_caller]
    fn validate(&self, token: &str) -> AuthErrorResult<Claims> {
        if token.trim().is_empty() {
            return Err(AuthError::MissingToken {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        log::debug!("Open validator accepted token without verification");

        Ok(Claims {
            sub: ANONYMOUS_SUBJECT.to_string(),
            exp: 0,
            iat: 0,
            roles: vec![],
        })
    }

    fn scheme(&self) -> &str {
        "open"
    }
}
