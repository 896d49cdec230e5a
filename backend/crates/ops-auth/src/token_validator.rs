use crate::{Claims, Result as AuthErrorResult};

/// Opaque token check used by the stream and admin endpoints.
pub trait TokenValidator: Send + Sync {
    /// Validate a token and return the caller's claims
    fn validate(&self, token: &str) -> AuthErrorResult<Claims>;

    /// Scheme name for logging
    fn scheme(&self) -> &str;
}
