#![allow(dead_code)]

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

/// JWT claims matching the ops-auth format
#[derive(Debug, Serialize, Deserialize)]
pub struct TestJwtClaims {
    pub sub: String,
    pub exp: u64,
    pub iat: u64,
}

/// Create a valid JWT token for testing
pub fn create_test_token(subject: &str, jwt_secret: &[u8]) -> String {
    create_test_token_with_expiry(subject, jwt_secret, Duration::from_secs(3600))
}

pub fn create_test_token_with_expiry(
    subject: &str,
    jwt_secret: &[u8],
    expires_in: Duration,
) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs();

    let claims = TestJwtClaims {
        sub: subject.to_string(),
        exp: now + expires_in.as_secs(),
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret),
    )
    .expect("Failed to encode JWT")
}

/// Create an expired JWT token (for auth rejection tests)
pub fn create_expired_token(subject: &str, jwt_secret: &[u8]) -> String {
    let past = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs()
        - 3600;

    let claims = TestJwtClaims {
        sub: subject.to_string(),
        exp: past,
        iat: past - 3600,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret),
    )
    .expect("Failed to encode JWT")
}
