#![allow(dead_code)]

//! Test infrastructure for ops-server API tests

use ops_auth::{JwtValidator, OpenTokenValidator, TokenValidator};
use ops_hub::{AppState, EventHub, HubConfig, ShutdownCoordinator};
use ops_server::build_router;

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum_test::TestServer;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-integration-tests-min-32-bytes-long";

#[derive(Serialize)]
struct TestClaims {
    sub: String,
    exp: u64,
    iat: u64,
}

pub fn create_test_token(subject: &str) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs();

    encode(
        &Header::default(),
        &TestClaims {
            sub: subject.to_string(),
            exp: now + 3600,
            iat: now,
        },
        &EncodingKey::from_secret(TEST_JWT_SECRET),
    )
    .expect("Failed to encode JWT")
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// AppState backed by a fresh hub and JWT (HS256) auth
pub fn create_test_app_state() -> AppState {
    create_app_state(Arc::new(JwtValidator::with_hs256(TEST_JWT_SECRET)))
}

/// AppState with auth disabled
pub fn create_open_app_state() -> AppState {
    create_app_state(Arc::new(OpenTokenValidator::new()))
}

fn create_app_state(validator: Arc<dyn TokenValidator>) -> AppState {
    AppState {
        hub: EventHub::start(HubConfig::default()),
        validator,
        shutdown: ShutdownCoordinator::new(),
    }
}

pub fn create_test_server(state: AppState) -> TestServer {
    let app = build_router(state, None, Duration::from_secs(60));
    TestServer::builder()
        .http_transport()
        .build(app)
        .expect("Failed to create test server")
}
