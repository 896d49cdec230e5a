#![allow(dead_code)]

use ops_auth::{JwtValidator, OpenTokenValidator, TokenValidator};
use ops_hub::{AppState, EventHub, HubConfig, ShutdownCoordinator};

use std::sync::Arc;

use axum::{Router, routing::get};
use axum_test::TestServer;
use tokio::time::{Duration, sleep, timeout};

/// Default JWT secret for all tests (HS256 requires at least 32 bytes)
pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-integration-tests-min-32-bytes-long";

/// Configuration for test hub instances
#[derive(Debug, Clone)]
pub struct TestServerConfig {
    /// `None` accepts any non-empty token
    pub jwt_secret: Option<Vec<u8>>,
    pub hub: HubConfig,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Some(TEST_JWT_SECRET.to_vec()),
            hub: HubConfig::default(),
        }
    }
}

impl TestServerConfig {
    pub fn with_hub(hub: HubConfig) -> Self {
        Self {
            hub,
            ..Default::default()
        }
    }

    pub fn with_open_auth() -> Self {
        Self {
            jwt_secret: None,
            ..Default::default()
        }
    }
}

/// Router plus the state behind it
pub struct TestApp {
    pub router: Router,
    pub app_state: AppState,
}

impl TestApp {
    pub fn hub(&self) -> &EventHub {
        &self.app_state.hub
    }

    pub fn validator(&self) -> &dyn TokenValidator {
        self.app_state.validator.as_ref()
    }
}

pub fn create_test_app() -> TestApp {
    create_test_app_with_config(TestServerConfig::default())
}

pub fn create_test_app_with_config(config: TestServerConfig) -> TestApp {
    let validator: Arc<dyn TokenValidator> = match config.jwt_secret {
        Some(secret) => Arc::new(JwtValidator::with_hs256(&secret)),
        None => Arc::new(OpenTokenValidator::new()),
    };

    let app_state = AppState {
        hub: EventHub::start(config.hub),
        validator,
        shutdown: ShutdownCoordinator::new(),
    };

    let router = Router::new()
        .route("/events", get(ops_hub::handler))
        .with_state(app_state.clone());

    TestApp { router, app_state }
}

/// axum-test server for requests that complete (rejections)
pub fn create_test_server(app: &TestApp) -> TestServer {
    TestServer::builder()
        .http_transport()
        .build(app.router.clone())
        .expect("Failed to create test server")
}

/// Wait until the dispatcher has processed pending registrations
pub async fn wait_for_count(hub: &EventHub, expected: usize) {
    timeout(Duration::from_secs(5), async {
        while hub.count() != expected {
            sleep(Duration::from_millis(2)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("count stuck at {}, expected {expected}", hub.count()));
}
