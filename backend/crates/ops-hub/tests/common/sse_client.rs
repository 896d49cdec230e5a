#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tokio::time::{Duration, timeout};
use tower::ServiceExt;

/// One parsed `event:`/`data:` frame
#[derive(Debug, Clone)]
pub struct SseFrame {
    pub event: String,
    pub data: Value,
    pub raw: String,
}

impl SseFrame {
    pub fn parse(raw: &str) -> Self {
        let mut event = String::new();
        let mut data = Value::Null;
        for line in raw.lines() {
            if let Some(kind) = line.strip_prefix("event: ") {
                event = kind.to_string();
            } else if let Some(json) = line.strip_prefix("data: ") {
                data = serde_json::from_str(json).expect("data line should be JSON");
            }
        }

        Self {
            event,
            data,
            raw: raw.to_string(),
        }
    }
}

/// Streaming client driving the router in-process, one body chunk per frame
pub struct SseClient {
    pub status: StatusCode,
    pub headers: HeaderMap,
    body: Body,
}

impl SseClient {
    pub async fn connect(router: &Router, token: &str) -> Self {
        Self::request(router, &format!("/events?token={token}")).await
    }

    pub async fn request(router: &Router, uri: &str) -> Self {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        let (parts, body) = response.into_parts();

        Self {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }

    /// Next frame, panicking after 5 s
    pub async fn next_frame(&mut self) -> SseFrame {
        self.next_frame_within(Duration::from_secs(5))
            .await
            .expect("Timed out waiting for frame")
    }

    /// `None` if nothing arrives in time
    pub async fn next_frame_within(&mut self, wait: Duration) -> Option<SseFrame> {
        let frame = timeout(wait, self.body.frame()).await.ok()?;
        let chunk = frame
            .expect("Stream ended")
            .expect("Body error")
            .into_data()
            .expect("Expected a data frame");

        Some(SseFrame::parse(
            std::str::from_utf8(&chunk).expect("Frame is not UTF-8"),
        ))
    }
}
