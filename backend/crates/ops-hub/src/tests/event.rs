use crate::{EventKind, HubError, HubEvent, MAX_KIND_LENGTH, SubscriberIdGenerator};

use googletest::prelude::*;
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
struct Alert {
    id: i64,
    title: String,
}

#[test]
fn given_custom_kind_when_event_created_then_kind_forwarded_verbatim() {
    // Given
    let payload = json!({ "deploy": "v2" });

    // When
    let event = HubEvent::new("deploy.finished", &payload).unwrap();

    // Then
    assert_that!(event.kind().as_str(), eq("deploy.finished"));
    assert_eq!(event.payload(), &payload);
}

#[test]
fn given_kind_with_colon_when_parsed_then_invalid_kind() {
    let result = EventKind::parse("alert:high");

    assert!(matches!(result, Err(HubError::InvalidKind { .. })));
}

#[test]
fn given_kind_with_newline_when_parsed_then_invalid_kind() {
    assert!(EventKind::parse("alert\ndata: x").is_err());
    assert!(EventKind::parse("alert\r").is_err());
}

#[test]
fn given_empty_kind_when_parsed_then_invalid_kind() {
    match EventKind::parse("") {
        Err(HubError::InvalidKind { reason, .. }) => assert!(reason.contains("empty")),
        other => panic!("expected InvalidKind, got {other:?}"),
    }
}

#[test]
fn given_kind_at_length_limit_when_parsed_then_accepted() {
    let at_limit = "k".repeat(MAX_KIND_LENGTH);
    let over_limit = "k".repeat(MAX_KIND_LENGTH + 1);

    assert!(EventKind::parse(at_limit).is_ok());
    assert!(EventKind::parse(over_limit).is_err());
}

#[test]
fn given_alert_record_when_alert_event_built_then_payload_is_record() {
    // Given
    let alert = Alert {
        id: 7,
        title: "x".to_string(),
    };

    // When
    let event = HubEvent::alert(&alert).unwrap();

    // Then
    assert_that!(event.kind().as_str(), eq(EventKind::ALERT));
    assert_eq!(event.payload(), &json!({ "id": 7, "title": "x" }));
}

#[test]
fn given_alert_id_when_ack_built_then_payload_has_alert_id() {
    let event = HubEvent::ack(3);

    assert_that!(event.kind().as_str(), eq("ack"));
    assert_eq!(event.payload(), &json!({ "alert_id": 3 }));
}

#[test]
fn given_timestamp_when_ping_built_then_payload_has_timestamp() {
    let event = HubEvent::ping(1_700_000_000);

    assert_that!(event.kind().as_str(), eq("ping"));
    assert_eq!(event.payload(), &json!({ "timestamp": 1_700_000_000 }));
}

#[test]
fn given_app_status_when_health_built_then_payload_has_app_and_status() {
    let event = HubEvent::health(12, "degraded");

    assert_that!(event.kind().as_str(), eq("health"));
    assert_eq!(event.payload(), &json!({ "app_id": 12, "status": "degraded" }));
}

#[test]
fn given_subscriber_id_when_connected_built_then_payload_has_client_id() {
    let id = SubscriberIdGenerator::new("client_").next_id();

    let event = HubEvent::connected(&id, 42);

    assert_that!(event.kind().as_str(), eq("connected"));
    assert_eq!(
        event.payload(),
        &json!({ "client_id": "client_1", "timestamp": 42 })
    );
}

#[test]
fn given_generator_when_ids_drawn_then_monotonic_with_prefix() {
    let ids = SubscriberIdGenerator::new("sub-");

    let first = ids.next_id();
    let second = ids.next_id();

    assert_that!(first.as_str(), eq("sub-1"));
    assert_that!(second.as_str(), eq("sub-2"));
    assert_ne!(first, second);
}
