//! End-to-end pipeline tests: producer boundary → captured queue payload →
//! dispatch state machine → in-memory storage.
//!
//! The broker itself stays out of the loop; the dispatch classification is
//! a pure function over handler results, so redelivery semantics reduce to
//! asserting the chosen action.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use integration_tests::{
    fixtures,
    mocks::{MemoryStore, MockRecognizer},
    setup::TestContext,
};
use recognition::{PhotoAnalyzer, VerdictCache};
use worker::{classify, Action, EventHandler, GpsHandler, GyroscopeHandler, PhotoHandler};

fn photo_handler(store: Arc<MemoryStore>, recognizer: Arc<MockRecognizer>) -> PhotoHandler {
    PhotoHandler::new(Arc::new(PhotoAnalyzer::new(
        recognizer,
        store,
        VerdictCache::new(Duration::from_secs(60), 16),
    )))
}

/// Runs a payload through the producer boundary and returns the queued
/// message bytes.
async fn queue_through_api(path: &str, payload: String) -> Vec<u8> {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post(path)
        .content_type("application/json")
        .bytes(payload.into())
        .await;
    response.assert_status(StatusCode::ACCEPTED);

    ctx.publisher.published().remove(0).1
}

#[tokio::test]
async fn gyroscope_event_round_trips_into_storage() {
    let queued = queue_through_api("/telemetry/gyroscope", fixtures::gyroscope_payload("d1")).await;

    let store = Arc::new(MemoryStore::new());
    let handler = GyroscopeHandler::new(store.clone());

    let result = handler.handle(&queued).await;
    assert_eq!(classify(&result), Action::Ack);

    let rows = store.gyroscope.lock();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].device_id.as_deref(), Some("d1"));
    assert_eq!(rows[0].x, Some(1.0));
    assert_eq!(rows[0].y, Some(2.0));
    assert_eq!(rows[0].z, Some(3.0));
}

#[tokio::test]
async fn gps_event_round_trips_into_storage() {
    let queued = queue_through_api("/telemetry/gps", fixtures::gps_payload("gps-1")).await;

    let store = Arc::new(MemoryStore::new());
    let handler = GpsHandler::new(store.clone());

    let result = handler.handle(&queued).await;
    assert_eq!(classify(&result), Action::Ack);

    let rows = store.gps.lock();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].latitude, Some(-8.05));
}

#[tokio::test]
async fn malformed_queued_message_is_terminated() {
    let store = Arc::new(MemoryStore::new());
    let handler = GyroscopeHandler::new(store.clone());

    let result = handler.handle(b"** not json **").await;

    assert_eq!(classify(&result), Action::Term);
    assert!(store.gyroscope.lock().is_empty());
}

#[tokio::test]
async fn queued_message_missing_a_field_is_terminated() {
    // Defense against producers that bypass the HTTP boundary.
    let store = Arc::new(MemoryStore::new());
    let handler = GyroscopeHandler::new(store.clone());

    let result = handler
        .handle(fixtures::gyroscope_missing_z("d1").as_bytes())
        .await;

    assert_eq!(classify(&result), Action::Term);
    assert!(store.gyroscope.lock().is_empty());
}

#[tokio::test]
async fn storage_outage_requests_redelivery() {
    let store = Arc::new(MemoryStore::new());
    store.set_should_fail(true);
    let handler = GyroscopeHandler::new(store);

    let result = handler
        .handle(fixtures::gyroscope_payload("d1").as_bytes())
        .await;

    assert_eq!(classify(&result), Action::Retry);
}

#[tokio::test]
async fn recognized_photo_is_stored_true() {
    let queued =
        queue_through_api("/telemetry/photo", fixtures::photo_payload("cam-1", b"face")).await;

    let store = Arc::new(MemoryStore::new());
    let recognizer = Arc::new(MockRecognizer::matching());
    let handler = photo_handler(store.clone(), recognizer);

    let result = handler.handle(&queued).await;
    assert_eq!(classify(&result), Action::Ack);

    let rows = store.photos.lock();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].recognized);
}

#[tokio::test]
async fn same_photo_twice_searches_once() {
    let store = Arc::new(MemoryStore::new());
    let recognizer = Arc::new(MockRecognizer::matching());
    let handler = photo_handler(store.clone(), recognizer.clone());

    let payload = fixtures::photo_payload("cam-1", b"same face");

    let first = handler.handle(payload.as_bytes()).await;
    let second = handler.handle(payload.as_bytes()).await;

    assert_eq!(classify(&first), Action::Ack);
    assert_eq!(classify(&second), Action::Ack);

    // Cache hit on the second pass; one search, two persisted rows with
    // equal verdicts.
    assert_eq!(recognizer.search_calls(), 1);
    let rows = store.photos.lock();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].recognized, rows[1].recognized);
}

#[tokio::test]
async fn unmatched_photo_is_stored_false_and_enrolled() {
    let store = Arc::new(MemoryStore::new());
    let recognizer = Arc::new(MockRecognizer::unmatched());
    let handler = photo_handler(store.clone(), recognizer.clone());

    let result = handler
        .handle(fixtures::photo_payload("cam-1", b"stranger").as_bytes())
        .await;

    assert_eq!(classify(&result), Action::Ack);
    assert_eq!(recognizer.enroll_calls(), 1);
    assert!(!store.photos.lock()[0].recognized);
}

#[tokio::test]
async fn enrollment_failure_keeps_the_ack() {
    let store = Arc::new(MemoryStore::new());
    let recognizer = Arc::new(MockRecognizer::failing_enrollment());
    let handler = photo_handler(store.clone(), recognizer);

    let result = handler
        .handle(fixtures::photo_payload("cam-1", b"stranger").as_bytes())
        .await;

    // Verdict and disposition are unaffected by the failed enrollment.
    assert_eq!(classify(&result), Action::Ack);
    assert!(!store.photos.lock()[0].recognized);
}

#[tokio::test]
async fn recognition_outage_requests_redelivery() {
    let store = Arc::new(MemoryStore::new());
    let recognizer = Arc::new(MockRecognizer::failing_search());
    let handler = photo_handler(store.clone(), recognizer);

    let result = handler
        .handle(fixtures::photo_payload("cam-1", b"face").as_bytes())
        .await;

    assert_eq!(classify(&result), Action::Retry);
    assert!(store.photos.lock().is_empty());
}

#[tokio::test]
async fn producer_supplied_verdict_is_not_trusted() {
    let store = Arc::new(MemoryStore::new());
    let recognizer = Arc::new(MockRecognizer::unmatched());
    let handler = photo_handler(store.clone(), recognizer);

    // A producer claiming recognized=true on the wire.
    let payload = serde_json::json!({
        "device_id": "cam-1",
        "photo": "dGVzdA==",
        "timestamp": "2025-01-01T00:00:00Z",
        "recognized": true,
    });
    let result = handler.handle(payload.to_string().as_bytes()).await;

    assert_eq!(classify(&result), Action::Ack);
    // The engine's verdict wins.
    assert!(!store.photos.lock()[0].recognized);
}
