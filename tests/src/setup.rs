//! Common test setup functions.

use api::{router, AppState};
use axum::Router;
use std::sync::Arc;

use jetstream::EventPublisher;

use crate::mocks::MockPublisher;

/// Test context for the producer boundary.
///
/// Exercises the real Axum router and handlers with a mock publisher in
/// place of the JetStream broker, so tests can assert on the messages
/// that would be queued.
pub struct TestContext {
    pub publisher: Arc<MockPublisher>,
    pub router: Router,
}

impl TestContext {
    pub fn new() -> Self {
        let publisher = Arc::new(MockPublisher::new());
        let state = AppState::new(publisher.clone() as Arc<dyn EventPublisher>);
        let router = router(state);

        Self { publisher, router }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
