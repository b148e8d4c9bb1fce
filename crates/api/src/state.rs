//! Application state shared across handlers.

use jetstream::EventPublisher;
use std::sync::Arc;

/// Shared application state.
///
/// The producer boundary holds nothing but the queue: it never talks to
/// storage or the recognition service.
#[derive(Clone)]
pub struct AppState {
    /// Event publisher (JetStream in production, mock in tests)
    pub publisher: Arc<dyn EventPublisher>,
}

impl AppState {
    pub fn new(publisher: Arc<dyn EventPublisher>) -> Self {
        Self { publisher }
    }
}
