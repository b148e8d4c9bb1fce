//! JetStream publisher for validated telemetry events.

use async_nats::jetstream;
use async_trait::async_trait;
use observability::metrics;
use tracing::debug;

use pipeline_core::{Error, EventKind, Result};

/// Producer-side boundary to the durable queue.
///
/// The HTTP layer only ever talks to this trait, so tests swap the broker
/// for an in-memory capture.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes one serialized event onto the kind's subject, returning
    /// once the broker has durably acknowledged it.
    async fn publish(&self, kind: EventKind, payload: Vec<u8>) -> Result<()>;
}

/// Publisher backed by a JetStream context.
pub struct JetStreamPublisher {
    jetstream: jetstream::Context,
}

impl JetStreamPublisher {
    pub fn new(jetstream: jetstream::Context) -> Self {
        Self { jetstream }
    }
}

#[async_trait]
impl EventPublisher for JetStreamPublisher {
    async fn publish(&self, kind: EventKind, payload: Vec<u8>) -> Result<()> {
        let subject = kind.subject();

        debug!(subject, size_bytes = payload.len(), "Publishing event");

        let ack = self
            .jetstream
            .publish(subject, payload.into())
            .await
            .map_err(|e| Error::queue(format!("publish to {subject} failed: {e}")))?;

        // The 202 contract requires the message to be durably queued, not
        // merely written to the socket.
        ack.await
            .map_err(|e| Error::queue(format!("publish to {subject} not acknowledged: {e}")))?;

        metrics().events_published.inc();
        Ok(())
    }
}
