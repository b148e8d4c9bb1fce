//! Consumer worker: drives one durable subject and applies dispositions.

use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use jetstream::{AckKind, Message, PullConsumer};
use observability::metrics;
use pipeline_core::{Error, EventKind, FailureClass, Result};

use crate::dispatch::{classify, Action};
use crate::handlers::EventHandler;

/// Worker that consumes one subject's deliveries and settles each message.
pub struct ConsumerWorker {
    kind: EventKind,
    consumer: PullConsumer,
    handler: Arc<dyn EventHandler>,
}

impl ConsumerWorker {
    pub fn new(kind: EventKind, consumer: PullConsumer, handler: Arc<dyn EventHandler>) -> Self {
        Self {
            kind,
            consumer,
            handler,
        }
    }

    /// Main run loop. Processes deliveries until cancelled; stream errors
    /// pause briefly and continue, since the broker owns redelivery.
    pub async fn run(&self, shutdown: CancellationToken) -> Result<()> {
        let mut messages = self
            .consumer
            .messages()
            .await
            .map_err(|e| Error::queue(format!("failed to open message stream: {e}")))?;

        info!(subject = self.kind.subject(), "Consumer worker starting");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!(subject = self.kind.subject(), "Consumer worker stopping");
                    break;
                }
                next = messages.next() => {
                    match next {
                        Some(Ok(message)) => self.process(message).await,
                        Some(Err(e)) => {
                            error!(subject = self.kind.subject(), error = %e, "Message stream error");
                            tokio::time::sleep(Duration::from_secs(1)).await;
                        }
                        None => {
                            warn!(subject = self.kind.subject(), "Message stream closed");
                            break;
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Handles one delivery: run the domain action, classify, settle.
    async fn process(&self, message: Message) {
        debug!(subject = self.kind.subject(), "Received message");

        let result = self.handler.handle(&message.payload).await;

        if let Err(ref e) = result {
            match e.class() {
                FailureClass::Validation => {
                    warn!(
                        subject = self.kind.subject(),
                        error = %e,
                        "Unprocessable message, terminating"
                    );
                }
                FailureClass::Infrastructure => {
                    error!(
                        subject = self.kind.subject(),
                        error = %e,
                        "Processing failed, requesting redelivery"
                    );
                }
            }
        }

        self.settle(message, classify(&result)).await;
    }

    /// Applies the terminal action to the delivery and records the outcome.
    async fn settle(&self, message: Message, action: Action) {
        let outcomes = metrics().outcomes(self.kind);

        let settled = match action {
            Action::Ack => {
                outcomes.success.inc();
                message.ack().await
            }
            Action::Retry => {
                outcomes.failed.inc();
                message.ack_with(AckKind::Nak(None)).await
            }
            Action::Term => {
                outcomes.terminated.inc();
                message.ack_with(AckKind::Term).await
            }
        };

        if let Err(e) = settled {
            // The ack wait window covers us: an unsettled message is
            // redelivered.
            warn!(
                subject = self.kind.subject(),
                action = ?action,
                error = %e,
                "Failed to settle message"
            );
        }
    }
}
