//! Durable pull-consumer construction.

use async_nats::jetstream::{
    self,
    consumer::{pull, AckPolicy, PullConsumer},
};
use tracing::info;

use pipeline_core::{Error, EventKind, Result};

use crate::config::NatsConfig;

/// Creates (or resumes) the durable pull consumer for an event kind.
///
/// The durable name is fixed per subject, so a restarted worker picks up
/// from the last unacknowledged position instead of the stream start.
pub async fn durable_consumer(
    js: &jetstream::Context,
    config: &NatsConfig,
    kind: EventKind,
) -> Result<PullConsumer> {
    let durable = kind.durable_group();

    let consumer = js
        .create_consumer_on_stream(
            pull::Config {
                name: Some(durable.to_string()),
                durable_name: Some(durable.to_string()),
                filter_subject: kind.subject().to_string(),
                ack_policy: AckPolicy::Explicit,
                ack_wait: config.ack_wait_for(kind),
                ..Default::default()
            },
            config.stream.as_str(),
        )
        .await
        .map_err(|e| Error::queue(format!("failed to create consumer {durable}: {e}")))?;

    info!(
        stream = %config.stream,
        consumer = durable,
        subject = kind.subject(),
        ack_wait_secs = config.ack_wait_for(kind).as_secs(),
        "Durable consumer ready"
    );

    Ok(consumer)
}
