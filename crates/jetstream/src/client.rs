//! NATS connection and stream bootstrap.

use async_nats::jetstream::{self, stream::Config as StreamConfig};
use std::time::Duration;
use tracing::info;

use pipeline_core::{Error, Result};

use crate::config::NatsConfig;
use crate::subjects::SUBJECT_WILDCARD;

/// Connected NATS client with a JetStream context.
pub struct NatsClient {
    client: async_nats::Client,
    jetstream: jetstream::Context,
}

impl NatsClient {
    /// Connects to the configured server.
    pub async fn connect(config: &NatsConfig) -> Result<Self> {
        info!(url = %config.url, "Connecting to NATS");

        let client = async_nats::ConnectOptions::new()
            .connection_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| Error::queue(format!("failed to connect to NATS: {e}")))?;

        let jetstream = jetstream::new(client.clone());

        info!("Connected to NATS");
        Ok(Self { client, jetstream })
    }

    /// Ensures the telemetry stream exists. Idempotent; stream provisioning
    /// policy beyond name and subjects is left to the broker.
    pub async fn ensure_stream(&self, stream_name: &str) -> Result<()> {
        match self.jetstream.get_stream(stream_name).await {
            Ok(_) => {
                info!(stream = stream_name, "Stream already exists");
            }
            Err(_) => {
                self.jetstream
                    .create_stream(StreamConfig {
                        name: stream_name.to_string(),
                        subjects: vec![SUBJECT_WILDCARD.to_string()],
                        ..Default::default()
                    })
                    .await
                    .map_err(|e| Error::queue(format!("failed to create stream: {e}")))?;
                info!(stream = stream_name, "Created stream");
            }
        }

        Ok(())
    }

    /// Returns the JetStream context.
    pub fn jetstream(&self) -> &jetstream::Context {
        &self.jetstream
    }

    /// Whether the underlying connection is currently up.
    pub fn is_connected(&self) -> bool {
        self.client.connection_state() == async_nats::connection::State::Connected
    }
}
