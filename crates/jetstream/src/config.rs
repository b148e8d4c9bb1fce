//! NATS configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use pipeline_core::EventKind;

use crate::subjects::STREAM_NAME;

/// NATS connection and consumer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NatsConfig {
    /// Server URL
    #[serde(default = "default_url")]
    pub url: String,
    /// Stream name
    #[serde(default = "default_stream")]
    pub stream: String,
    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Acknowledgment wait window for the gyroscope/gps subjects, seconds
    #[serde(default = "default_ack_wait_secs")]
    pub ack_wait_secs: u64,
    /// Acknowledgment wait window for the photo subject, seconds. Longer
    /// than the telemetry window because photo handling calls a slower
    /// external service.
    #[serde(default = "default_photo_ack_wait_secs")]
    pub photo_ack_wait_secs: u64,
}

fn default_url() -> String {
    "nats://localhost:4222".to_string()
}

fn default_stream() -> String {
    STREAM_NAME.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_ack_wait_secs() -> u64 {
    10
}

fn default_photo_ack_wait_secs() -> u64 {
    30
}

impl Default for NatsConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            stream: default_stream(),
            connect_timeout_secs: default_connect_timeout_secs(),
            ack_wait_secs: default_ack_wait_secs(),
            photo_ack_wait_secs: default_photo_ack_wait_secs(),
        }
    }
}

impl NatsConfig {
    /// Acknowledgment wait window for an event kind's subject.
    pub fn ack_wait_for(&self, kind: EventKind) -> Duration {
        match kind {
            EventKind::Photo => Duration::from_secs(self.photo_ack_wait_secs),
            _ => Duration::from_secs(self.ack_wait_secs),
        }
    }
}
