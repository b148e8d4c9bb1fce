//! NATS JetStream plumbing: connection, stream bootstrap, publisher, and
//! durable consumer construction.

pub mod client;
pub mod config;
pub mod consumer;
pub mod publisher;
pub mod subjects;

pub use client::NatsClient;
pub use config::NatsConfig;
pub use consumer::durable_consumer;
pub use publisher::{EventPublisher, JetStreamPublisher};
pub use subjects::{STREAM_NAME, SUBJECT_WILDCARD};

// Broker types the worker loop needs; re-exported so other crates do not
// depend on async-nats directly.
pub use async_nats::jetstream::consumer::PullConsumer;
pub use async_nats::jetstream::{AckKind, Context, Message};
