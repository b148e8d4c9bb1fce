//! Queue consumers for the telemetry pipeline.
//!
//! One durable consumer per event kind. Each delivery runs through the
//! kind's handler and is classified into a terminal action; the consumer
//! loop is the only code that touches the broker.

pub mod consumer;
pub mod dispatch;
pub mod handlers;
pub mod runner;

pub use consumer::ConsumerWorker;
pub use dispatch::{classify, Action};
pub use handlers::{EventHandler, GpsHandler, GyroscopeHandler, PhotoHandler};
pub use runner::WorkerRunner;
