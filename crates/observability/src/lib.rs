//! Internal observability for the telemetry pipeline.
//!
//! Queue-path failures are invisible to the original caller, so processing
//! outcomes are recorded here as in-process counters and structured logs.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::*;
pub use tracing_setup::*;
