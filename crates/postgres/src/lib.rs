//! Postgres persistence for telemetry records.
//!
//! One table per event kind, one insert operation per table. The pipeline
//! only ever appends; reads belong to other systems.

pub mod config;
pub mod schema;
pub mod store;

pub use config::PostgresConfig;
pub use store::{PostgresStore, TelemetryStore};
