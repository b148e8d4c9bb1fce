//! Core types, validation, and failure classification for the telemetry pipeline.

pub mod error;
pub mod events;
pub mod validate;

pub use error::{Error, FailureClass, Result};
pub use events::*;
pub use validate::*;
