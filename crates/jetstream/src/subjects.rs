//! Stream definition for telemetry messages.
//!
//! One logical stream spans the whole `telemetry.*` subject space; each
//! event kind maps to a single subject underneath it (see
//! `EventKind::subject`).

/// Name of the logical stream holding all telemetry subjects.
pub const STREAM_NAME: &str = "TELEMETRY";

/// Subject wildcard binding every telemetry subject to the stream.
pub const SUBJECT_WILDCARD: &str = "telemetry.*";
