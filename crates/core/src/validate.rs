//! Strict wire decoding and validation plumbing.

use serde::de::DeserializeOwned;
use validator::ValidationErrors;

use crate::error::{Error, Result};

/// Decodes a strict-schema JSON payload.
///
/// Unknown fields are rejected by the schema and surfaced as a named
/// validation failure, ahead of any missing-field check.
pub fn decode_strict<T: DeserializeOwned>(payload: &[u8]) -> Result<T> {
    serde_json::from_slice(payload).map_err(|e| classify_decode_error(&e))
}

/// Maps a serde decode error back to the pipeline error taxonomy.
fn classify_decode_error(err: &serde_json::Error) -> Error {
    let msg = err.to_string();
    if let Some(name) = field_in(&msg, "unknown field `") {
        return Error::unknown_field(name);
    }
    if let Some(name) = field_in(&msg, "missing field `") {
        return Error::missing_field(name);
    }
    Error::malformed(msg)
}

/// Extracts the backticked field name from a serde error message.
fn field_in<'a>(msg: &'a str, prefix: &str) -> Option<&'a str> {
    msg.strip_prefix(prefix)?.split('`').next()
}

/// Reduces derive-produced validation errors to the first violated field,
/// in declaration order. Absent and empty values read the same to callers:
/// a missing required field.
pub fn first_violation(errors: &ValidationErrors, fields: &[&str]) -> Error {
    let map = errors.field_errors();
    for field in fields {
        if map.contains_key(*field) {
            return Error::missing_field(*field);
        }
    }
    Error::internal("validation failed on an unexpected field")
}
