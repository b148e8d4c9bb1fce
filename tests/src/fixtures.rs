//! Test fixtures and payload generators.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// A valid gyroscope payload.
pub fn gyroscope_payload(device_id: &str) -> String {
    serde_json::json!({
        "device_id": device_id,
        "x": 1.0,
        "y": 2.0,
        "z": 3.0,
        "timestamp": "2025-01-01T00:00:00Z",
    })
    .to_string()
}

/// A valid GPS payload.
pub fn gps_payload(device_id: &str) -> String {
    serde_json::json!({
        "device_id": device_id,
        "latitude": -8.05,
        "longitude": -34.88,
        "timestamp": "2025-01-01T00:00:00Z",
    })
    .to_string()
}

/// A valid photo payload with base64-encoded `image` bytes.
pub fn photo_payload(device_id: &str, image: &[u8]) -> String {
    serde_json::json!({
        "device_id": device_id,
        "photo": STANDARD.encode(image),
        "timestamp": "2025-01-01T00:00:00Z",
    })
    .to_string()
}

/// A gyroscope payload missing its `z` axis.
pub fn gyroscope_missing_z(device_id: &str) -> String {
    serde_json::json!({
        "device_id": device_id,
        "x": 1.0,
        "y": 2.0,
        "timestamp": "2025-01-01T00:00:00Z",
    })
    .to_string()
}

/// A GPS payload carrying an unexpected extra field.
pub fn gps_with_unknown_field(device_id: &str) -> String {
    serde_json::json!({
        "device_id": device_id,
        "latitude": 1.0,
        "longitude": 2.0,
        "timestamp": "2025-01-01T00:00:00Z",
        "foo": "bar",
    })
    .to_string()
}
