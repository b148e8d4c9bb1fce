//! Telemetry event types carried through the pipeline.
//!
//! Wire structs are strict (`deny_unknown_fields`) and model every required
//! scalar as `Option` so that an absent field is distinguishable from a
//! zero value and can be reported by name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::Result;
use crate::validate::first_violation;

/// The three event kinds carried on the telemetry stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Gyroscope,
    Gps,
    Photo,
}

impl EventKind {
    /// All kinds, in subject order.
    pub const ALL: [EventKind; 3] = [EventKind::Gyroscope, EventKind::Gps, EventKind::Photo];

    /// Returns the JetStream subject for this event kind.
    pub fn subject(&self) -> &'static str {
        match self {
            Self::Gyroscope => "telemetry.gyroscope",
            Self::Gps => "telemetry.gps",
            Self::Photo => "telemetry.photo",
        }
    }

    /// Returns the durable consumer group name for this event kind.
    ///
    /// Fixed per subject so redelivery resumes from the same cursor across
    /// process restarts.
    pub fn durable_group(&self) -> &'static str {
        match self {
            Self::Gyroscope => "GYROSCOPE_WORKER",
            Self::Gps => "GPS_WORKER",
            Self::Photo => "PHOTO_WORKER",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gyroscope => "gyroscope",
            Self::Gps => "gps",
            Self::Photo => "photo",
        }
    }
}

/// A single gyroscope sample.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct GyroscopeEvent {
    #[validate(required, length(min = 1))]
    pub device_id: Option<String>,
    #[validate(required)]
    pub x: Option<f64>,
    #[validate(required)]
    pub y: Option<f64>,
    #[validate(required)]
    pub z: Option<f64>,
    #[validate(required)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl GyroscopeEvent {
    const FIELDS: &'static [&'static str] = &["device_id", "x", "y", "z", "timestamp"];

    /// Validates required fields, reporting the first violation only.
    pub fn check(&self) -> Result<()> {
        self.validate()
            .map_err(|e| first_violation(&e, Self::FIELDS))
    }
}

/// A single GPS fix.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct GpsEvent {
    #[validate(required, length(min = 1))]
    pub device_id: Option<String>,
    #[validate(required)]
    pub latitude: Option<f64>,
    #[validate(required)]
    pub longitude: Option<f64>,
    #[validate(required)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl GpsEvent {
    const FIELDS: &'static [&'static str] = &["device_id", "latitude", "longitude", "timestamp"];

    /// Validates required fields, reporting the first violation only.
    pub fn check(&self) -> Result<()> {
        self.validate()
            .map_err(|e| first_violation(&e, Self::FIELDS))
    }
}

/// A photo captured by a field device.
///
/// An empty `photo` string is reported as a missing field, matching the
/// treatment of absent values.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PhotoEvent {
    #[validate(required, length(min = 1))]
    pub device_id: Option<String>,
    /// Base64-encoded image bytes.
    #[validate(required, length(min = 1))]
    pub photo: Option<String>,
    #[validate(required)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Output field, set by the recognition pipeline. Producer input is
    /// never trusted; the stored value is always the pipeline's verdict.
    #[serde(default)]
    pub recognized: bool,
}

impl PhotoEvent {
    const FIELDS: &'static [&'static str] = &["device_id", "photo", "timestamp"];

    /// Validates required fields, reporting the first violation only.
    pub fn check(&self) -> Result<()> {
        self.validate()
            .map_err(|e| first_violation(&e, Self::FIELDS))
    }
}
