//! Telemetry ingestion endpoints.
//!
//! The producer boundary converts a validated request into a queued fact:
//! strict decode, validate, serialize, publish, answer 202. All effectful
//! processing happens on the consumer side of the stream.

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::{debug, error, warn};

use observability::metrics;
use pipeline_core::{decode_strict, EventKind, GpsEvent, GyroscopeEvent, PhotoEvent};

use crate::response::{AcceptedResponse, ApiError};
use crate::state::AppState;

type Accepted = (StatusCode, Json<AcceptedResponse>);

/// POST /telemetry/gyroscope
pub async fn ingest_gyroscope(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Accepted, ApiError> {
    let event: GyroscopeEvent = decode_strict(&body).map_err(reject)?;
    event.check().map_err(reject)?;
    enqueue(&state, EventKind::Gyroscope, &event).await
}

/// POST /telemetry/gps
pub async fn ingest_gps(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Accepted, ApiError> {
    let event: GpsEvent = decode_strict(&body).map_err(reject)?;
    event.check().map_err(reject)?;
    enqueue(&state, EventKind::Gps, &event).await
}

/// POST /telemetry/photo
pub async fn ingest_photo(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Accepted, ApiError> {
    let event: PhotoEvent = decode_strict(&body).map_err(reject)?;
    event.check().map_err(reject)?;
    // `recognized` rides along untouched; the consumer side owns it.
    enqueue(&state, EventKind::Photo, &event).await
}

/// Serializes and publishes a validated event, answering 202 once the
/// broker has durably acknowledged it.
async fn enqueue<T: Serialize>(
    state: &AppState,
    kind: EventKind,
    event: &T,
) -> Result<Accepted, ApiError> {
    let payload = serde_json::to_vec(event).map_err(|e| {
        error!(subject = kind.subject(), error = %e, "Failed to serialize event");
        ApiError::internal("internal error while queueing the event")
    })?;

    state.publisher.publish(kind, payload).await.map_err(|e| {
        metrics().publish_errors.inc();
        error!(subject = kind.subject(), error = %e, "Failed to enqueue event");
        ApiError::from(e)
    })?;

    debug!(subject = kind.subject(), "Event queued");
    Ok((StatusCode::ACCEPTED, Json(AcceptedResponse::queued(kind))))
}

/// Records and converts a validation rejection.
fn reject(err: pipeline_core::Error) -> ApiError {
    metrics().events_rejected.inc();
    warn!(error = %err, "Rejected telemetry event");
    ApiError::from(err)
}
