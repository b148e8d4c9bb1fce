//! Standardized API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use pipeline_core::EventKind;

/// Acceptance body returned once an event is durably queued.
#[derive(Debug, Serialize, Deserialize)]
pub struct AcceptedResponse {
    pub message: String,
}

impl AcceptedResponse {
    pub fn queued(kind: EventKind) -> Self {
        Self {
            message: format!("{} event accepted for processing", kind.as_str()),
        }
    }
}

/// Error body: a single descriptive message.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// API error carrying the HTTP status to answer with.
pub struct ApiError {
    pub status: StatusCode,
    pub response: ErrorResponse,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            response: ErrorResponse {
                message: msg.into(),
            },
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            response: ErrorResponse {
                message: msg.into(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<pipeline_core::Error> for ApiError {
    fn from(err: pipeline_core::Error) -> Self {
        if err.is_validation() {
            // The first violated rule, verbatim.
            ApiError::bad_request(err.to_string())
        } else {
            // Infrastructure details stay in the logs.
            ApiError::internal("internal error while queueing the event")
        }
    }
}
