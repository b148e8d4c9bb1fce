//! Health check endpoint.

use axum::Json;

use crate::response::HealthResponse;

/// GET /health - liveness check.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
