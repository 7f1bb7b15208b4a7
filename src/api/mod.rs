//! Axum HTTP handlers for the question-answering API.

pub mod run;

use axum::Json;

use crate::models::HealthResponse;

/// GET /api/v1/hackrx/health - liveness check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
