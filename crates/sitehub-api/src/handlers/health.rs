//! Health check handler.

use axum::Json;

use crate::dto::response::HealthResponse;

/// GET /api/v1/health/
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
