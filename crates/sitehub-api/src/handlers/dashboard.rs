//! Admin dashboard handler.

use axum::Json;
use axum::extract::State;

use sitehub_service::dashboard::DashboardStats;

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/v1/dashboard/stats/
pub async fn stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<DashboardStats>, ApiError> {
    Ok(Json(state.dashboard_service.stats(&auth).await?))
}
