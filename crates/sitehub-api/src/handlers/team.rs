//! Team roster handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use sitehub_core::types::ContentId;

use crate::dto::response::{DetailResponse, TeamResponse};
use crate::error::ApiError;
use crate::extractors::{IdPath, OptionalAuthUser};
use crate::state::AppState;

const MEMBER_NOT_FOUND: &str = "Team member not found.";

/// GET /api/v1/team/
pub async fn grouped(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
) -> Result<Json<TeamResponse>, ApiError> {
    let team = state.content.team.grouped(auth.context()).await?;
    Ok(Json(TeamResponse { team }))
}

/// GET /api/v1/team/{id}/
pub async fn member(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    IdPath(id): IdPath<ContentId>,
) -> Response {
    match state.content.team.retrieve(auth.context(), id).await {
        Ok(member) => Json(member).into_response(),
        Err(e) if e.is_not_found() => (
            StatusCode::NOT_FOUND,
            Json(DetailResponse {
                detail: MEMBER_NOT_FOUND.to_string(),
            }),
        )
            .into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}
