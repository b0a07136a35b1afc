//! Career application handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use sitehub_core::error::AppError;
use sitehub_core::types::{ApplicationId, ContentId};
use sitehub_database::store::ApplicationQuery;
use sitehub_entity::application::{ApplicationChanges, ApplicationStatus};
use sitehub_service::application::{ApplicationView, ApplyRequest};

use crate::dto::request::ApplicationFilter;
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath, MultipartForm};
use crate::state::AppState;

/// POST /api/v1/apply/
pub async fn apply(
    State(state): State<AppState>,
    mut form: MultipartForm,
) -> Result<(StatusCode, Json<ApplicationView>), ApiError> {
    let req = ApplyRequest {
        applicant_name: form.take_field("applicant_name").unwrap_or_default(),
        applicant_email: form.take_field("applicant_email").unwrap_or_default(),
        cover_letter: form.take_field("cover_letter").unwrap_or_default(),
        career: form.take_field("career"),
        resume: form.take_file("resume"),
    };
    let application = state.application_service.apply(req).await?;
    Ok((StatusCode::CREATED, Json(application.into())))
}

/// GET /api/v1/apply/
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<ApplicationFilter>,
) -> Result<Json<Vec<ApplicationView>>, ApiError> {
    let query = ApplicationQuery {
        career: non_empty(filter.career)
            .map(|c| {
                c.parse::<ContentId>()
                    .map_err(|_| AppError::field("career", "Select a valid choice."))
            })
            .transpose()?,
        status: non_empty(filter.status)
            .map(|s| s.parse::<ApplicationStatus>())
            .transpose()?,
        search: non_empty(filter.search),
    };
    let applications = state.application_service.list(&auth, &query).await?;
    Ok(Json(applications.into_iter().map(Into::into).collect()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// GET /api/v1/apply/{id}/
pub async fn retrieve(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<ApplicationId>,
) -> Result<Json<ApplicationView>, ApiError> {
    let application = state.application_service.retrieve(&auth, id).await?;
    Ok(Json(application.into()))
}

/// PUT|PATCH /api/v1/apply/{id}/
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<ApplicationId>,
    Json(changes): Json<ApplicationChanges>,
) -> Result<Json<ApplicationView>, ApiError> {
    let application = state.application_service.update(&auth, id, changes).await?;
    Ok(Json(application.into()))
}

/// DELETE /api/v1/apply/{id}/
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<ApplicationId>,
) -> Result<StatusCode, ApiError> {
    state.application_service.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn set_status(
    state: &AppState,
    auth: &AuthUser,
    id: ApplicationId,
    status: ApplicationStatus,
) -> Result<Json<MessageResponse>, ApiError> {
    let (_, message) = state.application_service.set_status(auth, id, status).await?;
    Ok(Json(MessageResponse::new(message)))
}

/// POST /api/v1/apply/{id}/shortlist/
pub async fn shortlist(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<ApplicationId>,
) -> Result<Json<MessageResponse>, ApiError> {
    set_status(&state, &auth, id, ApplicationStatus::Shortlisted).await
}

/// POST /api/v1/apply/{id}/reject/
pub async fn reject(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<ApplicationId>,
) -> Result<Json<MessageResponse>, ApiError> {
    set_status(&state, &auth, id, ApplicationStatus::Rejected).await
}

/// POST /api/v1/apply/{id}/hire/
pub async fn hire(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<ApplicationId>,
) -> Result<Json<MessageResponse>, ApiError> {
    set_status(&state, &auth, id, ApplicationStatus::Hired).await
}
