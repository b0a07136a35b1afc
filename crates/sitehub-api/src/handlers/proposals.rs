//! Proposal request handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use sitehub_core::types::ProposalId;
use sitehub_entity::proposal::ProposalRequest;
use sitehub_service::proposal::{CreateProposalRequest, ProposalCreated, UpdateProposalRequest};

use crate::dto::response::StatusResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath, MultipartForm, OptionalAuthUser};
use crate::state::AppState;

/// POST /api/v1/proposals/
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateProposalRequest>,
) -> Result<(StatusCode, Json<ProposalCreated>), ApiError> {
    let proposal = state.proposal_service.create(req).await?;
    Ok((StatusCode::CREATED, Json(proposal.into())))
}

/// GET /api/v1/proposals/
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<ProposalRequest>>, ApiError> {
    Ok(Json(state.proposal_service.list(&auth).await?))
}

/// GET /api/v1/proposals/{id}/
pub async fn retrieve(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<ProposalId>,
) -> Result<Json<ProposalRequest>, ApiError> {
    Ok(Json(state.proposal_service.retrieve(&auth, id).await?))
}

/// PUT|PATCH /api/v1/proposals/{id}/
pub async fn update(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    IdPath(id): IdPath<ProposalId>,
    Json(req): Json<UpdateProposalRequest>,
) -> Result<Json<ProposalRequest>, ApiError> {
    let proposal = state
        .proposal_service
        .update(auth.context(), id, req)
        .await?;
    Ok(Json(proposal))
}

/// DELETE /api/v1/proposals/{id}/
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<ProposalId>,
) -> Result<StatusCode, ApiError> {
    state.proposal_service.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/proposals/{id}/send_proposal/
pub async fn send_proposal(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<ProposalId>,
    mut form: MultipartForm,
) -> Result<Json<StatusResponse<&'static str>>, ApiError> {
    let response = form.take_field("admin_response");
    let document = form.take_file("proposal_document");
    state
        .proposal_service
        .send_proposal(&auth, id, response, document)
        .await?;
    Ok(Json(StatusResponse {
        status: "Proposal sent successfully and email delivered.",
    }))
}

/// POST /api/v1/proposals/{id}/mark_reviewed/
pub async fn mark_reviewed(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<ProposalId>,
) -> Result<Json<StatusResponse<&'static str>>, ApiError> {
    let status = state.proposal_service.mark_reviewed(&auth, id).await?;
    Ok(Json(StatusResponse { status }))
}
