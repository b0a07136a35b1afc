//! Back-office account management (super admin only).

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use sitehub_core::types::AccountId;
use sitehub_service::AccountView;
use sitehub_service::account::{CreateAdminRequest, UpdateAdminRequest};

use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath};
use crate::state::AppState;

/// GET /api/v1/admins/
pub async fn list_admins(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<AccountView>>, ApiError> {
    let admins = state.account_service.list_admins(&auth).await?;
    Ok(Json(admins.iter().map(AccountView::from).collect()))
}

/// POST /api/v1/admin/create/
pub async fn create_admin(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateAdminRequest>,
) -> Result<(StatusCode, Json<AccountView>), ApiError> {
    let account = state.account_service.create_admin(&auth, req).await?;
    Ok((StatusCode::CREATED, Json(AccountView::from(&account))))
}

/// GET /api/v1/admin/{id}/
pub async fn get_admin(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<AccountId>,
) -> Result<Json<AccountView>, ApiError> {
    let account = state.account_service.get_admin(&auth, id).await?;
    Ok(Json(AccountView::from(&account)))
}

/// PUT|PATCH /api/v1/admin/{id}/
pub async fn update_admin(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<AccountId>,
    Json(req): Json<UpdateAdminRequest>,
) -> Result<Json<AccountView>, ApiError> {
    let account = state.account_service.update_admin(&auth, id, req).await?;
    Ok(Json(AccountView::from(&account)))
}

/// DELETE /api/v1/admin/delete/{id}/
pub async fn delete_admin(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<AccountId>,
) -> Result<StatusCode, ApiError> {
    state.account_service.delete_admin(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
