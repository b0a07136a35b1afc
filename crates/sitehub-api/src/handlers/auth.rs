//! Login, token rotation, logout and password reset handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use sitehub_auth::TokenPair;
use sitehub_service::auth::{LoginRequest, LoginResponse, ResetPasswordRequest};

use crate::dto::request::{PasswordResetRequest, RefreshRequest};
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/v1/admin/login/
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    Ok(Json(state.auth_service.login(req).await?))
}

/// POST /api/v1/token/refresh/
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<TokenPair>, ApiError> {
    let token = req.refresh.unwrap_or_default();
    Ok(Json(state.auth_service.refresh(&token).await?))
}

/// POST /api/v1/admin/logout/
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<RefreshRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    state
        .auth_service
        .logout(&auth, req.refresh.as_deref())
        .await?;
    Ok((
        StatusCode::RESET_CONTENT,
        Json(MessageResponse::new("Logout successful.")),
    ))
}

/// POST /api/v1/password-reset/
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(req): Json<PasswordResetRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.password_reset_service.request_reset(&req.email).await?;
    Ok(Json(MessageResponse::new("Password reset link sent.")))
}

/// POST /api/v1/password-reset-confirm/{uidb64}/{token}/
pub async fn confirm_password_reset(
    State(state): State<AppState>,
    Path((uidb64, token)): Path<(String, String)>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .password_reset_service
        .confirm_reset(&uidb64, &token, req)
        .await?;
    Ok(Json(MessageResponse::new("Password reset successful.")))
}
