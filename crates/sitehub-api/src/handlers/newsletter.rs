//! Newsletter subscription and broadcast handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use sitehub_core::error::ErrorKind;
use sitehub_core::types::SubscriberId;
use sitehub_entity::subscriber::Subscriber;
use sitehub_service::newsletter::{SendNewsletterRequest, SubscribeRequest};

use crate::dto::response::{ErrorMessage, MessageResponse, NewsletterSent, UnsubscribeResponse};
use crate::error::{ApiError, status_of};
use crate::extractors::{AuthUser, IdPath};
use crate::state::AppState;

/// POST /api/v1/subscribe/
pub async fn subscribe(
    State(state): State<AppState>,
    Json(req): Json<SubscribeRequest>,
) -> Result<Response, ApiError> {
    match state.newsletter_service.subscribe(req).await {
        Ok(_) => Ok((
            StatusCode::CREATED,
            Json(MessageResponse::new("Subscription successful!")),
        )
            .into_response()),
        Err(e) if e.kind == ErrorKind::Conflict => Ok((
            StatusCode::BAD_REQUEST,
            Json(ErrorMessage { error: e.message }),
        )
            .into_response()),
        Err(e) => Err(e.into()),
    }
}

/// POST /api/v1/unsubscribe/{email}/
pub async fn unsubscribe(State(state): State<AppState>, Path(email): Path<String>) -> Response {
    let (status, body) = match state.newsletter_service.unsubscribe(&email).await {
        Ok(()) => (
            StatusCode::OK,
            UnsubscribeResponse {
                success: true,
                message: "You've been successfully unsubscribed and removed from our records."
                    .to_string(),
            },
        ),
        Err(e) => match e.kind {
            ErrorKind::NotFound | ErrorKind::Validation => (
                status_of(e.kind).0,
                UnsubscribeResponse {
                    success: false,
                    message: e.message,
                },
            ),
            _ => return ApiError(e).into_response(),
        },
    };
    (status, Json(body)).into_response()
}

/// GET /api/v1/list/subscribers/
pub async fn list_subscribers(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Subscriber>>, ApiError> {
    Ok(Json(state.newsletter_service.list(&auth).await?))
}

/// DELETE /api/v1/subscribers/delete/{id}/
pub async fn delete_subscriber(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<SubscriberId>,
) -> Result<StatusCode, ApiError> {
    state.newsletter_service.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/send-newsletter/
pub async fn send_newsletter(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SendNewsletterRequest>,
) -> Result<Json<NewsletterSent>, ApiError> {
    let recipients = state.newsletter_service.send(&auth, req).await?;
    Ok(Json(NewsletterSent {
        message: "Newsletter sent successfully!".to_string(),
        recipients,
    }))
}
