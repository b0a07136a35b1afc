//! Generic handlers for plain content records, plus the per-kind actions.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{OriginalUri, Query, State};
use axum::http::StatusCode;
use serde_json::Value;

use sitehub_core::types::ContentId;
use sitehub_entity::content::{
    Award, Blog, Career, CaseStudy, CompanyInfo, Consultation, Content, ContentRecord, Message,
    News, Partner, Review, ReviewStatus, TeamMember,
};
use sitehub_service::{ContentService, ListParams};

use crate::dto::response::{LikesResponse, Paginated, StatusResponse};
use crate::error::ApiError;
use crate::extractors::{IdPath, OptionalAuthUser};
use crate::state::AppState;

/// Access to the service of one content kind.
pub trait ContentState<T: ContentRecord> {
    fn content_service(&self) -> &ContentService<T>;
}

macro_rules! content_state {
    ($($record:ty => $field:ident),* $(,)?) => {
        $(
            impl ContentState<$record> for AppState {
                fn content_service(&self) -> &ContentService<$record> {
                    &self.content.$field
                }
            }
        )*
    };
}

content_state! {
    Message => messages,
    Review => reviews,
    Consultation => consultations,
    Blog => blogs,
    News => news,
    Career => careers,
    Award => awards,
    CaseStudy => case_studies,
    CompanyInfo => company_info,
    Partner => partners,
    TeamMember => team,
}

/// GET /api/v1/{kind}/
pub async fn list<T>(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Content<T>>>, ApiError>
where
    T: ContentRecord,
    AppState: ContentState<T>,
{
    let params = ListParams::from_query(query);
    let records = state.content_service().list(auth.context(), &params).await?;
    Ok(Json(records))
}

/// GET /api/v1/{kind}/ with a page envelope.
pub async fn list_paginated<T>(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Paginated<Content<T>>>, ApiError>
where
    T: ContentRecord,
    AppState: ContentState<T>,
{
    let params = ListParams::from_query(query);
    let page = state
        .content_service()
        .list_page(auth.context(), &params)
        .await?;
    Ok(Json(Paginated::from_page(page, &uri)))
}

/// POST /api/v1/{kind}/
pub async fn create<T>(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Json(data): Json<Value>,
) -> Result<(StatusCode, Json<Content<T>>), ApiError>
where
    T: ContentRecord,
    AppState: ContentState<T>,
{
    let record = state.content_service().create(auth.context(), data).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/{kind}/{id}/
pub async fn retrieve<T>(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    IdPath(id): IdPath<ContentId>,
) -> Result<Json<Content<T>>, ApiError>
where
    T: ContentRecord,
    AppState: ContentState<T>,
{
    Ok(Json(state.content_service().retrieve(auth.context(), id).await?))
}

/// PUT /api/v1/{kind}/{id}/
pub async fn replace<T>(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    IdPath(id): IdPath<ContentId>,
    Json(data): Json<Value>,
) -> Result<Json<Content<T>>, ApiError>
where
    T: ContentRecord,
    AppState: ContentState<T>,
{
    let record = state
        .content_service()
        .replace(auth.context(), id, data)
        .await?;
    Ok(Json(record))
}

/// PATCH /api/v1/{kind}/{id}/
pub async fn patch<T>(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    IdPath(id): IdPath<ContentId>,
    Json(data): Json<Value>,
) -> Result<Json<Content<T>>, ApiError>
where
    T: ContentRecord,
    AppState: ContentState<T>,
{
    let record = state
        .content_service()
        .patch(auth.context(), id, data)
        .await?;
    Ok(Json(record))
}

/// DELETE /api/v1/{kind}/{id}/
pub async fn delete<T>(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    IdPath(id): IdPath<ContentId>,
) -> Result<StatusCode, ApiError>
where
    T: ContentRecord,
    AppState: ContentState<T>,
{
    state.content_service().delete(auth.context(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/blogs/{id}/like/
pub async fn like_blog(
    State(state): State<AppState>,
    IdPath(id): IdPath<ContentId>,
) -> Result<Json<LikesResponse>, ApiError> {
    let likes = state.content.blogs.like(id).await?;
    Ok(Json(LikesResponse { likes }))
}

/// PUT /api/v1/reviews/{id}/toggle/
pub async fn toggle_review(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    IdPath(id): IdPath<ContentId>,
) -> Result<Json<StatusResponse<ReviewStatus>>, ApiError> {
    let status = state.content.reviews.toggle(auth.context(), id).await?;
    Ok(Json(StatusResponse { status }))
}
