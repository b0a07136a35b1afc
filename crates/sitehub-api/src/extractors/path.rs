//! Typed path parameter helpers.

use std::str::FromStr;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use sitehub_core::error::AppError;

use crate::error::ApiError;

/// A record id from the `{id}` path segment. Malformed ids are reported
/// as missing records.
#[derive(Debug, Clone, Copy)]
pub struct IdPath<T>(pub T);

impl<S, T> FromRequestParts<S> for IdPath<T>
where
    S: Send + Sync,
    T: FromStr + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::not_found("Not found."))?;
        raw.parse()
            .map(Self)
            .map_err(|_| AppError::not_found("Not found.").into())
    }
}
