//! Identity of the caller for the current request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sitehub_auth::rbac;
use sitehub_core::error::AppError;
use sitehub_core::types::AccountId;
use sitehub_entity::account::Role;

/// Message used when a gated operation is called anonymously.
pub const NOT_AUTHENTICATED: &str = "Authentication credentials were not provided.";

/// Context for the current authenticated request.
///
/// Built by the HTTP layer from a verified access token and passed into
/// service methods, so every operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated account.
    pub account_id: AccountId,
    /// Role carried by the access token.
    pub role: Role,
    /// Username carried by the access token.
    pub username: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(account_id: AccountId, role: Role, username: impl Into<String>) -> Self {
        Self {
            account_id,
            role,
            username: username.into(),
            request_time: Utc::now(),
        }
    }

    /// Whether the caller has staff privileges.
    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }

    pub fn require_staff(&self) -> Result<(), AppError> {
        rbac::require_staff(self.role)
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        rbac::require_admin(self.role)
    }

    pub fn require_super_admin(&self) -> Result<(), AppError> {
        rbac::require_super_admin(self.role)
    }
}

/// Require an authenticated staff caller on an endpoint that also serves
/// anonymous requests.
pub fn require_staff(ctx: Option<&RequestContext>) -> Result<&RequestContext, AppError> {
    let ctx = ctx.ok_or_else(|| AppError::unauthorized(NOT_AUTHENTICATED))?;
    ctx.require_staff()?;
    Ok(ctx)
}

/// Whether an optional caller is staff.
pub fn is_staff(ctx: Option<&RequestContext>) -> bool {
    ctx.is_some_and(RequestContext::is_staff)
}
