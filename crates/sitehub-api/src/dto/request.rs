//! Request DTOs that are not service inputs.

use serde::Deserialize;

/// Body of the refresh and logout endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Body of the password reset request.
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordResetRequest {
    #[serde(default)]
    pub email: String,
}

/// Filters of the application listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationFilter {
    pub career: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}
