//! JWT token creation.

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;
use uuid::Uuid;

use sitehub_core::config::AuthConfig;
use sitehub_core::error::AppError;
use sitehub_core::types::AccountId;
use sitehub_entity::account::Role;

use super::claims::{Claims, TokenType};

/// Creates signed tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    issuer: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
    reset_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("issuer", &self.issuer)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

/// An access and refresh token issued together.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access: String,
    /// Long-lived refresh token.
    pub refresh: String,
}

impl JwtEncoder {
    /// Create a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer.clone(),
            access_ttl: Duration::minutes(config.access_ttl_minutes as i64),
            refresh_ttl: Duration::days(config.refresh_ttl_days as i64),
            reset_ttl: Duration::minutes(config.reset_ttl_minutes as i64),
        }
    }

    /// Issue an access and refresh token for an account.
    pub fn generate_token_pair(
        &self,
        account_id: AccountId,
        role: Role,
        username: &str,
    ) -> Result<TokenPair, AppError> {
        let access = self.sign(account_id, role, username, TokenType::Access, None)?;
        let refresh = self.sign(account_id, role, username, TokenType::Refresh, None)?;
        Ok(TokenPair { access, refresh })
    }

    /// Issue a password reset token bound to the account's current
    /// password fingerprint.
    pub fn generate_reset_token(
        &self,
        account_id: AccountId,
        role: Role,
        username: &str,
        fingerprint: String,
    ) -> Result<String, AppError> {
        self.sign(
            account_id,
            role,
            username,
            TokenType::PasswordReset,
            Some(fingerprint),
        )
    }

    fn sign(
        &self,
        account_id: AccountId,
        role: Role,
        username: &str,
        token_type: TokenType,
        pwd: Option<String>,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let ttl = match token_type {
            TokenType::Access => self.access_ttl,
            TokenType::Refresh => self.refresh_ttl,
            TokenType::PasswordReset => self.reset_ttl,
        };

        let claims = Claims {
            sub: account_id,
            role,
            username: username.to_string(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4(),
            token_type,
            pwd,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }
}
