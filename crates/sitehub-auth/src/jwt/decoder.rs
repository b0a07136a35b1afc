//! JWT token validation and blocklist management.

use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::warn;
use uuid::Uuid;

use sitehub_cache::CacheManager;
use sitehub_cache::keys;
use sitehub_core::config::AuthConfig;
use sitehub_core::error::AppError;
use sitehub_core::traits::CacheProvider;

use super::claims::{Claims, TokenType};

/// Validates tokens and tracks revoked ones.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
    cache: CacheManager,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl JwtDecoder {
    /// Create a new decoder from auth configuration.
    pub fn new(config: &AuthConfig, cache: CacheManager) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;
        validation.set_issuer(&[config.issuer.as_str()]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            cache,
        }
    }

    /// Decode an access token.
    pub async fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_typed(token, TokenType::Access)?;
        self.check_blocklist(&claims.jti).await?;
        Ok(claims)
    }

    /// Decode a refresh token, rejecting revoked ones.
    pub async fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_typed(token, TokenType::Refresh)?;
        self.check_blocklist(&claims.jti).await?;
        Ok(claims)
    }

    /// Decode a password reset token. The caller compares the fingerprint.
    pub fn decode_reset_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_typed(token, TokenType::PasswordReset)
    }

    fn decode_typed(&self, token: &str, expected: TokenType) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::unauthorized("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::unauthorized("Invalid token signature")
                }
                _ => AppError::unauthorized(format!("Token validation failed: {e}")),
            },
        )?;

        if token_data.claims.token_type != expected {
            return Err(AppError::unauthorized("Invalid token type"));
        }
        Ok(token_data.claims)
    }

    async fn check_blocklist(&self, jti: &Uuid) -> Result<(), AppError> {
        let key = keys::jwt_blocklist(&jti.to_string());
        match self.cache.exists(&key).await {
            Ok(true) => Err(AppError::unauthorized("Token has been revoked")),
            Ok(false) => Ok(()),
            Err(e) => {
                // An unreachable cache must not lock every admin out.
                warn!(error = %e, "Blocklist lookup failed");
                Ok(())
            }
        }
    }

    /// Revoke a token until it would have expired anyway. Returns `false`
    /// when the token was already revoked.
    pub async fn blocklist_token(&self, claims: &Claims) -> Result<bool, AppError> {
        let key = keys::jwt_blocklist(&claims.jti.to_string());
        let ttl = Duration::from_secs(claims.remaining_ttl_seconds().max(60));
        self.cache.insert_if_absent(&key, "revoked", ttl).await
    }
}
