//! Login, refresh token rotation and logout.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use sitehub_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use sitehub_auth::password::PasswordHasher;
use sitehub_core::error::AppError;
use sitehub_database::store::AccountStore;

use crate::context::RequestContext;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Login request body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response body.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub refresh: String,
    pub access: String,
    /// "Super Admin" or "Admin".
    pub role: &'static str,
    pub username: String,
}

/// Authenticates back-office accounts and manages their tokens.
#[derive(Debug, Clone)]
pub struct AuthService {
    accounts: Arc<dyn AccountStore>,
    hasher: PasswordHasher,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            accounts,
            hasher: PasswordHasher::new(),
            encoder,
            decoder,
        }
    }

    /// Logs in an active admin or super admin.
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, AppError> {
        let account = self
            .accounts
            .find_by_username(&req.username)
            .await?
            .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

        if !self
            .hasher
            .verify_password(&req.password, &account.password_hash)?
        {
            warn!(username = %req.username, "Login failed: wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }
        if !account.can_access_admin() {
            warn!(username = %req.username, "Login refused: not an active admin");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let tokens = self
            .encoder
            .generate_token_pair(account.id, account.role, &account.username)?;
        self.accounts.touch_last_login(account.id, Utc::now()).await?;

        info!(account_id = %account.id, username = %account.username, "Admin logged in");
        Ok(LoginResponse {
            refresh: tokens.refresh,
            access: tokens.access,
            role: account.role.display_name(),
            username: account.username,
        })
    }

    /// Exchanges a refresh token for a new pair. The presented refresh
    /// token is revoked so it cannot be used again.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.decoder.decode_refresh_token(refresh_token).await?;

        let account = self
            .accounts
            .find_by_id(claims.account_id())
            .await?
            .filter(|a| a.can_access_admin())
            .ok_or_else(|| AppError::unauthorized("User not found"))?;

        if !self.decoder.blocklist_token(&claims).await? {
            return Err(AppError::unauthorized("Token has been revoked"));
        }

        self.encoder
            .generate_token_pair(account.id, account.role, &account.username)
    }

    /// Resolves an access token to the caller's context. The account is
    /// reloaded so deletion, deactivation and role changes apply at once.
    pub async fn authenticate(&self, access_token: &str) -> Result<RequestContext, AppError> {
        let claims = self.decoder.decode_access_token(access_token).await?;
        let account = self
            .accounts
            .find_by_id(claims.account_id())
            .await?
            .ok_or_else(|| AppError::unauthorized("User not found"))?;
        if !account.is_active {
            return Err(AppError::unauthorized("User is inactive"));
        }
        if account.role != claims.role {
            debug!(account_id = %account.id, "Token role is stale, using stored role");
        }
        Ok(RequestContext::new(account.id, account.role, account.username))
    }

    /// Revokes the caller's refresh token.
    pub async fn logout(
        &self,
        ctx: &RequestContext,
        refresh_token: Option<&str>,
    ) -> Result<(), AppError> {
        let token = refresh_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::validation("Refresh token is required."))?;

        let claims = self
            .decoder
            .decode_refresh_token(token)
            .await
            .map_err(|_| AppError::validation("Invalid token."))?;
        if claims.account_id() != ctx.account_id {
            return Err(AppError::validation("Invalid token."));
        }
        if !self.decoder.blocklist_token(&claims).await? {
            return Err(AppError::validation("Invalid token."));
        }

        info!(account_id = %ctx.account_id, "Admin logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Harness, TEST_PASSWORD};
    use sitehub_core::error::ErrorKind;
    use sitehub_entity::account::{AccountChanges, Role};

    fn login(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn test_login_issues_tokens_for_admins() {
        let h = Harness::new().await;
        h.super_admin().await;

        let response = h.auth().login(login("root", TEST_PASSWORD)).await.unwrap();
        assert_eq!(response.role, "Super Admin");
        assert_eq!(response.username, "root");

        let account = h.stores.accounts.find_by_username("root").await.unwrap().unwrap();
        assert!(account.last_login.is_some());
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password_and_plain_users() {
        let h = Harness::new().await;
        h.super_admin().await;
        h.account("visitor", Role::User).await;

        let err = h.auth().login(login("root", "wrong")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert_eq!(err.message, INVALID_CREDENTIALS);

        let err = h.auth().login(login("visitor", TEST_PASSWORD)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);

        let err = h.auth().login(login("nobody", TEST_PASSWORD)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn test_refresh_rotates_token() {
        let h = Harness::new().await;
        h.super_admin().await;
        let auth = h.auth();
        let tokens = auth.login(login("root", TEST_PASSWORD)).await.unwrap();

        let rotated = auth.refresh(&tokens.refresh).await.unwrap();
        assert_ne!(rotated.refresh, tokens.refresh);
        assert!(auth.refresh(&tokens.refresh).await.is_err());
        assert!(auth.refresh(&rotated.refresh).await.is_ok());
    }

    #[tokio::test]
    async fn test_authenticate_uses_stored_account() {
        let h = Harness::new().await;
        let root = h.super_admin().await;
        let auth = h.auth();
        let tokens = auth.login(login("root", TEST_PASSWORD)).await.unwrap();

        let ctx = auth.authenticate(&tokens.access).await.unwrap();
        assert_eq!(ctx.role, Role::SuperAdmin);

        let demote = AccountChanges {
            role: Some(Role::Admin),
            ..Default::default()
        };
        h.stores.accounts.update(root.account_id, &demote).await.unwrap();
        let ctx = auth.authenticate(&tokens.access).await.unwrap();
        assert_eq!(ctx.role, Role::Admin);
        assert!(ctx.require_super_admin().is_err());

        let deactivate = AccountChanges {
            is_active: Some(false),
            ..Default::default()
        };
        h.stores.accounts.update(root.account_id, &deactivate).await.unwrap();
        let err = auth.authenticate(&tokens.access).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);

        h.stores.accounts.delete(root.account_id).await.unwrap();
        let err = auth.authenticate(&tokens.access).await.unwrap_err();
        assert_eq!(err.message, "User not found");
    }

    #[tokio::test]
    async fn test_logout_revokes_once() {
        let h = Harness::new().await;
        let root = h.super_admin().await;
        let auth = h.auth();
        let tokens = auth.login(login("root", TEST_PASSWORD)).await.unwrap();

        let err = auth.logout(&root, None).await.unwrap_err();
        assert_eq!(err.message, "Refresh token is required.");

        auth.logout(&root, Some(&tokens.refresh)).await.unwrap();
        let err = auth.logout(&root, Some(&tokens.refresh)).await.unwrap_err();
        assert_eq!(err.message, "Invalid token.");
        assert!(auth.refresh(&tokens.refresh).await.is_err());
    }
}
