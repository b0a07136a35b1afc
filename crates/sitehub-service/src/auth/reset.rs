//! Password reset by emailed link.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{error, info};

use sitehub_auth::jwt::{JwtDecoder, JwtEncoder};
use sitehub_auth::password::{PasswordHasher, PasswordValidator};
use sitehub_auth::reset::{decode_uid, encode_uid, password_fingerprint, reset_link};
use sitehub_core::config::AuthConfig;
use sitehub_core::error::AppError;
use sitehub_database::store::AccountStore;
use sitehub_entity::account::AccountChanges;
use sitehub_mail::{MailMessage, Mailer};

const INVALID_LINK: &str = "Invalid reset link.";
const INVALID_TOKEN: &str = "Invalid or expired token.";

/// New password submitted with a reset link.
#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
    pub confirm_password: String,
}

/// Issues and redeems password reset links.
#[derive(Debug, Clone)]
pub struct PasswordResetService {
    accounts: Arc<dyn AccountStore>,
    hasher: PasswordHasher,
    validator: PasswordValidator,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
    mailer: Arc<dyn Mailer>,
    frontend_url: String,
}

impl PasswordResetService {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        mailer: Arc<dyn Mailer>,
        auth: &AuthConfig,
        frontend_url: impl Into<String>,
    ) -> Self {
        Self {
            accounts,
            hasher: PasswordHasher::new(),
            validator: PasswordValidator::new(auth),
            encoder,
            decoder,
            mailer,
            frontend_url: frontend_url.into(),
        }
    }

    /// Emails a reset link when an account has this address. Succeeds
    /// whether or not one does, and whether or not the email went out.
    pub async fn request_reset(&self, email: &str) -> Result<(), AppError> {
        let Some(account) = self.accounts.find_by_email(email).await? else {
            info!("Password reset requested for unknown email");
            return Ok(());
        };

        let token = self.encoder.generate_reset_token(
            account.id,
            account.role,
            &account.username,
            password_fingerprint(&account.password_hash),
        )?;
        let link = reset_link(&self.frontend_url, &encode_uid(account.id), &token);

        let message = MailMessage::new(
            account.email.clone(),
            "Password Reset Request",
            format!("Click the link below to reset your password:\n{link}"),
        );
        match self.mailer.send(&message).await {
            Ok(()) => info!(account_id = %account.id, "Password reset email sent"),
            Err(e) => error!(account_id = %account.id, error = %e, "Failed to send password reset email"),
        }
        Ok(())
    }

    /// Sets a new password if the link is still valid. A link stops
    /// working once the password it was issued for has changed.
    pub async fn confirm_reset(
        &self,
        uidb64: &str,
        token: &str,
        req: ResetPasswordRequest,
    ) -> Result<(), AppError> {
        let id = decode_uid(uidb64).ok_or_else(|| AppError::validation(INVALID_LINK))?;
        let account = self
            .accounts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::validation(INVALID_LINK))?;

        let claims = self
            .decoder
            .decode_reset_token(token)
            .map_err(|_| AppError::validation(INVALID_TOKEN))?;
        let fingerprint = password_fingerprint(&account.password_hash);
        if claims.account_id() != account.id || claims.pwd.as_deref() != Some(fingerprint.as_str()) {
            return Err(AppError::validation(INVALID_TOKEN));
        }

        self.validator.validate_length(&req.password)?;
        self.validator
            .validate_length(&req.confirm_password)
            .map_err(|_| AppError::field("confirm_password", "Ensure this field has at least 8 characters."))?;
        if req.password != req.confirm_password {
            return Err(AppError::validation("Passwords do not match."));
        }

        let changes = AccountChanges {
            password_hash: Some(self.hasher.hash_password(&req.password)?),
            ..Default::default()
        };
        self.accounts.update(account.id, &changes).await?;

        info!(account_id = %account.id, "Password reset completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Harness, TEST_PASSWORD};
    use crate::auth::LoginRequest;
    use sitehub_core::error::ErrorKind;

    fn new_password(password: &str) -> ResetPasswordRequest {
        ResetPasswordRequest {
            password: password.into(),
            confirm_password: password.into(),
        }
    }

    /// Pull `{uid}/{token}` out of the emailed link.
    fn link_parts(body: &str) -> (String, String) {
        let link = body.lines().last().unwrap();
        let mut parts = link.rsplit('/');
        let token = parts.next().unwrap().to_string();
        let uid = parts.next().unwrap().to_string();
        (uid, token)
    }

    #[tokio::test]
    async fn test_unknown_email_sends_nothing() {
        let h = Harness::new().await;
        h.reset().request_reset("ghost@example.com").await.unwrap();
        assert_eq!(h.mailer.count().await, 0);
    }

    #[tokio::test]
    async fn test_reset_flow_and_link_single_use() {
        let h = Harness::new().await;
        h.super_admin().await;
        let reset = h.reset();

        reset.request_reset("root@example.com").await.unwrap();
        let sent = h.mailer.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Password Reset Request");
        assert!(sent[0].text.contains("/admin/forgot-password/"));

        let (uid, token) = link_parts(&sent[0].text);
        reset
            .confirm_reset(&uid, &token, new_password("N3w@Secret"))
            .await
            .unwrap();

        let login = h
            .auth()
            .login(LoginRequest {
                username: "root".into(),
                password: "N3w@Secret".into(),
            })
            .await;
        assert!(login.is_ok());

        let err = reset
            .confirm_reset(&uid, &token, new_password("An0ther@One"))
            .await
            .unwrap_err();
        assert_eq!(err.message, INVALID_TOKEN);
    }

    #[tokio::test]
    async fn test_bad_link_parts() {
        let h = Harness::new().await;
        h.super_admin().await;
        let reset = h.reset();

        let err = reset
            .confirm_reset("!!!", "token", new_password(TEST_PASSWORD))
            .await
            .unwrap_err();
        assert_eq!(err.message, INVALID_LINK);

        reset.request_reset("root@example.com").await.unwrap();
        let (uid, _) = link_parts(&h.mailer.sent().await[0].text);
        let err = reset
            .confirm_reset(&uid, "garbage", new_password(TEST_PASSWORD))
            .await
            .unwrap_err();
        assert_eq!(err.message, INVALID_TOKEN);
    }

    #[tokio::test]
    async fn test_mismatch_and_short_password() {
        let h = Harness::new().await;
        h.super_admin().await;
        let reset = h.reset();
        reset.request_reset("root@example.com").await.unwrap();
        let (uid, token) = link_parts(&h.mailer.sent().await[0].text);

        let err = reset
            .confirm_reset(
                &uid,
                &token,
                ResetPasswordRequest {
                    password: "N3w@Secret".into(),
                    confirm_password: "N3w@Secret!".into(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.message, "Passwords do not match.");

        let err = reset
            .confirm_reset(&uid, &token, new_password("short"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_mail_failure_is_not_reported() {
        let h = Harness::new().await;
        h.super_admin().await;
        h.mailer.set_failing(true);
        assert!(h.reset().request_reset("root@example.com").await.is_ok());
    }
}
