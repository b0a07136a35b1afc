//! Admin account management and the single super admin invariant.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

use sitehub_auth::password::{PasswordHasher, PasswordValidator};
use sitehub_core::config::{AuthConfig, BootstrapConfig};
use sitehub_core::error::AppError;
use sitehub_core::types::AccountId;
use sitehub_database::store::{AccountStore, SUPER_ADMIN_TAKEN};
use sitehub_entity::account::{Account, AccountChanges, NewAccount, Role};

use crate::context::RequestContext;

/// Password of the bootstrap super admin when none is configured.
const FALLBACK_BOOTSTRAP_PASSWORD: &str = "Admin@1234";

/// Request to create an admin account.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAdminRequest {
    #[validate(length(min = 1, max = 150, message = "Ensure this field has no more than 150 characters."))]
    pub username: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Accepted for compatibility; created accounts are always admins.
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_super_admin: bool,
}

/// Request to update an admin account. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAdminRequest {
    #[validate(length(min = 1, max = 150, message = "Ensure this field has no more than 150 characters."))]
    pub username: Option<String>,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_admin: Option<bool>,
    pub is_super_admin: Option<bool>,
    pub is_active: Option<bool>,
}

/// Manages admin accounts.
#[derive(Debug, Clone)]
pub struct AccountService {
    accounts: Arc<dyn AccountStore>,
    hasher: PasswordHasher,
    validator: PasswordValidator,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(accounts: Arc<dyn AccountStore>, auth: &AuthConfig) -> Self {
        Self {
            accounts,
            hasher: PasswordHasher::new(),
            validator: PasswordValidator::new(auth),
        }
    }

    /// Reject the request if another account already holds the super admin
    /// role. The store enforces the same rule atomically; this check only
    /// produces the friendlier error first.
    async fn ensure_super_admin_free(&self, except: Option<AccountId>) -> Result<(), AppError> {
        match self.accounts.find_super_admin().await? {
            Some(existing) if Some(existing.id) != except => {
                Err(AppError::field("is_super_admin", SUPER_ADMIN_TAKEN))
            }
            _ => Ok(()),
        }
    }

    /// Creates an admin (or the super admin) on behalf of the super admin.
    pub async fn create_admin(
        &self,
        ctx: &RequestContext,
        req: CreateAdminRequest,
    ) -> Result<Account, AppError> {
        ctx.require_super_admin()?;
        req.validate()?;
        self.validator
            .validate_confirmation(&req.password, &req.confirm_password)?;
        self.validator.validate(&req.password)?;

        let role = Role::from_flags(true, req.is_super_admin);
        if role.is_super_admin() {
            self.ensure_super_admin_free(None).await?;
        }

        let account = self
            .accounts
            .create(&NewAccount {
                username: req.username,
                email: req.email,
                password_hash: self.hasher.hash_password(&req.password)?,
                first_name: req.first_name,
                last_name: req.last_name,
                role,
            })
            .await?;

        info!(
            actor = %ctx.account_id,
            account_id = %account.id,
            username = %account.username,
            role = %account.role,
            "Admin account created"
        );
        Ok(account)
    }

    /// Creates the super admin outside a request (CLI).
    pub async fn create_super_admin(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Account, AppError> {
        self.validator.validate(password)?;
        self.ensure_super_admin_free(None).await?;

        let account = self
            .accounts
            .create(&NewAccount {
                username: username.to_string(),
                email: email.to_string(),
                password_hash: self.hasher.hash_password(password)?,
                first_name: String::new(),
                last_name: String::new(),
                role: Role::SuperAdmin,
            })
            .await?;

        info!(account_id = %account.id, username = %account.username, "Super admin created");
        Ok(account)
    }

    /// Creates the configured default super admin when none exists yet.
    pub async fn ensure_default_super_admin(
        &self,
        bootstrap: &BootstrapConfig,
    ) -> Result<Option<Account>, AppError> {
        if !bootstrap.enabled || self.accounts.find_super_admin().await?.is_some() {
            return Ok(None);
        }

        let password = if bootstrap.password.is_empty() {
            warn!(
                username = %bootstrap.username,
                "No bootstrap password configured, using the built-in default; change it after first login"
            );
            FALLBACK_BOOTSTRAP_PASSWORD
        } else {
            bootstrap.password.as_str()
        };

        let created = self
            .accounts
            .create(&NewAccount {
                username: bootstrap.username.clone(),
                email: bootstrap.email.clone(),
                password_hash: self.hasher.hash_password(password)?,
                first_name: String::new(),
                last_name: String::new(),
                role: Role::SuperAdmin,
            })
            .await;

        match created {
            Ok(account) => {
                info!(account_id = %account.id, username = %account.username, "Default super admin created");
                Ok(Some(account))
            }
            // Another instance won the race.
            Err(_) if self.accounts.find_super_admin().await?.is_some() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Lists accounts holding the admin flag.
    pub async fn list_admins(&self, ctx: &RequestContext) -> Result<Vec<Account>, AppError> {
        ctx.require_super_admin()?;
        self.accounts.list_admins().await
    }

    /// Gets an account by id.
    pub async fn get_admin(&self, ctx: &RequestContext, id: AccountId) -> Result<Account, AppError> {
        ctx.require_super_admin()?;
        self.find(id).await
    }

    async fn find(&self, id: AccountId) -> Result<Account, AppError> {
        self.accounts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Account not found"))
    }

    /// Updates an admin account.
    pub async fn update_admin(
        &self,
        ctx: &RequestContext,
        id: AccountId,
        req: UpdateAdminRequest,
    ) -> Result<Account, AppError> {
        ctx.require_super_admin()?;
        req.validate()?;
        let current = self.find(id).await?;

        let password_hash = match &req.password {
            Some(password) => {
                let confirm = req.confirm_password.as_deref().unwrap_or_default();
                self.validator.validate_confirmation(password, confirm)?;
                self.validator.validate(password)?;
                Some(self.hasher.hash_password(password)?)
            }
            None => None,
        };

        let role = if req.is_admin.is_some() || req.is_super_admin.is_some() {
            let role = Role::from_flags(
                req.is_admin.unwrap_or(current.role.is_admin()),
                req.is_super_admin.unwrap_or(current.role.is_super_admin()),
            );
            if role.is_super_admin() && !current.role.is_super_admin() {
                self.ensure_super_admin_free(Some(id)).await?;
            }
            Some(role)
        } else {
            None
        };

        let changes = AccountChanges {
            username: req.username,
            email: req.email,
            password_hash,
            first_name: req.first_name,
            last_name: req.last_name,
            role,
            is_active: req.is_active,
        };
        let account = self.accounts.update(id, &changes).await?;

        info!(actor = %ctx.account_id, account_id = %id, role = %account.role, "Admin account updated");
        Ok(account)
    }

    /// Deletes an admin account. The super admin and the caller's own
    /// account cannot be deleted.
    pub async fn delete_admin(&self, ctx: &RequestContext, id: AccountId) -> Result<(), AppError> {
        ctx.require_super_admin()?;
        if id == ctx.account_id {
            return Err(AppError::validation("You cannot delete your own account."));
        }

        let target = self.find(id).await?;
        if target.role.is_super_admin() {
            return Err(AppError::validation(
                "The super admin account cannot be deleted.",
            ));
        }

        self.accounts.delete(id).await?;
        info!(actor = %ctx.account_id, account_id = %id, "Admin account deleted");
        Ok(())
    }
}
