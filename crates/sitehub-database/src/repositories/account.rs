//! Account repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use sitehub_core::error::{AppError, ErrorKind};
use sitehub_core::result::AppResult;
use sitehub_core::types::AccountId;
use sitehub_entity::account::{Account, AccountChanges, NewAccount, Role};

use super::{db_error, violated_constraint};
use crate::store::{AccountStore, SUPER_ADMIN_TAKEN};

/// PostgreSQL account repository.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Create a new account repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Translate unique violations into the field errors clients see.
fn write_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| match violated_constraint(&e) {
        Some("accounts_single_super_admin") => AppError::field("is_super_admin", SUPER_ADMIN_TAKEN),
        Some("accounts_username_key") => {
            AppError::field("username", "A user with that username already exists.")
        }
        Some("accounts_email_key") => {
            AppError::field("email", "A user with that email already exists.")
        }
        _ => AppError::with_source(ErrorKind::Database, context, e),
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find account by id"))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find account by username"))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find account by email"))
    }

    async fn find_super_admin(&self) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE role = $1")
            .bind(Role::SuperAdmin)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find super admin"))
    }

    async fn list_admins(&self) -> AppResult<Vec<Account>> {
        sqlx::query_as::<_, Account>(
            "SELECT * FROM accounts WHERE role IN ('admin', 'super_admin') ORDER BY date_joined ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list admins"))
    }

    async fn count_admins(&self) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM accounts WHERE role IN ('admin', 'super_admin')",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count admins"))?;
        Ok(total as u64)
    }

    async fn create(&self, data: &NewAccount) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (id, username, email, password_hash, first_name, last_name, role) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(AccountId::new())
        .bind(&data.username)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error("Failed to create account"))
    }

    async fn update(&self, id: AccountId, changes: &AccountChanges) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "UPDATE accounts SET \
                username = COALESCE($2, username), \
                email = COALESCE($3, email), \
                password_hash = COALESCE($4, password_hash), \
                first_name = COALESCE($5, first_name), \
                last_name = COALESCE($6, last_name), \
                role = COALESCE($7, role), \
                is_active = COALESCE($8, is_active) \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(changes.username.as_deref())
        .bind(changes.email.as_deref())
        .bind(changes.password_hash.as_deref())
        .bind(changes.first_name.as_deref())
        .bind(changes.last_name.as_deref())
        .bind(changes.role)
        .bind(changes.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error("Failed to update account"))?
        .ok_or_else(|| AppError::not_found("Account not found"))
    }

    async fn touch_last_login(&self, id: AccountId, at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query("UPDATE accounts SET last_login = $2 WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to update last login"))?;
        Ok(())
    }

    async fn delete(&self, id: AccountId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete account"))?;
        Ok(result.rows_affected() > 0)
    }
}
