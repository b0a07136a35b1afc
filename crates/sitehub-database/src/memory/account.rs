use async_trait::async_trait;
use chrono::{DateTime, Utc};

use sitehub_core::error::AppError;
use sitehub_core::result::AppResult;
use sitehub_core::types::AccountId;
use sitehub_entity::account::{Account, AccountChanges, NewAccount, Role};

use super::{MemoryDatabase, Tables};
use crate::store::{AccountStore, SUPER_ADMIN_TAKEN};

/// In-memory account store.
#[derive(Debug, Clone)]
pub struct MemoryAccountStore {
    db: MemoryDatabase,
}

impl MemoryAccountStore {
    /// Create a store over `db`.
    pub fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

/// Check the unique constraints for `candidate`, ignoring the row itself.
fn check_unique(tables: &Tables, candidate: &Account) -> AppResult<()> {
    for other in tables.accounts.iter().filter(|a| a.id != candidate.id) {
        if other.username == candidate.username {
            return Err(AppError::field(
                "username",
                "A user with that username already exists.",
            ));
        }
        if other.email == candidate.email {
            return Err(AppError::field(
                "email",
                "A user with that email already exists.",
            ));
        }
        if other.role == Role::SuperAdmin && candidate.role == Role::SuperAdmin {
            return Err(AppError::field("is_super_admin", SUPER_ADMIN_TAKEN));
        }
    }
    Ok(())
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        let tables = self.db.lock().await;
        Ok(tables.accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        let tables = self.db.lock().await;
        Ok(tables
            .accounts
            .iter()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let tables = self.db.lock().await;
        Ok(tables
            .accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_super_admin(&self) -> AppResult<Option<Account>> {
        let tables = self.db.lock().await;
        Ok(tables
            .accounts
            .iter()
            .find(|a| a.role == Role::SuperAdmin)
            .cloned())
    }

    async fn list_admins(&self) -> AppResult<Vec<Account>> {
        let tables = self.db.lock().await;
        Ok(tables
            .accounts
            .iter()
            .filter(|a| a.role.is_admin())
            .cloned()
            .collect())
    }

    async fn count_admins(&self) -> AppResult<u64> {
        let tables = self.db.lock().await;
        Ok(tables.accounts.iter().filter(|a| a.role.is_admin()).count() as u64)
    }

    async fn create(&self, data: &NewAccount) -> AppResult<Account> {
        let mut tables = self.db.lock().await;
        let account = Account {
            id: AccountId::new(),
            username: data.username.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            role: data.role,
            is_active: true,
            date_joined: Utc::now(),
            last_login: None,
        };
        check_unique(&tables, &account)?;
        tables.accounts.push(account.clone());
        Ok(account)
    }

    async fn update(&self, id: AccountId, changes: &AccountChanges) -> AppResult<Account> {
        let mut tables = self.db.lock().await;
        let position = tables
            .accounts
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| AppError::not_found("Account not found"))?;

        let mut updated = tables.accounts[position].clone();
        changes.apply_to(&mut updated);
        check_unique(&tables, &updated)?;
        tables.accounts[position] = updated.clone();
        Ok(updated)
    }

    async fn touch_last_login(&self, id: AccountId, at: DateTime<Utc>) -> AppResult<()> {
        let mut tables = self.db.lock().await;
        if let Some(account) = tables.accounts.iter_mut().find(|a| a.id == id) {
            account.last_login = Some(at);
        }
        Ok(())
    }

    async fn delete(&self, id: AccountId) -> AppResult<bool> {
        let mut tables = self.db.lock().await;
        let before = tables.accounts.len();
        tables.accounts.retain(|a| a.id != id);
        Ok(tables.accounts.len() < before)
    }
}
