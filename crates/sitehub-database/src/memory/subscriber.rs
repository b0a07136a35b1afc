use async_trait::async_trait;
use chrono::{DateTime, Utc};

use sitehub_core::error::AppError;
use sitehub_core::result::AppResult;
use sitehub_core::types::SubscriberId;
use sitehub_entity::subscriber::Subscriber;

use super::MemoryDatabase;
use crate::store::SubscriberStore;

/// In-memory subscriber store.
#[derive(Debug, Clone)]
pub struct MemorySubscriberStore {
    db: MemoryDatabase,
}

impl MemorySubscriberStore {
    /// Create a store over `db`.
    pub fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubscriberStore for MemorySubscriberStore {
    async fn create(&self, email: &str) -> AppResult<Subscriber> {
        let mut tables = self.db.lock().await;
        if tables.subscribers.iter().any(|s| s.email == email) {
            return Err(AppError::conflict("Email already subscribed!"));
        }
        let subscriber = Subscriber {
            id: SubscriberId::new(),
            email: email.to_string(),
            subscribed_at: Utc::now(),
            is_active: true,
        };
        tables.subscribers.push(subscriber.clone());
        Ok(subscriber)
    }

    async fn find_by_id(&self, id: SubscriberId) -> AppResult<Option<Subscriber>> {
        let tables = self.db.lock().await;
        Ok(tables.subscribers.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Subscriber>> {
        let tables = self.db.lock().await;
        Ok(tables
            .subscribers
            .iter()
            .find(|s| s.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<Subscriber>> {
        let tables = self.db.lock().await;
        Ok(tables.subscribers.iter().rev().cloned().collect())
    }

    async fn active_emails(&self) -> AppResult<Vec<String>> {
        let tables = self.db.lock().await;
        Ok(tables
            .subscribers
            .iter()
            .filter(|s| s.is_active)
            .map(|s| s.email.clone())
            .collect())
    }

    async fn set_active(&self, id: SubscriberId, active: bool) -> AppResult<()> {
        let mut tables = self.db.lock().await;
        if let Some(subscriber) = tables.subscribers.iter_mut().find(|s| s.id == id) {
            subscriber.is_active = active;
        }
        Ok(())
    }

    async fn delete(&self, id: SubscriberId) -> AppResult<bool> {
        let mut tables = self.db.lock().await;
        let before = tables.subscribers.len();
        tables.subscribers.retain(|s| s.id != id);
        Ok(tables.subscribers.len() < before)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.db.lock().await.subscribers.len() as u64)
    }

    async fn count_since(&self, since: DateTime<Utc>) -> AppResult<u64> {
        let tables = self.db.lock().await;
        Ok(tables
            .subscribers
            .iter()
            .filter(|s| s.subscribed_at >= since)
            .count() as u64)
    }
}
