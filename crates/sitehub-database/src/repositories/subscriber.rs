//! Newsletter subscriber repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use sitehub_core::error::{AppError, ErrorKind};
use sitehub_core::result::AppResult;
use sitehub_core::types::SubscriberId;
use sitehub_entity::subscriber::Subscriber;

use super::{db_error, violated_constraint};
use crate::store::SubscriberStore;

/// PostgreSQL subscriber repository.
#[derive(Debug, Clone)]
pub struct SubscriberRepository {
    pool: PgPool,
}

impl SubscriberRepository {
    /// Create a new subscriber repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriberStore for SubscriberRepository {
    async fn create(&self, email: &str) -> AppResult<Subscriber> {
        sqlx::query_as::<_, Subscriber>(
            "INSERT INTO subscribers (id, email) VALUES ($1, $2) RETURNING *",
        )
        .bind(SubscriberId::new())
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some("subscribers_email_key") => AppError::conflict("Email already subscribed!"),
            _ => AppError::with_source(ErrorKind::Database, "Failed to create subscriber", e),
        })
    }

    async fn find_by_id(&self, id: SubscriberId) -> AppResult<Option<Subscriber>> {
        sqlx::query_as::<_, Subscriber>("SELECT * FROM subscribers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find subscriber"))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Subscriber>> {
        sqlx::query_as::<_, Subscriber>(
            "SELECT * FROM subscribers WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find subscriber by email"))
    }

    async fn list(&self) -> AppResult<Vec<Subscriber>> {
        sqlx::query_as::<_, Subscriber>("SELECT * FROM subscribers ORDER BY subscribed_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list subscribers"))
    }

    async fn active_emails(&self) -> AppResult<Vec<String>> {
        sqlx::query_scalar("SELECT email FROM subscribers WHERE is_active ORDER BY subscribed_at")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list active subscribers"))
    }

    async fn set_active(&self, id: SubscriberId, active: bool) -> AppResult<()> {
        sqlx::query("UPDATE subscribers SET is_active = $2 WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to update subscriber"))?;
        Ok(())
    }

    async fn delete(&self, id: SubscriberId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM subscribers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete subscriber"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subscribers")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count subscribers"))?;
        Ok(total as u64)
    }

    async fn count_since(&self, since: DateTime<Utc>) -> AppResult<u64> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM subscribers WHERE subscribed_at >= $1")
                .bind(since)
                .fetch_one(&self.pool)
                .await
                .map_err(db_error("Failed to count recent subscribers"))?;
        Ok(total as u64)
    }
}
