//! Content record repository.
//!
//! Attribute names reaching the SQL come from the per-kind whitelists on
//! [`ContentKind`] and are still passed as bind parameters.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use sitehub_core::result::AppResult;
use sitehub_core::types::ContentId;
use sitehub_entity::content::{ContentEntry, ContentKind, SortKey};

use super::db_error;
use crate::store::{ContentPage, ContentQuery, ContentStore};

/// PostgreSQL content repository.
#[derive(Debug, Clone)]
pub struct ContentRepository {
    pool: PgPool,
}

impl ContentRepository {
    /// Create a new content repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append the `WHERE` clause shared by the listing and its count.
fn push_conditions(qb: &mut QueryBuilder<'_, Postgres>, kind: ContentKind, query: &ContentQuery) {
    qb.push(" WHERE kind = ").push_bind(kind);

    for (field, value) in &query.filters {
        qb.push(" AND data->>")
            .push_bind(*field)
            .push(" = ")
            .push_bind(value.clone());
    }

    if let Some((fields, term)) = &query.search {
        if !fields.is_empty() {
            let pattern = format!("%{term}%");
            qb.push(" AND (");
            for (i, field) in fields.iter().enumerate() {
                if i > 0 {
                    qb.push(" OR ");
                }
                qb.push("data->>")
                    .push_bind(*field)
                    .push(" ILIKE ")
                    .push_bind(pattern.clone());
            }
            qb.push(")");
        }
    }
}

/// Append the kind's default `ORDER BY`.
fn push_order(qb: &mut QueryBuilder<'_, Postgres>, kind: ContentKind) {
    let order = kind.ordering();
    let direction = if order.descending { "DESC" } else { "ASC" };
    qb.push(" ORDER BY ");
    match order.key {
        SortKey::CreatedAt => {
            qb.push("created_at ").push(direction);
        }
        SortKey::Field(field) => {
            qb.push("data->>")
                .push_bind(field)
                .push(" ")
                .push(direction)
                .push(", created_at ")
                .push(direction);
        }
    }
    qb.push(", id ").push(direction);
}

#[async_trait]
impl ContentStore for ContentRepository {
    async fn insert(&self, kind: ContentKind, data: serde_json::Value) -> AppResult<ContentEntry> {
        sqlx::query_as::<_, ContentEntry>(
            "INSERT INTO content_records (id, kind, data) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(ContentId::new())
        .bind(kind)
        .bind(data)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to insert content record"))
    }

    async fn find(&self, kind: ContentKind, id: ContentId) -> AppResult<Option<ContentEntry>> {
        sqlx::query_as::<_, ContentEntry>(
            "SELECT * FROM content_records WHERE kind = $1 AND id = $2",
        )
        .bind(kind)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find content record"))
    }

    async fn list(&self, kind: ContentKind, query: &ContentQuery) -> AppResult<ContentPage> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM content_records");
        push_conditions(&mut count, kind, query);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count content records"))?;

        let mut select = QueryBuilder::<Postgres>::new("SELECT * FROM content_records");
        push_conditions(&mut select, kind, query);
        push_order(&mut select, kind);
        if let Some(page) = query.page {
            select
                .push(" LIMIT ")
                .push_bind(page.limit() as i64)
                .push(" OFFSET ")
                .push_bind(page.offset() as i64);
        }

        let entries = select
            .build_query_as::<ContentEntry>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list content records"))?;

        Ok(ContentPage {
            entries,
            total: total as u64,
        })
    }

    async fn replace(
        &self,
        kind: ContentKind,
        id: ContentId,
        data: serde_json::Value,
    ) -> AppResult<Option<ContentEntry>> {
        sqlx::query_as::<_, ContentEntry>(
            "UPDATE content_records SET data = $3, updated_at = NOW() \
             WHERE kind = $1 AND id = $2 \
             RETURNING *",
        )
        .bind(kind)
        .bind(id)
        .bind(data)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update content record"))
    }

    async fn increment(
        &self,
        kind: ContentKind,
        id: ContentId,
        field: &'static str,
    ) -> AppResult<Option<ContentEntry>> {
        sqlx::query_as::<_, ContentEntry>(
            "UPDATE content_records \
             SET data = jsonb_set(data, ARRAY[$3::text], \
                    to_jsonb(COALESCE((data->>$3::text)::bigint, 0) + 1)), \
                 updated_at = NOW() \
             WHERE kind = $1 AND id = $2 \
             RETURNING *",
        )
        .bind(kind)
        .bind(id)
        .bind(field)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to increment content counter"))
    }

    async fn delete(&self, kind: ContentKind, id: ContentId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM content_records WHERE kind = $1 AND id = $2")
            .bind(kind)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete content record"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, kind: ContentKind) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM content_records WHERE kind = $1")
            .bind(kind)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count content records"))?;
        Ok(total as u64)
    }

    async fn latest(&self, kind: ContentKind) -> AppResult<Option<ContentEntry>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM content_records WHERE kind = ");
        qb.push_bind(kind).push(" ORDER BY ");
        match kind.recency() {
            SortKey::CreatedAt => {
                qb.push("created_at DESC");
            }
            SortKey::Field(field) => {
                qb.push("data->>")
                    .push_bind(field)
                    .push(" DESC NULLS LAST, created_at DESC");
            }
        }
        qb.push(" LIMIT 1");

        qb.build_query_as::<ContentEntry>()
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to fetch latest content record"))
    }
}
