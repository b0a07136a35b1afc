//! Proposal request repository.

use async_trait::async_trait;
use sqlx::PgPool;

use sitehub_core::error::AppError;
use sitehub_core::result::AppResult;
use sitehub_core::types::ProposalId;
use sitehub_entity::proposal::{NewProposal, ProposalChanges, ProposalRequest};

use super::db_error;
use crate::store::ProposalStore;

/// PostgreSQL proposal request repository.
#[derive(Debug, Clone)]
pub struct ProposalRepository {
    pool: PgPool,
}

impl ProposalRepository {
    /// Create a new proposal repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProposalStore for ProposalRepository {
    async fn create(&self, data: &NewProposal) -> AppResult<ProposalRequest> {
        sqlx::query_as::<_, ProposalRequest>(
            "INSERT INTO proposal_requests (id, name, email, service_interest, details) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(ProposalId::new())
        .bind(&data.name)
        .bind(data.email.as_deref())
        .bind(data.service_interest)
        .bind(&data.details)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create proposal request"))
    }

    async fn find_by_id(&self, id: ProposalId) -> AppResult<Option<ProposalRequest>> {
        sqlx::query_as::<_, ProposalRequest>("SELECT * FROM proposal_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find proposal request"))
    }

    async fn list(&self) -> AppResult<Vec<ProposalRequest>> {
        sqlx::query_as::<_, ProposalRequest>(
            "SELECT * FROM proposal_requests ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list proposal requests"))
    }

    async fn update(
        &self,
        id: ProposalId,
        changes: &ProposalChanges,
    ) -> AppResult<ProposalRequest> {
        // $3 carries "was email supplied" so an explicit null can clear it.
        sqlx::query_as::<_, ProposalRequest>(
            "UPDATE proposal_requests SET \
                name = COALESCE($2, name), \
                email = CASE WHEN $3 THEN $4 ELSE email END, \
                service_interest = COALESCE($5, service_interest), \
                details = COALESCE($6, details), \
                status = COALESCE($7, status), \
                admin_response = COALESCE($8, admin_response), \
                proposal_document = COALESCE($9, proposal_document) \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(changes.name.as_deref())
        .bind(changes.email.is_some())
        .bind(changes.email.clone().flatten())
        .bind(changes.service_interest)
        .bind(changes.details.as_deref())
        .bind(changes.status)
        .bind(changes.admin_response.as_deref())
        .bind(changes.proposal_document.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update proposal request"))?
        .ok_or_else(|| AppError::not_found("Proposal request not found"))
    }

    async fn delete(&self, id: ProposalId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM proposal_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete proposal request"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM proposal_requests")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count proposal requests"))?;
        Ok(total as u64)
    }

    async fn latest(&self) -> AppResult<Option<ProposalRequest>> {
        sqlx::query_as::<_, ProposalRequest>(
            "SELECT * FROM proposal_requests ORDER BY created_at DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to fetch latest proposal request"))
    }
}
