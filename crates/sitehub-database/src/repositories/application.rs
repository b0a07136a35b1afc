//! Career application repository.

use async_trait::async_trait;
use sqlx::PgPool;

use sitehub_core::error::AppError;
use sitehub_core::result::AppResult;
use sitehub_core::types::ApplicationId;
use sitehub_entity::application::{CareerApplication, NewApplication};

use super::db_error;
use crate::store::{ApplicationQuery, ApplicationStore};

/// PostgreSQL career application repository.
#[derive(Debug, Clone)]
pub struct ApplicationRepository {
    pool: PgPool,
}

impl ApplicationRepository {
    /// Create a new application repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationStore for ApplicationRepository {
    async fn create(&self, data: &NewApplication) -> AppResult<CareerApplication> {
        sqlx::query_as::<_, CareerApplication>(
            "INSERT INTO career_applications \
                (id, career_id, applicant_name, applicant_email, cover_letter, resume_path) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(ApplicationId::new())
        .bind(data.career_id)
        .bind(&data.applicant_name)
        .bind(&data.applicant_email)
        .bind(&data.cover_letter)
        .bind(&data.resume_path)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create application"))
    }

    async fn find_by_id(&self, id: ApplicationId) -> AppResult<Option<CareerApplication>> {
        sqlx::query_as::<_, CareerApplication>("SELECT * FROM career_applications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find application"))
    }

    async fn list(&self, query: &ApplicationQuery) -> AppResult<Vec<CareerApplication>> {
        let pattern = query.search.as_ref().map(|s| format!("%{s}%"));
        sqlx::query_as::<_, CareerApplication>(
            "SELECT * FROM career_applications \
             WHERE ($1::uuid IS NULL OR career_id = $1) \
               AND ($2::application_status IS NULL OR status = $2) \
               AND ($3::text IS NULL OR applicant_name ILIKE $3 OR applicant_email ILIKE $3) \
             ORDER BY applied_at DESC",
        )
        .bind(query.career)
        .bind(query.status)
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list applications"))
    }

    async fn save(&self, application: &CareerApplication) -> AppResult<CareerApplication> {
        sqlx::query_as::<_, CareerApplication>(
            "UPDATE career_applications SET \
                applicant_name = $2, applicant_email = $3, cover_letter = $4, \
                resume_path = $5, status = $6 \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(application.id)
        .bind(&application.applicant_name)
        .bind(&application.applicant_email)
        .bind(&application.cover_letter)
        .bind(&application.resume_path)
        .bind(application.status)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update application"))?
        .ok_or_else(|| AppError::not_found("Application not found"))
    }

    async fn delete(&self, id: ApplicationId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM career_applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete application"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM career_applications")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count applications"))?;
        Ok(total as u64)
    }

    async fn latest(&self) -> AppResult<Option<CareerApplication>> {
        sqlx::query_as::<_, CareerApplication>(
            "SELECT * FROM career_applications ORDER BY applied_at DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to fetch latest application"))
    }
}
