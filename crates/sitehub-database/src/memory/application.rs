use async_trait::async_trait;
use chrono::Utc;

use sitehub_core::error::AppError;
use sitehub_core::result::AppResult;
use sitehub_core::types::ApplicationId;
use sitehub_entity::application::{ApplicationStatus, CareerApplication, NewApplication};
use sitehub_entity::content::ContentKind;

use super::{MemoryDatabase, ilike};
use crate::store::{ApplicationQuery, ApplicationStore};

/// In-memory career application store.
#[derive(Debug, Clone)]
pub struct MemoryApplicationStore {
    db: MemoryDatabase,
}

impl MemoryApplicationStore {
    /// Create a store over `db`.
    pub fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

fn matches(application: &CareerApplication, query: &ApplicationQuery) -> bool {
    query.career.is_none_or(|c| application.career_id == c)
        && query.status.is_none_or(|s| application.status == s)
        && query.search.as_deref().is_none_or(|term| {
            ilike(&application.applicant_name, term) || ilike(&application.applicant_email, term)
        })
}

#[async_trait]
impl ApplicationStore for MemoryApplicationStore {
    async fn create(&self, data: &NewApplication) -> AppResult<CareerApplication> {
        let mut tables = self.db.lock().await;
        let career_exists = tables
            .content
            .iter()
            .any(|e| e.id == data.career_id && e.kind == ContentKind::Career);
        if !career_exists {
            return Err(AppError::database(
                "Failed to create application: career does not exist",
            ));
        }

        let application = CareerApplication {
            id: ApplicationId::new(),
            career_id: data.career_id,
            applicant_name: data.applicant_name.clone(),
            applicant_email: data.applicant_email.clone(),
            cover_letter: data.cover_letter.clone(),
            resume_path: data.resume_path.clone(),
            status: ApplicationStatus::Pending,
            applied_at: Utc::now(),
        };
        tables.applications.push(application.clone());
        Ok(application)
    }

    async fn find_by_id(&self, id: ApplicationId) -> AppResult<Option<CareerApplication>> {
        let tables = self.db.lock().await;
        Ok(tables.applications.iter().find(|a| a.id == id).cloned())
    }

    async fn list(&self, query: &ApplicationQuery) -> AppResult<Vec<CareerApplication>> {
        let tables = self.db.lock().await;
        Ok(tables
            .applications
            .iter()
            .rev()
            .filter(|a| matches(a, query))
            .cloned()
            .collect())
    }

    async fn save(&self, application: &CareerApplication) -> AppResult<CareerApplication> {
        let mut tables = self.db.lock().await;
        let stored = tables
            .applications
            .iter_mut()
            .find(|a| a.id == application.id)
            .ok_or_else(|| AppError::not_found("Application not found"))?;
        stored.applicant_name = application.applicant_name.clone();
        stored.applicant_email = application.applicant_email.clone();
        stored.cover_letter = application.cover_letter.clone();
        stored.resume_path = application.resume_path.clone();
        stored.status = application.status;
        Ok(stored.clone())
    }

    async fn delete(&self, id: ApplicationId) -> AppResult<bool> {
        let mut tables = self.db.lock().await;
        let before = tables.applications.len();
        tables.applications.retain(|a| a.id != id);
        Ok(tables.applications.len() < before)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.db.lock().await.applications.len() as u64)
    }

    async fn latest(&self) -> AppResult<Option<CareerApplication>> {
        Ok(self.db.lock().await.applications.last().cloned())
    }
}
