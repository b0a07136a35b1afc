//! JSON shape of a career application.

use chrono::{DateTime, Utc};
use serde::Serialize;

use sitehub_core::types::{ApplicationId, ContentId};
use sitehub_entity::application::{ApplicationStatus, CareerApplication};

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationView {
    pub id: ApplicationId,
    pub career: ContentId,
    pub applicant_name: String,
    pub applicant_email: String,
    pub cover_letter: String,
    /// Storage path of the uploaded resume.
    pub resume: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

impl From<CareerApplication> for ApplicationView {
    fn from(app: CareerApplication) -> Self {
        Self {
            id: app.id,
            career: app.career_id,
            applicant_name: app.applicant_name,
            applicant_email: app.applicant_email,
            cover_letter: app.cover_letter,
            resume: app.resume_path,
            status: app.status,
            applied_at: app.applied_at,
        }
    }
}
