//! Career application entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use sitehub_core::types::{ApplicationId, ContentId};

use super::status::ApplicationStatus;

/// Allowed resume file extensions.
pub const RESUME_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

/// An application submitted against a career listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CareerApplication {
    /// Unique application identifier.
    pub id: ApplicationId,
    /// The career listing applied for.
    pub career_id: ContentId,
    /// Applicant full name.
    pub applicant_name: String,
    /// Applicant email address; notices go here.
    pub applicant_email: String,
    /// Free-form cover letter.
    pub cover_letter: String,
    /// Storage path of the uploaded resume.
    pub resume_path: String,
    /// Current lifecycle status.
    pub status: ApplicationStatus,
    /// When the application was submitted.
    pub applied_at: DateTime<Utc>,
}

/// Data required to create an application.
#[derive(Debug, Clone)]
pub struct NewApplication {
    /// The career listing applied for.
    pub career_id: ContentId,
    /// Applicant full name.
    pub applicant_name: String,
    /// Applicant email address.
    pub applicant_email: String,
    /// Free-form cover letter.
    pub cover_letter: String,
    /// Storage path of the uploaded resume.
    pub resume_path: String,
}

/// Admin edit of an application. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ApplicationChanges {
    /// New applicant name.
    #[validate(length(min = 1, max = 255))]
    pub applicant_name: Option<String>,
    /// New applicant email.
    #[validate(email(message = "Enter a valid email address."))]
    pub applicant_email: Option<String>,
    /// New cover letter.
    pub cover_letter: Option<String>,
    /// Requested status.
    pub status: Option<ApplicationStatus>,
}

impl ApplicationChanges {
    /// Copy the supplied fields onto `application`. The status is left to
    /// the transition rules.
    pub fn apply_fields(&self, application: &mut CareerApplication) {
        if let Some(name) = &self.applicant_name {
            application.applicant_name = name.clone();
        }
        if let Some(email) = &self.applicant_email {
            application.applicant_email = email.clone();
        }
        if let Some(letter) = &self.cover_letter {
            application.cover_letter = letter.clone();
        }
    }
}

/// Whether a resume file name carries an accepted extension.
pub fn is_allowed_resume(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| {
            RESUME_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_extensions() {
        assert!(is_allowed_resume("cv.pdf"));
        assert!(is_allowed_resume("Jane Doe.DOCX"));
        assert!(is_allowed_resume("resume.final.doc"));
        assert!(!is_allowed_resume("resume.exe"));
        assert!(!is_allowed_resume("pdf"));
        assert!(!is_allowed_resume("resume.pdf.zip"));
    }
}
