//! Career application intake and review.
//!
//! Status changes go through [`transition`] and [`on_admin_view`]: the new
//! status is saved first, then the applicant notice (if any) is sent. A
//! failed notice is logged and never undoes the saved status.

use std::sync::Arc;

use tracing::{error, info, warn};
use validator::{Validate, ValidationError};

use sitehub_core::error::AppError;
use sitehub_core::traits::storage::StorageProvider;
use sitehub_core::types::{ApplicationId, ContentId};
use sitehub_database::store::{ApplicationQuery, ApplicationStore, ContentStore};
use sitehub_entity::application::model::is_allowed_resume;
use sitehub_entity::application::{
    ApplicationChanges, ApplicationNotice, ApplicationStatus, CareerApplication, NewApplication,
    on_admin_view, transition,
};
use sitehub_entity::content::{Career, Content, ContentKind};
use sitehub_mail::{MailMessage, Mailer};
use sitehub_storage::sanitize_file_name;

use super::notice::notice_email;
use crate::context::RequestContext;
use crate::upload::UploadedFile;

const LISTING_CLOSED: &str = "This job listing is no longer active.";
const NO_FILE: &str = "No file was submitted.";

/// A submitted application form.
#[derive(Debug, Clone, Default, Validate)]
pub struct ApplyRequest {
    #[validate(length(min = 1, max = 255, message = "This field may not be blank."))]
    pub applicant_name: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub applicant_email: String,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub cover_letter: String,
    /// Raw career id as submitted.
    pub career: Option<String>,
    /// Checked in `apply` together with the derived rules.
    pub resume: Option<UploadedFile>,
}

/// Handles career applications.
#[derive(Debug, Clone)]
pub struct ApplicationService {
    applications: Arc<dyn ApplicationStore>,
    content: Arc<dyn ContentStore>,
    storage: Arc<dyn StorageProvider>,
    mailer: Arc<dyn Mailer>,
    sender: String,
}

impl ApplicationService {
    /// Creates a new application service. `sender` is the address applicant
    /// notices come from.
    pub fn new(
        applications: Arc<dyn ApplicationStore>,
        content: Arc<dyn ContentStore>,
        storage: Arc<dyn StorageProvider>,
        mailer: Arc<dyn Mailer>,
        sender: impl Into<String>,
    ) -> Self {
        Self {
            applications,
            content,
            storage,
            mailer,
            sender: sender.into(),
        }
    }

    async fn find_career(&self, id: ContentId) -> Result<Option<Career>, AppError> {
        match self.content.find(ContentKind::Career, id).await? {
            Some(entry) => Ok(Some(Content::<Career>::from_entry(entry)?.record)),
            None => Ok(None),
        }
    }

    /// Accepts a public application for an active listing.
    pub async fn apply(&self, req: ApplyRequest) -> Result<CareerApplication, AppError> {
        let career_id = req
            .career
            .as_deref()
            .and_then(|raw| raw.trim().parse::<ContentId>().ok())
            .ok_or_else(|| AppError::validation(LISTING_CLOSED))?;
        match self.find_career(career_id).await? {
            Some(career) if career.active_listing => {}
            _ => return Err(AppError::validation(LISTING_CLOSED)),
        }

        let mut errors = req.validate().err().unwrap_or_default();
        if req.resume.is_none() {
            errors.add(
                "resume",
                ValidationError::new("required").with_message(NO_FILE.into()),
            );
        }
        if !errors.is_empty() {
            return Err(errors.into());
        }
        let resume = req
            .resume
            .ok_or_else(|| AppError::field("resume", NO_FILE))?;
        if !is_allowed_resume(&resume.file_name) {
            return Err(AppError::field(
                "resume",
                "Only PDF, DOC, and DOCX files are allowed.",
            ));
        }

        let resume_path = self
            .storage
            .save(
                &format!("resumes/{}", sanitize_file_name(&resume.file_name)),
                resume.data,
            )
            .await?;

        let created = self
            .applications
            .create(&NewApplication {
                career_id,
                applicant_name: req.applicant_name,
                applicant_email: req.applicant_email,
                cover_letter: req.cover_letter,
                resume_path: resume_path.clone(),
            })
            .await;

        match created {
            Ok(application) => {
                info!(application_id = %application.id, career_id = %career_id, "Application received");
                Ok(application)
            }
            Err(e) => {
                if let Err(cleanup) = self.storage.delete(&resume_path).await {
                    warn!(path = %resume_path, error = %cleanup, "Failed to remove orphaned resume");
                }
                Err(e)
            }
        }
    }

    /// Lists applications, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: &ApplicationQuery,
    ) -> Result<Vec<CareerApplication>, AppError> {
        ctx.require_staff()?;
        self.applications.list(query).await
    }

    async fn find(&self, id: ApplicationId) -> Result<CareerApplication, AppError> {
        self.applications
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Application not found"))
    }

    /// Returns an application to staff. A pending application becomes
    /// reviewed the first time it is opened.
    pub async fn retrieve(
        &self,
        ctx: &RequestContext,
        id: ApplicationId,
    ) -> Result<CareerApplication, AppError> {
        ctx.require_staff()?;
        let mut application = self.find(id).await?;

        let step = on_admin_view(application.status);
        if step.changed {
            application.status = step.status;
            application = self.applications.save(&application).await?;
            info!(application_id = %id, "Application marked as reviewed");
        }
        Ok(application)
    }

    /// Edits an application. A status change to shortlisted, rejected or
    /// hired emails the applicant once the change is saved.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: ApplicationId,
        changes: ApplicationChanges,
    ) -> Result<CareerApplication, AppError> {
        ctx.require_staff()?;
        changes.validate()?;
        let mut application = self.find(id).await?;

        changes.apply_fields(&mut application);
        let notice = match changes.status {
            Some(requested) => {
                let step = transition(application.status, requested);
                application.status = step.status;
                step.notice
            }
            None => None,
        };

        let saved = self.applications.save(&application).await?;
        if let Some(notice) = notice {
            self.notify(&saved, notice).await;
        }
        Ok(saved)
    }

    /// Moves an application to `status` through an explicit action.
    /// Returns the saved application and the confirmation message.
    pub async fn set_status(
        &self,
        ctx: &RequestContext,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<(CareerApplication, &'static str), AppError> {
        let application = self
            .update(
                ctx,
                id,
                ApplicationChanges {
                    status: Some(status),
                    ..Default::default()
                },
            )
            .await?;
        Ok((application, action_message(status)))
    }

    /// Deletes an application and its resume.
    pub async fn delete(&self, ctx: &RequestContext, id: ApplicationId) -> Result<(), AppError> {
        ctx.require_staff()?;
        let application = self.find(id).await?;
        self.applications.delete(id).await?;
        if let Err(e) = self.storage.delete(&application.resume_path).await {
            warn!(application_id = %id, error = %e, "Failed to remove resume");
        }
        info!(actor = %ctx.account_id, application_id = %id, "Application deleted");
        Ok(())
    }

    /// Sends the applicant notice. Failures are logged only.
    async fn notify(&self, application: &CareerApplication, notice: ApplicationNotice) {
        if application.applicant_email.trim().is_empty() {
            error!(
                application_id = %application.id,
                applicant = %application.applicant_name,
                "Missing email for applicant"
            );
            return;
        }

        let position = match self.find_career(application.career_id).await {
            Ok(Some(career)) => career.title,
            Ok(None) => {
                error!(application_id = %application.id, "Career listing vanished before notice");
                return;
            }
            Err(e) => {
                error!(application_id = %application.id, error = %e, "Failed to load career for notice");
                return;
            }
        };

        let (subject, body) = notice_email(notice, &application.applicant_name, &position);
        let message = MailMessage::new(application.applicant_email.clone(), subject, body)
            .from(self.sender.clone());
        match self.mailer.send(&message).await {
            Ok(()) => info!(
                application_id = %application.id,
                to = %application.applicant_email,
                status = %application.status,
                "Applicant notified"
            ),
            Err(e) => error!(
                application_id = %application.id,
                to = %application.applicant_email,
                error = %e,
                "Failed to notify applicant"
            ),
        }
    }
}

fn action_message(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Shortlisted => "Applicant shortlisted and interview email sent",
        ApplicationStatus::Rejected => "Applicant rejected and rejection email sent",
        ApplicationStatus::Hired => "Applicant hired and hiring email sent",
        ApplicationStatus::Pending | ApplicationStatus::Reviewed => "Application updated",
    }
}
