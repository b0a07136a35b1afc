//! Proposal request intake, review and delivery.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, error, info, warn};
use validator::Validate;

use sitehub_core::error::{AppError, ErrorKind};
use sitehub_core::traits::storage::StorageProvider;
use sitehub_core::types::ProposalId;
use sitehub_database::store::ProposalStore;
use sitehub_entity::proposal::{
    MarkReviewed, NewProposal, ProposalChanges, ProposalRequest, ProposalStatus, ServiceInterest,
};
use sitehub_mail::{Attachment, MailMessage, Mailer};
use sitehub_storage::sanitize_file_name;

use crate::context::{self, RequestContext};
use crate::upload::UploadedFile;

const DEFAULT_DOCUMENT_TYPE: &str = "application/pdf";

/// Public proposal request form. A client-supplied status is ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProposalRequest {
    #[validate(length(min = 1, max = 255, message = "This field may not be blank."))]
    pub name: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<String>,
    pub service_interest: ServiceInterest,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub details: String,
    #[serde(default)]
    pub status: Option<ProposalStatus>,
}

/// Response to a public proposal request.
#[derive(Debug, Clone, Serialize)]
pub struct ProposalCreated {
    pub id: ProposalId,
    pub name: String,
    pub email: Option<String>,
    pub service_interest: ServiceInterest,
    pub details: String,
    pub status: ProposalStatus,
}

impl From<ProposalRequest> for ProposalCreated {
    fn from(p: ProposalRequest) -> Self {
        Self {
            id: p.id,
            name: p.name,
            email: p.email,
            service_interest: p.service_interest,
            details: p.details,
            status: p.status,
        }
    }
}

/// Edit of a proposal request. `status` only applies for staff callers.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProposalRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    /// `null` clears the address.
    #[serde(default, deserialize_with = "nullable")]
    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<Option<String>>,
    pub service_interest: Option<ServiceInterest>,
    pub details: Option<String>,
    pub status: Option<ProposalStatus>,
    pub admin_response: Option<String>,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Handles proposal requests.
#[derive(Debug, Clone)]
pub struct ProposalService {
    proposals: Arc<dyn ProposalStore>,
    storage: Arc<dyn StorageProvider>,
    mailer: Arc<dyn Mailer>,
    company_name: String,
}

impl ProposalService {
    pub fn new(
        proposals: Arc<dyn ProposalStore>,
        storage: Arc<dyn StorageProvider>,
        mailer: Arc<dyn Mailer>,
        company_name: impl Into<String>,
    ) -> Self {
        Self {
            proposals,
            storage,
            mailer,
            company_name: company_name.into(),
        }
    }

    /// Records a public proposal request as pending.
    pub async fn create(&self, req: CreateProposalRequest) -> Result<ProposalRequest, AppError> {
        req.validate()?;
        if let Some(status) = req.status.filter(|s| *s != ProposalStatus::Pending) {
            debug!(requested = %status, "Ignoring client-supplied proposal status");
        }

        let proposal = self
            .proposals
            .create(&NewProposal {
                name: req.name,
                email: req.email.filter(|e| !e.is_empty()),
                service_interest: req.service_interest,
                details: req.details,
            })
            .await?;
        info!(proposal_id = %proposal.id, service = proposal.service_interest.label(), "Proposal request received");
        Ok(proposal)
    }

    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<ProposalRequest>, AppError> {
        ctx.require_staff()?;
        self.proposals.list().await
    }

    pub async fn retrieve(
        &self,
        ctx: &RequestContext,
        id: ProposalId,
    ) -> Result<ProposalRequest, AppError> {
        ctx.require_staff()?;
        self.find(id).await
    }

    async fn find(&self, id: ProposalId) -> Result<ProposalRequest, AppError> {
        self.proposals
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Proposal request not found"))
    }

    /// Edits a proposal request. Non-staff callers cannot change the status.
    pub async fn update(
        &self,
        ctx: Option<&RequestContext>,
        id: ProposalId,
        req: UpdateProposalRequest,
    ) -> Result<ProposalRequest, AppError> {
        req.validate()?;
        self.find(id).await?;

        let status = if context::is_staff(ctx) {
            req.status
        } else {
            if req.status.is_some() {
                debug!(proposal_id = %id, "Dropping status change from non-staff caller");
            }
            None
        };

        let changes = ProposalChanges {
            name: req.name,
            email: req.email,
            service_interest: req.service_interest,
            details: req.details,
            status,
            admin_response: req.admin_response,
            proposal_document: None,
        };
        self.proposals.update(id, &changes).await
    }

    pub async fn delete(&self, ctx: &RequestContext, id: ProposalId) -> Result<(), AppError> {
        ctx.require_staff()?;
        let proposal = self.find(id).await?;
        self.proposals.delete(id).await?;
        if let Some(path) = proposal.proposal_document {
            if let Err(e) = self.storage.delete(&path).await {
                warn!(proposal_id = %id, error = %e, "Failed to remove proposal document");
            }
        }
        Ok(())
    }

    /// Stores the document, marks the proposal sent, then emails the
    /// client with the document attached.
    ///
    /// The document and the `sent` status are saved before the email is
    /// attempted. If delivery fails the caller gets an error while the
    /// proposal stays `sent`.
    pub async fn send_proposal(
        &self,
        ctx: &RequestContext,
        id: ProposalId,
        admin_response: Option<String>,
        document: Option<UploadedFile>,
    ) -> Result<ProposalRequest, AppError> {
        ctx.require_staff()?;
        let proposal = self.find(id).await?;

        let (Some(response), Some(document)) =
            (admin_response.filter(|r| !r.trim().is_empty()), document)
        else {
            return Err(AppError::validation(
                "Admin response and document are required.",
            ));
        };
        let Some(recipient) = proposal.email.clone().filter(|e| !e.trim().is_empty()) else {
            error!(proposal_id = %id, "Proposal email is missing");
            return Err(AppError::validation("Proposal email is missing."));
        };

        let file_name = sanitize_file_name(&document.file_name);
        let content_type = document
            .content_type
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_DOCUMENT_TYPE.to_string());

        let path = self
            .storage
            .save(&format!("proposals/{file_name}"), document.data)
            .await
            .map_err(|e| storage_error("Failed to save document", e))?;
        let proposal = self
            .proposals
            .update(
                id,
                &ProposalChanges {
                    status: Some(ProposalStatus::Sent),
                    admin_response: Some(response.clone()),
                    proposal_document: Some(path.clone()),
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| storage_error("Failed to save document", e))?;

        let contents = self
            .storage
            .read_bytes(&path)
            .await
            .map_err(|e| storage_error("Failed to read document", e))?;

        let message = MailMessage::new(
            recipient.clone(),
            format!("Your Proposal from {} {}", self.company_name, ctx.username),
            format!(
                "Hello {},\n\n{response}\n\nPlease find your proposal document attached below.",
                proposal.name
            ),
        )
        .attach(Attachment {
            filename: file_name,
            content_type,
            data: contents,
        });

        if let Err(e) = self.mailer.send(&message).await {
            error!(
                proposal_id = %id,
                to = %recipient,
                error = %e,
                "Proposal marked sent but email delivery failed"
            );
            return Err(AppError::new(
                ErrorKind::ExternalService,
                format!("Failed to send email: {}", e.message),
            ));
        }

        info!(actor = %ctx.account_id, proposal_id = %id, to = %recipient, "Proposal sent");
        Ok(proposal)
    }

    /// Marks a proposal reviewed. Returns the confirmation message; a
    /// proposal that is already reviewed is left untouched.
    pub async fn mark_reviewed(
        &self,
        ctx: &RequestContext,
        id: ProposalId,
    ) -> Result<&'static str, AppError> {
        ctx.require_staff()?;
        let proposal = self.find(id).await?;

        match proposal.status.mark_reviewed() {
            MarkReviewed::AlreadyReviewed => Ok("Proposal is already marked as reviewed."),
            MarkReviewed::Apply => {
                self.proposals
                    .update(
                        id,
                        &ProposalChanges {
                            status: Some(ProposalStatus::Reviewed),
                            ..Default::default()
                        },
                    )
                    .await?;
                info!(proposal_id = %id, "Proposal marked as reviewed");
                Ok("Proposal marked as reviewed.")
            }
        }
    }
}

fn storage_error(context: &str, err: AppError) -> AppError {
    AppError::new(ErrorKind::Storage, format!("{context}: {}", err.message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;
    use bytes::Bytes;
    use sitehub_entity::account::Role;

    fn request(email: Option<&str>) -> CreateProposalRequest {
        CreateProposalRequest {
            name: "Acme Ltd".into(),
            email: email.map(str::to_string),
            service_interest: ServiceInterest::WebDevelopment,
            details: "A new storefront".into(),
            status: Some(ProposalStatus::Sent),
        }
    }

    fn document() -> UploadedFile {
        UploadedFile::new("Acme Proposal.pdf", None, Bytes::from_static(b"%PDF-1.4 proposal"))
    }

    #[tokio::test]
    async fn test_create_forces_pending() {
        let h = Harness::new().await;
        let proposal = h.proposals().create(request(Some("cto@acme.test"))).await.unwrap();
        assert_eq!(proposal.status, ProposalStatus::Pending);
    }

    #[tokio::test]
    async fn test_status_stripped_for_non_staff() {
        let h = Harness::new().await;
        let service = h.proposals();
        let proposal = service.create(request(Some("cto@acme.test"))).await.unwrap();
        let visitor = h.account("visitor", Role::User).await;

        for ctx in [None, Some(&visitor)] {
            let updated = service
                .update(
                    ctx,
                    proposal.id,
                    UpdateProposalRequest {
                        details: Some("Bigger scope".into()),
                        status: Some(ProposalStatus::Sent),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
            assert_eq!(updated.status, ProposalStatus::Pending);
            assert_eq!(updated.details, "Bigger scope");
        }

        let admin = h.admin("editor").await;
        let updated = service
            .update(
                Some(&admin),
                proposal.id,
                UpdateProposalRequest {
                    status: Some(ProposalStatus::Reviewed),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, ProposalStatus::Reviewed);
    }

    #[tokio::test]
    async fn test_mark_reviewed_is_idempotent() {
        let h = Harness::new().await;
        let admin = h.admin("editor").await;
        let service = h.proposals();
        let proposal = service.create(request(None)).await.unwrap();

        assert_eq!(
            service.mark_reviewed(&admin, proposal.id).await.unwrap(),
            "Proposal marked as reviewed."
        );
        assert_eq!(
            service.mark_reviewed(&admin, proposal.id).await.unwrap(),
            "Proposal is already marked as reviewed."
        );
        let stored = service.retrieve(&admin, proposal.id).await.unwrap();
        assert_eq!(stored.status, ProposalStatus::Reviewed);
    }

    #[tokio::test]
    async fn test_send_requires_response_and_document() {
        let h = Harness::new().await;
        let admin = h.admin("editor").await;
        let service = h.proposals();
        let proposal = service.create(request(Some("cto@acme.test"))).await.unwrap();

        let err = service
            .send_proposal(&admin, proposal.id, Some("Here you go".into()), None)
            .await
            .unwrap_err();
        assert_eq!(err.message, "Admin response and document are required.");

        let err = service
            .send_proposal(&admin, proposal.id, Some("  ".into()), Some(document()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let stored = service.retrieve(&admin, proposal.id).await.unwrap();
        assert_eq!(stored.status, ProposalStatus::Pending);
        assert_eq!(h.mailer.count().await, 0);
    }

    #[tokio::test]
    async fn test_send_without_email() {
        let h = Harness::new().await;
        let admin = h.admin("editor").await;
        let service = h.proposals();
        let proposal = service.create(request(None)).await.unwrap();

        let err = service
            .send_proposal(&admin, proposal.id, Some("Hi".into()), Some(document()))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Proposal email is missing.");
    }

    #[tokio::test]
    async fn test_send_delivers_attachment() {
        let h = Harness::new().await;
        let admin = h.admin("editor").await;
        let service = h.proposals();
        let proposal = service.create(request(Some("cto@acme.test"))).await.unwrap();

        let sent = service
            .send_proposal(&admin, proposal.id, Some("Our offer".into()), Some(document()))
            .await
            .unwrap();
        assert_eq!(sent.status, ProposalStatus::Sent);

        let mails = h.mailer.sent().await;
        assert_eq!(mails.len(), 1);
        assert_eq!(mails[0].subject, "Your Proposal from Go Digital Africa editor");
        assert_eq!(
            mails[0].text,
            "Hello Acme Ltd,\n\nOur offer\n\nPlease find your proposal document attached below."
        );
        assert_eq!(mails[0].attachments[0].content_type, DEFAULT_DOCUMENT_TYPE);
        assert_eq!(&mails[0].attachments[0].data[..], b"%PDF-1.4 proposal");
    }

    #[tokio::test]
    async fn test_failed_delivery_leaves_sent_status() {
        let h = Harness::new().await;
        let admin = h.admin("editor").await;
        let service = h.proposals();
        let proposal = service.create(request(Some("cto@acme.test"))).await.unwrap();

        h.mailer.set_failing(true);
        let err = service
            .send_proposal(&admin, proposal.id, Some("Our offer".into()), Some(document()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExternalService);
        assert!(err.message.starts_with("Failed to send email: "));

        let stored = service.retrieve(&admin, proposal.id).await.unwrap();
        assert_eq!(stored.status, ProposalStatus::Sent);
        let path = stored.proposal_document.unwrap();
        assert!(h.storage.exists(&path).await.unwrap());
    }
}
