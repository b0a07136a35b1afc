//! Proposal request entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sitehub_core::types::ProposalId;

use super::status::ProposalStatus;

/// Service a prospect is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "service_interest", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ServiceInterest {
    /// Web Development.
    WebDevelopment,
    /// Mobile App Development.
    MobileApp,
    /// Digital Marketing.
    DigitalMarketing,
    /// Graphic Design.
    GraphicDesign,
    /// SEO & Analytics.
    Seo,
}

impl ServiceInterest {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::WebDevelopment => "Web Development",
            Self::MobileApp => "Mobile App Development",
            Self::DigitalMarketing => "Digital Marketing",
            Self::GraphicDesign => "Graphic Design",
            Self::Seo => "SEO & Analytics",
        }
    }
}

/// A request for a commercial proposal.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProposalRequest {
    /// Unique proposal identifier.
    pub id: ProposalId,
    /// Requester full name.
    pub name: String,
    /// Address the proposal is sent to.
    pub email: Option<String>,
    /// Requested service.
    pub service_interest: ServiceInterest,
    /// Free-form requirements.
    pub details: String,
    /// Lifecycle status.
    pub status: ProposalStatus,
    /// Text sent along with the proposal document.
    pub admin_response: Option<String>,
    /// Storage path of the proposal document.
    pub proposal_document: Option<String>,
    /// When the request was submitted.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a proposal request.
#[derive(Debug, Clone)]
pub struct NewProposal {
    /// Requester full name.
    pub name: String,
    /// Address the proposal is sent to.
    pub email: Option<String>,
    /// Requested service.
    pub service_interest: ServiceInterest,
    /// Free-form requirements.
    pub details: String,
}

/// Partial update of a proposal request. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProposalChanges {
    /// New requester name.
    pub name: Option<String>,
    /// New email; `Some(None)` clears it.
    pub email: Option<Option<String>>,
    /// New service interest.
    pub service_interest: Option<ServiceInterest>,
    /// New requirements text.
    pub details: Option<String>,
    /// New status.
    pub status: Option<ProposalStatus>,
    /// New admin response.
    pub admin_response: Option<String>,
    /// New document path.
    pub proposal_document: Option<String>,
}

impl ProposalChanges {
    /// Apply the changes to an in-memory proposal.
    pub fn apply_to(&self, proposal: &mut ProposalRequest) {
        if let Some(name) = &self.name {
            proposal.name = name.clone();
        }
        if let Some(email) = &self.email {
            proposal.email = email.clone();
        }
        if let Some(service) = self.service_interest {
            proposal.service_interest = service;
        }
        if let Some(details) = &self.details {
            proposal.details = details.clone();
        }
        if let Some(status) = self.status {
            proposal.status = status;
        }
        if let Some(response) = &self.admin_response {
            proposal.admin_response = Some(response.clone());
        }
        if let Some(document) = &self.proposal_document {
            proposal.proposal_document = Some(document.clone());
        }
    }
}
