//! Proposal request status enumeration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a proposal request.
///
/// `pending` on creation, `reviewed` through an explicit admin action and
/// `sent` only through the send-proposal action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "proposal_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    /// Awaiting review.
    Pending,
    /// Looked at by an admin.
    Reviewed,
    /// A proposal document was sent.
    Sent,
}

/// Outcome of a mark-reviewed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkReviewed {
    /// Status must change to `reviewed`.
    Apply,
    /// Already `reviewed`; nothing to persist.
    AlreadyReviewed,
}

impl ProposalStatus {
    /// Decide what marking the proposal as reviewed does.
    pub fn mark_reviewed(self) -> MarkReviewed {
        match self {
            Self::Reviewed => MarkReviewed::AlreadyReviewed,
            Self::Pending | Self::Sent => MarkReviewed::Apply,
        }
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::Sent => "sent",
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
