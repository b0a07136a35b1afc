//! Pure status transition rules for career applications.
//!
//! The functions here decide the next status and whether the applicant
//! must be told about it. They never touch storage or send anything; the
//! caller persists the new status first and then dispatches the notice.

use super::status::ApplicationStatus;

/// Notice owed to an applicant after a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationNotice {
    /// Interview invitation.
    Shortlisted,
    /// Rejection letter.
    Rejected,
    /// Offer letter.
    Hired,
}

impl ApplicationNotice {
    /// The notice owed for entering `status`, if any.
    pub fn for_status(status: ApplicationStatus) -> Option<Self> {
        match status {
            ApplicationStatus::Shortlisted => Some(Self::Shortlisted),
            ApplicationStatus::Rejected => Some(Self::Rejected),
            ApplicationStatus::Hired => Some(Self::Hired),
            ApplicationStatus::Pending | ApplicationStatus::Reviewed => None,
        }
    }
}

/// Outcome of a transition decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Status to persist.
    pub status: ApplicationStatus,
    /// Whether the stored status actually changes.
    pub changed: bool,
    /// Notice to dispatch after persisting, if any.
    pub notice: Option<ApplicationNotice>,
}

/// Decide the result of an admin requesting `requested` on an application
/// currently in `current`.
///
/// Any explicit transition is allowed, including moving away from a
/// communicated status. A notice is owed only when the status differs
/// from the current one and the new status is communicated.
pub fn transition(current: ApplicationStatus, requested: ApplicationStatus) -> Transition {
    let changed = current != requested;
    Transition {
        status: requested,
        changed,
        notice: if changed {
            ApplicationNotice::for_status(requested)
        } else {
            None
        },
    }
}

/// Automatic transition applied when an admin opens an application.
///
/// Only `pending` moves (to `reviewed`); no notice is ever owed.
pub fn on_admin_view(current: ApplicationStatus) -> Transition {
    match current {
        ApplicationStatus::Pending => Transition {
            status: ApplicationStatus::Reviewed,
            changed: true,
            notice: None,
        },
        other => Transition {
            status: other,
            changed: false,
            notice: None,
        },
    }
}
