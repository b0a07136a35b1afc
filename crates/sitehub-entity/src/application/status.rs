//! Career application status enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use sitehub_core::AppError;

/// Lifecycle status of a career application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    /// Submitted, not yet opened by an admin.
    Pending,
    /// Opened by an admin.
    Reviewed,
    /// Invited to interview.
    Shortlisted,
    /// Turned down.
    Rejected,
    /// Offered the position.
    Hired,
}

impl ApplicationStatus {
    /// Statuses that are communicated to the applicant.
    pub fn is_communicated(&self) -> bool {
        matches!(self, Self::Shortlisted | Self::Rejected | Self::Hired)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::Shortlisted => "shortlisted",
            Self::Rejected => "rejected",
            Self::Hired => "hired",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "reviewed" => Ok(Self::Reviewed),
            "shortlisted" => Ok(Self::Shortlisted),
            "rejected" => Ok(Self::Rejected),
            "hired" => Ok(Self::Hired),
            _ => Err(AppError::field(
                "status",
                format!("\"{s}\" is not a valid choice."),
            )),
        }
    }
}
