//! Job listings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{ContentKind, ContentRecord, one_of};

/// Offices a job can be based at.
pub const CAREER_LOCATIONS: [&str; 8] = [
    "Nairobi, Kenya",
    "Mogadishu, Somalia",
    "Dubai, UAE",
    "Dodoma, Tanzania",
    "Accra, Ghana",
    "Ethiopia, Addis Ababa",
    "Dakar, Senegal",
    "Kigali, Rwanda",
];

/// Employment type of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    /// Full-time.
    #[default]
    FullTime,
    /// Part-time.
    PartTime,
    /// Remote.
    Remote,
    /// Internship.
    Internship,
    /// Contract.
    Contract,
}

/// A job listing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Career {
    /// Position title.
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    /// Role description.
    #[validate(length(min = 1))]
    pub description: String,
    /// Office location.
    #[serde(default = "default_location")]
    #[validate(custom(function = "validate_location"))]
    pub location: String,
    /// Employment type.
    #[serde(default)]
    pub job_type: JobType,
    /// Requirements text.
    #[validate(length(min = 1))]
    pub requirements: String,
    /// Last day to apply.
    pub application_deadline: NaiveDate,
    /// Whether the listing accepts applications.
    #[serde(default = "default_active")]
    pub active_listing: bool,
}

impl ContentRecord for Career {
    const KIND: ContentKind = ContentKind::Career;
}

fn default_location() -> String {
    CAREER_LOCATIONS[0].to_string()
}

fn default_active() -> bool {
    true
}

fn validate_location(location: &str) -> Result<(), ValidationError> {
    one_of(location, &CAREER_LOCATIONS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let career: Career = serde_json::from_value(json!({
            "title": "Backend Engineer",
            "description": "Build APIs",
            "requirements": "Rust",
            "application_deadline": "2030-01-31"
        }))
        .unwrap();
        assert!(career.active_listing);
        assert_eq!(career.location, "Nairobi, Kenya");
        assert_eq!(career.job_type, JobType::FullTime);
        assert!(career.validate().is_ok());
    }

    #[test]
    fn test_unknown_location_fails_validation() {
        let career: Career = serde_json::from_value(json!({
            "title": "Backend Engineer",
            "description": "Build APIs",
            "requirements": "Rust",
            "application_deadline": "2030-01-31",
            "location": "Atlantis"
        }))
        .unwrap();
        assert!(career.validate().is_err());
    }

    #[test]
    fn test_job_type_wire_format() {
        assert_eq!(serde_json::to_value(JobType::PartTime).unwrap(), json!("part-time"));
    }
}
