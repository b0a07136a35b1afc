//! Records submitted by site visitors.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{ContentKind, ContentRecord};

/// Contact form message.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Message {
    /// Sender full name.
    #[validate(length(min = 1, max = 255, message = "This field may not be blank."))]
    pub full_name: String,
    /// Sender email.
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    /// Sender phone number.
    #[validate(length(min = 1, max = 20))]
    pub phone: String,
    /// Message body.
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub message: String,
}

impl ContentRecord for Message {
    const KIND: ContentKind = ContentKind::Message;
}

/// Visibility toggle of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReviewStatus {
    /// Shown on the site.
    #[default]
    #[serde(rename = "ON")]
    On,
    /// Hidden.
    #[serde(rename = "OFF")]
    Off,
}

impl ReviewStatus {
    /// The opposite status.
    pub fn toggled(self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }
}

/// Client testimonial.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Review {
    /// Reviewer name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Reviewer job title.
    #[serde(default)]
    #[validate(length(max = 255))]
    pub position: Option<String>,
    /// Star rating.
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5."))]
    pub rating: u8,
    /// Review text.
    #[validate(length(min = 1))]
    pub comment: String,
    /// Avatar URL.
    #[serde(default)]
    #[validate(url(message = "Enter a valid URL."))]
    pub image_url: Option<String>,
    /// Visibility.
    #[serde(default)]
    pub status: ReviewStatus,
}

impl ContentRecord for Review {
    const KIND: ContentKind = ContentKind::Review;
}

/// Consultation booking.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Consultation {
    /// Requester name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Requester email.
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    /// Requester phone number.
    #[validate(length(min = 1, max = 20))]
    pub phone: String,
    /// Requested date.
    pub date: NaiveDate,
    /// What the consultation is about.
    #[validate(length(min = 1))]
    pub description: String,
}

impl ContentRecord for Consultation {
    const KIND: ContentKind = ContentKind::Consultation;
}
