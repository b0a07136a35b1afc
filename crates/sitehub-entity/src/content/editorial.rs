//! Editorial records published by the site team.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{ContentKind, ContentRecord};

/// Blog post.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Blog {
    /// Post title.
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    /// Teaser text.
    #[validate(length(min = 1))]
    pub excerpt: String,
    /// Cover image URL.
    #[validate(url(message = "Enter a valid URL."))]
    pub image: String,
    /// Publication date.
    pub date: NaiveDate,
    /// Author name.
    #[validate(length(min = 1, max = 255))]
    pub author_name: String,
    /// Author avatar URL.
    #[validate(url(message = "Enter a valid URL."))]
    pub author_avatar: String,
    /// Author job title.
    #[validate(length(min = 1, max = 255))]
    pub author_role: String,
    /// Like counter.
    #[serde(default)]
    pub likes: u32,
}

impl ContentRecord for Blog {
    const KIND: ContentKind = ContentKind::Blog;
}

/// News article category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NewsCategory {
    /// Business.
    #[default]
    Business,
    /// Politics.
    Politics,
    /// Sports.
    Sports,
    /// Technology.
    Technology,
    /// Health.
    Health,
    /// Entertainment.
    Entertainment,
}

/// News article.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct News {
    /// Headline.
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    /// Article body.
    #[validate(length(min = 1))]
    pub content: String,
    /// Image URL.
    #[validate(url(message = "Enter a valid URL."))]
    pub image: String,
    /// Category.
    #[serde(default)]
    pub category: NewsCategory,
}

impl ContentRecord for News {
    const KIND: ContentKind = ContentKind::News;
}

/// Award received by the company.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Award {
    /// Award title.
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    /// Description.
    #[validate(length(min = 1))]
    pub description: String,
    /// Date the award was given.
    pub awarded_date: NaiveDate,
}

impl ContentRecord for Award {
    const KIND: ContentKind = ContentKind::Award;
}

/// Industry of a case study client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Industry {
    /// Technology.
    Tech,
    /// Finance.
    Finance,
    /// Healthcare.
    Healthcare,
    /// Education.
    Education,
    /// E-commerce.
    Ecommerce,
}

/// Client case study.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CaseStudy {
    /// Title.
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    /// Client industry.
    pub industry: Industry,
    /// Summary.
    #[validate(length(min = 1))]
    pub description: String,
    /// Problems faced.
    #[validate(length(min = 1))]
    pub challenges: String,
    /// What was built.
    #[validate(length(min = 1))]
    pub solutions: String,
    /// Measured outcome.
    #[validate(length(min = 1))]
    pub results: String,
    /// Image URL.
    #[validate(url(message = "Enter a valid URL."))]
    pub image: String,
}

impl ContentRecord for CaseStudy {
    const KIND: ContentKind = ContentKind::CaseStudy;
}
