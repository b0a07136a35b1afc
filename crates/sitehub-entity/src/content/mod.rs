//! Plain content records.
//!
//! These records have no behaviour beyond storage, so they share one
//! document table keyed by [`ContentKind`]. Each kind declares which
//! attributes may be filtered on, searched and sorted by; the store
//! implementations only ever receive attribute names from these
//! whitelists.

pub mod career;
pub mod company;
pub mod editorial;
pub mod lead;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use sitehub_core::types::ContentId;
use sitehub_core::{AppError, AppResult};

pub use career::{CAREER_LOCATIONS, Career, JobType};
pub use company::{CompanyInfo, Partner, TeamMember};
pub use editorial::{Award, Blog, CaseStudy, Industry, News, NewsCategory};
pub use lead::{Consultation, Message, Review, ReviewStatus};

/// The kinds of content stored in the document table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "content_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Contact form message.
    Message,
    /// Client testimonial.
    Review,
    /// Consultation booking.
    Consultation,
    /// Blog post.
    Blog,
    /// News article.
    News,
    /// Job listing.
    Career,
    /// Award received.
    Award,
    /// Client case study.
    CaseStudy,
    /// Office contact details.
    CompanyInfo,
    /// Partner logo.
    Partner,
    /// Team roster entry.
    TeamMember,
}

/// Attribute a listing is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// The row creation timestamp.
    CreatedAt,
    /// A document attribute compared as text (ISO dates sort correctly).
    Field(&'static str),
}

/// Sort order of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    /// Sort attribute.
    pub key: SortKey,
    /// Newest / largest first.
    pub descending: bool,
}

impl SortOrder {
    const fn desc(key: SortKey) -> Self {
        Self {
            key,
            descending: true,
        }
    }

    const fn asc(key: SortKey) -> Self {
        Self {
            key,
            descending: false,
        }
    }
}

impl ContentKind {
    /// Every kind, in dashboard order.
    pub const ALL: [ContentKind; 11] = [
        Self::Blog,
        Self::Review,
        Self::Career,
        Self::Message,
        Self::News,
        Self::Consultation,
        Self::CaseStudy,
        Self::Award,
        Self::CompanyInfo,
        Self::Partner,
        Self::TeamMember,
    ];

    /// Return the kind as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Review => "review",
            Self::Consultation => "consultation",
            Self::Blog => "blog",
            Self::News => "news",
            Self::Career => "career",
            Self::Award => "award",
            Self::CaseStudy => "case_study",
            Self::CompanyInfo => "company_info",
            Self::Partner => "partner",
            Self::TeamMember => "team_member",
        }
    }

    /// Human-readable singular label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Message => "Message",
            Self::Review => "Review",
            Self::Consultation => "Consultation",
            Self::Blog => "Blog",
            Self::News => "News",
            Self::Career => "Career",
            Self::Award => "Award",
            Self::CaseStudy => "Case study",
            Self::CompanyInfo => "Company info",
            Self::Partner => "Partner",
            Self::TeamMember => "Team member",
        }
    }

    /// Attributes accepted as exact-match filters.
    pub fn filter_fields(&self) -> &'static [&'static str] {
        match self {
            Self::News => &["category"],
            Self::Career => &["location", "job_type", "active_listing", "application_deadline"],
            Self::Award => &["awarded_date"],
            Self::CaseStudy => &["industry"],
            _ => &[],
        }
    }

    /// Attributes matched by the free-text `search` parameter.
    pub fn search_fields(&self) -> &'static [&'static str] {
        match self {
            Self::News => &["title", "content"],
            Self::Career | Self::Award | Self::CaseStudy => &["title", "description"],
            _ => &[],
        }
    }

    /// Default listing order.
    pub fn ordering(&self) -> SortOrder {
        match self {
            Self::Blog => SortOrder::desc(SortKey::Field("date")),
            Self::Award => SortOrder::desc(SortKey::Field("awarded_date")),
            Self::TeamMember => SortOrder::asc(SortKey::Field("department")),
            Self::CompanyInfo | Self::Partner => SortOrder::asc(SortKey::CreatedAt),
            _ => SortOrder::desc(SortKey::CreatedAt),
        }
    }

    /// Attribute that tells how recent a record is. Blog posts carry their
    /// own publication date; everything else uses the creation time.
    pub fn recency(&self) -> SortKey {
        match self {
            Self::Blog => SortKey::Field("date"),
            _ => SortKey::CreatedAt,
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("Unknown content kind: '{s}'")))
    }
}

/// A typed content record.
pub trait ContentRecord:
    Serialize + DeserializeOwned + Validate + Clone + Send + Sync + 'static
{
    /// Kind the record is stored under.
    const KIND: ContentKind;
}

/// A stored content document, as persisted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContentEntry {
    /// Unique record identifier.
    pub id: ContentId,
    /// Record kind.
    pub kind: ContentKind,
    /// Record attributes.
    pub data: serde_json::Value,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last changed.
    pub updated_at: DateTime<Utc>,
}

impl ContentEntry {
    /// Text value of an attribute, with the same semantics as PostgreSQL's
    /// `->>` operator.
    pub fn text(&self, field: &str) -> Option<String> {
        self.data.get(field).and_then(json_text)
    }

    /// Sort value of this entry for `key`.
    pub fn sort_value(&self, key: SortKey) -> Option<String> {
        match key {
            SortKey::CreatedAt => Some(self.created_at.to_rfc3339()),
            SortKey::Field(field) => self.text(field),
        }
    }
}

/// Render a JSON value as text the way PostgreSQL's `->>` does.
pub fn json_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// A typed content record together with its identity.
#[derive(Debug, Clone, Serialize)]
pub struct Content<T> {
    /// Unique record identifier.
    pub id: ContentId,
    /// The record attributes, flattened into the JSON object.
    #[serde(flatten)]
    pub record: T,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl<T: ContentRecord> Content<T> {
    /// Decode a stored entry into its typed form.
    pub fn from_entry(entry: ContentEntry) -> AppResult<Self> {
        if entry.kind != T::KIND {
            return Err(AppError::internal(format!(
                "Expected {} record, found {}",
                T::KIND,
                entry.kind
            )));
        }
        let record = serde_json::from_value(entry.data)?;
        Ok(Self {
            id: entry.id,
            record,
            created_at: entry.created_at,
        })
    }
}

/// Validation helper: value must be one of `choices`.
pub(crate) fn one_of(
    value: &str,
    choices: &[&str],
) -> Result<(), validator::ValidationError> {
    if choices.contains(&value) {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("invalid_choice");
        err.message = Some(format!("\"{value}\" is not a valid choice.").into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_text_matches_postgres_semantics() {
        assert_eq!(json_text(&json!("Nairobi")), Some("Nairobi".to_string()));
        assert_eq!(json_text(&json!(true)), Some("true".to_string()));
        assert_eq!(json_text(&json!(4)), Some("4".to_string()));
        assert_eq!(json_text(&json!(null)), None);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("case_study".parse::<ContentKind>().unwrap(), ContentKind::CaseStudy);
        assert!("casestudy".parse::<ContentKind>().is_err());
    }

    #[test]
    fn test_blog_recency_uses_publication_date() {
        assert_eq!(ContentKind::Blog.recency(), SortKey::Field("date"));
        assert_eq!(ContentKind::Award.recency(), SortKey::CreatedAt);
    }

    #[test]
    fn test_typed_decode_checks_kind() {
        let entry = ContentEntry {
            id: ContentId::new(),
            kind: ContentKind::Partner,
            data: json!({"name": "Acme", "logo": "https://acme.test/logo.png"}),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(Content::<Partner>::from_entry(entry.clone()).is_ok());
        assert!(Content::<Award>::from_entry(entry).is_err());
    }
}
