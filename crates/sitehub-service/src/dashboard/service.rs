//! Cross-entity counters and the recent activity feed.
//!
//! Every call recomputes from the stores; nothing is cached.

use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;

use sitehub_core::error::AppError;
use sitehub_core::types::{format_display_date, format_display_day};
use sitehub_database::store::Stores;
use sitehub_entity::content::{ContentEntry, ContentKind, SortKey};

use crate::context::RequestContext;

/// Content kinds in the activity feed, with their message and category.
const CONTENT_ACTIVITY: [(ContentKind, &str, &str); 8] = [
    (ContentKind::Blog, "New blog post published", "Blog"),
    (ContentKind::Review, "New review added", "Reviews"),
    (ContentKind::Career, "New career position added", "Careers"),
    (ContentKind::Message, "New Message received", "Messages"),
    (ContentKind::News, "New news update", "News"),
    (ContentKind::Consultation, "New consultation request", "Consultation"),
    (ContentKind::CaseStudy, "New case study published", "Case Study"),
    (ContentKind::Award, "New award received", "Awards"),
];

/// One line of the recent activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub message: String,
    /// Formatted like `Jan 05, 2026`.
    pub date: String,
    pub category: String,
}

impl Activity {
    fn new(message: impl Into<String>, date: String, category: &str) -> Self {
        Self {
            message: message.into(),
            date,
            category: category.to_string(),
        }
    }
}

/// Dashboard payload.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_subscribers: u64,
    pub total_admins: u64,
    pub total_blogs: u64,
    pub total_reviews: u64,
    pub total_careers: u64,
    pub total_messages: u64,
    pub total_news: u64,
    pub total_consultations: u64,
    pub total_case_studies: u64,
    pub total_proposals: u64,
    pub total_awards: u64,
    pub total_career_applications: u64,
    pub recent_activities: Vec<Activity>,
}

/// Computes dashboard statistics.
#[derive(Debug, Clone)]
pub struct DashboardService {
    stores: Stores,
}

impl DashboardService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    pub async fn stats(&self, ctx: &RequestContext) -> Result<DashboardStats, AppError> {
        ctx.require_admin()?;
        let content = &self.stores.content;

        let (
            total_subscribers,
            total_admins,
            total_blogs,
            total_reviews,
            total_careers,
            total_messages,
            total_news,
            total_consultations,
            total_case_studies,
            total_proposals,
            total_awards,
            total_career_applications,
        ) = tokio::try_join!(
            self.stores.subscribers.count(),
            self.stores.accounts.count_admins(),
            content.count(ContentKind::Blog),
            content.count(ContentKind::Review),
            content.count(ContentKind::Career),
            content.count(ContentKind::Message),
            content.count(ContentKind::News),
            content.count(ContentKind::Consultation),
            content.count(ContentKind::CaseStudy),
            self.stores.proposals.count(),
            content.count(ContentKind::Award),
            self.stores.applications.count(),
        )?;

        let recent_activities = self.recent_activities().await?;
        debug!(activities = recent_activities.len(), "Dashboard statistics computed");

        Ok(DashboardStats {
            total_subscribers,
            total_admins,
            total_blogs,
            total_reviews,
            total_careers,
            total_messages,
            total_news,
            total_consultations,
            total_case_studies,
            total_proposals,
            total_awards,
            total_career_applications,
            recent_activities,
        })
    }

    /// The newest record of each kind, in feed order, followed by the
    /// number of subscribers from the last 24 hours.
    async fn recent_activities(&self) -> Result<Vec<Activity>, AppError> {
        let mut activities = Vec::new();

        for (kind, message, category) in CONTENT_ACTIVITY {
            if let Some(entry) = self.stores.content.latest(kind).await? {
                if let Some(date) = entry_date(kind, &entry) {
                    activities.push(Activity::new(message, date, category));
                }
            }
            // Proposals sit between case studies and awards in the feed.
            if kind == ContentKind::CaseStudy {
                if let Some(proposal) = self.stores.proposals.latest().await? {
                    activities.push(Activity::new(
                        "New proposal submitted",
                        format_display_date(&proposal.created_at),
                        "Proposal",
                    ));
                }
            }
        }

        if let Some(application) = self.stores.applications.latest().await? {
            activities.push(Activity::new(
                "New career application submitted",
                format_display_date(&application.applied_at),
                "Career Applications",
            ));
        }

        let now = Utc::now();
        let new_subscribers = self
            .stores
            .subscribers
            .count_since(now - Duration::days(1))
            .await?;
        if new_subscribers > 0 {
            activities.push(Activity::new(
                format!("{new_subscribers} new subscribers"),
                format_display_date(&now),
                "Subscribers",
            ));
        }

        Ok(activities)
    }
}

fn entry_date(kind: ContentKind, entry: &ContentEntry) -> Option<String> {
    match kind.recency() {
        SortKey::CreatedAt => Some(format_display_date(&entry.created_at)),
        SortKey::Field(field) => entry
            .text(field)
            .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok())
            .map(|d| format_display_day(&d)),
    }
}
