//! Store traits the services are written against.
//!
//! Every trait has a PostgreSQL implementation in [`crate::repositories`]
//! and, with the `memory` feature, an in-memory one in `crate::memory`.
//! Both enforce the same uniqueness rules, including the single super
//! admin.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use sitehub_core::result::AppResult;
use sitehub_core::types::pagination::PageRequest;
use sitehub_core::types::{AccountId, ApplicationId, ContentId, ProposalId, SubscriberId};
use sitehub_entity::account::{Account, AccountChanges, NewAccount};
use sitehub_entity::application::{ApplicationStatus, CareerApplication, NewApplication};
use sitehub_entity::content::{ContentEntry, ContentKind};
use sitehub_entity::proposal::{NewProposal, ProposalChanges, ProposalRequest};
use sitehub_entity::subscriber::Subscriber;

use crate::repositories::{
    AccountRepository, ApplicationRepository, ContentRepository, ProposalRepository,
    SubscriberRepository,
};

/// Message returned when a second super admin would be stored.
pub const SUPER_ADMIN_TAKEN: &str = "Only one super admin can exist.";

/// Account persistence.
#[async_trait]
pub trait AccountStore: Send + Sync + Debug + 'static {
    /// Find an account by id.
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>>;

    /// Find an account by exact username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>>;

    /// Find an account by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// The super admin, if one exists.
    async fn find_super_admin(&self) -> AppResult<Option<Account>>;

    /// Accounts with the admin or super admin role, oldest first.
    async fn list_admins(&self) -> AppResult<Vec<Account>>;

    /// Number of accounts with the admin or super admin role.
    async fn count_admins(&self) -> AppResult<u64>;

    /// Insert an account. Fails with a validation error when the username,
    /// the email or the super admin role is already taken.
    async fn create(&self, data: &NewAccount) -> AppResult<Account>;

    /// Apply `changes` to an account. Same uniqueness rules as `create`.
    async fn update(&self, id: AccountId, changes: &AccountChanges) -> AppResult<Account>;

    /// Record a successful login.
    async fn touch_last_login(&self, id: AccountId, at: DateTime<Utc>) -> AppResult<()>;

    /// Delete an account. Returns `true` if a row was removed.
    async fn delete(&self, id: AccountId) -> AppResult<bool>;
}

/// Newsletter subscriber persistence.
#[async_trait]
pub trait SubscriberStore: Send + Sync + Debug + 'static {
    /// Insert an active subscriber. Fails with a conflict when the email is taken.
    async fn create(&self, email: &str) -> AppResult<Subscriber>;

    /// Find a subscriber by id.
    async fn find_by_id(&self, id: SubscriberId) -> AppResult<Option<Subscriber>>;

    /// Find a subscriber by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Subscriber>>;

    /// All subscribers, newest first.
    async fn list(&self) -> AppResult<Vec<Subscriber>>;

    /// Emails of active subscribers.
    async fn active_emails(&self) -> AppResult<Vec<String>>;

    /// Set the active flag.
    async fn set_active(&self, id: SubscriberId, active: bool) -> AppResult<()>;

    /// Delete a subscriber. Returns `true` if a row was removed.
    async fn delete(&self, id: SubscriberId) -> AppResult<bool>;

    /// Total number of subscribers.
    async fn count(&self) -> AppResult<u64>;

    /// Subscribers who joined at or after `since`.
    async fn count_since(&self, since: DateTime<Utc>) -> AppResult<u64>;
}

/// Filters for the admin application listing.
#[derive(Debug, Clone, Default)]
pub struct ApplicationQuery {
    /// Only applications for this career.
    pub career: Option<ContentId>,
    /// Only applications in this status.
    pub status: Option<ApplicationStatus>,
    /// Case-insensitive match on applicant name or email.
    pub search: Option<String>,
}

/// Career application persistence.
#[async_trait]
pub trait ApplicationStore: Send + Sync + Debug + 'static {
    /// Insert a new application in the `pending` status.
    async fn create(&self, data: &NewApplication) -> AppResult<CareerApplication>;

    /// Find an application by id.
    async fn find_by_id(&self, id: ApplicationId) -> AppResult<Option<CareerApplication>>;

    /// Applications matching `query`, newest first.
    async fn list(&self, query: &ApplicationQuery) -> AppResult<Vec<CareerApplication>>;

    /// Persist every mutable column of `application`.
    async fn save(&self, application: &CareerApplication) -> AppResult<CareerApplication>;

    /// Delete an application. Returns `true` if a row was removed.
    async fn delete(&self, id: ApplicationId) -> AppResult<bool>;

    /// Total number of applications.
    async fn count(&self) -> AppResult<u64>;

    /// The most recently submitted application.
    async fn latest(&self) -> AppResult<Option<CareerApplication>>;
}

/// Proposal request persistence.
#[async_trait]
pub trait ProposalStore: Send + Sync + Debug + 'static {
    /// Insert a new proposal request in the `pending` status.
    async fn create(&self, data: &NewProposal) -> AppResult<ProposalRequest>;

    /// Find a proposal request by id.
    async fn find_by_id(&self, id: ProposalId) -> AppResult<Option<ProposalRequest>>;

    /// All proposal requests, newest first.
    async fn list(&self) -> AppResult<Vec<ProposalRequest>>;

    /// Apply `changes` to a proposal request.
    async fn update(&self, id: ProposalId, changes: &ProposalChanges)
    -> AppResult<ProposalRequest>;

    /// Delete a proposal request. Returns `true` if a row was removed.
    async fn delete(&self, id: ProposalId) -> AppResult<bool>;

    /// Total number of proposal requests.
    async fn count(&self) -> AppResult<u64>;

    /// The most recently submitted proposal request.
    async fn latest(&self) -> AppResult<Option<ProposalRequest>>;
}

/// Listing parameters for content records.
///
/// Attribute names are `'static` because they come from the per-kind
/// whitelists on [`ContentKind`], never from the request.
#[derive(Debug, Clone, Default)]
pub struct ContentQuery {
    /// Exact-match attribute filters, compared as text.
    pub filters: Vec<(&'static str, String)>,
    /// Case-insensitive substring matched against any of the fields.
    pub search: Option<(Vec<&'static str>, String)>,
    /// Optional page window. `None` returns every match.
    pub page: Option<PageRequest>,
}

/// Result of a content listing.
#[derive(Debug, Clone, Default)]
pub struct ContentPage {
    /// Entries in listing order.
    pub entries: Vec<ContentEntry>,
    /// Matches before paging.
    pub total: u64,
}

/// Content record persistence.
#[async_trait]
pub trait ContentStore: Send + Sync + Debug + 'static {
    /// Insert a record of `kind`.
    async fn insert(&self, kind: ContentKind, data: serde_json::Value) -> AppResult<ContentEntry>;

    /// Find a record by kind and id.
    async fn find(&self, kind: ContentKind, id: ContentId) -> AppResult<Option<ContentEntry>>;

    /// Records of `kind` matching `query`, in the kind's default order.
    async fn list(&self, kind: ContentKind, query: &ContentQuery) -> AppResult<ContentPage>;

    /// Replace the attributes of a record. Returns `None` if it does not exist.
    async fn replace(
        &self,
        kind: ContentKind,
        id: ContentId,
        data: serde_json::Value,
    ) -> AppResult<Option<ContentEntry>>;

    /// Atomically add one to a numeric attribute. Returns `None` if the
    /// record does not exist.
    async fn increment(
        &self,
        kind: ContentKind,
        id: ContentId,
        field: &'static str,
    ) -> AppResult<Option<ContentEntry>>;

    /// Delete a record. Returns `true` if a row was removed.
    async fn delete(&self, kind: ContentKind, id: ContentId) -> AppResult<bool>;

    /// Number of records of `kind`.
    async fn count(&self, kind: ContentKind) -> AppResult<u64>;

    /// The most recent record of `kind`, by the kind's recency attribute.
    async fn latest(&self, kind: ContentKind) -> AppResult<Option<ContentEntry>>;
}

/// The full set of stores, shared by the services.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Accounts.
    pub accounts: Arc<dyn AccountStore>,
    /// Newsletter subscribers.
    pub subscribers: Arc<dyn SubscriberStore>,
    /// Career applications.
    pub applications: Arc<dyn ApplicationStore>,
    /// Proposal requests.
    pub proposals: Arc<dyn ProposalStore>,
    /// Content records.
    pub content: Arc<dyn ContentStore>,
}

impl Stores {
    /// PostgreSQL-backed stores sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            accounts: Arc::new(AccountRepository::new(pool.clone())),
            subscribers: Arc::new(SubscriberRepository::new(pool.clone())),
            applications: Arc::new(ApplicationRepository::new(pool.clone())),
            proposals: Arc::new(ProposalRepository::new(pool.clone())),
            content: Arc::new(ContentRepository::new(pool)),
        }
    }

    /// Empty in-memory stores sharing one set of tables, so deleting a
    /// career also removes its applications.
    #[cfg(feature = "memory")]
    pub fn memory() -> Self {
        let db = crate::memory::MemoryDatabase::default();
        Self {
            accounts: Arc::new(crate::memory::MemoryAccountStore::new(db.clone())),
            subscribers: Arc::new(crate::memory::MemorySubscriberStore::new(db.clone())),
            applications: Arc::new(crate::memory::MemoryApplicationStore::new(db.clone())),
            proposals: Arc::new(crate::memory::MemoryProposalStore::new(db.clone())),
            content: Arc::new(crate::memory::MemoryContentStore::new(db)),
        }
    }
}
