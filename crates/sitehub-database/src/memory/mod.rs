//! In-memory store implementations.
//!
//! Every table lives behind one Tokio mutex, so each store operation is
//! atomic with respect to the others. That gives the same guarantees the
//! PostgreSQL constraints give: unique usernames and emails, one super
//! admin, and applications removed together with their career.

mod account;
mod application;
mod content;
mod proposal;
mod subscriber;

use std::sync::Arc;

use tokio::sync::Mutex;

use sitehub_entity::account::Account;
use sitehub_entity::application::CareerApplication;
use sitehub_entity::content::ContentEntry;
use sitehub_entity::proposal::ProposalRequest;
use sitehub_entity::subscriber::Subscriber;

pub use account::MemoryAccountStore;
pub use application::MemoryApplicationStore;
pub use content::MemoryContentStore;
pub use proposal::MemoryProposalStore;
pub use subscriber::MemorySubscriberStore;

/// Rows of every table, in insertion order.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) accounts: Vec<Account>,
    pub(crate) subscribers: Vec<Subscriber>,
    pub(crate) applications: Vec<CareerApplication>,
    pub(crate) proposals: Vec<ProposalRequest>,
    pub(crate) content: Vec<ContentEntry>,
}

/// Shared handle to the in-memory tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryDatabase {
    pub(crate) async fn lock(&self) -> tokio::sync::MutexGuard<'_, Tables> {
        self.tables.lock().await
    }
}

/// Case-insensitive substring match, as SQL `ILIKE '%term%'`.
pub(crate) fn ilike(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(&term.to_lowercase())
}
