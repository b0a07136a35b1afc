//! Subscriber entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sitehub_core::types::SubscriberId;

/// An email address subscribed to the newsletter.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Subscriber {
    /// Unique subscriber identifier.
    pub id: SubscriberId,
    /// Unique email address.
    pub email: String,
    /// When the address subscribed.
    pub subscribed_at: DateTime<Utc>,
    /// `false` once the address has unsubscribed.
    pub is_active: bool,
}
