//! Request throttling configuration.

use serde::{Deserialize, Serialize};

/// Per-client request throttling.
///
/// Anonymous clients are keyed by address, authenticated clients by
/// account id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Whether throttling is applied at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Requests per minute for anonymous clients.
    #[serde(default = "default_anon")]
    pub anon_per_minute: u32,
    /// Requests per minute for authenticated clients.
    #[serde(default = "default_user")]
    pub user_per_minute: u32,
    /// Take the client address from `X-Forwarded-For`. Only enable behind
    /// a reverse proxy that overwrites the header.
    #[serde(default)]
    pub trust_forwarded_for: bool,
    /// Upper bound on clients tracked at once.
    #[serde(default = "default_max_clients")]
    pub max_tracked_clients: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            anon_per_minute: default_anon(),
            user_per_minute: default_user(),
            trust_forwarded_for: false,
            max_tracked_clients: default_max_clients(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_anon() -> u32 {
    5
}

fn default_user() -> u32 {
    10
}

fn default_max_clients() -> u64 {
    100_000
}
