//! Short-lived key/value storage used for revoked tokens.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// A key/value backend whose entries expire on their own.
///
/// Values are plain strings. Key prefixing is left to the backend.
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Returns `None` for missing or expired keys.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Stores `value` for `ttl` unless the key is already present.
    /// Returns `true` when this call stored it.
    async fn insert_if_absent(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool>;
}
