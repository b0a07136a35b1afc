//! Storage provider trait for uploaded documents.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for file storage backends.
///
/// Paths are relative to the provider root and use `/` separators
/// (`resumes/jane-doe.pdf`).
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Store `data` under a name derived from `path`. When the path is
    /// already taken a unique suffix is added; the path actually used is
    /// returned.
    async fn save(&self, path: &str, data: Bytes) -> AppResult<String>;

    /// Read a stored file into memory.
    async fn read_bytes(&self, path: &str) -> AppResult<Bytes>;

    /// Delete a file. Deleting a missing file is not an error.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Check whether a file exists at the given path.
    async fn exists(&self, path: &str) -> AppResult<bool>;
}
