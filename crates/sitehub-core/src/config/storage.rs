//! Upload storage configuration.

use serde::{Deserialize, Serialize};

/// Storage for uploaded resumes and proposal documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory of the local storage provider.
    #[serde(default = "default_root")]
    pub root_path: String,
    /// Maximum request body size in bytes (default 10 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_root(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_root() -> String {
    "./data/media".to_string()
}

fn default_max_upload() -> u64 {
    10_485_760
}
