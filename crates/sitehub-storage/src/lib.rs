//! # sitehub-storage
//!
//! Filesystem storage for uploaded resumes and proposal documents.

pub mod local;

pub use local::{LocalStorage, sanitize_file_name};
