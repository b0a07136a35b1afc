//! # sitehub-core
//!
//! Core crate for SiteHub. Contains configuration schemas, typed
//! identifiers, pagination types, the cache and storage provider traits,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other SiteHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
