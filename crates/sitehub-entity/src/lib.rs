//! # sitehub-entity
//!
//! Domain records for SiteHub. Structs backed by their own table derive
//! `sqlx::FromRow`; plain content records (blog posts, news, careers, ...)
//! implement [`content::ContentRecord`] and are stored as documents.

pub mod account;
pub mod application;
pub mod content;
pub mod proposal;
pub mod subscriber;
