//! Core type definitions used across the SiteHub workspace.

pub mod display_date;
pub mod id;
pub mod pagination;

pub use display_date::{format_display_date, format_display_day};
pub use id::*;
pub use pagination::{PageRequest, PageResponse};
