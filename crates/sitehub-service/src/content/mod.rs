//! Plain content records: editorial, leads and company details.

pub mod access;
pub mod service;
pub mod team;

pub use access::{Access, Gate};
pub use service::{ContentService, ListParams};
pub use team::Department;
