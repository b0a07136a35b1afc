//! HTTP handlers grouped by resource.

pub mod admins;
pub mod applications;
pub mod auth;
pub mod content;
pub mod dashboard;
pub mod health;
pub mod newsletter;
pub mod proposals;
pub mod team;
