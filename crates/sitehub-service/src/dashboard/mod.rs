//! Admin dashboard statistics.

pub mod service;

pub use service::{Activity, DashboardService, DashboardStats};
