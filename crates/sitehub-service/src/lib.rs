//! # sitehub-service
//!
//! Business logic for SiteHub. Each service is built with its
//! dependencies (stores, mailer, storage, token codecs) and receives the
//! caller as a [`RequestContext`] so permission checks live next to the
//! operation they guard.

pub mod account;
pub mod application;
pub mod auth;
pub mod content;
pub mod context;
pub mod dashboard;
pub mod newsletter;
pub mod proposal;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;

pub use account::{AccountService, AccountView};
pub use application::ApplicationService;
pub use auth::{AuthService, PasswordResetService};
pub use content::{ContentService, ListParams};
pub use context::RequestContext;
pub use dashboard::DashboardService;
pub use newsletter::NewsletterService;
pub use proposal::ProposalService;
pub use upload::UploadedFile;
