//! Back-office accounts and the single super admin.

pub mod service;
pub mod view;

pub use service::{AccountService, CreateAdminRequest, UpdateAdminRequest};
pub use view::AccountView;
