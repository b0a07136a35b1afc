//! Career applications: intake, review and status notifications.

pub mod notice;
pub mod service;
pub mod view;

pub use notice::notice_email;
pub use service::{ApplicationService, ApplyRequest};
pub use view::ApplicationView;
