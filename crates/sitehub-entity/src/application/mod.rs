//! Career application entities and their status lifecycle.

pub mod model;
pub mod status;
pub mod transition;

pub use model::{ApplicationChanges, CareerApplication, NewApplication};
pub use status::ApplicationStatus;
pub use transition::{ApplicationNotice, Transition, on_admin_view, transition};
