//! Custom Axum extractors.

pub mod auth;
pub mod form;
pub mod path;

pub use auth::{AuthUser, OptionalAuthUser};
pub use form::MultipartForm;
pub use path::IdPath;
